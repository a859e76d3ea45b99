// Catalog macros. Every id below is part of the project file format,
// never renumber an existing entry.

/// Defines a `repr(u16)` enum with a fixed numeric id and a mnemonic text
/// for every variant.
#[macro_export]
macro_rules! define_catalog {
    ($(#[$attr:meta])* $vis:vis enum $name:ident {
        $($op:ident = $id:literal => $text:literal),+ $(,)?
    }) => (
        #[repr(u16)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $(#[$attr])*
        $vis enum $name {
            $($op = $id),+
        }

        impl $name {
            pub const fn id(self) -> u16 {
                self as u16
            }

            pub fn from_id(id: u16) -> Option<Self> {
                Some(match id {
                    $($id => Self::$op,)+
                    _ => return None,
                })
            }

            pub const fn text(self) -> &'static str {
                match self {
                    $(Self::$op => $text,)+
                }
            }
        }

        impl From<$name> for u16 {
            fn from(value: $name) -> u16 {
                value as u16
            }
        }
    );
}
pub use define_catalog;

/// Defines a `repr(u16)` enum of bare type identifiers.
#[macro_export]
macro_rules! impl_type_ids {
    ($(#[$attr:meta])* $vis:vis enum $name:ident {
        $($op:ident = $n:expr),+ $(,)?
    }) => (
        #[repr(u16)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        $(#[$attr])*
        $vis enum $name {
            $($op = $n),+
        }

        impl From<$name> for u16 {
            fn from(value: $name) -> u16 {
                value as u16
            }
        }

        impl $name {
            pub fn from_u16(value: u16) -> Option<Self> {
                Some(match value {
                    $($n => Self::$op,)+
                    _ => return None,
                })
            }
        }
    );
}
pub use impl_type_ids;
