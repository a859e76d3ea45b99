//! Helpers for table driven decoder tests.

mod utils;

pub use utils::check;
