use std::{fmt, num::ParseIntError, path::PathBuf, str::FromStr};

use bpaf::*;
use disasm68k::{Casing, Literal, RenderingSettings};

#[derive(Copy, Clone, Debug)]
pub enum Color {
    Off,
    On,
}

/// Data representation accepted by the `data` command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DataKind {
    Byte,
    Word,
    Long,
    ByteRun,
    WordRun,
    LongRun,
    String,
}

impl DataKind {
    pub fn literal(self, chunk: usize) -> Literal {
        match self {
            Self::Byte => Literal::Bytes(chunk),
            Self::Word => Literal::Words(chunk),
            Self::Long => Literal::Longs(chunk),
            Self::ByteRun => Literal::ByteRun,
            Self::WordRun => Literal::WordRun,
            Self::LongRun => Literal::LongRun,
            Self::String => Literal::Text,
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Byte => "byte",
            Self::Word => "word",
            Self::Long => "long",
            Self::ByteRun => "byte-run",
            Self::WordRun => "word-run",
            Self::LongRun => "long-run",
            Self::String => "string",
        };
        fmt.write_str(s)
    }
}

impl FromStr for DataKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byte" => Ok(Self::Byte),
            "word" => Ok(Self::Word),
            "long" => Ok(Self::Long),
            "byte-run" => Ok(Self::ByteRun),
            "word-run" => Ok(Self::WordRun),
            "long-run" => Ok(Self::LongRun),
            "string" => Ok(Self::String),
            _ => Err("invalid data kind"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Command {
    New {
        file: PathBuf,
        output: Option<PathBuf>,
    },
    Print {
        project: PathBuf,
    },
    Code {
        project: PathBuf,
        start: u64,
        end: u64,
    },
    Data {
        project: PathBuf,
        start: u64,
        end: u64,
        kind: DataKind,
        chunk: usize,
    },
    Rename {
        project: PathBuf,
        address: u64,
        name: String,
    },
}

#[derive(Debug, Clone)]
pub struct Cli {
    pub decimal: bool,
    pub upper: bool,
    pub color: Color,
    pub base: u64,
    pub command: Command,
}

impl Cli {
    pub fn rendering_settings(&self) -> RenderingSettings {
        RenderingSettings {
            hex: !self.decimal,
            casing: if self.upper {
                Casing::Upper
            } else {
                Casing::Lower
            },
        }
    }
}

/// Accepts `0x10000`, `$10000` or `65536`.
pub fn parse_address(s: &str) -> Result<u64, ParseIntError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else if let Some(hex) = s.strip_prefix('$') {
        u64::from_str_radix(hex, 16)
    } else {
        s.parse()
    }
}

fn address(name: &'static str, help: &'static str) -> impl Parser<u64> {
    positional::<String>(name)
        .help(help)
        .parse(|s| parse_address(&s))
}

fn project() -> impl Parser<PathBuf> {
    positional::<PathBuf>("PROJECT").help("Project file")
}

fn command() -> impl Parser<Command> {
    let new = {
        let file = positional::<PathBuf>("FILE").help("Raw binary to decode");
        let output = short('o')
            .long("output")
            .help("Save the project to PROJECT")
            .argument::<PathBuf>("PROJECT")
            .optional();
        construct!(Command::New { output, file })
            .to_options()
            .descr("Decode a raw binary loaded at the base address")
            .command("new")
    };

    let print = {
        let project = project();
        construct!(Command::Print { project })
            .to_options()
            .descr("Print a saved project")
            .command("print")
    };

    let code = {
        let project = project();
        let start = address("START", "First address of the range");
        let end = address("END", "Address after the range");
        construct!(Command::Code {
            project,
            start,
            end
        })
        .to_options()
        .descr("Decode a range as instructions")
        .command("code")
    };

    let data = {
        let project = project();
        let start = address("START", "First address of the range");
        let end = address("END", "Address after the range");
        let kind = long("kind")
            .help("Data representation [byte, word, long, byte-run, word-run, long-run, string]")
            .argument::<DataKind>("KIND");
        let chunk = long("chunk")
            .help("Number of values per line for tables [default: 1]")
            .argument::<usize>("N")
            .fallback(1);
        construct!(Command::Data {
            kind,
            chunk,
            project,
            start,
            end
        })
        .to_options()
        .descr("Convert a range to data")
        .command("data")
    };

    let rename = {
        let project = project();
        let address = address("ADDR", "Address of the label");
        let name = positional::<String>("NAME").help("New label name");
        construct!(Command::Rename {
            project,
            address,
            name
        })
        .to_options()
        .descr("Rename a label")
        .command("rename")
    };

    construct!([new, print, code, data, rename])
}

pub fn parse_cli() -> Cli {
    let decimal = long("decimal")
        .help("Print numbers in decimal")
        .switch();

    let upper = long("upper")
        .help("Print mnemonics and registers in upper case")
        .switch();

    #[cfg(feature = "color")]
    let auto_color =
        supports_color::on(supports_color::Stream::Stdout).map_or(Color::Off, |_| Color::On);

    #[cfg(not(feature = "color"))]
    let auto_color = Color::Off;

    let color = long("color")
        .help("Enable or disable color output [default: auto, valid modes: off, on, auto]")
        .argument::<String>("MODE")
        .parse(move |s| match s.as_str() {
            "off" => Ok(Color::Off),
            "on" => Ok(Color::On),
            "auto" => Ok(auto_color),
            _ => Err(format!("invalid color {s}")),
        })
        .fallback(auto_color);

    let base = long("base")
        .help("Base address of the binary [default: 0x10000]")
        .argument::<String>("ADDR")
        .parse(|s| parse_address(&s))
        .fallback(0x10000);

    let command = command();

    construct!(Cli {
        decimal,
        upper,
        color,
        base,
        command,
    })
    .to_options()
    .version(env!("CARGO_PKG_VERSION"))
    .descr("Re-editable Motorola 68000 disassembler")
    .fallback_to_usage()
    .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses() {
        assert_eq!(parse_address("0x10000"), Ok(0x10000));
        assert_eq!(parse_address("$1F"), Ok(0x1f));
        assert_eq!(parse_address("256"), Ok(256));
        assert!(parse_address("$").is_err());
        assert!(parse_address("lbl").is_err());
    }

    #[test]
    fn data_kinds() {
        for kind in [
            DataKind::Byte,
            DataKind::Word,
            DataKind::Long,
            DataKind::ByteRun,
            DataKind::WordRun,
            DataKind::LongRun,
            DataKind::String,
        ] {
            assert_eq!(kind.to_string().parse(), Ok(kind));
        }
        assert_eq!(DataKind::Word.literal(4), Literal::Words(4));
        assert_eq!(DataKind::String.literal(4), Literal::Text);
    }

    #[test]
    fn check_invariants() {
        command().to_options().check_invariants(false);
    }
}
