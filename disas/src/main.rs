#[macro_use]
extern crate log;

mod cli;

use std::{
    error::Error,
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use disasm68k::{Decoder, DisassemblyMap, Listing, Options, PrinterExt, RenderingSettings};

#[cfg(feature = "color")]
use std::fmt::{self, Display};

#[cfg(feature = "color")]
use disasm68k::Style;

use crate::cli::{Cli, Color, Command};

struct Colors {
    #[cfg_attr(not(feature = "color"), allow(dead_code))]
    color: Color,
}

impl PrinterExt for Colors {
    #[cfg(feature = "color")]
    fn print_styled(
        &self,
        fmt: &mut fmt::Formatter,
        style: Style,
        display: impl fmt::Display,
    ) -> fmt::Result {
        use owo_colors::OwoColorize;

        match self.color {
            Color::Off => display.fmt(fmt),
            Color::On => match style {
                Style::Mnemonic => display.yellow().fmt(fmt),
                Style::Register => display.blue().fmt(fmt),
                Style::Immediate => display.magenta().fmt(fmt),
                Style::Address => display.magenta().fmt(fmt),
                Style::AddressOffset => display.magenta().fmt(fmt),
                Style::Symbol => display.green().fmt(fmt),
                Style::Comment => display.bright_black().fmt(fmt),
                Style::AssemblerDirective => display.cyan().fmt(fmt),
            },
        }
    }
}

// ignore broken pipe error
fn helper(result: io::Result<()>) -> io::Result<()> {
    if matches!(result, Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe) {
        Ok(())
    } else {
        result
    }
}

struct App {
    decoder: Decoder,
    settings: RenderingSettings,
    color: Color,
}

impl App {
    fn new(cli: &Cli) -> Self {
        Self {
            decoder: Decoder::new(Options {
                base_address: cli.base,
            }),
            settings: cli.rendering_settings(),
            color: cli.color,
        }
    }

    fn load(&self, path: &Path) -> Result<DisassemblyMap, Box<dyn Error>> {
        let mut input = BufReader::new(File::open(path)?);
        let map = DisassemblyMap::load(&mut input)?;
        debug!(
            "loaded {}: {:#x}..{:#x}, {} items",
            path.display(),
            map.start(),
            map.end(),
            map.item_count()
        );
        Ok(map)
    }

    fn save(&self, path: &Path, map: &DisassemblyMap) -> Result<(), Box<dyn Error>> {
        let mut out = BufWriter::new(File::create(path)?);
        map.save(&mut out)?;
        out.flush()?;
        debug!("saved {}", path.display());
        Ok(())
    }

    fn print(&self, map: &DisassemblyMap) -> io::Result<()> {
        let ext = Colors { color: self.color };
        let listing = Listing::with_ext(map, self.settings, ext);
        let mut out = BufWriter::new(io::stdout().lock());
        helper(listing.print(&mut out))?;
        helper(out.flush())
    }

    fn edit<F>(&self, path: &Path, f: F) -> Result<(), Box<dyn Error>>
    where
        F: FnOnce(&Decoder, &mut DisassemblyMap) -> Result<(), disasm68k::MapError>,
    {
        let mut map = self.load(path)?;
        f(&self.decoder, &mut map)?;
        self.save(path, &map)?;
        self.print(&map)?;
        Ok(())
    }

    fn run(&self, command: &Command) -> Result<(), Box<dyn Error>> {
        match command {
            Command::New { file, output } => {
                let data = fs::read(file)?;
                let map = self.decoder.decode(&data)?;
                if let Some(output) = output {
                    self.save(output, &map)?;
                }
                self.print(&map)?;
            }
            Command::Print { project } => {
                let map = self.load(project)?;
                self.print(&map)?;
            }
            Command::Code {
                project,
                start,
                end,
            } => {
                self.edit(project, |decoder, map| {
                    decoder.decode_range(map, *start, *end)
                })?;
            }
            Command::Data {
                project,
                start,
                end,
                kind,
                chunk,
            } => {
                let literal = kind.literal(*chunk);
                self.edit(project, |decoder, map| {
                    decoder.set_literal_range(map, *start, *end, literal)
                })?;
            }
            Command::Rename {
                project,
                address,
                name,
            } => {
                self.edit(project, |decoder, map| {
                    decoder.rename_label(map, *address, name.as_str())
                })?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = cli::parse_cli();
    let app = App::new(&cli);
    app.run(&cli.command)
}
