//! `gmir`: gemtext reader front end for scripts and pipes.
//!
//! Renders a gemtext document to stdout. Without `--height` the whole
//! document is reflowed; with `--height` or `--keys` a single screen is
//! painted after replaying the given keys.
//!
//! # Usage
//!
//! ```bash
//! gmir notes.gmi
//! cat notes.gmi | gmir --width 60 --plain
//! gmir --height 20 --keys '/install<Enter>n' notes.gmi
//! ```

use gmir::event::set_log_callback;
use gmir::input::{Event, KeyCode, KeyEvent};
use gmir::style::Theme;
use gmir::view::{Layout, SelectorSpace, ViewState};
use gmir::{Action, AnsiWriter, Document, Reader, ReaderOptions};
use std::ffi::OsString;
use std::fs::File;
use std::io;
use std::path::PathBuf;

const HELP_TEXT: &str = "gmir - gemtext reader

USAGE:
    gmir [OPTIONS] [FILE]

If FILE is not given, standard input is read.

OPTIONS:
    -h, --help              Print this help message and exit
    --width <N>             Screen width in columns (default: 80)
    --height <N>            Paint a single screen of N rows
    --toc                   Show the table of contents
    --search <PATTERN>      Highlight matches and jump to the first one
    --keys <KEYS>           Replay keys before painting, e.g. 'G/term<Enter>n'
                            Named keys: <Up> <Down> <PgUp> <PgDn> <Left>
                            <Right> <Home> <End> <Enter> <Esc> <BS> <Del>
    --plain                 Do not emit ANSI styles
    --hide-urls             Show link labels without their URLs
    -v, --verbose           Log to stderr

KEY BINDINGS (for --keys):
    Up/Down      Scroll one line        PgUp/PgDn  Scroll half a page
    Left/Right   Shift preformatted     g/G        Top/bottom
    h/H          Next/previous heading  t          Table of contents
    / ?          Search/reverse search  n/p        Next/previous match
    0-9          Select a link          Esc        Clear input
    q            Quit
";

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_HEIGHT: u16 = 24;

/// Configuration parsed from command-line arguments.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub file: Option<PathBuf>,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub toc: bool,
    pub search: Option<String>,
    pub keys: Option<String>,
    pub plain: bool,
    pub hide_urls: bool,
    pub verbose: bool,
}

/// Result of CLI parsing.
pub enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy();
            match arg_str.as_ref() {
                "-h" | "--help" => return ParseResult::Help,
                "--toc" => config.toc = true,
                "--plain" => config.plain = true,
                "--hide-urls" => config.hide_urls = true,
                "-v" | "--verbose" => config.verbose = true,
                "--width" | "--height" => {
                    let Some(value) = args.next() else {
                        return ParseResult::Error(format!("{arg_str} requires a value"));
                    };
                    let value = value.to_string_lossy();
                    match value.parse::<u16>() {
                        Ok(n) if n > 0 => {
                            if arg_str == "--width" {
                                config.width = Some(n);
                            } else {
                                config.height = Some(n);
                            }
                        }
                        _ => {
                            return ParseResult::Error(format!(
                                "Invalid {arg_str} value: {value} (must be positive integer)"
                            ));
                        }
                    }
                }
                "--search" | "--keys" => {
                    let Some(value) = args.next() else {
                        return ParseResult::Error(format!("{arg_str} requires a value"));
                    };
                    let value = value.to_string_lossy().into_owned();
                    if arg_str == "--search" {
                        config.search = Some(value);
                    } else {
                        config.keys = Some(value);
                    }
                }
                other if other.starts_with('-') && other != "-" => {
                    return ParseResult::Error(format!("Unknown option: {other}"));
                }
                _ => {
                    if config.file.is_some() {
                        return ParseResult::Error("Too many arguments.".to_string());
                    }
                    if arg_str != "-" {
                        config.file = Some(PathBuf::from(&arg));
                    }
                }
            }
        }
        ParseResult::Config(config)
    }

    fn options(&self) -> ReaderOptions {
        let theme = if self.plain {
            Theme::plain()
        } else {
            Theme::default()
        };
        ReaderOptions {
            show_urls: !self.hide_urls,
            theme,
            ..ReaderOptions::default()
        }
    }
}

/// Decode `--keys` notation into key events.
fn parse_keys(keys: &str) -> Result<Vec<KeyEvent>, String> {
    let mut events = Vec::new();
    let mut rest = keys;
    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(end) = rest.find('>') {
                let name = &rest[1..end];
                let code = match name {
                    "Up" => KeyCode::Up,
                    "Down" => KeyCode::Down,
                    "PgUp" => KeyCode::PageUp,
                    "PgDn" => KeyCode::PageDown,
                    "Left" => KeyCode::Left,
                    "Right" => KeyCode::Right,
                    "Home" => KeyCode::Home,
                    "End" => KeyCode::End,
                    "Enter" => KeyCode::Enter,
                    "Esc" => KeyCode::Esc,
                    "BS" => KeyCode::Backspace,
                    "Del" => KeyCode::Delete,
                    "lt" => KeyCode::Char('<'),
                    _ => return Err(format!("Unknown key name: <{name}>")),
                };
                events.push(KeyEvent::key(code));
                rest = &rest[end + 1..];
                continue;
            }
        }
        events.push(KeyEvent::char(c));
        rest = &rest[c.len_utf8()..];
    }
    Ok(events)
}

fn read_document(config: &Config) -> gmir::Result<Document> {
    match &config.file {
        Some(path) => Document::parse(File::open(path)?),
        None => Document::parse(io::stdin().lock()),
    }
}

/// Reflow the whole document (or its headings) to stdout.
fn dump(document: Document, config: &Config) -> Result<(), String> {
    let (document, space) = if config.toc {
        let headings = document
            .heading_projection()
            .ok_or_else(|| "Document has no headings.".to_string())?;
        (headings, SelectorSpace::Headings)
    } else {
        (document, SelectorSpace::Links)
    };
    let options = config.options();
    let width = usize::from(config.width.unwrap_or(DEFAULT_WIDTH));
    let selectable = match space {
        SelectorSpace::Links => document.link_indices().len(),
        SelectorSpace::Headings => document.heading_indices().len(),
    };
    let layout = Layout::new(width, selectable, options.max_text_width);
    let mut view = ViewState::new(document, layout.text_width)
        .with_selector_space(space)
        .with_show_urls(options.show_urls);
    if let Some(pattern) = &config.search {
        view.set_pattern(pattern).map_err(|e| e.to_string())?;
    }

    let mut out = AnsiWriter::with_styles(io::stdout().lock(), !config.plain);
    for row in view.visible_rows(layout.text_width, usize::MAX) {
        out.write_row(&row, &layout, &options.theme);
    }
    out.finish().map(drop).map_err(|e| e.to_string())
}

/// Replay `--keys` and paint one screen to stdout.
fn paint(document: Document, config: &Config) -> Result<(), String> {
    let width = usize::from(config.width.unwrap_or(DEFAULT_WIDTH));
    let height = usize::from(config.height.unwrap_or(DEFAULT_HEIGHT));
    let mut reader = Reader::new(document, width, height, config.options());

    let mut keys = Vec::new();
    if config.toc {
        keys.push(KeyEvent::char('t'));
    }
    if let Some(pattern) = &config.search {
        keys.push(KeyEvent::char('/'));
        keys.extend(pattern.chars().map(KeyEvent::char));
        keys.push(KeyEvent::key(KeyCode::Enter));
    }
    keys.extend(parse_keys(config.keys.as_deref().unwrap_or_default())?);

    for key in keys {
        match reader.handle_event(&Event::Key(key)) {
            Action::Continue => {}
            Action::Quit => return Ok(()),
            Action::FollowLink(url) => {
                println!("{url}");
                return Ok(());
            }
        }
    }

    let mut out = AnsiWriter::with_styles(io::stdout().lock(), !config.plain);
    reader.render(&mut out).map_err(|e| e.to_string())?;
    out.finish().map(drop).map_err(|e| e.to_string())
}

fn run(config: &Config) -> Result<(), String> {
    let document = read_document(config).map_err(|e| format!("Could not parse input: {e}"))?;
    if config.height.is_some() || config.keys.is_some() {
        paint(document, config)
    } else {
        dump(document, config)
    }
}

fn main() {
    let config = match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => config,
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            return;
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    };

    if config.verbose {
        set_log_callback(|level, message| eprintln!("[{}] {message}", level.as_str()));
    }

    if let Err(msg) = run(&config) {
        eprintln!("Error: {msg}");
        std::process::exit(1);
    }
}
