//! Line classification for gemtext.

use crate::event::{LogLevel, emit_log};
use crate::gemtext::line::{HeadingLevel, Line};
use crate::unicode::normalize_nfc;
use regex::Regex;
use std::io::Read;
use std::sync::OnceLock;

/// Marker that opens and closes a preformatted block.
pub const PREFORMAT_TOGGLE: &str = "```";

/// Tabs are expanded to this many spaces; terminals disagree on tab stops.
const TAB_SPACES: &str = "    ";

// `\s` in gemtext means ASCII whitespace only.
const WS: &str = r"[\t\n\x0C\r ]";
const NON_WS: &str = r"[^\t\n\x0C\r ]";

struct Patterns {
    link: Regex,
    heading1: Regex,
    heading2: Regex,
    heading3: Regex,
    list: Regex,
    quote: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |src: String| match Regex::new(&src) {
            Ok(re) => re,
            Err(e) => panic!("built-in gemtext pattern {src:?} is invalid: {e}"),
        };
        Patterns {
            link: compile(format!(r"^=>{WS}+({NON_WS}+){WS}+(.+){WS}*$")),
            heading1: compile(format!(r"^#{WS}*(.+){WS}*$")),
            heading2: compile(format!(r"^##{WS}*(.+){WS}*$")),
            heading3: compile(format!(r"^###{WS}*(.+){WS}*$")),
            list: compile(format!(r"^\*{WS}+(.+){WS}*$")),
            quote: compile(format!(r"^>{WS}*(.+){WS}*$")),
        }
    })
}

/// Parse gemtext from a reader.
///
/// The whole stream is read, normalized to NFC and split into lines.
/// Invalid UTF-8 is replaced with U+FFFD. The result may be empty; see
/// [`Document::parse`](crate::Document::parse) for the checked variant.
pub fn parse<R: Read>(mut input: R) -> std::io::Result<Vec<Line>> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    let text = normalize_nfc(&String::from_utf8_lossy(&bytes));
    let lines = parse_str(&text);
    emit_log(
        LogLevel::Debug,
        &format!("parsed {} gemtext lines from {} bytes", lines.len(), bytes.len()),
    );
    Ok(lines)
}

/// Classify already-normalized gemtext.
#[must_use]
pub fn parse_str(text: &str) -> Vec<Line> {
    let mut preformatted = false;
    let mut out = Vec::new();
    for raw in text.lines() {
        let line = raw.replace('\t', TAB_SPACES);
        if line.starts_with(PREFORMAT_TOGGLE) {
            preformatted = !preformatted;
            continue;
        }
        if preformatted {
            out.push(Line::Preformatted(line));
            continue;
        }
        out.push(classify(&line));
    }
    out
}

fn classify(line: &str) -> Line {
    let p = patterns();
    if let Some(caps) = p.link.captures(line) {
        return Line::Link {
            url: caps[1].to_owned(),
            label: caps[2].to_owned(),
        };
    }
    // Most specific first: `###` also matches the `#` pattern.
    for (re, level) in [
        (&p.heading3, HeadingLevel::Three),
        (&p.heading2, HeadingLevel::Two),
        (&p.heading1, HeadingLevel::One),
    ] {
        if let Some(caps) = re.captures(line) {
            return Line::Heading {
                level,
                text: caps[1].to_owned(),
            };
        }
    }
    if let Some(caps) = p.list.captures(line) {
        return Line::List(caps[1].to_owned());
    }
    if let Some(caps) = p.quote.captures(line) {
        return Line::Quote(caps[1].to_owned());
    }
    Line::Text(line.trim().to_owned())
}
