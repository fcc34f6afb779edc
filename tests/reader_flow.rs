//! End-to-end reading scenarios through the public API.
//!
//! Documents are parsed from bytes or files, reflowed through a view and
//! driven with key events the way a terminal host would.

use gmir::event::{LogLevel, set_log_callback};
use gmir::style::Theme;
use gmir::view::SelectorSpace;
use gmir::{
    Action, AnsiWriter, Document, Event, KeyCode, KeyEvent, Reader, ReaderOptions, ResizeEvent,
    StyleTag, ViewState, load_document,
};
use std::io::Write;
use std::sync::Once;

fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, message| match level {
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
        });
    });
}

const GUIDE: &str = "# Field guide
Birds are easier to spot in the early morning, before the wind picks up.
=> gemini://example.org/birds.gmi Bird list
## Equipment
* Binoculars with a wide field of view
* A notebook
=> /gear.gmi Gear reviews
## Etiquette
> Leave no trace.
```
 ___
(o o)
```
### Sources
=> /refs.gmi References
";

fn guide() -> Document {
    Document::parse(GUIDE.as_bytes()).expect("guide parses")
}

fn plain_reader(width: usize, height: usize) -> Reader {
    let options = ReaderOptions {
        theme: Theme::plain(),
        ..ReaderOptions::default()
    };
    Reader::new(guide(), width, height, options)
}

fn press(reader: &mut Reader, key: impl Into<KeyEvent>) -> Action {
    reader.handle_event(&Event::Key(key.into()))
}

fn type_keys(reader: &mut Reader, keys: &str) {
    for c in keys.chars() {
        assert_eq!(press(reader, c), Action::Continue, "key {c:?}");
    }
}

fn screen(reader: &Reader) -> String {
    let mut out = AnsiWriter::with_styles(Vec::new(), false);
    reader.render(&mut out).expect("render to memory");
    String::from_utf8(out.finish().expect("flush to memory")).expect("utf-8 output")
}

#[test]
fn test_narrow_reflow_scenario() {
    setup_test_logging();
    let document = Document::parse(
        "# Title\nSome very long sentence that must wrap across multiple screen columns for sure.\n=> /x.gmi Link text\n"
            .as_bytes(),
    )
    .unwrap();
    let view = ViewState::new(document, 20);
    let rows = view.visible_rows(20, 100);
    tracing::debug!(rows = rows.len(), "reflowed at width 20");

    let heading: Vec<_> = rows.iter().filter(|r| r.line == 0).collect();
    assert_eq!(heading.len(), 1);
    assert_eq!(heading[0].text, "# Title");
    assert_eq!(heading[0].tag, StyleTag::Heading1);

    let body: Vec<_> = rows.iter().filter(|r| r.line == 1).collect();
    assert!(body.len() >= 2, "long text wraps");
    assert!(body.iter().all(|r| r.indent == 0));
    assert!(body.iter().skip(1).all(|r| r.continuation));
    assert!(body.iter().all(|r| gmir::unicode::display_width(r.text.trim_end()) <= 20));

    let link: Vec<_> = rows.iter().filter(|r| r.line == 2).collect();
    assert_eq!(link[0].selector.as_deref(), Some("1"));
    assert!(link[0].text.starts_with("=> Link"));
    assert!(link.iter().skip(1).all(|r| r.selector.is_none() && r.indent == 3));
}

#[test]
fn test_load_document_from_file() {
    setup_test_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(GUIDE.as_bytes()).unwrap();
    file.flush().unwrap();

    let document = load_document(std::fs::File::open(file.path()).unwrap()).unwrap();
    assert_eq!(document, guide());
    assert_eq!(document.title(), Some("Field guide"));
    assert_eq!(
        document.link_urls(),
        vec!["gemini://example.org/birds.gmi", "/gear.gmi", "/refs.gmi"]
    );
    assert_eq!(document.heading_indices(), vec![0, 3, 7, 11]);
}

#[test]
fn test_empty_file_is_rejected() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let result = load_document(std::fs::File::open(file.path()).unwrap());
    assert!(matches!(result, Err(gmir::Error::EmptyDocument)));
}

#[test]
fn test_link_selection_by_number() {
    setup_test_logging();
    let mut reader = plain_reader(80, 24);
    assert_eq!(press(&mut reader, '2'), Action::FollowLink("/gear.gmi".into()));

    assert_eq!(press(&mut reader, '0'), Action::Continue);
    assert_eq!(reader.main_view().selector(), "0");
    assert_eq!(press(&mut reader, KeyCode::Esc), Action::Continue);
    assert_eq!(reader.main_view().selector(), "");
    assert_eq!(
        press(&mut reader, '1'),
        Action::FollowLink("gemini://example.org/birds.gmi".into())
    );
}

#[test]
fn test_table_of_contents_round_trip() {
    setup_test_logging();
    let mut reader = plain_reader(80, 24);
    press(&mut reader, 't');
    assert!(reader.is_showing_toc());
    assert_eq!(
        reader.active().selector_space(),
        SelectorSpace::Headings
    );
    let rows = reader.visible_rows();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[2].text, "## Etiquette");
    assert_eq!(rows[2].selector.as_deref(), Some("3"));

    assert_eq!(press(&mut reader, '3'), Action::Continue);
    assert!(!reader.is_showing_toc());
    assert_eq!(reader.main_view().line(), 7);

    press(&mut reader, 't');
    press(&mut reader, KeyCode::Esc);
    assert!(!reader.is_showing_toc(), "Esc with no selector leaves the contents");
}

#[test]
fn test_search_walks_matches() {
    setup_test_logging();
    let mut reader = plain_reader(80, 24);
    type_keys(&mut reader, "/gear");
    assert_eq!(reader.status_bar().text.trim_end().split(' ').next(), Some("/gear"));
    press(&mut reader, KeyCode::Enter);
    assert_eq!(reader.main_view().line(), 6);
    assert_eq!(reader.main_view().pattern().map(|re| re.as_str()), Some("gear"));

    press(&mut reader, 'n');
    assert_eq!(reader.main_view().line(), 6);
    assert!(reader.status_bar().text.starts_with("No further match found."));

    press(&mut reader, 'g');
    type_keys(&mut reader, "/");
    press(&mut reader, KeyCode::Enter);
    assert_eq!(reader.main_view().line(), 6, "empty input repeats the last search");
    assert_eq!(reader.search_history(), ["gear"]);

    type_keys(&mut reader, "/[");
    press(&mut reader, KeyCode::Enter);
    assert!(reader.status_bar().text.starts_with("Invalid pattern"));
}

#[test]
fn test_paint_full_screen() {
    setup_test_logging();
    let reader = plain_reader(40, 6);
    let out = screen(&reader);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "  # Field guide");
    assert!(lines[1].starts_with("  Birds are easier"));
    let bar = lines[5];
    assert_eq!(gmir::unicode::display_width(bar), 40);
    assert!(bar.starts_with("Field guide"));
    assert!(bar.ends_with(" 8%"));
}

#[test]
fn test_resize_keeps_position_legal() {
    setup_test_logging();
    let mut reader = plain_reader(30, 10);
    press(&mut reader, KeyCode::Down);
    press(&mut reader, KeyCode::Down);
    assert_eq!(reader.main_view().line(), 1);
    assert!(reader.main_view().line_offset() > 0);

    reader.handle_event(&Event::Resize(ResizeEvent::new(200, 10)));
    assert_eq!(reader.main_view().line(), 1);
    assert_eq!(reader.main_view().line_offset(), 0, "the line fits on one row now");

    reader.handle_event(&Event::Resize(ResizeEvent::new(5, 1)));
    assert!(reader.visible_rows().is_empty());
}

#[test]
fn test_preformatted_shift() {
    setup_test_logging();
    let document = Document::parse("```\n0123456789abcdefghij\n```\n=> /a.gmi A".as_bytes()).unwrap();
    let options = ReaderOptions {
        theme: Theme::plain(),
        ..ReaderOptions::default()
    };
    let mut reader = Reader::new(document, 12, 5, options);
    assert_eq!(reader.layout().text_width, 10);

    press(&mut reader, KeyCode::Right);
    assert_eq!(reader.main_view().col_offset(), 4);
    press(&mut reader, KeyCode::Right);
    press(&mut reader, KeyCode::Right);
    assert_eq!(reader.main_view().col_offset(), 10, "shift stops at the widest line");
    assert_eq!(reader.visible_rows()[0].text, "abcdefghij");

    for _ in 0..3 {
        press(&mut reader, KeyCode::Left);
    }
    assert_eq!(reader.main_view().col_offset(), 0);
    assert_eq!(reader.visible_rows()[0].text, "0123456789abcdefghij");
}
