//! `gmir` - gemtext reader core
//!
//! Parses gemtext documents into typed lines, reflows them to a target
//! width with marker-aware indentation, and keeps the scroll, search and
//! selector state of a terminal reader. Terminal I/O is left to the host:
//! the library consumes decoded [`Event`]s and produces rows and a status
//! bar, optionally written as ANSI text through [`AnsiWriter`].
//!
//! ```
//! use gmir::{Document, ViewState};
//!
//! let doc = Document::parse("# Hi\n=> /next.gmi Next page\n".as_bytes()).unwrap();
//! let view = ViewState::new(doc, 40);
//! let rows = view.visible_rows(40, 10);
//! assert_eq!(rows[1].text, "=> Next page (/next.gmi)");
//! assert_eq!(rows[1].selector.as_deref(), Some("1"));
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)] // Allow view::ViewState etc
#![allow(clippy::missing_panics_doc)] // Panics are documented where reachable
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::cast_possible_truncation)] // Digit and color codes fit in u8
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::option_if_let_else)] // match reads better for selector resolution

pub mod ansi;
pub mod document;
pub mod error;
pub mod event;
pub mod gemtext;
pub mod input;
pub mod line_edit;
pub mod selector;
pub mod session;
pub mod style;
pub mod unicode;
pub mod view;
pub mod wrap;

// Re-export core types at crate root
pub use document::{Document, load_document};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use gemtext::{HeadingLevel, Line};
pub use style::{Style, StyleTag, TextAttributes, Theme};
pub use wrap::{WrapResult, wrap};

// Re-export view and session types
pub use session::{Action, Reader, ReaderOptions};
pub use view::{Direction, Layout, Mode, ResolvedTarget, Row, SelectorSpace, StatusBar, ViewState};

// Re-export input and output types
pub use ansi::AnsiWriter;
pub use input::{Event, KeyCode, KeyEvent, KeyModifiers, ResizeEvent};
pub use line_edit::{EditStatus, LineEditor};
