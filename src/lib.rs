//! markpad - an embeddable rich markdown editing widget for egui
//!
//! The widget pairs an editing surface with a live rendered preview and a
//! formatting toolbar, and binds to its host through three shared state
//! cells: a default value, a committed value and a theme selector. Edits
//! land in an internal draft immediately; the committed value follows after
//! a debounce window so the host is not written on every keystroke.
//!
//! # Usage
//!
//! ```ignore
//! use markpad::{EditorOptions, HostBindings, MarkdownPad};
//!
//! let bindings = HostBindings::with_values(None, Some("# Hello".to_string()));
//! let mut pad = MarkdownPad::new(bindings.clone(), EditorOptions::default());
//!
//! // each frame:
//! pad.show(ui);
//!
//! // the host reads the committed value whenever it likes:
//! let committed = bindings.value.get();
//! ```
//!
//! Beyond standard markdown the toolbar carries an underline command that
//! wraps the selection in single underscores; the preview renders
//! underscore emphasis underlined and asterisk emphasis italic, so the two
//! spellings stay distinguishable.

pub mod commands;
pub mod draft;
pub mod error;
pub mod format;
pub mod fullscreen;
pub mod host;
pub mod markdown;
pub mod options;
pub mod preview;
pub mod publish;
pub mod text;
pub mod theme;
pub mod underline;
pub mod widget;

pub use commands::{CommandDescriptor, EditorCommand};
pub use error::{Error, Result};
pub use host::{HostBindings, ReadPort, SharedCell, WritePort};
pub use options::{EditorOptions, Theme};
pub use widget::{MarkdownPad, PaneMode};
