//! Line-oriented text editing engine for virtual keyboard input.
//!
//! The engine owns a mutable line buffer, a cursor that navigates visually
//! through soft-wrapped and variable-width lines, a selection range and a
//! bounded undo/redo history, all driven synchronously through
//! [`Editor::press_key`]. The input device is a virtual keyboard with no
//! key-release events, so modifiers latch: Control, Shift and CapsLock
//! toggle on press and are consumed by the action they modify.
//!
//! Rendering is out of scope: [`Editor::visible_lines`] exposes a list of
//! line-fragment descriptors and a host renderer takes it from there. Two
//! wrap strategies are available at construction ([`WrapMode`]): fixed
//! character-count wrapping, and variable pixel-width layout where CJK and
//! other full-width glyphs occupy two cells and long lines scroll
//! horizontally.
//!
//! ```
//! use linepad::{Editor, EditorConfig};
//!
//! let mut editor = Editor::new(EditorConfig::default());
//! editor.press_key("Shift");
//! editor.press_key("h");
//! editor.press_key("i");
//! editor.press_key("Enter");
//! assert_eq!(editor.text(), "Hi\n");
//! ```

pub mod config;
pub mod editor;

pub use config::{EditorConfig, WrapMode};
pub use editor::{Editor, LineFragment, Position, Range};
