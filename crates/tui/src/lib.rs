//! Ratatui widgets for a remote search picker form.
//!
//! The widgets are stateless renderers over borrowed views; the host owns the
//! picker state and hands plain data to each `render_*` function. The one
//! stateful piece is [`SearchInput`], the editor behind the text field.

pub mod components;
pub mod input;
pub mod theme;

pub use components::{MenuView, PromptView, SelectView, Tone};
pub use input::SearchInput;
pub use theme::{Theme, default_theme};
