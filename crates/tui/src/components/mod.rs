//! Building blocks for the picker form.

pub mod footer;
/// Query matches inside menu rows.
pub mod highlight;
/// The dropdown list of results.
pub mod menu;
/// Text field with a loading spinner.
pub mod prompt;
/// Dependent select line.
pub mod select;
pub mod status;

pub use footer::render_footer;
pub use highlight::{find_ignore_case, highlight_spans};
pub use menu::{MenuView, render_menu};
pub use prompt::{PromptView, render_prompt};
pub use select::{SelectView, render_select};
pub use status::{Tone, render_status};
