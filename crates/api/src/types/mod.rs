mod item;
mod outcome;
mod page;
mod request;

pub use item::{Item, ItemId, OptionEntry};
pub use outcome::PickerOutcome;
pub use page::{SearchPage, is_truthy};
pub use request::SearchRequest;
