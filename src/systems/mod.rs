//! Background machinery shared by pickers and dependent selects.

pub(crate) mod fetch;
pub mod http;
