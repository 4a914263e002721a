pub mod details;
pub mod form;
pub mod list;
pub mod versions;
