pub mod binding_form;
pub mod form;
pub mod list;
