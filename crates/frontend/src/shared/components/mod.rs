pub mod confirm_dialog;
pub mod form;
pub mod page_header;
pub mod query_status;
pub mod stat_card;
pub mod status_badge;

pub use confirm_dialog::ConfirmDialog;
pub use form::{DateField, SelectField, TextAreaField, TextField};
pub use page_header::PageHeader;
pub use query_status::{EmptyState, ErrorBox, QueryStatus};
pub use stat_card::{StatCard, StatTone};
pub use status_badge::{SensitivityBadge, StatusBadge};
