//! Metric details: basic info, version history, caliber bindings.
//!
//! - view_model.rs: queries, form state and commands
//! - view.rs: page layout and basic info card
//! - versions.rs / bindings.rs: the two table cards

mod bindings;
mod versions;
mod view;
mod view_model;

pub use view::MetricDetails;
pub use view_model::{resolve_current_version, MetricDetailsVm};
