//! Top-level screens of the console and the dispatch from key to view.

pub mod registry;
pub mod view_key;

pub use registry::{render_view, ViewRenderer};
pub use view_key::ViewKey;
