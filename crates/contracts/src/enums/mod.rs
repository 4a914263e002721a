pub mod binding_status;
pub mod caliber_category;
pub mod sensitivity;
pub mod version_status;

pub use binding_status::BindingStatus;
pub use caliber_category::CaliberCategory;
pub use sensitivity::Sensitivity;
pub use version_status::VersionStatus;
