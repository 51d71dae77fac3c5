pub mod resolver;
pub mod validator;

pub use resolver::{layout_warning, PathConfig, EXPECTED_LAYOUT, STAGING_PREFIX};
pub use validator::validate_paths;
