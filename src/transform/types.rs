//! Options controlling a flip

use serde::{Deserialize, Serialize};

/// Options for [`crate::transform`].
///
/// Both switches are off by default. They are independent of each other and
/// fixed for the duration of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransformOptions {
    /// Swap `ltr` and `rtl` inside `url()` values
    pub transform_dir_in_url: bool,
    /// Swap `left` and `right` inside `url()` values
    pub transform_edge_in_url: bool,
}

impl TransformOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir_in_url(mut self, enabled: bool) -> Self {
        self.transform_dir_in_url = enabled;
        self
    }

    pub fn with_edge_in_url(mut self, enabled: bool) -> Self {
        self.transform_edge_in_url = enabled;
        self
    }
}

/// A bare flag means `transform_dir_in_url`, as in the older two-flag API.
impl From<bool> for TransformOptions {
    fn from(transform_dir_in_url: bool) -> Self {
        Self { transform_dir_in_url, ..Self::default() }
    }
}
