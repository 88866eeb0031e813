//! CSSJanus - Flip stylesheets between left-to-right and right-to-left
//!
//! This library provides functionality to:
//! - Mirror direction-dependent CSS (`float`, `margin-left`, `direction`, ...)
//! - Reorder four-part and `border-radius` shorthands
//! - Negate horizontal offsets in shadows and `translate()`
//! - Complement horizontal background percentages
//! - Leave `/* @noflip */` regions and comments untouched
//!
//! ```
//! use cssjanus::{transform, TransformOptions};
//!
//! let rtl = transform("div { padding-left: 1px; }", &TransformOptions::default()).unwrap();
//! assert_eq!(rtl, "div { padding-right: 1px; }");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod patterns;
pub mod tokenizer;
pub mod transform;

pub use error::JanusError;
pub use transform::{transform, transform_with_flags, TransformOptions};
