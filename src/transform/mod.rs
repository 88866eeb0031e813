//! LTR <-> RTL stylesheet flipping
//!
//! [`transform`] runs the whole pipeline: protect `@noflip` regions and
//! comments behind placeholder tokens, run the rewrite stages in order, then
//! restore the protected text.
//!
//! # Module Structure
//!
//! - [`types`] - Options for a flip
//! - [`stages`] - The ordered rewrite stages
//! - [`flip`] - Value-level flips (signs, corners, percentages)

pub mod flip;
pub mod stages;
pub mod types;

use tracing::{debug, trace};

use crate::error::JanusError;
use crate::patterns::{patterns, TOKEN_COMMENT};
use crate::tokenizer::{Tokenizer, TOKEN_NOFLIP_CLASS, TOKEN_NOFLIP_SINGLE};

pub use flip::{complement_percentage, flip_border_radius_values, flip_sign};
pub use types::TransformOptions;

/// Result type alias for flip operations.
pub type Result<T> = std::result::Result<T, JanusError>;

/// Flip a stylesheet from LTR to RTL (or back).
///
/// Selectors, comments and anything annotated with `/* @noflip */` come out
/// unchanged. Backticks in the input are percent-encoded to `%60`, since the
/// placeholder tokens are built from them.
///
/// # Example
///
/// ```
/// use cssjanus::{transform, TransformOptions};
///
/// let css = "p { float: left; padding: 1px 2px 3px 4px; }";
/// let flipped = transform(css, &TransformOptions::default()).unwrap();
/// assert_eq!(flipped, "p { float: right; padding: 1px 4px 3px 2px; }");
/// ```
pub fn transform(css: &str, options: &TransformOptions) -> Result<String> {
    let p = patterns();
    debug!(
        bytes = css.len(),
        dir_in_url = options.transform_dir_in_url,
        edge_in_url = options.transform_edge_in_url,
        "flipping stylesheet"
    );

    let css = css.replace('`', "%60");

    let mut noflip_single = Tokenizer::new(&p.noflip_single, TOKEN_NOFLIP_SINGLE);
    let css = noflip_single.tokenize(&css)?;

    let mut noflip_class = Tokenizer::new(&p.noflip_class, TOKEN_NOFLIP_CLASS);
    let css = noflip_class.tokenize(&css)?;

    let mut comments = Tokenizer::new(&p.comment, TOKEN_COMMENT);
    let mut css = comments.tokenize(&css)?;

    debug!(
        noflip_single = noflip_single.len(),
        noflip_class = noflip_class.len(),
        comments = comments.len(),
        "protected regions"
    );

    for (name, stage) in stages::pipeline(options) {
        let next = stage(p, &css)?;
        if next != css {
            trace!(stage = name, "stage rewrote stylesheet");
        }
        css = next;
    }

    let css = comments.detokenize(&css)?;
    let css = noflip_class.detokenize(&css)?;
    noflip_single.detokenize(&css)
}

/// Flip using the older flag-style arguments.
///
/// Equivalent to calling [`transform`] with both options set from the flags.
pub fn transform_with_flags(css: &str, dir_in_url: bool, edge_in_url: bool) -> Result<String> {
    let options = TransformOptions::from(dir_in_url).with_edge_in_url(edge_in_url);
    transform(css, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip(css: &str) -> String {
        transform(css, &TransformOptions::default()).unwrap()
    }

    #[test]
    fn test_direction() {
        assert_eq!(flip("direction: ltr;"), "direction: rtl;");
    }

    #[test]
    fn test_four_part() {
        assert_eq!(flip("padding: 1px 2px 3px 4px;"), "padding: 1px 4px 3px 2px;");
    }

    #[test]
    fn test_border_radius() {
        assert_eq!(flip("border-radius: 1px 2px 3px 4px;"), "border-radius: 2px 1px 4px 3px;");
    }

    #[test]
    fn test_background_position() {
        assert_eq!(flip("background-position: 30% 50%;"), "background-position: 70% 50%;");
    }

    #[test]
    fn test_dir_in_url_is_opt_in() {
        let css = "background: url(ltr.png);";
        assert_eq!(flip(css), css);
        let flipped = transform(css, &TransformOptions::from(true)).unwrap();
        assert_eq!(flipped, "background: url(rtl.png);");
    }

    #[test]
    fn test_box_shadow() {
        assert_eq!(flip("box-shadow: 1px 2px 3px red;"), "box-shadow: -1px 2px 3px red;");
    }

    #[test]
    fn test_comments_untouched() {
        let css = "/* float: left; padding: 1px 2px 3px 4px; */ p { float: left; }";
        assert_eq!(flip(css), "/* float: left; padding: 1px 2px 3px 4px; */ p { float: right; }");
    }

    #[test]
    fn test_noflip_single() {
        let css = "p { /* @noflip */ float: left; margin-left: 1px; }";
        assert_eq!(flip(css), "p { /* @noflip */ float: left; margin-right: 1px; }");
    }

    #[test]
    fn test_noflip_class() {
        let css = "/* @noflip */ .a { float: left; } .b { float: left; }";
        assert_eq!(flip(css), "/* @noflip */ .a { float: left; } .b { float: right; }");
    }

    #[test]
    fn test_backtick_is_escaped() {
        assert_eq!(flip("content: '`';"), "content: '%60';");
    }

    #[test]
    fn test_flags_match_options() {
        let css = ".a { background: url(left-ltr.png) left; }";
        assert_eq!(
            transform_with_flags(css, true, true).unwrap(),
            transform(css, &TransformOptions::new().with_dir_in_url(true).with_edge_in_url(true))
                .unwrap()
        );
        assert_eq!(
            transform_with_flags(css, true, true).unwrap(),
            ".a { background: url(right-rtl.png) right; }"
        );
    }

    #[test]
    fn test_no_negative_zero() {
        assert_eq!(flip("box-shadow: 0 0 2px red;"), "box-shadow: 0 0 2px red;");
        assert_eq!(
            flip("transform: translate(0, 10px);"),
            "transform: translate(0, 10px);"
        );
    }
}
