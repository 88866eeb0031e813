//! Rewrite stages of the flip pipeline
//!
//! Each stage is a pure `text -> text` function over the tokenized
//! stylesheet. Stages that swap two words first park one side on a temporary
//! token so the second substitution cannot undo the first.

use fancy_regex::Captures;

use super::flip::{complement_percentage, flip_border_radius_values, flip_sign};
use super::types::TransformOptions;
use crate::error::JanusError;
use crate::patterns::{group, replace_with, Patterns};

const TOKEN_TMP: &str = "`TMP`";
const TOKEN_LTR_TMP: &str = "`TMPLTR`";
const TOKEN_RTL_TMP: &str = "`TMPRTL`";

/// Signature shared by every stage.
pub type Stage = fn(&Patterns, &str) -> Result<String, JanusError>;

/// Stages to run for `options`, in order.
///
/// The order matters: the keyword swaps run before the value flips, and the
/// optional URL stages run before the general left/right swap so that words
/// inside URLs are either flipped once or shielded from it.
pub fn pipeline(options: &TransformOptions) -> Vec<(&'static str, Stage)> {
    let mut stages: Vec<(&'static str, Stage)> = vec![("direction", fix_direction as Stage)];
    if options.transform_dir_in_url {
        stages.push(("ltr-rtl-in-url", fix_ltr_rtl_in_url as Stage));
    }
    if options.transform_edge_in_url {
        stages.push(("left-right-in-url", fix_left_right_in_url as Stage));
    }
    stages.extend([
        ("left-right", fix_left_and_right as Stage),
        ("cursor", fix_cursor_properties as Stage),
        ("four-part-notation", fix_four_part_notation as Stage),
        ("border-radius", fix_border_radius as Stage),
        ("shadows", fix_shadows as Stage),
        ("translate", fix_translate as Stage),
        ("background-position", fix_background_position as Stage),
    ]);
    stages
}

/// `direction: ltr` <-> `direction: rtl`.
///
/// Matches anywhere, not only inside `body` rules.
pub fn fix_direction(p: &Patterns, css: &str) -> Result<String, JanusError> {
    let css = replace_with(&p.direction_ltr, css, |caps| format!("{}{TOKEN_TMP}", group(caps, 1)))?;
    let css = replace_with(&p.direction_rtl, &css, |caps| format!("{}ltr", group(caps, 1)))?;
    Ok(css.replace(TOKEN_TMP, "rtl"))
}

/// `ltr` <-> `rtl` inside URLs. Arguments of `:dir()` are parked on their
/// own tokens first so the URL lookahead cannot reach them.
pub fn fix_ltr_rtl_in_url(p: &Patterns, css: &str) -> Result<String, JanusError> {
    let css = replace_with(&p.ltr_dir_selector, css, |caps| {
        format!("{}{TOKEN_LTR_TMP}{}", group(caps, 1), group(caps, 2))
    })?;
    let css = replace_with(&p.rtl_dir_selector, &css, |caps| {
        format!("{}{TOKEN_RTL_TMP}{}", group(caps, 1), group(caps, 2))
    })?;
    let css = replace_with(&p.ltr_in_url, &css, |_| TOKEN_TMP.to_string())?;
    let css = replace_with(&p.rtl_in_url, &css, |_| "ltr".to_string())?;
    Ok(css
        .replace(TOKEN_TMP, "rtl")
        .replace(TOKEN_LTR_TMP, "ltr")
        .replace(TOKEN_RTL_TMP, "rtl"))
}

/// `left` <-> `right` inside URLs.
pub fn fix_left_right_in_url(p: &Patterns, css: &str) -> Result<String, JanusError> {
    let css = replace_with(&p.left_in_url, css, |_| TOKEN_TMP.to_string())?;
    let css = replace_with(&p.right_in_url, &css, |_| "left".to_string())?;
    Ok(css.replace(TOKEN_TMP, "right"))
}

/// `left` <-> `right` in property names and values (`padding-left`,
/// `float: right`, ...), skipping selectors and URLs.
pub fn fix_left_and_right(p: &Patterns, css: &str) -> Result<String, JanusError> {
    let css = replace_with(&p.left, css, |_| TOKEN_TMP.to_string())?;
    let css = replace_with(&p.right, &css, |_| "left".to_string())?;
    Ok(css.replace(TOKEN_TMP, "right"))
}

/// East and west in resize cursors: `ne-resize` <-> `nw-resize`, etc.
pub fn fix_cursor_properties(p: &Patterns, css: &str) -> Result<String, JanusError> {
    let css = replace_with(&p.cursor_east, css, |caps| format!("{}{TOKEN_TMP}", group(caps, 1)))?;
    let css =
        replace_with(&p.cursor_west, &css, |caps| format!("{}e-resize", group(caps, 1)))?;
    Ok(css.replace(TOKEN_TMP, "w-resize"))
}

/// Swap the second and fourth values of four-part shorthands such as
/// `padding: 1px 2px 3px 4px`, keeping the original whitespace runs.
pub fn fix_four_part_notation(p: &Patterns, css: &str) -> Result<String, JanusError> {
    fn swap(caps: &Captures<'_>) -> String {
        let g = |i| group(caps, i);
        [g(1), g(2), g(3), g(8), g(5), g(6), g(7), g(4), g(9)].concat()
    }
    let css = replace_with(&p.four_notation_quantity, css, swap)?;
    replace_with(&p.four_notation_color, &css, swap)
}

/// Swap corners in `border-radius`, independently for the horizontal and
/// vertical radius groups.
pub fn fix_border_radius(p: &Patterns, css: &str) -> Result<String, JanusError> {
    replace_with(&p.border_radius, css, |caps| {
        let present = |range: std::ops::Range<usize>| {
            range.map(|i| group(caps, i)).filter(|v| !v.is_empty()).collect::<Vec<_>>()
        };
        let first = present(2..6);
        let second = present(6..10);

        let values = if second.is_empty() {
            flip_border_radius_values(&first)
        } else {
            format!(
                "{} / {}",
                flip_border_radius_values(&first),
                flip_border_radius_values(&second)
            )
        };
        format!("{}{}{}", group(caps, 1), values, group(caps, 10))
    })
}

/// Negate the horizontal offset of `box-shadow` and `text-shadow`.
///
/// `text-shadow` takes three passes: offset before color, color before
/// offset, then the bare offset. The first two only touch the slot right
/// after a color-or-offset token, which lets the sequence land on the
/// horizontal offset whichever side of the color it sits.
pub fn fix_shadows(p: &Patterns, css: &str) -> Result<String, JanusError> {
    let css = replace_with(&p.box_shadow, css, |caps| {
        format!("{}{}", group(caps, 1), flip_sign(group(caps, 2)))
    })?;
    fn flip_fourth(caps: &Captures<'_>) -> String {
        format!("{}{}{}{}", group(caps, 1), group(caps, 2), group(caps, 3), flip_sign(group(caps, 4)))
    }
    let css = replace_with(&p.text_shadow1, &css, flip_fourth)?;
    let css = replace_with(&p.text_shadow2, &css, flip_fourth)?;
    replace_with(&p.text_shadow3, &css, |caps| {
        format!("{}{}", group(caps, 1), flip_sign(group(caps, 2)))
    })
}

/// Negate the x argument of `translate()` and `translateX()`.
pub fn fix_translate(p: &Patterns, css: &str) -> Result<String, JanusError> {
    fn flip_x(caps: &Captures<'_>) -> String {
        format!("{}{}{}{}", group(caps, 1), group(caps, 2), flip_sign(group(caps, 3)), group(caps, 4))
    }
    let css = replace_with(&p.translate, css, flip_x)?;
    replace_with(&p.translate_x, &css, flip_x)
}

/// Mirror the horizontal percentage of `background`,
/// `background-position` and `background-position-x`.
pub fn fix_background_position(p: &Patterns, css: &str) -> Result<String, JanusError> {
    fn complement(caps: &Captures<'_>) -> String {
        format!("{}{}", group(caps, 1), complement_percentage(group(caps, 2)))
    }
    let css = replace_with(&p.bg_horizontal_percentage, css, complement)?;
    replace_with(&p.bg_horizontal_percentage_x, &css, complement)
}
