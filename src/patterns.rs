//! Pattern library for the flip pipeline
//!
//! Every stage pattern is assembled from a small set of CSS grammar fragments
//! (identifiers, quantities, colors, URL characters) so the grammar is written
//! once. The catalogue is compiled on first use and shared read-only by every
//! call afterwards, including calls running on other threads.
//!
//! Unbounded repetitions that scan URL-like text use atomic groups so that a
//! failed lookahead cannot backtrack through every split of a long value.

use fancy_regex::{Captures, Regex, RegexBuilder};
use once_cell::sync::Lazy;

use crate::error::JanusError;

/// Placeholder substituted for comments while the stages run.
pub const TOKEN_COMMENT: &str = "`COMMENT`";

// =============================================================================
// Grammar fragments
// =============================================================================

const NON_ASCII: &str = r"[^\x00-\x7F]";
const UNICODE: &str = r"(?:(?:\\[0-9a-f]{1,6})(?:\r\n|[\t\n\x0B\x0C\r ])?)";
const NUM: &str = r"(?:[0-9]*\.[0-9]+|[0-9]+)";
const UNIT: &str = r"(?:em|ex|px|cm|mm|in|pt|pc|deg|rad|grad|ms|s|hz|khz|%)";
const DIRECTION: &str = r"direction[\t\n\x0B\x0C\r ]*:[\t\n\x0B\x0C\r ]*";
const URL_SPECIAL_CHARS: &str = r"[!#$%&*-~]";
const VALID_AFTER_URI_CHARS: &str = r#"['"]?[\t\n\x0B\x0C\r ]*"#;
const LOOKAHEAD_NOT_LETTER: &str = r"(?![a-zA-Z])";
const LOOKBEHIND_NOT_LETTER: &str = r"(?<![a-zA-Z])";
const CHARS_WITHIN_SELECTOR: &str = r"[^}]*?";
const NOFLIP_ANNOTATION: &str = r"/\*!?[\t\n\x0B\x0C\r ]*@noflip[\t\n\x0B\x0C\r ]*\*/";
const COMMENT: &str = r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/";
const MATH_OPERATOR: &str = r"(?:\+|-|\*|/)";
const CALC_ALLOWED_CHARS: &str = r"(?:\(|\)|\t| )";
const SUFFIX: &str = r"([\t\n\x0B\x0C\r ]*(?:!important[\t\n\x0B\x0C\r ]*)?[;}])";
/// CSS whitespace. `\s` would also match Unicode spaces such as U+00A0.
const WS: &str = r"[\t\n\x0B\x0C\r ]";

fn escape() -> String {
    format!(r"(?:{UNICODE}|\\[^\r\n\f0-9a-f])")
}

fn nmstart() -> String {
    format!(r"(?:[_a-z]|{NON_ASCII}|{})", escape())
}

fn nmchar() -> String {
    format!(r"(?:[_a-z0-9-]|{NON_ASCII}|{})", escape())
}

fn ident() -> String {
    format!("-?{}{}*", nmstart(), nmchar())
}

fn quantity() -> String {
    format!(r"{NUM}(?:{WS}*{UNIT}|{})?", ident())
}

/// One capture group: a signed quantity or the `inherit`/`auto` keywords.
fn possibly_negative_quantity() -> String {
    format!("((?:-?{})|(?:inherit|auto))", quantity())
}

fn possibly_negative_simple_quantity() -> String {
    format!(r"(?:-?{NUM}(?:{WS}*{UNIT})?)")
}

fn calc() -> String {
    let equation = format!(
        "(?:{CALC_ALLOWED_CHARS}|{}|{MATH_OPERATOR}){{3,}}",
        possibly_negative_simple_quantity()
    );
    format!(r"(?:calc\((?:{equation})\))")
}

/// One capture group: like [`possibly_negative_quantity`] but also accepts `calc()`.
fn possibly_negative_quantity_calc() -> String {
    format!("((?:-?{})|(?:inherit|auto)|{})", quantity(), calc())
}

/// One capture group: a hex/named color or an `rgb[a]()`/`hsl[a]()` call.
fn color() -> String {
    format!(r"(#?{}+|(?:rgba?|hsla?)\([ 0-9.,%-]+\))", nmchar())
}

fn url_chars() -> String {
    format!("(?>(?:{URL_SPECIAL_CHARS}|{NON_ASCII}|{})*)", escape())
}

fn lookahead_not_open_brace() -> String {
    format!(
        r#"(?!(?>(?:{}|\r?\n|{WS}|#|:|\.|,|\+|>|~|\(|\)|\[|\]|=|\*=|~=|\^=|'[^']*'|"[^"]*"|{TOKEN_COMMENT})*)\{{)"#,
        nmchar()
    )
}

fn lookahead_not_closing_paren() -> String {
    format!(r"(?!{}{VALID_AFTER_URI_CHARS}\))", url_chars())
}

fn lookahead_for_closing_paren() -> String {
    format!(r"(?={}{VALID_AFTER_URI_CHARS}\))", url_chars())
}

/// A whole word (not touching other letters) that is not inside a URL and
/// not part of a selector.
fn free_word(word: &str) -> String {
    format!(
        "(?i){LOOKBEHIND_NOT_LETTER}({word}){LOOKAHEAD_NOT_LETTER}{}{}",
        lookahead_not_closing_paren(),
        lookahead_not_open_brace()
    )
}

/// A word sitting right before the closing parenthesis of a URL.
fn word_in_url(word: &str) -> String {
    format!("(?i){LOOKBEHIND_NOT_LETTER}({word}){}", lookahead_for_closing_paren())
}

// =============================================================================
// Compiled catalogue
// =============================================================================

/// Backtracking budget for one search.
///
/// The engine counts backtracks over a whole unanchored scan rather than per
/// start position, so the budget has to grow with the stylesheet. Each byte
/// costs the lookaround-heavy `left`/`right` patterns a couple of backtracks.
pub const BACKTRACK_LIMIT: usize = 1_000_000_000;

fn compile(pattern: &str) -> Result<Regex, fancy_regex::Error> {
    RegexBuilder::new(pattern).backtrack_limit(BACKTRACK_LIMIT).build()
}

/// Compiled stage patterns.
///
/// Capture group layouts are part of each pattern's contract with the stage
/// that uses it; they are noted on the fields where a stage relies on them.
#[derive(Debug)]
pub struct Patterns {
    pub noflip_single: Regex,
    pub noflip_class: Regex,
    pub comment: Regex,
    /// `(prefix)ltr`
    pub direction_ltr: Regex,
    /// `(prefix)rtl`
    pub direction_rtl: Regex,
    pub left: Regex,
    pub right: Regex,
    pub left_in_url: Regex,
    pub right_in_url: Regex,
    /// `(:dir\( *)ltr( *\))`
    pub ltr_dir_selector: Regex,
    /// `(:dir\( *)rtl( *\))`
    pub rtl_dir_selector: Regex,
    pub ltr_in_url: Regex,
    pub rtl_in_url: Regex,
    /// `([ns]?)e-resize`
    pub cursor_east: Regex,
    /// `([ns]?)w-resize`
    pub cursor_west: Regex,
    /// prefix, v1, ws, v2, ws, v3, ws, v4, suffix
    pub four_notation_quantity: Regex,
    /// prefix, c1, ws, c2, ws, c3, ws, c4, suffix
    pub four_notation_color: Regex,
    /// prefix, four horizontal radii, four vertical radii, suffix
    pub border_radius: Regex,
    /// prefix, offset
    pub box_shadow: Regex,
    /// prefix, quantity, ws, color
    pub text_shadow1: Regex,
    /// prefix, color, ws, quantity
    pub text_shadow2: Regex,
    /// prefix, quantity
    pub text_shadow3: Regex,
    /// prefix, first quantity
    pub bg_horizontal_percentage: Regex,
    /// prefix, percentage
    pub bg_horizontal_percentage_x: Regex,
    /// prefix, `translateX(`, x, `)`
    pub translate_x: Regex,
    /// prefix, `translate(`, x, rest of the argument list
    pub translate: Regex,
}

impl Patterns {
    /// Compile the whole catalogue.
    pub fn build() -> Result<Self, fancy_regex::Error> {
        let pnq = possibly_negative_quantity();
        let pnqc = possibly_negative_quantity_calc();
        let color = color();

        let four_notation_quantity = format!(
            r"(?i)((?:margin|padding|border-width){WS}*:{WS}*){pnqc}({WS}+){pnqc}({WS}+){pnqc}({WS}+){pnqc}{SUFFIX}"
        );
        let four_notation_color = format!(
            r"(?i)((?:-color|border-style){WS}*:{WS}*){color}({WS}+){color}({WS}+){color}({WS}+){color}{SUFFIX}"
        );
        let border_radius = format!(
            concat!(
                r"(?i)(border-radius{ws}*:{ws}*){pnq}",
                r"(?:(?:{ws}+{pnq})(?:{ws}+{pnq})?(?:{ws}+{pnq})?)?",
                r"(?:(?:(?:{ws}*/{ws}*){pnq})(?:{ws}+{pnq})?(?:{ws}+{pnq})?(?:{ws}+{pnq})?)?",
                "{suffix}"
            ),
            pnq = pnq,
            ws = WS,
            suffix = SUFFIX
        );

        Ok(Self {
            noflip_single: compile(&format!(
                "(?i)({NOFLIP_ANNOTATION}{}[^;}}]+;?)",
                lookahead_not_open_brace()
            ))?,
            noflip_class: compile(&format!(
                r"(?i)({NOFLIP_ANNOTATION}{CHARS_WITHIN_SELECTOR}\}})"
            ))?,
            comment: compile(COMMENT)?,
            direction_ltr: compile(&format!("(?i)({DIRECTION})ltr"))?,
            direction_rtl: compile(&format!("(?i)({DIRECTION})rtl"))?,
            left: compile(&free_word("left"))?,
            right: compile(&free_word("right"))?,
            left_in_url: compile(&word_in_url("left"))?,
            right_in_url: compile(&word_in_url("right"))?,
            ltr_dir_selector: compile(r"(:dir\( *)ltr( *\))")?,
            rtl_dir_selector: compile(r"(:dir\( *)rtl( *\))")?,
            ltr_in_url: compile(&word_in_url("ltr"))?,
            rtl_in_url: compile(&word_in_url("rtl"))?,
            cursor_east: compile(&format!("{LOOKBEHIND_NOT_LETTER}([ns]?)e-resize"))?,
            cursor_west: compile(&format!("{LOOKBEHIND_NOT_LETTER}([ns]?)w-resize"))?,
            four_notation_quantity: compile(&four_notation_quantity)?,
            four_notation_color: compile(&four_notation_color)?,
            border_radius: compile(&border_radius)?,
            box_shadow: compile(&format!(r"(?i)(box-shadow{WS}*:{WS}*(?:inset{WS}*)?){pnq}"))?,
            text_shadow1: compile(&format!(r"(?i)(text-shadow{WS}*:{WS}*){pnq}({WS}*){color}"))?,
            text_shadow2: compile(&format!(r"(?i)(text-shadow{WS}*:{WS}*){color}({WS}*){pnq}"))?,
            text_shadow3: compile(&format!(r"(?i)(text-shadow{WS}*:{WS}*){pnq}"))?,
            bg_horizontal_percentage: compile(&format!(
                r"(?i)(background(?:-position)?{WS}*:{WS}*(?:[^:;}}\t\n\x0B\x0C\r ]+{WS}+)*?)({})",
                quantity()
            ))?,
            bg_horizontal_percentage_x: compile(&format!(
                r"(?i)(background-position-x{WS}*:{WS}*)(-?{NUM}%)"
            ))?,
            translate_x: compile(&format!(
                r"(?i)(transform{WS}*:[^;}}]*)(translateX{WS}*\({WS}*){pnq}({WS}*\))"
            ))?,
            translate: compile(&format!(
                r"(?i)(transform{WS}*:[^;}}]*)(translate{WS}*\({WS}*){pnq}((?:{WS}*,{WS}*{pnq}){{0,2}}{WS}*\))"
            ))?,
        })
    }
}

static PATTERNS: Lazy<Patterns> =
    Lazy::new(|| Patterns::build().expect("built-in flip patterns must compile"));

/// The shared pattern catalogue, compiled on first use.
pub fn patterns() -> &'static Patterns {
    &PATTERNS
}

/// Text of capture group `i`, or `""` when the group did not participate.
pub(crate) fn group<'t>(caps: &Captures<'t>, i: usize) -> &'t str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Replace every non-overlapping match of `re` in `text` with the output of
/// `rep`, leftmost-first.
///
/// Matching errors (the backtracking limit) are propagated instead of
/// panicking.
pub(crate) fn replace_with<F>(re: &Regex, text: &str, mut rep: F) -> Result<String, JanusError>
where
    F: FnMut(&Captures<'_>) -> String,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut replaced = false;

    for caps in re.captures_iter(text) {
        let caps = caps?;
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..whole.start()]);
        out.push_str(&rep(&caps));
        last = whole.end();
        replaced = true;
    }

    if !replaced {
        return Ok(text.to_string());
    }
    out.push_str(&text[last..]);
    Ok(out)
}
