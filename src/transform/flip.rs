//! Value-level flips: signs, border-radius corners and percentages
//!
//! All of these work on the matched text rather than on parsed numbers so
//! that units, spacing and the author's numeral formatting survive.

/// Flip the sign of a CSS value that may carry a unit.
///
/// Values whose leading number is zero are returned unchanged so that no
/// `-0` is ever produced. This also leaves keywords (`auto`, `inherit`,
/// color names) alone, since they have no leading number.
///
/// # Examples
///
/// ```
/// use cssjanus::transform::flip_sign;
///
/// assert_eq!(flip_sign("5px"), "-5px");
/// assert_eq!(flip_sign("-1.5em"), "1.5em");
/// assert_eq!(flip_sign("0"), "0");
/// assert_eq!(flip_sign("auto"), "auto");
/// ```
pub fn flip_sign(value: &str) -> String {
    if leading_number(value) == 0.0 {
        value.to_string()
    } else if let Some(rest) = value.strip_prefix('-') {
        rest.to_string()
    } else {
        format!("-{}", value)
    }
}

/// Reorder the values of one border-radius group (before or after the `/`).
///
/// | values | result       |
/// |--------|--------------|
/// | 1      | unchanged    |
/// | 2      | `b a`        |
/// | 3      | `b a b c`    |
/// | 4      | `b a d c`    |
///
/// Values are joined with single spaces.
///
/// # Examples
///
/// ```
/// use cssjanus::transform::flip_border_radius_values;
///
/// assert_eq!(flip_border_radius_values(&["1px", "2px", "3px"]), "2px 1px 2px 3px");
/// ```
pub fn flip_border_radius_values(values: &[&str]) -> String {
    match *values {
        [a, b, c, d] => [b, a, d, c].join(" "),
        [a, b, c] => [b, a, b, c].join(" "),
        [a, b] => [b, a].join(" "),
        _ => values.join(" "),
    }
}

/// Complement a horizontal background percentage: `x%` becomes `(100 - x)%`.
///
/// Values with a decimal point keep their number of fractional digits;
/// integer percentages stay integers. Anything that is not a percentage is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use cssjanus::transform::complement_percentage;
///
/// assert_eq!(complement_percentage("30%"), "70%");
/// assert_eq!(complement_percentage("10.25%"), "89.75%");
/// assert_eq!(complement_percentage("10px"), "10px");
/// ```
pub fn complement_percentage(value: &str) -> String {
    if !value.ends_with('%') {
        return value.to_string();
    }

    let complement = 100.0 - leading_number(value);
    match value.find('.') {
        Some(idx) => {
            // Digits after the point, not counting the trailing '%'
            let decimals = value.len() - idx - 2;
            format!("{:.*}%", decimals, complement)
        }
        None => format!("{}%", complement),
    }
}

/// Numeric value of the longest leading number in `value`, or 0 when the
/// text does not start with one.
fn leading_number(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    // Optional exponent, only when followed by digits
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'-' | b'+') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].trim_end_matches('.').parse().unwrap_or(0.0)
}
