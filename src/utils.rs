// Utility functions
use chrono::{DateTime, Utc};

/// Parses a number the forgiving way: surrounding whitespace is ignored and
/// trailing garbage after a numeric prefix is dropped ("12.5%" -> 12.5).
pub fn parse_lenient_f64(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return v.is_finite().then_some(v);
    }
    let end = text
        .char_indices()
        .take_while(|(i, c)| c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+')))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Converts a unix timestamp in seconds to `DateTime<Utc>`. Zero means "unknown".
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let secs = text.trim().parse::<i64>().ok().filter(|s| *s > 0)?;
    DateTime::from_timestamp(secs, 0)
}

/// Formats a dollar amount with two decimals.
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Extracts the first `#rrggbb` color of a CSS gradient.
pub fn lead_hex_color(css: &str) -> Option<(u8, u8, u8)> {
    let start = css.find('#')? + 1;
    let hex = css.get(start..start + 6)?;
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parse_accepts_prefixes() {
        assert_eq!(parse_lenient_f64("50"), Some(50.0));
        assert_eq!(parse_lenient_f64(" 12.5% "), Some(12.5));
        assert_eq!(parse_lenient_f64("abc"), None);
        assert_eq!(parse_lenient_f64(""), None);
        assert_eq!(parse_lenient_f64("NaN"), None);
    }

    #[test]
    fn timestamps() {
        assert!(parse_timestamp("0").is_none());
        assert_eq!(parse_timestamp("86400").map(|d| d.to_rfc3339()).as_deref(), Some("1970-01-02T00:00:00+00:00"));
    }

    #[test]
    fn gradient_lead_color() {
        assert_eq!(lead_hex_color("linear-gradient(135deg, #ff6b6b, #4ecdc4)"), Some((0xff, 0x6b, 0x6b)));
        assert_eq!(lead_hex_color("none"), None);
    }

    #[test]
    fn usd() {
        assert_eq!(format_usd(9.5), "$9.50");
    }
}
