//! Small helpers shared by grids, layouts and backends.

/// The default point size for labels.
pub const DEFAULT_TEXT_SIZE: f64 = 8.0;

/// Spreadsheet-style column letters: 1 is `A`, 26 is `Z`, 27 is `AA`.
///
/// `n` must be at least 1; zero gives an empty string.
pub fn column_letters(mut n: u32) -> String {
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Format a number for output without a trailing `.0` or float noise.
pub fn fmt_number(x: f64) -> String {
    let rounded = (x * 1e4).round() / 1e4;
    if rounded == rounded.trunc() {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(52), "AZ");
        assert_eq!(column_letters(703), "AAA");
        assert_eq!(column_letters(0), "");
    }

    #[test]
    fn numbers() {
        assert_eq!(fmt_number(3.0), "3");
        assert_eq!(fmt_number(-2.5), "-2.5");
        assert_eq!(fmt_number(0.1 + 0.2), "0.3");
    }
}
