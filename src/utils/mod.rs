//! Small shared helpers.

/// Return "s" suffix for plural counts
///
/// # Examples
///
/// - `plural_s(0)` -> `"s"` (0 files)
/// - `plural_s(1)` -> `""` (1 file)
/// - `plural_s(5)` -> `"s"` (5 files)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Strip surrounding quotes from pasted paths.
///
/// Windows "copy as path" and shell drag-and-drop wrap paths in `"` or `'`.
#[inline]
pub fn strip_quotes(input: &str) -> &str {
    input
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_s() {
        assert_eq!(plural_s(0), "s");
        assert_eq!(plural_s(1), "");
        assert_eq!(plural_s(5), "s");
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("  \"C:\\tiles\\a.png\"  "), "C:\\tiles\\a.png");
        assert_eq!(strip_quotes("'/home/me/tiles'"), "/home/me/tiles");
        assert_eq!(strip_quotes("plain"), "plain");
        assert_eq!(strip_quotes(""), "");
    }
}
