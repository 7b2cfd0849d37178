//! Unicode-safe helpers for working with UTF-8 strings.

use unicode_width::UnicodeWidthChar;

/// Cut `s` so it fits in `max_width` terminal columns, appending `...` when
/// anything was dropped. The ellipsis counts toward the limit.
pub fn truncate_display(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(1)).sum();
    if total <= max_width {
        return s.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(1);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_display("hello", 10), "hello");
        assert_eq!(truncate_display("hello", 5), "hello");
    }

    #[test]
    fn long_text_gets_ellipsis_within_limit() {
        assert_eq!(truncate_display("abcdefghij", 8), "abcde...");
    }

    #[test]
    fn wide_chars_count_double() {
        // each CJK char is two columns wide
        assert_eq!(truncate_display("执行超时了", 7), "执行...");
    }

    #[test]
    fn line_breaks_count_toward_the_limit() {
        let text = "a\n".repeat(50);
        let clipped = truncate_display(&text, 20);
        assert_eq!(clipped.chars().count(), 20);
        assert!(clipped.ends_with("..."));
        assert_eq!(truncate_display("a\nb", 3), "a\nb");
    }

    #[test]
    fn tiny_limit_still_terminates() {
        assert_eq!(truncate_display("abcdef", 2), "...");
    }
}
