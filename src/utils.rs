use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to at most `max_width` terminal columns, ending in "..." when cut.
/// Works on display width so Cyrillic and emoji never split mid-character.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

/// Numbered option text matching the `1`-`9` shortcut keys.
pub fn option_label(index: usize, text: &str) -> String {
    format!("{}. {}", index + 1, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_no_truncation() {
        assert_eq!(truncate_string("Short string", 20), "Short string");
    }

    #[test]
    fn test_truncate_string_with_truncation() {
        let result = truncate_string("This is a very long string that should be truncated", 20);
        assert_eq!(result, "This is a very lo...");
        assert!(result.width() <= 20);
    }

    #[test]
    fn test_truncate_string_exact_length() {
        assert_eq!(truncate_string("Exactly twenty!!", 16), "Exactly twenty!!");
    }

    #[test]
    fn test_truncate_string_empty() {
        assert_eq!(truncate_string("", 10), "");
    }

    #[test]
    fn test_truncate_string_cyrillic() {
        let result = truncate_string("Где се најчешће изводе експерименти?", 12);
        assert_eq!(result, "Где се на...");
        assert!(result.width() <= 12);
    }

    #[test]
    fn test_truncate_string_wide_chars() {
        // Each emoji is two columns wide.
        let result = truncate_string("🧪🔬🧫⚗", 6);
        assert!(result.width() <= 6);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_truncate_string_tiny_width() {
        assert_eq!(truncate_string("abcdef", 2), "..");
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label(0, "У природи"), "1. У природи");
        assert_eq!(option_label(3, "d"), "4. d");
    }
}
