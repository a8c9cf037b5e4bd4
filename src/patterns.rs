use once_cell::sync::Lazy;
use regex::Regex;

/// Regex patterns for account line extraction.
/// These are compiled once and reused throughout the application.
///
/// Every field pattern runs over the remainder of a line (the text left once
/// the credential pair has been cut out), is case-insensitive, and accepts
/// `:` or whitespace between a label and its value.

// Credential pair: email-shaped identity, separator run, secret token.
pub static CREDENTIAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9._-]+)[:|\s]+([^|\s]+)").unwrap()
});

pub static FULL_ACCESS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:FA|Full[ _]?Access)\b[:\s]*\b(yes|no|true|false|1|0)\b").unwrap()
});

pub static SAVE_MODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:STW|Save[ _]?The[ _]?World)\b[:\s]*\b(yes|no|true|false|1|0)\b").unwrap()
});

// Same flags, but only where a `|`-delimited field starts. Tried first so an
// item name such as `STW 1 Pack` cannot shadow the real field.
pub static FULL_ACCESS_FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\|)\s*(?:FA|Full[ _]?Access)\b[:\s]*\b(yes|no|true|false|1|0)\b").unwrap()
});

pub static SAVE_MODE_FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|\|)\s*(?:STW|Save[ _]?The[ _]?World)\b[:\s]*\b(yes|no|true|false|1|0)\b").unwrap()
});

// Grouped form first so "1,500" is not cut short at the separator.
pub static CURRENCY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bV[-_ ]?Bucks(?:\s+Count)?\b[:\s]*(\d{1,3}(?:[,.'_]\d{3})+|\d+)").unwrap()
});

pub static ITEM_BRACKET_COUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Skins|Outfits)\b[:\s]*\[(\d+)\]").unwrap()
});

pub static ITEM_BARE_COUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Skins|Outfits)\b[:\s]*(\d+)").unwrap()
});

// `Skins: [3]: Renegade, Wukong` and `Skins: []`.
pub static ITEM_BRACKET_LIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Skins|Outfits)\b[:\s]*\[\d*\]\s*:?\s*([^|]*)").unwrap()
});

// Report form: `Skins: 3 (Renegade, Wukong)`. Greedy up to the last `)` of the field.
pub static ITEM_PAREN_LIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Skins|Outfits)\b[:\s]*\d+\s*\(([^|]*)\)").unwrap()
});

pub static ITEM_FALLBACK_LIST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:Skins|Outfits)\b[:\s]*([^|]*)").unwrap()
});

pub static LAST_PLAYED_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bLast[ _]?Played\b[:\s]*([^|]*)").unwrap()
});

pub static LEVEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bLevel\b[:\s]*(\d+)").unwrap()
});

pub static PLATFORM_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bPlatform\b[:\s]*([^|]*)").unwrap()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_pattern_separators() {
        for line in ["a@b.com:pw", "a@b.com|pw", "a@b.com pw", "a@b.com : pw"] {
            let caps = CREDENTIAL_PATTERN.captures(line).unwrap();
            assert_eq!(&caps[1], "a@b.com", "Failed for input: {}", line);
            assert_eq!(&caps[2], "pw", "Failed for input: {}", line);
        }
        assert!(CREDENTIAL_PATTERN.captures("no email here").is_none());
    }

    #[test]
    fn test_flag_labels_are_whole_words() {
        assert!(FULL_ACCESS_PATTERN.is_match("FA: Yes"));
        assert!(FULL_ACCESS_PATTERN.is_match("full access true"));
        assert!(!FULL_ACCESS_PATTERN.is_match("FAQ: yes"));
        assert!(SAVE_MODE_PATTERN.is_match("Save The World: 1"));
        assert!(!SAVE_MODE_PATTERN.is_match("STW: maybe"));
    }

    #[test]
    fn test_field_flag_patterns_need_a_field_start() {
        assert!(SAVE_MODE_FIELD_PATTERN.is_match(" | STW: No"));
        assert!(SAVE_MODE_FIELD_PATTERN.is_match("  STW: 1"));
        assert!(!SAVE_MODE_FIELD_PATTERN.is_match("Skins: 1 (STW 1 Pack)"));
        assert!(!FULL_ACCESS_FIELD_PATTERN.is_match("Skins: Renegade, FA 1 Bundle"));
    }

    #[test]
    fn test_paren_list_keeps_nested_parentheses() {
        let caps = ITEM_PAREN_LIST_PATTERN
            .captures("Skins: 2 (Renegade (OG), Wukong) | FA: Yes")
            .unwrap();
        assert_eq!(&caps[1], "Renegade (OG), Wukong");
    }

    #[test]
    fn test_currency_grouping() {
        let cases = vec![
            ("Vbucks: 1,500", "1,500"),
            ("V-Bucks 1500", "1500"),
            ("V_Bucks: 1.250.000", "1.250.000"),
            ("Vbucks Count: 42", "42"),
            ("vbucks: 12.5", "12"),
        ];

        for (input, expected) in cases {
            let caps = CURRENCY_PATTERN.captures(input).unwrap();
            assert_eq!(&caps[1], expected, "Failed for input: {}", input);
        }
    }
}
