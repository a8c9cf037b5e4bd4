use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::*;
use crate::patterns::*;

/// Normalized tri-state flag: anything that is not an affirmative token reads as `No`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Flag {
    Yes,
    #[default]
    No,
}

impl Flag {
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "1" => Flag::Yes,
            _ => Flag::No,
        }
    }

    pub fn is_yes(self) -> bool {
        self == Flag::Yes
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Yes => "Yes",
            Flag::No => "No",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub identity: String,
    pub secret: String,
    pub full_access: Flag,
    pub save_mode: Flag,
    pub currency: u64,
    pub item_count: u64,
    pub item_names: Vec<String>,
    pub level: u32,
    pub last_played: String,
    pub platform: String,
    pub prime_candidate: bool,
}

impl Record {
    /// A record carrying only the credential pair, every other field at its default.
    pub fn new(identity: String, secret: String) -> Self {
        Self {
            identity,
            secret,
            full_access: Flag::No,
            save_mode: Flag::No,
            currency: 0,
            item_count: 0,
            item_names: Vec::new(),
            level: 0,
            last_played: UNKNOWN_LABEL.to_string(),
            platform: UNKNOWN_LABEL.to_string(),
            prime_candidate: false,
        }
    }

    /// Parse one raw log line. Returns `None` for blank lines, comments,
    /// section dividers and anything without an email/secret pair.
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim().trim_start_matches(BYTE_ORDER_MARK).trim();
        if trimmed.is_empty()
            || trimmed.starts_with(COMMENT_MARKER)
            || trimmed.contains(SECTION_DIVIDER)
        {
            return None;
        }

        let captures = CREDENTIAL_PATTERN.captures(trimmed)?;
        let span = captures.get(0)?;
        let identity = captures.get(1)?.as_str().trim().to_string();
        let secret = captures.get(2)?.as_str().trim().to_string();
        if identity.is_empty() || secret.is_empty() {
            return None;
        }

        // Cut by offsets so a secret repeated later in the line survives.
        let remainder = format!("{} {}", &trimmed[..span.start()], &trimmed[span.end()..]);

        let mut record = Record::new(identity, secret);
        record.full_access =
            extract_flag(&remainder, &FULL_ACCESS_FIELD_PATTERN, &FULL_ACCESS_PATTERN);
        record.save_mode = extract_flag(&remainder, &SAVE_MODE_FIELD_PATTERN, &SAVE_MODE_PATTERN);
        record.currency = extract_currency(&remainder);

        let items = extract_items(&remainder);
        record.item_count = items.count;
        record.item_names = items.names;

        record.last_played = extract_label(&remainder, &LAST_PLAYED_PATTERN);
        record.level = extract_number(&remainder, &LEVEL_PATTERN)
            .and_then(|value| u32::try_from(value).ok())
            .unwrap_or(0);
        record.platform = extract_label(&remainder, &PLATFORM_PATTERN);

        record.prime_candidate = record.full_access.is_yes() && record.save_mode.is_yes();
        Some(record)
    }

    /// Store key for this record.
    pub fn dedup_key(&self, case_sensitive: bool) -> String {
        if case_sensitive {
            self.identity.clone()
        } else {
            self.identity.to_lowercase()
        }
    }

    pub fn is_prime_candidate(&self) -> bool {
        self.prime_candidate
    }
}

/// Free-function form of [`Record::from_line`].
pub fn extract(line: &str) -> Option<Record> {
    Record::from_line(line)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ItemFields {
    count: u64,
    names: Vec<String>,
}

/// Prefer a flag that opens a `|` field; fall back to a whole-word match anywhere.
fn extract_flag(remainder: &str, field: &Regex, anywhere: &Regex) -> Flag {
    field
        .captures(remainder)
        .or_else(|| anywhere.captures(remainder))
        .and_then(|caps| caps.get(1))
        .map(|value| Flag::from_token(value.as_str()))
        .unwrap_or_default()
}

fn extract_currency(remainder: &str) -> u64 {
    CURRENCY_PATTERN
        .captures(remainder)
        .and_then(|caps| caps.get(1))
        .and_then(|value| parse_grouped_digits(value.as_str()))
        .unwrap_or(0)
}

fn parse_grouped_digits(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn extract_number(remainder: &str, pattern: &Regex) -> Option<u64> {
    pattern
        .captures(remainder)
        .and_then(|caps| caps.get(1))
        .and_then(|value| value.as_str().parse().ok())
}

fn extract_label(remainder: &str, pattern: &Regex) -> String {
    pattern
        .captures(remainder)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}

fn extract_items(remainder: &str) -> ItemFields {
    let count = extract_number(remainder, &ITEM_BRACKET_COUNT_PATTERN)
        .or_else(|| extract_number(remainder, &ITEM_BARE_COUNT_PATTERN))
        .unwrap_or(0);

    let names = if let Some(list) = capture_text(remainder, &ITEM_BRACKET_LIST_PATTERN) {
        split_item_names(list)
    } else if let Some(list) = capture_text(remainder, &ITEM_PAREN_LIST_PATTERN) {
        if list.trim().eq_ignore_ascii_case(NO_ITEMS_LABEL) {
            Vec::new()
        } else {
            split_item_names(list)
        }
    } else if let Some(list) = capture_text(remainder, &ITEM_FALLBACK_LIST_PATTERN) {
        split_item_names(list)
            .into_iter()
            .filter(|name| is_plausible_item_name(name))
            .collect()
    } else {
        Vec::new()
    };

    let count = if count == 0 && !names.is_empty() {
        names.len() as u64
    } else {
        count
    };

    ItemFields { count, names }
}

fn capture_text<'a>(remainder: &'a str, pattern: &Regex) -> Option<&'a str> {
    pattern
        .captures(remainder)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str())
}

fn split_item_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_plausible_item_name(name: &str) -> bool {
    name.chars().count() >= MIN_FALLBACK_ITEM_NAME_CHARS
        && !name.chars().all(|c| c.is_ascii_digit())
}
