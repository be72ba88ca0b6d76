//! Resolution of the numeric text keys embedded in chat and hint operations.
//!
//! Keys are decimal strings `"0"..="38"`. They index a fixed table that points
//! into the game's localized string file; the string file itself comes from a
//! [`LocalizationSource`](crate::assets::LocalizationSource).

/// Localization index for each text key, by key.
const TEXT_KEY_TABLE: [usize; 39] = [
    79, 80, 91, 102, 112, 113, 114, 115, 116, 117, // 0..=9
    81, 82, 83, 84, 85, 86, 87, 88, 89, 90, // 10..=19
    92, 93, 94, 95, 96, 97, 98, 99, 100, 101, // 20..=29
    103, 104, 105, 106, 107, 108, 109, 110, 111, // 30..=38
];

/// Placeholder used when the localized table is shorter than the index.
pub const MISSING_STRING: &str = "null";

/// Ordered list of localized strings for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedStrings {
    strings: Vec<String>,
}

impl LocalizedStrings {
    pub fn new(strings: Vec<String>) -> Self {
        Self { strings }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Parse a decimal the lenient way the game data expects: leading whitespace
/// is skipped and trailing garbage after the digits ignored.
fn parse_leading_decimal(raw: &str) -> Option<usize> {
    let trimmed = raw.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse().ok()
}

/// Localization index for a raw text key, if the key is mapped.
pub fn localization_index(raw: &str) -> Option<usize> {
    parse_leading_decimal(raw).and_then(|key| TEXT_KEY_TABLE.get(key).copied())
}

/// Resolve a raw text key against an optional string table.
///
/// Returns `None` when the key is unmapped or no table is available; callers
/// then display the raw key. A mapped key past the end of the table yields
/// [`MISSING_STRING`].
pub fn resolve(raw: &str, strings: Option<&LocalizedStrings>) -> Option<String> {
    let index = localization_index(raw)?;
    let strings = strings?;
    Some(strings.get(index).unwrap_or(MISSING_STRING).to_owned())
}
