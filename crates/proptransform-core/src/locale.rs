//! Locale-aware case conversion
//!
//! Case transforms follow the host's default locale, read from the POSIX
//! environment at call time (`LC_ALL`, then `LC_CTYPE`, then `LANG`).
//! Conversion uses the Unicode default case mapping plus the Turkic
//! tailoring for Turkish and Azerbaijani (dotted and dotless i).
//!
//! # Portability
//!
//! The same build can produce different property values on machines with
//! different locales: `upper` turns `"title"` into `"TİTLE"` under `tr_TR`.
//! Other tailorings (for example Lithuanian dot-above retention) are not
//! applied, so results for those locales match the Unicode defaults.

use std::fmt;

const LATIN_CAPITAL_I_WITH_DOT: char = '\u{0130}';
const LATIN_SMALL_DOTLESS_I: char = '\u{0131}';
const COMBINING_DOT_ABOVE: char = '\u{0307}';

/// Environment variables consulted for the default locale, highest precedence first
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// A language-level locale used for case conversion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Locale {
    /// Lowercased ISO 639 language code; empty for the root locale
    language: String,
}

impl Locale {
    /// The root locale (plain Unicode case mapping)
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a POSIX locale name such as `tr_TR.UTF-8` or `de_DE@euro`
    ///
    /// `C` and `POSIX` map to the root locale.
    pub fn from_posix(name: &str) -> Self {
        let language: String = name
            .split(|c| matches!(c, '_' | '-' | '.' | '@'))
            .next()
            .unwrap_or("")
            .to_ascii_lowercase();

        match language.as_str() {
            "c" | "posix" => Self::root(),
            _ => Self { language },
        }
    }

    /// The host's default locale as configured right now
    pub fn current() -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::from_posix(&value))
            .unwrap_or_default()
    }

    /// Language code, empty for the root locale
    pub fn language(&self) -> &str {
        &self.language
    }

    fn is_turkic(&self) -> bool {
        matches!(self.language.as_str(), "tr" | "az")
    }

    /// Uppercase the whole string under this locale
    pub fn to_upper(&self, input: &str) -> String {
        if !self.is_turkic() {
            return input.to_uppercase();
        }
        input
            .chars()
            .map(|c| if c == 'i' { LATIN_CAPITAL_I_WITH_DOT } else { c })
            .collect::<String>()
            .to_uppercase()
    }

    /// Lowercase the whole string under this locale
    pub fn to_lower(&self, input: &str) -> String {
        if !self.is_turkic() {
            return input.to_lowercase();
        }
        let mut mapped = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                'I' if chars.peek() == Some(&COMBINING_DOT_ABOVE) => {
                    chars.next();
                    mapped.push('i');
                }
                'I' => mapped.push(LATIN_SMALL_DOTLESS_I),
                LATIN_CAPITAL_I_WITH_DOT => mapped.push('i'),
                other => mapped.push(other),
            }
        }
        mapped.to_lowercase()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.language.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.language)
        }
    }
}
