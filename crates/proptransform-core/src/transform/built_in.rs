//! Built-in transformation strategies
//!
//! The closed set of strategies every registry starts with: `identity`,
//! `lower` and `upper`. Case strategies resolve the host's default locale
//! each time they run unless pinned to an explicit [`Locale`].
//!
//! Copyright (c) 2025 Proptransform Team
//! Licensed under the Apache-2.0 license

use crate::locale::Locale;
use crate::Result;
use super::types::TransformStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The built-in strategy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinTransform {
    Identity,
    Lower,
    Upper,
}

impl BuiltinTransform {
    /// All built-ins in identifier order
    pub const ALL: [BuiltinTransform; 3] = [
        BuiltinTransform::Identity,
        BuiltinTransform::Lower,
        BuiltinTransform::Upper,
    ];

    /// The identifier this built-in is registered under
    pub fn id(self) -> &'static str {
        match self {
            BuiltinTransform::Identity => "identity",
            BuiltinTransform::Lower => "lower",
            BuiltinTransform::Upper => "upper",
        }
    }

    /// Create a fresh strategy instance following the default locale
    pub fn create(self) -> Box<dyn TransformStrategy> {
        match self {
            BuiltinTransform::Identity => Box::new(Identity),
            BuiltinTransform::Lower => Box::new(CaseTransform::lower()),
            BuiltinTransform::Upper => Box::new(CaseTransform::upper()),
        }
    }
}

impl fmt::Display for BuiltinTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BuiltinTransform {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        BuiltinTransform::ALL
            .into_iter()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| format!("\"{}\" is not a built-in transform", s))
    }
}

/// Returns its input unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl TransformStrategy for Identity {
    fn name(&self) -> &str {
        BuiltinTransform::Identity.id()
    }

    fn transform(&self, value: &str) -> Result<String> {
        Ok(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    Lower,
    Upper,
}

/// Converts the whole value to upper or lower case
#[derive(Debug, Clone)]
pub struct CaseTransform {
    case: Case,
    /// Pinned locale; `None` reads the host default on every call
    locale: Option<Locale>,
}

impl CaseTransform {
    /// Lowercase under the host's default locale
    pub fn lower() -> Self {
        Self { case: Case::Lower, locale: None }
    }

    /// Uppercase under the host's default locale
    pub fn upper() -> Self {
        Self { case: Case::Upper, locale: None }
    }

    /// Pin this strategy to a fixed locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    /// The locale a call made right now would use
    pub fn effective_locale(&self) -> Locale {
        self.locale.clone().unwrap_or_else(Locale::current)
    }
}

impl TransformStrategy for CaseTransform {
    fn name(&self) -> &str {
        match self.case {
            Case::Lower => BuiltinTransform::Lower.id(),
            Case::Upper => BuiltinTransform::Upper.id(),
        }
    }

    fn transform(&self, value: &str) -> Result<String> {
        let locale = self.effective_locale();
        Ok(match self.case {
            Case::Lower => locale.to_lower(value),
            Case::Upper => locale.to_upper(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_round_trip() {
        for kind in BuiltinTransform::ALL {
            assert_eq!(kind.id().parse::<BuiltinTransform>(), Ok(kind));
            assert_eq!(kind.create().name(), kind.id());
        }
        assert!("Upper".parse::<BuiltinTransform>().is_err());
    }

    #[test]
    fn test_identity_keeps_empty_string() {
        assert_eq!(Identity.transform("").unwrap(), "");
        assert_eq!(Identity.transform(" MiXeD ").unwrap(), " MiXeD ");
    }

    #[test]
    fn test_pinned_locale_case() {
        let upper = CaseTransform::upper().with_locale(Locale::from_posix("tr_TR"));
        assert_eq!(upper.transform("istanbul").unwrap(), "\u{0130}STANBUL");

        let lower = CaseTransform::lower().with_locale(Locale::root());
        assert_eq!(lower.transform("ÄBC").unwrap(), "äbc");
    }

    #[test]
    fn test_default_locale_case_matches_current_locale() {
        let input = "Grüße aus Köln";
        let expected = Locale::current().to_upper(input);
        assert_eq!(CaseTransform::upper().transform(input).unwrap(), expected);
    }
}
