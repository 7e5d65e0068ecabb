//! Core data models for translation

use rust_decimal::Decimal;
use serde::Deserialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Tone of the translated text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Formality {
    /// Let the API decide
    #[default]
    Default,
    /// More formal phrasing
    More,
    /// Less formal phrasing
    Less,
    /// Any other value, forwarded to the API untouched
    Other(String),
}

impl FromStr for Formality {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "default" => Formality::Default,
            "more" => Formality::More,
            "less" => Formality::Less,
            other => Formality::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formality::Default => write!(f, "default"),
            Formality::More => write!(f, "more"),
            Formality::Less => write!(f, "less"),
            Formality::Other(value) => write!(f, "{}", value),
        }
    }
}

/// Everything one invocation asks for, resolved from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// Text to translate, absent in usage mode
    pub text: Option<String>,
    /// Empty means auto-detect
    pub source_language: String,
    /// Target language as given on the command line
    pub target_language: String,
    /// Requested tone
    pub formality: Formality,
    /// Report account usage instead of translating
    pub usage_mode: bool,
    /// Skip the clipboard copy
    pub suppress_clipboard: bool,
    /// Show and copy the original text alongside the translation
    pub keep_original: bool,
}

impl RequestDescriptor {
    /// Translation request for this invocation, `None` in usage mode
    pub fn translation_request(&self) -> Option<TranslationRequest> {
        if self.usage_mode {
            return None;
        }

        let text = self.text.clone()?;
        let mut request = TranslationRequest::new(text, self.target_language.clone())
            .with_formality(self.formality.clone());
        if !self.source_language.is_empty() {
            request = request.with_source_lang(self.source_language.clone());
        }
        Some(request)
    }
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Text to translate
    pub text: String,
    /// Source language, `None` to auto-detect
    pub source_lang: Option<String>,
    /// Target language
    pub target_lang: String,
    /// Requested tone
    pub formality: Formality,
}

impl TranslationRequest {
    /// Create a request with default formality and auto-detected source
    pub fn new(text: String, target_lang: String) -> Self {
        Self {
            text,
            source_lang: None,
            target_lang,
            formality: Formality::Default,
        }
    }

    /// Set the source language
    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = Some(source_lang.into());
        self
    }

    /// Set the formality
    pub fn with_formality(mut self, formality: Formality) -> Self {
        self.formality = formality;
        self
    }

    /// Query parameters for the translate endpoint, without the key
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(4);
        if let Some(source) = self.source_lang.as_deref().filter(|s| !s.is_empty()) {
            params.push(("source_lang", source.to_uppercase()));
        }
        params.push(("target_lang", self.target_lang.to_uppercase()));
        params.push(("formality", self.formality.to_string()));
        params.push(("text", self.text.clone()));
        params
    }
}

/// Translation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// Translated text
    pub translated_text: String,
    /// Language the API detected, if reported
    pub detected_source_language: Option<String>,
}

/// Body of a `/v2/translate` response
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    /// Absent on malformed responses
    pub translations: Option<Vec<TranslationItem>>,
}

/// One entry of the `translations` array
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationItem {
    /// Translated text
    pub text: String,
    /// Language the API detected
    pub detected_source_language: Option<String>,
}

/// Body of a `/v2/usage` response
#[derive(Debug, Clone, Deserialize)]
pub struct UsageResponse {
    /// Characters translated this period
    pub character_count: Option<u64>,
    /// Characters allowed this period
    pub character_limit: Option<u64>,
}

/// Characters billed per cost unit
const CHARACTERS_PER_UNIT: u64 = 500;

/// Account usage with an estimated cost in euros
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageReport {
    /// Characters translated this period
    pub character_count: u64,
    /// Characters allowed this period
    pub character_limit: u64,
    /// Cost of `character_count`
    pub estimated_cost: Decimal,
    /// Cost of `character_limit`
    pub estimated_max_cost: Decimal,
}

impl UsageReport {
    /// Build a report, estimating both costs
    pub fn new(character_count: u64, character_limit: u64) -> Self {
        Self {
            character_count,
            character_limit,
            estimated_cost: estimate_cost(character_count),
            estimated_max_cost: estimate_cost(character_limit),
        }
    }
}

/// One cent per 500 characters
fn estimate_cost(characters: u64) -> Decimal {
    let cent = Decimal::new(1, 2);
    (Decimal::from(characters) / Decimal::from(CHARACTERS_PER_UNIT) * cent).normalize()
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Character count = {}", self.character_count)?;
        writeln!(f, "Cost: €{}", self.estimated_cost)?;
        writeln!(f, "Character limit = {}", self.character_limit)?;
        write!(f, "Max cost: €{}", self.estimated_max_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> RequestDescriptor {
        RequestDescriptor {
            text: Some("Hello".to_string()),
            source_language: String::new(),
            target_language: "de".to_string(),
            formality: Formality::Default,
            usage_mode: false,
            suppress_clipboard: false,
            keep_original: false,
        }
    }

    #[test]
    fn test_usage_report_formatting() {
        let report = UsageReport::new(100_000, 500_000);
        assert_eq!(report.estimated_cost.to_string(), "2");
        assert_eq!(report.estimated_max_cost.to_string(), "10");
        assert_eq!(
            report.to_string(),
            "Character count = 100000\nCost: €2\nCharacter limit = 500000\nMax cost: €10"
        );
    }

    #[test]
    fn test_usage_report_fractional_cost() {
        let report = UsageReport::new(12_345, 0);
        assert_eq!(report.estimated_cost.to_string(), "0.2469");
        assert_eq!(report.estimated_max_cost.to_string(), "0");
    }

    #[test]
    fn test_formality_passthrough() {
        assert_eq!("less".parse::<Formality>().unwrap(), Formality::Less);
        assert_eq!("more".parse::<Formality>().unwrap(), Formality::More);

        let custom: Formality = "prefer_less".parse().unwrap();
        assert_eq!(custom, Formality::Other("prefer_less".to_string()));
        assert_eq!(custom.to_string(), "prefer_less");
    }

    #[test]
    fn test_query_params_uppercase_languages() {
        let request = TranslationRequest::new("Olá".to_string(), "PT-pt".to_string())
            .with_source_lang("en-us")
            .with_formality(Formality::Less);

        assert_eq!(
            request.query_params(),
            vec![
                ("source_lang", "EN-US".to_string()),
                ("target_lang", "PT-PT".to_string()),
                ("formality", "less".to_string()),
                ("text", "Olá".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_params_omit_auto_detect_source() {
        let request = TranslationRequest::new("Hello".to_string(), "de".to_string());
        assert!(request.query_params().iter().all(|(k, _)| *k != "source_lang"));
    }

    #[test]
    fn test_descriptor_translation_request() {
        let request = descriptor().translation_request().unwrap();
        assert_eq!(request.text, "Hello");
        assert_eq!(request.source_lang, None);
        assert_eq!(request.target_lang, "de");

        let usage = RequestDescriptor {
            usage_mode: true,
            ..descriptor()
        };
        assert!(usage.translation_request().is_none());
    }
}
