//! Language registry and extension resolution.
//!
//! The registry is a fixed dataset embedded at compile time and decoded
//! once per process. Order is significant: resolution takes the first
//! match, and names are declared longest-first so specific names
//! ("JavaScript", "Rust", "C++") win over short prefix names ("Java",
//! "R", "C").

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ScriptError;

/// One language known to the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct LanguageDefinition {
    /// Display name; matched as a lower-cased prefix of the declared tag.
    pub name: String,
    /// Language category ("programming", "markup", "data", "prose").
    #[serde(rename = "type")]
    pub category: String,
    /// Known file extensions; the first one is the canonical target.
    pub extensions: Vec<String>,
}

static REGISTRY_SOURCE: &str = include_str!("languages.json");

static REGISTRY: Lazy<Vec<LanguageDefinition>> = Lazy::new(|| {
    serde_json::from_str(REGISTRY_SOURCE).expect("embedded language registry is valid JSON")
});

/// All registered languages, in declaration order.
pub fn definitions() -> &'static [LanguageDefinition] {
    Lazy::force(&REGISTRY).as_slice()
}

/// Resolve a declared language tag to its canonical file extension.
///
/// The tag is lower-cased and scanned against the registry in declared
/// order; the first entry whose name is a prefix of the tag wins, so
/// `python3` resolves like `python`. An unmatched tag — including the
/// empty tag of a bare fence — is an error naming the tag.
pub fn extension_for(tag: &str) -> Result<&'static str, ScriptError> {
    let wanted = tag.to_lowercase();
    for language in definitions() {
        if wanted.starts_with(&language.name.to_lowercase()) {
            if let Some(extension) = language.extensions.first() {
                return Ok(extension.as_str());
            }
        }
    }
    Err(ScriptError::UnknownLanguage {
        language: tag.to_string(),
    })
}
