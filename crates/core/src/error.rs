use thiserror::Error;

/// Position of a markdown construct inside the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while turning a markdown document into a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// markdown-rs could not structure the input.
    #[error("parse error at {location}: {message}")]
    Parse {
        /// Parser message
        message: String,
        /// Where parsing failed
        location: SourceLocation,
    },
    /// A code block declared a language with no registry match.
    #[error("no extension registered for language {language:?}")]
    UnknownLanguage {
        /// The declared language tag, as written
        language: String,
    },
    /// A fenced code block appeared with no step before it to narrate it.
    #[error("code block at {location} has no preceding narration")]
    OrphanedCodeBlock {
        /// Where the fence starts
        location: SourceLocation,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_displays_line_and_column() {
        assert_eq!(SourceLocation::new(3, 7).to_string(), "3:7");
    }

    #[test]
    fn unknown_language_names_the_tag() {
        let err = ScriptError::UnknownLanguage {
            language: "klingon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no extension registered for language \"klingon\""
        );
    }
}
