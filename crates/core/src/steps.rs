//! The step model: the closed set of script steps and their wire format.
//!
//! A script is an ordered list of steps, and each step serializes as a
//! two-element `[kind, payload]` tuple so downstream renderers can
//! dispatch on the tag without knowing the payload shapes up front.

use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScriptError;

/// Title card produced from a level-1 heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Title text; colons in the source become line breaks.
    pub content: String,
}

/// Spoken narration produced from a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voiceover {
    /// The paragraph's literal source text.
    pub content: String,
}

/// A fenced code block paired with the narration that precedes it.
///
/// Field order here is the wire order; keep it stable so written scripts
/// round-trip byte-identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codeblock {
    /// Narration lifted from the step immediately before the fence.
    pub content: String,
    /// File extension resolved from the language tag.
    pub extension: String,
    /// The declared language tag, as written (possibly empty).
    pub language: String,
    /// Literal code lines, each terminated by a newline.
    pub source: String,
}

/// One unit of the generated script, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Title card.
    Heading(Heading),
    /// Spoken narration.
    Voiceover(Voiceover),
    /// Code shown while its paired narration plays.
    Codeblock(Codeblock),
}

/// An ordered script of steps.
pub type Steps = Vec<Step>;

const KIND_TAGS: [&str; 3] = ["heading", "voiceover", "code"];

impl Step {
    /// Narration text associated with this step.
    ///
    /// For a code block this is the lifted narration, not the code.
    pub fn text(&self) -> &str {
        match self {
            Step::Heading(heading) => &heading.content,
            Step::Voiceover(voiceover) => &voiceover.content,
            Step::Codeblock(codeblock) => &codeblock.content,
        }
    }

    /// Wire tag for this step kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Heading(_) => "heading",
            Step::Voiceover(_) => "voiceover",
            Step::Codeblock(_) => "code",
        }
    }

    /// Generate the artifacts for this step.
    ///
    /// No rendering stage is wired up yet; every kind reports success so
    /// callers can batch a whole script and stop at the first failure
    /// once one is.
    pub fn build(&self) -> Result<(), ScriptError> {
        match self {
            Step::Heading(_) | Step::Voiceover(_) | Step::Codeblock(_) => Ok(()),
        }
    }
}

impl Serialize for Step {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.kind())?;
        match self {
            Step::Heading(heading) => tuple.serialize_element(heading)?,
            Step::Voiceover(voiceover) => tuple.serialize_element(voiceover)?,
            Step::Codeblock(codeblock) => tuple.serialize_element(codeblock)?,
        }
        tuple.end()
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StepVisitor;

        impl<'de> Visitor<'de> for StepVisitor {
            type Value = Step;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a [kind, payload] pair")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Step, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let kind: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let step = match kind.as_str() {
                    "heading" => Step::Heading(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                    ),
                    "voiceover" => Step::Voiceover(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                    ),
                    "code" => Step::Codeblock(
                        seq.next_element()?
                            .ok_or_else(|| de::Error::invalid_length(1, &self))?,
                    ),
                    other => return Err(de::Error::unknown_variant(other, &KIND_TAGS)),
                };
                Ok(step)
            }
        }

        deserializer.deserialize_tuple(2, StepVisitor)
    }
}
