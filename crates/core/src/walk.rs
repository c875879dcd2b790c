//! Document walker: turns a markdown document into an ordered script.

use log::debug;
use markdown::mdast::Node;
use markdown::unist::Position;

use crate::error::{ScriptError, SourceLocation};
use crate::languages;
use crate::parse::parse_document;
use crate::steps::{Codeblock, Heading, Step, Steps, Voiceover};

/// Convert a markdown document into its step script.
///
/// Level-1 headings become title cards, paragraphs become voiceovers, and
/// each fenced code block absorbs the step immediately before it as its
/// narration. The first failure aborts the whole conversion; no partial
/// script is returned.
pub fn markdown_to_steps(input: &str) -> Result<Steps, ScriptError> {
    let tree = parse_document(input)?;
    let mut assembler = StepAssembler::default();
    collect_steps(&tree, input, &mut assembler)?;
    let steps = assembler.finish();
    debug!("assembled {} steps", steps.len());
    Ok(steps)
}

/// Pre-order dispatch over the mdast tree.
///
/// Only three node kinds produce steps. Everything else is traversed for
/// the step-producing nodes nested inside it, so a paragraph in a block
/// quote or a loose list still narrates.
fn collect_steps(
    node: &Node,
    source: &str,
    assembler: &mut StepAssembler,
) -> Result<(), ScriptError> {
    match node {
        Node::Heading(heading) if heading.depth == 1 => {
            let title = flatten_text(&heading.children).replace(':', "\n");
            assembler.produce(Step::Heading(Heading { content: title }));
        }
        Node::Paragraph(paragraph) => {
            let content = literal_span(paragraph.position.as_ref(), source);
            assembler.produce(Step::Voiceover(Voiceover { content }));
        }
        Node::Code(code) => {
            let narration =
                assembler
                    .consume_pending()
                    .ok_or_else(|| ScriptError::OrphanedCodeBlock {
                        location: start_location(code.position.as_ref()),
                    })?;
            let language = code.lang.clone().unwrap_or_default();
            let extension = languages::extension_for(&language)?;
            assembler.produce(Step::Codeblock(Codeblock {
                content: narration.text().to_owned(),
                extension: extension.to_owned(),
                language,
                source: fenced_source(&code.value),
            }));
            return Ok(());
        }
        _ => {}
    }

    if let Some(children) = node.children() {
        for child in children {
            collect_steps(child, source, assembler)?;
        }
    }

    Ok(())
}

/// Builds the step sequence, holding the most recent step in a pending
/// slot so a fenced code block can claim it as narration.
///
/// Every step passes through the slot before being committed, which keeps
/// "absorb the previous step" a checked operation instead of a pop from
/// the end of the output. A code block parks in the slot too, so a second
/// fence directly after it chains onto its narration and the first code
/// step disappears from the script.
#[derive(Debug, Default)]
struct StepAssembler {
    committed: Vec<Step>,
    pending: Option<Step>,
}

impl StepAssembler {
    /// Commit whatever is pending and park the new step in the slot.
    fn produce(&mut self, step: Step) {
        if let Some(previous) = self.pending.take() {
            self.committed.push(previous);
        }
        self.pending = Some(step);
    }

    /// Claim the pending step, leaving the slot empty.
    fn consume_pending(&mut self) -> Option<Step> {
        self.pending.take()
    }

    /// Commit the leftover pending step and return the finished script.
    fn finish(mut self) -> Steps {
        if let Some(step) = self.pending.take() {
            self.committed.push(step);
        }
        self.committed
    }
}

/// Flatten the inline children of a heading into plain text.
fn flatten_text(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        flatten_node(node, &mut text);
    }
    text
}

fn flatten_node(node: &Node, buffer: &mut String) {
    match node {
        Node::Text(text) => buffer.push_str(&text.value),
        Node::InlineCode(code) => buffer.push_str(&code.value),
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    flatten_node(child, buffer);
                }
            }
        }
    }
}

/// Literal source span covered by a node, exactly as written.
fn literal_span(position: Option<&Position>, source: &str) -> String {
    match position {
        Some(position) => source[position.start.offset..position.end.offset].to_owned(),
        None => String::new(),
    }
}

fn start_location(position: Option<&Position>) -> SourceLocation {
    match position {
        Some(position) => SourceLocation::new(position.start.line, position.start.column),
        None => SourceLocation::new(1, 1),
    }
}

/// The code block's literal lines; non-empty blocks keep a trailing newline.
fn fenced_source(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{value}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(input: &str) -> Steps {
        markdown_to_steps(input).expect("conversion should succeed")
    }

    #[test]
    fn empty_document_yields_no_steps() {
        assert!(steps("").is_empty());
    }

    #[test]
    fn document_without_supported_constructs_yields_no_steps() {
        assert!(steps("---\n").is_empty());
    }

    #[test]
    fn level_one_heading_becomes_title_card() {
        let result = steps("# Hello World\n");
        assert_eq!(
            result,
            vec![Step::Heading(Heading {
                content: "Hello World".to_string()
            })]
        );
    }

    #[test]
    fn heading_colons_become_line_breaks() {
        let result = steps("# a:b:c\n");
        assert_eq!(result[0].text(), "a\nb\nc");
    }

    #[test]
    fn heading_colon_substitution_is_a_pure_replacement() {
        // The space after the colon survives; nothing is trimmed.
        let result = steps("# Part One: Intro\n");
        assert_eq!(result[0].text(), "Part One\n Intro");
    }

    #[test]
    fn deeper_headings_produce_no_step() {
        assert!(steps("## Section\n\n### Sub\n").is_empty());
    }

    #[test]
    fn heading_with_inline_markup_flattens_to_plain_text() {
        let result = steps("# Using `map` and *filter*\n");
        assert_eq!(result[0].text(), "Using map and filter");
    }

    #[test]
    fn paragraph_becomes_voiceover_with_literal_text() {
        let result = steps("line one\nline two\n");
        assert_eq!(
            result,
            vec![Step::Voiceover(Voiceover {
                content: "line one\nline two".to_string()
            })]
        );
    }

    #[test]
    fn paragraph_feeds_following_code_block() {
        let result = steps("Some narration.\n```python\nprint(1)\n```\n");
        assert_eq!(
            result,
            vec![Step::Codeblock(Codeblock {
                content: "Some narration.".to_string(),
                extension: "py".to_string(),
                language: "python".to_string(),
                source: "print(1)\n".to_string(),
            })]
        );
    }

    #[test]
    fn heading_can_narrate_a_code_block() {
        let result = steps("# Setup\n```shell\nmkdir demo\n```\n");
        assert_eq!(
            result,
            vec![Step::Codeblock(Codeblock {
                content: "Setup".to_string(),
                extension: "sh".to_string(),
                language: "shell".to_string(),
                source: "mkdir demo\n".to_string(),
            })]
        );
    }

    #[test]
    fn consecutive_code_blocks_chain_their_narration() {
        let input = "First we do this.\n```python\na = 1\n```\n```python\nb = 2\n```\n";
        let result = steps(input);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0],
            Step::Codeblock(Codeblock {
                content: "First we do this.".to_string(),
                extension: "py".to_string(),
                language: "python".to_string(),
                source: "b = 2\n".to_string(),
            })
        );
    }

    #[test]
    fn paragraph_inside_block_quote_still_narrates() {
        let result = steps("> quoted narration\n");
        assert_eq!(result.len(), 1);
        assert!(matches!(result[0], Step::Voiceover(_)));
    }

    #[test]
    fn empty_code_block_keeps_empty_source() {
        let result = steps("Narration.\n```python\n```\n");
        match &result[0] {
            Step::Codeblock(codeblock) => assert_eq!(codeblock.source, ""),
            other => panic!("expected code step, got {other:?}"),
        }
    }

    #[test]
    fn code_block_without_predecessor_is_an_error() {
        let err = markdown_to_steps("```python\nprint(1)\n```\n").unwrap_err();
        match err {
            ScriptError::OrphanedCodeBlock { location } => {
                assert_eq!(location.line, 1);
            }
            other => panic!("expected OrphanedCodeBlock, got {other:?}"),
        }
    }

    #[test]
    fn unknown_language_aborts_the_walk() {
        let err = markdown_to_steps("Narration.\n```klingon\nqapla\n```\n").unwrap_err();
        match err {
            ScriptError::UnknownLanguage { language } => assert_eq!(language, "klingon"),
            other => panic!("expected UnknownLanguage, got {other:?}"),
        }
    }

    #[test]
    fn untagged_fence_fails_with_empty_language() {
        let err = markdown_to_steps("Narration.\n```\nwhatever\n```\n").unwrap_err();
        match err {
            ScriptError::UnknownLanguage { language } => assert_eq!(language, ""),
            other => panic!("expected UnknownLanguage, got {other:?}"),
        }
    }

    #[test]
    fn failed_walk_returns_no_partial_script() {
        // The heading parses fine but the bad fence must sink everything.
        let result = markdown_to_steps("# Title\nNarration.\n```klingon\nx\n```\n");
        assert!(result.is_err());
    }
}
