//! Markdown parsing adapter around markdown-rs.

use crate::error::{ScriptError, SourceLocation};
use markdown::mdast::Node;
use markdown::message::{Message, Place};

/// Parse options for script documents.
///
/// CommonMark constructs with indented code disabled, so every `Code`
/// node in the resulting tree comes from a fence and carries a language
/// tag slot. No GFM, no frontmatter.
fn parse_options() -> markdown::ParseOptions {
    markdown::ParseOptions {
        constructs: markdown::Constructs {
            code_indented: false,
            ..Default::default()
        },
        ..markdown::ParseOptions::default()
    }
}

/// Parse a markdown document into an mdast tree.
pub fn parse_document(input: &str) -> Result<Node, ScriptError> {
    markdown::to_mdast(input, &parse_options()).map_err(|err| ScriptError::Parse {
        message: err.to_string(),
        location: message_location(&err),
    })
}

fn message_location(message: &Message) -> SourceLocation {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => SourceLocation::new(point.line, point.column),
            Place::Position(position) => {
                SourceLocation::new(position.start.line, position.start.column)
            }
        },
        None => SourceLocation::new(1, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_document() {
        let tree = parse_document("# Title\n\nBody text.\n").expect("parse should succeed");
        let children = tree.children().expect("root has children");
        assert_eq!(children.len(), 2);
        assert!(matches!(children[0], Node::Heading(_)));
        assert!(matches!(children[1], Node::Paragraph(_)));
    }

    #[test]
    fn fenced_code_keeps_language_tag() {
        let tree = parse_document("```rust\nfn main() {}\n```\n").expect("parse should succeed");
        let children = tree.children().expect("root has children");
        match &children[0] {
            Node::Code(code) => {
                assert_eq!(code.lang.as_deref(), Some("rust"));
                assert_eq!(code.value, "fn main() {}");
            }
            other => panic!("expected code node, got {other:?}"),
        }
    }

    #[test]
    fn indented_code_is_not_a_code_node() {
        let tree = parse_document("    looks like code\n").expect("parse should succeed");
        let children = tree.children().expect("root has children");
        assert!(matches!(children[0], Node::Paragraph(_)));
    }
}
