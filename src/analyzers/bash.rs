//! Bash analyzer — the `tree-sitter` runtime applied to shell scripts (spec.md §4.7).

use super::{Language, ParseError};
use tree_sitter::{Node, Parser, Tree};

pub struct BashTree {
    pub tree: Tree,
    pub source: String,
}

pub fn parse(source: &str) -> Result<BashTree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_bash::LANGUAGE.into())
        .map_err(|e| ParseError {
            language: Language::Bash,
            message: e.to_string(),
        })?;
    let tree = parser.parse(source, None).ok_or_else(|| ParseError {
        language: Language::Bash,
        message: "tree-sitter returned no tree".to_string(),
    })?;
    Ok(BashTree {
        tree,
        source: source.to_string(),
    })
}

impl BashTree {
    /// Leading `#!`-shebang-then-comment header block, the Bash convention consumed by
    /// `file_header` (spec.md §4.8: "Bash hash-comment block after an optional shebang").
    pub fn leading_comment_block(&self) -> Vec<String> {
        let mut lines: Vec<&str> = self.source.lines().collect();
        if lines.first().is_some_and(|l| l.starts_with("#!")) {
            lines.remove(0);
        }
        lines
            .iter()
            .take_while(|l| l.trim_start().starts_with('#'))
            .map(|l| l.trim_start().trim_start_matches('#').trim().to_string())
            .collect()
    }

    pub fn functions(&self) -> Vec<(String, usize)> {
        let mut out = Vec::new();
        walk(self.tree.root_node(), &mut |node| {
            if node.kind() == "function_definition" {
                let name = node
                    .child_by_field_name("name")
                    .map(|n| self.source[n.byte_range()].to_string())
                    .unwrap_or_default();
                out.push((name, node.start_position().row + 1));
            }
        });
        out
    }
}

fn walk<'a>(node: Node<'a>, f: &mut impl FnMut(Node<'a>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, f);
    }
}
