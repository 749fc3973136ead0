//! CSS analyzer — the `tree-sitter` runtime applied to stylesheets (spec.md §4.7).

use super::{Language, ParseError};
use tree_sitter::{Parser, Tree};

pub struct CssTree {
    pub tree: Tree,
    pub source: String,
}

pub fn parse(source: &str) -> Result<CssTree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_css::LANGUAGE.into())
        .map_err(|e| ParseError {
            language: Language::Css,
            message: e.to_string(),
        })?;
    let tree = parser.parse(source, None).ok_or_else(|| ParseError {
        language: Language::Css,
        message: "tree-sitter returned no tree".to_string(),
    })?;
    Ok(CssTree {
        tree,
        source: source.to_string(),
    })
}

impl CssTree {
    /// Leading JSDoc-style `/** ... */` comment, the CSS header convention per spec.md §4.8.
    pub fn leading_jsdoc(&self) -> Option<String> {
        let root = self.tree.root_node();
        let first = root.child(0)?;
        if first.kind() == "comment" {
            let text = &self.source[first.byte_range()];
            if text.starts_with("/**") {
                return Some(text.to_string());
            }
        }
        None
    }
}
