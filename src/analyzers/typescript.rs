//! TypeScript/JavaScript analyzer — a `tree-sitter` consumer, the non-host-language pattern
//! from `examples/ekropotin-quickmark` (`tree-sitter = "0.25"` + a per-language grammar crate,
//! there `tree-sitter-md`; here `tree-sitter-typescript`/`tree-sitter-javascript`).

use super::{Language, ParseError};
use tree_sitter::{Node, Parser, Tree};

pub struct TsTree {
    pub tree: Tree,
    pub source: String,
    pub is_tsx: bool,
}

pub fn parse(source: &str, language: Language) -> Result<TsTree, ParseError> {
    let mut parser = Parser::new();
    let (ts_lang, is_tsx) = match language {
        Language::JavaScript => (tree_sitter_javascript::LANGUAGE.into(), false),
        _ if source.contains("</") || source.contains("tsx") => {
            (tree_sitter_typescript::LANGUAGE_TSX.into(), true)
        }
        _ => (tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(), false),
    };
    parser.set_language(&ts_lang).map_err(|e| ParseError {
        language,
        message: e.to_string(),
    })?;
    let tree = parser.parse(source, None).ok_or_else(|| ParseError {
        language,
        message: "tree-sitter returned no tree".to_string(),
    })?;
    Ok(TsTree {
        tree,
        source: source.to_string(),
        is_tsx,
    })
}

/// A class declaration, used by `srp`/`stateless_class` equivalents for TS (via the
/// cross-file `stringly_typed`/DRY rules, which are the only cross-language rules specified
/// in spec.md §4.8 for TypeScript beyond DRY).
pub struct TsClassInfo {
    pub name: String,
    pub line: usize,
    pub method_count: usize,
    pub has_extends: bool,
}

impl TsTree {
    pub fn classes(&self) -> Vec<TsClassInfo> {
        let mut out = Vec::new();
        walk(self.tree.root_node(), &mut |node| {
            if node.kind() == "class_declaration" {
                let name = node
                    .child_by_field_name("name")
                    .map(|n| self.text(n).to_string())
                    .unwrap_or_default();
                let has_extends = node
                    .children(&mut node.walk())
                    .any(|c| c.kind() == "class_heritage");
                let method_count = node
                    .child_by_field_name("body")
                    .map(|body| {
                        body.children(&mut body.walk())
                            .filter(|c| c.kind() == "method_definition")
                            .count()
                    })
                    .unwrap_or(0);
                out.push(TsClassInfo {
                    name,
                    line: node.start_position().row + 1,
                    method_count,
                    has_extends,
                });
            }
        });
        out
    }

    /// Line ranges (1-indexed, inclusive) of `interface X {...}` / `type X = {...}` bodies,
    /// excluded from DRY block reporting per spec.md §4.6 ("TypeScript interface bodies").
    pub fn interface_ranges(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        walk(self.tree.root_node(), &mut |node| {
            if matches!(node.kind(), "interface_declaration" | "type_alias_declaration") {
                out.push((node.start_position().row + 1, node.end_position().row + 1));
            }
        });
        out
    }

    /// Leading JSDoc `/** ... */` comment immediately preceding the root's first statement,
    /// used by `file_header` (spec.md §4.8) for the TS/JS header-extraction convention.
    pub fn leading_jsdoc(&self) -> Option<String> {
        let root = self.tree.root_node();
        let first = root.child(0)?;
        if first.kind() == "comment" {
            let text = self.text(first);
            if text.starts_with("/**") {
                return Some(text.to_string());
            }
        }
        None
    }

    /// Source text covered by `node`; exposed so other rules (e.g. `stringly_typed`) can walk
    /// the tree themselves without duplicating byte-range slicing.
    pub fn text(&self, node: Node) -> &str {
        &self.source[node.byte_range()]
    }
}

fn walk<'a>(node: Node<'a>, f: &mut impl FnMut(Node<'a>)) {
    f(node);
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(child, f);
    }
}
