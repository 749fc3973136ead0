//! Markdown analyzer, built on `pulldown-cmark` — the teacher's own native-markdown crate
//! (`examples/sthagen-rvben-rumdl` depends on `pulldown-cmark = "0.13"`).

use super::{Language, ParseError};
use pulldown_cmark::{Event, Parser, Tag};

pub struct MarkdownTree {
    pub source: String,
}

pub fn parse(source: &str) -> Result<MarkdownTree, ParseError> {
    // pulldown-cmark never fails to parse (CommonMark has no syntax errors); we still return
    // a Result to keep the analyzer interface uniform with the other languages.
    let _ = Language::Markdown;
    Ok(MarkdownTree {
        source: source.to_string(),
    })
}

impl MarkdownTree {
    /// YAML frontmatter between leading `---` fences, the Markdown header convention
    /// (spec.md §4.8: "Markdown: YAML frontmatter between leading `---` fences").
    pub fn frontmatter(&self) -> Option<&str> {
        let trimmed = self.source.strip_prefix("---\n")?;
        let end = trimmed.find("\n---")?;
        Some(&trimmed[..end])
    }

    pub fn headings(&self) -> Vec<(u8, String, usize)> {
        let parser = Parser::new(&self.source);
        let mut out = Vec::new();
        let mut current: Option<(u8, String)> = None;
        let mut line = 1usize;
        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, .. }) => {
                    current = Some((level as u8, String::new()));
                }
                Event::Text(t) => {
                    if let Some((_, buf)) = current.as_mut() {
                        buf.push_str(&t);
                    }
                    line += t.matches('\n').count();
                }
                Event::End(pulldown_cmark::TagEnd::Heading(_)) => {
                    if let Some((level, text)) = current.take() {
                        out.push((level, text, line));
                    }
                }
                Event::SoftBreak | Event::HardBreak => line += 1,
                _ => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_frontmatter() {
        let src = "---\ntitle: Hi\n---\n\n# Body\n";
        let tree = parse(src).unwrap();
        assert_eq!(tree.frontmatter(), Some("title: Hi"));
    }

    #[test]
    fn no_frontmatter_returns_none() {
        let tree = parse("# Just a heading\n").unwrap();
        assert_eq!(tree.frontmatter(), None);
    }
}
