//! Tokenization/normalization (spec.md §4.6): per-language production of normalized line
//! strings, stripping comments, blank lines, docstrings/JSDoc, and import statements, while
//! preserving identifier spellings (no alpha-renaming — spec.md is explicit that two blocks
//! differing only by identifier names remain distinct).

use crate::analyzers::Language;

/// One physical source line after normalization, remembering its original (1-indexed) line
/// number so a `CodeBlock`'s `start_line`/`end_line` can be reported against the real file.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedLine {
    pub original_line: usize,
    pub text: String,
}

/// Produces the normalized line sequence consumed by the rolling-hash windower.
pub fn normalize(source: &str, language: Language) -> Vec<NormalizedLine> {
    let mut out = Vec::new();
    let mut in_python_docstring = false;
    let mut docstring_delim = "";
    let mut in_block_comment = false;
    let mut skip_import_continuation = false;

    for (idx, raw) in source.lines().enumerate() {
        let original_line = idx + 1;

        if in_block_comment {
            if raw.contains("*/") {
                in_block_comment = false;
            }
            continue;
        }

        let stripped = strip_line_comment(raw, language);
        let trimmed = stripped.trim();

        if matches!(language, Language::TypeScript | Language::JavaScript | Language::Css) {
            if trimmed.starts_with("/*") && !trimmed.contains("*/") {
                in_block_comment = true;
                continue;
            }
            if trimmed.starts_with("/*") && trimmed.contains("*/") {
                continue;
            }
        }

        if language == Language::Python {
            if in_python_docstring {
                if trimmed.contains(docstring_delim) {
                    in_python_docstring = false;
                }
                continue;
            }
            if (trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''"))
                && trimmed.len() >= 6
                && !trimmed[3..].contains(&trimmed[..3])
            {
                docstring_delim = &trimmed[..3];
                in_python_docstring = true;
                continue;
            }
            if (trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''")) && trimmed.len() >= 6 {
                // Single-line docstring (opens and closes on the same line).
                continue;
            }
        }

        if trimmed.is_empty() {
            continue;
        }

        if is_import_line(trimmed, language, &mut skip_import_continuation) {
            continue;
        }
        if skip_import_continuation {
            if trimmed.contains(')') {
                skip_import_continuation = false;
            }
            continue;
        }

        out.push(NormalizedLine {
            original_line,
            text: trimmed.to_string(),
        });
    }

    out
}

/// Strips a trailing same-line comment per language convention. Best-effort: does not track
/// string-literal state, matching the teacher's pragmatic text-level normalization rather
/// than a full lexer.
fn strip_line_comment(line: &str, language: Language) -> String {
    match language {
        Language::Python | Language::Bash => {
            if let Some(idx) = find_unquoted(line, '#') {
                line[..idx].to_string()
            } else {
                line.to_string()
            }
        }
        Language::TypeScript | Language::JavaScript | Language::Css => {
            if let Some(idx) = line.find("//") {
                if matches!(language, Language::TypeScript | Language::JavaScript) {
                    return line[..idx].to_string();
                }
            }
            line.to_string()
        }
        _ => line.to_string(),
    }
}

/// Finds the first occurrence of `ch` that isn't inside a single/double-quoted string.
fn find_unquoted(line: &str, ch: char) -> Option<usize> {
    let mut in_single = false;
    let mut in_double = false;
    for (i, c) in line.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            c if c == ch && !in_single && !in_double => return Some(i),
            _ => {}
        }
    }
    None
}

/// Recognizes Python `import`/`from ... import` and TypeScript `import`/`export ... from`
/// statements, including the opening line of a multi-line parenthesized Python import
/// (spec.md §4.6: "multi-line parenthesized imports").
fn is_import_line(trimmed: &str, language: Language, skip_continuation: &mut bool) -> bool {
    match language {
        Language::Python => {
            if trimmed.starts_with("import ") || trimmed.starts_with("from ") {
                *skip_continuation = trimmed.ends_with('(') && !trimmed.contains(')');
                return true;
            }
            false
        }
        Language::TypeScript | Language::JavaScript => {
            trimmed.starts_with("import ")
                || trimmed.starts_with("import{")
                || trimmed.starts_with("export ") && trimmed.contains(" from ")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_blank_lines_and_comments() {
        let src = "x = 1\n\n# a comment\ny = 2\n";
        let lines = normalize(src, Language::Python);
        assert_eq!(lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>(), vec!["x = 1", "y = 2"]);
    }

    #[test]
    fn strips_python_module_docstring() {
        let src = "\"\"\"\nModule doc.\n\"\"\"\nx = 1\n";
        let lines = normalize(src, Language::Python);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "x = 1");
    }

    #[test]
    fn strips_python_imports_including_parenthesized_continuation() {
        let src = "from foo import (\n    bar,\n    baz,\n)\nx = 1\n";
        let lines = normalize(src, Language::Python);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "x = 1");
    }

    #[test]
    fn strips_typescript_jsdoc_block_and_imports() {
        let src = "/**\n * Doc.\n */\nimport { foo } from \"bar\";\nconst x = 1;\n";
        let lines = normalize(src, Language::TypeScript);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "const x = 1;");
    }

    #[test]
    fn preserves_original_line_numbers_across_removed_lines() {
        let src = "# comment\nx = 1\n\ny = 2\n";
        let lines = normalize(src, Language::Python);
        assert_eq!(lines[0].original_line, 2);
        assert_eq!(lines[1].original_line, 4);
    }
}
