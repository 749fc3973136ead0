//! Rolling-hash windowing (spec.md §4.6): every contiguous window of `min_duplicate_lines`
//! normalized lines becomes one `CodeBlock`, hashed with a stable 64-bit hash.

use super::tokenizer::NormalizedLine;
use super::CodeBlock;

/// 64-bit hash of the concatenation of `lines`, stable across runs (spec.md §3: "two blocks
/// with equal hash_value are considered semantically identical duplicates"). Built on `blake3`
/// (already an optional dependency of the teacher repo) truncated to 64 bits — collision
/// probability is negligible at project scale, per spec.md §4.6.
pub fn hash_lines(lines: &[&str]) -> u64 {
    let joined = lines.join("\n");
    let digest = blake3::hash(joined.as_bytes());
    u64::from_le_bytes(digest.as_bytes()[0..8].try_into().unwrap())
}

/// Produces every contiguous window of `window_size` normalized lines as a `CodeBlock`.
/// Empty if the file has fewer than `window_size` normalized lines.
pub fn make_blocks(file_path: &str, normalized: &[NormalizedLine], window_size: usize) -> Vec<CodeBlock> {
    if window_size == 0 || normalized.len() < window_size {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(normalized.len() - window_size + 1);
    for start in 0..=(normalized.len() - window_size) {
        let slice = &normalized[start..start + window_size];
        let texts: Vec<&str> = slice.iter().map(|l| l.text.as_str()).collect();
        out.push(CodeBlock {
            file_path: file_path.to_string(),
            start_line: slice.first().unwrap().original_line,
            end_line: slice.last().unwrap().original_line,
            snippet: texts.join("\n"),
            hash_value: hash_lines(&texts),
        });
    }
    out
}
