//! Cross-file aggregation (spec.md §4.6): buckets every `CodeBlock` by `hash_value`; a bucket
//! with ≥ `min_occurrences` blocks yields one violation per block, with overlapping windows
//! inside one file sharing a hash coalesced to a single violation per file per bucket.

use super::CodeBlock;
use itertools::Itertools;

/// One duplicate-code group: every `CodeBlock` sharing a hash value, already coalesced so at
/// most one block per file remains per group (spec.md §4.6).
pub struct DuplicateGroup {
    pub blocks: Vec<CodeBlock>,
}

/// Buckets `blocks` by hash, keeps only buckets meeting `min_occurrences` (counted on the raw,
/// pre-coalesced block count, per spec.md: "A bucket with ≥ min_occurrences blocks ... yields
/// one violation per block"), then coalesces same-file overlapping windows for reporting.
pub fn aggregate(blocks: Vec<CodeBlock>, min_occurrences: usize) -> Vec<DuplicateGroup> {
    let by_hash = blocks.into_iter().into_group_map_by(|block| block.hash_value);

    let mut groups: Vec<DuplicateGroup> = by_hash
        .into_values()
        .filter(|blocks| blocks.len() >= min_occurrences)
        .map(|mut blocks| {
            blocks.sort_by(|a, b| a.file_path.cmp(&b.file_path).then(a.start_line.cmp(&b.start_line)));
            DuplicateGroup {
                blocks: coalesce_same_file(blocks),
            }
        })
        .filter(|g| g.blocks.len() >= min_occurrences)
        .collect();

    groups.sort_by(|a, b| {
        let first_a = a.blocks.first().map(|b| (b.file_path.clone(), b.start_line));
        let first_b = b.blocks.first().map(|b| (b.file_path.clone(), b.start_line));
        first_a.cmp(&first_b)
    });
    groups
}

/// Drops later blocks from the same file whose line range overlaps (inclusive) a block already
/// kept for that file in this group, per spec.md §4.6: "Overlapping windows within one file
/// that share the same hash are coalesced to one violation per file per bucket."
fn coalesce_same_file(blocks: Vec<CodeBlock>) -> Vec<CodeBlock> {
    let mut out: Vec<CodeBlock> = Vec::new();
    for block in blocks {
        let overlaps_existing = out
            .iter()
            .any(|kept| kept.file_path == block.file_path && ranges_overlap(kept, &block));
        if !overlaps_existing {
            out.push(block);
        }
    }
    out
}

fn ranges_overlap(a: &CodeBlock, b: &CodeBlock) -> bool {
    a.start_line <= b.end_line && b.start_line <= a.end_line
}
