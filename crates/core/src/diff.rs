//! Chunk planning and per-chunk line diffing for the text-diff tool.
//!
//! The shell drives an explicit cooperative loop: plan the fixed-size line
//! ranges up front (with the total-size bound enforced before any work
//! starts), then diff one chunk at a time, reporting progress and checking
//! for cancellation at each chunk boundary.

use serde::Serialize;

use crate::error::Error;

pub const DEFAULT_CHUNK_LINES: usize = 1000;
pub const DEFAULT_MAX_LINES: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTag {
    Equal,
    Added,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub tag: ChangeTag,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

/// Split the work into fixed-size line ranges.
///
/// The upper bound is enforced here, before any diffing begins.
pub fn plan(
    left_lines: usize,
    right_lines: usize,
    max_lines: usize,
    chunk_lines: usize,
) -> Result<Vec<ChunkRange>, Error> {
    if chunk_lines == 0 {
        return Err(Error::Validation(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    let longest = left_lines.max(right_lines);
    if longest > max_lines {
        return Err(Error::LimitExceeded(format!(
            "{longest} lines exceeds the {max_lines} line limit"
        )));
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < longest {
        let end = (start + chunk_lines).min(longest);
        ranges.push(ChunkRange { start, end });
        start = end;
    }
    Ok(ranges)
}

/// Diff one planned line range. Pure and synchronous; the cooperative
/// yielding between chunks belongs to the caller.
pub fn diff_chunk(left: &[&str], right: &[&str], range: ChunkRange) -> Vec<DiffLine> {
    let left_slice = &left[range.start.min(left.len())..range.end.min(left.len())];
    let right_slice = &right[range.start.min(right.len())..range.end.min(right.len())];
    diff_lines(left_slice, right_slice)
}

/// Classic LCS line diff over two slices.
fn diff_lines(left: &[&str], right: &[&str]) -> Vec<DiffLine> {
    let n = left.len();
    let m = right.len();
    let mut table = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i][j] = if left[i] == right[j] {
                table[i + 1][j + 1] + 1
            } else {
                table[i + 1][j].max(table[i][j + 1])
            };
        }
    }

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if left[i] == right[j] {
            ops.push(DiffLine {
                tag: ChangeTag::Equal,
                text: left[i].to_string(),
            });
            i += 1;
            j += 1;
        } else if table[i + 1][j] >= table[i][j + 1] {
            ops.push(DiffLine {
                tag: ChangeTag::Removed,
                text: left[i].to_string(),
            });
            i += 1;
        } else {
            ops.push(DiffLine {
                tag: ChangeTag::Added,
                text: right[j].to_string(),
            });
            j += 1;
        }
    }
    while i < n {
        ops.push(DiffLine {
            tag: ChangeTag::Removed,
            text: left[i].to_string(),
        });
        i += 1;
    }
    while j < m {
        ops.push(DiffLine {
            tag: ChangeTag::Added,
            text: right[j].to_string(),
        });
        j += 1;
    }
    ops
}

pub fn summarize(lines: &[DiffLine]) -> DiffSummary {
    let mut summary = DiffSummary::default();
    for line in lines {
        match line.tag {
            ChangeTag::Added => summary.added += 1,
            ChangeTag::Removed => summary.removed += 1,
            ChangeTag::Equal => summary.unchanged += 1,
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_fixed_size_ranges() {
        let ranges = plan(2500, 100, 10_000, 1000).unwrap();
        assert_eq!(
            ranges,
            vec![
                ChunkRange { start: 0, end: 1000 },
                ChunkRange { start: 1000, end: 2000 },
                ChunkRange { start: 2000, end: 2500 },
            ]
        );
    }

    #[test]
    fn test_plan_empty_inputs() {
        assert!(plan(0, 0, 10_000, 1000).unwrap().is_empty());
    }

    #[test]
    fn test_plan_enforces_line_limit_up_front() {
        let result = plan(10_001, 5, 10_000, 1000);
        assert!(matches!(result, Err(Error::LimitExceeded(_))));
    }

    #[test]
    fn test_plan_rejects_zero_chunk_size() {
        assert!(matches!(plan(10, 10, 100, 0), Err(Error::Validation(_))));
    }

    #[test]
    fn test_diff_equal_lines() {
        let lines = diff_chunk(&["a", "b"], &["a", "b"], ChunkRange { start: 0, end: 2 });
        assert!(lines.iter().all(|l| l.tag == ChangeTag::Equal));
    }

    #[test]
    fn test_diff_addition_and_removal() {
        let lines = diff_chunk(
            &["a", "b", "c"],
            &["a", "x", "c"],
            ChunkRange { start: 0, end: 3 },
        );
        assert_eq!(
            lines,
            vec![
                DiffLine { tag: ChangeTag::Equal, text: "a".to_string() },
                DiffLine { tag: ChangeTag::Removed, text: "b".to_string() },
                DiffLine { tag: ChangeTag::Added, text: "x".to_string() },
                DiffLine { tag: ChangeTag::Equal, text: "c".to_string() },
            ]
        );
    }

    #[test]
    fn test_diff_uneven_lengths() {
        let lines = diff_chunk(&["a"], &["a", "b", "c"], ChunkRange { start: 0, end: 3 });
        let summary = summarize(&lines);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.removed, 0);
    }

    #[test]
    fn test_chunk_range_clamps_to_slice_bounds() {
        let lines = diff_chunk(&["a"], &[], ChunkRange { start: 0, end: 1000 });
        assert_eq!(
            lines,
            vec![DiffLine { tag: ChangeTag::Removed, text: "a".to_string() }]
        );
    }

    #[test]
    fn test_summarize_counts() {
        let lines = vec![
            DiffLine { tag: ChangeTag::Added, text: "x".to_string() },
            DiffLine { tag: ChangeTag::Added, text: "y".to_string() },
            DiffLine { tag: ChangeTag::Equal, text: "z".to_string() },
        ];
        let summary = summarize(&lines);
        assert_eq!(summary.added, 2);
        assert_eq!(summary.unchanged, 1);
    }
}
