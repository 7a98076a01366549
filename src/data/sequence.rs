// ============================================================
// Layer 4 — Sequence Padding
// ============================================================
// The embedding classifier flattens its input, so every review
// must become a sequence of exactly `max_len` token ids.
//
//   too long  → keep the LAST max_len ids (the end of a review
//               usually carries the verdict)
//   too short → left-pad with 0 ([PAD])
//
// Example with max_len = 5:
//   [7, 8, 9]             → [0, 0, 7, 8, 9]
//   [1, 2, 3, 4, 5, 6, 7] → [3, 4, 5, 6, 7]

use crate::domain::vocabulary::PAD_ID;

pub fn pad_sequence(ids: &[u32], max_len: usize) -> Vec<u32> {
    let kept = &ids[ids.len().saturating_sub(max_len)..];
    let mut out = vec![PAD_ID as u32; max_len - kept.len()];
    out.extend_from_slice(kept);
    out
}
