// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams between layers. The application layer depends on
// these traits, never on concrete loaders or models:
//
//   ReviewSource       — anything that yields labelled reviews
//   VectorLookup       — anything that can answer "what is the
//                        pretrained vector for this word?"
//   SentimentPredictor — anything that scores a review text
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::collections::HashMap;

use anyhow::Result;
use crate::domain::review::Review;

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can load labelled reviews.
///
/// Implementations:
///   - ImdbLoader → reads the aclImdb directory layout
pub trait ReviewSource {
    fn load_all(&self) -> Result<Vec<Review>>;
}

// ─── VectorLookup ─────────────────────────────────────────────────────────────
/// Read-only word → vector table.
///
/// Returning `Option` forces callers to decide what an absent
/// word means. The embedding matrix builder maps it to a zero row.
pub trait VectorLookup {
    fn lookup(&self, word: &str) -> Option<&[f32]>;
}

impl VectorLookup for HashMap<String, Vec<f32>> {
    fn lookup(&self, word: &str) -> Option<&[f32]> {
        self.get(word).map(Vec::as_slice)
    }
}

// ─── SentimentPredictor ───────────────────────────────────────────────────────
/// Any component that can estimate how positive a review is.
///
/// Implementations:
///   - PredictUseCase → tokenizer + trained checkpoint
pub trait SentimentPredictor {
    /// Probability in [0, 1] that `text` is a positive review
    fn predict(&self, text: &str) -> Result<f32>;
}
