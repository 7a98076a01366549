// ============================================================
// Layer 4 — Embedding Matrix Builder
// ============================================================
// Turns (vocabulary, pretrained vectors) into the dense matrix
// used as the initial weights of the embedding layer.
//
//   row 0              → always zeros ([PAD])
//   row i, word found  → exact copy of the pretrained vector
//   row i, word absent → zeros (out-of-vocabulary)
//   index ≥ cap        → ignored
//
// The whole build either succeeds or returns an error; a
// partially filled matrix is never handed back.

use std::collections::HashMap;

use crate::domain::embedding::EmbeddingMatrix;
use crate::domain::error::EmbeddingError;
use crate::domain::traits::VectorLookup;

/// Build a `vocabulary_cap × embedding_dim` matrix from a word
/// index and a pretrained table.
///
/// # Errors
/// * `InvalidArgument` — `vocabulary_cap` or `embedding_dim` is 0,
///   or two words share an index below the cap
/// * `DimensionMismatch` — a pretrained vector for an in-cap word
///   does not have `embedding_dim` components
pub fn build_embedding_matrix<V>(
    vocabulary_cap: usize,
    embedding_dim:  usize,
    word_index:     &HashMap<String, usize>,
    pretrained:     &V,
) -> Result<EmbeddingMatrix, EmbeddingError>
where
    V: VectorLookup + ?Sized,
{
    if vocabulary_cap == 0 {
        return Err(EmbeddingError::invalid_argument(
            "vocabulary_cap",
            "must be greater than 0",
        ));
    }
    if embedding_dim == 0 {
        return Err(EmbeddingError::invalid_argument(
            "embedding_dim",
            "must be greater than 0",
        ));
    }

    // In-cap entries in index order; index 0 is the padding
    // placeholder, never a real word
    let mut entries: Vec<(usize, &str)> = word_index
        .iter()
        .map(|(word, &index)| (index, word.as_str()))
        .filter(|&(index, _)| index > 0 && index < vocabulary_cap)
        .collect();
    entries.sort_unstable();

    // No row may be filled from two words
    if let Some(pair) = entries.windows(2).find(|pair| pair[0].0 == pair[1].0) {
        return Err(EmbeddingError::invalid_argument(
            "word_index",
            format!("'{}' and '{}' both map to index {}", pair[0].1, pair[1].1, pair[0].0),
        ));
    }

    let mut matrix  = EmbeddingMatrix::zeros(vocabulary_cap, embedding_dim);
    let mut found   = 0usize;
    let mut missing = 0usize;

    for (index, word) in entries {
        match pretrained.lookup(word) {
            Some(vector) => {
                if vector.len() != embedding_dim {
                    return Err(EmbeddingError::dimension_mismatch(
                        word,
                        embedding_dim,
                        vector.len(),
                    ));
                }
                matrix.row_mut(index).copy_from_slice(vector);
                found += 1;
            }
            None => missing += 1,
        }
    }

    tracing::info!(
        "Embedding matrix {}x{}: {} words with pretrained vectors, {} without",
        vocabulary_cap,
        embedding_dim,
        found,
        missing
    );
    Ok(matrix)
}
