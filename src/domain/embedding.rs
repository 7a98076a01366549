// ============================================================
// Layer 3 — Embedding Domain Types
// ============================================================
// Two plain data types:
//
//   PretrainedVectors — word → vector table parsed from a GloVe
//                       style text file. Immutable once loaded.
//
//   EmbeddingMatrix   — dense (rows × dim) f32 matrix, stored
//                       row-major in a single Vec. Row i holds
//                       the vector of the word with vocabulary
//                       index i. Handed to the ml layer as the
//                       initial weights of the embedding layer.
//
// Neither type knows about burn; conversion to a tensor lives
// in ml/model.rs.

use std::collections::HashMap;

use crate::domain::traits::VectorLookup;

/// Pretrained word vectors of a single fixed dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PretrainedVectors {
    dim:     usize,
    vectors: HashMap<String, Vec<f32>>,
}

impl PretrainedVectors {
    pub fn new(dim: usize) -> Self {
        Self { dim, vectors: HashMap::new() }
    }

    /// Insert a vector, replacing any earlier one for the same word.
    /// Returns the replaced vector.
    pub fn insert(&mut self, word: impl Into<String>, vector: Vec<f32>) -> Option<Vec<f32>> {
        self.vectors.insert(word.into(), vector)
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.vectors.get(word).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    /// Dimension every vector in this table is expected to have
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl VectorLookup for PretrainedVectors {
    fn lookup(&self, word: &str) -> Option<&[f32]> {
        self.get(word)
    }
}

/// Dense row-major matrix of embedding weights.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    rows: usize,
    dim:  usize,
    data: Vec<f32>,
}

impl EmbeddingMatrix {
    /// All-zero matrix of the given shape
    pub fn zeros(rows: usize, dim: usize) -> Self {
        Self { rows, dim, data: vec![0.0; rows * dim] }
    }

    /// (rows, dim)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.dim)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Panics if `i >= rows`, like slice indexing.
    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub(crate) fn row_mut(&mut self, i: usize) -> &mut [f32] {
        &mut self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Number of rows that hold at least one non-zero value
    pub fn populated_rows(&self) -> usize {
        (0..self.rows)
            .filter(|&i| self.row(i).iter().any(|&x| x != 0.0))
            .count()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_shape() {
        let m = EmbeddingMatrix::zeros(3, 4);
        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.as_slice().len(), 12);
        assert_eq!(m.populated_rows(), 0);
    }

    #[test]
    fn test_row_mut_writes_only_that_row() {
        let mut m = EmbeddingMatrix::zeros(3, 2);
        m.row_mut(1).copy_from_slice(&[1.0, 2.0]);
        assert_eq!(m.row(0), &[0.0, 0.0]);
        assert_eq!(m.row(1), &[1.0, 2.0]);
        assert_eq!(m.row(2), &[0.0, 0.0]);
        assert_eq!(m.populated_rows(), 1);
    }

    #[test]
    fn test_pretrained_lookup_is_optional() {
        let mut t = PretrainedVectors::new(2);
        t.insert("cat", vec![0.1, 0.2]);
        assert_eq!(t.lookup("cat"), Some(&[0.1f32, 0.2][..]));
        assert_eq!(t.lookup("dog"), None);
        assert_eq!(t.len(), 1);
    }
}
