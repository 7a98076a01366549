use anyhow::{ensure, Result};
use burn::{
    module::Param,
    nn::{Embedding, EmbeddingConfig, Linear, LinearConfig},
    prelude::*,
    tensor::{activation::relu, TensorData},
};

use crate::domain::embedding::EmbeddingMatrix;

/// Anything that scores a batch of padded token-id sequences.
/// Output: one logit per review, shape [batch]. sigmoid(logit)
/// is the probability of a positive review.
pub trait SentimentModel<B: Backend> {
    fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 1>;
}

// ─── Embedding classifier ─────────────────────────────────────────────────────
// Embedding(vocab, dim) → flatten [batch, seq·dim] → Linear → ReLU → Linear(1)

#[derive(Config, Debug)]
pub struct EmbeddingClassifierConfig {
    pub vocab_size:    usize,
    pub max_len:       usize,
    pub embedding_dim: usize,
    #[config(default = 32)]
    pub hidden_size:   usize,
}

impl EmbeddingClassifierConfig {
    /// Randomly initialised embedding, learned from scratch.
    pub fn init<B: Backend>(&self, device: &B::Device) -> EmbeddingClassifier<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);
        self.build(embedding, device)
    }

    /// Embedding initialised from `matrix`. With `trainable = false`
    /// the optimiser never updates the embedding weights.
    pub fn init_with_weights<B: Backend>(
        &self,
        matrix:    &EmbeddingMatrix,
        trainable: bool,
        device:    &B::Device,
    ) -> Result<EmbeddingClassifier<B>> {
        ensure!(
            matrix.shape() == (self.vocab_size, self.embedding_dim),
            "Embedding matrix is {:?}, model expects ({}, {})",
            matrix.shape(), self.vocab_size, self.embedding_dim,
        );

        let data   = TensorData::new(matrix.as_slice().to_vec(), [matrix.rows(), matrix.dim()]);
        let weight = Tensor::<B, 2>::from_data(data, device);
        let embedding = Embedding { weight: Param::from_tensor(weight) };
        let embedding = if trainable { embedding } else { embedding.no_grad() };

        Ok(self.build(embedding, device))
    }

    fn build<B: Backend>(&self, embedding: Embedding<B>, device: &B::Device) -> EmbeddingClassifier<B> {
        let hidden = LinearConfig::new(self.max_len * self.embedding_dim, self.hidden_size).init(device);
        let output = LinearConfig::new(self.hidden_size, 1).init(device);
        EmbeddingClassifier { embedding, hidden, output }
    }
}

#[derive(Module, Debug)]
pub struct EmbeddingClassifier<B: Backend> {
    pub embedding: Embedding<B>,
    pub hidden:    Linear<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> SentimentModel<B> for EmbeddingClassifier<B> {
    /// token_ids: [batch, max_len] → logits: [batch]
    fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let [batch_size, seq_len] = token_ids.dims();
        let [_, dim] = self.embedding.weight.dims();

        let x = self.embedding.forward(token_ids);            // [batch, seq, dim]
        let x = x.reshape([batch_size, seq_len * dim]);
        let x = relu(self.hidden.forward(x));
        self.output.forward(x).reshape([batch_size])
    }
}

// ─── Multi-hot classifier ─────────────────────────────────────────────────────
// multi-hot(vocab) → Linear(16) → ReLU → Linear(16) → ReLU → Linear(1)

#[derive(Config, Debug)]
pub struct MultiHotClassifierConfig {
    pub vocab_size:  usize,
    #[config(default = 16)]
    pub hidden_size: usize,
}

impl MultiHotClassifierConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> MultiHotClassifier<B> {
        MultiHotClassifier {
            first:      LinearConfig::new(self.vocab_size, self.hidden_size).init(device),
            second:     LinearConfig::new(self.hidden_size, self.hidden_size).init(device),
            output:     LinearConfig::new(self.hidden_size, 1).init(device),
            vocab_size: self.vocab_size,
        }
    }
}

#[derive(Module, Debug)]
pub struct MultiHotClassifier<B: Backend> {
    pub first:      Linear<B>,
    pub second:     Linear<B>,
    pub output:     Linear<B>,
    pub vocab_size: usize,
}

impl<B: Backend> SentimentModel<B> for MultiHotClassifier<B> {
    fn forward(&self, token_ids: Tensor<B, 2, Int>) -> Tensor<B, 1> {
        let [batch_size, _] = token_ids.dims();
        let x = multi_hot(token_ids, self.vocab_size);
        let x = relu(self.first.forward(x));
        let x = relu(self.second.forward(x));
        self.output.forward(x).reshape([batch_size])
    }
}

/// [batch, seq] ids → [batch, dimension] 0/1 rows with a 1 at every
/// id present. Padding (id 0) is never set. Ids must be < dimension.
pub fn multi_hot<B: Backend>(token_ids: Tensor<B, 2, Int>, dimension: usize) -> Tensor<B, 2> {
    let [batch_size, seq_len] = token_ids.dims();
    let device = token_ids.device();

    // scatter sums, so repeated words count > 1 before clamping
    let ones   = Tensor::<B, 2>::ones([batch_size, seq_len], &device);
    let counts = Tensor::<B, 2>::zeros([batch_size, dimension], &device)
        .scatter(1, token_ids, ones);

    counts
        .clamp_max(1.0)
        .slice_assign([0..batch_size, 0..1], Tensor::zeros([batch_size, 1], &device))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn ids(rows: &[[i32; 4]]) -> Tensor<TestBackend, 2, Int> {
        let flat: Vec<i32> = rows.iter().flatten().copied().collect();
        Tensor::<TestBackend, 1, Int>::from_ints(flat.as_slice(), &Default::default())
            .reshape([rows.len(), 4])
    }

    #[test]
    fn test_embedding_classifier_output_shape() {
        let device = Default::default();
        let model: EmbeddingClassifier<TestBackend> =
            EmbeddingClassifierConfig::new(10, 4, 3).init(&device);
        let logits = model.forward(ids(&[[0, 0, 2, 3], [4, 5, 6, 7]]));
        assert_eq!(logits.dims(), [2]);
    }

    #[test]
    fn test_init_with_weights_copies_matrix() {
        let device = Default::default();
        let mut matrix = EmbeddingMatrix::zeros(3, 2);
        matrix.row_mut(1).copy_from_slice(&[0.5, -0.5]);
        matrix.row_mut(2).copy_from_slice(&[1.0, 2.0]);

        let model: EmbeddingClassifier<TestBackend> = EmbeddingClassifierConfig::new(3, 4, 2)
            .init_with_weights(&matrix, false, &device)
            .unwrap();

        let weights: Vec<f32> = model.embedding.weight.val().into_data().to_vec().unwrap();
        assert_eq!(weights, matrix.as_slice());
    }

    #[test]
    fn test_init_with_wrong_shape_fails() {
        let device = Default::default();
        let matrix = EmbeddingMatrix::zeros(5, 2);
        let result: Result<EmbeddingClassifier<TestBackend>> = EmbeddingClassifierConfig::new(3, 4, 2)
            .init_with_weights(&matrix, true, &device);
        assert!(result.is_err());
    }

    #[test]
    fn test_multi_hot_marks_present_ids_once() {
        let x = multi_hot(ids(&[[0, 2, 2, 3], [0, 0, 0, 4]]), 5);
        let values: Vec<f32> = x.into_data().to_vec().unwrap();
        assert_eq!(
            values,
            vec![
                0.0, 0.0, 1.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 0.0, 1.0,
            ]
        );
    }

    #[test]
    fn test_multi_hot_classifier_output_shape() {
        let device = Default::default();
        let model: MultiHotClassifier<TestBackend> = MultiHotClassifierConfig::new(8).init(&device);
        let logits = model.forward(ids(&[[0, 1, 2, 3], [4, 5, 6, 7], [0, 0, 0, 0]]));
        assert_eq!(logits.dims(), [3]);
    }
}
