// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw review files to tensor batches, plus the
// pretrained-vector side of the pipeline.
//
//   aclImdb/*/{pos,neg}/*.txt        glove.6B.100d.txt
//       │                                  │
//       ▼                                  ▼
//   ImdbLoader                         GloveLoader
//       │                                  │
//       ▼                                  │
//   Preprocessor → build_vocabulary ──┐    │
//       │                             ▼    ▼
//       │                   build_embedding_matrix
//       ▼
//   ReviewEncoder (tokenize, cap, pad)
//       │
//       ▼
//   split_holdout → ReviewDataset → ReviewBatcher → DataLoader
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Loads labelled reviews from the aclImdb layout
pub mod loader;

/// Cleans review text and splits it into words
pub mod preprocessor;

/// Frequency-ranked vocabulary construction
pub mod vocab_builder;

/// Pre-padding / pre-truncation of token sequences
pub mod sequence;

/// Text → padded token ids
pub mod encoder;

/// GloVe text-format parser
pub mod glove;

/// Vocabulary + pretrained vectors → embedding matrix
pub mod embedding_matrix;

/// Implements Burn's Dataset trait for encoded reviews
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Seeded shuffle and train/validation hold-out
pub mod splitter;
