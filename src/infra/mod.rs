// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting persistence concerns:
//
//   checkpoint.rs      — Model weights (full-precision MessagePack) and
//                        the TrainConfig JSON needed to rebuild
//                        the model for prediction.
//
//   tokenizer_store.rs — Writes the vocabulary as a WordLevel
//                        tokenizer.json and loads it back, so
//                        training and prediction share one
//                        word → id table.
//
//   metrics.rs         — Per-epoch loss / accuracy CSV, the
//                        source for accuracy and loss curves.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Tokenizer saving and loading
pub mod tokenizer_store;

/// Training metrics CSV logger
pub mod metrics;
