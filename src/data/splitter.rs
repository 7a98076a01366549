// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Shuffles samples and holds out a fixed number of them for
// validation:
//
//   shuffled: [ v v v v ... v | t t t t t t ... t ]
//               validation      training (optionally capped)
//
// Capping the training set is how the "small data" experiment
// is run: with only a couple of hundred training reviews,
// pretrained GloVe vectors have a visible edge over embeddings
// learned from scratch.
//
// The shuffle is seeded so runs are reproducible.
//
// Reference: rand crate documentation (SliceRandom, StdRng)

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Shuffle `samples` and split into (train, validation).
///
/// * `validation_count` — size of the validation set (clamped to
///   the number of samples)
/// * `train_limit`      — keep at most this many training samples
/// * `seed`             — shuffle seed
pub fn split_holdout<T>(
    mut samples:      Vec<T>,
    validation_count: usize,
    train_limit:      Option<usize>,
    seed:             u64,
) -> (Vec<T>, Vec<T>) {
    let mut rng = StdRng::seed_from_u64(seed);
    samples.shuffle(&mut rng);

    let total   = samples.len();
    let val_len = validation_count.min(total);

    // split_off(n) leaves [0..n] in place and returns [n..]
    let mut train = samples.split_off(val_len);
    let val       = samples;

    if let Some(limit) = train_limit {
        train.truncate(limit);
    }

    tracing::debug!(
        "Dataset split: {} training, {} validation (of {})",
        train.len(),
        val.len(),
        total,
    );

    (train, val)
}
