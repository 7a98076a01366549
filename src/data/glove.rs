// ============================================================
// Layer 4 — Pretrained Vector Loader (GloVe text format)
// ============================================================
// Parses a GloVe style text file into a PretrainedVectors table.
//
// File format — one word per line, whitespace separated:
//   the 0.418 0.24968 -0.41242 0.1217 ...      (1 + D tokens)
//   ,   0.013441 0.23682 -0.16899 0.40951 ...
//
// A line is accepted only if it has exactly 1 + D tokens and
// every numeric token parses as f32. Anything else is skipped
// with a warning and the load carries on. Blank lines are
// skipped silently.
//
// The loader returns the table by value; nothing is cached in
// global state.
//
// Reference: Pennington et al. (2014) GloVe: Global Vectors
//            for Word Representation
//            Rust Book §9 (Recoverable Errors with Result)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use crate::domain::embedding::PretrainedVectors;
use crate::domain::error::EmbeddingError;

// Only the first few malformed lines are logged at warn level
const MAX_LINE_WARNINGS: usize = 5;

/// Loads pretrained vectors of a fixed dimension from disk.
pub struct GloveLoader {
    path:          PathBuf,
    embedding_dim: usize,
}

impl GloveLoader {
    pub fn new(path: impl Into<PathBuf>, embedding_dim: usize) -> Self {
        Self { path: path.into(), embedding_dim }
    }

    pub fn load(&self) -> Result<PretrainedVectors> {
        tracing::info!(
            "Loading {}-d pretrained vectors from '{}'",
            self.embedding_dim,
            self.path.display()
        );
        let file = File::open(&self.path)
            .with_context(|| format!("Cannot open vector file '{}'", self.path.display()))?;
        read_vectors(BufReader::new(file), self.embedding_dim)
            .with_context(|| format!("Cannot read vector file '{}'", self.path.display()))
    }
}

/// Parse every line of `reader`, skipping malformed ones.
pub fn read_vectors<R: BufRead>(reader: R, embedding_dim: usize) -> Result<PretrainedVectors> {
    if embedding_dim == 0 {
        return Err(EmbeddingError::invalid_argument(
            "embedding_dim",
            "must be greater than 0",
        )
        .into());
    }

    let mut vectors = PretrainedVectors::new(embedding_dim);
    let mut skipped = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(i + 1, &line, embedding_dim) {
            Ok((word, vector)) => {
                if vectors.insert(word, vector).is_some() {
                    tracing::debug!("Line {}: duplicate word replaces earlier vector", i + 1);
                }
            }
            Err(e) => {
                skipped += 1;
                if skipped <= MAX_LINE_WARNINGS {
                    tracing::warn!("Skipping: {}", e);
                } else {
                    tracing::debug!("Skipping: {}", e);
                }
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed vector lines", skipped);
    }
    tracing::info!("Loaded {} word vectors", vectors.len());
    Ok(vectors)
}

/// Parse one `<word> <f1> ... <fD>` line. `line_no` is 1-based.
pub fn parse_line(
    line_no:       usize,
    line:          &str,
    embedding_dim: usize,
) -> Result<(String, Vec<f32>), EmbeddingError> {
    let mut tokens = line.split_whitespace();
    let word = tokens
        .next()
        .ok_or_else(|| EmbeddingError::malformed_line(line_no, "empty line"))?;

    let values: Vec<&str> = tokens.collect();
    if values.len() != embedding_dim {
        return Err(EmbeddingError::malformed_line(
            line_no,
            format!(
                "expected {} tokens, found {}",
                embedding_dim + 1,
                values.len() + 1
            ),
        ));
    }

    let vector = values
        .iter()
        .map(|v| {
            v.parse::<f32>().map_err(|_| {
                EmbeddingError::malformed_line(line_no, format!("'{v}' is not a number"))
            })
        })
        .collect::<Result<Vec<f32>, _>>()?;

    Ok((word.to_string(), vector))
}
