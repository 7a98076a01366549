// ============================================================
// Layer 2 — GloVe Coverage Use Case
// ============================================================
// Answers "how much of my vocabulary does this vector file
// cover?" without training anything: builds the embedding
// matrix for the vocabulary saved by `train` and counts the
// rows that received a pretrained vector.

use anyhow::Result;

use crate::application::train_use_case::glove_matrix;
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub vocabulary_cap: usize,
    pub embedding_dim:  usize,
    /// Rows filled from the vector file
    pub covered:        usize,
}

impl CoverageReport {
    /// Covered fraction of the real-word rows (rows 0 and 1 are reserved)
    pub fn ratio(&self) -> f64 {
        let real_rows = self.vocabulary_cap.saturating_sub(2);
        if real_rows == 0 { 0.0 } else { self.covered as f64 / real_rows as f64 }
    }
}

pub fn glove_coverage(
    checkpoint_dir: &str,
    glove_path:     &str,
    embedding_dim:  usize,
) -> Result<CoverageReport> {
    let mut cfg = CheckpointManager::open(checkpoint_dir).load_config()?;
    cfg.glove_path    = Some(glove_path.to_string());
    cfg.embedding_dim = embedding_dim;

    let vocab  = TokenizerStore::new(checkpoint_dir).load_vocabulary(cfg.max_words)?;
    let matrix = glove_matrix(&cfg, &vocab)?;

    Ok(CoverageReport {
        vocabulary_cap: matrix.rows(),
        embedding_dim:  matrix.dim(),
        covered:        matrix.populated_rows(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::train_use_case::TrainConfig;
    use crate::domain::vocabulary::Vocabulary;

    #[test]
    fn test_ratio() {
        let r = CoverageReport { vocabulary_cap: 6, embedding_dim: 2, covered: 3 };
        assert!((r.ratio() - 0.75).abs() < 1e-9);
        let empty = CoverageReport { vocabulary_cap: 2, embedding_dim: 2, covered: 0 };
        assert_eq!(empty.ratio(), 0.0);
    }

    #[test]
    fn test_missing_checkpoint_dir_is_left_alone() {
        let dir = std::env::temp_dir()
            .join(format!("sentiment-coverage-missing-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let result = glove_coverage(&dir.to_string_lossy(), "glove.txt", 3);
        assert!(result.is_err());
        assert!(!dir.exists());
    }

    #[test]
    fn test_coverage_of_saved_vocabulary() {
        let dir = std::env::temp_dir()
            .join(format!("sentiment-coverage-{}", std::process::id()));
        let dir_str = dir.to_string_lossy().into_owned();

        let cfg = TrainConfig {
            checkpoint_dir: dir_str.clone(),
            max_words: 5,
            ..TrainConfig::default()
        };
        CheckpointManager::create(&dir_str).unwrap().save_config(&cfg).unwrap();
        let vocab = Vocabulary::from_ranked_words(["good", "film", "bad"], 5);
        TokenizerStore::new(&dir_str).save(&vocab).unwrap();

        let glove = dir.join("glove.txt");
        std::fs::write(&glove, "good 1 0 0\nbad 0 1 0\nugly 0 0 1\n").unwrap();

        let report = glove_coverage(&dir_str, &glove.to_string_lossy(), 3).unwrap();
        assert_eq!(report.vocabulary_cap, 5);
        assert_eq!(report.embedding_dim, 3);
        assert_eq!(report.covered, 2);

        std::fs::remove_dir_all(&dir).ok();
    }
}
