// ============================================================
// Layer 4 — Review Loader
// ============================================================
// Loads labelled reviews from the aclImdb directory layout:
//
//   aclImdb/
//     train/
//       pos/   0_9.txt  1_7.txt ...   ← label 1
//       neg/   0_3.txt  1_1.txt ...   ← label 0
//       unsup/ ...                     ← ignored (no label)
//     test/
//       pos/ ...
//       neg/ ...
//
// An ImdbLoader is pointed at ONE split directory (train or
// test). Files are read in sorted order so a run is repeatable
// regardless of the order the filesystem returns entries in.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};

use crate::domain::review::{Review, Sentiment};
use crate::domain::traits::ReviewSource;

/// Loads all reviews of one split (e.g. `aclImdb/train`).
pub struct ImdbLoader {
    dir: String,
}

impl ImdbLoader {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReviewSource for ImdbLoader {
    fn load_all(&self) -> Result<Vec<Review>> {
        let dir = Path::new(&self.dir);

        // Missing directory → empty corpus rather than a crash
        if !dir.exists() {
            tracing::warn!(
                "Reviews directory '{}' does not exist — returning empty corpus",
                self.dir
            );
            return Ok(Vec::new());
        }

        let mut reviews = Vec::new();

        for label_dir in ["neg", "pos"] {
            let Some(sentiment) = Sentiment::from_dir_name(label_dir) else {
                continue;
            };
            let path = dir.join(label_dir);
            if !path.is_dir() {
                tracing::warn!("No '{}' directory under '{}'", label_dir, self.dir);
                continue;
            }

            for file in list_text_files(&path)? {
                match fs::read_to_string(&file) {
                    Ok(text) => {
                        let source = file
                            .file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("unknown")
                            .to_string();
                        reviews.push(Review::new(source, text, sentiment));
                    }
                    // Log a warning but continue — don't fail on one bad file
                    Err(e) => {
                        tracing::warn!("Skipping '{}': {}", file.display(), e);
                    }
                }
            }
        }

        tracing::info!("Loaded {} reviews from '{}'", reviews.len(), self.dir);
        Ok(reviews)
    }
}

/// Every `*.txt` file directly inside `dir`, sorted by path.
fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?
    {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("sentiment-loader-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_loads_labelled_reviews() {
        let root = scratch_dir("labels");
        fs::create_dir_all(root.join("pos")).unwrap();
        fs::create_dir_all(root.join("neg")).unwrap();
        fs::create_dir_all(root.join("unsup")).unwrap();
        fs::write(root.join("pos/0_9.txt"), "A wonderful film.").unwrap();
        fs::write(root.join("neg/0_1.txt"), "Dreadful.").unwrap();
        fs::write(root.join("neg/notes.md"), "not a review").unwrap();
        fs::write(root.join("unsup/0_0.txt"), "unlabelled").unwrap();

        let reviews = ImdbLoader::new(root.to_string_lossy()).load_all().unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].sentiment, Sentiment::Negative);
        assert_eq!(reviews[0].source, "0_1.txt");
        assert_eq!(reviews[1].sentiment, Sentiment::Positive);
        assert_eq!(reviews[1].text, "A wonderful film.");

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_missing_dir_is_empty() {
        let reviews = ImdbLoader::new("/definitely/not/here/aclImdb/train")
            .load_all()
            .unwrap();
        assert!(reviews.is_empty());
    }
}
