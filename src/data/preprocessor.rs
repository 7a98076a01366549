// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans raw review text and splits it into word tokens.
//
// IMDB reviews were scraped from HTML, so they contain:
//   - Line breaks written as <br /> tags
//   - Mixed case ("Great", "GREAT", "great" should be one word)
//   - Punctuation glued to words ("film." / "film!")
//   - Stray control characters and non-breaking spaces
//
// Cleaning steps (applied in order):
//   1. Replace <br /> tags with a space
//   2. Lowercase
//   3. Replace control characters / Unicode spaces with a space
//   4. Collapse runs of whitespace into one space and trim
//
// Word splitting keeps letters, digits and apostrophes, so
// "don't" stays one token while "film." becomes "film".
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

pub struct Preprocessor;

impl Preprocessor {
    /// Create a new Preprocessor instance
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw review for downstream tokenisation.
    pub fn clean(&self, text: &str) -> String {

        // ── Step 1: Strip HTML line breaks ────────────────────────────────────
        let step1 = text
            .replace("<br />", " ")
            .replace("<br/>", " ")
            .replace("<br>", " ");

        // ── Step 2 + 3: Lowercase and normalise characters ───────────────────
        let step2: String = step1
            .to_lowercase()
            .chars()
            .map(|c| match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_control() => ' ',
                c => c,
            })
            .collect();

        // ── Step 4: Collapse whitespace ──────────────────────────────────────
        step2.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Clean `text` and split it into word tokens.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.clean(text)
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|w| w.trim_matches('\''))
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Implement Default so Preprocessor can be created with Preprocessor::default()
impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_html_breaks() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("Great film.<br /><br />Loved it"), "great film. loved it");
    }

    #[test]
    fn test_collapses_whitespace_and_trims() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("  hello \t\n  world  "), "hello world");
    }

    #[test]
    fn test_removes_control_chars() {
        let p = Preprocessor::new();
        assert_eq!(p.clean("hello\x01world"), "hello world");
    }

    #[test]
    fn test_words_split_punctuation_keep_apostrophes() {
        let p = Preprocessor::new();
        assert_eq!(
            p.words("I didn't like it... 'Boring', 10/10? No!"),
            vec!["i", "didn't", "like", "it", "boring", "10", "10", "no"]
        );
    }

    #[test]
    fn test_empty_string() {
        let p = Preprocessor::new();
        assert_eq!(p.clean(""), "");
        assert!(p.words("").is_empty());
    }
}
