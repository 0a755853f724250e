//! Sentiment polarity for free-text posts.
//!
//! Production deployments plug an NLP service in behind [`SentimentScorer`]. The bundled
//! [`LexiconSentimentScorer`] averages the polarity of known words, flipping and damping
//! a word preceded by a negator and amplifying one preceded by an intensifier.

/// Failure reported by a sentiment backend.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    #[error("sentiment backend unavailable: {0}")]
    Unavailable(String),
    #[error("sentiment backend returned a non-finite polarity for {0:?}")]
    NonFinite(String),
}

/// Polarity in `[-1, 1]` for a single text.
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError>;
}

const LEXICON: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("delighted", 0.7),
    ("excellent", 1.0),
    ("excited", 0.375),
    ("fantastic", 0.4),
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("love", 0.5),
    ("new", 0.136),
    ("proud", 0.8),
    ("success", 0.3),
    ("successful", 0.75),
    ("thank", 0.2),
    ("thanks", 0.2),
    ("thrilled", 0.6),
    ("wonderful", 1.0),
    ("angry", -0.5),
    ("awful", -1.0),
    ("bad", -0.7),
    ("broken", -0.4),
    ("complaint", -0.3),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("fail", -0.5),
    ("failed", -0.5),
    ("horrible", -1.0),
    ("late", -0.3),
    ("loss", -0.4),
    ("poor", -0.4),
    ("refund", -0.2),
    ("rude", -0.3),
    ("sad", -0.5),
    ("slow", -0.3),
    ("terrible", -1.0),
    ("worst", -1.0),
];

const NEGATORS: &[&str] = &["not", "no", "never", "dont", "didnt", "isnt", "wasnt", "cant"];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("so", 1.2),
];

const NEGATION_FACTOR: f64 = -0.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconSentimentScorer;

impl LexiconSentimentScorer {
    fn word_polarity(word: &str) -> Option<f64> {
        LEXICON
            .iter()
            .find(|(entry, _)| *entry == word)
            .map(|(_, polarity)| *polarity)
    }

    fn intensity(word: &str) -> Option<f64> {
        INTENSIFIERS
            .iter()
            .find(|(entry, _)| *entry == word)
            .map(|(_, factor)| *factor)
    }
}

impl SentimentScorer for LexiconSentimentScorer {
    fn polarity(&self, text: &str) -> Result<f64, SentimentError> {
        let words: Vec<String> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|word| !word.is_empty())
            .map(|word| word.replace('\'', "").to_lowercase())
            .collect();

        let mut scored = Vec::new();
        let mut modifier = 1.0;
        for word in &words {
            if NEGATORS.contains(&word.as_str()) {
                modifier *= NEGATION_FACTOR;
                continue;
            }
            if let Some(factor) = Self::intensity(word) {
                modifier *= factor;
                continue;
            }
            if let Some(polarity) = Self::word_polarity(word) {
                scored.push((polarity * modifier).clamp(-1.0, 1.0));
            }
            modifier = 1.0;
        }

        if scored.is_empty() {
            return Ok(0.0);
        }

        Ok(scored.iter().sum::<f64>() / scored.len() as f64)
    }
}
