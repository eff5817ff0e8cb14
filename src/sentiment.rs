use std::fmt;

use crate::error::Result;

const POSITIVE_WORDS: [&str; 4] = ["good", "fun", "happy", "love"];
const NEGATIVE_WORDS: [&str; 3] = ["sad", "bad", "angry"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Negative => write!(f, "Negative"),
            Sentiment::Neutral => write!(f, "Neutral"),
        }
    }
}

/// External two-class sentiment model. Index 0 scores Negative, index 1 Positive.
pub trait SentimentModel: Send + Sync {
    fn scores(&self, text: &str) -> Result<[f32; 2]>;

    /// Training hook. The bundled models cannot learn on-device, so the
    /// default only records the sample.
    fn train(&self, text: &str, label: u8) {
        tracing::info!("Training stub: text={:?}, label={}", text, label);
    }
}

pub struct SentimentClassifier {
    model: Option<Box<dyn SentimentModel>>,
}

impl SentimentClassifier {
    pub fn keyword_only() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Box<dyn SentimentModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn classify(&self, text: &str) -> Sentiment {
        if let Some(model) = &self.model {
            match model.scores(&text.to_lowercase()) {
                Ok([negative, positive]) => {
                    return if positive > negative {
                        Sentiment::Positive
                    } else {
                        Sentiment::Negative
                    };
                }
                Err(e) => {
                    tracing::warn!("Sentiment model failed, using keywords: {}", e);
                }
            }
        }

        keyword_sentiment(text)
    }

    /// Feeds the user's verdict on a guess back to the model, if there is one.
    pub fn record_feedback(&self, text: &str, guessed: Sentiment, was_correct: bool) {
        let Some(model) = &self.model else {
            return;
        };

        let guessed_positive = guessed == Sentiment::Positive;
        let label = if guessed_positive == was_correct { 1 } else { 0 };
        model.train(text, label);
    }
}

impl Default for SentimentClassifier {
    fn default() -> Self {
        Self::keyword_only()
    }
}

/// Case-insensitive substring match against the keyword lists on raw text.
/// Positive words win ties.
pub fn keyword_sentiment(text: &str) -> Sentiment {
    let text_lower = text.to_lowercase();

    if POSITIVE_WORDS.iter().any(|word| text_lower.contains(word)) {
        Sentiment::Positive
    } else if NEGATIVE_WORDS.iter().any(|word| text_lower.contains(word)) {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SovenError;
    use std::sync::{Arc, Mutex};

    struct FixedModel([f32; 2]);

    impl SentimentModel for FixedModel {
        fn scores(&self, _text: &str) -> Result<[f32; 2]> {
            Ok(self.0)
        }
    }

    struct BrokenModel;

    impl SentimentModel for BrokenModel {
        fn scores(&self, _text: &str) -> Result<[f32; 2]> {
            Err(SovenError::Classifier("interpreter not loaded".to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingModel {
        seen: Arc<Mutex<Vec<(String, u8)>>>,
    }

    impl SentimentModel for RecordingModel {
        fn scores(&self, _text: &str) -> Result<[f32; 2]> {
            Ok([0.0, 1.0])
        }

        fn train(&self, text: &str, label: u8) {
            self.seen.lock().unwrap().push((text.to_string(), label));
        }
    }

    #[test]
    fn test_keyword_sentiment() {
        assert_eq!(keyword_sentiment("I am happy today"), Sentiment::Positive);
        assert_eq!(keyword_sentiment("This is BAD"), Sentiment::Negative);
        assert_eq!(keyword_sentiment("The weather"), Sentiment::Neutral);
    }

    #[test]
    fn test_keywords_match_substrings() {
        // "goodbye" contains "good", "badge" contains "bad"
        assert_eq!(keyword_sentiment("goodbye"), Sentiment::Positive);
        assert_eq!(keyword_sentiment("a shiny badge"), Sentiment::Negative);
    }

    #[test]
    fn test_positive_checked_before_negative() {
        assert_eq!(keyword_sentiment("sad but fun"), Sentiment::Positive);
    }

    #[test]
    fn test_model_never_yields_neutral() {
        let classifier = SentimentClassifier::with_model(Box::new(FixedModel([0.9, 0.1])));
        assert_eq!(classifier.classify("the weather"), Sentiment::Negative);

        let classifier = SentimentClassifier::with_model(Box::new(FixedModel([0.2, 0.8])));
        assert_eq!(classifier.classify("I am sad"), Sentiment::Positive);
    }

    #[test]
    fn test_model_failure_falls_back_to_keywords() {
        let classifier = SentimentClassifier::with_model(Box::new(BrokenModel));
        assert_eq!(classifier.classify("so much fun"), Sentiment::Positive);
        assert_eq!(classifier.classify("nothing here"), Sentiment::Neutral);
    }

    struct LoweredTextModel {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl SentimentModel for LoweredTextModel {
        fn scores(&self, text: &str) -> Result<[f32; 2]> {
            self.seen.lock().unwrap().push(text.to_string());
            Err(SovenError::Classifier("no output tensor".to_string()))
        }
    }

    #[test]
    fn test_classify_mixed_case_without_model() {
        let classifier = SentimentClassifier::keyword_only();
        assert_eq!(classifier.classify("I LOVE chess"), Sentiment::Positive);
        assert_eq!(classifier.classify("So Angry"), Sentiment::Negative);
    }

    #[test]
    fn test_model_sees_lowercased_text() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let classifier = SentimentClassifier::with_model(Box::new(LoweredTextModel {
            seen: seen.clone(),
        }));

        assert_eq!(classifier.classify("What a GOOD day"), Sentiment::Positive);
        assert_eq!(*seen.lock().unwrap(), vec!["what a good day".to_string()]);
    }

    #[test]
    fn test_feedback_labels() {
        let model = RecordingModel::default();
        let seen = model.seen.clone();
        let classifier = SentimentClassifier::with_model(Box::new(model));

        classifier.record_feedback("a", Sentiment::Positive, true);
        classifier.record_feedback("b", Sentiment::Positive, false);
        classifier.record_feedback("c", Sentiment::Negative, true);
        classifier.record_feedback("d", Sentiment::Neutral, false);

        let seen = seen.lock().unwrap();
        let labels: Vec<u8> = seen.iter().map(|(_, label)| *label).collect();
        assert_eq!(labels, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_feedback_without_model_is_ignored() {
        let classifier = SentimentClassifier::keyword_only();
        classifier.record_feedback("text", Sentiment::Positive, true);
    }
}
