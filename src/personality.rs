use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sentiment::Sentiment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Personality {
    Curious,
    Optimist,
    Joker,
}

impl Personality {
    pub const ALL: [Personality; 3] = [
        Personality::Curious,
        Personality::Optimist,
        Personality::Joker,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Personality::Curious)
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Personality::Curious => write!(f, "Curious"),
            Personality::Optimist => write!(f, "Optimist"),
            Personality::Joker => write!(f, "Joker"),
        }
    }
}

/// Flavors a sentiment guess with the assistant's personality.
pub fn respond(sentiment: Sentiment, personality: Personality) -> String {
    match (sentiment, personality) {
        (Sentiment::Negative, Personality::Curious) => "You seem upset. What's wrong?".to_string(),
        (Sentiment::Negative, Personality::Optimist) => "Cheer up, it'll be okay!".to_string(),
        (Sentiment::Negative, Personality::Joker) => {
            "Feeling down? My jokes scare sadness away!".to_string()
        }
        (guess, Personality::Curious) => format!("{}. Why's that?", guess),
        (guess, Personality::Optimist) => format!("{}. Awesome!", guess),
        (guess, Personality::Joker) => format!("{}. Told you I'm smart!", guess),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_negative_replies() {
        assert_eq!(
            respond(Sentiment::Negative, Personality::Curious),
            "You seem upset. What's wrong?"
        );
        assert_eq!(
            respond(Sentiment::Negative, Personality::Optimist),
            "Cheer up, it'll be okay!"
        );
        assert_eq!(
            respond(Sentiment::Negative, Personality::Joker),
            "Feeling down? My jokes scare sadness away!"
        );
    }

    #[test]
    fn test_positive_and_neutral_replies_name_the_guess() {
        assert_eq!(respond(Sentiment::Positive, Personality::Curious), "Positive. Why's that?");
        assert_eq!(respond(Sentiment::Neutral, Personality::Optimist), "Neutral. Awesome!");
        assert_eq!(
            respond(Sentiment::Positive, Personality::Joker),
            "Positive. Told you I'm smart!"
        );
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let picks_a: Vec<_> = (0..10).map(|_| Personality::random(&mut a)).collect();
        let picks_b: Vec<_> = (0..10).map(|_| Personality::random(&mut b)).collect();
        assert_eq!(picks_a, picks_b);
    }

    #[test]
    fn test_serializes_as_name() {
        let json = serde_json::to_string(&Personality::Optimist).unwrap();
        assert_eq!(json, "\"Optimist\"");
    }
}
