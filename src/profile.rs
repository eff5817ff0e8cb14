use serde::{Deserialize, Serialize};

use crate::personality::Personality;

/// Most recent turns kept in `AssistantProfile::dialogue`.
pub const DIALOGUE_LIMIT: usize = 20;

pub const LESSON_KIND: &str = "Lesson";

/// Stored as `[term, meaning, kind]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Lesson {
    pub term: String,
    pub meaning: String,
    pub kind: String,
}

impl Lesson {
    pub fn new(term: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            meaning: meaning.into(),
            kind: LESSON_KIND.to_string(),
        }
    }
}

impl From<(String, String, String)> for Lesson {
    fn from((term, meaning, kind): (String, String, String)) -> Self {
        Self { term, meaning, kind }
    }
}

impl From<Lesson> for (String, String, String) {
    fn from(lesson: Lesson) -> Self {
        (lesson.term, lesson.meaning, lesson.kind)
    }
}

/// Stored as `[utterance, reply]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct DialogueTurn {
    pub utterance: String,
    pub reply: String,
}

impl From<(String, String)> for DialogueTurn {
    fn from((utterance, reply): (String, String)) -> Self {
        Self { utterance, reply }
    }
}

impl From<DialogueTurn> for (String, String) {
    fn from(turn: DialogueTurn) -> Self {
        (turn.utterance, turn.reply)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantProfile {
    pub assistant_name: String,
    pub interests: String,
    pub points: u64,
    pub experience: Vec<Lesson>,
    pub dialogue: Vec<DialogueTurn>,
    pub personality: Personality,
}

impl AssistantProfile {
    pub fn new(
        assistant_name: impl Into<String>,
        interests: impl Into<String>,
        personality: Personality,
    ) -> Self {
        Self {
            assistant_name: assistant_name.into(),
            interests: interests.into(),
            points: 0,
            experience: Vec::new(),
            dialogue: Vec::new(),
            personality,
        }
    }

    pub fn award(&mut self, points: u64) {
        self.points = self.points.saturating_add(points);
    }

    pub fn add_lesson(&mut self, lesson: Lesson) {
        self.experience.push(lesson);
    }

    /// Appends a turn, dropping the oldest ones past `DIALOGUE_LIMIT`.
    pub fn record_turn(&mut self, utterance: impl Into<String>, reply: impl Into<String>) {
        self.dialogue.push(DialogueTurn {
            utterance: utterance.into(),
            reply: reply.into(),
        });

        if self.dialogue.len() > DIALOGUE_LIMIT {
            let overflow = self.dialogue.len() - DIALOGUE_LIMIT;
            self.dialogue.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_empty() {
        let profile = AssistantProfile::new("Rex", "chess", Personality::Joker);
        assert_eq!(profile.points, 0);
        assert!(profile.experience.is_empty());
        assert!(profile.dialogue.is_empty());
    }

    #[test]
    fn test_dialogue_keeps_most_recent_turns_in_order() {
        let mut profile = AssistantProfile::new("Rex", "chess", Personality::Curious);
        for i in 0..25 {
            profile.record_turn(format!("u{}", i), format!("r{}", i));
            assert!(profile.dialogue.len() <= DIALOGUE_LIMIT);
        }

        assert_eq!(profile.dialogue.len(), DIALOGUE_LIMIT);
        let utterances: Vec<_> = profile.dialogue.iter().map(|t| t.utterance.as_str()).collect();
        let expected: Vec<String> = (5..25).map(|i| format!("u{}", i)).collect();
        assert_eq!(utterances, expected);
    }

    #[test]
    fn test_record_format() {
        let mut profile = AssistantProfile::new("Rex", "chess", Personality::Optimist);
        profile.add_lesson(Lesson::new("кот", "животное"));
        profile.record_turn("hi", "Rex: Thanks, I'm learning!");
        profile.award(15);

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "assistant_name": "Rex",
                "interests": "chess",
                "points": 15,
                "experience": [["кот", "животное", "Lesson"]],
                "dialogue": [["hi", "Rex: Thanks, I'm learning!"]],
                "personality": "Optimist"
            })
        );
    }

    #[test]
    fn test_parses_written_record() {
        let raw = r#"{
            "assistant_name": "Tom",
            "interests": "cooking",
            "points": 40,
            "experience": [["pan", "a tool", "Lesson"]],
            "dialogue": [],
            "personality": "Curious"
        }"#;

        let profile: AssistantProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.experience[0], Lesson::new("pan", "a tool"));
        assert_eq!(profile.personality, Personality::Curious);
    }
}
