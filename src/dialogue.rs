use crate::personality;
use crate::profile::{AssistantProfile, Lesson};
use crate::sentiment::Sentiment;
use crate::storage::StorageHandle;

/// "X — это Y" teaches the assistant that X is Y.
pub const TEACH_SEPARATOR: &str = "— это";
pub const LESSON_POINTS: u64 = 10;
pub const CONFIRMED_POINTS: u64 = 5;
pub const CORRECTED_POINTS: u64 = 10;

/// A conversational turn whose mood guess has not been confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub utterance: String,
    pub sentiment: Sentiment,
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    AwaitingUtterance,
    AwaitingMoodFeedback(PendingTurn),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeachResult {
    pub term: String,
    pub meaning: String,
    pub reply: String,
    pub points: u64,
}

/// Returned to the shell, which must answer with `resolve_mood_feedback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMoodFeedback {
    pub utterance: String,
    pub sentiment: Sentiment,
    pub reply: String,
    pub help_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Taught(TeachResult),
    AwaitingFeedback(PendingMoodFeedback),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedTurn {
    pub utterance: String,
    pub reply: String,
    pub was_correct: bool,
    pub points: u64,
}

/// Splits a teaching utterance on the first separator. Both halves are trimmed.
pub fn parse_lesson(utterance: &str) -> Option<(String, String)> {
    let (term, meaning) = utterance.split_once(TEACH_SEPARATOR)?;
    Some((term.trim().to_string(), meaning.trim().to_string()))
}

/// The logged-in assistant and where its current turn stands.
///
/// Methods that change the profile return an updated copy; the caller
/// persists it and only then calls `commit`, so a failed save leaves the
/// session untouched.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub assistant_name: String,
    pub profile: AssistantProfile,
    pub state: TurnState,
    pub last_handle: Option<StorageHandle>,
}

impl Session {
    pub fn new(username: impl Into<String>, profile: AssistantProfile) -> Self {
        Self {
            username: username.into(),
            assistant_name: profile.assistant_name.clone(),
            profile,
            state: TurnState::AwaitingUtterance,
            last_handle: None,
        }
    }

    pub fn greeting(&self) -> String {
        format!("Hi! I'm {}, your AI assistant.", self.assistant_name)
    }

    pub fn pending(&self) -> Option<&PendingTurn> {
        match &self.state {
            TurnState::AwaitingMoodFeedback(pending) => Some(pending),
            TurnState::AwaitingUtterance => None,
        }
    }

    pub fn teach(&self, term: &str, meaning: &str) -> (AssistantProfile, TeachResult) {
        let mut profile = self.profile.clone();
        profile.add_lesson(Lesson::new(term, meaning));
        profile.award(LESSON_POINTS);

        let result = TeachResult {
            term: term.to_string(),
            meaning: meaning.to_string(),
            reply: format!("{}: Learned: '{}' is '{}'.", self.assistant_name, term, meaning),
            points: profile.points,
        };
        (profile, result)
    }

    pub fn converse(&self, utterance: &str, sentiment: Sentiment) -> PendingTurn {
        PendingTurn {
            utterance: utterance.to_string(),
            sentiment,
            reply: personality::respond(sentiment, self.profile.personality),
        }
    }

    pub fn finalize(
        &self,
        pending: &PendingTurn,
        was_correct: bool,
    ) -> (AssistantProfile, FinalizedTurn) {
        let (award, ack) = if was_correct {
            (CONFIRMED_POINTS, "Thanks, I'm learning!")
        } else {
            (CORRECTED_POINTS, "Fixed myself!")
        };
        let reply = format!("{}: {}", self.assistant_name, ack);

        let mut profile = self.profile.clone();
        profile.award(award);
        profile.record_turn(pending.utterance.clone(), reply.clone());

        let turn = FinalizedTurn {
            utterance: pending.utterance.clone(),
            reply,
            was_correct,
            points: profile.points,
        };
        (profile, turn)
    }

    pub fn await_feedback(&mut self, pending: PendingTurn) {
        self.state = TurnState::AwaitingMoodFeedback(pending);
    }

    /// Adopts a persisted profile and returns to waiting for the next utterance.
    pub fn commit(&mut self, profile: AssistantProfile, handle: StorageHandle) {
        self.profile = profile;
        self.last_handle = Some(handle);
        self.state = TurnState::AwaitingUtterance;
    }
}
