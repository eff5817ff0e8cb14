use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::dialogue::{
    parse_lesson, FinalizedTurn, PendingMoodFeedback, Session, TurnOutcome, TurnState,
};
use crate::error::{Result, SovenError};
use crate::network::NetworkDirectory;
use crate::p2p;
use crate::personality::Personality;
use crate::profile::AssistantProfile;
use crate::sentiment::SentimentClassifier;
use crate::storage::{PersistenceGateway, StorageHandle};

#[derive(Debug, Clone)]
pub struct ProfileCreated {
    pub greeting: String,
    pub profile: AssistantProfile,
    pub handle: StorageHandle,
}

#[derive(Debug, Clone)]
pub struct ProfileLoaded {
    pub greeting: String,
    pub profile: AssistantProfile,
}

/// Operations the presentation shell drives.
pub struct Soven {
    gateway: PersistenceGateway,
    classifier: SentimentClassifier,
    rng: StdRng,
    session: Option<Session>,
}

impl Soven {
    pub async fn new(config: &Config) -> Self {
        let gateway = PersistenceGateway::new(config).await;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::from_parts(gateway, SentimentClassifier::keyword_only(), rng)
    }

    pub fn from_parts(
        gateway: PersistenceGateway,
        classifier: SentimentClassifier,
        rng: StdRng,
    ) -> Self {
        Self {
            gateway,
            classifier,
            rng,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    pub fn network(&self) -> NetworkDirectory {
        self.gateway.load_network()
    }

    /// The password is required but not stored or checked anywhere.
    pub async fn register(
        &mut self,
        username: &str,
        password: &str,
        assistant_name: &str,
        interests: &str,
    ) -> Result<ProfileCreated> {
        let username = username.trim();
        let assistant_name = assistant_name.trim();
        let interests = interests.trim();

        let fields = [
            ("username", username),
            ("password", password.trim()),
            ("assistant name", assistant_name),
            ("interests", interests),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(SovenError::Validation(format!("{} is required", field)));
        }

        let mut network = self.gateway.load_network();
        if network.contains(username, assistant_name) {
            return Err(SovenError::DuplicateProfile {
                user: username.to_string(),
                assistant: assistant_name.to_string(),
            });
        }

        let personality = Personality::random(&mut self.rng);
        let profile = AssistantProfile::new(assistant_name, interests, personality);
        let handle = self.gateway.save_profile(username, assistant_name, &profile).await?;

        network.register(username, assistant_name);
        self.gateway.save_network(&network).await?;

        tracing::info!(
            "Registered {} ({}) with personality {}",
            assistant_name,
            username,
            personality
        );

        let mut session = Session::new(username, profile.clone());
        session.last_handle = Some(handle.clone());
        let greeting = session.greeting();
        self.session = Some(session);

        Ok(ProfileCreated {
            greeting,
            profile,
            handle,
        })
    }

    pub fn login(&mut self, username: &str, assistant_name: &str) -> Result<ProfileLoaded> {
        let username = username.trim();
        let assistant_name = assistant_name.trim();

        let profile = self
            .gateway
            .load_profile(username, assistant_name)
            .ok_or_else(|| SovenError::ProfileNotFound {
                user: username.to_string(),
                assistant: assistant_name.to_string(),
            })?;

        tracing::info!("Logged in as {} ({})", assistant_name, username);

        let session = Session::new(username, profile.clone());
        let greeting = session.greeting();
        self.session = Some(session);

        Ok(ProfileLoaded { greeting, profile })
    }

    pub async fn submit_utterance(&mut self, text: &str) -> Result<TurnOutcome> {
        let utterance = text.trim();
        if utterance.is_empty() {
            return Err(SovenError::Validation("utterance is empty".to_string()));
        }

        let session = self
            .session
            .as_mut()
            .ok_or_else(|| SovenError::InvalidState("no assistant is logged in".to_string()))?;
        if let TurnState::AwaitingMoodFeedback(_) = session.state {
            return Err(SovenError::InvalidState(
                "answer the mood question before saying something new".to_string(),
            ));
        }

        if let Some((term, meaning)) = parse_lesson(utterance) {
            let (profile, result) = session.teach(&term, &meaning);
            let handle = self
                .gateway
                .save_profile(&session.username, &session.assistant_name, &profile)
                .await?;
            session.commit(profile, handle);
            tracing::info!("{} learned '{}'", session.assistant_name, term);
            return Ok(TurnOutcome::Taught(result));
        }

        let sentiment = self.classifier.classify(utterance);
        let pending = session.converse(utterance, sentiment);

        let network = self.gateway.load_network();
        let help = p2p::maybe_help(&self.gateway, &network, &session.username, &mut self.rng).await;

        let feedback = PendingMoodFeedback {
            utterance: pending.utterance.clone(),
            sentiment: pending.sentiment,
            reply: pending.reply.clone(),
            help_message: help.to_string(),
        };
        session.await_feedback(pending);
        Ok(TurnOutcome::AwaitingFeedback(feedback))
    }

    pub async fn resolve_mood_feedback(&mut self, was_correct: bool) -> Result<FinalizedTurn> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| SovenError::InvalidState("no assistant is logged in".to_string()))?;
        let pending = session.pending().cloned().ok_or_else(|| {
            SovenError::InvalidState("no mood guess is waiting for feedback".to_string())
        })?;

        self.classifier
            .record_feedback(&pending.utterance, pending.sentiment, was_correct);

        let (profile, turn) = session.finalize(&pending, was_correct);
        let handle = self
            .gateway
            .save_profile(&session.username, &session.assistant_name, &profile)
            .await?;
        session.commit(profile, handle);

        Ok(turn)
    }
}
