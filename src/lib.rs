pub mod app;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod network;
pub mod p2p;
pub mod personality;
pub mod profile;
pub mod sentiment;
pub mod storage;

pub use app::{ProfileCreated, ProfileLoaded, Soven};
pub use config::Config;
pub use dialogue::{FinalizedTurn, PendingMoodFeedback, TeachResult, TurnOutcome, TurnState};
pub use error::{Result, SovenError};
pub use network::NetworkDirectory;
pub use personality::Personality;
pub use profile::{AssistantProfile, DialogueTurn, Lesson};
pub use sentiment::{Sentiment, SentimentClassifier, SentimentModel};
pub use storage::{PersistenceGateway, StorageHandle};
