use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::network::NetworkDirectory;
use crate::storage::PersistenceGateway;

pub const HELP_PROBABILITY: f64 = 0.3;
pub const HELP_POINTS: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpOutcome {
    Helped {
        helper_user: String,
        helper_assistant: String,
    },
    SelfHelp,
}

impl fmt::Display for HelpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HelpOutcome::Helped {
                helper_user,
                helper_assistant,
            } => write!(
                f,
                "Got help from {} ({}). +{} points to {}!",
                helper_assistant, helper_user, HELP_POINTS, helper_user
            ),
            HelpOutcome::SelfHelp => write!(f, "I'm helping you myself!"),
        }
    }
}

/// Simulated help from another user's assistant, which earns that assistant points.
/// Nothing crosses the network: the helper's stored record is updated in place.
pub async fn maybe_help<R: Rng + ?Sized>(
    gateway: &PersistenceGateway,
    network: &NetworkDirectory,
    current_user: &str,
    rng: &mut R,
) -> HelpOutcome {
    maybe_help_with_probability(gateway, network, current_user, rng, HELP_PROBABILITY).await
}

pub(crate) async fn maybe_help_with_probability<R: Rng + ?Sized>(
    gateway: &PersistenceGateway,
    network: &NetworkDirectory,
    current_user: &str,
    rng: &mut R,
    probability: f64,
) -> HelpOutcome {
    if rng.random::<f64>() >= probability || network.len() <= 1 {
        return HelpOutcome::SelfHelp;
    }

    let other_users: Vec<&str> = network.users().filter(|u| *u != current_user).collect();
    let Some(helper_user) = other_users.choose(rng).copied() else {
        return HelpOutcome::SelfHelp;
    };
    let Some(helper_assistant) = network.assistants_of(helper_user).choose(rng) else {
        return HelpOutcome::SelfHelp;
    };

    let Some(mut helper) = gateway.load_profile(helper_user, helper_assistant) else {
        tracing::warn!("Helper {} ({}) has no stored record", helper_assistant, helper_user);
        return HelpOutcome::SelfHelp;
    };

    helper.award(HELP_POINTS);
    if let Err(e) = gateway.save_profile(helper_user, helper_assistant, &helper).await {
        tracing::warn!("Could not credit helper {} ({}): {}", helper_assistant, helper_user, e);
        return HelpOutcome::SelfHelp;
    }

    tracing::info!("{} ({}) helped {}", helper_assistant, helper_user, current_user);
    HelpOutcome::Helped {
        helper_user: helper_user.to_string(),
        helper_assistant: helper_assistant.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::personality::Personality;
    use crate::profile::AssistantProfile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    async fn setup(dir: &TempDir, users: &[(&str, &str)]) -> (PersistenceGateway, NetworkDirectory) {
        let config = Config::new(Some(dir.path().to_path_buf())).unwrap();
        let gateway = PersistenceGateway::local_only(&config);
        let mut network = NetworkDirectory::new();
        for (user, assistant) in users {
            network.register(user, assistant);
            let profile = AssistantProfile::new(*assistant, "chess", Personality::Curious);
            gateway.save_profile(user, assistant, &profile).await.unwrap();
        }
        (gateway, network)
    }

    #[tokio::test]
    async fn test_single_user_always_helps_itself() {
        let dir = TempDir::new().unwrap();
        let (gateway, network) = setup(&dir, &[("alice", "Rex")]).await;
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let outcome =
                maybe_help_with_probability(&gateway, &network, "alice", &mut rng, 1.0).await;
            assert_eq!(outcome, HelpOutcome::SelfHelp);
        }
        assert_eq!(gateway.load_profile("alice", "Rex").unwrap().points, 0);
    }

    #[tokio::test]
    async fn test_helper_is_another_user_and_gets_points() {
        let dir = TempDir::new().unwrap();
        let (gateway, network) = setup(&dir, &[("alice", "Rex"), ("bob", "Max")]).await;
        let mut rng = StdRng::seed_from_u64(2);

        let outcome = maybe_help_with_probability(&gateway, &network, "alice", &mut rng, 1.0).await;
        assert_eq!(
            outcome,
            HelpOutcome::Helped {
                helper_user: "bob".to_string(),
                helper_assistant: "Max".to_string(),
            }
        );
        assert_eq!(outcome.to_string(), "Got help from Max (bob). +5 points to bob!");
        assert_eq!(gateway.load_profile("bob", "Max").unwrap().points, HELP_POINTS);
        assert_eq!(gateway.load_profile("alice", "Rex").unwrap().points, 0);
    }

    #[tokio::test]
    async fn test_zero_probability_never_helps() {
        let dir = TempDir::new().unwrap();
        let (gateway, network) = setup(&dir, &[("alice", "Rex"), ("bob", "Max")]).await;
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = maybe_help_with_probability(&gateway, &network, "alice", &mut rng, 0.0).await;
        assert_eq!(outcome, HelpOutcome::SelfHelp);
        assert_eq!(outcome.to_string(), "I'm helping you myself!");
    }

    #[tokio::test]
    async fn test_missing_helper_record_is_self_help() {
        let dir = TempDir::new().unwrap();
        let (gateway, mut network) = setup(&dir, &[("alice", "Rex")]).await;
        network.register("bob", "Ghost");
        let mut rng = StdRng::seed_from_u64(4);

        let outcome = maybe_help_with_probability(&gateway, &network, "alice", &mut rng, 1.0).await;
        assert_eq!(outcome, HelpOutcome::SelfHelp);
    }
}
