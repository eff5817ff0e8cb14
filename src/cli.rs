use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;

use soven::{Config, PersistenceGateway, Soven};

use crate::shell::ShellMode;

#[derive(Parser)]
#[command(name = "soven")]
#[command(about = "Virtual assistant pet: teach it facts, talk to it, earn points")]
#[command(version)]
pub struct Args {
    /// Data directory (defaults to the user config dir)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new assistant and start chatting with it
    Register {
        username: String,
        password: String,
        assistant: String,
        interests: String,
    },
    /// Chat with an existing assistant
    Chat {
        username: String,
        assistant: String,
    },
    /// Show an assistant's points, lessons and recent dialogue
    Status {
        username: String,
        assistant: String,
    },
    /// List every user and their assistants
    Network,
    /// Print a record saved to IPFS
    Fetch {
        address: String,
    },
}

pub async fn handle_register(
    config: &Config,
    username: String,
    password: String,
    assistant: String,
    interests: String,
) -> Result<()> {
    let mut app = Soven::new(config).await;
    let created = app.register(&username, &password, &assistant, &interests).await?;

    println!("{}", format!("✓ Created {} ({})", created.profile.assistant_name, username.trim()).green());
    println!("Personality: {}", created.profile.personality);
    println!("Saved to: {}", created.handle.to_string().dimmed());

    let mut shell = ShellMode::new(app, config.history_file())?;
    shell.run().await
}

pub async fn handle_chat(config: &Config, username: String, assistant: String) -> Result<()> {
    let mut app = Soven::new(config).await;
    app.login(&username, &assistant)?;

    let mut shell = ShellMode::new(app, config.history_file())?;
    shell.run().await
}

pub fn handle_status(config: &Config, username: String, assistant: String) -> Result<()> {
    let gateway = PersistenceGateway::local_only(config);
    let Some(profile) = gateway.load_profile(username.trim(), assistant.trim()) else {
        anyhow::bail!("Assistant not found: {} ({})", assistant, username);
    };

    println!("{} ({})", profile.assistant_name.cyan().bold(), username);
    println!("Personality: {}", profile.personality);
    println!("Interests: {}", profile.interests);
    println!("Points: {}", profile.points.to_string().yellow());

    if profile.experience.is_empty() {
        println!("{}", "No lessons yet.".dimmed());
    } else {
        println!("\n{}", "Lessons:".cyan());
        for lesson in &profile.experience {
            println!("  {} — {}", lesson.term, lesson.meaning);
        }
    }

    if !profile.dialogue.is_empty() {
        println!("\n{}", "Recent dialogue:".cyan());
        for turn in &profile.dialogue {
            println!("  {}: {}", "You".dimmed(), turn.utterance);
            println!("  {}", turn.reply);
        }
    }

    Ok(())
}

pub fn handle_network(config: &Config) -> Result<()> {
    let network = PersistenceGateway::local_only(config).load_network();

    if network.is_empty() {
        println!("No assistants registered.");
        return Ok(());
    }

    println!("📡 Network ({} users):", network.len());
    for user in network.users() {
        println!("  {} - {}", user, network.assistants_of(user).join(", "));
    }

    Ok(())
}

pub async fn handle_fetch(config: &Config, address: String) -> Result<()> {
    let gateway = PersistenceGateway::new(config).await;
    if !gateway.remote_available() {
        anyhow::bail!("IPFS is not reachable at {}", config.ipfs.api_url);
    }

    let record: serde_json::Value = gateway.fetch_remote(&address).await?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
