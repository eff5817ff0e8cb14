use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use soven::dialogue::TurnOutcome;
use soven::Soven;

/// Interactive chat with a logged-in assistant.
pub struct ShellMode {
    app: Soven,
    editor: DefaultEditor,
    history_file: PathBuf,
}

enum Flow {
    Continue,
    Exit,
}

impl ShellMode {
    pub fn new(app: Soven, history_file: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::with_config(
            rustyline::Config::builder()
                .auto_add_history(false)
                .build(),
        )?;

        if history_file.exists() {
            let _ = editor.load_history(&history_file);
        }

        Ok(ShellMode {
            app,
            editor,
            history_file,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let Some(session) = self.app.session() else {
            anyhow::bail!("no assistant is logged in");
        };
        println!("{}", session.greeting().cyan().bold());
        println!("{}", "Teach me with \"term — это meaning\". /help for commands, /exit to quit".dimmed());

        loop {
            match self.editor.readline("You: ") {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }

                    self.editor
                        .add_history_entry(input)
                        .context("Failed to add to history")?;

                    match self.handle_input(input).await {
                        Ok(Flow::Continue) => {}
                        Ok(Flow::Exit) => break,
                        Err(e) => println!("{}: {}", "Error".red().bold(), e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "Use /exit or Ctrl+D to quit".yellow());
                }
                Err(ReadlineError::Eof) => {
                    println!("\n{}", "Goodbye!".cyan());
                    break;
                }
                Err(err) => {
                    println!("{}: {}", "Input error".red().bold(), err);
                    break;
                }
            }
        }

        self.save_history()
    }

    async fn handle_input(&mut self, input: &str) -> Result<Flow> {
        match input {
            "/exit" | "/quit" => {
                println!("{}", "Goodbye!".cyan());
                return Ok(Flow::Exit);
            }
            "/help" => {
                self.show_help();
                return Ok(Flow::Continue);
            }
            "/status" => {
                self.show_status();
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        // A mood question left unanswered by an earlier error takes this line as the answer.
        if self.app.session().map_or(false, |s| s.pending().is_some()) {
            match parse_answer(input) {
                Some(was_correct) => self.finish_turn(was_correct).await?,
                None => println!("{}", "Please answer y or n".yellow()),
            }
            return Ok(Flow::Continue);
        }

        match self.app.submit_utterance(input).await? {
            TurnOutcome::Taught(result) => {
                println!("{} {}", result.reply.green(), format!("(Points: {})", result.points).dimmed());
            }
            TurnOutcome::AwaitingFeedback(feedback) => {
                let name = self.assistant_name();
                println!("{}: {}", name.green().bold(), feedback.reply);
                println!("{}", feedback.help_message.magenta());

                let was_correct = self.ask_mood_feedback(&name)?;
                self.finish_turn(was_correct).await?;
            }
        }

        Ok(Flow::Continue)
    }

    async fn finish_turn(&mut self, was_correct: bool) -> Result<()> {
        let turn = self.app.resolve_mood_feedback(was_correct).await?;
        println!("{} {}", turn.reply.green(), format!("(Points: {})", turn.points).dimmed());
        Ok(())
    }

    /// Keeps asking until the answer is yes or no.
    fn ask_mood_feedback(&mut self, name: &str) -> Result<bool> {
        let prompt = format!("{}: Did I guess your mood right? [y/n] ", name);
        loop {
            let answer = self.editor.readline(&prompt)?;
            match parse_answer(&answer) {
                Some(was_correct) => return Ok(was_correct),
                None => println!("{}", "Please answer y or n".yellow()),
            }
        }
    }

    fn assistant_name(&self) -> String {
        self.app
            .session()
            .map(|s| s.assistant_name.clone())
            .unwrap_or_default()
    }

    fn show_help(&self) {
        println!("{}", "Commands:".cyan().bold());
        println!("  {}  points, personality and lessons", "/status".yellow());
        println!("  {}    this help", "/help".yellow());
        println!("  {}    leave the chat", "/exit".yellow());
        println!("  {}", "term — это meaning   teach a new fact (+10 points)".dimmed());
    }

    fn show_status(&self) {
        let Some(session) = self.app.session() else {
            return;
        };
        let profile = &session.profile;
        println!("{} ({})", profile.assistant_name.cyan().bold(), session.username);
        println!("Personality: {}", profile.personality);
        println!("Interests: {}", profile.interests);
        println!("Points: {}", profile.points);
        println!("Lessons: {}", profile.experience.len());
        if let Some(handle) = &session.last_handle {
            println!("Last saved: {}", handle.to_string().dimmed());
        }
    }

    fn save_history(&mut self) -> Result<()> {
        self.editor
            .save_history(&self.history_file)
            .context("Failed to save history")?;
        Ok(())
    }
}

fn parse_answer(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer(" Y "), Some(true));
        assert_eq!(parse_answer("no"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
    }
}
