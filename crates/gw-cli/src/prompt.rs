//! Prompts on the terminal.

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use gw_mechanics::ports::{Button, Prompter};

/// Asks the player on stdout and reads answers from stdin.
///
/// End of input dismisses the prompt.
pub struct TerminalPrompter {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl TerminalPrompter {
    async fn read_line(&self) -> Option<String> {
        match self.lines.lock().await.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "could not read answer");
                None
            }
        }
    }
}

#[async_trait]
impl Prompter for TerminalPrompter {
    async fn ask(&self, title: &str, body: &str, buttons: &[Button]) -> Option<String> {
        println!("  {}", title.bold());
        println!("  {body}");
        let choices: Vec<String> = buttons
            .iter()
            .enumerate()
            .map(|(i, b)| format!("[{}] {}", i + 1, b.label))
            .collect();
        println!("  {}", choices.join("  "));

        let answer = self.read_line().await?;
        let answer = answer.trim();
        // Accept the button number, its key or its label.
        let chosen = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| buttons.get(i))
            .or_else(|| {
                buttons.iter().find(|b| {
                    b.key.eq_ignore_ascii_case(answer) || b.label.eq_ignore_ascii_case(answer)
                })
            });
        chosen.map(|b| b.key.clone())
    }

    async fn ask_value(&self, title: &str, body: &str, _field: &str) -> Option<String> {
        println!("  {}", title.bold());
        println!("  {body}");
        self.read_line().await
    }

    async fn inform(&self, title: &str, body: &str) {
        println!("  {}: {}", title.bold(), body.yellow());
    }
}
