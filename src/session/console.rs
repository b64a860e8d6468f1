use std::io::Write;

use anyhow::Context;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};

/// Interactive I/O seam. The session logic only ever talks to this trait, so
/// tests can drive it with a scripted console instead of a real terminal.
#[async_trait]
pub trait Console: Send {
    /// Write one line of user-facing output.
    fn say(&mut self, line: &str);

    /// Show a prompt, then block for one line of input (trimmed).
    async fn ask(&mut self, prompt: &str) -> anyhow::Result<String>;
}

pub struct Terminal {
    stdin: BufReader<Stdin>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()),
        }
    }
}

#[async_trait]
impl Console for Terminal {
    fn say(&mut self, line: &str) {
        // Output is best effort and must not panic on a closed stdout; a
        // vanished terminal surfaces as an error on the next prompt instead.
        let _ = writeln!(std::io::stdout(), "{line}");
    }

    async fn ask(&mut self, prompt: &str) -> anyhow::Result<String> {
        // Flush before blocking so the prompt is visible on line-buffered
        // and piped stdout alike.
        let mut stdout = std::io::stdout();
        writeln!(stdout, "{prompt}").context("write prompt")?;
        write!(stdout, "> ").context("write prompt")?;
        stdout.flush().context("flush stdout")?;

        let mut line = String::new();
        let read = self
            .stdin
            .read_line(&mut line)
            .await
            .context("read from stdin")?;
        if read == 0 {
            anyhow::bail!("stdin closed");
        }
        Ok(line.trim().to_string())
    }
}

pub async fn ask_yes_no(console: &mut dyn Console, question: &str) -> anyhow::Result<bool> {
    let answer = console.ask(&format!("{question} (y/n):")).await?;
    let answer = answer.to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// A finite non-negative decimal, or `None` for anything else.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite() && *amount >= 0.0)
}
