//! The interactive read-eval-print loop.
//!
//! One line per question, one in-flight request at a time. Line dispatch is
//! a pure function ([`ShellCommand::parse`]) so the state machine can be
//! tested without a terminal.

use newschat::ChatPipeline;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

const PROMPT: &str = "You: ";
const SEPARATOR_WIDTH: usize = 60;

/// What a line of input asks the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank after trimming; re-prompt without invoking the pipeline.
    Empty,
    /// `exit` or `quit` in any casing; leave the loop.
    Quit,
    /// Anything else is a question for the pipeline.
    Ask(String),
}

impl ShellCommand {
    /// Classify a raw input line.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
            Self::Quit
        } else {
            Self::Ask(trimmed.to_string())
        }
    }
}

/// Run the loop until an exit command, end of input, or an interrupt.
///
/// A pipeline failure leaves the loop and surfaces the error; there is no
/// retry or recovery path.
pub async fn run(pipeline: &ChatPipeline) -> anyhow::Result<()> {
    println!("\nPerplexity RAG News Chat");
    println!("Type your question and press Enter.");
    println!("Type 'exit' or 'quit' to end.\n");

    let mut editor = DefaultEditor::new()?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => match ShellCommand::parse(&line) {
                ShellCommand::Empty => continue,
                ShellCommand::Quit => {
                    println!("\nGoodbye!");
                    break;
                }
                ShellCommand::Ask(question) => {
                    debug!(question = %question, "dispatching question");
                    let answer = pipeline.ask(&question).await?;
                    println!("\nBot:");
                    println!("{answer}");
                    println!("{}", "-".repeat(SEPARATOR_WIDTH));
                }
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\nChat ended by user.");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
