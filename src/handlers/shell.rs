//! Line-oriented shell over the two generator commands.

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use sea_orm::DatabaseConnection;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::models::command::{GenerateProtocolDataOptions, GetCurrentDepositOptions};
use crate::services::protocol_data_generator::ProtocolDataGenerator;
use crate::services::protocol_deposit::get_protocol_deposit;

pub const INTRO: &str =
    "Welcome to the Protocol Generator shell. Type help or ? to list commands.\n";
pub const PROMPT: &str = "₿ > ";

const HELP: &str = "\
generate_protocol_data    Generates data for protocol
    --accounts, number of accounts using protocol (default: 100)
    --start, activation date of protocol (default: now - 5 days)
    --end, deactivation date of protocol (default: now)
    --deposit, last deposit sum in usd (default: 2000000)
get_current_deposit       Get current deposit of protocol
    --protocol, id of requested protocol
help                      Show this message
quit                      Leave the shell";

#[derive(Debug, PartialEq)]
pub enum ShellOutcome {
    Output(String),
    Exit,
}

pub struct ShellHandler {
    db: DatabaseConnection,
    config: GeneratorConfig,
}

impl ShellHandler {
    pub fn new(db: DatabaseConnection, config: GeneratorConfig) -> Self {
        Self { db, config }
    }

    pub async fn generate_protocol_data(&self, arg: &str) -> Result<String> {
        let options = GenerateProtocolDataOptions::parse_args(arg, Utc::now().naive_utc())?;

        let mut generator = ProtocolDataGenerator::new(self.config.clone(), StdRng::from_entropy());
        let protocol_id = generator.generate_all(&self.db, &options).await?;

        Ok(format!("protocol_id={}", protocol_id))
    }

    pub async fn get_current_deposit(&self, arg: &str) -> Result<String> {
        let options = GetCurrentDepositOptions::parse_args(arg)?;
        let deposit = get_protocol_deposit(&self.db, &options).await?;

        Ok(format!("protocol={}, deposit={}", options.protocol, deposit))
    }

    /// Run one shell line.
    pub async fn dispatch(&self, line: &str) -> Result<ShellOutcome> {
        let line = line.trim();
        let (command, arg) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let output = match command {
            "" => String::new(),
            "generate_protocol_data" => self.generate_protocol_data(arg).await?,
            "get_current_deposit" => self.get_current_deposit(arg).await?,
            "help" | "?" => HELP.to_string(),
            "quit" | "exit" | "EOF" => return Ok(ShellOutcome::Exit),
            other => format!("*** Unknown syntax: {}", other),
        };

        Ok(ShellOutcome::Output(output))
    }

    /// Read-eval-print loop over stdin until `quit` or end of input.
    pub async fn run(&self) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        stdout.write_all(INTRO.as_bytes()).await?;

        loop {
            stdout.write_all(PROMPT.as_bytes()).await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match self.dispatch(&line).await {
                Ok(ShellOutcome::Exit) => break,
                Ok(ShellOutcome::Output(output)) if output.is_empty() => {}
                Ok(ShellOutcome::Output(output)) => println!("{}", output),
                Err(e) => eprintln!("\x1b[91m{}\x1b[0m", e),
            }
        }

        Ok(())
    }
}
