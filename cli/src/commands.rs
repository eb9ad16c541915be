//! Subcommands and their mapping onto ledger rules.
//!
//! Each subcommand is one external event. The adapter owns the user-facing
//! policy: a ledger that is not configured yet gets a hint instead of an error,
//! and voice messages are dropped silently in that case.

use std::io::Write;

use anyhow::Result;
use clap::{ArgAction, Subcommand};
use gol_core::{ClockOracle, Ledger, LedgerError};

pub const CONFIGURE_HINT: &str = "Please, configure the counter with `gol config` first";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reset the counter for two participants
    Config {
        /// Display name of the first participant
        name_a: String,
        /// Id of the first participant
        id_a: String,
        /// Display name of the second participant
        name_b: String,
        /// Id of the second participant
        id_b: String,
    },
    /// Report push-ups: your own, or someone else's with --reply-to
    #[command(visible_alias = "flexiones")]
    Flex {
        /// Id of the participant reporting
        sender: String,
        /// Id of the participant being reported on
        #[arg(long)]
        reply_to: Option<String>,
    },
    /// Report an error made by SENDER
    Error { sender: String },
    /// Register a voice message sent by SENDER
    Audio { sender: String },
    /// Show the push-up table
    Table,
    /// Describe what each participant owes
    Status,
    /// Mark push-up blocks as done (punishments are paid first)
    Complete {
        id: String,
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Add punishment push-up blocks
    Punish {
        id: String,
        #[arg(allow_negative_numbers = true)]
        count: i64,
    },
    /// Set or clear the RIP weekend flag
    Weekend {
        id: String,
        #[arg(action = ArgAction::Set)]
        flag: bool,
    },
    /// Change a participant's display name
    Rename { id: String, name: String },
}

impl Command {
    fn is_silent_when_unconfigured(&self) -> bool {
        matches!(self, Command::Audio { .. })
    }
}

pub fn run<C, W>(command: Command, ledger: &mut Ledger<C>, out: &mut W) -> Result<()>
where
    C: ClockOracle,
    W: Write,
{
    let silent = command.is_silent_when_unconfigured();
    match dispatch(command, ledger) {
        Err(LedgerError::NotConfigured) if silent => {
            tracing::debug!("Ignoring event on an unconfigured counter");
            Ok(())
        }
        Err(LedgerError::NotConfigured) => {
            writeln!(out, "{CONFIGURE_HINT}")?;
            Ok(())
        }
        Err(err) => Err(err.into()),
        Ok(reply) => {
            if let Some(reply) = reply {
                writeln!(out, "{reply}")?;
            }
            Ok(())
        }
    }
}

fn dispatch<C: ClockOracle>(
    command: Command,
    ledger: &mut Ledger<C>,
) -> Result<Option<String>, LedgerError> {
    let reply = match command {
        Command::Config {
            name_a,
            id_a,
            name_b,
            id_b,
        } => {
            ledger.configure(&name_a, &id_a, &name_b, &id_b)?;
            Some(format!("Counter configured for {name_a} and {name_b}"))
        }
        Command::Flex { sender, reply_to } => {
            let target = reply_to.as_deref().unwrap_or(&sender);
            ledger.add_pushups(&sender, target)?;
            None
        }
        Command::Error { sender } => {
            ledger.process_error(&sender)?;
            None
        }
        Command::Audio { sender } => {
            ledger.process_audio(&sender)?;
            None
        }
        Command::Table => Some(ledger.push_up_table()?),
        Command::Status => Some(ledger.summary()?),
        Command::Complete { id, count } => {
            let done = ledger.complete_pushups(&id, count)?;
            Some(format!(
                "Done: {} punishment and {} normal blocks",
                done.punishments, done.normals
            ))
        }
        Command::Punish { id, count } => {
            ledger.add_punishments(&id, count)?;
            None
        }
        Command::Weekend { id, flag } => {
            ledger.set_weekend_flag(&id, flag)?;
            None
        }
        Command::Rename { id, name } => {
            ledger.rename(&id, &name)?;
            None
        }
    };
    Ok(reply)
}
