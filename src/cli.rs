use clap::{Parser, Subcommand};

use crate::controllers::enrich::RunOptions;
use crate::domain::tts::TtsProvider;
use crate::infrastructure::config::Config;

#[derive(Parser, Debug)]
#[command(name = "anki-tts")]
#[command(about = "Add generated speech audio to Anki cards that have none")]
#[command(version)]
pub struct Cli {
    /// Anki search query selecting candidate cards (overrides CARD_QUERY)
    #[arg(short, long, global = true)]
    pub query: Option<String>,

    /// Maximum number of matching cards to inspect (overrides MAX_CARDS)
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    /// Cards processed at the same time (overrides MAX_CONCURRENT)
    #[arg(short, long, global = true)]
    pub concurrency: Option<usize>,

    /// Speech provider: openai or polly (overrides TTS_PROVIDER)
    #[arg(long, global = true)]
    pub provider: Option<TtsProvider>,

    /// Fixed voice for every card (overrides TTS_VOICE)
    #[arg(long, global = true)]
    pub voice: Option<String>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// List the cards that would be modified and exit
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the spoken text for a piece of card HTML (reads stdin when omitted)
    Render { markup: Option<String> },
}

impl Cli {
    /// Apply command-line overrides on top of the environment config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(query) = &self.query {
            config.card_query = query.clone();
        }
        if let Some(limit) = self.limit {
            config.max_cards = limit;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent = concurrency;
        }
        if let Some(provider) = self.provider {
            config.tts_provider = provider;
        }
        if let Some(voice) = &self.voice {
            config.tts_voice = Some(voice.clone());
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            assume_yes: self.yes,
            dry_run: self.dry_run,
        }
    }
}
