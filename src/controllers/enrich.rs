use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    domain::enrichment::{BatchSummary, CardOutcome, EnrichmentService},
    error::AppResult,
};

const CONFIRM_PROMPT: &str = "Do you want to proceed with adding audio to these cards? (yes/no): ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Proceed without asking
    pub assume_yes: bool,
    /// Stop after listing the affected cards
    pub dry_run: bool,
}

/// How an interactive run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunReport {
    NothingToDo,
    DryRun { listed: usize },
    Cancelled { listed: usize },
    Completed(BatchSummary),
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Interactive flow: list the affected cards, confirm, process, summarize.
pub struct EnrichController {
    service: Arc<EnrichmentService>,
}

impl EnrichController {
    pub fn new(service: Arc<EnrichmentService>) -> Self {
        Self { service }
    }

    pub async fn run<R, W>(&self, options: RunOptions, input: R, out: &mut W) -> AppResult<RunReport>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let cards = self.service.find_candidates().await?;
        writeln!(out, "Found {} unique notes without audio.\n", cards.len())?;

        if cards.is_empty() {
            writeln!(out, "No cards need modification.")?;
            return Ok(RunReport::NothingToDo);
        }

        writeln!(out, "The following sentences would be modified:")?;
        for preview in self.service.preview(&cards) {
            writeln!(out, "\nCard #{}: {}", preview.index + 1, preview.spoken_text)?;
        }

        if options.dry_run {
            return Ok(RunReport::DryRun {
                listed: cards.len(),
            });
        }

        if !options.assume_yes && !self.confirm(input, out).await? {
            writeln!(out, "Operation cancelled.")?;
            return Ok(RunReport::Cancelled {
                listed: cards.len(),
            });
        }

        writeln!(out, "\nProceeding with modifications...")?;
        let outcomes = self.service.process_batch(&cards).await;
        let summary = BatchSummary::from_outcomes(&outcomes);
        write_summary(out, &summary, &outcomes)?;

        Ok(RunReport::Completed(summary))
    }

    async fn confirm<R, W>(&self, mut input: R, out: &mut W) -> AppResult<bool>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        write!(out, "\n{}", CONFIRM_PROMPT)?;
        out.flush()?;

        let mut answer = String::new();
        input.read_line(&mut answer).await?;
        Ok(is_affirmative(&answer))
    }
}

fn write_summary<W: Write>(
    out: &mut W,
    summary: &BatchSummary,
    outcomes: &[CardOutcome],
) -> std::io::Result<()> {
    writeln!(out, "\nProcessing complete:")?;
    writeln!(out, "- Successfully added audio to {} cards", summary.succeeded)?;

    if summary.failed > 0 {
        writeln!(out, "- Failed to process {} cards", summary.failed)?;
        for outcome in outcomes {
            if let Err(e) = &outcome.result {
                writeln!(
                    out,
                    "  Card #{} [ID: {}]: {}",
                    outcome.index + 1,
                    outcome.card_id,
                    e
                )?;
            }
        }
    }

    Ok(())
}
