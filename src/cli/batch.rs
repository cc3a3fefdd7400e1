//! Batch command implementation

use crate::report::BatchOutcome;
use crate::valuation::{BusinessFinancials, ValuationEngine};
use anyhow::Context;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON-lines file, one valuation request per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write results here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum valuations in flight
    #[arg(long, default_value = "4")]
    pub jobs: usize,
}

impl BatchArgs {
    pub async fn execute(&self, engine: Arc<ValuationEngine>) -> anyhow::Result<()> {
        let content = tokio::fs::read_to_string(&self.input)
            .await
            .with_context(|| format!("Failed to read {}", self.input.display()))?;

        let outcomes = run_batch(&content, engine, self.jobs).await?;

        let ok = outcomes.iter().filter(|o| o.is_ok()).count();
        tracing::info!(
            total = outcomes.len(),
            ok,
            rejected = outcomes.len() - ok,
            "Batch complete"
        );

        let mut lines = Vec::new();
        for outcome in &outcomes {
            serde_json::to_writer(&mut lines, outcome)?;
            lines.push(b'\n');
        }

        match &self.output {
            Some(path) => tokio::fs::write(path, lines)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => std::io::stdout().write_all(&lines)?,
        }

        Ok(())
    }
}

/// Value every non-blank line of `content`, returning outcomes in line order
///
/// Requests share one engine and run on the blocking pool, at most `jobs`
/// at a time.
pub async fn run_batch(
    content: &str,
    engine: Arc<ValuationEngine>,
    jobs: usize,
) -> anyhow::Result<Vec<BatchOutcome>> {
    let permits = Arc::new(Semaphore::new(jobs.max(1)));
    let mut tasks = JoinSet::new();
    let mut outcomes = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let input: BusinessFinancials = match serde_json::from_str(raw) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(line, error = %e, "Skipping unparseable batch line");
                outcomes.push(BatchOutcome::Failed {
                    line,
                    reason: format!("Invalid JSON: {}", e),
                });
                continue;
            }
        };

        let permit = permits.clone().acquire_owned().await?;
        let engine = engine.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            let industry = input.industry.clone();
            BatchOutcome::from_result(line, &industry, engine.compute_valuation(input))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        outcomes.push(joined.context("Valuation task panicked")?);
    }

    outcomes.sort_by_key(BatchOutcome::line);
    Ok(outcomes)
}
