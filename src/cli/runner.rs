//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::cli::server;
use crate::config::IngestConfig;
use crate::ingest::Ingestor;
use crate::shape::Input;
use crate::source::GameQuery;
use crate::table::{write_csv, SystemClock, TableBuilder};
use anyhow::{anyhow, bail, Context};
use serde_json::Value;
use std::fs;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> anyhow::Result<()> {
        match &self.cli.command {
            Commands::Serve { port } => {
                let ingestor = Ingestor::from_config(&self.ingest_config()?)?;
                server::serve(Arc::new(ingestor), *port).await?;
                Ok(())
            }
            Commands::Ingest {
                week,
                season,
                home,
                away,
            } => {
                let query = GameQuery::new(week, season, home, away);
                self.ingest(&query).await
            }
            Commands::Flatten { input, key, output } => {
                self.flatten(input, key.as_deref(), output.as_deref())
            }
        }
    }

    /// Config file (or defaults) overlaid with the environment
    fn file_config(&self) -> anyhow::Result<IngestConfig> {
        let mut config = match &self.cli.config {
            Some(path) => IngestConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => IngestConfig::default(),
        };
        config.apply_env_with(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn ingest_config(&self) -> anyhow::Result<IngestConfig> {
        let config = self.file_config()?;
        config.validate().context("Invalid ingest configuration")?;
        Ok(config)
    }

    async fn ingest(&self, query: &GameQuery) -> anyhow::Result<()> {
        query.validate()?;
        let ingestor = Ingestor::from_config(&self.ingest_config()?)?;

        let summary = ingestor
            .run(query)
            .await
            .with_context(|| format!("Failed to ingest {query}"))?;
        print!("{summary}");

        if !summary.any_success() {
            bail!("No entity was exported for {query}");
        }
        Ok(())
    }

    fn flatten(&self, input: &Path, key: Option<&str>, output: Option<&Path>) -> anyhow::Result<()> {
        let config = self.file_config()?;

        let content = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let document: Value = serde_json::from_str(&content)
            .with_context(|| format!("{} is not valid JSON", input.display()))?;

        let value = match key {
            Some(key) => document
                .get(key)
                .ok_or_else(|| anyhow!("{} has no member '{key}'", input.display()))?,
            None => &document,
        };

        let builder = TableBuilder::with_clock(Arc::new(SystemClock::new(config.timestamp_zone)));
        let table = builder.build(&[Input::try_from(value)?]).into_result()?;

        match output {
            Some(path) => {
                let file = fs::File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                write_csv(&table, BufWriter::new(file))?;
                info!("Wrote {} rows to {}", table.len(), path.display());
            }
            None => write_csv(&table, std::io::stdout().lock())?,
        }
        Ok(())
    }
}
