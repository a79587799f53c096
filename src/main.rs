use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::io::{self, BufWriter};

use bulktext::cli::{CliArgs, StartupMode};
use bulktext::config::PluginConfig;
use bulktext::memory::MemoryDocument;
use bulktext::runtime::App;

fn main() -> Result<()> {
    bulktext::tracing::init();

    let startup = CliArgs::parse().into_config().map_err(|e| anyhow!(e))?;

    let config = match &startup.config_path {
        Some(path) => PluginConfig::load_from(path),
        None => PluginConfig::load(),
    };

    let (document_path, output_path) = match startup.mode {
        StartupMode::InitConfig => {
            let path = startup
                .config_path
                .or_else(bulktext::config_paths::config_file)
                .ok_or_else(|| anyhow!("No config directory available"))?;
            config.save_to(&path).map_err(|e| anyhow!(e))?;
            println!("{}", path.display());
            return Ok(());
        }
        StartupMode::Session { document, output } => (document, output),
    };

    let json = std::fs::read_to_string(&document_path)
        .with_context(|| format!("Failed to read {}", document_path.display()))?;
    let document = MemoryDocument::from_json(&json)
        .with_context(|| format!("Failed to load {}", document_path.display()))?;
    tracing::info!("Loaded document {}", document_path.display());

    let stdout = io::stdout();
    let mut app = App::new(document, config, BufWriter::new(stdout.lock()));
    app.start()?;
    app.run(io::stdin().lock())?;

    if let Some(path) = output_path {
        let json = app.into_document().to_json()?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote document to {}", path.display());
    }

    Ok(())
}
