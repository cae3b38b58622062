use csv_task_io::{merge_csv_file, parse_csv_file, AppConfig, CsvDownload, ExportTable, FileSource};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage:
  csv-task-io import <file.csv>
  csv-task-io export <table.json> [stem]
  csv-task-io merge <file.csv> [stem]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default(Some("config.toml"));
    init_tracing(&config)?;

    let args: Vec<String> = env::args().collect();
    tracing::debug!("Loaded configuration for {}", config.app.name);

    match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("import"), Some(path)) => import(path).await,
        (Some("export"), Some(path)) => export(&config, path, args.get(3)).await,
        (Some("merge"), Some(path)) => merge(&config, path, args.get(3)).await,
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("csv_task_io={}", config.logging.level)))?;

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    Ok(())
}

async fn import(path: &str) -> anyhow::Result<()> {
    // skipped rows are already logged by the parser
    let outcome = parse_csv_file(&FileSource::new(path)).await?;
    println!("{}", serde_json::to_string_pretty(&outcome.rows)?);
    Ok(())
}

async fn export(config: &AppConfig, path: &str, stem: Option<&String>) -> anyhow::Result<()> {
    let text = tokio::fs::read_to_string(path).await?;
    let table = ExportTable::from_json(&text)?;

    let stem = stem.unwrap_or(&config.export.default_stem);
    let written = CsvDownload::new(table.to_csv(), stem)
        .save_to(&config.export.output_dir)
        .await?;

    tracing::info!("Exported {} rows to {}", table.rows.len(), written.display());
    println!("{}", written.display());
    Ok(())
}

async fn merge(config: &AppConfig, path: &str, stem: Option<&String>) -> anyhow::Result<()> {
    let source = FileSource::new(path);
    let merged = merge_csv_file(&source).await?;

    let default_stem = source
        .path()
        .file_stem()
        .map(|s| format!("{}_merged", s.to_string_lossy()))
        .unwrap_or_else(|| config.export.default_stem.clone());
    let stem = stem.unwrap_or(&default_stem);
    let written = CsvDownload::new(merged.csv, stem)
        .save_to(&config.export.output_dir)
        .await?;

    tracing::info!(
        "Merged {} rows into {} ({} skipped)",
        merged.row_count,
        written.display(),
        merged.skipped.len()
    );
    println!("{}", written.display());
    Ok(())
}
