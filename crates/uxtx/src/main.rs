mod cli;

use std::io::Read;
use std::path::Path;

use clap::Parser;
use eyre::WrapErr;
use serde_json::Value;

use uxtx_core::amount::AmountFormat;
use uxtx_core::{ClassificationLabels, DateFormat, TxManager, TxManagerOptions};

fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let labels = match &args.labels {
        Some(path) => {
            let labels = load_labels(path)
                .wrap_err_with(|| format!("load labels from {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded classification labels");
            labels
        }
        None => ClassificationLabels::default(),
    };

    let options = TxManagerOptions::default()
        .with_labels(labels)
        .with_date_format(DateFormat::parse(&args.date_format).wrap_err("parse --date-format")?)
        .with_amount_format(AmountFormat::new(args.chain, args.unit));

    let history = read_input(&args.input).wrap_err("read wallet history")?;
    let history: Value = serde_json::from_str(&history).wrap_err("decode wallet history JSON")?;

    let mut manager = TxManager::new(options);
    let records = manager
        .parse_value(&history, args.wallet.as_deref(), false)
        .wrap_err("classify wallet history")?;

    tracing::info!(
        count = records.len(),
        chain = %args.chain,
        "classified wallet transactions"
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{output}");

    Ok(())
}

fn load_labels(path: &Path) -> eyre::Result<ClassificationLabels> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&raw)?;
    Ok(ClassificationLabels::from_value(&value)?)
}

/// Read the history file, or stdin when the path is `-`.
fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path)
}
