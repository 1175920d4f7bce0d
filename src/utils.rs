use std::path::Path;

use anyhow::Context;
use fp::Field;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use crate::collection::MatrixCollection;

const DEMO_MATRICES: &str = include_str!("../demos/matrices.json");

/// Installs a subscriber printing to stderr, filtered by `RUST_LOG`. Setting `RUST_LOG=debug`
/// logs each reduction with its rank, and `RUST_LOG=trace` every row operation.
pub fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .with_span_events(FmtSpan::CLOSE)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install logger")
}

fn parse_collection<F: Field>(field: F, contents: &str) -> anyhow::Result<MatrixCollection<F>> {
    let json: serde_json::Value = serde_json::from_str(contents).context("Invalid JSON")?;
    Ok(MatrixCollection::from_json(field, &json)?)
}

/// Reads a collection from a JSON file. See [`MatrixCollection::from_json`] for the format.
pub fn load_collection<F: Field>(
    field: F,
    path: impl AsRef<Path>,
) -> anyhow::Result<MatrixCollection<F>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_collection(field, &contents)
        .with_context(|| format!("Failed to load matrices from {}", path.display()))
}

/// The matrices used when no file is given. All entries are integers, so they make sense over
/// every field.
pub fn demo_collection<F: Field>(field: F) -> anyhow::Result<MatrixCollection<F>> {
    parse_collection(field, DEMO_MATRICES).context("Failed to load demo matrices")
}

/// Asks for a matrix file, falling back to [`demo_collection`] if none is given.
pub fn query_collection<F: Field>(field: F) -> anyhow::Result<MatrixCollection<F>> {
    let file = query::optional("Matrix file", |path| {
        std::fs::read_to_string(path).map(|contents| (path.to_owned(), contents))
    });
    match file {
        Some((path, contents)) => parse_collection(field, &contents)
            .with_context(|| format!("Failed to load matrices from {path}")),
        None => demo_collection(field),
    }
}
