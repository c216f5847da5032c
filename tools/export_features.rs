//! Model-input feature export
//!
//! Streams a labeled dataset through the 13-field model-input extractor and
//! writes the training matrix consumed by the external trainer.

use anyhow::Context;
use phishing_detection_pipeline::{GroupReader, ModelFeatureExtractor};
use tracing::info;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("export_features=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let input = args.get(1).map(|s| s.as_str()).unwrap_or("Dataset549k.csv");
    let output = args
        .get(2)
        .map(|s| s.as_str())
        .unwrap_or("phishing_model_features.csv");
    let group_size: usize = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(50_000);

    info!(input = %input, output = %output, group_size, "Exporting model-input features");

    let extractor = ModelFeatureExtractor::new();
    let mut reader = GroupReader::open(input, group_size)
        .with_context(|| format!("Failed to open {input}"))?;
    let mut writer = csv::Writer::from_path(output)
        .with_context(|| format!("Failed to create {output}"))?;

    let mut header = vec!["Original_URL", "Actual_Label"];
    header.extend(extractor.feature_names());
    writer.write_record(&header)?;

    let mut exported = 0u64;
    while let Some(group) = reader.next_group()? {
        for record in &group {
            let features = extractor.extract(record.url_text());
            let mut row = vec![record.url_text().to_string(), record.label.to_string()];
            row.extend(features.to_vector().iter().map(|v| v.to_string()));
            writer.write_record(&row)?;
        }
        writer.flush()?;
        exported += group.len() as u64;
        info!(exported, "Group exported");
    }

    info!(rows = exported, output = %output, "Feature export complete");
    Ok(())
}
