//! Corpus export: Arrow IPC files, pretty tables, and SVG files on disk.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::Context;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tracing::info;

use hazardwise_core::StepDiagram;
use hazardwise_render::DATA_URI_PREFIX;

/// Write one batch as an Arrow IPC file. Returns the row count.
pub fn write_ipc(batch: &RecordBatch, path: &Path) -> anyhow::Result<usize> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer =
        FileWriter::try_new(file, &batch.schema()).context("opening Arrow IPC writer")?;
    writer.write(batch).context("writing corpus batch")?;
    writer.finish().context("finishing Arrow IPC file")?;

    info!(rows = batch.num_rows(), path = %path.display(), "corpus exported");
    Ok(batch.num_rows())
}

/// The first `limit` rows as a text table.
pub fn table(batch: &RecordBatch, limit: Option<usize>) -> anyhow::Result<String> {
    let rows = limit.map_or(batch.num_rows(), |n| n.min(batch.num_rows()));
    let slice = batch.slice(0, rows);
    Ok(pretty_format_batches(&[slice])?.to_string())
}

/// Decode each diagram's data URI and write it as `step-N.svg` under `dir`.
pub fn write_svgs(diagrams: &[StepDiagram], dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::with_capacity(diagrams.len());
    for (i, diagram) in diagrams.iter().enumerate() {
        let payload = diagram
            .image_data_url
            .strip_prefix(DATA_URI_PREFIX)
            .with_context(|| format!("step {} is not an SVG data URI", i + 1))?;
        let bytes = BASE64
            .decode(payload)
            .with_context(|| format!("decoding step {} image", i + 1))?;

        let path = dir.join(format!("step-{}.svg", i + 1));
        fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
