//! Size metadata and the three output files written by `export`.
//!
//! ```text
//! image_urls_only.txt   one URL per line
//! image_data.json       the whole OutputBundle, pretty-printed
//! image_data.csv        filename,url,size_bytes,size_mb
//! ```
//!
//! Files are overwritten without warning and written in the order above; the
//! first failure stops the remaining writes.

use crate::config::OutputsConfig;
use crate::inventory::Inventory;
use crate::types::{ImageRecord, OutputBundle};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Cannot read size of {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Paths of the files produced by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct WrittenFiles {
    pub urls: PathBuf,
    pub json: PathBuf,
    pub csv: PathBuf,
}

/// Bytes → MiB, rounded to two decimals.
pub fn size_mb(size_bytes: u64) -> f64 {
    (size_bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

/// Attach file sizes to every inventory entry.
pub fn build_bundle(inventory: &Inventory) -> Result<OutputBundle, ExportError> {
    let images = inventory
        .images
        .iter()
        .map(|entry| {
            let path = inventory.toplevel.join(&entry.path);
            let size_bytes = fs::metadata(&path)
                .map_err(|source| ExportError::Metadata {
                    path: path.clone(),
                    source,
                })?
                .len();
            Ok(ImageRecord {
                filename: entry.path.clone(),
                url: entry.url.clone(),
                size_bytes,
                size_mb: size_mb(size_bytes),
            })
        })
        .collect::<Result<Vec<_>, ExportError>>()?;

    Ok(OutputBundle {
        repository: inventory.identity.slug(),
        branch: inventory.identity.branch.clone(),
        base_url: inventory.base.to_string(),
        total_images: images.len(),
        images,
    })
}

/// Write the URL list, JSON document and CSV table into `out_dir`.
pub fn write_outputs(
    bundle: &OutputBundle,
    out_dir: &Path,
    names: &OutputsConfig,
) -> Result<WrittenFiles, ExportError> {
    let written = WrittenFiles {
        urls: out_dir.join(&names.urls),
        json: out_dir.join(&names.json),
        csv: out_dir.join(&names.csv),
    };

    write_url_list(bundle, &written.urls)?;
    write_json(bundle, &written.json)?;
    write_csv(bundle, &written.csv)?;

    info!(out_dir = %out_dir.display(), images = bundle.total_images, "outputs written");
    Ok(written)
}

fn write_url_list(bundle: &OutputBundle, path: &Path) -> Result<(), ExportError> {
    debug!(path = %path.display(), "writing URL list");
    let mut out = BufWriter::new(File::create(path)?);
    for image in &bundle.images {
        writeln!(out, "{}", image.url)?;
    }
    out.flush()?;
    Ok(())
}

fn write_json(bundle: &OutputBundle, path: &Path) -> Result<(), ExportError> {
    debug!(path = %path.display(), "writing JSON");
    let json = serde_json::to_string_pretty(bundle)?;
    fs::write(path, json)?;
    Ok(())
}

fn write_csv(bundle: &OutputBundle, path: &Path) -> Result<(), ExportError> {
    debug!(path = %path.display(), "writing CSV");
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)?;
    for image in &bundle.images {
        writer.serialize(image)?;
    }
    // Header comes from the first record; an empty table still gets one.
    if bundle.images.is_empty() {
        writer.write_record(["filename", "url", "size_bytes", "size_mb"])?;
    }
    writer.flush()?;
    Ok(())
}
