use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::conversation::SessionSummary;

/// Finished sessions waiting for the reporting side, keyed by a hash of
/// their transcript.
pub struct SummaryArchive {
    archive_dir: PathBuf,
}

impl SummaryArchive {
    pub async fn new(directory: Option<PathBuf>) -> Result<Self> {
        let archive_dir = match directory {
            Some(directory) => directory,
            None => get_archive_directory()?,
        };

        tokio::fs::create_dir_all(&archive_dir)
            .await
            .context("Failed to create archive directory")?;

        Ok(Self { archive_dir })
    }

    pub async fn store(&self, summary: &SessionSummary) -> Result<String> {
        let key = compute_summary_key(summary)?;
        let serialized = serde_json::to_vec(summary).context("Failed to serialize summary")?;

        cacache::write(&self.archive_dir, &key, serialized)
            .await
            .context("Failed to write summary to archive")?;
        tracing::info!(%key, "Session summary archived");

        Ok(key)
    }

    pub async fn get(&self, key: &str) -> Option<SessionSummary> {
        match cacache::read(&self.archive_dir, key).await {
            Ok(data) => serde_json::from_slice(&data).ok(),
            Err(_) => None,
        }
    }
}

fn get_archive_directory() -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().context("Failed to determine cache directory")?;
    Ok(cache_base.join(env!("CARGO_CRATE_NAME")).join("sessions"))
}

pub fn compute_summary_key(summary: &SessionSummary) -> Result<String> {
    use sha2::{Digest, Sha256};

    let transcript =
        serde_json::to_vec(&summary.transcript).context("Failed to serialize transcript")?;
    let mut hasher = Sha256::new();
    hasher.update(summary.role.as_bytes());
    hasher.update(&transcript);
    Ok(format!("{:x}", hasher.finalize()))
}
