//! Download the best-track archive and unpack `bst_all.txt`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::{
    cli::create_spinner,
    download::{download_with_progress, extract_best_track},
};

pub async fn fetch(url: &str, dest: Option<PathBuf>) -> Result<PathBuf> {
    let tmp_dir = TempDir::new()?;
    let dest = dest.unwrap_or_else(default_dest);

    let archive_filepath = download_archive(url, tmp_dir.path()).await?;

    let bar = create_spinner("Unpacking best-track archive...".to_string());
    let extracted = extract_best_track(&archive_filepath, &dest)
        .with_context(|| format!("cannot unpack into {}", dest.display()))?;
    bar.finish_with_message("Best-track archive unpacked");

    Ok(extracted)
}

async fn download_archive(url: &str, temp_dir: &Path) -> Result<PathBuf> {
    let file_name = url.rsplit('/').next().unwrap_or("bst_all.zip");
    let file_path = temp_dir.join(file_name);

    let bar = create_spinner("Downloading best-track archive...".to_string());
    download_with_progress(url, &file_path, &bar).await?;
    bar.finish_with_message("Best-track archive downloaded");

    Ok(file_path)
}

fn default_dest() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
