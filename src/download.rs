//! Downloads the JMA best-track archive and unpacks the text file from it.

use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Error, Result};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

pub const BEST_TRACK_URL: &str =
    "https://www.jma.go.jp/jma/jma-eng/jma-center/rsmc-hp-pub-eg/Besttracks/bst_all.zip";
pub const BEST_TRACK_FILE: &str = "bst_all.txt";

/// Leading bytes of a zip local file header.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Streams the best-track zip at `url` into `file_path`. The body must be
/// a zip both by content type and by its first bytes.
pub async fn download_with_progress(
    url: &str,
    file_path: &Path,
    progress_bar: &ProgressBar,
) -> Result<(), Error> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("cannot reach {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("download of {url} failed: {status}");
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    check_content_type(content_type)?;

    if let Some(total_size) = response.content_length().filter(|n| *n > 0) {
        progress_bar.set_length(total_size);
        progress_bar.set_style(
            ProgressStyle::with_template(
                "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
            )?
            .progress_chars("=> "),
        );
    }

    let mut file = File::create(file_path)
        .with_context(|| format!("cannot create {}", file_path.display()))?;
    let mut downloaded = 0u64;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.context("download interrupted")?;
        if downloaded == 0 {
            check_zip_magic(&chunk)?;
        }
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        progress_bar.set_position(downloaded);
    }

    if downloaded == 0 {
        bail!("{url} returned an empty body");
    }

    debug!(bytes = downloaded, path = %file_path.display(), "download complete");

    Ok(())
}

/// Rejects bodies the server labels as anything but a zip or raw bytes.
/// A missing header is accepted and left to the magic-byte check.
fn check_content_type(content_type: Option<&str>) -> Result<()> {
    let Some(content_type) = content_type else {
        return Ok(());
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "application/zip" | "application/x-zip-compressed" | "application/octet-stream" => Ok(()),
        other => bail!("expected a {BEST_TRACK_FILE} zip archive, server sent {other}"),
    }
}

fn check_zip_magic(first_chunk: &[u8]) -> Result<()> {
    if first_chunk.len() >= ZIP_MAGIC.len() && !first_chunk.starts_with(ZIP_MAGIC) {
        bail!("downloaded body is not a zip archive");
    }
    Ok(())
}

/// Copies `bst_all.txt` out of the zip at `zip_path` into `dest_dir`.
pub fn extract_best_track(zip_path: &Path, dest_dir: &Path) -> Result<PathBuf> {
    let file = File::open(zip_path)
        .with_context(|| format!("cannot open {}", zip_path.display()))?;
    let mut zip = zip::ZipArchive::new(file)?;

    let name = zip
        .file_names()
        .find(|name| name.rsplit('/').next() == Some(BEST_TRACK_FILE))
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{} not found in {}", BEST_TRACK_FILE, zip_path.display()))?;

    let mut entry = zip.by_name(&name)?;
    let out_path = dest_dir.join(BEST_TRACK_FILE);
    let mut out = File::create(&out_path)?;
    io::copy(&mut entry, &mut out)?;

    info!(path = %out_path.display(), "best-track archive extracted");

    Ok(out_path)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::fs;

    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn make_zip(dir: &Path, entry_name: &str) -> PathBuf {
        let path = dir.join("bst_all.zip");
        let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
        zip.start_file(entry_name, SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"66666 1330  150 0030 1330 0 6 HAIYAN\n").unwrap();
        zip.finish().unwrap();
        path
    }

    #[test]
    fn should_extract_best_track() {
        let dir = TempDir::new().unwrap();
        let zip_path = make_zip(dir.path(), "bst_all.txt");

        let out = extract_best_track(&zip_path, dir.path()).unwrap();

        assert_eq!(out, dir.path().join(BEST_TRACK_FILE));
        assert!(fs::read_to_string(out).unwrap().contains("HAIYAN"));
    }

    #[test]
    fn should_accept_zip_content_types() {
        assert!(check_content_type(None).is_ok());
        assert!(check_content_type(Some("application/zip")).is_ok());
        assert!(check_content_type(Some("Application/X-Zip-Compressed")).is_ok());
        assert!(check_content_type(Some("application/octet-stream; charset=binary")).is_ok());
    }

    #[test]
    fn should_reject_html_error_page() {
        let err = check_content_type(Some("text/html; charset=UTF-8")).unwrap_err();
        assert!(err.to_string().contains("text/html"));
        assert!(check_zip_magic(b"<!DOCTYPE html>").is_err());
        assert!(check_zip_magic(b"PK\x03\x04rest").is_ok());
    }

    #[test]
    fn should_fail_without_best_track_entry() {
        let dir = TempDir::new().unwrap();
        let zip_path = make_zip(dir.path(), "readme.txt");

        assert!(extract_best_track(&zip_path, dir.path()).is_err());
    }
}
