use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    annotate::annotate_all,
    cli::{create_spinner, ProcessArgs},
    deserialise::read_archive,
    export::{fallback_path, save_with_fallback, OutputFormat},
    geofence::PAR,
    naming::{NameResolver, NameTable, OVERRIDES_VERSION},
    summary::Summary,
};

use super::make_output_file_name;

/// Runs the whole pipeline and returns the path written.
pub async fn process(args: ProcessArgs) -> Result<PathBuf> {
    let bar = create_spinner("Parsing best-track archive...".to_string());
    let archive = read_archive(&args.input, &PAR).context("cannot load best-track archive")?;
    bar.finish_with_message(format!("Parsed {} storms", archive.tracks.len()));

    let resolver = Arc::new(build_resolver(&args));

    let skipped = archive.skipped;
    let rows = annotate_all(archive.tracks, resolver).await;

    let format = args.format.unwrap_or_else(|| {
        args.output
            .as_deref()
            .map(OutputFormat::from_path)
            .unwrap_or(OutputFormat::Csv)
    });
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| make_output_file_name(format));
    let fallback = args
        .fallback_output
        .clone()
        .unwrap_or_else(|| fallback_path(&output));

    let bar = create_spinner(format!("Writing {} rows...", rows.len()));
    let written = save_with_fallback(&rows, &output, &fallback, format)?;
    bar.finish_with_message("Dataset written");

    Summary::new(&rows, skipped, written.clone()).log();

    Ok(written)
}

fn build_resolver(args: &ProcessArgs) -> NameResolver {
    let table = NameTable::from_csv_or_empty(&args.mapping);
    if table.is_empty() {
        warn!(
            path = %args.mapping.display(),
            "no name mapping entries, only overrides and sentinels apply"
        );
    }

    let mut resolver = NameResolver::new(table);
    if let Some(path) = &args.overrides {
        resolver = resolver.with_overrides(NameTable::from_csv_or_empty(path));
    }

    info!(
        overrides_version = OVERRIDES_VERSION,
        overrides = resolver.override_count(),
        mapping = resolver.table_count(),
        "name resolver ready"
    );

    resolver
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {

    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const ARCHIVE: &str = "\
66666 6101  002 0001 6101 0 6 TESTNAME            20200101
61091200 002 3 200 1250          040
61091206 002 5 210 1240  960
66666 1330  003 0030 1330 0 6 HAIYAN              20140311
13110400 002 2 060 1520 1002     000
13110712 002 5 111 1300  895     170
66666 2001  001 0001 2001 0 6 EMPTY               20200101
";

    fn args(dir: &TempDir) -> ProcessArgs {
        let input = dir.path().join("bst_all.txt");
        let mapping = dir.path().join("mapping.csv");
        fs::write(&input, ARCHIVE).unwrap();
        fs::write(&mapping, "Year,International Name,PAGASA Name\n2013,Haiyan,Yolanda\n").unwrap();

        ProcessArgs {
            input,
            mapping,
            overrides: None,
            output: Some(dir.path().join("out.csv")),
            fallback_output: None,
            format: None,
        }
    }

    #[tokio::test]
    async fn should_process_archive_end_to_end() {
        let dir = TempDir::new().unwrap();

        let written = process(args(&dir)).await.unwrap();

        assert_eq!(written, dir.path().join("out.csv"));
        let text = fs::read_to_string(written).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[1],
            "6101,TESTNAME,PRE-1963,Tropical Storm,1961091200,Inside,20.0,125.0,,40,3,1961"
        );
        assert_eq!(
            lines[2],
            "6101,TESTNAME,PRE-1963,Typhoon,1961091206,Inside,21.0,124.0,960,,5,1961"
        );
        assert!(lines[3]
            .starts_with("1330,HAIYAN,Yolanda,Tropical Depression,2013110400,Outside,"));
        assert!(lines[4].starts_with("1330,HAIYAN,Yolanda,Super Typhoon,2013110712,Inside,"));
    }

    #[tokio::test]
    async fn should_fail_without_input() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.input = dir.path().join("missing.txt");

        assert!(process(args).await.is_err());
    }

    #[tokio::test]
    async fn should_continue_without_mapping() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir);
        args.mapping = dir.path().join("missing.csv");
        args.output = Some(dir.path().join("out.parquet"));

        let written = process(args).await.unwrap();

        assert_eq!(written, dir.path().join("out.parquet"));
        assert!(written.exists());
    }
}
