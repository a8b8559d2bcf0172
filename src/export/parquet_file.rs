//! Parquet output.

use std::{fs::File, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, Float64Array, RecordBatch, StringArray, UInt16Array},
    datatypes::{DataType, Field, Schema, SchemaRef},
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};

use crate::{annotate::AnnotatedRow, cli::create_progress_bar, error::TrackError};

use super::COLUMNS;

const CHUNK_SIZE: usize = 100_000;

fn schema() -> SchemaRef {
    let types = [
        (DataType::Utf8, false),
        (DataType::Utf8, false),
        (DataType::Utf8, false),
        (DataType::Utf8, false),
        (DataType::Utf8, false),
        (DataType::Utf8, false),
        (DataType::Float64, true),
        (DataType::Float64, true),
        (DataType::UInt16, true),
        (DataType::UInt16, true),
        (DataType::Utf8, false),
        (DataType::UInt16, false),
    ];

    Arc::new(Schema::new(
        COLUMNS
            .iter()
            .zip(types)
            .map(|(name, (data_type, nullable))| Field::new(*name, data_type, nullable))
            .collect::<Vec<_>>(),
    ))
}

/// Writes rows in batches of [`CHUNK_SIZE`] with SNAPPY compression.
pub fn save_parquet(rows: &[AnnotatedRow], path: &Path) -> Result<(), TrackError> {
    let parquet_err = |source| TrackError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| TrackError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = schema();
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props)).map_err(parquet_err)?;

    let pb = create_progress_bar(rows.len() as u64, "Writing parquet file chunks".to_string());

    for chunk in rows.chunks(CHUNK_SIZE) {
        let batch = make_batch(chunk, schema.clone())?;
        writer.write(&batch).map_err(parquet_err)?;
        pb.inc(chunk.len() as u64);
    }

    writer.close().map_err(parquet_err)?;
    pb.finish_with_message("Finished writing parquet file");

    Ok(())
}

fn make_batch(rows: &[AnnotatedRow], schema: SchemaRef) -> Result<RecordBatch, TrackError> {
    let strings = |f: fn(&AnnotatedRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(rows.iter().map(f)))
    };

    let columns: Vec<ArrayRef> = vec![
        strings(|r| r.storm_id.as_str()),
        strings(|r| r.storm_name.as_str()),
        strings(|r| r.local_name.as_str()),
        strings(|r| r.classification.label()),
        strings(|r| r.timestamp.as_str()),
        strings(|r| r.status.label()),
        Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.latitude))) as ArrayRef,
        Arc::new(Float64Array::from_iter(rows.iter().map(|r| r.longitude))) as ArrayRef,
        Arc::new(UInt16Array::from_iter(rows.iter().map(|r| r.pressure_hpa))) as ArrayRef,
        Arc::new(UInt16Array::from_iter(rows.iter().map(|r| r.wind_kt))) as ArrayRef,
        strings(|r| r.grade.as_str()),
        Arc::new(UInt16Array::from_iter_values(rows.iter().map(|r| r.year))) as ArrayRef,
    ];

    Ok(RecordBatch::try_new(schema, columns)?)
}

// -- Tests -------------------------------------------------------------------
