//! Dataset sink: persists participant rows as JSON or Parquet.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use courtbench_core::{ParticipantRow, dataset};
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value};
use tracing::info;

use crate::StoreError;

/// Default file name for the written dataset.
pub const DEFAULT_OUTPUT: &str = "dataset_questions_opinions.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Array of row objects.
    #[default]
    Json,
    /// `{column: {"<row index>": value}}`, as written by dataframe tooling.
    JsonColumns,
    /// Single Arrow record batch in a Parquet file.
    Parquet,
}

/// Write the dataset to `path`, creating parent directories as needed.
pub fn write_dataset(
    rows: &[ParticipantRow],
    path: &Path,
    format: OutputFormat,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;

    match format {
        OutputFormat::Json => {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, rows)?;
            writer.flush()?;
        }
        OutputFormat::JsonColumns => {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &column_layout(rows)?)?;
            writer.flush()?;
        }
        OutputFormat::Parquet => {
            let batch = dataset::to_record_batch(rows)?;
            let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
            writer.write(&batch)?;
            writer.close()?;
        }
    }

    info!(rows = rows.len(), path = %path.display(), ?format, "wrote participant dataset");
    Ok(())
}

/// Pivot rows into column → (row index → value) objects.
fn column_layout(rows: &[ParticipantRow]) -> Result<Value, StoreError> {
    let mut columns: Map<String, Value> = Map::new();
    for (i, row) in rows.iter().enumerate() {
        let Value::Object(fields) = serde_json::to_value(row)? else {
            continue;
        };
        for (column, value) in fields {
            if let Value::Object(cells) = columns
                .entry(column)
                .or_insert_with(|| Value::Object(Map::new()))
            {
                cells.insert(i.to_string(), value);
            }
        }
    }
    Ok(Value::Object(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, StringArray};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn rows() -> Vec<ParticipantRow> {
        vec![
            ParticipantRow {
                webcast_id: "H1".into(),
                name: "A".into(),
                has_question: true,
                has_opinion: false,
                language: "fr".into(),
                question: "Why?".into(),
                case_id: "C1".into(),
                opinion: String::new(),
                opinion_type: String::new(),
            },
            ParticipantRow {
                webcast_id: "H1".into(),
                name: "B".into(),
                has_question: false,
                has_opinion: true,
                language: "en".into(),
                question: String::new(),
                case_id: "C1".into(),
                opinion: "DISSENTING OPINION...".into(),
                opinion_type: "DISSENTING".into(),
            },
        ]
    }

    #[test]
    fn json_records_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("dataset.json");
        write_dataset(&rows(), &path, OutputFormat::Json).unwrap();

        let parsed: Vec<ParticipantRow> =
            serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(parsed, rows());
    }

    #[test]
    fn json_columns_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        write_dataset(&rows(), &path, OutputFormat::JsonColumns).unwrap();

        let value: Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(value["name"]["0"], "A");
        assert_eq!(value["name"]["1"], "B");
        assert_eq!(value["has_opinion"]["1"], true);
        assert_eq!(value["opinion_type"]["1"], "DISSENTING");
        assert_eq!(value.as_object().unwrap().len(), 9);
    }

    #[test]
    fn json_columns_empty_dataset() {
        assert_eq!(column_layout(&[]).unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn parquet_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.parquet");
        write_dataset(&rows(), &path, OutputFormat::Parquet).unwrap();

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
            .unwrap()
            .build()
            .unwrap();
        let batches: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
        let total: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total, 2);

        let types = batches[0]
            .column_by_name("opinion_type")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(types.value(1), "DISSENTING");
        assert_eq!(types.null_count(), 0);
    }
}
