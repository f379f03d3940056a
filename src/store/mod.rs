mod firestore;

pub use firestore::FirestoreMirror;

use crate::config::StoreConfig;
use crate::error::CaptionError;
use crate::model::{GenerationRecord, ImageReference, TIMESTAMP_FORMAT};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::warn;
use std::fs;
use std::path::PathBuf;

/// Fixed column order of the store. `descripcion` is the user title and
/// `generated_description` the model output, matching the legacy dataset.
const HEADER: [&str; 5] = [
    "imagen",
    "descripcion",
    "generated_description",
    "palabras_clave",
    "fecha",
];

/// Semicolon-delimited CSV log of generated records.
///
/// The file is the source of both the persisted history and the few-shot
/// corpus: it is re-read per request and rewritten in full on every append
/// (load, push, atomic rename). Not protected against concurrent writers;
/// acceptable for single-user, low-volume usage.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(config: &StoreConfig) -> Self {
        CsvStore {
            path: config.path.clone(),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load all records. A missing file is an empty store.
    pub fn load(&self) -> Result<Vec<GenerationRecord>, CaptionError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let bytes = fs::read(&self.path)?;
        let text = decode_store_text(&bytes);

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let cell = |i: usize| row.get(i).unwrap_or("").trim().to_string();

            let keywords: Vec<String> = cell(3)
                .split(',')
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect();

            records.push(GenerationRecord {
                image: ImageReference::parse(&cell(0)),
                title: cell(1),
                description: cell(2),
                keywords,
                created_at: parse_timestamp(&cell(4)),
            });
        }

        Ok(records)
    }

    /// Append one record: load, push, rewrite the whole file.
    ///
    /// The rewrite goes through a temporary file renamed into place, so a
    /// failed write never leaves a half-written store behind.
    pub fn append(&self, record: &GenerationRecord) -> Result<(), CaptionError> {
        let mut records = self.load()?;
        records.push(record.clone());
        self.rewrite(&records)
    }

    fn rewrite(&self, records: &[GenerationRecord]) -> Result<(), CaptionError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(Vec::new());

        writer.write_record(HEADER)?;
        for record in records {
            writer.write_record([
                record.image.to_string(),
                record.title.clone(),
                record.description.clone(),
                record.keywords_joined(),
                record.timestamp(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        fs::write(&tmp_path, bytes)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// Legacy datasets are ISO-8859-1 encoded; newer files are UTF-8. Try UTF-8
/// first and fall back to a Latin-1 byte-to-char mapping.
fn decode_store_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

fn parse_timestamp(raw: &str) -> NaiveDateTime {
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        return timestamp;
    }
    // Some legacy rows carry a bare date
    if let Ok(date) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(timestamp) = date.and_hms_opt(0, 0, 0) {
            return timestamp;
        }
    }
    warn!("Unreadable fecha cell {:?}, defaulting to epoch", raw);
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}
