use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Format used for the `fecha` column of the CSV store.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where the image lives. The core never inspects it beyond passing it
/// through to the generation call and the report embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ImageReference {
    /// Remote image, fetched over HTTP for the report embed
    Url(String),
    /// Local file (e.g. a temporary upload)
    File(PathBuf),
}

impl ImageReference {
    /// Classify a raw user-supplied string as URL or local path
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            ImageReference::Url(raw.to_string())
        } else {
            ImageReference::File(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageReference::Url(url) => write!(f, "{}", url),
            ImageReference::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// One generated caption, as persisted to the store.
///
/// A record is immutable once appended: description and keywords are only
/// filled in after a successful generation call, and rows are never edited
/// or deleted by the application.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRecord {
    pub image: ImageReference,
    /// User-supplied title (the `descripcion` column of the legacy CSV)
    pub title: String,
    /// Model-generated description (`generated_description` column)
    pub description: String,
    /// Ordered keyword list, duplicates kept (`palabras_clave` column)
    pub keywords: Vec<String>,
    pub created_at: NaiveDateTime,
}

impl GenerationRecord {
    /// `fecha` cell value, `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        self.created_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `palabras_clave` cell value, keywords joined by comma
    pub fn keywords_joined(&self) -> String {
        self.keywords.join(", ")
    }
}
