use crate::config::ExportConfig;
use crate::error::CaptionError;
use crate::model::{GenerationRecord, ImageReference};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{debug, warn};
use reqwest::Client;
use std::path::PathBuf;
use tokio::fs;

/// Fixed name of the exported report inside the export directory.
pub const REPORT_FILENAME: &str = "informe_imagen.md";

/// Result of an export: the written file, plus a warning when the image
/// could not be embedded.
#[derive(Debug)]
pub struct ExportedReport {
    pub path: PathBuf,
    pub image_warning: Option<String>,
}

/// Renders one record into a shareable Markdown report: heading, labeled
/// paragraphs, and the image embedded as a base64 data URI at a fixed
/// display width.
pub struct ReportExporter {
    config: ExportConfig,
    client: Client,
}

impl ReportExporter {
    pub fn new(config: &ExportConfig) -> Self {
        ReportExporter {
            config: config.clone(),
            client: Client::new(),
        }
    }

    /// Write the report and return its path.
    ///
    /// An unreachable URL, missing file or unreadable image only drops the
    /// image section; the text sections are always produced.
    pub async fn export(&self, record: &GenerationRecord) -> Result<ExportedReport, CaptionError> {
        let mut document = String::from("# Informe de imagen\n\n");
        document.push_str(&format!("**Fecha:** {}\n\n", record.timestamp()));
        document.push_str(&format!("**Título:** {}\n\n", record.title));
        document.push_str(&format!("**Descripción:** {}\n\n", record.description));
        document.push_str(&format!(
            "**Palabras clave:** {}\n\n",
            record.keywords_joined()
        ));

        let image_warning = match self.embed_image(&record.image).await {
            Ok(tag) => {
                document.push_str(&tag);
                None
            }
            Err(e) => {
                warn!("{}", e);
                Some(e.to_string())
            }
        };

        fs::create_dir_all(&self.config.dir).await?;
        let path = self.config.dir.join(REPORT_FILENAME);
        fs::write(&path, document).await?;
        debug!("Report written to {}", path.display());

        Ok(ExportedReport {
            path,
            image_warning,
        })
    }

    /// Fetch or read the image and render it as an `<img>` data URI tag.
    async fn embed_image(&self, image: &ImageReference) -> Result<String, CaptionError> {
        let (mime, bytes) = match image {
            ImageReference::Url(url) => {
                let response = self
                    .client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| CaptionError::ExportImage(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(CaptionError::ExportImage(format!(
                        "{} returned {}",
                        url,
                        response.status()
                    )));
                }

                let mime = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| {
                        mime_guess::from_path(url).first_or_octet_stream().to_string()
                    });

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| CaptionError::ExportImage(e.to_string()))?;
                (mime, bytes.to_vec())
            }
            ImageReference::File(path) => {
                let bytes = fs::read(path).await.map_err(|e| {
                    CaptionError::ExportImage(format!("{}: {}", path.display(), e))
                })?;
                let mime = mime_guess::from_path(path).first_or_octet_stream().to_string();
                (mime, bytes)
            }
        };

        Ok(format!(
            "<img src=\"data:{};base64,{}\" width=\"{}\">\n",
            mime,
            STANDARD.encode(&bytes),
            self.config.image_width
        ))
    }
}
