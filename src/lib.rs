pub mod builder;
pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod generator;
pub mod keywords;
pub mod model;
pub mod providers;
pub mod share;
pub mod store;

pub use builder::{Captioner, CaptionerBuilder, ProviderKind};
pub use config::AppConfig;
pub use error::CaptionError;
pub use model::{GenerationRecord, ImageReference};

use crate::export::ReportExporter;
use crate::generator::DescriptionGenerator;
use crate::keywords::KeywordExtractor;
use crate::providers::{ChatModel, ProviderFactory};
use crate::store::{CsvStore, FirestoreMirror};
use chrono::Local;
use log::warn;
use std::path::PathBuf;

/// Result of one full caption action.
#[derive(Debug)]
pub struct CaptionOutcome {
    /// The record as appended to the store
    pub record: GenerationRecord,
    /// Path of the exported report, when the export succeeded
    pub report_path: Option<PathBuf>,
    /// WhatsApp share deep link for the description and keywords
    pub share_url: String,
    /// Non-fatal problems along the way (unparseable keywords, missing
    /// report image, failed remote mirror)
    pub warnings: Vec<String>,
}

/// Run the full caption action with the configured default provider.
pub async fn generate_caption(
    config: &AppConfig,
    image: ImageReference,
    title: &str,
) -> Result<CaptionOutcome, CaptionError> {
    let model = ProviderFactory::get_default_model(config)?;
    generate_caption_with_model(config, model.as_ref(), image, title).await
}

/// Run the full caption action against an explicit chat model.
///
/// Sequence: re-read the store for few-shot examples, generate the
/// description, extract keywords, append the record, mirror it, export the
/// report, build the share link. Any failure before the description is
/// obtained aborts with nothing persisted; everything after that degrades
/// gracefully into [`CaptionOutcome::warnings`].
pub async fn generate_caption_with_model(
    config: &AppConfig,
    model: &dyn ChatModel,
    image: ImageReference,
    title: &str,
) -> Result<CaptionOutcome, CaptionError> {
    let store = CsvStore::new(&config.store);
    let examples = corpus::format_examples(&store.load()?);

    let generator = DescriptionGenerator::new(model, &config.generation);
    let description = generator.generate(&image, title, &examples).await?;

    let mut warnings = Vec::new();

    // An undecodable keyword reply degrades to an empty list; a transport
    // or provider error on the keyword call still aborts the action.
    let extractor = KeywordExtractor::new(model, &config.generation);
    let keywords = match extractor.extract(&description).await {
        Ok(keywords) => keywords,
        Err(e @ CaptionError::KeywordParse(_)) => {
            warn!("{}", e);
            warnings.push(e.to_string());
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let record = GenerationRecord {
        image,
        title: title.to_string(),
        description,
        keywords,
        created_at: Local::now().naive_local(),
    };

    // Local CSV write is primary; everything below is best-effort.
    store.append(&record)?;

    if config.firestore.enabled {
        let mirrored = match FirestoreMirror::new(&config.firestore) {
            Ok(mirror) => mirror.mirror(&record).await,
            Err(e) => Err(e),
        };
        if let Err(e) = mirrored {
            warn!("{}", e);
            warnings.push(e.to_string());
        }
    }

    let report_path = match ReportExporter::new(&config.export).export(&record).await {
        Ok(report) => {
            if let Some(warning) = report.image_warning {
                warnings.push(warning);
            }
            Some(report.path)
        }
        Err(e) => {
            warn!("Report export failed: {}", e);
            warnings.push(e.to_string());
            None
        }
    };

    let share_url = share::build_share_link(&record);

    Ok(CaptionOutcome {
        record,
        report_path,
        share_url,
        warnings,
    })
}
