use crate::model::GenerationRecord;

/// Returned when no prior record has both a title and a description.
pub const NO_EXAMPLES_PLACEHOLDER: &str = "No hay descripciones generadas previas.";

/// Format prior records into the few-shot block fed to the description
/// prompt.
///
/// Only records with a non-empty title and a non-empty description qualify,
/// kept in the store's insertion order. Returns a fixed placeholder when
/// nothing qualifies.
pub fn format_examples(records: &[GenerationRecord]) -> String {
    let mut block = String::new();
    for record in records {
        if record.title.trim().is_empty() || record.description.trim().is_empty() {
            continue;
        }
        block.push_str(&format!(
            "Título: {}\nDescripción: {}\n\n",
            record.title, record.description
        ));
    }

    if block.is_empty() {
        NO_EXAMPLES_PLACEHOLDER.to_string()
    } else {
        format!("Ejemplos previos:\n\n{}", block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageReference;
    use chrono::NaiveDate;

    fn record(title: &str, description: &str) -> GenerationRecord {
        GenerationRecord {
            image: ImageReference::parse("https://example.com/foto.jpg"),
            title: title.to_string(),
            description: description.to_string(),
            keywords: Vec::new(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_empty_corpus_yields_placeholder() {
        assert_eq!(format_examples(&[]), NO_EXAMPLES_PLACEHOLDER);
    }

    #[test]
    fn test_records_without_description_are_skipped() {
        let records = vec![record("Danza", ""), record("", "Una danza en la plaza.")];
        assert_eq!(format_examples(&records), NO_EXAMPLES_PLACEHOLDER);
    }

    #[test]
    fn test_qualifying_records_kept_in_order() {
        let records = vec![
            record("Danza", "Danza tradicional en la plaza."),
            record("Altar", ""),
            record("Procesión", "Procesión con estandartes."),
        ];
        let block = format_examples(&records);

        assert!(block.starts_with("Ejemplos previos:"));
        assert!(block.contains("Título: Danza\nDescripción: Danza tradicional en la plaza."));
        assert!(block.contains("Título: Procesión\nDescripción: Procesión con estandartes."));
        assert!(!block.contains("Altar"));

        let danza = block.find("Título: Danza").unwrap();
        let procesion = block.find("Título: Procesión").unwrap();
        assert!(danza < procesion);
    }
}
