use crate::model::GenerationRecord;
use url::form_urlencoded;

/// Build a WhatsApp deep link sharing the description and keywords.
///
/// The text blob is URL-encoded into the `text` query parameter; nothing is
/// sent anywhere, the link is just handed to the user.
pub fn build_share_link(record: &GenerationRecord) -> String {
    let text = format!(
        "Descripción: {}\nPalabras clave: {}",
        record.description,
        record.keywords_joined()
    );
    let encoded: String = form_urlencoded::byte_serialize(text.as_bytes()).collect();
    format!("https://wa.me/?text={}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageReference;
    use chrono::NaiveDate;

    #[test]
    fn test_share_link_encodes_text() {
        let record = GenerationRecord {
            image: ImageReference::parse("https://example.com/foto.jpg"),
            title: "Danza".to_string(),
            description: "Una danza tradicional".to_string(),
            keywords: vec!["danza".to_string(), "plaza".to_string()],
            created_at: NaiveDate::from_ymd_opt(2024, 6, 24)
                .unwrap()
                .and_hms_opt(15, 30, 5)
                .unwrap(),
        };

        let link = build_share_link(&record);
        assert!(link.starts_with("https://wa.me/?text="));
        // Spaces and non-ASCII must be escaped
        assert!(!link.contains(' '));
        assert!(link.contains("Descripci%C3%B3n"));
        assert!(link.contains("danza%2C+plaza"));
    }
}
