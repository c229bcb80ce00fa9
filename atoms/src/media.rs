use serde::{Deserialize, Serialize};

/// Image columns hold either one URL or a list of URLs depending on when the
/// row was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageSource {
    One(String),
    Many(Vec<String>),
}

impl ImageSource {
    /// First non-blank URL, as stored.
    pub fn first(&self) -> Option<&str> {
        match self {
            ImageSource::One(src) => Some(src.as_str()).filter(|s| !s.trim().is_empty()),
            ImageSource::Many(srcs) => srcs
                .iter()
                .map(String::as_str)
                .find(|s| !s.trim().is_empty()),
        }
    }
}

pub fn pick_image(source: Option<&ImageSource>) -> Option<&str> {
    source.and_then(ImageSource::first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_non_blank_entry() {
        let many: ImageSource =
            serde_json::from_str(r#"["", "  ", "https://cdn/a.jpg", "https://cdn/b.jpg"]"#).unwrap();
        assert_eq!(many.first(), Some("https://cdn/a.jpg"));

        let one: ImageSource = serde_json::from_str(r#""https://cdn/c.jpg""#).unwrap();
        assert_eq!(pick_image(Some(&one)), Some("https://cdn/c.jpg"));
    }

    #[test]
    fn blank_or_missing_yields_none() {
        assert_eq!(ImageSource::One("   ".into()).first(), None);
        assert_eq!(ImageSource::Many(vec![]).first(), None);
        assert_eq!(pick_image(None), None);
    }

    #[test]
    fn null_column_deserializes_to_none() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default)]
            image_url: Option<ImageSource>,
        }

        let row: Row = serde_json::from_str(r#"{"image_url": null}"#).unwrap();
        assert!(row.image_url.is_none());
        let row: Row = serde_json::from_str("{}").unwrap();
        assert!(row.image_url.is_none());
    }
}
