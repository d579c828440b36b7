//! Onboarding Page Model
//!
//! Defines one screen's worth of onboarding content.

use serde::{Deserialize, Serialize};

/// A single onboarding screen: title, animated image, background, body text.
///
/// Nothing here is validated. Empty strings and dangling image references
/// are legal: whether an image resource actually resolves is a frontend
/// problem and must never affect navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Headline shown at the top of the screen
    pub title: String,

    /// Opaque reference to an external image resource (e.g. "img1.gif")
    #[serde(default)]
    pub image: String,

    /// Background color in hex format (e.g. "#68C0F8")
    #[serde(default)]
    pub background: String,

    /// Body text shown under the image
    #[serde(default)]
    pub description: String,
}

impl Page {
    /// Create a page with all fields
    pub fn new(
        title: impl Into<String>,
        image: impl Into<String>,
        background: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            background: background.into(),
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_serialization() {
        let page = Page::new(
            "What's new",
            "img1.gif",
            "#68C0F8",
            "A quick tour of the new features.",
        );

        let json = serde_json::to_string_pretty(&page).unwrap();
        let parsed: Page = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, page);
    }

    #[test]
    fn test_empty_fields_are_legal() {
        let page = Page::new("", "", "", "");
        assert_eq!(page.title, "");
        assert_eq!(page.image, "");

        // A page with only a title still deserializes; the rest defaults
        let parsed: Page = toml::from_str(r#"title = "Payment""#).unwrap();
        assert_eq!(parsed.title, "Payment");
        assert_eq!(parsed.background, "");
    }
}
