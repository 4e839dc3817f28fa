use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A piece of (possibly canonical) content as seen by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Store identity
    pub id: String,

    /// Stable slug, e.g. "CANON.md"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Raw content. List views may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Formally approved as canon
    #[serde(default)]
    pub governed: bool,

    /// Indexed for retrieval
    #[serde(default)]
    pub rag_ready: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: None,
            title: None,
            content: None,
            governed: false,
            rag_ready: false,
            updated_at: Some(Utc::now()),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_flags(mut self, governed: bool, rag_ready: bool) -> Self {
        self.governed = governed;
        self.rag_ready = rag_ready;
        self
    }

    /// Whether this document answers to a manifest key (key first, then title)
    pub fn matches_key(&self, manifest_key: &str) -> bool {
        match (&self.key, &self.title) {
            (Some(key), _) if key == manifest_key => true,
            (_, Some(title)) => title == manifest_key,
            _ => false,
        }
    }

    /// Best label for display
    pub fn label(&self) -> &str {
        self.key
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(&self.id)
    }

    /// Apply a partial update and bump the timestamp
    pub fn apply_patch(&mut self, patch: &DocumentPatch) {
        if let Some(title) = &patch.title {
            self.title = Some(title.clone());
        }
        if let Some(content) = &patch.content {
            self.content = Some(content.clone());
        }
        if let Some(governed) = patch.governed {
            self.governed = governed;
        }
        if let Some(rag_ready) = patch.rag_ready {
            self.rag_ready = rag_ready;
        }
        self.updated_at = Some(Utc::now());
    }
}

/// Partial document update accepted by the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rag_ready: Option<bool>,
}

impl DocumentPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn governed(governed: bool) -> Self {
        Self {
            governed: Some(governed),
            ..Self::default()
        }
    }

    pub fn rag_ready(rag_ready: bool) -> Self {
        Self {
            rag_ready: Some(rag_ready),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_key_prefers_key_then_title() {
        let by_key = Document::new("1").with_key("CANON.md").with_title("Canon");
        assert!(by_key.matches_key("CANON.md"));
        assert!(by_key.matches_key("Canon"));

        let by_title = Document::new("2").with_title("GLOSSARY.md");
        assert!(by_title.matches_key("GLOSSARY.md"));
        assert!(!by_title.matches_key("CANON.md"));

        assert!(!Document::new("3").matches_key("CANON.md"));
    }

    #[test]
    fn test_deserialize_list_view_without_content() {
        let json = r#"{"id":"7","key":"CANON.md","governed":true,"ragReady":false}"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.content, None);
        assert!(doc.governed);
        assert!(!doc.rag_ready);
    }

    #[test]
    fn test_apply_patch_only_touches_present_fields() {
        let mut doc = Document::new("1")
            .with_title("Old")
            .with_content("body")
            .with_flags(true, true);
        doc.apply_patch(&DocumentPatch::rag_ready(false));

        assert_eq!(doc.title.as_deref(), Some("Old"));
        assert_eq!(doc.content.as_deref(), Some("body"));
        assert!(doc.governed);
        assert!(!doc.rag_ready);
    }
}
