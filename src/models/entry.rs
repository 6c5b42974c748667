use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Keys the i3bar protocol defines as strings. Anything else is carried as-is.
const TEXT_FIELDS: [&str; 5] = ["name", "instance", "markup", "full_text", "color"];

/// One status bar segment.
///
/// Keys keep their upstream order and their raw JSON text, so an entry that is
/// parsed and serialised again comes out the same, except that whitespace
/// between tokens is dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusEntry {
    fields: IndexMap<String, Box<RawValue>>,
}

impl StatusEntry {
    /// Segment carrying nothing but a display text.
    pub fn from_full_text(text: &str) -> serde_json::Result<Self> {
        let mut fields = IndexMap::with_capacity(1);
        fields.insert("full_text".to_string(), serde_json::value::to_raw_value(&text)?);
        Ok(Self { fields })
    }

    pub fn name(&self) -> Option<String> {
        self.text("name")
    }

    pub fn instance(&self) -> Option<String> {
        self.text("instance")
    }

    pub fn markup(&self) -> Option<String> {
        self.text("markup")
    }

    pub fn full_text(&self) -> Option<String> {
        self.text("full_text")
    }

    pub fn color(&self) -> Option<String> {
        self.text("color")
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name().as_deref() == Some(name)
    }

    fn text(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(|raw| serde_json::from_str(raw.get()).ok())
    }

    /// Rejects entries whose well-known fields are neither JSON strings nor
    /// `null`. A `null` field reads back as absent.
    pub(crate) fn validate(&self) -> serde_json::Result<()> {
        for key in TEXT_FIELDS {
            if let Some(raw) = self.fields.get(key) {
                let value = raw.get().trim();
                if value != "null" && !value.starts_with('"') {
                    return Err(serde_json::Error::custom(format!(
                        "field `{}` must be a string, found {}",
                        key,
                        raw.get()
                    )));
                }
            }
        }
        Ok(())
    }
}
