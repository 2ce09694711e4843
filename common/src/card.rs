//! The card record as it arrives from the catalog.
//!
//! Records are semi-structured: a handful of well-known keys plus an open-ended
//! set of (possibly nested) comparable fields. The record is kept as a JSON
//! object so nothing is lost between the catalog, the persisted selection and
//! the renderer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ID_KEY: &str = "id";
pub const ALIAS_KEY: &str = "seo_card_alias";
pub const NAME_KEY: &str = "card_name";
pub const IMAGE_KEY: &str = "image";

const UNNAMED: &str = "Unnamed card";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardRecord(Map<String, Value>);

impl CardRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a record from any JSON value. Only objects are records.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Numeric identifier, accepting both JSON numbers and digit strings.
    pub fn id(&self) -> Option<u64> {
        match self.0.get(ID_KEY)? {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        self.0
            .get(ALIAS_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|alias| !alias.is_empty())
    }

    /// The de-duplication key: the numeric id when present, else the alias.
    ///
    /// Never fails. A record carrying neither maps to the empty string.
    pub fn identity(&self) -> String {
        match self.id() {
            Some(id) => id.to_string(),
            None => self.alias().unwrap_or_default().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        self.0
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(UNNAMED)
    }

    pub fn image(&self) -> Option<&str> {
        self.0.get(IMAGE_KEY).and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for CardRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl std::fmt::Display for CardRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
