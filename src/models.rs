//! Source record model for per-word JSON documents.
//!
//! Field extraction is best-effort: scalar fields are kept as raw JSON values
//! so numbers stay numbers, and the free-form analysis sections are kept as
//! compact JSON text without imposing any structure on them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A free-form nested section, pre-serialized to compact JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBlob(String);

impl JsonBlob {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for JsonBlob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        serde_json::to_string(&value)
            .map(JsonBlob)
            .map_err(serde::de::Error::custom)
    }
}

/// One dictionary record, as found in a single input file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordEntry {
    pub word: String,

    #[serde(default, deserialize_with = "object_or_none")]
    pub phonetics: Option<Phonetics>,

    #[serde(default, deserialize_with = "object_list")]
    pub definitions: Vec<Definition>,

    #[serde(default, deserialize_with = "object_list")]
    pub phrases: Vec<Phrase>,

    #[serde(default, deserialize_with = "object_list")]
    pub examples: Vec<Example>,

    #[serde(default)]
    pub etymology: Option<JsonBlob>,

    #[serde(default)]
    pub difficulty_analysis: Option<JsonBlob>,

    #[serde(default)]
    pub semantic_relations: Option<JsonBlob>,

    #[serde(default)]
    pub cultural_context: Option<JsonBlob>,

    #[serde(default)]
    pub memory_aids: Option<JsonBlob>,

    #[serde(default)]
    pub grammatical_info: Option<JsonBlob>,

    #[serde(default)]
    pub metadata: Option<JsonBlob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Phonetics {
    pub british: Option<Value>,
    pub american: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Definition {
    pub part_of_speech: Option<Value>,
    pub definition: Option<Value>,
    pub chinese_translation: Option<Value>,
    pub level: Option<Value>,
    pub frequency: Option<Value>,
    pub register: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Phrase {
    pub phrase: Option<Value>,
    pub meaning: Option<Value>,
    pub example: Option<Value>,
    pub example_translation: Option<Value>,
    pub frequency: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Example {
    pub sentence: Option<Value>,
    pub translation: Option<Value>,
    pub source: Option<Value>,
    pub difficulty: Option<Value>,
}

/// Just the headword of a record; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadwordOnly {
    #[serde(default)]
    pub word: Option<Value>,
}

/// An object or null. Derived structs would also take a JSON array and map
/// its items onto fields by position, so arrays are refused here.
fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Map<String, Value>>::deserialize(deserializer)?
        .map(from_object)
        .transpose()
        .map_err(serde::de::Error::custom)
}

/// An array of objects, with null treated as empty.
fn object_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Option::<Vec<Map<String, Value>>>::deserialize(deserializer)?
        .unwrap_or_default()
        .into_iter()
        .map(from_object)
        .collect::<serde_json::Result<_>>()
        .map_err(serde::de::Error::custom)
}

fn from_object<T: DeserializeOwned>(map: Map<String, Value>) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(map))
}
