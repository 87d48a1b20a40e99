use serde::{Deserialize, Deserializer, Serialize};

/// A vocabulary entry as returned by the study-plan endpoints.
///
/// The backend has produced two shapes for this over time: a lean one
/// (`category` nullable, no example fields) and a detailed one carrying
/// `exampleSentence`/`exampleTranslation`. Both decode into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub id: String,
    pub word: String,
    pub language: String,
    #[serde(default)]
    pub category: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub part_of_speech_list: Vec<PartOfSpeech>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phonetics: Vec<Phonetic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_sentence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

impl Word {
    pub fn first_ipa(&self) -> Option<&str> {
        self.phonetics
            .iter()
            .map(|phonetic| &phonetic.ipa[..])
            .find(|ipa| !ipa.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub ipa: String,
    #[serde(default)]
    pub audio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartOfSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    /// `null`, a bare string and an array have all been observed on the wire.
    #[serde(default, deserialize_with = "definitions_from_any")]
    pub definitions: Option<Vec<String>>,
    #[serde(default)]
    pub example_sentences: Option<Vec<String>>,
    #[serde(default)]
    pub gender: Option<Vec<String>>,
    #[serde(default)]
    pub plural_forms: Option<Vec<String>>,
}

fn definitions_from_any<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Definitions {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Definitions>::deserialize(deserializer)? {
        None => None,
        Some(Definitions::One(definition)) => Some(vec![definition]),
        Some(Definitions::Many(definitions)) => Some(definitions),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
