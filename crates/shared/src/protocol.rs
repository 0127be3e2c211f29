//! Wire shape of one element of the REST Countries v2 array.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LanguageRef {
    Code(String),
    Detailed {
        #[serde(default)]
        iso639_1: Option<String>,
        #[serde(default)]
        iso639_2: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub name: String,
    pub population: u64,
    pub subregion: String,
    pub languages: Vec<LanguageRef>,
    #[serde(default)]
    pub capital: String,
    #[serde(rename = "flag", default)]
    pub flag_image_url: String,
    #[serde(default)]
    pub borders: Vec<String>,
    #[serde(default)]
    pub alpha3_code: String,
}

impl CountryRecord {
    pub fn language_count(&self) -> usize {
        self.languages.len()
    }
}
