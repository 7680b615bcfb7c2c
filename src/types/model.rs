use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Represents an OpenAI model identifier.
///
/// This can be a predefined model version or a custom string value
/// for models that may be added in the future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for future models or fine-tuned models)
    Custom(String),
}

/// Known OpenAI model versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// GPT-4o (latest version)
    #[serde(rename = "gpt-4o")]
    Gpt4o,

    /// GPT-4o (2024-08-06 version)
    #[serde(rename = "gpt-4o-2024-08-06")]
    Gpt4o20240806,

    /// GPT-4o (2024-11-20 version)
    #[serde(rename = "gpt-4o-2024-11-20")]
    Gpt4o20241120,

    /// GPT-4o mini (latest version)
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,

    /// GPT-4o mini (2024-07-18 version)
    #[serde(rename = "gpt-4o-mini-2024-07-18")]
    Gpt4oMini20240718,

    /// GPT-4 Turbo
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,

    /// GPT-3.5 Turbo
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,

    /// DALL-E 3 image generation
    #[serde(rename = "dall-e-3")]
    DallE3,

    /// DALL-E 2 image generation
    #[serde(rename = "dall-e-2")]
    DallE2,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::Gpt4o => write!(f, "gpt-4o"),
            KnownModel::Gpt4o20240806 => write!(f, "gpt-4o-2024-08-06"),
            KnownModel::Gpt4o20241120 => write!(f, "gpt-4o-2024-11-20"),
            KnownModel::Gpt4oMini => write!(f, "gpt-4o-mini"),
            KnownModel::Gpt4oMini20240718 => write!(f, "gpt-4o-mini-2024-07-18"),
            KnownModel::Gpt4Turbo => write!(f, "gpt-4-turbo"),
            KnownModel::Gpt35Turbo => write!(f, "gpt-3.5-turbo"),
            KnownModel::DallE3 => write!(f, "dall-e-3"),
            KnownModel::DallE2 => write!(f, "dall-e-2"),
        }
    }
}

impl FromStr for KnownModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpt-4o" => Ok(KnownModel::Gpt4o),
            "gpt-4o-2024-08-06" => Ok(KnownModel::Gpt4o20240806),
            "gpt-4o-2024-11-20" => Ok(KnownModel::Gpt4o20241120),
            "gpt-4o-mini" => Ok(KnownModel::Gpt4oMini),
            "gpt-4o-mini-2024-07-18" => Ok(KnownModel::Gpt4oMini20240718),
            "gpt-4-turbo" => Ok(KnownModel::Gpt4Turbo),
            "gpt-3.5-turbo" => Ok(KnownModel::Gpt35Turbo),
            "dall-e-3" => Ok(KnownModel::DallE3),
            "dall-e-2" => Ok(KnownModel::DallE2),
            _ => Err(Error::validation(
                format!("unknown model: {s}"),
                Some("model".to_string()),
            )),
        }
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownModel::from_str(s).map(Model::Known)
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        Model::Custom(model)
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        Model::Custom(model.to_string())
    }
}
