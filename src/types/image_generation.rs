use serde::{Deserialize, Serialize};
use url::Url;

/// A single generated image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratedImage {
    /// URL of the generated image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,

    /// The prompt after any rewriting by the image model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

/// The response envelope from the image generations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageGeneration {
    /// Unix timestamp of the generation.
    #[serde(default)]
    pub created: u64,

    /// The generated images; the first is the requested image.
    pub data: Vec<GeneratedImage>,
}

impl ImageGeneration {
    /// Consumes the response and returns the URL of the first image, if any.
    pub fn into_url(self) -> Option<Url> {
        self.data.into_iter().next().and_then(|image| image.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_and_take_url() {
        let generation: ImageGeneration = serde_json::from_value(json!({
            "created": 1722902400,
            "data": [
                {
                    "url": "https://images.example.com/dragon.png",
                    "revised_prompt": "a majestic red dragon"
                }
            ]
        }))
        .unwrap();

        let url = generation.into_url().unwrap();
        assert_eq!(url.as_str(), "https://images.example.com/dragon.png");
    }

    #[test]
    fn empty_data_has_no_url() {
        let generation: ImageGeneration =
            serde_json::from_value(json!({ "created": 0, "data": [] })).unwrap();
        assert!(generation.into_url().is_none());
    }

    #[test]
    fn entry_without_url_has_no_url() {
        let generation: ImageGeneration = serde_json::from_value(json!({
            "data": [ { "revised_prompt": "a cat" } ]
        }))
        .unwrap();
        assert!(generation.into_url().is_none());
    }
}
