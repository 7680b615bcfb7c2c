use serde::{Deserialize, Serialize};

use crate::types::Model;

/// Supported output dimensions for generated images.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    /// 256x256 pixels (dall-e-2 only).
    #[serde(rename = "256x256")]
    Square256,

    /// 512x512 pixels (dall-e-2 only).
    #[serde(rename = "512x512")]
    Square512,

    /// 1024x1024 pixels.
    #[serde(rename = "1024x1024")]
    Square1024,

    /// 1792x1024 pixels (dall-e-3 only).
    #[serde(rename = "1792x1024")]
    Landscape,

    /// 1024x1792 pixels (dall-e-3 only).
    #[serde(rename = "1024x1792")]
    Portrait,
}

/// Parameters for an image generation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageGenerationParams {
    /// The model that will generate the image.
    pub model: Model,

    /// The prompt describing the desired image.
    pub prompt: String,

    /// The number of images to generate.
    pub n: u32,

    /// The output dimensions.
    pub size: ImageSize,
}

impl ImageGenerationParams {
    /// Create a new `ImageGenerationParams` requesting one 1024x1024 image.
    pub fn new(model: Model, prompt: impl Into<String>) -> Self {
        Self {
            model,
            prompt: prompt.into(),
            n: 1,
            size: ImageSize::Square1024,
        }
    }

    /// Sets the output dimensions.
    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    /// Sets the number of images to generate.
    pub fn with_count(mut self, n: u32) -> Self {
        self.n = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;
    use serde_json::{json, to_value};

    #[test]
    fn params_serialization() {
        let params =
            ImageGenerationParams::new(Model::Known(KnownModel::DallE3), "a red dragon");
        let json = to_value(&params).unwrap();

        assert_eq!(
            json,
            json!({
                "model": "dall-e-3",
                "prompt": "a red dragon",
                "n": 1,
                "size": "1024x1024"
            })
        );
    }

    #[test]
    fn size_serialization() {
        assert_eq!(to_value(ImageSize::Square1024).unwrap(), json!("1024x1024"));
        assert_eq!(to_value(ImageSize::Landscape).unwrap(), json!("1792x1024"));
    }

    #[test]
    fn params_builder_overrides() {
        let params = ImageGenerationParams::new(Model::Known(KnownModel::DallE2), "a cat")
            .with_size(ImageSize::Square512)
            .with_count(2);

        assert_eq!(params.size, ImageSize::Square512);
        assert_eq!(params.n, 2);
    }
}
