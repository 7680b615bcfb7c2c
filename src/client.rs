use std::env;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::observability::{
    CHAT_REQUEST_ERRORS, CHAT_REQUESTS, IMAGE_REQUEST_ERRORS, IMAGE_REQUESTS,
};
use crate::types::{ChatCompletion, ChatCompletionParams, ImageGeneration, ImageGenerationParams};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/";
const API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The completion side of the OpenAI API, as a seam for testing.
#[async_trait::async_trait]
pub trait ChatService: Send + Sync {
    /// Request a chat completion.
    async fn create_chat_completion(&self, params: ChatCompletionParams) -> Result<ChatCompletion>;
}

/// The image generation side of the OpenAI API, as a seam for testing.
#[async_trait::async_trait]
pub trait ImageService: Send + Sync {
    /// Request an image generation.
    async fn create_image(&self, params: ImageGenerationParams) -> Result<ImageGeneration>;
}

/// Client for the OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAi {
    api_key: Option<String>,
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl OpenAi {
    /// Create a new OpenAI client.
    ///
    /// The API key can be provided directly or read from the OPENAI_API_KEY
    /// environment variable. A missing key is not an error at construction
    /// time: requests made without a key fail with an authentication error
    /// from the server.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = api_key.or_else(|| env::var(API_KEY_ENV).ok());
        if api_key.is_none() {
            tracing::warn!(
                "API key not provided and {API_KEY_ENV} environment variable not set; \
                 requests will fail with an authentication error"
            );
        }

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout,
        })
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.api_key {
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {api_key}"))
                    .expect("API key should be valid"),
            );
        }
        headers
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        // Headers we might need for error processing
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|val| val.to_str().ok())
            .map(String::from);

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|val| val.to_str().ok())
            .and_then(|val| val.parse::<u64>().ok());

        // The OpenAI error body shape.
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            #[serde(rename = "type")]
            error_type: Option<String>,
            message: Option<String>,
            param: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let parsed_error = serde_json::from_str::<ErrorResponse>(&error_body).ok();
        let error_type = parsed_error
            .as_ref()
            .and_then(|e| e.error.as_ref())
            .and_then(|e| e.error_type.clone());
        let error_message = parsed_error
            .as_ref()
            .and_then(|e| e.error.as_ref())
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| error_body.clone());
        let error_param = parsed_error
            .as_ref()
            .and_then(|e| e.error.as_ref())
            .and_then(|e| e.param.clone());

        // Map HTTP status code to appropriate error type
        match status_code {
            400 => Error::bad_request(error_message, error_param),
            401 => Error::authentication(error_message),
            403 => Error::permission(error_message),
            404 => Error::not_found(error_message),
            408 => Error::timeout(error_message, None),
            429 => Error::rate_limit(error_message, retry_after),
            500 => Error::internal_server(error_message, request_id),
            502..=504 => Error::service_unavailable(error_message, retry_after),
            _ => Error::api(status_code, error_type, error_message, request_id),
        }
    }

    /// POST a JSON request to an endpoint and parse the JSON response.
    async fn post_json<P: serde::Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        params: &P,
    ) -> Result<R> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .headers(self.default_headers())
            .json(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::timeout(
                        format!("Request timed out: {}", e),
                        Some(self.timeout.as_secs_f64()),
                    )
                } else if e.is_connect() {
                    Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
                } else {
                    Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<R>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}

#[async_trait::async_trait]
impl ChatService for OpenAi {
    /// Request a chat completion and wait for the full response.
    async fn create_chat_completion(&self, params: ChatCompletionParams) -> Result<ChatCompletion> {
        CHAT_REQUESTS.click();
        let result = self.post_json("chat/completions", &params).await;
        if result.is_err() {
            CHAT_REQUEST_ERRORS.click();
        }
        result
    }
}

#[async_trait::async_trait]
impl ImageService for OpenAi {
    /// Request an image generation and wait for the full response.
    async fn create_image(&self, params: ImageGenerationParams) -> Result<ImageGeneration> {
        IMAGE_REQUESTS.click();
        let result = self.post_json("images/generations", &params).await;
        if result.is_err() {
            IMAGE_REQUEST_ERRORS.click();
        }
        result
    }
}
