use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::data_source::{require_success, SourceError};
use crate::http_client::{HttpAuth, HttpClient, HttpRequest};

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
    repetition_penalty: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 500,
            temperature: 0.7,
            top_p: 0.95,
            repetition_penalty: 1.15,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// The hosted endpoint answers with either a single object or a one-element batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

/// Client for a hosted text-generation endpoint.
#[derive(Clone)]
pub struct TextGeneration {
    http_client: Arc<dyn HttpClient>,
    url: String,
    model: String,
    auth: HttpAuth,
    timeout_ms: u64,
    parameters: GenerationParameters,
}

impl TextGeneration {
    pub fn new(http_client: Arc<dyn HttpClient>, settings: &Settings) -> Self {
        Self {
            http_client,
            url: settings.inference_url.clone(),
            model: settings.model.clone(),
            auth: HttpAuth::bearer_if_present(&settings.inference_token),
            timeout_ms: settings.timeout_ms,
            parameters: GenerationParameters::default(),
        }
    }

    /// Send `inputs` as a single generation request and return the text verbatim.
    pub async fn generate(&self, inputs: &str) -> Result<String, SourceError> {
        let body = serde_json::to_string(&GenerationRequest {
            model: &self.model,
            inputs,
            parameters: self.parameters,
        })
        .map_err(|e| SourceError::malformed(format!("failed to encode request: {e}")))?;

        let request = HttpRequest::post(&self.url)
            .with_auth(&self.auth)
            .with_json_body(body)
            .with_timeout_ms(self.timeout_ms);

        let response = require_success(self.http_client.execute(request).await?)?;
        parse_generation(&response.body)
    }
}

fn parse_generation(body: &str) -> Result<String, SourceError> {
    let payload: GenerationResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::malformed(format!("failed to parse generation: {e}")))?;

    match payload {
        GenerationResponse::Single(generated) => Ok(generated.generated_text),
        GenerationResponse::Batch(batch) => batch
            .into_iter()
            .next()
            .map(|generated| generated.generated_text)
            .ok_or_else(|| SourceError::malformed("generation batch is empty")),
    }
}
