use super::{ModelError, TextModel};
use crate::config::ModelConfig;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_p: 0.2,
            top_k: 2,
        }
    }
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    settings: GenerationSettings,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let api_key = config.api_key.clone().ok_or(ModelError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|err| ModelError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            api_key,
            endpoint: endpoint_for(config),
            settings: GenerationSettings::default(),
        })
    }

    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl TextModel for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let request = GenerateContentRequest::new(prompt, self.settings);
        debug!(
            endpoint = %self.endpoint,
            prompt_chars = prompt.len(),
            "requesting model completion"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .map_err(|err| ModelError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::Status {
                status: status.as_u16(),
                body: error_body(response.text()),
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .map_err(|err| ModelError::Decode(err.to_string()))?;
        body.into_text()
    }
}

fn error_body<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|err| format!("<unreadable body: {err}>"))
}

fn endpoint_for(config: &ModelConfig) -> String {
    format!(
        "{}/models/{}:generateContent",
        config.api_base.trim_end_matches('/'),
        config.model
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationSettings,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str, settings: GenerationSettings) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: settings,
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    fn into_text(self) -> Result<String, ModelError> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty())
            .ok_or(ModelError::EmptyResponse)
    }
}
