//! LLM agent module for one-page legal briefs.
//!
//! Builds the fixed system instruction and prompt, sends them through a
//! [`SummaryProvider`], and folds every provider failure into one user-facing error.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::summary::{TARGET_CHARS, TOLERANCE_CHARS};
use crate::tone::Tone;

/// Returned when the provider answers without any text.
pub const NO_SUMMARY: &str = "No summary generated.";

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("lexibrief/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Please provide a document to summarize.")]
    EmptyInput,
    #[error("Failed to process the document. Please ensure the content is valid.")]
    ProviderFailure(#[source] ProviderError),
}

/// Technical failure detail from the provider. Logged, never shown to the user.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One request/response exchange with the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
}

/// A text-generation backend that returns the whole completion at once.
///
/// `Ok(None)` means the provider answered but produced no text.
pub trait SummaryProvider: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, ProviderError>> + Send + 'a>>;
}

/// Build the system instruction for the given tone.
pub fn system_instruction(tone: Tone) -> String {
    let mut instruction = format!(
        "You are an elite legal summary engine.\n\
         \n\
         STRICT CONSTRAINT:\n\
         Your output MUST be a \"One Page\" summary. Whether the input is 1,000 characters \
         or 100,000+ characters (20+ pages), the summary MUST be approximately {TARGET_CHARS} \
         characters long (±{TOLERANCE_CHARS} characters).\n\
         \n\
         Current focus: {tone}\n\
         \n\
         Requirements:\n\
         1. Reduce complex legal language to an essential, actionable brief.\n\
         2. Cover what matters most: parties, obligations, risks, and expiration or deadline dates.\n\
         3. Use dense, professional language.\n\
         4. The result must fit comfortably on a single digital page."
    );
    if let Some(clause) = tone.instruction_clause() {
        instruction.push_str("\n5. ");
        instruction.push_str(clause);
    }
    instruction
}

/// Build the user prompt carrying the full document text.
pub fn user_prompt(text: &str) -> String {
    format!(
        "Summarize this legal document into exactly one page (approx. {TARGET_CHARS} characters):\n\n{text}"
    )
}

/// Assemble the full request for a document and tone.
pub fn build_request(text: &str, tone: Tone, config: &Config) -> GenerationRequest {
    GenerationRequest {
        model: config.agent.model.clone(),
        system_instruction: system_instruction(tone),
        prompt: user_prompt(text),
        temperature: config.agent.temperature,
    }
}

/// Run one summarization. Exactly one provider call, no retry.
pub async fn summarize(
    provider: &dyn SummaryProvider,
    text: &str,
    tone: Tone,
    config: &Config,
) -> Result<String, AgentError> {
    if text.trim().is_empty() {
        return Err(AgentError::EmptyInput);
    }

    let request = build_request(text, tone, config);
    tracing::info!(
        model = %request.model,
        tone = %tone,
        chars = text.chars().count(),
        "requesting summary"
    );

    match provider.generate(&request).await {
        Ok(Some(summary)) if !summary.is_empty() => {
            let chars = summary.chars().count();
            if chars.abs_diff(TARGET_CHARS) > TOLERANCE_CHARS {
                tracing::debug!(chars, "summary outside requested length window");
            }
            Ok(summary)
        }
        Ok(_) => {
            tracing::warn!("provider returned no text");
            Ok(NO_SUMMARY.to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "summarization provider error");
            Err(AgentError::ProviderFailure(e))
        }
    }
}

/// Google Gemini `generateContent` over plain HTTPS.
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiProvider {
    /// Build a provider from the resolved configuration.
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        if config.api.gemini_key.is_none() {
            tracing::warn!("no API key configured; requests will be rejected by the provider");
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.agent.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key().to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn send(&self, request: &GenerationRequest) -> Result<Option<String>, ProviderError> {
        let body = GenerateContentRequest::from(request);
        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        Ok(parsed.text())
    }
}

impl SummaryProvider for GeminiProvider {
    fn generate<'a>(
        &'a self,
        request: &'a GenerationRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Option<String>, ProviderError>> + Send + 'a>> {
        Box::pin(self.send(request))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &request.system_instruction,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}
