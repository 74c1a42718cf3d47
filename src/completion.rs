//! The completion service the chat session talks to.
//!
//! The session only depends on [`CompletionService`]: hand it the transcript so
//! far, get back candidate replies or a single [`Error::Completion`].
//! [`OpenAi`] implements the trait over HTTP against an OpenAI-compatible
//! `chat/completions` endpoint.

use std::time::{Duration, Instant};

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::observability::{COMPLETION_DURATION, COMPLETION_ERRORS, COMPLETION_REQUESTS};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum tokens requested per reply.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Sampling temperature used for every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

//////////////////////////////////////////// Turns ///////////////////////////////////////////

/// Who contributed a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person at the keyboard.
    User,

    /// The completion service.
    Assistant,
}

/// One contribution to the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// The role of the turn.
    pub role: Role,

    /// The text of the turn.
    pub content: String,
}

impl Turn {
    /// Create a new user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/////////////////////////////////////// Request/Response /////////////////////////////////////

/// Everything the service needs to produce a reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier.
    pub model: String,
    /// The full transcript so far, oldest turn first.
    pub transcript: Vec<Turn>,
    /// Upper bound on reply length.
    pub max_output_tokens: u32,
    /// Number of candidates to generate.
    pub candidate_count: u32,
    /// Optional stop sequences.
    pub stop: Option<Vec<String>>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// A request for one candidate with the default length and temperature.
    pub fn new(model: impl Into<String>, transcript: Vec<Turn>) -> Self {
        Self {
            model: model.into(),
            transcript,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            candidate_count: 1,
            stop: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// One generated reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The reply text, untrimmed.
    pub text: String,
}

/// A successful answer from the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Completion {
    /// The generated candidates, in service order.
    pub candidates: Vec<Candidate>,
}

impl Completion {
    /// A completion holding a single candidate.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate { text: text.into() }],
        }
    }

    /// The first candidate's text.
    ///
    /// # Errors
    ///
    /// An empty candidate list is a malformed response.
    pub fn first_text(&self) -> Result<&str> {
        self.candidates
            .first()
            .map(|c| c.text.as_str())
            .ok_or_else(|| Error::completion("response contained no candidates", None, None))
    }
}

/// A service that turns a transcript into candidate replies.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Request a completion for `request`.
    ///
    /// Every failure is reported as [`Error::Completion`].
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion>;
}

//////////////////////////////////////////// OpenAi //////////////////////////////////////////

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAi {
    api_key: String,
    client: ReqwestClient,
    endpoint: Url,
    timeout: Duration,
}

impl OpenAi {
    /// Create a new client against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_options(api_key, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        api_key: impl Into<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let api_key = api_key.into().trim_end().to_string();
        let mut base = base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        if !base.ends_with('/') {
            base.push('/');
        }
        let endpoint = Url::parse(&base)?.join("chat/completions")?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::completion(
                    format!("Failed to build HTTP client: {}", e),
                    None,
                    Some(Box::new(e)),
                )
            })?;

        let this = Self {
            api_key,
            client,
            endpoint,
            timeout,
        };
        this.default_headers()?;
        Ok(this)
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn default_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| Error::configuration("API key contains invalid header characters"))?;
        headers.insert(header::AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::completion(
                    format!("Failed to read error response: {}", e),
                    Some(status_code),
                    Some(Box::new(e)),
                );
            }
        };
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error)
            .and_then(|e| e.message)
            .unwrap_or(body);
        Error::completion(message, Some(status_code), None)
    }

    async fn send(&self, request: &CompletionRequest) -> Result<Completion> {
        let body = ChatRequest::from(request);
        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.default_headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!(
                        "Request timed out after {} seconds: {}",
                        self.timeout.as_secs_f64(),
                        e
                    )
                } else if e.is_connect() {
                    format!("Connection error: {}", e)
                } else {
                    format!("Request failed: {}", e)
                };
                Error::completion(message, None, Some(Box::new(e)))
            })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        let parsed = response.json::<ChatResponse>().await.map_err(|e| {
            Error::completion(
                format!("Failed to parse response: {}", e),
                None,
                Some(Box::new(e)),
            )
        })?;
        Ok(parsed.into())
    }
}

#[async_trait::async_trait]
impl CompletionService for OpenAi {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        COMPLETION_REQUESTS.click();
        let start = Instant::now();
        let result = self.send(request).await;
        COMPLETION_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            COMPLETION_ERRORS.click();
        }
        result
    }
}

///////////////////////////////////////////// Wire ///////////////////////////////////////////

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Turn],
    max_tokens: u32,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a [String]>,
    temperature: f32,
}

impl<'a> From<&'a CompletionRequest> for ChatRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: &request.transcript,
            max_tokens: request.max_output_tokens,
            n: request.candidate_count,
            stop: request.stop.as_deref(),
            temperature: request.temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
    // Legacy completions endpoints answer with `text` instead of `message`.
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl From<ChatResponse> for Completion {
    fn from(response: ChatResponse) -> Self {
        let candidates = response
            .choices
            .into_iter()
            .map(|choice| Candidate {
                text: choice
                    .message
                    .and_then(|m| m.content)
                    .or(choice.text)
                    .unwrap_or_default(),
            })
            .collect();
        Completion { candidates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let request = CompletionRequest::new("gpt-3.5-turbo", vec![Turn::user("hello")]);
        assert_eq!(request.max_output_tokens, 1024);
        assert_eq!(request.candidate_count, 1);
        assert!(request.stop.is_none());
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.transcript, vec![Turn::user("hello")]);
    }

    #[test]
    fn wire_request_shape() {
        let request = CompletionRequest::new(
            "gpt-3.5-turbo",
            vec![Turn::user("hello"), Turn::assistant("hi there")],
        );
        let json = serde_json::to_value(ChatRequest::from(&request)).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(
            json["messages"],
            serde_json::json!([
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi there"},
            ])
        );
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["n"], 1);
        assert!(json.get("stop").is_none());
        let temperature = json["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn wire_response_chat_and_legacy() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":" hi there\n"}}]}"#,
        )
        .unwrap();
        let completion = Completion::from(chat);
        assert_eq!(completion.first_text().unwrap(), " hi there\n");

        let legacy: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"text":"legacy"}]}"#).unwrap();
        assert_eq!(Completion::from(legacy).first_text().unwrap(), "legacy");
    }

    #[test]
    fn empty_choices_is_completion_error() {
        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let err = Completion::from(empty).first_text().unwrap_err();
        assert!(err.is_completion());
    }

    #[test]
    fn endpoint_from_base_url() {
        let client = OpenAi::with_options("sk-test\n", Some("http://localhost:8080/v1".into()), None)
            .unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(
            OpenAi::new("sk-test").unwrap().endpoint().as_str(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn bad_base_url_is_configuration_error() {
        let err = OpenAi::with_options("sk-test", Some("not a url".into()), None).unwrap_err();
        assert!(err.is_configuration());
    }
}
