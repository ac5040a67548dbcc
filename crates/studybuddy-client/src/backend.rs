//! HTTP implementation of the generation service.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use studybuddy_core::model::{Flashcard, MockTest};
use studybuddy_core::payload::parse_payload_capped;
use studybuddy_core::traits::{GenerationService, MockTestRequest};

use crate::config::Credential;
use crate::error::ClientError;

/// Client for the studybuddy generation backend.
pub struct BackendService {
    base_url: Url,
    credential: Credential,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl BackendService {
    pub fn new(base_url: &str, credential: Credential, timeout_secs: u64) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid backend URL: {base_url}"))?;
        anyhow::ensure!(
            !base_url.cannot_be_a_base(),
            "invalid backend URL: {base_url}"
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url,
            credential,
            timeout_secs,
            client,
        })
    }

    /// Append path segments to the base URL. Each segment is percent-encoded
    /// on its own, so a document id can never reach another route.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        target: &str,
    ) -> Result<String, ClientError> {
        let response = request
            .bearer_auth(self.credential.expose())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Timeout(self.timeout_secs)
                } else {
                    ClientError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::NetworkError(e.to_string()))?;

        if status == 401 {
            return Err(ClientError::AuthenticationFailed(error_message(&body)));
        }
        if status == 404 {
            return Err(ClientError::DocumentNotFound(target.to_string()));
        }
        if status >= 400 {
            return Err(ClientError::ServiceError {
                status,
                message: error_message(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

#[derive(Deserialize)]
struct AskResponse {
    answer: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    document_id: Value,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Pull the human-readable message out of an error body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.error.or(e.message))
        .unwrap_or_else(|| body.to_string())
}

/// Content type sent with an uploaded file. The backend extracts text from
/// PDFs and reads everything else as UTF-8.
fn content_type(file_name: &str) -> &'static str {
    if file_name.to_ascii_lowercase().ends_with(".pdf") {
        "application/pdf"
    } else {
        "text/plain"
    }
}

#[async_trait]
impl GenerationService for BackendService {
    fn name(&self) -> &str {
        "backend"
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    async fn upload_document(&self, path: &Path) -> anyhow::Result<String> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("not a file path: {}", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read document: {}", path.display()))?;
        tracing::info!(bytes = content.len(), "uploading document");

        let part = Part::bytes(content)
            .file_name(file_name.clone())
            .mime_str(content_type(&file_name))
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part);

        let body = self
            .send(
                self.client.post(self.url(&["upload"])).multipart(form),
                &file_name,
            )
            .await?;

        let response: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("upload: {e}")))?;
        match response.document_id {
            Value::String(id) if !id.is_empty() => Ok(id),
            Value::Number(id) => Ok(id.to_string()),
            other => Err(
                ClientError::InvalidResponse(format!("upload: unusable document_id {other}")).into(),
            ),
        }
    }

    #[instrument(skip(self, request), fields(document_id = %request.document_id, count = %request.count))]
    async fn generate_mock_test(&self, request: &MockTestRequest) -> anyhow::Result<MockTest> {
        let mut url = self.url(&["generate-mock-test", request.document_id.as_str()]);
        url.query_pairs_mut()
            .append_pair("count", &request.count.to_string());
        tracing::info!("requesting mock test");

        let body = self
            .send(self.client.get(url), &request.document_id)
            .await?;

        let mut test = parse_payload_capped(&body, request.count.get() as usize)
            .context("generation service returned an unusable mock test")?;
        if test.document_id.is_none() {
            test.document_id = Some(request.document_id.clone());
        }
        Ok(test)
    }

    #[instrument(skip(self))]
    async fn generate_flashcards(&self, document_id: &str) -> anyhow::Result<Vec<Flashcard>> {
        tracing::info!("requesting flashcards");
        let body = self
            .send(
                self.client
                    .get(self.url(&["generate-flashcards", document_id])),
                document_id,
            )
            .await?;

        let cards: Vec<Flashcard> = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("flashcards: {e}")))?;
        Ok(cards)
    }

    #[instrument(skip(self, question))]
    async fn ask_question(&self, document_id: &str, question: &str) -> anyhow::Result<String> {
        if question.trim().is_empty() {
            return Err(ClientError::InvalidRequest("a question is required".into()).into());
        }

        let body = self
            .send(
                self.client
                    .post(self.url(&["ask-question", document_id]))
                    .json(&AskRequest { question }),
                document_id,
            )
            .await?;

        let response: AskResponse = serde_json::from_str(&body)
            .map_err(|e| ClientError::InvalidResponse(format!("answer: {e}")))?;
        Ok(response.answer)
    }
}
