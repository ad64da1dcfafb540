//! Submission of ROI payloads to the OCR endpoint.
//!
//! Submissions are fire-and-forget: the canvas hands a payload to a
//! [`RoiSubmitter`] and never hears back. The HTTP implementation reports the
//! outcome through a callback so the UI can show the recognized text.

use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::config::OcrConfig;
use crate::roi::RoiPayload;
use crate::state::RoiRect;

/// Receives every committed rectangle's payload.
pub trait RoiSubmitter {
    fn submit(&self, payload: RoiPayload);
}

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("OCR server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("OCR task ended in state {0}")]
    TaskFailed(String),
    #[error("OCR task still pending after {0} polls")]
    PollExhausted(u32),
    #[error("OCR response contained neither text nor a task id")]
    MissingText,
    #[error("failed to start OCR runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Reply to `POST /process_roi`.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply to `GET /get_ocr_result/<task_id>`.
#[derive(Debug, Deserialize)]
pub struct TaskStatus {
    pub state: String,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// What the endpoint answered to a submission.
#[derive(Debug, PartialEq)]
pub enum SubmitReply {
    Text(String),
    Deferred(String),
}

/// Result of one submission, delivered to the outcome callback.
#[derive(Debug)]
pub struct OcrOutcome {
    pub rect: RoiRect,
    pub result: Result<String, OcrError>,
}

pub fn interpret_process_response(status: StatusCode, body: ProcessResponse) -> Result<SubmitReply, OcrError> {
    if !status.is_success() {
        return Err(OcrError::Server {
            status: status.as_u16(),
            message: body.error.unwrap_or_else(|| "unknown error".to_string()),
        });
    }
    if let Some(text) = body.text {
        return Ok(SubmitReply::Text(text));
    }
    body.task_id.map(SubmitReply::Deferred).ok_or(OcrError::MissingText)
}

/// `Ok(None)` means the task is still running.
pub fn interpret_task_status(status: TaskStatus) -> Result<Option<String>, OcrError> {
    match status.state.as_str() {
        "SUCCESS" => {
            let text = match status.result {
                Some(serde_json::Value::String(s)) => s,
                Some(serde_json::Value::Object(map)) => match map.get("text") {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    _ => serde_json::Value::Object(map).to_string(),
                },
                Some(serde_json::Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            Ok(Some(text))
        }
        "PENDING" | "STARTED" | "RETRY" => Ok(None),
        other => Err(OcrError::TaskFailed(other.to_string())),
    }
}

/// Submitter used when OCR is disabled: logs the payload and drops it.
pub struct LogOnlySubmitter;

impl RoiSubmitter for LogOnlySubmitter {
    fn submit(&self, payload: RoiPayload) {
        log::info!(
            "OCR disabled, dropping ROI ({:.1}, {:.1}, {:.1}, {:.1}), {} bytes",
            payload.x,
            payload.y,
            payload.w,
            payload.h,
            payload.image_data.len()
        );
    }
}

pub type OutcomeCallback = Arc<dyn Fn(OcrOutcome) + Send + Sync>;

/// Posts payloads to the configured endpoint on a private Tokio runtime.
pub struct HttpOcrClient {
    runtime: Runtime,
    client: reqwest::Client,
    config: Arc<OcrConfig>,
    on_outcome: OutcomeCallback,
}

impl HttpOcrClient {
    pub fn new(config: OcrConfig, on_outcome: impl Fn(OcrOutcome) + Send + Sync + 'static) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("ocr-client")
            .enable_all()
            .build()?;

        Ok(Self {
            runtime,
            client,
            config: Arc::new(config),
            on_outcome: Arc::new(on_outcome),
        })
    }
}

impl RoiSubmitter for HttpOcrClient {
    fn submit(&self, payload: RoiPayload) {
        let client = self.client.clone();
        let config = Arc::clone(&self.config);
        let on_outcome = Arc::clone(&self.on_outcome);

        self.runtime.spawn(async move {
            let rect = payload.rect();
            let result = process(&client, &config, &payload).await;
            match &result {
                Ok(text) => log::info!("OCR result for {rect:?}: {text}"),
                Err(e) => log::warn!("OCR failed for {rect:?}: {e}"),
            }
            on_outcome(OcrOutcome { rect, result });
        });
    }
}

async fn process(client: &reqwest::Client, config: &OcrConfig, payload: &RoiPayload) -> Result<String, OcrError> {
    let resp = client.post(config.process_url()).json(payload).send().await?;
    let status = resp.status();
    let body: ProcessResponse = if status.is_success() {
        resp.json().await?
    } else {
        resp.json().await.unwrap_or_default()
    };

    match interpret_process_response(status, body)? {
        SubmitReply::Text(text) => Ok(text),
        SubmitReply::Deferred(task_id) => {
            log::debug!("OCR deferred as task {task_id}");
            poll_result(client, config, &task_id).await
        }
    }
}

async fn poll_result(client: &reqwest::Client, config: &OcrConfig, task_id: &str) -> Result<String, OcrError> {
    let url = config.result_url(task_id);
    for _ in 0..config.max_polls {
        tokio::time::sleep(Duration::from_millis(config.poll_interval_ms)).await;

        let status: TaskStatus = client.get(&url).send().await?.error_for_status()?.json().await?;
        if let Some(text) = interpret_task_status(status)? {
            return Ok(text);
        }
    }
    Err(OcrError::PollExhausted(config.max_polls))
}
