use crate::data::task::{Direction, ErrorBody, MoveRequest, Task, TaskPayload};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend rejected the request with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// The backend's own `{error}` message, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The `/api/tarefas` backend contract.
pub trait TaskApi: Send + Sync {
    fn list(&self) -> ApiResult<Vec<Task>>;
    fn get(&self, id: i64) -> ApiResult<Task>;
    fn create(&self, payload: &TaskPayload) -> ApiResult<Task>;
    fn update(&self, id: i64, payload: &TaskPayload) -> ApiResult<Task>;
    fn delete(&self, id: i64) -> ApiResult<()>;
    fn move_task(&self, id: i64, direction: Direction) -> ApiResult<()>;
}

/// Blocking JSON-over-HTTP client. Requests carry no timeout.
pub struct HttpTaskApi {
    base_url: String,
    client: Client,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let body = self.send(request)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    fn request_status_only(&self, request: RequestBuilder) -> ApiResult<()> {
        self.send(request).map(|_| ())
    }

    /// Send and return the body of a 2xx response.
    fn send(&self, request: RequestBuilder) -> ApiResult<String> {
        let response = request
            .send()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error)
            .filter(|m| !m.trim().is_empty());
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

impl TaskApi for HttpTaskApi {
    fn list(&self) -> ApiResult<Vec<Task>> {
        tracing::debug!("GET /api/tarefas");
        self.request_json(self.client.get(self.endpoint("api/tarefas")))
    }

    fn get(&self, id: i64) -> ApiResult<Task> {
        tracing::debug!(id, "GET /api/tarefas/{{id}}");
        self.request_json(self.client.get(self.endpoint(&format!("api/tarefas/{}", id))))
    }

    fn create(&self, payload: &TaskPayload) -> ApiResult<Task> {
        tracing::debug!(nome = %payload.nome, "POST /api/tarefas");
        self.request_json(self.client.post(self.endpoint("api/tarefas")).json(payload))
    }

    fn update(&self, id: i64, payload: &TaskPayload) -> ApiResult<Task> {
        tracing::debug!(id, nome = %payload.nome, "PUT /api/tarefas/{{id}}");
        self.request_json(
            self.client
                .put(self.endpoint(&format!("api/tarefas/{}", id)))
                .json(payload),
        )
    }

    fn delete(&self, id: i64) -> ApiResult<()> {
        tracing::debug!(id, "DELETE /api/tarefas/{{id}}");
        self.request_status_only(self.client.delete(self.endpoint(&format!("api/tarefas/{}", id))))
    }

    fn move_task(&self, id: i64, direction: Direction) -> ApiResult<()> {
        tracing::debug!(id, direcao = direction.label(), "POST /api/tarefas/mover");
        self.request_status_only(
            self.client
                .post(self.endpoint("api/tarefas/mover"))
                .json(&MoveRequest {
                    id,
                    direcao: direction,
                }),
        )
    }
}
