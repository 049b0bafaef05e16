//! In-memory transport for unit tests: canned responses, recorded requests.

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

enum Reply {
    Respond(Result<ApiResponse, ApiError>),
    /// Wait for the sender half before answering.
    Held(oneshot::Receiver<()>, Result<ApiResponse, ApiError>),
}

#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(&self, status: u16, body: Value) -> &Self {
        self.push(Reply::Respond(Ok(ApiResponse::new(status, body.to_string()))))
    }

    pub fn raw(&self, status: u16, body: &str) -> &Self {
        self.push(Reply::Respond(Ok(ApiResponse::new(status, body.as_bytes().to_vec()))))
    }

    pub fn fail(&self, err: ApiError) -> &Self {
        self.push(Reply::Respond(Err(err)))
    }

    /// Queue a reply that is released only when the returned sender fires (or is dropped).
    pub fn held(&self, status: u16, body: Value) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Held(rx, Ok(ApiResponse::new(status, body.to_string()))));
        tx
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn push(&self, reply: Reply) -> &Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Respond(r)) => r,
            Some(Reply::Held(rx, r)) => {
                let _ = rx.await;
                r
            }
            None => Err(ApiError::Transport(format!(
                "no scripted reply for {} {}",
                request.method, request.path
            ))),
        }
    }
}
