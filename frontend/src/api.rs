//! HTTP backends for the core controllers, over `gloo-net`.
//!
//! The server reports refusals as JSON with `success: false`, sometimes
//! together with a 4xx status, so bodies are decoded whatever the status.
//! Only a failed request or an undecodable body becomes a `ClientError`.

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

use sport_connect::models::{ActionResponse, ChatbotRequest, ChatbotResponse};
use sport_connect::service::{ChatBackend, EventAction, EventBackend, EventId};
use sport_connect::{ClientConfig, ClientError};

async fn read_json<T: DeserializeOwned>(url: &str, resp: Response) -> Result<T, ClientError> {
    if !resp.ok() {
        log::warn!("{url} answered with status {}", resp.status());
    }
    resp.json::<T>().await.map_err(|e| ClientError::decode(url, e))
}

/// `POST /event/{id}/{action}` with an empty body.
#[derive(Clone)]
pub struct HttpEventBackend {
    config: ClientConfig,
}

impl HttpEventBackend {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl EventBackend for HttpEventBackend {
    async fn perform(
        &self,
        action: EventAction,
        event_id: EventId,
    ) -> Result<ActionResponse, ClientError> {
        let url = self.config.endpoint(&action.path(event_id));
        let resp = Request::post(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| ClientError::network(&url, e))?;
        read_json(&url, resp).await
    }
}

/// `POST /api/chatbot` with the message and the running history.
#[derive(Clone)]
pub struct HttpChatBackend {
    url: String,
}

impl HttpChatBackend {
    pub fn new(config: &ClientConfig) -> Self {
        Self { url: config.chatbot_url() }
    }
}

#[async_trait(?Send)]
impl ChatBackend for HttpChatBackend {
    async fn send_turn(&self, request: &ChatbotRequest) -> Result<ChatbotResponse, ClientError> {
        let resp = Request::post(&self.url)
            .json(request)
            .map_err(|e| ClientError::network(&self.url, e))?
            .send()
            .await
            .map_err(|e| ClientError::network(&self.url, e))?;
        log::debug!("chatbot answered with status {}", resp.status());
        read_json(&self.url, resp).await
    }
}
