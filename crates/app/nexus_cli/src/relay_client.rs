//! HTTP transport to the relay's `POST /api/chat`.

use std::time::Duration;

use nexus_core::wire::{ChatRequest, ChatResponse, ErrorResponse};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::{Error, Result};

/// Client-side bound; the relay caps provider calls well below this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct RelayClient {
    client: Client,
    chat_url: Url,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Result<Self> {
        let chat_url = Url::parse(relay_url)?.join("/api/chat")?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, chat_url })
    }

    pub fn chat_url(&self) -> &Url {
        &self.chat_url
    }

    /// Send one chat turn and return the reply text.
    pub async fn send(&self, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(self.chat_url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: ChatResponse = response.json().await?;
            return Ok(body.reply);
        }

        let detail = response.json::<ErrorResponse>().await.ok();
        Err(status_error(status, detail))
    }
}

fn status_error(status: StatusCode, detail: Option<ErrorResponse>) -> Error {
    match detail {
        Some(body) => Error::Custom(format!("relay returned {status}: {} ({})", body.message, body.error)),
        None => Error::Custom(format!("relay returned {status}")),
    }
}
