//! Chat client methods

use super::{error::ClientError, typed::AuthenticatedApiClient};
use crate::types::{ChatRequest, ChatResponse};
use reqwest::Method;

impl AuthenticatedApiClient {
    /// Forward a free-text message to the assistant endpoint
    pub async fn send_chat(&self, request: ChatRequest) -> Result<ChatResponse, ClientError> {
        let req = self.request(Method::POST, "/api/chat").json(&request);
        self.execute(req).await
    }
}
