//! Chat API service

use crate::gateway::ApiGateway;
use std::sync::Arc;
use tasklink_http::client::ClientError;
use tasklink_http::types::{ChatRequest, ChatResponse};
use tracing::debug;

/// Chat service forwarding free-text messages to the assistant endpoint.
///
/// Conversation continuity lives in storage: the id returned by the server
/// is persisted and sent with the next message, and dropped on logout so a
/// conversation never crosses users.
#[derive(Clone)]
pub struct ChatService {
    gateway: Arc<ApiGateway>,
}

impl ChatService {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Send a message, continuing the stored conversation if one exists
    pub async fn send(&self, message: &str) -> Result<ChatResponse, ClientError> {
        let conversation_id = self.gateway.store().conversation_id();

        let response = self
            .gateway
            .execute(|client| {
                let request = ChatRequest {
                    message: message.to_string(),
                    conversation_id: conversation_id.clone(),
                };
                async move { client.send_chat(request).await }
            })
            .await?;

        self.gateway
            .store()
            .set_conversation_id(&response.conversation_id);
        debug!("conversation continued: {}", response.conversation_id);

        Ok(response)
    }

    /// Forget the stored conversation and start fresh on the next message
    pub fn reset(&self) {
        self.gateway.store().clear_conversation_id();
    }
}
