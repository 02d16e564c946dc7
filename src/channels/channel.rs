//! Channel trait and message types.

use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use futures::Stream;

use crate::error::ChannelError;

/// A message arriving from a transport.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Originating channel name.
    pub channel: String,
    /// Opaque sender identity, stable per user within the channel.
    pub user_id: String,
    pub text: String,
    pub received_at: DateTime<Local>,
    /// Channel-specific routing data (e.g. Telegram chat id).
    pub metadata: serde_json::Value,
}

impl IncomingMessage {
    pub fn new(channel: &str, user_id: &str, text: &str) -> Self {
        Self {
            channel: channel.to_string(),
            user_id: user_id.to_string(),
            text: text.to_string(),
            received_at: Local::now(),
            metadata: serde_json::json!({}),
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A reply to send back on the originating transport.
#[derive(Debug, Clone)]
pub struct OutgoingResponse {
    pub content: String,
}

impl OutgoingResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Stream of inbound messages produced by a started channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// A message transport: produces inbound events, delivers text replies.
#[async_trait]
pub trait Channel: Send + Sync {
    fn name(&self) -> &str;

    /// Start listening and return the inbound message stream.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Send a reply to the sender of `msg`.
    async fn respond(
        &self,
        msg: &IncomingMessage,
        response: OutgoingResponse,
    ) -> Result<(), ChannelError>;

    /// Verify the channel can reach its backend.
    async fn health_check(&self) -> Result<(), ChannelError>;
}
