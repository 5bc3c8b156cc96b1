//! The messaging capability the greeting workflow is written against.

use crate::slack::{
    api::SlackClient,
    channel::{Channel, ChannelId},
    error::SlackError,
};
use async_trait::async_trait;

/// The three operations the workflow needs from a workspace. [SlackClient]
/// is the real binding; tests substitute an in-memory double.
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Every channel visible to the caller, in the service's order.
    async fn list_channels(&self) -> Result<Vec<Channel>, SlackError>;

    /// Become a member of `channel`. Succeeds if already a member.
    async fn join_channel(&self, channel: &ChannelId) -> Result<(), SlackError>;

    /// Post `text` to `channel`. Not idempotent.
    async fn post_message(&self, channel: &ChannelId, text: &str) -> Result<(), SlackError>;
}

#[async_trait]
impl MessagingService for SlackClient {
    async fn list_channels(&self) -> Result<Vec<Channel>, SlackError> {
        SlackClient::list_channels(self).await
    }

    async fn join_channel(&self, channel: &ChannelId) -> Result<(), SlackError> {
        SlackClient::join_channel(self, channel).await
    }

    async fn post_message(&self, channel: &ChannelId, text: &str) -> Result<(), SlackError> {
        SlackClient::post_message(self, channel, text).await
    }
}
