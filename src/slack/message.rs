//! Send plaintext messages to a Slack channel.

use super::{
    api::{Ack, SlackClient},
    channel::ChannelId,
    error::SlackError,
};
use serde::Serialize;

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct MessageRequest<'a> {
    channel: &'a ChannelId,
    text: &'a str,
}

impl SlackClient {
    /// Post a message in a channel we've already joined. Every call results in
    /// a new message; Slack doesn't deduplicate.
    pub async fn post_message(&self, channel: &ChannelId, text: &str) -> Result<(), SlackError> {
        let _: Ack = self
            .call(
                self.post("/chat.postMessage")
                    .json(&MessageRequest { channel, text }),
            )
            .await?;

        Ok(())
    }
}
