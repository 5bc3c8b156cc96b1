//! List the channels visible to our token, and programmatically join them.

use super::{
    api::{Ack, SlackClient},
    error::SlackError,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use std::fmt;

/// Channel names as are visible in the Slack UI, without the leading hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelName(pub String);

/// Format with the leading hash, as in the Slack UI.
///
/// ```ignore
/// let x = ChannelName("fp".into());
/// assert_eq!(format!("{}", x), "#fp");
/// ```
impl fmt::Display for ChannelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Because channel names can change, channels are generally referred to by
/// their underlying ID. This can be found in the UI by copying a link to the
/// channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub String);

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A snapshot of a channel as of listing. Membership isn't refreshed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: ChannelName,
    /// Absent for some conversation types, in which case we're not a member.
    #[serde(default)]
    pub is_member: bool,
}

/// <https://api.slack.com/methods/conversations.join#args>
#[derive(Serialize)]
struct JoinRequest<'a> {
    channel: &'a ChannelId,
}

/// <https://api.slack.com/methods/conversations.list#args>
#[derive(Serialize)]
struct ListRequest {
    /// Maximum supported is 1000, but a limit of 200 is "recommended".
    limit: u16,
    /// Doesn't affect `limit`. Archived channels can be neither joined nor
    /// posted to.
    exclude_archived: bool,
    cursor: Option<String>,
}

/// <https://api.slack.com/methods/conversations.list#examples>
#[derive(Deserialize)]
struct ListResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_true")]
    ok: bool,
    channels: Vec<Channel>,
    #[serde(default)]
    response_metadata: PaginationMeta,
}

/// The metadata attached to a [ListResponse], enabling pagination.
#[serde_as]
#[derive(Default, Deserialize)]
struct PaginationMeta {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    next_cursor: Option<String>,
}

impl SlackClient {
    /// Get every channel visible to our token, following pagination cursors
    /// until Slack stops handing them out. Order is preserved across pages.
    pub async fn list_channels(&self) -> Result<Vec<Channel>, SlackError> {
        let mut channels: Vec<Channel> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut res: ListResponse = self
                .call(self.get("/conversations.list").query(&ListRequest {
                    limit: 200,
                    exclude_archived: true,
                    cursor,
                }))
                .await?;

            channels.append(&mut res.channels);

            cursor = res.response_metadata.next_cursor;
            if cursor.is_none() {
                break Ok(channels);
            }
        }
    }

    /// We must join channels before we can message in them. Joining a channel
    /// we're already in succeeds.
    pub async fn join_channel(&self, channel: &ChannelId) -> Result<(), SlackError> {
        let _: Ack = self
            .call(
                self.post("/conversations.join")
                    .json(&JoinRequest { channel }),
            )
            .await?;

        Ok(())
    }
}
