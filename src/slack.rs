//! Talks to Slack's Web API on behalf of a bot token.
//!
//! Only the three methods the greeting workflow needs are bound: listing
//! conversations, joining one, and posting a plaintext message. See
//! [api::SlackClient].

pub mod api;
pub mod auth;
pub mod channel;
pub mod error;
pub mod message;
