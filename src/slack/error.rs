use std::fmt;

/// Sum type representing every way a single Slack API call can fail.
#[derive(Debug)]
pub enum SlackError {
    /// The request couldn't complete, or came back with a non-success status.
    APIRequestFailed(reqwest::Error),
    /// The body wasn't the shape we expected.
    DecodeFailed(serde_json::Error),
    /// Slack answered `"ok": false` with the given error code.
    APIResponseError(String),
}

impl From<reqwest::Error> for SlackError {
    fn from(e: reqwest::Error) -> Self {
        SlackError::APIRequestFailed(e)
    }
}

impl From<serde_json::Error> for SlackError {
    fn from(e: serde_json::Error) -> Self {
        SlackError::DecodeFailed(e)
    }
}

impl fmt::Display for SlackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            SlackError::APIRequestFailed(e) => format!("Slack API request failed: {}", e),
            SlackError::DecodeFailed(e) => format!("Slack API response malformed: {}", e),
            SlackError::APIResponseError(e) => format!("Slack API returned error: {}", e),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for SlackError {}
