use crate::slack::error::SlackError;
use std::fmt;

/// Sum type representing every fail state that ends a run before any channel
/// is greeted.
#[derive(Debug)]
pub enum Failure {
    ListingFailed(SlackError),
    EmptyChannelSet,
}

impl From<SlackError> for Failure {
    fn from(e: SlackError) -> Self {
        Failure::ListingFailed(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Failure::ListingFailed(e) => format!("Could not list channels: {}", e),
            Failure::EmptyChannelSet => "No channels to choose from.".into(),
        };

        write!(f, "{}", x)
    }
}

impl std::error::Error for Failure {}
