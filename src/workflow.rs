//! Pick channels at random and greet each of them, joining where necessary.
//!
//! Picks are drawn with replacement, so a channel can be greeted more than
//! once in a single run and others not at all.

use crate::{
    error::Failure,
    service::MessagingService,
    slack::{channel::Channel, error::SlackError},
};
use rand::Rng;
use tracing::{debug, info, warn};

/// How many channels a run greets.
pub const SELECTION_COUNT: usize = 5;

/// What a run posts to every selected channel.
pub const GREETING: &str = "hi";

/// What to do when greeting one channel fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and carry on with the remaining rounds.
    #[default]
    Isolate,
    /// Record the failure and skip the remaining rounds.
    Abort,
}

/// One draw: which position in the listing was picked, and the channel there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRound<'a> {
    pub index: usize,
    pub channel: &'a Channel,
}

/// A successful greeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delivery {
    /// Whether a join was issued first.
    pub joined: bool,
}

/// The result of one attempted round.
#[derive(Debug)]
pub struct Outcome {
    pub index: usize,
    pub channel: Channel,
    pub result: Result<Delivery, SlackError>,
}

/// Every round attempted during a run, in draw order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
    /// Set when [FailurePolicy::Abort] cut the run short.
    pub halted: bool,
}

impl RunReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    pub fn is_success(&self) -> bool {
        !self.halted && self.failed() == 0
    }
}

/// Get every channel visible to the caller.
pub async fn fetch_channels<S>(service: &S) -> Result<Vec<Channel>, Failure>
where
    S: MessagingService + ?Sized,
{
    let channels = service.list_channels().await?;

    info!("Listed {} channels", channels.len());
    for c in &channels {
        debug!(id = %c.id, name = %c.name, is_member = c.is_member, "channel");
    }

    Ok(channels)
}

/// Draw `count` channels uniformly at random, with replacement. The set must
/// not be empty.
pub fn select_random_channels<'a, R>(
    set: &'a [Channel],
    count: usize,
    rng: &mut R,
) -> Result<Vec<SelectionRound<'a>>, Failure>
where
    R: Rng + ?Sized,
{
    if set.is_empty() {
        return Err(Failure::EmptyChannelSet);
    }

    Ok((0..count)
        .map(|_| {
            let index = rng.gen_range(0..set.len());
            SelectionRound {
                index,
                channel: &set[index],
            }
        })
        .collect())
}

/// Join `channel` if we weren't a member at listing time, then post `message`
/// to it. A failed join means nothing is posted.
pub async fn ensure_joined_and_send<S>(
    service: &S,
    channel: &Channel,
    message: &str,
) -> Result<Delivery, SlackError>
where
    S: MessagingService + ?Sized,
{
    let joined = !channel.is_member;
    if joined {
        debug!("Joining {}", channel.name);
        service.join_channel(&channel.id).await?;
    }

    service.post_message(&channel.id, message).await?;

    Ok(Delivery { joined })
}

/// List, select, and greet, strictly one call at a time.
///
/// Failing to list, or listing nothing, ends the run before any side effects.
/// Per-channel failures are handled according to `policy`.
pub async fn run<S, R>(
    service: &S,
    rng: &mut R,
    count: usize,
    message: &str,
    policy: FailurePolicy,
) -> Result<RunReport, Failure>
where
    S: MessagingService + ?Sized,
    R: Rng + ?Sized,
{
    let channels = fetch_channels(service).await?;
    let rounds = select_random_channels(&channels, count, rng)?;

    let mut report = RunReport::default();

    for (n, round) in rounds.iter().enumerate() {
        info!(
            "Round {}/{}: greeting {} ({})",
            n + 1,
            count,
            round.channel.name,
            round.channel.id
        );

        let result = ensure_joined_and_send(service, round.channel, message).await;
        let failed = result.is_err();

        if let Err(e) = &result {
            warn!("Failed to greet {}: {}", round.channel.name, e);
        }

        report.outcomes.push(Outcome {
            index: round.index,
            channel: round.channel.clone(),
            result,
        });

        if failed && policy == FailurePolicy::Abort {
            report.halted = true;
            break;
        }
    }

    Ok(report)
}
