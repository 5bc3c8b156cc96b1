//! Say hi to a handful of random Slack channels.
//!
//! Lists the channels visible to `$SLACK_TOKEN`, picks five of them at random
//! (possibly the same one more than once), joins any we're not already in,
//! and posts "hi". See [config] for the supported environment variables.

use config::Config;
use dotenvy::dotenv;
use rand::{rngs::StdRng, SeedableRng};
use slack::api::SlackClient;
use std::process::ExitCode;
use tracing::{error, info, warn};
use workflow::{FailurePolicy, Outcome, RunReport, GREETING, SELECTION_COUNT};

mod config;
mod de;
mod error;
mod service;
mod slack;
mod workflow;

/// Application entrypoint. Initialises tracing, reads configuration, and runs
/// the workflow once. Logs go to stderr; the summary goes to stdout.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    let config = match Config::from_env() {
        Ok(x) => x,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Seeding selection with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let client = SlackClient::new(config.api_base.to_string(), config.slack_token);

    if greet(&client, &mut rng, config.policy).await {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Run the workflow, returning whether every greeting was delivered.
async fn greet(client: &SlackClient, rng: &mut StdRng, policy: FailurePolicy) -> bool {
    match workflow::run(client, rng, SELECTION_COUNT, GREETING, policy).await {
        Err(e) => {
            error!("{}", e);
            false
        }
        Ok(report) => {
            println!("{}", summarise(&report));

            if !report.is_success() {
                error!("{} of {} greetings failed", report.failed(), report.outcomes.len());
            }

            report.is_success()
        }
    }
}

fn describe(o: &Outcome) -> String {
    format!("{} ({}, position {})", o.channel.name, o.channel.id, o.index)
}

/// One line per attempted round, then a tally.
fn summarise(report: &RunReport) -> String {
    let mut lines: Vec<String> = report
        .outcomes
        .iter()
        .map(|o| match &o.result {
            Ok(d) if d.joined => format!("joined and greeted {}", describe(o)),
            Ok(_) => format!("greeted {}", describe(o)),
            Err(e) => format!("failed {}: {}", describe(o), e),
        })
        .collect();

    let mut tally = format!("{} delivered, {} failed", report.delivered(), report.failed());
    if report.halted {
        tally.push_str(", remaining rounds skipped");
    }
    lines.push(tally);

    lines.join("\n")
}
