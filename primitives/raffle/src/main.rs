//! Raffle - Telegram Channel Giveaway
//!
//! Picks random members of a Telegram channel as prize winners.
//!
//! The first run asks for a phone number and login code; the session is then
//! kept in `~/.raffle_telegram.session` so later runs skip the login.
//!
//! # Usage
//!
//! ```bash
//! # Draw 3 winners among recent members
//! raffle --api_id 12345 --api_hash 0123456789abcdef --channel giveaways
//!
//! # Draw 5 winners among members whose name matches "anna"
//! raffle --api_id 12345 --api_hash 0123456789abcdef --channel giveaways \
//!     --user_search anna --user_count 5
//! ```
//!
//! Set `RUST_LOG=debug` to see why a connection failed.

mod login;
mod telegram;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use raffle_common::{
    MemberDirectory, PageRequest, Pacing, ParticipantCollection, Report, collect_page,
    sample_winners,
};
use std::{ffi::OsString, path::PathBuf};
use telegram::{ConnectError, Credentials, TelegramDirectory};
use tracing_subscriber::EnvFilter;

/// Find random users who will receive a prize.
#[derive(Parser, Debug)]
#[command(name = "raffle", version)]
#[command(about = "Find random users who will receive a prize")]
struct Args {
    /// Telegram application ID.
    #[arg(long = "api_id", env = "RAFFLE_API_ID")]
    api_id: i32,

    /// Telegram application HASH.
    #[arg(long = "api_hash", env = "RAFFLE_API_HASH")]
    api_hash: String,

    /// Telegram channel name.
    #[arg(long, env = "RAFFLE_CHANNEL")]
    channel: String,

    /// Specify search user by name.
    #[arg(long = "user_search")]
    user_search: Option<String>,

    /// Specify count user.
    #[arg(long = "user_count", default_value_t = 3)]
    user_count: usize,

    /// Session file (default: ~/.raffle_telegram.session).
    #[arg(long, env = "RAFFLE_SESSION")]
    session: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// A bare `raffle` shows help instead of a missing-argument error.
fn is_bare_invocation(argv: &[OsString]) -> bool {
    argv.len() <= 1
}

async fn connect(args: &Args) -> Result<TelegramDirectory, ConnectError> {
    let credentials = Credentials::new(args.api_id, args.api_hash.clone(), args.session.clone())?;
    TelegramDirectory::connect(&credentials).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let argv: Vec<OsString> = std::env::args_os().collect();
    if is_bare_invocation(&argv) {
        Args::command().print_help()?;
        return Ok(());
    }

    let args = Args::parse_from(argv);
    init_tracing();

    // Every setup failure gets the same message; details go to the debug log
    let directory = match connect(&args).await {
        Ok(directory) => directory,
        Err(e) => {
            tracing::debug!(stage = e.stage(), error = %e, "Session setup failed");
            eprintln!("{}", "Connect to telegram error".red());
            std::process::exit(1);
        }
    };

    let total = directory.member_count(&args.channel).await?;

    println!("Start search...");

    let request = PageRequest::new(&args.channel, args.user_search.as_deref());
    let mut members = ParticipantCollection::new();
    collect_page(&directory, &Pacing::default(), &request, &mut members).await?;

    let winners = sample_winners(&members, args.user_count)?;

    let mut stdout = std::io::stdout().lock();
    Report::new(total, members.len(), &winners).render(&mut stdout)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{FromArgMatches, error::ErrorKind};

    const REQUIRED: [&str; 7] = [
        "raffle",
        "--api_id",
        "12345",
        "--api_hash",
        "abcdef",
        "--channel",
        "giveaways",
    ];

    /// Parses with the `RAFFLE_*` fallbacks switched off, so the outcome does
    /// not depend on the test environment.
    fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
        let command = ["api_id", "api_hash", "channel", "session"]
            .into_iter()
            .fold(Args::command(), |command, id| {
                command.mut_arg(id, |arg| arg.env(None::<&'static str>))
            });
        let matches = command.try_get_matches_from(argv.iter().copied())?;
        Args::from_arg_matches(&matches)
    }

    fn without(flag: &str) -> Vec<&'static str> {
        let position = REQUIRED.iter().position(|arg| *arg == flag).unwrap();
        REQUIRED
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != position && *index != position + 1)
            .map(|(_, arg)| *arg)
            .collect()
    }

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn underscore_flags_parse_with_defaults() {
        let args = parse(&REQUIRED).unwrap();

        assert_eq!(args.api_id, 12345);
        assert_eq!(args.api_hash, "abcdef");
        assert_eq!(args.channel, "giveaways");
        assert_eq!(args.user_search, None);
        assert_eq!(args.user_count, 3);
        assert_eq!(args.session, None);
    }

    #[test]
    fn optional_flags_parse() {
        let mut argv = REQUIRED.to_vec();
        argv.extend(["--user_search", "anna", "--user_count", "10"]);

        let args = parse(&argv).unwrap();

        assert_eq!(args.user_search.as_deref(), Some("anna"));
        assert_eq!(args.user_count, 10);
    }

    #[test]
    fn api_id_must_be_an_integer() {
        let argv = ["raffle", "--api_id", "abc", "--api_hash", "x", "--channel", "c"];

        let err = parse(&argv).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn negative_user_count_is_rejected() {
        let mut argv = REQUIRED.to_vec();
        argv.extend(["--user_count", "-1"]);

        assert!(parse(&argv).is_err());
    }

    #[test]
    fn version_flag_short_circuits() {
        let err = parse(&["raffle", "--version"]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert!(err.to_string().contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn missing_api_id_is_rejected() {
        let err = parse(&without("--api_id")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_api_hash_is_rejected() {
        let err = parse(&without("--api_hash")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn missing_channel_is_rejected() {
        let err = parse(&without("--channel")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn bare_invocation_is_detected() {
        assert!(is_bare_invocation(&[OsString::from("raffle")]));
        assert!(is_bare_invocation(&[]));
        assert!(!is_bare_invocation(&[
            OsString::from("raffle"),
            OsString::from("--version")
        ]));
    }
}
