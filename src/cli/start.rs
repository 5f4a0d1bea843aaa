use crate::cli::{Config, actions::Action, commands, dispatch};
use crate::s3::S3;
use anyhow::{Context, Result};
use clap::{ArgMatches, Command};

/// The two binaries share the arguments and the setup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    Provision,
    Cleanup,
}

impl Program {
    #[must_use]
    pub fn command(self) -> Command {
        match self {
            Self::Provision => commands::provision(),
            Self::Cleanup => commands::cleanup(),
        }
    }
}

/// # Errors
/// Will return an error if the upload file is missing or no credentials are found
pub async fn start(program: Program) -> Result<(S3, Action)> {
    let matches = program.command().get_matches();

    let verbosity_level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(verbosity_level)
        .init();

    setup(program, &matches).await
}

/// Build the action and the `S3` client from parsed arguments
///
/// # Errors
/// Will return an error if the upload file is missing, the region is unknown
/// or no credentials are found
pub async fn setup(program: Program, matches: &ArgMatches) -> Result<(S3, Action)> {
    // before loading anything else, a missing file must not reach the provider
    let action = dispatch::dispatch(program, matches)?;

    let profile = matches
        .get_one::<String>("profile")
        .context("profile missing")?;

    let config = Config::load(
        profile,
        matches.get_one::<String>("region").map(String::as_str),
    )
    .await;

    // REGION
    let region = config.region(matches.get_one::<String>("endpoint").map(String::as_str))?;

    // BUCKET
    let bucket = matches
        .get_one::<String>("bucket")
        .cloned()
        .context("bucket missing")?;

    // AUTH
    let credentials = config.credentials().await?;

    let s3 = S3::new(&credentials, &region, Some(bucket));

    log::debug!("S3: {s3}");

    Ok((s3, action))
}
