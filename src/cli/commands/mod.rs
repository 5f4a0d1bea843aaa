use crate::cli::config::DEFAULT_PROFILE;
use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::ValueParser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use regex::Regex;
use std::path::PathBuf;

/// Default file uploaded by `s3tier`
pub const DEFAULT_FILE: &str = "sample/report.txt";

/// S3 general purpose bucket naming rules
/// <https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html>
pub fn validator_bucket_name() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<String, String> {
        let re = Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").map_err(|e| e.to_string())?;

        if !re.is_match(s) {
            return Err(String::from(
                "3-63 characters: lowercase letters, numbers, dots and hyphens, must begin and end with a letter or number",
            ));
        }

        if s.contains("..") {
            return Err(String::from("must not contain two adjacent periods"));
        }

        if s.split('.').count() == 4 && s.split('.').all(|p| p.parse::<u8>().is_ok()) {
            return Err(String::from("must not be formatted as an IP address"));
        }

        Ok(s.to_string())
    })
}

pub fn validator_endpoint() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<String, String> {
        let url = if s.contains("://") {
            s.to_string()
        } else {
            format!("https://{s}")
        };

        match url::Url::parse(&url) {
            Ok(u) if u.host_str().is_some() => Ok(s.to_string()),
            _ => Err(format!("Invalid endpoint URL: '{s}'")),
        }
    })
}

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default())
}

// arguments shared by both binaries
fn base(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .version(env!("CARGO_PKG_VERSION"))
        .about(about)
        .color(ColorChoice::Auto)
        .styles(styles())
        .arg(
            Arg::new("bucket")
                .help("S3 bucket name")
                .long("bucket")
                .short('b')
                .required(true)
                .value_parser(validator_bucket_name())
                .num_args(1),
        )
        .arg(
            Arg::new("region")
                .help("AWS region, example: us-east-1")
                .long("region")
                .env("AWS_REGION")
                .num_args(1),
        )
        .arg(
            Arg::new("profile")
                .help("Profile from the AWS shared credentials/config files")
                .long("profile")
                .env("AWS_PROFILE")
                .default_value(DEFAULT_PROFILE)
                .num_args(1),
        )
        .arg(
            Arg::new("endpoint")
                .help("S3 compatible endpoint URL, example: http://localhost:9000")
                .long("endpoint")
                .env("AWS_ENDPOINT_URL")
                .value_parser(validator_endpoint())
                .num_args(1),
        )
        .arg(
            Arg::new("verbose")
                .help("Verbosity level")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count),
        )
}

/// `s3tier`: create the bucket with the cost optimization lifecycle
#[must_use]
pub fn provision() -> Command {
    base(
        "s3tier",
        "Create an S3 bucket with a cost optimization lifecycle, block public access and upload a sample file",
    )
    .arg(
        Arg::new("file")
            .help("Local file to upload under reports/")
            .long("file")
            .short('f')
            .default_value(DEFAULT_FILE)
            .value_parser(clap::value_parser!(PathBuf))
            .num_args(1),
    )
}

/// `s3tier-cleanup`: empty and delete the bucket
#[must_use]
pub fn cleanup() -> Command {
    base(
        "s3tier-cleanup",
        "Delete every object version and delete marker of an S3 bucket, then the bucket",
    )
}
