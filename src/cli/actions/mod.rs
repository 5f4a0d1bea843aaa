use crate::s3::{S3, ServiceError};
use anyhow::Result;
use std::path::PathBuf;
use thiserror::Error;

pub mod provision;
pub mod teardown;

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Provision { file: PathBuf },
    Teardown,
}

/// The file to upload does not exist, detected before any request is made
#[derive(Debug, Error)]
#[error("File not found: {}", .0.display())]
pub struct FileNotFound(pub PathBuf);

/// # Errors
/// Will return an error if any request of the flow fails
pub async fn handle(s3: &S3, action: Action) -> Result<()> {
    match action {
        Action::Provision { file } => provision::handle(s3, &file).await,
        Action::Teardown => teardown::handle(s3).await,
    }
}

/// Process exit status: `2` missing upload file, `1` anything else
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<FileNotFound>().is_some() {
        2
    } else {
        1
    }
}

/// Prefix of the diagnostic line, provider answers are tagged as such
#[must_use]
pub fn error_tag(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<ServiceError>().is_some() {
        "[AWS ERROR]"
    } else {
        "[ERROR]"
    }
}
