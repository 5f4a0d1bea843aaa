//! Provider reported errors
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/ErrorResponses.html>

use crate::s3::responses::{ErrorResponse, StsErrorResponse};
use anyhow::Result;
use quick_xml::de::from_str;
use reqwest::{Response, StatusCode};
use thiserror::Error;

/// A request the provider answered with a non 2xx status
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code} (HTTP {}){}{}", .status.as_u16(), message_suffix(.message), request_id_suffix(.request_id.as_deref()))]
pub struct ServiceError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
    pub host_id: Option<String>,
}

impl ServiceError {
    /// Build the error from the status and the raw body, S3 returns
    /// `<Error>` documents while STS wraps them in `<ErrorResponse>`. HEAD
    /// responses carry no body at all so the code falls back to the status.
    #[must_use]
    pub fn from_parts(status: StatusCode, body: &str) -> Self {
        let (code, message, request_id) = if let Ok(e) = from_str::<ErrorResponse>(body) {
            (e.code, e.message.unwrap_or_default(), e.request_id)
        } else if let Ok(e) = from_str::<StsErrorResponse>(body) {
            (e.error.code, e.error.message.unwrap_or_default(), e.request_id)
        } else {
            (status_code(status), body.trim().to_string(), None)
        };

        Self {
            status,
            code,
            message,
            request_id,
            host_id: None,
        }
    }

    /// `HeadBucket` answers 404 without a body, the other calls use one of the codes
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
            || matches!(self.code.as_str(), "404" | "NoSuchBucket" | "NotFound")
    }

    #[must_use]
    pub fn is_bucket_owned_by_you(&self) -> bool {
        self.code == "BucketAlreadyOwnedByYou"
    }

    /// Providers without versioning support reject `ListObjectVersions`
    #[must_use]
    pub fn is_versioning_unsupported(&self) -> bool {
        self.status == StatusCode::NOT_IMPLEMENTED
            || matches!(self.code.as_str(), "NotImplemented" | "MethodNotAllowed")
    }
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {message}")
    }
}

fn request_id_suffix(request_id: Option<&str>) -> String {
    request_id.map_or_else(String::new, |rid| format!(" [Request ID: {rid}]"))
}

fn status_code(status: StatusCode) -> String {
    match status {
        StatusCode::NOT_FOUND => String::from("NotFound"),
        StatusCode::FORBIDDEN => String::from("Forbidden"),
        StatusCode::MOVED_PERMANENTLY => String::from("PermanentRedirect"),
        StatusCode::BAD_REQUEST => String::from("BadRequest"),
        _ => status.as_u16().to_string(),
    }
}

/// Consume a failed response into a [`ServiceError`]
///
/// # Errors
///
/// Will return `Err` if the body can not be read
pub async fn response_error(response: Response) -> Result<ServiceError> {
    let status = response.status();

    let request_id = response
        .headers()
        .get("x-amz-request-id")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let host_id = response
        .headers()
        .get("x-amz-id-2")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let body = response.text().await?;

    let mut error = ServiceError::from_parts(status, &body);
    if error.request_id.is_none() {
        error.request_id = request_id;
    }
    error.host_id = host_id;

    log::debug!("service error: {error:?}");

    Ok(error)
}
