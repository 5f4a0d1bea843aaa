pub mod actions;
pub mod credentials;
pub mod error;
pub mod lifecycle;
pub mod region;
pub mod request;
pub mod responses;
pub mod signature;
pub mod tools;
pub mod xml;

pub use self::{
    credentials::Credentials, error::ServiceError, region::Region, signature::Signature,
};

use anyhow::{Result, anyhow};
use std::fmt;
use url::Url;

#[derive(Debug, Clone)]
pub struct S3 {
    // AWS Credentials
    credentials: Credentials,
    // AWS Region
    region: Region,
    // bucket name, None for calls outside a bucket (STS)
    bucket: Option<String>,
}

// Amazon S3 API Reference
// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>
impl S3 {
    #[must_use]
    pub fn new(credentials: &Credentials, region: &Region, bucket: Option<String>) -> Self {
        Self {
            credentials: credentials.clone(),
            region: region.clone(),
            bucket,
        }
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub fn bucket(&self) -> Option<&str> {
        self.bucket.as_deref()
    }

    /// Base URL for `service`, custom endpoints are used as given, AWS hosts
    /// are reached over https
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint is not a valid URL
    pub fn service_endpoint(&self, service: &str) -> Result<Url> {
        let endpoint = self.region.endpoint(service);
        let url = if endpoint.contains("://") {
            Url::parse(&endpoint)?
        } else {
            Url::parse(&format!("https://{endpoint}"))?
        };
        Ok(url)
    }

    /// S3 URL for the bucket, path style: `https://s3.<region>.amazonaws.com/<bucket>`
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint is not a valid URL
    pub fn endpoint(&self) -> Result<Url> {
        let mut url = self.service_endpoint("s3")?;
        if let Some(bucket) = &self.bucket {
            url.path_segments_mut()
                .map_err(|()| anyhow!("cannot be base: {}", self.region.endpoint("s3")))?
                .pop_if_empty()
                .push(bucket);
        }
        Ok(url)
    }
}

impl fmt::Display for S3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bucket {
            Some(bucket) => write!(f, "s3://{bucket} ({})", self.region.name()),
            None => write!(f, "{}", self.region.name()),
        }
    }
}
