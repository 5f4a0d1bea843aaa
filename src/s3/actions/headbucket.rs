use crate::{
    s3::actions::{Action, response_error},
    s3::{S3, request, tools},
};
use anyhow::Result;
use reqwest::Method;
use std::collections::BTreeMap;

/// Check that the bucket exists and the credentials can reach it
#[derive(Debug, Default)]
pub struct HeadBucket {}

impl HeadBucket {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// # Errors
    ///
    /// Will return `Err` with a [`crate::s3::ServiceError`] if the bucket can
    /// not be reached, HEAD answers have no body so only the status is known
    pub async fn request(&self, s3: &S3) -> Result<()> {
        let (url, headers) = &self.sign(s3, tools::sha256_digest("").as_ref(), None, None)?;
        let response = request::request(url.clone(), self.http_method()?, headers).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for HeadBucket {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::HEAD)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}
