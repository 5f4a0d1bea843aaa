use crate::{
    s3::actions::{Action, response_error},
    s3::lifecycle::LifecycleConfiguration,
    s3::{S3, request, tools},
};
use anyhow::Result;
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct GetBucketLifecycleConfiguration {}

impl GetBucketLifecycleConfiguration {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or the bucket has no
    /// lifecycle configuration (`NoSuchLifecycleConfiguration`)
    pub async fn request(&self, s3: &S3) -> Result<LifecycleConfiguration> {
        let (url, headers) = &self.sign(s3, tools::sha256_digest("").as_ref(), None, None)?;
        let response = request::request(url.clone(), self.http_method()?, headers).await?;

        if response.status().is_success() {
            Ok(from_str(&response.text().await?)?)
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for GetBucketLifecycleConfiguration {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::GET)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        Some(BTreeMap::from([("lifecycle", "")]))
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}
