use crate::{
    s3::actions::{Action, response_error},
    s3::responses::PublicAccessBlockConfiguration,
    s3::{S3, request, tools},
};
use anyhow::Result;
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct GetPublicAccessBlock<'a> {
    expected_owner: Option<&'a str>,
}

impl<'a> GetPublicAccessBlock<'a> {
    #[must_use]
    pub const fn new(expected_owner: Option<&'a str>) -> Self {
        Self { expected_owner }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or the bucket has no
    /// public access block (`NoSuchPublicAccessBlockConfiguration`)
    pub async fn request(&self, s3: &S3) -> Result<PublicAccessBlockConfiguration> {
        let (url, headers) = &self.sign(s3, tools::sha256_digest("").as_ref(), None, None)?;
        let response = request::request(url.clone(), self.http_method()?, headers).await?;

        if response.status().is_success() {
            Ok(from_str(&response.text().await?)?)
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for GetPublicAccessBlock<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::GET)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        self.expected_owner
            .map(|owner| BTreeMap::from([("x-amz-expected-bucket-owner", owner)]))
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        Some(BTreeMap::from([("publicAccessBlock", "")]))
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}
