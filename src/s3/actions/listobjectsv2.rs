use crate::{
    s3::actions::{Action, response_error},
    s3::responses::ListBucketResult,
    s3::{S3, request, tools},
};
use anyhow::Result;
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct ListObjectsV2<'a> {
    prefix: Option<&'a str>,
    continuation_token: Option<&'a str>,
    max_keys: Option<String>,
}

impl<'a> ListObjectsV2<'a> {
    #[must_use]
    pub const fn new(prefix: Option<&'a str>, continuation_token: Option<&'a str>) -> Self {
        Self {
            prefix,
            continuation_token,
            max_keys: None,
        }
    }

    #[must_use]
    pub fn with_max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = Some(max_keys.to_string());
        self
    }

    /// One page of keys, follow `next_continuation_token` while `is_truncated`
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<ListBucketResult> {
        let (url, headers) = &self.sign(s3, tools::sha256_digest("").as_ref(), None, None)?;
        let response = request::request(url.clone(), self.http_method()?, headers).await?;

        if response.status().is_success() {
            Ok(from_str(&response.text().await?)?)
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for ListObjectsV2<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::GET)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();

        // list-type parameter that indicates version 2 of the API
        map.insert("list-type", "2");

        if let Some(prefix) = self.prefix {
            map.insert("prefix", prefix);
        }

        if let Some(token) = self.continuation_token {
            map.insert("continuation-token", token);
        }

        if let Some(max_keys) = &self.max_keys {
            map.insert("max-keys", max_keys);
        }

        Some(map)
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}
