use crate::{
    s3::actions::{Action, response_error},
    s3::{S3, request, tools::sha256_md5_digest},
};
use anyhow::Result;
use reqwest::Method;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug)]
pub struct PutObject<'a> {
    key: &'a str,
    file: &'a Path,
}

impl<'a> PutObject<'a> {
    #[must_use]
    pub const fn new(key: &'a str, file: &'a Path) -> Self {
        Self { key, file }
    }

    /// Upload the file in a single request, the body is streamed from disk
    ///
    /// # Errors
    ///
    /// Will return `Err` if can not read the file or make the request
    pub async fn request(&self, s3: &S3) -> Result<BTreeMap<&'static str, String>> {
        let (sha, md5, length) = sha256_md5_digest(self.file).await?;

        let (url, headers) = &self.sign(s3, sha.as_ref(), Some(md5.as_slice()), Some(length))?;

        let response = request::upload(
            url.clone(),
            self.http_method()?,
            headers,
            self.file,
            u64::try_from(length)?,
        )
        .await?;

        if response.status().is_success() {
            let mut h: BTreeMap<&'static str, String> = BTreeMap::new();
            if let Some(etag) = response.headers().get("ETag") {
                h.insert("ETag", etag.to_str()?.to_string());
            }
            if let Some(vid) = response.headers().get("x-amz-version-id") {
                h.insert("Version ID", vid.to_str()?.to_string());
            }
            Ok(h)
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for PutObject<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::PUT)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(self.key.split('/').collect())
    }
}
