use crate::{
    s3::actions::{Action, response_error},
    s3::xml::{self, WriteXml, write_text_element},
    s3::{S3, request, tools},
};
use anyhow::Result;
use bytes::Bytes;
use quick_xml::Writer;
use reqwest::Method;
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Debug, Default)]
pub struct CreateBucket {}

struct CreateBucketConfiguration<'a> {
    location_constraint: &'a str,
}

impl WriteXml for CreateBucketConfiguration<'_> {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_text_element(writer, "LocationConstraint", self.location_constraint)
    }
}

impl CreateBucket {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// The location constraint document, `None` for the default region which
    /// rejects an explicit constraint
    ///
    /// # Errors
    ///
    /// Will return `Err` if the document can not be written
    pub fn body(s3: &S3) -> Result<Option<String>> {
        if s3.region().is_default() {
            return Ok(None);
        }

        let config = CreateBucketConfiguration {
            location_constraint: s3.region().name(),
        };

        Ok(Some(xml::to_xml("CreateBucketConfiguration", &config)?))
    }

    /// # Errors
    ///
    /// Will return `Err` with a [`crate::s3::ServiceError`] if the provider
    /// refuses the bucket
    pub async fn request(&self, s3: &S3) -> Result<Option<String>> {
        let response = match Self::body(s3)? {
            Some(body) => {
                let (url, headers) = &self.sign(
                    s3,
                    tools::sha256_digest(&body).as_ref(),
                    None,
                    Some(body.len()),
                )?;
                request::request_body(url.clone(), self.http_method()?, headers, Bytes::from(body))
                    .await?
            }

            None => {
                let (url, headers) =
                    &self.sign(s3, tools::sha256_digest("").as_ref(), None, None)?;
                request::request(url.clone(), self.http_method()?, headers).await?
            }
        };

        if response.status().is_success() {
            Ok(response
                .headers()
                .get("location")
                .and_then(|location| location.to_str().ok())
                .map(ToString::to_string))
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for CreateBucket {
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
        None
    }
}
