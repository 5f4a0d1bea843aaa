use crate::{
    s3::actions::{Action, response_error},
    s3::responses::PublicAccessBlockConfiguration,
    s3::xml::{self, WriteXml, write_bool},
    s3::{S3, request, tools},
};
use anyhow::Result;
use bytes::Bytes;
use quick_xml::Writer;
use reqwest::Method;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Apply a public access block to the bucket, `expected_owner` makes the
/// provider reject the call when the bucket belongs to another account
#[derive(Debug)]
pub struct PutPublicAccessBlock<'a> {
    config: PublicAccessBlockConfiguration,
    expected_owner: Option<&'a str>,
}

impl WriteXml for PublicAccessBlockConfiguration {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        write_bool(writer, "BlockPublicAcls", self.block_public_acls)?;
        write_bool(writer, "IgnorePublicAcls", self.ignore_public_acls)?;
        write_bool(writer, "BlockPublicPolicy", self.block_public_policy)?;
        write_bool(writer, "RestrictPublicBuckets", self.restrict_public_buckets)
    }
}

impl<'a> PutPublicAccessBlock<'a> {
    #[must_use]
    pub const fn new(config: PublicAccessBlockConfiguration, expected_owner: Option<&'a str>) -> Self {
        Self {
            config,
            expected_owner,
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request
    pub async fn request(&self, s3: &S3) -> Result<()> {
        let body = xml::to_xml("PublicAccessBlockConfiguration", &self.config)?;
        let md5 = tools::md5_digest(&body);

        let (url, headers) = &self.sign(
            s3,
            tools::sha256_digest(&body).as_ref(),
            Some(md5.as_slice()),
            Some(body.len()),
        )?;

        let response =
            request::request_body(url.clone(), self.http_method()?, headers, Bytes::from(body))
                .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for PutPublicAccessBlock<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::PUT)
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::s3::actions::tests::{mock_s3, s3};
    use mockito::Matcher;

    #[test]
    fn test_method() {
        let action = PutPublicAccessBlock::new(PublicAccessBlockConfiguration::block_all(), None);
        assert_eq!(Method::PUT, action.http_method().unwrap());
        assert_eq!(None, action.headers());
    }

    #[test]
    fn test_sign() {
        let action = PutPublicAccessBlock::new(
            PublicAccessBlockConfiguration::block_all(),
            Some("123456789012"),
        );
        let (url, headers) = action
            .sign(&s3(Some("bucket")), tools::sha256_digest("").as_ref(), Some([0u8; 16].as_slice()), Some(0))
            .unwrap();

        assert_eq!(
            "https://s3.us-west-1.amazonaws.com/bucket?publicAccessBlock=",
            url.as_str()
        );
        assert_eq!(
            headers.get("x-amz-expected-bucket-owner").unwrap(),
            "123456789012"
        );
        assert_eq!(headers.get("content-md5").unwrap(), "AAAAAAAAAAAAAAAAAAAAAA==");
        assert!(
            headers
                .get("authorization")
                .unwrap()
                .contains("x-amz-expected-bucket-owner")
        );
    }

    #[test]
    fn test_body() {
        let xml = xml::to_xml(
            "PublicAccessBlockConfiguration",
            &PublicAccessBlockConfiguration::block_all(),
        )
        .unwrap();
        assert!(xml.ends_with("<BlockPublicAcls>true</BlockPublicAcls><IgnorePublicAcls>true</IgnorePublicAcls><BlockPublicPolicy>true</BlockPublicPolicy><RestrictPublicBuckets>true</RestrictPublicBuckets></PublicAccessBlockConfiguration>"));
    }

    #[tokio::test]
    async fn test_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/bucket")
            .match_query(Matcher::UrlEncoded("publicAccessBlock".into(), String::new()))
            .match_header("x-amz-expected-bucket-owner", "123456789012")
            .match_header("content-md5", Matcher::Any)
            .match_body(Matcher::Regex(
                "<RestrictPublicBuckets>true</RestrictPublicBuckets>".to_string(),
            ))
            .with_status(200)
            .create_async()
            .await;

        let s3 = mock_s3(&server.url(), "us-east-1", Some("bucket"));
        PutPublicAccessBlock::new(
            PublicAccessBlockConfiguration::block_all(),
            Some("123456789012"),
        )
        .request(&s3)
        .await
        .unwrap();
        mock.assert_async().await;
    }
}
