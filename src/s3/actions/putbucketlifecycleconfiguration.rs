use crate::{
    s3::actions::{Action, response_error},
    s3::lifecycle::LifecycleConfiguration,
    s3::{S3, request, tools},
};
use anyhow::Result;
use bytes::Bytes;
use reqwest::Method;
use std::collections::BTreeMap;

/// Replace the bucket lifecycle configuration, existing rules are dropped
#[derive(Debug)]
pub struct PutBucketLifecycleConfiguration<'a> {
    config: &'a LifecycleConfiguration,
}

impl<'a> PutBucketLifecycleConfiguration<'a> {
    #[must_use]
    pub const fn new(config: &'a LifecycleConfiguration) -> Self {
        Self { config }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or a rule is rejected
    pub async fn request(&self, s3: &S3) -> Result<()> {
        let body = self.config.to_xml()?;
        let md5 = tools::md5_digest(&body);

        log::debug!("lifecycle configuration:\n{body}");

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

impl Action for PutBucketLifecycleConfiguration<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::PUT)
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::s3::actions::tests::{mock_s3, s3};
    use crate::s3::lifecycle::{Rule, STATUS_ENABLED, StorageClass, Transition};
    use mockito::Matcher;

    fn config() -> LifecycleConfiguration {
        LifecycleConfiguration {
            rules: vec![Rule {
                id: Some("archive".to_string()),
                status: STATUS_ENABLED.to_string(),
                transitions: vec![Transition::after_days(30, StorageClass::StandardIa)],
                ..Rule::default()
            }],
        }
    }

    #[test]
    fn test_sign() {
        let config = config();
        let action = PutBucketLifecycleConfiguration::new(&config);
        assert_eq!(Method::PUT, action.http_method().unwrap());

        let (url, _) = action
            .sign(&s3(Some("bucket")), tools::sha256_digest("").as_ref(), None, None)
            .unwrap();
        assert_eq!(
            "https://s3.us-west-1.amazonaws.com/bucket?lifecycle=",
            url.as_str()
        );
    }

    #[tokio::test]
    async fn test_request() {
        let config = config();
        let body = config.to_xml().unwrap();
        let md5 = tools::base64(tools::md5_digest(&body));

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/bucket")
            .match_query(Matcher::UrlEncoded("lifecycle".into(), String::new()))
            .match_header("content-md5", md5.as_str())
            .match_body(body.as_str())
            .with_status(200)
            .create_async()
            .await;

        let s3 = mock_s3(&server.url(), "us-east-1", Some("bucket"));
        PutBucketLifecycleConfiguration::new(&config)
            .request(&s3)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PUT", "/bucket")
            .match_query(Matcher::UrlEncoded("lifecycle".into(), String::new()))
            .with_status(400)
            .with_body("<Error><Code>MalformedXML</Code><Message>The XML you provided was not well-formed</Message></Error>")
            .create_async()
            .await;

        let s3 = mock_s3(&server.url(), "us-east-1", Some("bucket"));
        let config = config();
        let err = PutBucketLifecycleConfiguration::new(&config)
            .request(&s3)
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("MalformedXML (HTTP 400)"));
    }
}
