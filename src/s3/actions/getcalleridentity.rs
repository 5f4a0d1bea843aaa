use crate::{
    s3::actions::{Action, response_error},
    s3::responses::{CallerIdentity, GetCallerIdentityResponse},
    s3::{S3, request, tools},
};
use anyhow::Result;
use bytes::Bytes;
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;
use url::Url;

const BODY: &str = "Action=GetCallerIdentity&Version=2011-06-15";

/// Resolve the account owning the credentials, STS query protocol
#[derive(Debug, Default)]
pub struct GetCallerIdentity {}

impl GetCallerIdentity {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// # Errors
    ///
    /// Will return `Err` if the credentials are rejected or can not make the request
    pub async fn request(&self, s3: &S3) -> Result<CallerIdentity> {
        let (url, headers) = &self.sign(
            s3,
            tools::sha256_digest(BODY).as_ref(),
            None,
            Some(BODY.len()),
        )?;

        let response = request::request_body(
            url.clone(),
            self.http_method()?,
            headers,
            Bytes::from_static(BODY.as_bytes()),
        )
        .await?;

        if response.status().is_success() {
            let rs: GetCallerIdentityResponse = from_str(&response.text().await?)?;
            Ok(rs.result)
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for GetCallerIdentity {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::POST)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        Some(BTreeMap::from([(
            "content-type",
            "application/x-www-form-urlencoded; charset=utf-8",
        )]))
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }

    fn service(&self) -> &'static str {
        "sts"
    }

    // regional STS endpoint, never bucket scoped
    fn endpoint(&self, s3: &S3) -> Result<Url> {
        s3.service_endpoint(self.service())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::s3::ServiceError;
    use crate::s3::actions::tests::{mock_s3, s3};

    #[test]
    fn test_sign() {
        let action = GetCallerIdentity::new();
        let (url, headers) = action
            .sign(&s3(Some("bucket")), tools::sha256_digest(BODY).as_ref(), None, None)
            .unwrap();

        assert_eq!("https://sts.us-west-1.amazonaws.com/", url.as_str());
        assert!(
            headers
                .get("authorization")
                .unwrap()
                .contains("/us-west-1/sts/aws4_request")
        );
        assert!(!headers.contains_key("x-amz-content-sha256"));
    }

    #[tokio::test]
    async fn test_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header(
                "content-type",
                "application/x-www-form-urlencoded; charset=utf-8",
            )
            .match_body(BODY)
            .with_status(200)
            .with_body(
                r#"<GetCallerIdentityResponse xmlns="https://sts.amazonaws.com/doc/2011-06-15/">
  <GetCallerIdentityResult>
    <Arn>arn:aws:iam::123456789012:user/ops</Arn>
    <UserId>AIDAEXAMPLE</UserId>
    <Account>123456789012</Account>
  </GetCallerIdentityResult>
  <ResponseMetadata><RequestId>r1</RequestId></ResponseMetadata>
</GetCallerIdentityResponse>"#,
            )
            .create_async()
            .await;

        let s3 = mock_s3(&server.url(), "us-east-1", Some("bucket"));
        let identity = GetCallerIdentity::new().request(&s3).await.unwrap();
        assert_eq!(identity.account, "123456789012");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_invalid_token() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(403)
            .with_body(
                r"<ErrorResponse><Error><Type>Sender</Type><Code>InvalidClientTokenId</Code><Message>The security token included in the request is invalid.</Message></Error><RequestId>r2</RequestId></ErrorResponse>",
            )
            .create_async()
            .await;

        let s3 = mock_s3(&server.url(), "us-east-1", None);
        let err = GetCallerIdentity::new().request(&s3).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ServiceError>().unwrap().code,
            "InvalidClientTokenId"
        );
    }
}
