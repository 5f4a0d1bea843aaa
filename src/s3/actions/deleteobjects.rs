use crate::{
    s3::actions::{Action, response_error},
    s3::responses::DeleteResult,
    s3::xml::{self, WriteXml, write_bool, write_optional_text, write_text_element},
    s3::{S3, request, tools},
};
use anyhow::{Result, anyhow};
use bytes::Bytes;
use quick_xml::{Writer, de::from_str};
use reqwest::Method;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Most keys a single `DeleteObjects` request accepts
pub const MAX_DELETE_KEYS: usize = 1000;

/// A key, and optionally the version of it, to delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectIdentifier {
    pub key: String,
    pub version_id: Option<String>,
}

impl ObjectIdentifier {
    #[must_use]
    pub fn new(key: &str, version_id: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            version_id: version_id.map(ToString::to_string),
        }
    }
}

#[derive(Debug)]
pub struct DeleteObjects<'a> {
    objects: &'a [ObjectIdentifier],
    quiet: bool,
}

impl WriteXml for DeleteObjects<'_> {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for object in self.objects {
            writer.create_element("Object").write_inner_content(|w| {
                write_text_element(w, "Key", &object.key)?;
                write_optional_text(w, "VersionId", object.version_id.as_deref())
            })?;
        }
        write_bool(writer, "Quiet", self.quiet)
    }
}

impl<'a> DeleteObjects<'a> {
    /// Quiet mode, the answer only lists the keys that could not be deleted
    #[must_use]
    pub const fn new(objects: &'a [ObjectIdentifier]) -> Self {
        Self {
            objects,
            quiet: true,
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the batch is larger than [`MAX_DELETE_KEYS`] or can
    /// not make the request, keys the provider refused are in the `errors` of
    /// the returned [`DeleteResult`]
    pub async fn request(&self, s3: &S3) -> Result<DeleteResult> {
        if self.objects.len() > MAX_DELETE_KEYS {
            return Err(anyhow!(
                "DeleteObjects accepts at most {MAX_DELETE_KEYS} keys, got {}",
                self.objects.len()
            ));
        }

        let body = xml::to_xml("Delete", self)?;
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
            let body = response.text().await?;
            if body.trim().is_empty() {
                Ok(DeleteResult::default())
            } else {
                Ok(from_str(&body)?)
            }
        } else {
            Err(response_error(response).await?.into())
        }
    }
}

impl Action for DeleteObjects<'_> {
    fn http_method(&self) -> Result<Method> {
        Ok(Method::POST)
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        Some(BTreeMap::from([("delete", "")]))
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::s3::actions::tests::mock_s3;
    use mockito::Matcher;

    #[test]
    fn test_body() {
        let objects = vec![
            ObjectIdentifier::new("reports/a&b.txt", Some("v1")),
            ObjectIdentifier::new("reports/c.txt", None),
        ];
        let xml = xml::to_xml("Delete", &DeleteObjects::new(&objects)).unwrap();
        assert!(xml.ends_with(
            "<Object><Key>reports/a&amp;b.txt</Key><VersionId>v1</VersionId></Object><Object><Key>reports/c.txt</Key></Object><Quiet>true</Quiet></Delete>"
        ));
    }

    #[tokio::test]
    async fn test_request_too_many() {
        let objects = vec![ObjectIdentifier::new("a", None); MAX_DELETE_KEYS + 1];
        let s3 = mock_s3("http://127.0.0.1:1", "us-east-1", Some("bucket"));
        assert!(DeleteObjects::new(&objects).request(&s3).await.is_err());
    }

    #[tokio::test]
    async fn test_request_partial_failure() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bucket")
            .match_query(Matcher::UrlEncoded("delete".into(), String::new()))
            .match_header("content-md5", Matcher::Any)
            .match_body(Matcher::Regex("<Key>reports/b.txt</Key>".to_string()))
            .with_status(200)
            .with_body(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<DeleteResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Error><Key>reports/b.txt</Key><VersionId>v2</VersionId><Code>AccessDenied</Code><Message>Access Denied</Message></Error>
</DeleteResult>"#,
            )
            .create_async()
            .await;

        let objects = vec![
            ObjectIdentifier::new("reports/a.txt", Some("v1")),
            ObjectIdentifier::new("reports/b.txt", Some("v2")),
        ];
        let s3 = mock_s3(&server.url(), "us-east-1", Some("bucket"));
        let rs = DeleteObjects::new(&objects).request(&s3).await.unwrap();
        assert!(rs.deleted.is_empty());
        assert_eq!(rs.errors.len(), 1);
        assert_eq!(rs.errors[0].key, "reports/b.txt");
        mock.assert_async().await;
    }
}
