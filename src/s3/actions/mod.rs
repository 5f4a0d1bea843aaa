//! Actions
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>

use crate::s3::{S3, Signature};
use anyhow::{Result, anyhow};
use reqwest::Method;
use std::collections::BTreeMap;
use url::Url;

pub use crate::s3::error::response_error;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_HeadBucket.html>
mod headbucket;
pub use self::headbucket::HeadBucket;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
mod createbucket;
pub use self::createbucket::CreateBucket;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteBucket.html>
mod deletebucket;
pub use self::deletebucket::DeleteBucket;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutPublicAccessBlock.html>
mod putpublicaccessblock;
pub use self::putpublicaccessblock::PutPublicAccessBlock;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_GetPublicAccessBlock.html>
mod getpublicaccessblock;
pub use self::getpublicaccessblock::GetPublicAccessBlock;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutBucketLifecycleConfiguration.html>
mod putbucketlifecycleconfiguration;
pub use self::putbucketlifecycleconfiguration::PutBucketLifecycleConfiguration;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_GetBucketLifecycleConfiguration.html>
mod getbucketlifecycleconfiguration;
pub use self::getbucketlifecycleconfiguration::GetBucketLifecycleConfiguration;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PutObject.html>
mod putobject;
pub use self::putobject::PutObject;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListObjectsV2.html>
mod listobjectsv2;
pub use self::listobjectsv2::ListObjectsV2;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListObjectVersions.html>
mod listobjectversions;
pub use self::listobjectversions::ListObjectVersions;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteObjects.html>
mod deleteobjects;
pub use self::deleteobjects::{DeleteObjects, MAX_DELETE_KEYS, ObjectIdentifier};

// <https://docs.aws.amazon.com/STS/latest/APIReference/API_GetCallerIdentity.html>
mod getcalleridentity;
pub use self::getcalleridentity::GetCallerIdentity;

pub trait Action {
    // headers to send in the request
    fn headers(&self) -> Option<BTreeMap<&str, &str>>;

    // method to use GET/PUT...
    fn http_method(&self) -> Result<Method>;

    // URL query pairs
    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>>;

    // URL path
    fn path(&self) -> Option<Vec<&str>>;

    // service used in the credential scope
    fn service(&self) -> &'static str {
        "s3"
    }

    /// # Errors
    ///
    /// Will return `Err` if the endpoint is not a valid URL
    fn endpoint(&self, s3: &S3) -> Result<Url> {
        s3.endpoint()
    }

    /// # Errors
    ///
    /// Will return `Err` if the signature can not be created
    fn sign(
        &self,
        s3: &S3,
        hash_payload: &[u8],
        md5: Option<&[u8]>,
        content_length: Option<usize>,
    ) -> Result<(Url, BTreeMap<String, String>)> {
        let mut url = self.endpoint(s3)?;

        // object key
        if let Some(path) = self.path() {
            for p in path {
                url.path_segments_mut()
                    .map_err(|()| anyhow!("cannot be base: {}", s3.region().endpoint("s3")))?
                    .push(p);
            }
        }

        // sub resources (?lifecycle, ?delete) and list parameters
        if let Some(pairs) = &self.query_pairs() {
            for (k, v) in pairs {
                url.query_pairs_mut().append_pair(k, v);
            }
        }

        let mut signature = Signature::new(s3, self.service(), self.http_method()?);
        let headers = signature.sign(&url, hash_payload, md5, content_length, self.headers());
        Ok((url, headers))
    }
}
