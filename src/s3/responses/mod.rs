use serde::de::{Deserializer, Error};
use serde::{Deserialize, Serialize};

/// # Errors
///
/// Will return `Err` if can't deserialize
pub fn bool_deserializer<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;
    match s.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(D::Error::custom(format!(
            "got {other}, but expected `true` or `false`"
        ))),
    }
}

/// S3 error document
#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: Option<String>,
    #[serde(rename = "Resource")]
    pub resource: Option<String>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

/// STS (query protocol) error document
#[derive(Deserialize, Debug)]
pub struct StsErrorResponse {
    #[serde(rename = "Error")]
    pub error: StsError,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct StsError {
    #[serde(rename = "Type")]
    pub error_type: Option<String>,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}

/// The parsed result of `GetCallerIdentity`
#[derive(Deserialize, Debug)]
pub struct GetCallerIdentityResponse {
    #[serde(rename = "GetCallerIdentityResult")]
    pub result: CallerIdentity,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// 12-digit account that owns the credentials
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "Arn")]
    pub arn: String,
    #[serde(rename = "UserId")]
    pub user_id: String,
}

/// An individual object in a `ListBucketResult`
#[derive(Deserialize, Debug, Clone)]
pub struct Object {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "LastModified")]
    pub last_modified: Option<String>,
    #[serde(rename = "ETag")]
    pub e_tag: Option<String>,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "StorageClass")]
    pub storage_class: Option<String>,
}

/// The parsed result of `ListObjectsV2`
#[derive(Deserialize, Debug, Clone)]
pub struct ListBucketResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Prefix")]
    pub prefix: Option<String>,
    #[serde(rename = "KeyCount")]
    pub key_count: Option<u64>,
    #[serde(rename = "MaxKeys")]
    pub max_keys: Option<u64>,
    #[serde(rename = "IsTruncated", deserialize_with = "bool_deserializer")]
    pub is_truncated: bool,
    #[serde(rename = "NextContinuationToken", default)]
    pub next_continuation_token: Option<String>,
    #[serde(rename = "Contents", default)]
    pub contents: Vec<Object>,
}

/// An object version in a `ListVersionsResult`
#[derive(Deserialize, Debug, Clone)]
pub struct ObjectVersion {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "VersionId")]
    pub version_id: Option<String>,
    #[serde(rename = "IsLatest", default)]
    pub is_latest: Option<String>,
    #[serde(rename = "Size", default)]
    pub size: Option<u64>,
}

/// A delete marker in a `ListVersionsResult`
#[derive(Deserialize, Debug, Clone)]
pub struct DeleteMarkerEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "VersionId")]
    pub version_id: Option<String>,
}

/// The parsed result of `ListObjectVersions`
#[derive(Deserialize, Debug, Clone)]
pub struct ListVersionsResult {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Prefix")]
    pub prefix: Option<String>,
    #[serde(rename = "IsTruncated", deserialize_with = "bool_deserializer")]
    pub is_truncated: bool,
    #[serde(rename = "NextKeyMarker", default)]
    pub next_key_marker: Option<String>,
    #[serde(rename = "NextVersionIdMarker", default)]
    pub next_version_id_marker: Option<String>,
    #[serde(rename = "Version", default)]
    pub versions: Vec<ObjectVersion>,
    #[serde(rename = "DeleteMarker", default)]
    pub delete_markers: Vec<DeleteMarkerEntry>,
}

/// The parsed result of `DeleteObjects`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct DeleteResult {
    #[serde(rename = "Deleted", default)]
    pub deleted: Vec<DeletedObject>,
    #[serde(rename = "Error", default)]
    pub errors: Vec<DeleteError>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DeletedObject {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "VersionId")]
    pub version_id: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DeleteError {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "VersionId")]
    pub version_id: Option<String>,
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message")]
    pub message: Option<String>,
}

/// Bucket level public access block
/// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_PublicAccessBlockConfiguration.html>
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublicAccessBlockConfiguration {
    #[serde(
        rename = "BlockPublicAcls",
        default,
        deserialize_with = "bool_deserializer"
    )]
    pub block_public_acls: bool,
    #[serde(
        rename = "IgnorePublicAcls",
        default,
        deserialize_with = "bool_deserializer"
    )]
    pub ignore_public_acls: bool,
    #[serde(
        rename = "BlockPublicPolicy",
        default,
        deserialize_with = "bool_deserializer"
    )]
    pub block_public_policy: bool,
    #[serde(
        rename = "RestrictPublicBuckets",
        default,
        deserialize_with = "bool_deserializer"
    )]
    pub restrict_public_buckets: bool,
}

impl PublicAccessBlockConfiguration {
    /// every public access path closed
    #[must_use]
    pub const fn block_all() -> Self {
        Self {
            block_public_acls: true,
            ignore_public_acls: true,
            block_public_policy: true,
            restrict_public_buckets: true,
        }
    }

    #[must_use]
    pub const fn is_fully_blocked(&self) -> bool {
        self.block_public_acls
            && self.ignore_public_acls
            && self.block_public_policy
            && self.restrict_public_buckets
    }
}
