//! Bucket lifecycle configuration
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/API_LifecycleRule.html>
//!
//! The same types build the `PutBucketLifecycleConfiguration` body and decode
//! the `GetBucketLifecycleConfiguration` answer. Deserialization follows the
//! XML element names (`Rule`, `Transition`, ...), serialization uses the plural
//! document names (`Rules`, `Transitions`, ...) for the JSON report.

use crate::s3::xml::{self, WriteXml, write_optional_text, write_optional_u32, write_text_element};
use anyhow::Result;
use quick_xml::Writer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

pub const STATUS_ENABLED: &str = "Enabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageClass {
    StandardIa,
    GlacierIr,
}

impl StorageClass {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StandardIa => "STANDARD_IA",
            Self::GlacierIr => "GLACIER_IR",
        }
    }
}

impl fmt::Display for StorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleConfiguration {
    #[serde(rename(serialize = "Rules", deserialize = "Rule"), default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Filter", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(
        rename = "Expiration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration: Option<Expiration>,
    #[serde(
        rename(serialize = "Transitions", deserialize = "Transition"),
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub transitions: Vec<Transition>,
    #[serde(
        rename = "NoncurrentVersionExpiration",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub noncurrent_version_expiration: Option<NoncurrentVersionExpiration>,
    #[serde(
        rename(
            serialize = "NoncurrentVersionTransitions",
            deserialize = "NoncurrentVersionTransition"
        ),
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub noncurrent_version_transitions: Vec<NoncurrentVersionTransition>,
    #[serde(
        rename = "AbortIncompleteMultipartUpload",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
}

/// An empty prefix matches every key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "Prefix", default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    #[serde(rename = "Days", default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "Days", default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "StorageClass")]
    pub storage_class: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoncurrentVersionExpiration {
    #[serde(
        rename = "NoncurrentDays",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub noncurrent_days: Option<u32>,
    #[serde(
        rename = "NewerNoncurrentVersions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub newer_noncurrent_versions: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoncurrentVersionTransition {
    #[serde(
        rename = "NoncurrentDays",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub noncurrent_days: Option<u32>,
    #[serde(rename = "StorageClass")]
    pub storage_class: String,
    #[serde(
        rename = "NewerNoncurrentVersions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub newer_noncurrent_versions: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortIncompleteMultipartUpload {
    #[serde(rename = "DaysAfterInitiation")]
    pub days_after_initiation: u32,
}

impl Transition {
    #[must_use]
    pub fn after_days(days: u32, storage_class: StorageClass) -> Self {
        Self {
            days: Some(days),
            date: None,
            storage_class: storage_class.to_string(),
        }
    }
}

impl NoncurrentVersionTransition {
    #[must_use]
    pub fn after_days(days: u32, storage_class: StorageClass) -> Self {
        Self {
            noncurrent_days: Some(days),
            storage_class: storage_class.to_string(),
            newer_noncurrent_versions: None,
        }
    }
}

impl LifecycleConfiguration {
    /// Body for `PutBucketLifecycleConfiguration`
    ///
    /// # Errors
    ///
    /// Will return `Err` if the document can not be written
    pub fn to_xml(&self) -> Result<String> {
        xml::to_xml("LifecycleConfiguration", self)
    }

    /// Pretty JSON used in the report
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration can not be serialized
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl WriteXml for LifecycleConfiguration {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        for rule in &self.rules {
            rule.write_xml(writer)?;
        }
        Ok(())
    }
}

impl WriteXml for Rule {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        writer.create_element("Rule").write_inner_content(|w| {
            write_optional_text(w, "ID", self.id.as_deref())?;
            if let Some(filter) = &self.filter {
                // `<Filter><Prefix></Prefix></Filter>` selects the whole bucket
                w.create_element("Filter").write_inner_content(|w| {
                    write_text_element(w, "Prefix", filter.prefix.as_deref().unwrap_or_default())
                })?;
            }
            write_text_element(w, "Status", &self.status)?;
            if let Some(expiration) = &self.expiration {
                w.create_element("Expiration").write_inner_content(|w| {
                    write_optional_text(w, "Date", expiration.date.as_deref())?;
                    write_optional_u32(w, "Days", expiration.days)
                })?;
            }
            for transition in &self.transitions {
                w.create_element("Transition").write_inner_content(|w| {
                    write_optional_text(w, "Date", transition.date.as_deref())?;
                    write_optional_u32(w, "Days", transition.days)?;
                    write_text_element(w, "StorageClass", &transition.storage_class)
                })?;
            }
            if let Some(nve) = &self.noncurrent_version_expiration {
                w.create_element("NoncurrentVersionExpiration")
                    .write_inner_content(|w| {
                        write_optional_u32(w, "NoncurrentDays", nve.noncurrent_days)?;
                        write_optional_u32(w, "NewerNoncurrentVersions", nve.newer_noncurrent_versions)
                    })?;
            }
            for nvt in &self.noncurrent_version_transitions {
                w.create_element("NoncurrentVersionTransition")
                    .write_inner_content(|w| {
                        write_optional_u32(w, "NoncurrentDays", nvt.noncurrent_days)?;
                        write_text_element(w, "StorageClass", &nvt.storage_class)?;
                        write_optional_u32(w, "NewerNoncurrentVersions", nvt.newer_noncurrent_versions)
                    })?;
            }
            if let Some(abort) = &self.abort_incomplete_multipart_upload {
                w.create_element("AbortIncompleteMultipartUpload")
                    .write_inner_content(|w| {
                        write_text_element(
                            w,
                            "DaysAfterInitiation",
                            &abort.days_after_initiation.to_string(),
                        )
                    })?;
            }
            Ok(())
        })?;
        Ok(())
    }
}
