//! Provision an S3 bucket with a cost optimization lifecycle, block public
//! access and upload a report, or empty and delete it again.

pub mod cli;
pub mod s3;
