use crate::s3::{
    S3, ServiceError, actions,
    lifecycle::{
        AbortIncompleteMultipartUpload, Filter, LifecycleConfiguration,
        NoncurrentVersionTransition, Rule, STATUS_ENABLED, StorageClass, Transition,
    },
    responses::PublicAccessBlockConfiguration,
};
use anyhow::{Context, Result, anyhow};
use bytesize::ByteSize;
use colored::Colorize;
use std::path::Path;

/// Uploaded files and the listing live under this prefix
pub const KEY_PREFIX: &str = "reports/";

pub const RULE_ID: &str = "cost-optimization-rule";

/// Single rule for every key: `STANDARD_IA` after 30 days, `GLACIER_IR` after
/// 90, the same for noncurrent versions, incomplete uploads aborted after 7
#[must_use]
pub fn cost_optimization_rule() -> LifecycleConfiguration {
    LifecycleConfiguration {
        rules: vec![Rule {
            id: Some(RULE_ID.to_string()),
            filter: Some(Filter {
                prefix: Some(String::new()),
            }),
            status: STATUS_ENABLED.to_string(),
            transitions: vec![
                Transition::after_days(30, StorageClass::StandardIa),
                Transition::after_days(90, StorageClass::GlacierIr),
            ],
            noncurrent_version_transitions: vec![
                NoncurrentVersionTransition::after_days(30, StorageClass::StandardIa),
                NoncurrentVersionTransition::after_days(90, StorageClass::GlacierIr),
            ],
            abort_incomplete_multipart_upload: Some(AbortIncompleteMultipartUpload {
                days_after_initiation: 7,
            }),
            ..Rule::default()
        }],
    }
}

/// Object key for `file`: `reports/<file name>`
///
/// # Errors
///
/// Will return `Err` if the path has no file name
pub fn object_key(file: &Path) -> Result<String> {
    let name = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| anyhow!("invalid file name: {}", file.display()))?;

    Ok(format!("{KEY_PREFIX}{name}"))
}

/// # Errors
/// Will return an error on the first request that fails
pub async fn handle(s3: &S3, file: &Path) -> Result<()> {
    let bucket = s3.bucket().context("bucket name missing")?;

    // account owning the credentials, the public access block is only applied
    // if the bucket belongs to it
    let identity = actions::GetCallerIdentity::new()
        .request(s3)
        .await
        .context("unable to get caller identity")?;

    log::info!("account: {}, arn: {}", identity.account, identity.arn);

    ensure_bucket(s3, bucket).await?;

    actions::PutPublicAccessBlock::new(
        PublicAccessBlockConfiguration::block_all(),
        Some(identity.account.as_str()),
    )
    .request(s3)
    .await
    .context("unable to block public access")?;

    println!("{} Public access block configured for the bucket", "[OK]".green());

    let lifecycle = cost_optimization_rule();
    actions::PutBucketLifecycleConfiguration::new(&lifecycle)
        .request(s3)
        .await
        .context("unable to put lifecycle configuration")?;

    println!(
        "{} Lifecycle configured (30d IA, 90d Glacier IR, abort 7d)",
        "[OK]".green()
    );

    let key = object_key(file)?;
    let rs = actions::PutObject::new(&key, file)
        .request(s3)
        .await
        .with_context(|| format!("unable to upload {}", file.display()))?;

    for (k, v) in rs {
        log::info!("{k}: {v}");
    }

    println!("{} Upload: s3://{bucket}/{key}", "[OK]".green());

    report(s3, &identity.account).await
}

/// `HeadBucket` then `CreateBucket` only when the bucket is not found, any
/// other answer to the probe is an error
///
/// # Errors
/// Will return an error if the bucket can not be probed or created
pub async fn ensure_bucket(s3: &S3, bucket: &str) -> Result<()> {
    match actions::HeadBucket::new().request(s3).await {
        Ok(()) => {
            println!("{} Bucket already exists: {bucket}", "[OK]".green());
            return Ok(());
        }

        Err(e) => {
            if !e
                .downcast_ref::<ServiceError>()
                .is_some_and(ServiceError::is_not_found)
            {
                return Err(e.context(format!("unable to check bucket {bucket}")));
            }

            log::info!("bucket not found: {bucket}");
        }
    }

    match actions::CreateBucket::new().request(s3).await {
        Ok(location) => {
            log::info!("location: {location:?}");
            println!(
                "{} Bucket created: {bucket} ({})",
                "[OK]".green(),
                s3.region().name()
            );
            Ok(())
        }

        // created by an earlier run between the probe and now
        Err(e)
            if e.downcast_ref::<ServiceError>()
                .is_some_and(ServiceError::is_bucket_owned_by_you) =>
        {
            println!("{} Bucket already exists: {bucket}", "[OK]".green());
            Ok(())
        }

        Err(e) => Err(e.context(format!("unable to create bucket {bucket}"))),
    }
}

// first page of the prefix, public access block and the active lifecycle
async fn report(s3: &S3, account: &str) -> Result<()> {
    let objects = actions::ListObjectsV2::new(Some(KEY_PREFIX), None)
        .request(s3)
        .await
        .context("unable to list objects")?;

    println!("{} Objects in bucket:", "[INFO]".blue());
    for object in &objects.contents {
        println!(
            " - {} ({} bytes, {})",
            object.key,
            object.size,
            ByteSize(object.size)
        );
    }

    let block = actions::GetPublicAccessBlock::new(Some(account))
        .request(s3)
        .await
        .context("unable to get public access block")?;

    println!(
        "{} Public access block: BlockPublicAcls={} IgnorePublicAcls={} BlockPublicPolicy={} RestrictPublicBuckets={}",
        "[INFO]".blue(),
        block.block_public_acls,
        block.ignore_public_acls,
        block.block_public_policy,
        block.restrict_public_buckets
    );

    let lifecycle = actions::GetBucketLifecycleConfiguration::new()
        .request(s3)
        .await
        .context("unable to get lifecycle configuration")?;

    println!("{} Current lifecycle:", "[INFO]".blue());
    println!("{}", lifecycle.to_json()?);

    Ok(())
}
