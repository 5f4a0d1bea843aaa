use crate::s3::{
    S3, ServiceError,
    actions::{self, MAX_DELETE_KEYS, ObjectIdentifier},
};
use anyhow::{Context, Result, anyhow};
use colored::Colorize;

/// # Errors
/// Will return an error if the bucket can not be emptied or deleted
pub async fn handle(s3: &S3) -> Result<()> {
    let bucket = s3.bucket().context("bucket name missing")?;

    let deleted = if let Some(deleted) = delete_versions(s3).await? {
        deleted
    } else {
        println!(
            "{} Object versions not supported, deleting current objects",
            "[INFO]".blue()
        );
        delete_current_objects(s3).await?
    };

    println!("{} Deleted {deleted} object(s) from {bucket}", "[INFO]".blue());

    actions::DeleteBucket::new()
        .request(s3)
        .await
        .with_context(|| format!("unable to delete bucket {bucket}"))?;

    println!("{} Bucket removed: {bucket}", "[OK]".green());

    Ok(())
}

/// Every version and delete marker, page by page. `None` when the provider
/// can not list versions, any other error is returned.
///
/// # Errors
/// Will return an error if a page can not be listed or a batch deleted
pub async fn delete_versions(s3: &S3) -> Result<Option<usize>> {
    let mut key_marker: Option<String> = None;
    let mut version_id_marker: Option<String> = None;
    let mut deleted = 0;

    loop {
        let rs = actions::ListObjectVersions::new(None)
            .with_markers(key_marker.as_deref(), version_id_marker.as_deref())
            .request(s3)
            .await;

        let page = match rs {
            Ok(page) => page,

            Err(e) => {
                let unsupported = e
                    .downcast_ref::<ServiceError>()
                    .is_some_and(ServiceError::is_versioning_unsupported);

                // only decide on the first page, a failure halfway is an error
                if unsupported && key_marker.is_none() && version_id_marker.is_none() {
                    log::info!("ListObjectVersions not supported: {e}");
                    return Ok(None);
                }

                return Err(e.context("unable to list object versions"));
            }
        };

        let objects: Vec<ObjectIdentifier> = page
            .versions
            .iter()
            .map(|v| ObjectIdentifier::new(&v.key, v.version_id.as_deref()))
            .chain(
                page.delete_markers
                    .iter()
                    .map(|m| ObjectIdentifier::new(&m.key, m.version_id.as_deref())),
            )
            .collect();

        log::info!(
            "versions: {}, delete markers: {}",
            page.versions.len(),
            page.delete_markers.len()
        );

        deleted += delete_batches(s3, &objects).await?;

        if !page.is_truncated {
            break;
        }

        key_marker = page.next_key_marker;
        version_id_marker = page.next_version_id_marker;

        if key_marker.is_none() && version_id_marker.is_none() {
            return Err(anyhow!(
                "truncated version listing without a next marker"
            ));
        }
    }

    Ok(Some(deleted))
}

/// Current objects only, for providers without version listing
///
/// # Errors
/// Will return an error if a page can not be listed or a batch deleted
pub async fn delete_current_objects(s3: &S3) -> Result<usize> {
    let mut continuation_token: Option<String> = None;
    let mut deleted = 0;

    loop {
        let page = actions::ListObjectsV2::new(None, continuation_token.as_deref())
            .request(s3)
            .await
            .context("unable to list objects")?;

        let objects: Vec<ObjectIdentifier> = page
            .contents
            .iter()
            .map(|o| ObjectIdentifier::new(&o.key, None))
            .collect();

        deleted += delete_batches(s3, &objects).await?;

        continuation_token = page.next_continuation_token;

        if !page.is_truncated || continuation_token.is_none() {
            break;
        }
    }

    Ok(deleted)
}

/// `DeleteObjects` in chunks of at most 1000 keys, a key the provider reports
/// as not deleted is an error
async fn delete_batches(s3: &S3, objects: &[ObjectIdentifier]) -> Result<usize> {
    let mut deleted = 0;

    for batch in objects.chunks(MAX_DELETE_KEYS) {
        let rs = actions::DeleteObjects::new(batch)
            .request(s3)
            .await
            .context("unable to delete objects")?;

        if let Some(error) = rs.errors.first() {
            return Err(anyhow!(
                "{} object(s) not deleted, {}: {} {}",
                rs.errors.len(),
                error.key,
                error.code,
                error.message.as_deref().unwrap_or_default()
            ));
        }

        deleted += batch.len();
    }

    Ok(deleted)
}
