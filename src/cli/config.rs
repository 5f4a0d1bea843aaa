//! Credentials and region from the AWS default provider chains
//! <https://docs.aws.amazon.com/sdkref/latest/guide/standardized-credentials.html>

use crate::s3::{Credentials, Region, region::DEFAULT_REGION};
use anyhow::{Context, Result};
use aws_config::{
    BehaviorVersion, SdkConfig, default_provider::region::DefaultRegionChain,
    meta::region::RegionProviderChain,
};
use aws_credential_types::provider::ProvideCredentials;
use secrecy::SecretString;

pub const DEFAULT_PROFILE: &str = "default";

/// Settings resolved for one profile: the environment, the shared
/// `config`/`credentials` files (static keys, `role_arn`, `credential_process`,
/// SSO), web identity, container and instance metadata
#[derive(Debug)]
pub struct Config {
    profile: String,
    sdk_config: SdkConfig,
}

impl Config {
    /// `region` (`--region` or `AWS_REGION`) wins, then `AWS_DEFAULT_REGION`,
    /// the profile, instance metadata and finally `us-east-1`
    pub async fn load(profile: &str, region: Option<&str>) -> Self {
        let region_provider =
            RegionProviderChain::first_try(region.map(|r| aws_config::Region::new(r.to_string())))
                .or_else(DefaultRegionChain::builder().profile_name(profile).build())
                .or_else(aws_config::Region::from_static(DEFAULT_REGION));

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .region(region_provider)
            .load()
            .await;

        Self {
            profile: profile.to_string(),
            sdk_config,
        }
    }

    #[must_use]
    pub fn region_name(&self) -> &str {
        self.sdk_config
            .region()
            .map_or(DEFAULT_REGION, |region| region.as_ref())
    }

    /// With an `endpoint` every service is reached there and the name is only
    /// used in the signing scope
    ///
    /// # Errors
    ///
    /// Will return `Err` if the region is not a known AWS region and no endpoint is given
    pub fn region(&self, endpoint: Option<&str>) -> Result<Region> {
        let name = self.region_name().to_string();

        log::info!("region: {name}");

        match endpoint {
            Some(endpoint) => Ok(Region::Custom {
                name,
                endpoint: endpoint.trim_end_matches('/').to_string(),
            }),
            None => Ok(name.parse::<Region>()?),
        }
    }

    /// Ask the credential chain of the profile for a key pair
    ///
    /// # Errors
    ///
    /// Will return `Err` if no provider in the chain returns credentials
    pub async fn credentials(&self) -> Result<Credentials> {
        let unable = || {
            format!(
                "Unable to locate credentials, set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY or configure profile \"{}\"",
                self.profile
            )
        };

        let provider = self.sdk_config.credentials_provider().with_context(unable)?;

        let credentials = provider.provide_credentials().await.with_context(unable)?;

        log::info!("using credentials for profile: {}", self.profile);

        Ok(Credentials::new(
            credentials.access_key_id(),
            &SecretString::from(credentials.secret_access_key().to_string()),
        )
        .with_session_token(
            credentials
                .session_token()
                .map(|token| SecretString::from(token.to_string())),
        ))
    }
}

/// Shared files in `dir` and no ambient AWS settings, `extra` replaces the defaults
#[cfg(test)]
pub(crate) fn isolated_env(
    dir: &std::path::Path,
    extra: &[(&str, Option<&str>)],
) -> Vec<(String, Option<String>)> {
    let mut vars: Vec<(String, Option<String>)> = vec![
        (
            "AWS_SHARED_CREDENTIALS_FILE".to_string(),
            Some(dir.join("credentials").display().to_string()),
        ),
        (
            "AWS_CONFIG_FILE".to_string(),
            Some(dir.join("config").display().to_string()),
        ),
        ("AWS_EC2_METADATA_DISABLED".to_string(), Some("true".to_string())),
    ];

    for key in [
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "AWS_SESSION_TOKEN",
        "AWS_REGION",
        "AWS_DEFAULT_REGION",
        "AWS_PROFILE",
        "AWS_ENDPOINT_URL",
        "AWS_ROLE_ARN",
        "AWS_WEB_IDENTITY_TOKEN_FILE",
        "AWS_CONTAINER_CREDENTIALS_RELATIVE_URI",
        "AWS_CONTAINER_CREDENTIALS_FULL_URI",
    ] {
        vars.push((key.to_string(), None));
    }

    for (key, value) in extra {
        vars.retain(|(k, _)| k != key);
        vars.push(((*key).to_string(), value.map(ToString::to_string)));
    }

    vars
}
