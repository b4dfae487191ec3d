//! Object store credentials and default bucket names.

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use lectern_object::providers::{S3Credentials, S3Provider};
use lectern_object::{ObjectStoreClient, Result};
use serde::{Deserialize, Serialize};

/// Default values for configuration options.
mod defaults {
    /// Region marker accepted by R2 and most S3-compatible services.
    pub const REGION: &str = "auto";

    /// Bucket holding PDF documents served as previews.
    pub const DOCUMENTS_BUCKET: &str = "documents";

    /// Bucket holding general assets.
    pub const ASSETS_BUCKET: &str = "assets";

    /// Bucket holding thumbnail images.
    pub const THUMBNAILS_BUCKET: &str = "thumbnails";
}

/// App [`state`] configuration.
///
/// Credentials are optional here so that a partially configured process can
/// still start its CLI; [`ServiceConfig::connect`] refuses to build a client
/// unless every credential is present.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Serialize, Deserialize, Builder)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "camelCase")]
#[must_use = "config does nothing unless you use it"]
#[builder(
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate")
)]
pub struct ServiceConfig {
    /// Account identifier; the endpoint is derived from it when not given.
    #[cfg_attr(feature = "config", arg(long = "account-id", env = "LECTERN_ACCOUNT_ID"))]
    #[builder(default)]
    #[serde(default)]
    pub account_id: Option<String>,

    /// Access key ID for the object store.
    #[cfg_attr(
        feature = "config",
        arg(long = "access-key-id", env = "LECTERN_ACCESS_KEY_ID")
    )]
    #[builder(default)]
    #[serde(default)]
    pub access_key_id: Option<String>,

    /// Secret access key for the object store.
    #[cfg_attr(
        feature = "config",
        arg(long = "secret-access-key", env = "LECTERN_SECRET_ACCESS_KEY", hide_env_values = true)
    )]
    #[builder(default)]
    #[serde(default)]
    pub secret_access_key: Option<String>,

    /// Region marker.
    #[cfg_attr(
        feature = "config",
        arg(long = "region", env = "LECTERN_REGION", default_value = defaults::REGION)
    )]
    #[builder(default = "defaults::REGION.to_string()")]
    #[serde(default = "default_region")]
    pub region: String,

    /// Explicit endpoint URL, e.g. `http://localhost:9000`.
    #[cfg_attr(feature = "config", arg(long = "endpoint", env = "LECTERN_ENDPOINT"))]
    #[builder(default)]
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Default bucket for document previews.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "documents-bucket",
            env = "LECTERN_DOCUMENTS_BUCKET",
            default_value = defaults::DOCUMENTS_BUCKET
        )
    )]
    #[builder(default = "defaults::DOCUMENTS_BUCKET.to_string()")]
    #[serde(default = "default_documents_bucket")]
    pub documents_bucket: String,

    /// Default bucket for general assets.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "assets-bucket",
            env = "LECTERN_ASSETS_BUCKET",
            default_value = defaults::ASSETS_BUCKET
        )
    )]
    #[builder(default = "defaults::ASSETS_BUCKET.to_string()")]
    #[serde(default = "default_assets_bucket")]
    pub assets_bucket: String,

    /// Default bucket for thumbnails.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "thumbnails-bucket",
            env = "LECTERN_THUMBNAILS_BUCKET",
            default_value = defaults::THUMBNAILS_BUCKET
        )
    )]
    #[builder(default = "defaults::THUMBNAILS_BUCKET.to_string()")]
    #[serde(default = "default_thumbnails_bucket")]
    pub thumbnails_bucket: String,
}

fn default_region() -> String {
    defaults::REGION.to_string()
}

fn default_documents_bucket() -> String {
    defaults::DOCUMENTS_BUCKET.to_string()
}

fn default_assets_bucket() -> String {
    defaults::ASSETS_BUCKET.to_string()
}

fn default_thumbnails_bucket() -> String {
    defaults::THUMBNAILS_BUCKET.to_string()
}

impl ServiceConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    /// Returns the configured default buckets.
    pub fn buckets(&self) -> DefaultBuckets {
        DefaultBuckets {
            documents: self.documents_bucket.clone(),
            assets: self.assets_bucket.clone(),
            thumbnails: self.thumbnails_bucket.clone(),
        }
    }

    /// Converts this configuration into provider credentials.
    pub fn credentials(&self) -> S3Credentials {
        let mut buckets = vec![
            self.documents_bucket.clone(),
            self.assets_bucket.clone(),
            self.thumbnails_bucket.clone(),
        ];
        buckets.sort();
        buckets.dedup();

        S3Credentials {
            account_id: self.account_id.clone(),
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            region: self.region.clone(),
            endpoint: self.endpoint.clone(),
            buckets,
        }
    }

    /// Builds the object store client.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if any credential is missing or blank.
    /// No request is issued.
    pub fn connect(&self) -> Result<ObjectStoreClient> {
        S3Provider::build(&self.credentials()).map(S3Provider::into_inner)
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "***"))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("documents_bucket", &self.documents_bucket)
            .field("assets_bucket", &self.assets_bucket)
            .field("thumbnails_bucket", &self.thumbnails_bucket)
            .finish()
    }
}

impl ServiceConfigBuilder {
    /// Wrapper for builder validation that returns String errors.
    fn validate(builder: &ServiceConfigBuilder) -> std::result::Result<(), String> {
        if let Some(region) = &builder.region
            && region.trim().is_empty()
        {
            return Err("Region cannot be empty".to_string());
        }

        let buckets = [
            ("documents", &builder.documents_bucket),
            ("assets", &builder.assets_bucket),
            ("thumbnails", &builder.thumbnails_bucket),
        ];
        for (class, bucket) in buckets {
            if let Some(bucket) = bucket
                && bucket.trim().is_empty()
            {
                return Err(format!("The {class} bucket name cannot be empty"));
            }
        }

        if let Some(Some(endpoint)) = &builder.endpoint
            && !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
        {
            return Err("Endpoint must start with 'http://' or 'https://'".to_string());
        }

        Ok(())
    }
}

/// Bucket used for each asset class when a request does not name one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultBuckets {
    /// Bucket for document previews.
    pub documents: String,
    /// Bucket for general assets.
    pub assets: String,
    /// Bucket for thumbnails.
    pub thumbnails: String,
}

impl Default for DefaultBuckets {
    fn default() -> Self {
        Self {
            documents: defaults::DOCUMENTS_BUCKET.to_string(),
            assets: defaults::ASSETS_BUCKET.to_string(),
            thumbnails: defaults::THUMBNAILS_BUCKET.to_string(),
        }
    }
}
