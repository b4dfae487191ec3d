//! S3-compatible provider using [`object_store::aws::AmazonS3Builder`].
//!
//! Works with AWS S3, Cloudflare R2, MinIO and any S3-compatible service.

use derive_more::Deref;
use object_store::aws::AmazonS3Builder;
use serde::{Deserialize, Serialize};

use super::Client;
use crate::TRACING_TARGET_CLIENT;
use crate::client::{ObjectStoreBackend, ObjectStoreClient};
use crate::types::Error;

/// Typed credentials for an S3-compatible provider.
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Credentials {
    /// Account identifier used to derive the endpoint when none is given.
    #[serde(default)]
    pub account_id: Option<String>,
    /// Access key ID for static credentials.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// Secret access key for static credentials.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Region marker (defaults to `auto`).
    #[serde(default = "default_region")]
    pub region: String,
    /// Explicit endpoint URL (e.g. `http://localhost:9000` for MinIO).
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Buckets this client may address.
    #[serde(default)]
    pub buckets: Vec<String>,
}

fn default_region() -> String {
    "auto".to_string()
}

impl S3Credentials {
    /// Resolves the endpoint URL: the explicit one, or one derived from the
    /// account identifier.
    pub fn endpoint_url(&self) -> Result<String, Error> {
        if let Some(endpoint) = non_blank(self.endpoint.as_deref()) {
            return Ok(endpoint.to_string());
        }

        non_blank(self.account_id.as_deref())
            .map(|account| format!("https://{account}.r2.cloudflarestorage.com"))
            .ok_or_else(|| Error::configuration("missing account id or endpoint"))
    }

    /// Checks that every required credential is present and non-blank.
    pub fn validate(&self) -> Result<(), Error> {
        self.endpoint_url()?;
        require(self.access_key_id.as_deref(), "access key id")?;
        require(self.secret_access_key.as_deref(), "secret access key")?;
        require(Some(self.region.as_str()), "region")?;

        if self.buckets.is_empty() {
            return Err(Error::configuration("no buckets configured"));
        }
        for bucket in &self.buckets {
            require(Some(bucket), "bucket name")?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("account_id", &self.account_id)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "***"))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("buckets", &self.buckets)
            .finish()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn require<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, Error> {
    non_blank(value).ok_or_else(|| Error::configuration(format!("missing {name}")))
}

/// S3-backed object storage client.
#[derive(Debug, Clone, Deref)]
pub struct S3Provider(ObjectStoreClient);

impl S3Provider {
    /// Builds the client synchronously; no request is issued.
    pub fn build(creds: &S3Credentials) -> Result<Self, Error> {
        creds.validate()?;

        let endpoint = creds.endpoint_url()?;
        let access_key = require(creds.access_key_id.as_deref(), "access key id")?;
        let secret_key = require(creds.secret_access_key.as_deref(), "secret access key")?;

        let mut backend = ObjectStoreBackend::new();
        for bucket in &creds.buckets {
            let store = AmazonS3Builder::new()
                .with_bucket_name(bucket)
                .with_region(&creds.region)
                .with_endpoint(&endpoint)
                .with_allow_http(endpoint.starts_with("http://"))
                .with_access_key_id(access_key)
                .with_secret_access_key(secret_key)
                .build()
                .map_err(|e| {
                    Error::configuration(format!("failed to build store for bucket '{bucket}'"))
                        .with_source(e)
                })?;
            backend = backend.with_bucket(bucket.as_str(), store);
        }

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            provider = Self::ID,
            endpoint = %endpoint,
            region = %creds.region,
            buckets = ?creds.buckets,
            "object store client ready"
        );

        Ok(Self(ObjectStoreClient::new(backend)))
    }

    /// Unwraps the inner client.
    pub fn into_inner(self) -> ObjectStoreClient {
        self.0
    }
}

impl Client for S3Provider {
    type Credentials = S3Credentials;

    const ID: &str = "s3";

    async fn connect(creds: &Self::Credentials) -> Result<Self, Error> {
        Self::build(creds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn credentials() -> S3Credentials {
        S3Credentials {
            account_id: Some("abc123".to_string()),
            access_key_id: Some("AKIA".to_string()),
            secret_access_key: Some("secret".to_string()),
            region: default_region(),
            endpoint: None,
            buckets: vec!["documents".to_string(), "thumbnails".to_string()],
        }
    }

    #[test]
    fn endpoint_is_derived_from_account() {
        let creds = credentials();
        assert_eq!(
            creds.endpoint_url().unwrap(),
            "https://abc123.r2.cloudflarestorage.com"
        );
    }

    #[test]
    fn explicit_endpoint_wins() {
        let creds = S3Credentials {
            endpoint: Some("http://localhost:9000".to_string()),
            account_id: None,
            ..credentials()
        };
        assert_eq!(creds.endpoint_url().unwrap(), "http://localhost:9000");
    }

    #[test]
    fn missing_secret_is_configuration_error() {
        let creds = S3Credentials {
            secret_access_key: Some("  ".to_string()),
            ..credentials()
        };
        let err = S3Provider::build(&creds).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.message().contains("secret access key"));
    }

    #[test]
    fn missing_account_and_endpoint_is_configuration_error() {
        let creds = S3Credentials {
            account_id: None,
            ..credentials()
        };
        assert_eq!(creds.validate().unwrap_err().kind(), ErrorKind::Configuration);
    }

    #[test]
    fn region_defaults_to_auto() {
        let creds: S3Credentials =
            serde_json::from_str(r#"{"accountId":"a","buckets":["b"]}"#).unwrap();
        assert_eq!(creds.region, "auto");
    }

    #[test]
    fn debug_redacts_secrets() {
        let debug = format!("{:?}", credentials());
        assert!(!debug.contains("secret\""));
        assert!(!debug.contains("AKIA"));
    }

    #[tokio::test]
    async fn connect_builds_without_network() {
        let provider = S3Provider::connect(&credentials()).await.unwrap();
        let _client: ObjectStoreClient = provider.into_inner();
    }
}
