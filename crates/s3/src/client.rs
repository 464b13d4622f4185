//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from thaw-core.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{GlacierJobParameters, ObjectStorageClass, OptionalObjectAttributes, Tier};

use thaw_core::{
    ClientSettings, Error, ListOptions, ListPage, ObjectRef, ObjectStore, RestoreRequest,
    RestoreStatus, Result, RetrievalTier, StorageClass,
};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client from the SDK's default provider chain
    ///
    /// Explicit settings take precedence over environment and profile values.
    pub async fn new(settings: &ClientSettings) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &settings.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        if config.region().is_none() {
            return Err(Error::Config(
                "No AWS region configured. Use --region, AWS_REGION or a profile with a region"
                    .into(),
            ));
        }

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(settings.force_path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListPage> {
        let mut request = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(options.prefix)
            .set_continuation_token(options.continuation_token)
            .set_max_keys(options.max_keys);

        if options.include_restore_status {
            request = request.optional_object_attributes(OptionalObjectAttributes::RestoreStatus);
        }

        let response = request
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket))?;

        let objects = response
            .contents()
            .iter()
            .filter_map(convert_object)
            .collect();

        Ok(ListPage {
            objects,
            truncated: response.is_truncated().unwrap_or(false),
            next_continuation_token: response.next_continuation_token().map(|s| s.to_string()),
        })
    }

    async fn restore_object(
        &self,
        bucket: &str,
        key: &str,
        request: RestoreRequest,
    ) -> Result<()> {
        let days = i32::try_from(request.days)
            .map_err(|_| Error::InvalidArgument(format!("days out of range: {}", request.days)))?;

        let job = GlacierJobParameters::builder()
            .tier(to_sdk_tier(request.tier))
            .build()
            .map_err(|e| Error::General(e.to_string()))?;

        let restore = aws_sdk_s3::types::RestoreRequest::builder()
            .days(days)
            .glacier_job_parameters(job)
            .build();

        tracing::debug!(bucket, key, days, tier = request.tier.as_str(), "sending restore request");

        self.inner
            .restore_object()
            .bucket(bucket)
            .key(key)
            .restore_request(restore)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket))?;

        Ok(())
    }
}

/// Convert a listed SDK object; entries without a key are dropped
fn convert_object(object: &aws_sdk_s3::types::Object) -> Option<ObjectRef> {
    let key = object.key()?;

    let storage_class = match object.storage_class() {
        Some(ObjectStorageClass::DeepArchive) => StorageClass::DeepArchive,
        Some(sc) => StorageClass::from_name(sc.as_str()),
        None => StorageClass::Standard,
    };

    let restore_status = object.restore_status().map(|status| RestoreStatus {
        in_progress: status.is_restore_in_progress(),
        expiry_date: status.restore_expiry_date().and_then(to_timestamp),
    });

    Some(ObjectRef {
        key: key.to_string(),
        storage_class,
        restore_status,
    })
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}

fn to_sdk_tier(tier: RetrievalTier) -> Tier {
    match tier {
        RetrievalTier::Bulk => Tier::Bulk,
        RetrievalTier::Standard => Tier::Standard,
        RetrievalTier::Expedited => Tier::Expedited,
    }
}

fn map_sdk_error<E, R>(err: SdkError<E, R>, bucket: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let message = DisplayErrorContext(&err).to_string();
    error_from_code(err.code(), bucket, message)
}

/// Classify a service error by its S3 error code
fn error_from_code(code: Option<&str>, bucket: &str, message: String) -> Error {
    match code {
        Some("NoSuchBucket") => Error::NotFound(format!("Bucket not found: {bucket}: {message}")),
        Some(
            "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken"
            | "InvalidToken",
        ) => Error::Auth(message),
        Some("RestoreAlreadyInProgress") => Error::Conflict(message),
        _ => Error::Network(message),
    }
}
