//! AWS Systems Manager Parameter Store backend.
//!
//! [`SsmParameterStore`] implements [`ParameterStore`] on top of an
//! `aws_sdk_ssm::Client` that the caller builds (region, credentials, and
//! retry policy are configured there, not here).

use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_ssm::Client;
use aws_sdk_ssm::error::SdkError;
use aws_sdk_ssm::operation::delete_parameter::DeleteParameterError;
use aws_sdk_ssm::operation::put_parameter::PutParameterError;
use aws_sdk_ssm::types::ParameterType;
use stackconf_core::ParameterStore;
use stackconf_shared::{Page, Parameter, SsmConfig, StoreError};
use tracing::{trace, warn};

/// Parameter store backed by AWS SSM.
#[derive(Debug, Clone)]
pub struct SsmParameterStore {
    client: Client,
    config: SsmConfig,
}

impl SsmParameterStore {
    /// Wrap a client, using the service defaults for paging and decryption.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            config: SsmConfig::default(),
        }
    }

    /// Wrap a client with the `[ssm]` config section applied.
    ///
    /// An out-of-range `page_size` is rejected here rather than by the service.
    pub fn with_config(client: Client, config: SsmConfig) -> stackconf_shared::Result<Self> {
        config.validate()?;
        Ok(Self { client, config })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn list_by_path(
        &self,
        path: &str,
        recursive: bool,
        next_token: Option<String>,
    ) -> Result<Page<Parameter>, StoreError> {
        let output = self
            .client
            .get_parameters_by_path()
            .path(path)
            .recursive(recursive)
            .with_decryption(self.config.with_decryption)
            .set_max_results(self.config.page_size)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(StoreError::backend)?;

        let items: Vec<Parameter> = output.parameters().iter().map(from_sdk).collect();
        trace!(path, count = items.len(), "listed parameter page");

        Ok(Page {
            items,
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn put(&self, name: &str, value: &str, overwrite: bool) -> Result<(), StoreError> {
        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(ParameterType::String)
            .overwrite(overwrite)
            .send()
            .await
            .map_err(|e| put_error(name, e))?;
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        self.client
            .delete_parameter()
            .name(name)
            .send()
            .await
            .map_err(|e| delete_error(name, e))?;
        Ok(())
    }
}

/// Convert an SDK parameter. A missing name becomes `""`.
fn from_sdk(parameter: &aws_sdk_ssm::types::Parameter) -> Parameter {
    let name = parameter.name().unwrap_or_else(|| {
        warn!("listed parameter has no name");
        ""
    });
    Parameter {
        name: name.to_string(),
        value: parameter.value().map(str::to_string),
    }
}

fn put_error<R>(name: &str, err: SdkError<PutParameterError, R>) -> StoreError
where
    R: Debug + Send + Sync + 'static,
{
    match err.as_service_error() {
        Some(e) if e.is_parameter_already_exists() => StoreError::AlreadyExists { name: name.into() },
        _ => StoreError::backend(err),
    }
}

fn delete_error<R>(name: &str, err: SdkError<DeleteParameterError, R>) -> StoreError
where
    R: Debug + Send + Sync + 'static,
{
    match err.as_service_error() {
        Some(e) if e.is_parameter_not_found() => StoreError::NotFound { name: name.into() },
        _ => StoreError::backend(err),
    }
}
