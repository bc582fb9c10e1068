//! AWS Systems Manager Parameter Store backend.
//!
//! The AWS SDK is async; this backend owns a current-thread tokio runtime
//! and blocks on each request so the rest of the crate stays synchronous.
//! SDK-level retries are disabled; every request is sent exactly once and
//! retrying is left to [`crate::core::retry::RetryPolicy`].

use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ssm::config::Credentials;
use aws_sdk_ssm::error::DisplayErrorContext;
use aws_sdk_ssm::types::ParameterType;
use aws_sdk_ssm::Client;
use tokio::runtime::Runtime;
use tracing::{debug, trace};

use super::{Page, Parameter, ParameterStore};
use crate::core::settings::Settings;
use crate::error::RemoteError;

const CREDENTIALS_SOURCE: &str = "ssm-env";

/// Parameter Store client for one region and set of credentials.
pub struct Ssm {
    client: Client,
    runtime: Runtime,
}

impl std::fmt::Debug for Ssm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ssm").finish_non_exhaustive()
    }
}

impl Ssm {
    /// Build a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::Runtime` if the async runtime cannot start.
    pub fn connect(settings: &Settings) -> Result<Self, RemoteError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(RemoteError::Runtime)?;

        let credentials = Credentials::new(
            settings.credentials.access_key.clone(),
            settings.credentials.secret_key.clone(),
            None,
            None,
            CREDENTIALS_SOURCE,
        );
        let region = Region::new(settings.region.clone());

        let config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(region)
                .credentials_provider(credentials)
                .retry_config(RetryConfig::disabled())
                .load(),
        );
        debug!(region = %settings.region, "connected to parameter store");

        Ok(Self {
            client: Client::new(&config),
            runtime,
        })
    }

    /// Retry settings the SDK client was built with.
    pub fn retry_config(&self) -> Option<&RetryConfig> {
        self.client.config().retry_config()
    }
}

impl ParameterStore for Ssm {
    fn get_parameters_by_path(
        &self,
        path: &str,
        next_token: Option<&str>,
        with_decryption: bool,
    ) -> Result<Page, RemoteError> {
        trace!(path, ?next_token, with_decryption, "GetParametersByPath");

        let output = self
            .runtime
            .block_on(
                self.client
                    .get_parameters_by_path()
                    .path(path)
                    .with_decryption(with_decryption)
                    .set_next_token(next_token.map(str::to_string))
                    .send(),
            )
            .map_err(|e| RemoteError::request("GetParametersByPath", DisplayErrorContext(&e)))?;

        let parameters = output
            .parameters()
            .iter()
            .filter_map(|p| {
                Some(Parameter {
                    name: p.name()?.to_string(),
                    value: p.value()?.to_string(),
                })
            })
            .collect();

        let next_token = output
            .next_token()
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Page {
            parameters,
            next_token,
        })
    }

    fn put_parameter(&self, name: &str, value: &str, overwrite: bool) -> Result<(), RemoteError> {
        trace!(name, value_len = value.len(), overwrite, "PutParameter");

        self.runtime
            .block_on(
                self.client
                    .put_parameter()
                    .name(name)
                    .value(value)
                    .overwrite(overwrite)
                    .r#type(ParameterType::String)
                    .send(),
            )
            .map_err(|e| RemoteError::request("PutParameter", DisplayErrorContext(&e)))?;

        Ok(())
    }

    fn delete_parameters(&self, names: &[String]) -> Result<(), RemoteError> {
        trace!(count = names.len(), "DeleteParameters");

        let output = self
            .runtime
            .block_on(
                self.client
                    .delete_parameters()
                    .set_names(Some(names.to_vec()))
                    .send(),
            )
            .map_err(|e| RemoteError::request("DeleteParameters", DisplayErrorContext(&e)))?;

        if !output.invalid_parameters().is_empty() {
            debug!(
                missing = ?output.invalid_parameters(),
                "some parameters were already gone"
            );
        }

        Ok(())
    }
}
