//! Completion client implementations.
//!
//! Contains the concrete [`CompletionClient`](riskguide_core::llm::provider::CompletionClient)
//! for Gemini and a factory ([`create_client`]) that builds it from
//! [`ProviderSettings`].

pub mod gemini;

use std::time::Duration;

use secrecy::SecretString;

use riskguide_core::llm::box_provider::BoxCompletionClient;
use riskguide_types::config::ProviderSettings;
use riskguide_types::error::ConfigError;

use self::gemini::GeminiClient;

/// Create a [`BoxCompletionClient`] from provider settings.
///
/// # Errors
///
/// [`ConfigError::MissingApiKey`] if `api_key` is `None`, naming the
/// environment variable that should hold it.
pub fn create_client(
    settings: &ProviderSettings,
    api_key: Option<SecretString>,
) -> Result<BoxCompletionClient, ConfigError> {
    let key = api_key.ok_or_else(|| ConfigError::MissingApiKey(settings.api_key_env.clone()))?;
    let client = GeminiClient::new(
        key,
        settings.model.clone(),
        Duration::from_secs(settings.request_timeout_secs),
    )?
    .with_base_url(settings.base_url.clone());
    Ok(BoxCompletionClient::new(client))
}
