//! Generic record-operations client.
//!
//! [`ProviderConfig`] carries everything one operation needs (provider identifier, zone, update
//! key, TTL). [`Client::connect`] acquires a scoped [`Operations`] handle through which the
//! actual update is issued; the handle releases its connection when dropped, on every exit path.

use std::fmt;

use zeroize::Zeroizing;

use crate::{
    api::{ApiProblem, RecordType, UpdateReply},
    req::{http_client, ReqResult},
};

mod henet;

pub(crate) use self::henet::PROVIDER as HENET;

/// Configuration for one record operation.
///
/// Constructed fresh per operation and discarded once the client call returns. The update key is
/// zeroed on drop and redacted from the `Debug` output.
pub struct ProviderConfig {
    provider: String,
    domain: String,
    token: Zeroizing<String>,
    ttl: u32,
    endpoint: Option<String>,
}

impl ProviderConfig {
    /// Creates a configuration for `provider`, operating on records inside `domain`.
    pub fn new(
        provider: impl Into<String>,
        domain: impl Into<String>,
        token: impl Into<String>,
        ttl: u32,
    ) -> Self {
        ProviderConfig {
            provider: provider.into(),
            domain: domain.into(),
            token: Zeroizing::new(token.into()),
            ttl,
            endpoint: None,
        }
    }

    /// Overrides the provider's update endpoint.
    ///
    /// Useful for testing against a local stub.
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Provider identifier selecting the backend.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Zone the operation is scoped to.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Record time-to-live, in seconds.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("provider", &self.provider)
            .field("domain", &self.domain)
            .field("token", &"<redacted>")
            .field("ttl", &self.ttl)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Entry point for record operations against one provider.
pub struct Client {
    config: ProviderConfig,
}

impl Client {
    pub fn new(config: ProviderConfig) -> Self {
        Client { config }
    }

    /// Acquires a connection scoped to the returned [`Operations`] handle.
    pub fn connect(&self) -> ReqResult<Operations<'_>> {
        let http = http_client()?;

        Ok(Operations {
            http,
            config: &self.config,
        })
    }
}

/// Scoped handle for issuing record operations.
///
/// Holds the connection for its lifetime; dropping it releases the connection.
pub struct Operations<'c> {
    http: reqwest::Client,
    config: &'c ProviderConfig,
}

impl Operations<'_> {
    /// Creates or overwrites the record `name` of type `rtype` with `content`.
    ///
    /// `name` must be the full record name and fall inside the configured zone.
    pub async fn update_record(
        &self,
        rtype: RecordType,
        name: &str,
        content: &str,
    ) -> ReqResult<UpdateReply> {
        if !record_in_zone(name, self.config.domain()) {
            return Err(ApiProblem {
                code: "recordOutsideZone".to_owned(),
                detail: Some(format!(
                    "record {name} is not inside zone {}",
                    self.config.domain()
                )),
            });
        }

        match self.config.provider() {
            henet::PROVIDER => {
                henet::update_record(&self.http, self.config, rtype, name, content).await
            }

            other => Err(ApiProblem {
                code: "unknownProvider".to_owned(),
                detail: Some(format!("no backend for provider {other}")),
            }),
        }
    }
}

/// Returns true if `name` is `zone` itself or a name under it.
fn record_in_zone(name: &str, zone: &str) -> bool {
    let name = name.strip_suffix('.').unwrap_or(name);
    let zone = zone.strip_suffix('.').unwrap_or(zone);

    name == zone || name.ends_with(&format!(".{zone}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_in_zone() {
        assert!(record_in_zone("_acme-challenge.example.com", "example.com"));
        assert!(record_in_zone("example.com", "example.com"));
        assert!(record_in_zone("_acme-challenge.example.com.", "example.com"));
        assert!(!record_in_zone("_acme-challenge.example.org", "example.com"));
        assert!(!record_in_zone("evil-example.com", "example.com"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ProviderConfig::new(HENET, "example.com", "hunter2", 300);
        let debug = format!("{config:?}");

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let config = ProviderConfig::new("nx-provider", "example.com", "key", 300);
        let client = Client::new(config);

        let problem = client
            .connect()
            .unwrap()
            .update_record(RecordType::Txt, "_acme-challenge.example.com", "value")
            .await
            .unwrap_err();

        assert_eq!(problem.code, "unknownProvider");
    }

    #[tokio::test]
    async fn test_record_outside_zone_is_rejected_locally() {
        let config = ProviderConfig::new(HENET, "example.com", "key", 300);
        let client = Client::new(config);

        let problem = client
            .connect()
            .unwrap()
            .update_record(RecordType::Txt, "_acme-challenge.example.org", "value")
            .await
            .unwrap_err();

        assert_eq!(problem.code, "recordOutsideZone");
    }
}
