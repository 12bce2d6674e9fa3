use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::{
    api::RecordType,
    error::Error,
    ops::{Client, ProviderConfig, HENET},
    zone::{SoaZoneResolver, ZoneResolver},
};

/// TTL of the validation record, in seconds.
const VALIDATION_TTL: u32 = 300;

/// Content written over the validation record on cleanup.
///
/// The update API has no delete operation, so the record is blanked instead of removed.
const CLEANUP_SENTINEL: &str = "EMPTY";

/// The two lifecycle hooks a DNS-01 challenge needs from a DNS authenticator.
///
/// Invoked by the certificate-management flow around challenge validation: [`perform`] before
/// asking the ACME provider to validate, [`cleanup`] after the order settles either way.
///
/// [`perform`]: Dns01Authenticator::perform()
/// [`cleanup`]: Dns01Authenticator::cleanup()
#[async_trait]
pub trait Dns01Authenticator: Send + Sync {
    /// Publishes the validation TXT record.
    async fn perform(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> Result<(), Error>;

    /// Best-effort removal of the validation record. Must not fail.
    async fn cleanup(&self, domain: &str, validation_name: &str, validation: &str);
}

/// DNS-01 challenge authenticator for Hurricane Electric DNS.
///
/// Fulfills a `dns-01` challenge by writing the validation token into a TXT record through the
/// Hurricane Electric update API, using the per-record update key as credential.
///
/// Zone resolution defaults to [`SoaZoneResolver`] (live `SOA` lookups); inject another
/// [`ZoneResolver`] with [`with_resolver`] when the embedding framework already knows better.
///
/// [`with_resolver`]: Authenticator::with_resolver()
pub struct Authenticator<R = SoaZoneResolver> {
    token: Zeroizing<String>,
    resolver: R,
    endpoint: Option<String>,
}

impl Authenticator<SoaZoneResolver> {
    /// Creates an authenticator using the given update key and live zone resolution.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_resolver(token, SoaZoneResolver::new())
    }
}

impl<R: ZoneResolver> Authenticator<R> {
    /// Creates an authenticator with an injected zone resolver.
    pub fn with_resolver(token: impl Into<String>, resolver: R) -> Self {
        Authenticator {
            token: Zeroizing::new(token.into()),
            resolver,
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

    /// Publishes the validation TXT record `validation_name` with content `validation`.
    ///
    /// Resolves the registered zone for `domain`, then issues a single record upsert. Both
    /// failure classes propagate so issuance can abort.
    pub async fn perform(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> Result<(), Error> {
        let zone = self.resolver.resolve_zone(domain).await?;

        let client = Client::new(self.provider_config(zone));
        let operations = client.connect()?;

        if let Err(problem) = operations
            .update_record(RecordType::Txt, validation_name, validation)
            .await
        {
            log::debug!("Encountered error updating TXT record: {problem}");
            return Err(problem.into());
        }

        Ok(())
    }

    /// Best-effort reversal of [`perform`]: overwrites the record content with a sentinel value.
    ///
    /// Never fails. Failures are logged at debug level and swallowed so that teardown cannot
    /// crash the issuance flow; use [`try_cleanup`] to handle them explicitly instead.
    ///
    /// [`perform`]: Authenticator::perform()
    /// [`try_cleanup`]: Authenticator::try_cleanup()
    pub async fn cleanup(&self, domain: &str, validation_name: &str, validation: &str) {
        match self.try_cleanup(domain, validation_name, validation).await {
            Ok(()) => {}

            Err(err @ Error::Resolution { .. }) => {
                log::debug!("Encountered error finding zone during cleanup: {err}");
            }

            Err(err) => {
                log::debug!("Encountered error cleaning up TXT record: {err}");
            }
        }
    }

    /// Like [`cleanup`], but reports failures instead of swallowing them.
    ///
    /// [`cleanup`]: Authenticator::cleanup()
    pub async fn try_cleanup(
        &self,
        domain: &str,
        validation_name: &str,
        _validation: &str,
    ) -> Result<(), Error> {
        let zone = self.resolver.resolve_zone(domain).await?;

        let client = Client::new(self.provider_config(zone));
        let operations = client.connect()?;

        operations
            .update_record(RecordType::Txt, validation_name, CLEANUP_SENTINEL)
            .await?;

        Ok(())
    }

    fn provider_config(&self, zone: String) -> ProviderConfig {
        let config = ProviderConfig::new(HENET, zone, self.token.to_string(), VALIDATION_TTL);

        match &self.endpoint {
            Some(url) => config.with_endpoint(url),
            None => config,
        }
    }
}

#[async_trait]
impl<R: ZoneResolver> Dns01Authenticator for Authenticator<R> {
    async fn perform(
        &self,
        domain: &str,
        validation_name: &str,
        validation: &str,
    ) -> Result<(), Error> {
        Authenticator::perform(self, domain, validation_name, validation).await
    }

    async fn cleanup(&self, domain: &str, validation_name: &str, validation: &str) {
        Authenticator::cleanup(self, domain, validation_name, validation).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        test::{with_update_server, FailingZoneResolver, StaticZoneResolver},
    };

    fn authenticator(server_url: &str) -> Authenticator<StaticZoneResolver> {
        Authenticator::with_resolver("update-key", StaticZoneResolver::new("example.com"))
            .with_endpoint(server_url)
    }

    #[tokio::test]
    async fn test_perform_issues_one_txt_update() {
        let server = with_update_server();
        let authenticator = authenticator(&server.url);

        authenticator
            .perform("example.com", "_acme-challenge.example.com", "abc123")
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].hostname, "_acme-challenge.example.com");
        assert_eq!(requests[0].txt.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_cleanup_overwrites_with_sentinel() {
        let server = with_update_server();
        let authenticator = authenticator(&server.url);

        authenticator
            .cleanup("example.com", "_acme-challenge.example.com", "abc123")
            .await;

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].hostname, "_acme-challenge.example.com");
        assert_eq!(requests[0].txt.as_deref(), Some("EMPTY"));
    }

    #[tokio::test]
    async fn test_perform_propagates_resolution_failure() {
        let server = with_update_server();

        let authenticator = Authenticator::with_resolver("update-key", FailingZoneResolver)
            .with_endpoint(&server.url);

        let err = authenticator
            .perform("example.com", "_acme-challenge.example.com", "abc123")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Resolution { .. }));
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_cleanup_swallows_resolution_failure() {
        let server = with_update_server();

        let authenticator = Authenticator::with_resolver("update-key", FailingZoneResolver)
            .with_endpoint(&server.url);

        authenticator
            .cleanup("example.com", "_acme-challenge.example.com", "abc123")
            .await;

        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn test_perform_wraps_update_failure() {
        let server = with_update_server();
        server.push_reply(200, "badauth");

        let authenticator = authenticator(&server.url);

        let err = authenticator
            .perform("example.com", "_acme-challenge.example.com", "abc123")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
        assert!(err.to_string().contains("badauth"));
    }

    #[tokio::test]
    async fn test_cleanup_swallows_update_failure() {
        let server = with_update_server();
        server.push_reply(200, "badauth");

        let authenticator = authenticator(&server.url);

        authenticator
            .cleanup("example.com", "_acme-challenge.example.com", "abc123")
            .await;

        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_try_cleanup_reports_update_failure() {
        let server = with_update_server();
        server.push_reply(200, "nohost");

        let authenticator = authenticator(&server.url);

        let err = authenticator
            .try_cleanup("example.com", "_acme-challenge.example.com", "abc123")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let server = with_update_server();
        let authenticator = authenticator(&server.url);

        let hooks: &dyn Dns01Authenticator = &authenticator;

        hooks
            .perform("example.com", "_acme-challenge.example.com", "abc123")
            .await
            .unwrap();
        hooks
            .cleanup("example.com", "_acme-challenge.example.com", "abc123")
            .await;

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].txt.as_deref(), Some("EMPTY"));
    }
}
