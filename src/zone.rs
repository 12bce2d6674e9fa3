use async_trait::async_trait;
use hickory_resolver::{
    config::ResolverConfig, name_server::TokioConnectionProvider, Resolver, TokioResolver,
};

use crate::error::Error;

/// Resolves which portion of a FQDN is the registered zone.
///
/// The authenticator needs the zone (e.g. `example.com` for `foo.bar.example.com`) to build the
/// provider configuration. Embedding frameworks that already know the zone, or that have their
/// own resolution strategy, can implement this trait and inject it via
/// [`Authenticator::with_resolver`].
///
/// [`Authenticator::with_resolver`]: crate::Authenticator::with_resolver()
#[async_trait]
pub trait ZoneResolver: Send + Sync {
    /// Returns the registered zone `domain` falls under.
    ///
    /// Failures must be reported as [`Error::Resolution`].
    async fn resolve_zone(&self, domain: &str) -> Result<String, Error>;
}

/// Default [`ZoneResolver`] querying live DNS.
///
/// Walks the label suffixes of the domain from most to least specific and returns the first one
/// an authoritative `SOA` record exists for.
pub struct SoaZoneResolver {
    resolver: TokioResolver,
}

impl SoaZoneResolver {
    /// Creates a resolver from the system configuration, falling back to defaults when no system
    /// configuration can be read.
    pub fn new() -> Self {
        let resolver = Resolver::builder_tokio()
            .unwrap_or(Resolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            ))
            .build();

        SoaZoneResolver { resolver }
    }
}

impl Default for SoaZoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ZoneResolver for SoaZoneResolver {
    async fn resolve_zone(&self, domain: &str) -> Result<String, Error> {
        let candidates = zone_candidates(domain);

        if candidates.is_empty() {
            return Err(Error::Resolution {
                domain: domain.to_owned(),
                reason: "domain has no labels".to_owned(),
            });
        }

        let mut last_error = None;

        for candidate in &candidates {
            // trailing dot makes the lookup absolute
            match self.resolver.soa_lookup(format!("{candidate}.")).await {
                Ok(_) => {
                    log::debug!("Zone for {domain} is {candidate}");
                    return Ok(candidate.clone());
                }
                Err(err) => last_error = Some(err),
            }
        }

        Err(Error::Resolution {
            domain: domain.to_owned(),
            reason: match last_error {
                Some(err) => err.to_string(),
                None => "no authoritative zone found".to_owned(),
            },
        })
    }
}

/// Label suffixes of `domain`, most specific first.
fn zone_candidates(domain: &str) -> Vec<String> {
    let domain = domain.strip_suffix('.').unwrap_or(domain);

    let labels = domain
        .split('.')
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>();

    (0..labels.len())
        .map(|idx| labels[idx..].join("."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_most_specific_first() {
        assert_eq!(
            zone_candidates("_acme-challenge.foo.example.com"),
            vec!["_acme-challenge.foo.example.com", "foo.example.com", "example.com", "com"],
        );
    }

    #[test]
    fn test_candidates_ignore_trailing_dot() {
        assert_eq!(zone_candidates("example.com."), vec!["example.com", "com"]);
    }

    #[test]
    fn test_candidates_empty_domain() {
        assert!(zone_candidates("").is_empty());
        assert!(zone_candidates(".").is_empty());
    }
}
