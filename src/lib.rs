//! DNS-01 challenge authenticator for [Hurricane Electric DNS](https://dns.he.net/).
//!
//! Proving control of a domain with the `dns-01` challenge type means publishing a `TXT` record
//! under:
//!
//! ```text
//! _acme-challenge.<domain-to-be-proven>.  TXT  <proof>
//! ```
//!
//! This crate performs exactly that record update (and its later removal) against the Hurricane
//! Electric dynamic update API, on behalf of whichever ACME client drives the certificate order.
//! It does not speak the ACME protocol itself.
//!
//! # Usage
//!
//! Create an [`Authenticator`] with the per-record update key configured in the Hurricane
//! Electric control panel, then call the two lifecycle hooks around challenge validation:
//!
//! ```no_run
//! use dns_henet::Authenticator;
//!
//! async fn authorize(proof: &str) -> Result<(), dns_henet::Error> {
//!     let authenticator = Authenticator::new("update-key");
//!
//!     authenticator
//!         .perform("example.com", "_acme-challenge.example.com", proof)
//!         .await?;
//!
//!     // ... ask the ACME provider to validate the challenge ...
//!
//!     authenticator
//!         .cleanup("example.com", "_acme-challenge.example.com", proof)
//!         .await;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure Semantics
//!
//! [`perform`] fails loudly: both failure classes ([`Error::Resolution`] and
//! [`Error::Transport`]) propagate to the caller so issuance can abort. [`cleanup`] is
//! best-effort and never fails: errors are logged at debug level and swallowed, since a failed
//! teardown must not crash an otherwise successful issuance. Embedders that want to apply their
//! own policy can use [`try_cleanup`] instead.
//!
//! Note that cleanup overwrites the record content with a fixed sentinel value rather than
//! deleting the record; the update API has no delete operation.
//!
//! [`perform`]: Authenticator::perform()
//! [`cleanup`]: Authenticator::cleanup()
//! [`try_cleanup`]: Authenticator::try_cleanup()

#![deny(rust_2018_idioms, nonstandard_style, future_incompatible)]

mod auth;
mod error;
mod req;
mod zone;

pub mod api;
pub mod ops;


pub use crate::{
    auth::{Authenticator, Dns01Authenticator},
    error::Error,
    zone::{SoaZoneResolver, ZoneResolver},
};
