use crate::api::ApiProblem;

/// Failure classes surfaced by the authenticator.
///
/// The caller decides policy per kind: issuance aborts on either during [`perform`], while
/// [`cleanup`] swallows both to stay best-effort.
///
/// [`perform`]: crate::Authenticator::perform()
/// [`cleanup`]: crate::Authenticator::cleanup()
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The registered zone for a domain could not be determined.
    #[error("unable to determine zone for {domain}: {reason}")]
    Resolution {
        /// Domain the lookup started from.
        domain: String,

        /// Why resolution failed.
        reason: String,
    },

    /// The remote record update failed.
    #[error("error updating TXT record: {0}")]
    Transport(#[source] ApiProblem),
}

impl From<ApiProblem> for Error {
    fn from(problem: ApiProblem) -> Error {
        Error::Transport(problem)
    }
}
