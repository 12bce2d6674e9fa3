//! Wire-level payloads of the record update API.
//!
//! Not intended to be used directly. Provided to aid debugging.

use std::fmt;

/// DNS record types the update API can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    A,
    Aaaa,
    Txt,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Txt => "TXT",
        })
    }
}

/// A successful reply from the update endpoint.
///
/// The API answers with a plain-text status line in the dyndns2 style, e.g.:
///
/// ```text
/// good 192.0.2.1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateReply {
    /// The record content was changed.
    Good,

    /// The record already had the requested content.
    NoChange,
}

/// Reply codes the endpoint is known to emit on failure.
const ERROR_CODES: &[&str] = &[
    "badauth", "notfqdn", "nohost", "numhost", "abuse", "badagent", "dnserr", "911",
];

impl UpdateReply {
    /// Parses a reply body into a success value or an [`ApiProblem`].
    pub(crate) fn parse(body: &str) -> Result<UpdateReply, ApiProblem> {
        let line = body.trim();
        let (code, rest) = match line.split_once(char::is_whitespace) {
            Some((code, rest)) => (code, rest.trim()),
            None => (line, ""),
        };

        let detail = (!rest.is_empty()).then(|| rest.to_owned());

        match code {
            "good" => Ok(UpdateReply::Good),
            "nochg" => Ok(UpdateReply::NoChange),

            code if ERROR_CODES.contains(&code) => Err(ApiProblem {
                code: code.to_owned(),
                detail,
            }),

            // anything else means we are not talking to the API we think we are
            _ => Err(ApiProblem {
                code: "unknownReply".to_owned(),
                detail: Some(line.to_owned()),
            }),
        }
    }
}

/// An error reply from (or about) the update endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiProblem {
    /// Reply code, or a synthetic code for transport-level failures.
    pub code: String,

    /// Remainder of the reply line, if any.
    pub detail: Option<String>,
}

impl ApiProblem {
    pub(crate) fn http_error(detail: impl Into<String>) -> Self {
        ApiProblem {
            code: "httpReqError".to_owned(),
            detail: Some(detail.into()),
        }
    }

    /// Returns true if the failure is on the server's side and worth retrying.
    ///
    /// `911` is the API's "maintenance, come back in a few minutes" answer and `dnserr` its
    /// internal database error.
    pub fn is_server_glitch(&self) -> bool {
        self.code == "911" || self.code == "dnserr"
    }

    /// Returns true if the update key was rejected.
    pub fn is_auth_error(&self) -> bool {
        self.code == "badauth"
    }
}

impl fmt::Display for ApiProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {detail}", self.code),
            _ => write!(f, "{}", self.code),
        }
    }
}

impl std::error::Error for ApiProblem {}
