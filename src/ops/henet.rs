//! Hurricane Electric backend.
//!
//! Speaks the dyndns2-style update protocol of `dyn.dns.he.net`: one authenticated form POST per
//! update, answered with a plain-text status line.

use std::time::Duration;

use serde::Serialize;

use crate::{
    api::{RecordType, UpdateReply},
    ops::ProviderConfig,
    req::{req_handle_error, req_post_form, req_safe_read_body, ReqResult},
};

pub(crate) const PROVIDER: &str = "henet";

const UPDATE_URL: &str = "https://dyn.dns.he.net/nic/update";

/// Total attempts for one update when the server keeps reporting a glitch.
const UPDATE_ATTEMPTS: u32 = 3;

const RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct UpdateForm<'a> {
    hostname: &'a str,
    password: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    txt: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    myip: Option<&'a str>,
}

pub(crate) async fn update_record(
    http: &reqwest::Client,
    config: &ProviderConfig,
    rtype: RecordType,
    name: &str,
    content: &str,
) -> ReqResult<UpdateReply> {
    let form = match rtype {
        RecordType::Txt => UpdateForm {
            hostname: name,
            password: config.token(),
            txt: Some(content),
            myip: None,
        },
        RecordType::A | RecordType::Aaaa => UpdateForm {
            hostname: name,
            password: config.token(),
            txt: None,
            myip: Some(content),
        },
    };

    let url = config.endpoint().unwrap_or(UPDATE_URL);

    let mut attempt = 1;

    // The endpoint answers 911 while its database is in maintenance. Back off briefly and retry
    // a bounded number of times before reporting the problem.
    loop {
        let res = req_post_form(http, url, &form).await?;
        let res = req_handle_error(res).await?;
        let body = req_safe_read_body(res).await;

        match UpdateReply::parse(&body) {
            Ok(reply) => return Ok(reply),

            Err(problem) if problem.is_server_glitch() && attempt < UPDATE_ATTEMPTS => {
                log::debug!("Retrying {rtype} update for {name} on: {problem}");
                attempt += 1;
                tokio::time::sleep(RETRY_DELAY).await;
            }

            Err(problem) => return Err(problem),
        }
    }
}
