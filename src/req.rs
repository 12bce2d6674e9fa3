use std::time::Duration;

use serde::Serialize;

use crate::api::ApiProblem;

pub(crate) type ReqResult<T> = std::result::Result<T, ApiProblem>;

pub(crate) fn http_client() -> ReqResult<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|err| ApiProblem::http_error(err.to_string()))
}

pub(crate) async fn req_post_form<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    form: &T,
) -> ReqResult<reqwest::Response> {
    let req = client.post(url).form(form);
    log::trace!("{req:?}");
    req.send()
        .await
        .map_err(|err| ApiProblem::http_error(err.to_string()))
}

pub(crate) async fn req_handle_error(res: reqwest::Response) -> ReqResult<reqwest::Response> {
    // ok responses pass through
    if res.status().is_success() {
        return Ok(res);
    }

    let status = format!(
        "{} {}",
        res.status().as_u16(),
        res.status().canonical_reason().unwrap_or("")
    );
    let body = req_safe_read_body(res).await;

    Err(ApiProblem::http_error(format!("{status} body: {body}")))
}

pub(crate) async fn req_safe_read_body(res: reqwest::Response) -> String {
    // the endpoint sometimes closes the connection abruptly even though the
    // status line made it through
    res.text().await.unwrap_or_default()
}
