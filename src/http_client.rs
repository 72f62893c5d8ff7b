use anyhow::Context;
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::error::{PipelineError, Result};

const BROWSER_AGENT: &str = "Mozilla/5.0";

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> anyhow::Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .build()
            .context("failed to build http client")
    })
}

/// GET `url` and return the body. Any status other than 200 is a failure.
pub fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .header(USER_AGENT, BROWSER_AGENT)
        .send()
        .map_err(|source| PipelineError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = resp.status();
    if status != reqwest::StatusCode::OK {
        return Err(PipelineError::NetworkFailure {
            status,
            url: url.to_string(),
        });
    }

    resp.text().map_err(|source| PipelineError::Request {
        url: url.to_string(),
        source,
    })
}
