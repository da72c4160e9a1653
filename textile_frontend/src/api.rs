use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;

use crate::models::{DesignMatch, GenerateRequest, GenerateResponse, RetrieveResponse};

// Generation blocks server-side while the diffusion model warms up, so the
// timeout is far longer than an ordinary API call would need.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base = sanitize_base_url(base_url.into())?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base_url: base,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) -> Result<()> {
        self.base_url = sanitize_base_url(base_url.into())?;
        Ok(())
    }

    pub fn generate_design(&self, prompt: &str) -> Result<GenerateResponse> {
        let url = self.url("/generate")?;
        let response = self
            .client
            .post(url)
            .json(&GenerateRequest { prompt })
            .send()?
            .error_for_status()?;
        Ok(response.json()?)
    }

    pub fn retrieve_similar(&self, query: &str) -> Result<Vec<DesignMatch>> {
        let url = self.retrieve_url(query)?;
        let response = self.client.get(url).send()?.error_for_status()?;
        let wrapper: RetrieveResponse = response.json()?;
        Ok(wrapper.results)
    }

    fn retrieve_url(&self, query: &str) -> Result<Url> {
        let mut url = self.url("/retrieve")?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }

    fn url(&self, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).context("invalid base URL")?;
        url.set_path(path.trim_start_matches('/'));
        Ok(url)
    }
}

fn sanitize_base_url(mut base: String) -> Result<String> {
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    // Remove trailing slash for consistency
    while base.ends_with('/') {
        base.pop();
    }
    // Validate once
    let _ = Url::parse(&base).context("invalid base URL")?;
    Ok(base)
}
