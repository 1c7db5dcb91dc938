use std::time::Duration;

use anyhow::Context as _;
use url::Url;

use crate::cli::PortalArgs;
use crate::extract::DEFAULT_PDF_MARKER;

pub const DEFAULT_BASE_URL: &str = "https://services.ecourts.gov.in/ecourtindia_v6/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Portal root; always ends with `/` so endpoint names join under it.
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
    pub pdf_marker: String,
    /// Query parameter that carries the complex code on the cause-list query.
    /// `None` leaves the complex code out, matching the portal's observed contract.
    pub complex_param: Option<String>,
}

impl PortalConfig {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            pdf_marker: DEFAULT_PDF_MARKER.to_owned(),
            complex_param: None,
        })
    }

    pub fn from_args(args: &PortalArgs) -> anyhow::Result<Self> {
        if args.timeout_secs == 0 {
            anyhow::bail!("--timeout-secs must be greater than zero");
        }
        let complex_param = args
            .complex_param
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned);

        Ok(Self {
            base_url: parse_base_url(&args.base_url).context("parse --base-url")?,
            timeout: Duration::from_secs(args.timeout_secs),
            user_agent: args.user_agent.clone(),
            pdf_marker: DEFAULT_PDF_MARKER.to_owned(),
            complex_param,
        })
    }
}

fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("invalid base url: {raw}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("base url must be http/https: {url}");
    }
    if url.cannot_be_a_base() {
        anyhow::bail!("base url cannot be a base: {url}");
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
