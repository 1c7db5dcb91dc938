//! Cascading lookups against the portal: state → district → complex → court.

use std::path::PathBuf;

use url::Url;

use crate::config::PortalConfig;
use crate::extract::{self, ExtractError};
use crate::formats::SelectOption;
use crate::transport::{HttpTransport, Transport, TransportError, TransportResponse};

pub const STATES_ENDPOINT: &str = "get_state.php";
pub const DISTRICTS_ENDPOINT: &str = "get_district.php";
pub const COMPLEXES_ENDPOINT: &str = "get_complex.php";
pub const COURTS_ENDPOINT: &str = "get_court.php";

#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("build http client")]
    Client(#[source] TransportError),
    #[error("build url for {target}")]
    Url {
        target: String,
        #[source]
        source: url::ParseError,
    },
    #[error("GET {url}")]
    Transport {
        url: Url,
        #[source]
        source: TransportError,
    },
    #[error("GET {url}: unexpected status {status}")]
    Status { url: Url, status: u16 },
    #[error("read response body: {url}")]
    Body {
        url: Url,
        #[source]
        source: std::io::Error,
    },
    #[error("extract options from {url}")]
    Extract {
        url: Url,
        #[source]
        source: ExtractError,
    },
    #[error("{field} cannot be used in a file name: {value:?}")]
    InvalidArtifactName { field: &'static str, value: String },
    #[error("write cause list: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Client for the portal's dropdown and cause-list endpoints.
///
/// Built once per process; every call is a single blocking request through the
/// injected [`Transport`].
pub struct PortalClient {
    config: PortalConfig,
    transport: Box<dyn Transport>,
}

impl std::fmt::Debug for PortalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PortalClient {
    pub fn new(config: PortalConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Box::new(transport),
        }
    }

    /// Build a client over HTTP using the config's timeout and User-Agent.
    pub fn connect(config: PortalConfig) -> Result<Self, PortalError> {
        let transport = HttpTransport::new(&config).map_err(PortalError::Client)?;
        Ok(Self::new(config, transport))
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn fetch_states(&self) -> Result<Vec<SelectOption>, PortalError> {
        self.fetch_options(STATES_ENDPOINT, &[])
    }

    pub fn fetch_districts(&self, state_code: &str) -> Result<Vec<SelectOption>, PortalError> {
        self.fetch_options(DISTRICTS_ENDPOINT, &[("state_code", state_code)])
    }

    pub fn fetch_complexes(&self, district_code: &str) -> Result<Vec<SelectOption>, PortalError> {
        self.fetch_options(COMPLEXES_ENDPOINT, &[("district_code", district_code)])
    }

    pub fn fetch_courts(&self, complex_code: &str) -> Result<Vec<SelectOption>, PortalError> {
        self.fetch_options(COURTS_ENDPOINT, &[("complex_code", complex_code)])
    }

    fn fetch_options(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<SelectOption>, PortalError> {
        let url = self.endpoint_url(endpoint, params)?;
        let response = self.get(&url)?;
        if !response.is_success() {
            return Err(PortalError::Status {
                url,
                status: response.status,
            });
        }

        let html = response.into_text().map_err(|source| PortalError::Body {
            url: url.clone(),
            source,
        })?;
        let options =
            extract::extract_options(&html).map_err(|source| PortalError::Extract { url, source })?;
        tracing::debug!(endpoint, count = options.len(), "fetched options");
        Ok(options)
    }

    /// `{base}{endpoint}` with each parameter percent-encoded.
    pub fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, PortalError> {
        let mut url = self
            .config
            .base_url
            .join(endpoint)
            .map_err(|source| PortalError::Url {
                target: endpoint.to_owned(),
                source,
            })?;
        append_query(&mut url, params);
        Ok(url)
    }

    pub(crate) fn get(&self, url: &Url) -> Result<TransportResponse, PortalError> {
        self.transport
            .get(url)
            .map_err(|source| PortalError::Transport {
                url: url.clone(),
                source,
            })
    }
}

pub(crate) fn append_query(url: &mut Url, params: &[(&str, &str)]) {
    if params.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (name, value) in params {
        pairs.append_pair(name, value);
    }
}
