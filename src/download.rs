use std::path::{Path, PathBuf};

use anyhow::Context as _;
use url::Url;

use crate::artifact;
use crate::cli::DownloadArgs;
use crate::config::PortalConfig;
use crate::extract;
use crate::formats::{DownloadOutcome, NotFoundReason, SelectionPath};
use crate::portal::{PortalClient, PortalError, append_query};

/// Value of the `p` parameter selecting the cause-list page.
pub const CAUSE_LIST_PAGE: &str = "cause_list";

impl PortalClient {
    /// `{base}?p=cause_list&state_code=..&dist_code=..&court_code=..&date=..`
    pub fn cause_list_query_url(&self, selection: &SelectionPath) -> Url {
        let config = self.config();
        let mut params = vec![
            ("p", CAUSE_LIST_PAGE),
            ("state_code", selection.state_code.as_str()),
            ("dist_code", selection.district_code.as_str()),
        ];
        if let Some(name) = config.complex_param.as_deref() {
            params.push((name, selection.complex_code.as_str()));
        }
        params.push(("court_code", selection.court_code.as_str()));
        params.push(("date", selection.date.as_str()));

        let mut url = config.base_url.clone();
        append_query(&mut url, &params);
        url
    }

    /// Locate the cause-list PDF for `selection` and save it under `out_dir`.
    pub fn download_cause_list(
        &self,
        selection: &SelectionPath,
        out_dir: &Path,
    ) -> Result<DownloadOutcome, PortalError> {
        let file_name = artifact::artifact_file_name(&selection.court_code, &selection.date)?;

        let query_url = self.cause_list_query_url(selection);
        let response = self.get(&query_url)?;
        if !response.is_success() {
            tracing::warn!(url = %query_url, status = response.status, "cause list query failed");
            return Ok(DownloadOutcome::NotFound(NotFoundReason::QueryStatus(
                response.status,
            )));
        }

        let html = response.into_text().map_err(|source| PortalError::Body {
            url: query_url.clone(),
            source,
        })?;
        let Some(href) = extract::find_pdf_link(&html, &self.config().pdf_marker) else {
            tracing::warn!(url = %query_url, "no cause list link on page");
            return Ok(DownloadOutcome::NotFound(NotFoundReason::NoPdfLink));
        };

        let pdf_url = self
            .config()
            .base_url
            .join(&href)
            .map_err(|source| PortalError::Url {
                target: href.clone(),
                source,
            })?;
        let pdf = self.get(&pdf_url)?;
        if !pdf.is_success() {
            tracing::warn!(url = %pdf_url, status = pdf.status, "cause list pdf unavailable");
            return Ok(DownloadOutcome::NotFound(NotFoundReason::PdfStatus(
                pdf.status,
            )));
        }

        let path = out_dir.join(file_name);
        let bytes = artifact::write_artifact(&path, pdf.body).map_err(|source| PortalError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes, "saved cause list");
        Ok(DownloadOutcome::Saved(path))
    }
}

pub fn run(args: DownloadArgs) -> anyhow::Result<DownloadOutcome> {
    let config = PortalConfig::from_args(&args.portal).context("resolve portal config")?;
    let client = PortalClient::connect(config).context("connect to portal")?;

    let date = match args.date {
        Some(date) => date,
        None => today(),
    };
    let selection = SelectionPath {
        state_code: args.state,
        district_code: args.district,
        complex_code: args.complex,
        court_code: args.court,
        date,
    };
    tracing::debug!(?selection, "downloading cause list");

    let out_dir = PathBuf::from(&args.out_dir);
    client
        .download_cause_list(&selection, &out_dir)
        .context("download cause list")
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
