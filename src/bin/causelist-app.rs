use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use axum::Router;
use axum::extract::{Form, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{Json, Response};
use axum::routing::{get, post};
use clap::Parser;
use serde::Deserialize;
use tokio_util::io::ReaderStream;
use tower_http::trace::TraceLayer;

use causelist::cli::PortalArgs;
use causelist::config::PortalConfig;
use causelist::formats::{DownloadOutcome, SelectOption, SelectionPath};
use causelist::portal::{PortalClient, PortalError};

const NOT_FOUND_MESSAGE: &str = "No cause list found for this court/date.";

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Directory downloaded cause lists are written to.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    #[command(flatten)]
    portal: PortalArgs,
}

#[derive(Clone)]
struct AppState {
    client: Arc<PortalClient>,
    data_dir: PathBuf,
}

type HandlerError = (StatusCode, String);

fn main() -> std::process::ExitCode {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

fn try_main() -> anyhow::Result<()> {
    causelist::logging::init("info,tower_http=debug")?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting causelist-app");

    let mut portal_args = args.portal.clone();
    if let Some(base_url) = std::env::var("CAUSELIST_BASE_URL")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    {
        portal_args.base_url = base_url;
    }
    if let Some(timeout_secs) = std::env::var("CAUSELIST_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
    {
        portal_args.timeout_secs = timeout_secs;
    }

    let config = PortalConfig::from_args(&portal_args).context("resolve portal config")?;
    tracing::info!(base_url = %config.base_url, timeout = ?config.timeout, "using portal");
    let client = PortalClient::connect(config).context("connect to portal")?;

    let state = AppState {
        client: Arc::new(client),
        data_dir: args.data_dir,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    runtime.block_on(serve(args.addr, state))
}

async fn serve(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/states", get(list_states))
        .route("/get_districts", post(list_districts))
        .route("/get_complexes", post(list_complexes))
        .route("/get_courts", post(list_courts))
        .route("/download", post(download))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {addr}: {err}"))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct DistrictsRequest {
    state_code: String,
}

#[derive(Debug, Deserialize)]
struct ComplexesRequest {
    district_code: String,
}

#[derive(Debug, Deserialize)]
struct CourtsRequest {
    complex_code: String,
}

#[derive(Debug, Deserialize)]
struct DownloadForm {
    state: String,
    district: String,
    complex: String,
    court: String,
    date: String,
}

async fn list_states(
    State(state): State<AppState>,
) -> Result<Json<Vec<SelectOption>>, HandlerError> {
    let client = Arc::clone(&state.client);
    run_blocking(move || client.fetch_states()).await.map(Json)
}

async fn list_districts(
    State(state): State<AppState>,
    Json(req): Json<DistrictsRequest>,
) -> Result<Json<Vec<SelectOption>>, HandlerError> {
    let client = Arc::clone(&state.client);
    run_blocking(move || client.fetch_districts(&req.state_code))
        .await
        .map(Json)
}

async fn list_complexes(
    State(state): State<AppState>,
    Json(req): Json<ComplexesRequest>,
) -> Result<Json<Vec<SelectOption>>, HandlerError> {
    let client = Arc::clone(&state.client);
    run_blocking(move || client.fetch_complexes(&req.district_code))
        .await
        .map(Json)
}

async fn list_courts(
    State(state): State<AppState>,
    Json(req): Json<CourtsRequest>,
) -> Result<Json<Vec<SelectOption>>, HandlerError> {
    let client = Arc::clone(&state.client);
    run_blocking(move || client.fetch_courts(&req.complex_code))
        .await
        .map(Json)
}

async fn download(
    State(state): State<AppState>,
    Form(form): Form<DownloadForm>,
) -> Result<Response, HandlerError> {
    let selection = SelectionPath {
        state_code: form.state,
        district_code: form.district,
        complex_code: form.complex,
        court_code: form.court,
        date: form.date,
    };

    let client = Arc::clone(&state.client);
    let data_dir = state.data_dir.clone();
    let outcome =
        run_blocking(move || client.download_cause_list(&selection, &data_dir)).await?;
    let path = match outcome {
        DownloadOutcome::Saved(path) => path,
        DownloadOutcome::NotFound(reason) => {
            tracing::info!(%reason, "cause list not found");
            return Err((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()));
        }
    };

    let file = tokio::fs::File::open(&path).await.map_err(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("open {}: {err}", path.display()),
        )
    })?;
    let stream = ReaderStream::new(file);
    let body = axum::body::Body::from_stream(stream);

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("cause_list.pdf");
    let mut resp = Response::new(body);
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    resp.headers_mut().insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\"")).map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "invalid file name".to_string(),
            )
        })?,
    );
    Ok(resp)
}

async fn run_blocking<T, F>(f: F) -> Result<T, HandlerError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PortalError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("portal task failed: {err}"),
            )
        })?
        .map_err(portal_error_response)
}

fn portal_error_response(err: PortalError) -> HandlerError {
    let status = match &err {
        PortalError::InvalidArtifactName { .. } => StatusCode::BAD_REQUEST,
        PortalError::Io { .. } | PortalError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    let err = anyhow::Error::new(err);
    tracing::warn!(%status, "portal request failed: {err:#}");
    (status, format!("{err:#}"))
}
