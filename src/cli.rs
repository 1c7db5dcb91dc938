use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List states.
    States(StatesArgs),
    /// List districts of a state.
    Districts(DistrictsArgs),
    /// List court complexes of a district.
    Complexes(ComplexesArgs),
    /// List courts of a court complex.
    Courts(CourtsArgs),
    /// Download the cause list PDF for a court and date.
    Download(DownloadArgs),
}

#[derive(Debug, Clone, Args)]
pub struct PortalArgs {
    /// Portal root URL; endpoint names are resolved under it.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Query parameter name for the complex code on the cause-list query
    /// (omitted when unset).
    #[arg(long)]
    pub complex_param: Option<String>,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print options as a JSON array instead of `code<TAB>name` lines.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct StatesArgs {
    #[command(flatten)]
    pub portal: PortalArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct DistrictsArgs {
    /// State code (from `states`).
    #[arg(long)]
    pub state: String,

    #[command(flatten)]
    pub portal: PortalArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ComplexesArgs {
    /// District code (from `districts`).
    #[arg(long)]
    pub district: String,

    #[command(flatten)]
    pub portal: PortalArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct CourtsArgs {
    /// Court complex code (from `complexes`).
    #[arg(long)]
    pub complex: String,

    #[command(flatten)]
    pub portal: PortalArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct DownloadArgs {
    #[arg(long)]
    pub state: String,

    #[arg(long)]
    pub district: String,

    #[arg(long)]
    pub complex: String,

    #[arg(long)]
    pub court: String,

    /// Hearing date as sent to the portal (default: today, `YYYY-MM-DD`).
    #[arg(long)]
    pub date: Option<String>,

    /// Directory the PDF is written to.
    #[arg(long, default_value = ".")]
    pub out_dir: String,

    #[command(flatten)]
    pub portal: PortalArgs,
}
