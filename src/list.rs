use std::io::Write;

use anyhow::Context as _;

use crate::cli::{ComplexesArgs, CourtsArgs, DistrictsArgs, OutputArgs, PortalArgs, StatesArgs};
use crate::config::PortalConfig;
use crate::formats::SelectOption;
use crate::portal::PortalClient;

pub fn states(args: StatesArgs) -> anyhow::Result<()> {
    let client = connect(&args.portal)?;
    let options = client.fetch_states().context("fetch states")?;
    print_options(&options, &args.output)
}

pub fn districts(args: DistrictsArgs) -> anyhow::Result<()> {
    let client = connect(&args.portal)?;
    let options = client
        .fetch_districts(&args.state)
        .with_context(|| format!("fetch districts of state {}", args.state))?;
    print_options(&options, &args.output)
}

pub fn complexes(args: ComplexesArgs) -> anyhow::Result<()> {
    let client = connect(&args.portal)?;
    let options = client
        .fetch_complexes(&args.district)
        .with_context(|| format!("fetch court complexes of district {}", args.district))?;
    print_options(&options, &args.output)
}

pub fn courts(args: CourtsArgs) -> anyhow::Result<()> {
    let client = connect(&args.portal)?;
    let options = client
        .fetch_courts(&args.complex)
        .with_context(|| format!("fetch courts of complex {}", args.complex))?;
    print_options(&options, &args.output)
}

fn connect(args: &PortalArgs) -> anyhow::Result<PortalClient> {
    let config = PortalConfig::from_args(args).context("resolve portal config")?;
    PortalClient::connect(config).context("connect to portal")
}

fn print_options(options: &[SelectOption], output: &OutputArgs) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_options(&mut out, options, output.json)?;
    out.flush().context("flush stdout")?;
    Ok(())
}

/// One `code<TAB>name` line per option, or a pretty JSON array.
pub fn write_options(
    out: &mut impl Write,
    options: &[SelectOption],
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, options).context("serialize options")?;
        out.write_all(b"\n").context("write newline")?;
        return Ok(());
    }

    for option in options {
        writeln!(out, "{}\t{}", option.code, option.name).context("write option")?;
    }
    Ok(())
}
