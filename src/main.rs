use frog_runner::config::{ConfigSource, GameConfig, SceneVariant};
use frog_runner::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: frog_runner [--config PATH] [--classic | --practice]";

/// Command line options. Anything not given here comes from the config file.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    variant: Option<SceneVariant>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--classic" => parsed.variant = Some(SceneVariant::classic()),
            "--practice" => parsed.variant = Some(SceneVariant::practice()),
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument '{}'\n{}", other, USAGE)),
        }
    }

    Ok(parsed)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    // The logger is configured from the file, so load before logging anything
    let discovered = GameConfig::discover(args.config.as_deref());
    let log_filter = discovered.as_ref().ok().and_then(|(c, _)| c.log_filter.as_deref());
    init_logging(log_filter);

    let (mut config, source) = match discovered {
        Ok(found) => found,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match &source {
        ConfigSource::File(path) => log::info!("Loaded config from {}", path.display()),
        ConfigSource::Defaults => log::info!("No config file found, using defaults"),
    }

    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    log::debug!("scene variant: {:?}", config.variant);

    match frog_runner::frontend::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
