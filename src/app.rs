use crate::cli::Cli;
use anyhow::{Context, Result};
use std::process;
use std::time::Duration;
use tracing::{debug, error, info};
use vidrotate::config::Config;
use vidrotate::engine::{ConversionOptions, Converter, ToolPaths};

pub fn run(cli: Cli) {
    let result = if cli.init_config {
        handle_init_config(&cli)
    } else {
        handle_convert(cli)
    };

    if let Err(e) = result {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn build_options(cli: Cli, config: &Config) -> Result<ConversionOptions> {
    let input_root = cli.input.context("No input path given (-i)")?;

    Ok(ConversionOptions {
        input_root,
        video_filter: cli
            .video_filter
            .or_else(|| config.defaults.video_filter.clone()),
        placement: cli.placement.unwrap_or(config.defaults.placement),
        extra_encode_args: cli.ffmpeg_args,
        encode_timeout: cli
            .timeout
            .or(config.defaults.encode_timeout_secs)
            .map(Duration::from_secs),
    })
}

fn handle_convert(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let codecs = config.codec_table()?;
    let options = build_options(cli, &config)?;
    debug!(?options, "options");

    // Both tools must exist before any file is touched
    let tools = ToolPaths::resolve(&config.tools)?;
    info!(
        ffprobe = %tools.probe.display(),
        ffmpeg = %tools.encode.display(),
        "using tools"
    );
    if !options.extra_encode_args.is_empty() {
        info!(args = ?options.extra_encode_args, "ffmpeg arguments override codec table");
    }

    let stats = Converter::new(&tools, &options, &codecs).run()?;
    stats.log_summary();
    Ok(())
}

fn handle_init_config(cli: &Cli) -> Result<()> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    if path.exists() {
        info!(path = %path.display(), "config already exists, leaving it alone");
        return Ok(());
    }

    Config::with_builtin_codecs().save_to(&path)?;
    info!(path = %path.display(), "wrote default config");
    Ok(())
}
