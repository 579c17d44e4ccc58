use clap::Parser;
use std::path::PathBuf;
use vidrotate::engine::Placement;

#[derive(Debug, Parser)]
#[command(name = "vidrotate")]
#[command(version, about = "Batch re-encode videos with ffmpeg, skipping ones already rotated", long_about = None)]
pub struct Cli {
    /// Input file, or directory whose direct children are converted
    #[arg(short = 'i', long = "input", value_name = "FILE", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// ffmpeg video filter (passed as -vf)
    #[arg(long = "vf", value_name = "FILTER")]
    pub video_filter: Option<String>,

    /// Where rotated output goes (overrides config)
    #[arg(long = "rotate", value_enum, value_name = "PLACEMENT")]
    pub placement: Option<Placement>,

    /// Kill an encode after this many seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// ffmpeg arguments used instead of the codec table, e.g. `-- -c:v libx265 -crf 28`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FFMPEG_ARGS")]
    pub ffmpeg_args: Vec<String>,
}

pub fn parse() -> Cli {
    Cli::parse()
}
