mod codec_args;
mod ffmpeg_cmd;
mod locate;
mod placement;
mod scan;
mod types;

pub use codec_args::{CodecArgumentTable, DEFAULT_CODEC_KEY, select_args};
pub use ffmpeg_cmd::{build_encode_cmd, convert, drain_lines, format_encode_cmd, run_encode};
pub use locate::{ENCODE_TOOL, PROBE_TOOL, ToolPaths, locate, locate_in};
pub use placement::{Derived, Placement, ROTATION_MARKER};
pub use scan::{scan, scan_streaming};
pub use types::{ContainerInfo, ConversionOptions, FileOutcome, SkipReason, StreamInfo};
