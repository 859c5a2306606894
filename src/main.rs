use clap::Parser;
use crop::config::CropConfig;
use crop::imaging::Size;
use crop::output;
use crop::pipeline::{self, CropRequest, PipelineError};
use std::path::PathBuf;
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("CROP_ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("CROP_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "crop")]
#[command(about = "Resize and crop images")]
#[command(long_about = "\
Resize and crop images

The image is scaled, keeping its aspect ratio, until it covers WIDTH x HEIGHT,
then the centered WIDTH x HEIGHT window is cut out.

The output format follows the output extension: .png writes PNG, anything
else writes JPEG. Without --output the result is written to the current
directory as <name>_<width>x<height>.<ext>.

Examples:
  crop photo.jpg 400 400
  crop https://example.com/banner.png 1200 300 -o banner-wide.png")]
#[command(version = version_string())]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Filename or URL
    input: String,

    /// Output width in pixels
    width: i64,

    /// Output height in pixels
    height: i64,

    /// Output filename
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let size = Size::from_signed(cli.width, cli.height)?;
    let request = CropRequest::new(cli.input, size).with_output(cli.output);
    pipeline::run(&request, &CropConfig::default(), output::print_event)?;
    Ok(())
}
