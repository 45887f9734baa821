//! Decode a gray `.jp2` file and save it as `.jpg`.
//!
//! Exits with -1 when decoding fails. A failed write is logged but does not
//! change the exit code.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use stopwatch::Stopwatch;

use jp2gray::{ComponentPolicy, DecodeParams, SampleNarrowing};

#[derive(Parser)]
#[command(name = "jp2gray")]
#[command(version)]
#[command(about = "Decode a single-channel JPEG2000 image and save it as JPEG", long_about = None)]
struct Cli {
    /// Input .jp2 file
    #[arg(default_value = "../data/trial.jp2")]
    input: PathBuf,

    /// Output .jpg file
    #[arg(default_value = "../data/res.jpg")]
    output: PathBuf,

    /// Thread hint passed to the decoder
    #[arg(short, long, default_value_t = jp2gray::DEFAULT_NUM_THREADS)]
    threads: i32,

    /// Print image extent, components and color space
    #[arg(short, long)]
    verbose: bool,

    /// Saturate samples to 0..=255 instead of keeping the low 8 bits
    #[arg(long)]
    clamp: bool,

    /// Keep only the first component of multi-component images
    #[arg(long)]
    first_component: bool,
}

impl Cli {
    fn params(&self) -> DecodeParams {
        let narrowing = if self.clamp { SampleNarrowing::Clamp } else { SampleNarrowing::Wrap };
        let policy = if self.first_component { ComponentPolicy::FirstOnly } else { ComponentPolicy::Reject };
        DecodeParams::default()
            .with_num_threads(self.threads)
            .with_verbose(self.verbose)
            .with_narrowing(narrowing)
            .with_component_policy(policy)
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let params = cli.params();

    let sw = Stopwatch::start_new();
    let buffer = match jp2gray::decode_file(&cli.input, &params).and_then(|img| jp2gray::transfer(&img, &params)) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("ERROR -> {}: {}", cli.input.display(), e);
            process::exit(-1);
        }
    };
    log::debug!("decoded {} in {}ms", cli.input.display(), sw.elapsed_ms());

    if buffer.width() == 0 || buffer.height() == 0 {
        log::warn!("{} decoded to an empty image, nothing written", cli.input.display());
        return;
    }

    let sw = Stopwatch::start_new();
    match jp2gray::write_jpeg(&cli.output, &buffer) {
        Ok(()) => log::debug!("wrote {} in {}ms", cli.output.display(), sw.elapsed_ms()),
        Err(e) => log::error!("could not write {}: {}", cli.output.display(), e),
    }
}
