use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mscc_drv::Config;
use mscc_util::Diagnostic;

/// Compile a MusicScript source file into a standalone Python artifact.
#[derive(Parser, Debug)]
#[command(name = "mscc", about = "MusicScript compiler")]
struct Cli {
    /// Source file to compile.
    #[arg(default_value = "input.ms")]
    source: PathBuf,

    /// Output path for the generated artifact.
    #[arg(short, long, default_value = "output.py")]
    output: PathBuf,

    /// Run the emitted artifact after compiling it. Takes an optional
    /// interpreter name; defaults to `python3` when given without a value.
    #[arg(long, num_args = 0..=1, default_missing_value = "python3")]
    run: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config {
        source_path: cli.source,
        output_path: cli.output,
        run_with: cli.run,
    };

    match mscc_drv::run_pipeline(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{}", mscc_util::render(&err));
            ExitCode::FAILURE
        }
    }
}
