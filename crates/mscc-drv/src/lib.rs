//! mscc-drv — compiler driver: wires the pipeline stages together and owns
//! all filesystem and process I/O.

mod error;

pub use error::CompileError;

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, instrument};

/// Driver configuration, populated from CLI arguments.
#[derive(Debug, Clone)]
pub struct Config {
    pub source_path: PathBuf,
    pub output_path: PathBuf,
    /// Interpreter to invoke the emitted artifact with, if `--run` was given.
    pub run_with: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("input.ms"),
            output_path: PathBuf::from("output.py"),
            run_with: None,
        }
    }
}

/// Run the full pipeline over `source`, returning the rendered artifact
/// text.
#[instrument(skip(source))]
pub fn compile_source(source: &str) -> Result<String, CompileError> {
    debug!("tokenizing");
    let tokens = mscc_lex::tokenize(source)?;

    debug!(count = tokens.len(), "parsing");
    let (program, interner) = mscc_ast::parse(tokens)?;

    debug!("running semantic analysis");
    mscc_sem::analyze(&program, &interner)?;

    debug!("generating intermediate code");
    let quads = mscc_ir::generate(&program, &interner)?;

    debug!(count = quads.len(), "optimizing");
    let quads = mscc_ir::optimize(quads)?;

    debug!("emitting artifact");
    Ok(mscc_emit::emit(&quads))
}

/// Read `config.source_path`, compile it, write the artifact to
/// `config.output_path`, and optionally run it.
#[instrument(skip(config))]
pub fn run_pipeline(config: &Config) -> Result<(), CompileError> {
    let source = std::fs::read_to_string(&config.source_path)?;
    let artifact = compile_source(&source)?;
    std::fs::write(&config.output_path, artifact)?;
    info!(path = %config.output_path.display(), "wrote artifact");

    if let Some(interpreter) = &config.run_with {
        run_artifact(interpreter, &config.output_path)?;
    }
    Ok(())
}

fn run_artifact(interpreter: &str, path: &Path) -> Result<(), CompileError> {
    info!(interpreter, path = %path.display(), "running artifact");
    Command::new(interpreter).arg(path).status()?;
    Ok(())
}
