use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nsfgen::Fixture;
use nsfgen::output::{write_file, write_to};
use tracing::{debug, info};

mod report;
use report::{fixture_table, summary};

/// nsfgen command line tools
#[derive(Parser)]
#[command(
    name = "nsfgen",
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a fixture and write it to disk
    Build {
        /// Fixture to build
        #[arg(value_enum, default_value_t = FixtureArg::MinimalTest)]
        fixture: FixtureArg,
        /// Output file (defaults to the fixture's file name; use '-' for stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List available fixtures
    List,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FixtureArg {
    MinimalTest,
    ContinuousTone,
}

impl From<FixtureArg> for Fixture {
    fn from(arg: FixtureArg) -> Fixture {
        match arg {
            FixtureArg::MinimalTest => Fixture::MinimalTest,
            FixtureArg::ContinuousTone => Fixture::ContinuousTone,
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the destination: an explicit path, or the fixture's default
/// file name in the current directory.
fn output_path(fixture: Fixture, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from(fixture.default_file_name()))
}

/// Path that routes the fixture bytes to stdout.
const STDOUT_PATH: &str = "-";

fn is_stdout(path: &Path) -> bool {
    path == Path::new(STDOUT_PATH)
}

/// Name of the destination as shown in the summary.
fn destination_label(path: &Path) -> String {
    if is_stdout(path) {
        "<stdout>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Build `fixture`, write it to `path` (or to `stdout` when `path` is '-')
/// and return the summary text.
fn run_build<W: Write>(fixture: Fixture, path: &Path, stdout: &mut W) -> Result<String> {
    let document = fixture
        .document()
        .with_context(|| format!("failed to build fixture: {}", fixture.name()))?;
    let bytes = document.to_bytes();
    debug!(
        fixture = fixture.name(),
        init = %format!("${:04X}", document.header.init_address),
        play = %format!("${:04X}", document.header.play_address),
        data_len = document.data.len(),
        "layout"
    );

    if is_stdout(path) {
        write_to(&bytes, stdout).context("failed to write fixture to stdout")?;
    } else {
        write_file(path, &bytes)
            .with_context(|| format!("failed to write fixture: {}", path.display()))?;
    }
    let destination = destination_label(path);
    info!(path = %destination, len = bytes.len(), "wrote {}", fixture.name());

    Ok(summary(&destination, &document))
}

/// Print the summary to `out`, or to `err` when `out` carries the fixture
/// bytes.
fn emit_summary<O: Write, E: Write>(
    path: &Path,
    text: &str,
    out: &mut O,
    err: &mut E,
) -> Result<()> {
    let result = if is_stdout(path) {
        write_to(text.as_bytes(), err)
    } else {
        write_to(text.as_bytes(), out)
    };
    result.context("failed to print summary")
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { fixture, output } => {
            let fixture = Fixture::from(fixture);
            let path = output_path(fixture, output);
            let text = run_build(fixture, &path, &mut io::stdout().lock())?;
            emit_summary(&path, &text, &mut io::stdout(), &mut io::stderr())?;
        }
        Commands::List => {
            println!("{}", fixture_table()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults_to_minimal_fixture() {
        let cli = Cli::try_parse_from(["nsfgen", "build"]).unwrap();
        match cli.command {
            Commands::Build { fixture, output } => {
                assert_eq!(fixture, FixtureArg::MinimalTest);
                assert_eq!(
                    output_path(fixture.into(), output),
                    PathBuf::from("minimal_test.nsf")
                );
            }
            Commands::List => panic!("expected build"),
        }
    }

    #[test]
    fn build_accepts_fixture_and_output() {
        let cli =
            Cli::try_parse_from(["nsfgen", "build", "continuous-tone", "-o", "out/tone.nsf"])
                .unwrap();
        match cli.command {
            Commands::Build { fixture, output } => {
                assert_eq!(Fixture::from(fixture), Fixture::ContinuousTone);
                assert_eq!(output, Some(PathBuf::from("out/tone.nsf")));
            }
            Commands::List => panic!("expected build"),
        }
    }

    #[test]
    fn run_build_writes_file_and_summarizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nsf").join("minimal_test.nsf");

        let mut stdout = Vec::new();
        let text = run_build(Fixture::MinimalTest, &path, &mut stdout).unwrap();

        let expected = Fixture::MinimalTest.build().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), expected);
        assert!(stdout.is_empty());
        assert!(text.starts_with(&format!("Created NSF file {}: 135 bytes", path.display())));
        assert!(text.contains("$8004:"));
    }

    #[test]
    fn run_build_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let path = blocker.join("x.nsf");
        let err = run_build(Fixture::MinimalTest, &path, &mut io::sink()).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to write fixture"));
    }

    #[test]
    fn dash_sends_bytes_to_stdout_sink() {
        let mut stdout = Vec::new();
        let text = run_build(Fixture::MinimalTest, Path::new("-"), &mut stdout).unwrap();

        assert_eq!(stdout, Fixture::MinimalTest.build().unwrap());
        assert!(!Path::new("-").exists());
        assert!(text.starts_with("Created NSF file <stdout>: 135 bytes\n"));
    }

    #[test]
    fn summary_goes_to_stderr_when_bytes_use_stdout() {
        let (mut out, mut err) = (Vec::new(), Vec::new());
        emit_summary(Path::new("-"), "summary\n", &mut out, &mut err).unwrap();
        assert!(out.is_empty());
        assert_eq!(err, b"summary\n");

        let (mut out, mut err) = (Vec::new(), Vec::new());
        emit_summary(Path::new("x.nsf"), "summary\n", &mut out, &mut err).unwrap();
        assert_eq!(out, b"summary\n");
        assert!(err.is_empty());
    }

    #[test]
    fn destination_label_names_stdout() {
        assert_eq!(destination_label(Path::new("-")), "<stdout>");
        assert_eq!(destination_label(Path::new("out/a.nsf")), "out/a.nsf");
    }
}
