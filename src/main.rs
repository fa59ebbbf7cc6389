mod cli;

use cli::Args;
use owo_colors::OwoColorize;
use sbom_decompose::adapters::outbound::console::{QuietProgressReporter, StderrProgressReporter};
use sbom_decompose::adapters::outbound::filesystem::FileSystemReader;
use sbom_decompose::application::dto::{DecomposeRequest, DecomposeResponse};
use sbom_decompose::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use sbom_decompose::application::read_models::DecompositionReadModelBuilder;
use sbom_decompose::application::use_cases::DecomposeSbomUseCase;
use sbom_decompose::config::{self, Settings};
use sbom_decompose::ports::outbound::ProgressReporter;
use sbom_decompose::shared::error::{ExitCode, SbomError};
use sbom_decompose::shared::Result;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // clap exits with code 2 on its own for malformed arguments
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n{}\n", "❌ An error occurred:".red().bold());
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            process::exit(exit_code_for(&e).as_i32());
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    let file_config = config::load_for_input(args.config.as_deref(), &args.input)?;
    let settings = Settings::resolve(&args.overrides(), file_config.as_ref())?;
    tracing::debug!(?settings, "resolved settings");

    let request = DecomposeRequest::new(args.input.clone(), settings.options);
    let response = if args.quiet {
        decompose(QuietProgressReporter, request)?
    } else {
        decompose(StderrProgressReporter::new(), request)?
    };

    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
    }

    let read_model = DecompositionReadModelBuilder::build(&response);
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&read_model)?;

    let presenter = PresenterFactory::create(PresenterType::from(args.output));
    presenter.present(&formatted_output)?;

    if settings.fail_on_vulnerable && response.has_exposure() {
        if !args.quiet {
            eprintln!(
                "{}",
                format!(
                    "⚠️  Transitive vulnerabilities at or above {:.1} found, failing as requested",
                    settings.options.min_transitive_severity
                )
                .yellow()
            );
        }
        return Ok(ExitCode::VulnerabilitiesDetected);
    }

    Ok(ExitCode::Success)
}

/// Creates the use case with injected adapters and runs it
fn decompose<P: ProgressReporter>(
    progress_reporter: P,
    request: DecomposeRequest,
) -> Result<DecomposeResponse> {
    let use_case = DecomposeSbomUseCase::new(FileSystemReader::new(), progress_reporter);
    use_case.execute(request)
}

/// Option validation failures count as bad arguments, everything else as an application error.
fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<SbomError>() {
        Some(SbomError::Validation { .. }) => ExitCode::InvalidArguments,
        _ => ExitCode::ApplicationError,
    }
}
