//! CLI entrypoint for mindat-query
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use mindat_query_application::{
    GenerateParamsInput, GenerateParamsUseCase, LlmGateway, SchemaRegistry, SemanticValidator,
    ValidationPipeline,
};
use mindat_query_domain::{GenerationOutput, OutputFormat, SearchRequest};
use mindat_query_infrastructure::{ConfigLoader, FileConfig, HttpSchemaSource, OpenAiGateway};
use mindat_query_presentation::{
    Cli, ConsoleFormatter, JsonFormatter, OutputFormatter, ReportEntry, stderr_progress,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let problems = config.validate();
    if !problems.is_empty() {
        for problem in &problems {
            eprintln!("config error: {}", problem);
        }
        bail!("Invalid configuration ({} problem(s))", problems.len());
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let query = match cli.query.as_deref() {
        Some(query) => query,
        None => bail!("A search request is required. See --help for examples."),
    };
    let request = SearchRequest::try_new(query)?;

    info!("Starting mindat-query");

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiGateway::from_config(&config.provider)?);
    info!("Using model {}", gateway.model());

    let mut params = config.generation.to_generation_params();
    if let Some(repeats) = cli.repeats {
        params = params.with_repeats(repeats);
    }
    let input = GenerateParamsInput::new(request).with_params(params);

    let use_case = GenerateParamsUseCase::new(Arc::clone(&gateway));
    let outputs = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = stderr_progress();
        use_case.execute_with_progress(input, &*progress).await?
    };

    let entries = if cli.validate {
        let endpoint = cli
            .endpoint
            .clone()
            .unwrap_or_else(|| config.schema.endpoint.clone());
        let pipeline = validation_pipeline(&config, gateway, endpoint)?;
        validate_outputs(&pipeline, outputs, query).await
    } else {
        outputs.into_iter().map(ReportEntry::new).collect()
    };

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let formatter: Box<dyn OutputFormatter> = match format {
        OutputFormat::Pretty => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };

    println!("{}", formatter.format(query, &entries));

    Ok(())
}

/// Install the stderr subscriber, plus a file layer when `log_file` is set
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn validation_pipeline<G: LlmGateway + 'static>(
    config: &FileConfig,
    gateway: Arc<G>,
    endpoint: String,
) -> Result<ValidationPipeline<G>> {
    let source = HttpSchemaSource::from_config(&config.schema)?;
    let registry = Arc::new(SchemaRegistry::new(Arc::new(source)));
    let semantic = SemanticValidator::new(gateway, registry).with_endpoint(endpoint);
    Ok(ValidationPipeline::new(semantic))
}

/// Validate every successful output; failures are reported unvalidated
async fn validate_outputs<G: LlmGateway + 'static>(
    pipeline: &ValidationPipeline<G>,
    outputs: Vec<GenerationOutput>,
    query: &str,
) -> Vec<ReportEntry> {
    let mut entries = Vec::with_capacity(outputs.len());
    for output in outputs {
        let validation = match output.params() {
            Some(params) => Some(pipeline.validate(params, Some(query)).await),
            None => {
                warn!("Skipping validation of a failed generation");
                None
            }
        };
        let entry = ReportEntry::new(output);
        entries.push(match validation {
            Some(validation) => entry.with_validation(validation),
            None => entry,
        });
    }
    entries
}
