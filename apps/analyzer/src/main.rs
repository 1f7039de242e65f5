use analyzer::{
    application::{
        analyze_color::use_case::AnalyzeColorUseCase,
        analyze_image::{dto::AnalyzeImageRequest, use_case::AnalyzeImageUseCase},
        detect_text::use_case::DetectTextUseCase,
    },
    config::Config,
    domain::{analysis::entity::AnalysisType, text::value_objects::BusinessType},
    infrastructure::{
        ml::{OcrEngines, init_engines},
        storage::{ImageSource, LocalImageStore},
    },
    workers::BatchAnalyzer,
};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::sync::Arc;

/// Color and text analysis for business photos.
#[derive(Debug, Parser)]
#[command(name = "analyzer", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Upload identifiers or image paths
    images: Vec<String>,

    /// Analyses to run
    #[arg(long, value_delimiter = ',', default_value = "color,text")]
    types: Vec<AnalysisType>,

    /// Business category used for text scoring
    #[arg(long)]
    business_type: Option<String>,

    /// Number of dominant colors
    #[arg(long)]
    colors: Option<usize>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List supported business and analysis types
    Catalogue,

    /// Score detected text for a business category
    Quality {
        image: String,

        #[arg(long)]
        business_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Uses RUST_LOG if set, otherwise uses sensible defaults
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info,analyzer=debug"))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // Reports go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(Command::Catalogue) = cli.command {
        print_catalogue()?;
        return Ok(());
    }

    let config = Config::from_env()?;
    let engines = init_engines(&config);

    let result = run(cli, &config, Arc::clone(&engines)).await;

    engines.shutdown();
    result
}

async fn run(cli: Cli, config: &Config, engines: Arc<OcrEngines>) -> anyhow::Result<()> {
    let source = Arc::new(LocalImageStore::new(
        &config.upload_dir,
        config.allowed_image_extensions.clone(),
    ));
    let color = AnalyzeColorUseCase::new(config.default_dominant_colors);
    let text = DetectTextUseCase::new(engines);

    if let Some(Command::Quality {
        image,
        business_type,
    }) = cli.command
    {
        let path = source.resolve(&image).await?;
        let business_type = BusinessType::from(business_type.as_deref());
        let assessments = text.assess_quality(&path, business_type).await?;
        println!("{}", serde_json::to_string_pretty(&assessments)?);
        return Ok(());
    }

    if cli.images.is_empty() {
        anyhow::bail!("no images given; pass identifiers or paths, or use `catalogue`");
    }

    let use_case = AnalyzeImageUseCase::new(source, color, text, config.analysis_timeout());
    let batch = BatchAnalyzer::new(Arc::new(use_case), config.max_concurrent_analyses);

    let requests: Vec<AnalyzeImageRequest> = cli
        .images
        .iter()
        .map(|id| AnalyzeImageRequest {
            image_id: id.clone(),
            analysis_types: cli.types.clone(),
            business_type: cli.business_type.clone(),
            n_colors: cli.colors,
        })
        .collect();

    let outcomes = batch.run(requests).await;
    let mut failed = 0;
    let rendered: Vec<serde_json::Value> = cli
        .images
        .iter()
        .zip(outcomes)
        .map(|(id, outcome)| match outcome {
            Ok(report) => serde_json::to_value(report)
                .unwrap_or_else(|e| json!({ "id": id, "error": e.to_string() })),
            Err(e) => {
                failed += 1;
                json!({ "id": id, "error": e.to_string(), "not_found": e.is_not_found() })
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rendered)?);
    if failed > 0 {
        anyhow::bail!("{} of {} analyses failed", failed, rendered.len());
    }
    Ok(())
}

fn print_catalogue() -> anyhow::Result<()> {
    let business_types: Vec<_> = BusinessType::catalogue()
        .into_iter()
        .map(|(name, description)| json!({ "name": name, "description": description }))
        .collect();
    let analysis_types: Vec<_> = AnalysisType::catalogue()
        .into_iter()
        .map(|(name, description)| json!({ "name": name, "description": description }))
        .collect();

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "business_types": business_types,
            "analysis_types": analysis_types,
        }))?
    );
    Ok(())
}
