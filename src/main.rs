use clap::Parser;
use riskx_api::RestApi;
use riskx_core::InferencePipeline;
use riskx_model::{load_model, LoadedModel};
use riskx_schema::FeatureSchema;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Serve predictions from a pre-trained tabular classifier
#[derive(Parser, Debug)]
#[command(name = "riskx")]
#[command(about = "An inference service for pre-trained tabular classifiers", long_about = None)]
struct Args {
    /// Path to the model artifact
    #[arg(short, long, default_value = "./model.json")]
    model_path: PathBuf,

    /// Path to a JSON array of feature names; overrides the artifact's names
    #[arg(long)]
    schema_path: Option<PathBuf>,

    /// Expected feature count when no feature names are configured
    #[arg(long, default_value_t = 27)]
    features: usize,

    /// Decimal digits kept on reported probabilities
    #[arg(long, default_value_t = 4)]
    round_digits: u32,

    /// HTTP API port
    #[arg(long, env = "PORT", default_value_t = 10000)]
    http_port: u16,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting riskX v{}", env!("CARGO_PKG_VERSION"));
    info!("Model artifact: {:?}", args.model_path);
    info!("HTTP API port: {}", args.http_port);

    // A missing or broken artifact is not fatal. The service still comes
    // up and answers every prediction with the unavailable error until a
    // valid model is shipped.
    let loaded = match load_model(&args.model_path) {
        Ok(loaded) => {
            info!("Model loaded from {:?}", args.model_path);
            Some(loaded)
        }
        Err(e) => {
            warn!("Model unavailable: {}", e);
            None
        }
    };

    let schema = resolve_schema(&args, loaded.as_ref())?;
    info!("Serving schema with {} features", schema.len());

    // A model trained on a different width than the schema would align
    // every request wrong; refuse to serve it.
    let model = match loaded {
        Some(loaded) if loaded.classifier.n_features() != schema.len() => {
            warn!(
                "Model expects {} features but the schema has {}; serving without a model",
                loaded.classifier.n_features(),
                schema.len()
            );
            None
        }
        Some(loaded) => Some(loaded.classifier),
        None => None,
    };

    let pipeline = Arc::new(InferencePipeline::new(schema, model).with_round_digits(args.round_digits));
    if pipeline.model_available() {
        info!("Pipeline ready");
    } else {
        warn!("Pipeline ready without a model");
    }

    let pipeline_http = pipeline.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(pipeline_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("riskX started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

/// Pick the serving schema. An explicit schema file wins, then the
/// feature names recorded in the artifact, then generated names for the
/// configured count.
fn resolve_schema(args: &Args, loaded: Option<&LoadedModel>) -> anyhow::Result<FeatureSchema> {
    if let Some(path) = &args.schema_path {
        let data = std::fs::read_to_string(path)?;
        let names: Vec<String> = serde_json::from_str(&data)?;
        return Ok(FeatureSchema::new(names)?);
    }

    if let Some(names) = loaded.and_then(|l| l.feature_names.as_deref()) {
        match FeatureSchema::new(names.to_vec()) {
            Ok(schema) => return Ok(schema),
            Err(e) => warn!("Ignoring artifact feature names: {}", e),
        }
    }

    Ok(FeatureSchema::indexed(args.features)?)
}
