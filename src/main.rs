use std::sync::{Arc, LazyLock};

use clap::Parser;
use color_eyre::eyre::Result;
use regex::Regex;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use oxilink::application::{
    AssetResolutionService, ContentFetcher, GatewayResolver, NormalizeThumbnailUseCase,
};
use oxilink::domain::entities::{ContentRef, NormalizationResult};
use oxilink::infrastructure::{
    create_publisher, AppConfig, CliArgs, Command, HttpMirrorProber, StillFrameTranscoder,
    StorageManager,
};

/// CIDv0 (base58) or CIDv1 (base32) shape, for operator-facing diagnostics.
static CID_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Qm[1-9A-HJ-NP-Za-km-z]{44}|baf[a-z2-7]{10,})$").unwrap()
});

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

/// A CLI path starting with a scheme is an external URL; anything else is
/// treated as a raw content identifier.
fn content_ref_from_cli(path: &str, mime: &str) -> ContentRef {
    if path.starts_with("http://") || path.starts_with("https://") {
        ContentRef::external(path, mime)
    } else {
        ContentRef::raw(path, mime)
    }
}

fn build_resolver(config: &AppConfig) -> Result<Arc<GatewayResolver>> {
    // Client-level timeout is a backstop; the race applies the real
    // per-probe deadline.
    let prober = HttpMirrorProber::new(config.probe_timeout() * 2)?;

    Ok(Arc::new(GatewayResolver::new(
        config.mirror_set(),
        Arc::new(prober),
        config.probe_timeout(),
    )))
}

async fn run_resolve(config: &AppConfig, path: &str, mime: &str) -> Result<()> {
    let resolver = build_resolver(config)?;
    let service = AssetResolutionService::new(resolver, config.placeholder_url.clone());

    let content = content_ref_from_cli(path, mime);
    let url = service.resolve_for_display(&content).await;

    println!("{url}");
    Ok(())
}

async fn run_normalize(config: &AppConfig, path: &str, mime: &str) -> Result<()> {
    let token = std::env::var(config.publish.backend.token_env()).unwrap_or_default();
    let publisher = create_publisher(config.publish.backend, &token)?;

    let resolver = build_resolver(config)?;
    let fetcher = Arc::new(ContentFetcher::new(resolver));
    let transcoder = Arc::new(StillFrameTranscoder::with_ffmpeg(
        config.transcode.ffmpeg_path.clone(),
    ));

    let use_case =
        NormalizeThumbnailUseCase::new(fetcher, transcoder, publisher, config.placeholder_url.clone())
            .with_publish_retries(config.publish.retries);

    let result = use_case.execute(&content_ref_from_cli(path, mime)).await;
    match &result {
        NormalizationResult::PassThrough { .. } => {
            println!("pass-through: {}", result.effective_ref());
        }
        NormalizationResult::Normalized { .. } => {
            println!("normalized: {}", result.effective_ref());
        }
        NormalizationResult::Degraded { reason, .. } => {
            println!("degraded ({reason}): {}", result.effective_ref());
        }
    }
    Ok(())
}

async fn run_probe(config: &AppConfig, path: &str) -> Result<()> {
    if !CID_SHAPE_RE.is_match(path) {
        warn!(path = %path, "Identifier does not look like a CID");
    }

    let resolver = build_resolver(config)?;
    for result in resolver.survey(path).await {
        println!("{:<45} {}", result.endpoint.to_string(), result.outcome);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    let manager = StorageManager::new()?;
    let mut config = manager.load_config(args.config.as_deref())?;
    config.merge_with_args(&args);

    init_logging(&config)?;
    info!(version = oxilink::VERSION, "Starting oxilink");

    match &args.command {
        Command::Resolve { path, mime } => run_resolve(&config, path, mime).await,
        Command::Normalize { path, mime } => run_normalize(&config, path, mime).await,
        Command::Probe { path } => run_probe(&config, path).await,
    }
}
