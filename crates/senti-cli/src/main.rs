mod display;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use senti_ai::OnnxClassifier;
use senti_core::{ApiToken, DEFAULT_MODEL, DEFAULT_TEXTS, SentimentBackend};
use senti_hub::{DEFAULT_ENDPOINT, DEFAULT_HUB_URL, InferenceClient, ModelFetcher};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Run the model locally with ONNX Runtime.
    Local,
    /// Call the hosted inference endpoint.
    Remote,
}

/// Classify the sentiment of short texts with a pre-trained model.
#[derive(Debug, Parser)]
#[command(name = "senti", version)]
struct Args {
    /// Texts to classify. Defaults to three sample sentences.
    #[arg(value_name = "TEXT")]
    texts: Vec<String>,

    #[arg(long, value_enum, env = "SENTI_BACKEND", default_value = "local")]
    backend: Backend,

    /// Hub repository id of the classification model.
    #[arg(long, env = "SENTI_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Local model directory [default: models/<repo name>].
    #[arg(long, env = "SENTI_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// Hub access token [default: $HF_TOKEN, then $HUGGINGFACEHUB_API_TOKEN].
    #[arg(long)]
    token: Option<String>,

    /// Hosted inference base URL.
    #[arg(long, env = "SENTI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Hub base URL for model downloads.
    #[arg(long, env = "SENTI_HUB_URL", default_value = DEFAULT_HUB_URL)]
    hub_url: String,

    /// Print results as a JSON array.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn texts(&self) -> Vec<&str> {
        if self.texts.is_empty() {
            DEFAULT_TEXTS.to_vec()
        } else {
            self.texts.iter().map(String::as_str).collect()
        }
    }

    fn model_dir(&self) -> PathBuf {
        self.model_dir
            .clone()
            .unwrap_or_else(|| Path::new("models").join(repo_name(&self.model)))
    }

    /// Token from `--token`, else the first non-blank token variable.
    fn token(&self) -> anyhow::Result<Option<ApiToken>> {
        match &self.token {
            Some(raw) => Ok(Some(ApiToken::new(raw).context("invalid --token")?)),
            None => Ok(ApiToken::from_env()),
        }
    }
}

/// Last path segment of a hub repo id (`org/name` → `name`).
fn repo_name(repo: &str) -> &str {
    repo.rsplit('/').next().unwrap_or(repo)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn build_backend(
    args: &Args,
    token: Option<ApiToken>,
) -> anyhow::Result<Box<dyn SentimentBackend>> {
    match args.backend {
        Backend::Local => {
            let dir = args.model_dir();
            ModelFetcher::new(args.hub_url.clone(), token)
                .fetch(&args.model, &dir)
                .await
                .with_context(|| format!("downloading {} into {}", args.model, dir.display()))?;
            let classifier = OnnxClassifier::load(&dir).context("loading ONNX model")?;
            Ok(Box::new(classifier))
        }
        Backend::Remote => Ok(Box::new(InferenceClient::new(
            args.endpoint.clone(),
            args.model.clone(),
            token,
        ))),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();
    tracing::info!("senti v{}", env!("CARGO_PKG_VERSION"));

    let token = args.token()?;
    match &token {
        Some(t) => tracing::info!(token = %t, "using hub token"),
        None => tracing::debug!("no hub token configured"),
    }

    if !args.json {
        println!("🤖 Welcome to senti!");
        println!("Loading AI model...");
    }

    let mut backend = build_backend(&args, token).await?;
    let texts = args.texts();
    let analyses = senti_core::analyze(backend.as_mut(), &texts)
        .await
        .context("running sentiment analysis")?;

    if args.json {
        println!("{}", display::render_json(&analyses)?);
    } else {
        print!("{}", display::render_report(&analyses));
    }

    Ok(())
}
