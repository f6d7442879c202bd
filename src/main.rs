use anyhow::Context;
use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use clap::Parser;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use anki_tts::cli::{Cli, Command};
use anki_tts::controllers::enrich::EnrichController;
use anki_tts::domain::enrichment::{EnrichmentService, EnrichmentSettings};
use anki_tts::domain::tts::TtsProvider;
use anki_tts::error::AppError;
use anki_tts::infrastructure::anki::AnkiConnectClient;
use anki_tts::infrastructure::config::{Config, LogFormat};
use anki_tts::infrastructure::repositories::{
    AnkiCardRepository, AudioFileRepository, OpenAiTtsRepository, PollyTtsRepository,
    TtsRepository,
};
use anki_tts::render_html;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Render { markup }) = &cli.command {
        let markup = match markup {
            Some(markup) => markup.clone(),
            None => {
                let mut buffer = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buffer)
                    .await
                    .context("failed to read markup from stdin")?;
                buffer
            }
        };
        println!("{}", render_html(&markup));
        return Ok(());
    }

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => exit_with(AppError::Config(e.to_string())),
    };
    cli.apply(&mut config);

    init_logging(&config);

    tracing::info!(
        anki_connect_url = %config.anki_connect_url,
        query = %config.card_query,
        provider = %config.tts_provider,
        max_cards = config.max_cards,
        max_concurrent = config.max_concurrent,
        "Starting anki-tts"
    );

    let tts_repo = match build_tts_repository(&config).await {
        Ok(repo) => repo,
        Err(e) => exit_with(e),
    };

    let anki_client = Arc::new(AnkiConnectClient::new(
        config.anki_connect_url.clone(),
        config.retry_policy(),
    ));
    let card_repo = Arc::new(AnkiCardRepository::new(anki_client));
    let audio_repo = Arc::new(AudioFileRepository::new(config.assets_dir.clone()));

    let service = Arc::new(EnrichmentService::new(
        card_repo,
        tts_repo,
        audio_repo,
        EnrichmentSettings {
            query: config.card_query.clone(),
            front_field: config.front_field.clone(),
            max_cards: config.max_cards,
            max_concurrent: config.max_concurrent,
            voice: config.tts_voice.clone(),
        },
    ));
    let controller = EnrichController::new(service);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    match controller.run(cli.run_options(), stdin, &mut stdout).await {
        Ok(report) => {
            tracing::debug!(report = ?report, "Run finished");
            Ok(())
        }
        Err(e) => {
            match &e {
                AppError::Anki(anki) => {
                    tracing::error!(error = %e, root_cause = %anki.root(), "Run failed")
                }
                _ => tracing::error!(error = %e, "Run failed"),
            }
            exit_with(e)
        }
    }
}

fn exit_with(error: AppError) -> ! {
    eprintln!("\nError adding audio to Anki cards: {}", error);
    std::process::exit(error.exit_code());
}

async fn build_tts_repository(config: &Config) -> Result<Arc<dyn TtsRepository>, AppError> {
    match config.tts_provider {
        TtsProvider::OpenAi => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                AppError::Config("OPENAI_API_KEY environment variable is not set".to_string())
            })?;
            let client = OpenAiClient::with_config(OpenAIConfig::new().with_api_key(api_key));
            tracing::info!(model = %config.openai_tts_model, "OpenAI TTS client initialized");

            Ok(Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_tts_model.clone(),
            )))
        }
        TtsProvider::Polly => {
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS Polly client initialized");

            Ok(Arc::new(PollyTtsRepository::new(Arc::new(
                aws_sdk_polly::Client::new(&aws_config),
            ))))
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "anki_tts=info".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
