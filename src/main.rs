use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lia_assistant::config::YamlAppRegistry;
use lia_assistant::skills::{HttpRateFetcher, ShellLauncher};
use lia_assistant::voice::{EspeakSpeaker, LocalTranscriber};
use lia_assistant::{Config, IntentMatcher, Router, SessionLoop, SkillSet};

/// Lía - offline Spanish voice assistant
#[derive(Parser)]
#[command(name = "lia", about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the interactive assistant (default)
    Assistant,
    /// List the applications configured for this machine
    Apps,
    /// Show the intent recognized for a phrase, without audio
    Classify {
        /// Phrase to classify
        #[arg(required = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with printed replies
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load();
    tracing::debug!(?config, "loaded configuration");

    match cli.command.unwrap_or(Command::Assistant) {
        Command::Assistant => run_assistant(&config).await,
        Command::Apps => {
            list_apps(&config);
            Ok(())
        }
        Command::Classify { text } => {
            classify(&text.join(" "));
            Ok(())
        }
    }
}

/// Start the interactive session and block until goodbye
#[allow(clippy::future_not_send)]
async fn run_assistant(config: &Config) -> anyhow::Result<()> {
    let transcriber = LocalTranscriber::new(&config.model_path, &config.voice.language)?;
    let speaker = EspeakSpeaker::new(config.voice.speech_rate, &config.voice.language).await?;

    let skills = SkillSet::new(
        Box::new(YamlAppRegistry::new(config.apps_file.clone())),
        Box::new(HttpRateFetcher::new(config.rates_url.clone())?),
        Box::new(ShellLauncher),
    );

    tracing::info!(
        max_record_seconds = config.max_record_seconds,
        voice = speaker.voice().unwrap_or("default"),
        "assistant ready"
    );

    let mut session = SessionLoop::new(
        Router::new(skills),
        transcriber,
        speaker,
        std::io::stdout(),
        config.max_record_seconds,
    );
    session.run().await?;

    Ok(())
}

/// Print the merged application registry
fn list_apps(config: &Config) {
    let registry = YamlAppRegistry::new(config.apps_file.clone());
    let mut apps: Vec<_> = registry.entries().into_iter().collect();

    if apps.is_empty() {
        println!(
            "No hay aplicaciones configuradas en {}",
            config.apps_file.display()
        );
        return;
    }

    apps.sort();
    for (name, command) in apps {
        println!("{name}: {command}");
    }
}

/// Print the intent and parameters for a phrase
fn classify(text: &str) {
    let recognized = IntentMatcher::new().classify(text);
    let mut params: Vec<_> = recognized.parameters.iter().collect();
    params.sort();

    let params = params
        .into_iter()
        .map(|(k, v)| format!(" {k}={v}"))
        .collect::<String>();
    println!("{}{params}", recognized.intent);
}
