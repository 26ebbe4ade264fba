//! AI Translator CLI - Command line tool for translating text with hosted LLMs.

use ai_translator_core::{
    AppConfig, Dispatcher, Lang, Outcome, ProviderCredentials, ProviderId, TranslationRequest,
};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "ai-translate")]
#[command(author, version, about = "Translate text with hosted language models", long_about = None)]
struct Args {
    /// Text to translate (reads stdin when omitted)
    text: Option<String>,

    /// Source language code (default from config, otherwise "en")
    #[arg(short = 's', long)]
    source: Option<String>,

    /// Target language code (default from config, otherwise "es")
    #[arg(short = 't', long)]
    target: Option<String>,

    /// Provider to use: google, openai, anthropic, groq or mock
    #[arg(short, long, env = "AI_TRANSLATOR_PROVIDER")]
    provider: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List available providers in fallback order and exit
    #[arg(long)]
    list_providers: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Reject input the dispatcher should never see.
fn validate_input(text: &str, source: &Lang, target: &Lang) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Please enter some text to translate.");
    }
    if source == target {
        anyhow::bail!("Please select different source and target languages.");
    }
    Ok(())
}

/// Resolve `--provider`. Unknown names fall back to the default selection.
fn parse_provider(name: Option<&str>) -> Option<ProviderId> {
    let name = name?;
    let parsed = ProviderId::parse(name);
    if parsed.is_none() {
        warn!("Unknown provider '{}', using default selection", name);
    }
    parsed
}

fn read_text(arg: Option<String>) -> Result<String> {
    if let Some(text) = arg {
        return Ok(text);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read text from stdin")?;
    Ok(buf)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load or create config
    let config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };

    let credentials = ProviderCredentials::from_env();
    let dispatcher =
        Dispatcher::from_config(&config, &credentials).context("Failed to initialize providers")?;

    if args.list_providers {
        // CLI output is intentional
        #[allow(clippy::print_stdout)]
        {
            for descriptor in dispatcher.registry().available_descriptors() {
                println!(
                    "{:<10} {:<18} {}",
                    descriptor.id.as_str(),
                    descriptor.display_name,
                    descriptor.model_id
                );
            }
        }
        return Ok(());
    }

    let source = args.source.map_or_else(|| config.source_lang.clone(), Lang::new);
    let target = args.target.map_or_else(|| config.target_lang.clone(), Lang::new);
    let text = read_text(args.text)?;
    validate_input(&text, &source, &target)?;

    let requested = parse_provider(args.provider.as_deref());
    let selected = dispatcher.select_provider(requested);
    info!(
        "Translating {} -> {} with {}",
        source.display_name(),
        target.display_name(),
        selected
    );

    let spinner = ProgressBar::new_spinner();
    // Template is hardcoded and valid, unwrap is safe
    #[allow(clippy::unwrap_used)]
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}").unwrap());
    spinner.set_message(format!("Translating with {}", selected.display_name()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let request = TranslationRequest {
        text: text.trim_end_matches('\n').to_string(),
        source_lang: source,
        target_lang: target,
        requested_provider: requested,
    };
    let result = dispatcher.translate(&request).await;
    spinner.finish_and_clear();
    let result = result.context("Translation failed")?;

    if result.outcome == Outcome::Fallback {
        warn!("{} failed, answered by {}", selected, result.provider_name);
    }
    info!("Translated using {} ({})", result.provider_name, result.model_id);

    // CLI output is intentional
    #[allow(clippy::print_stdout)]
    {
        println!("{}", result.translated_text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_blank_text() {
        let err = validate_input("  \n", &Lang::new("en"), &Lang::new("es")).unwrap_err();
        assert!(err.to_string().contains("enter some text"));
    }

    #[test]
    fn test_validate_rejects_same_language() {
        let err = validate_input("Hello", &Lang::new("en"), &Lang::new("en")).unwrap_err();
        assert!(err.to_string().contains("different source and target"));
    }

    #[test]
    fn test_validate_accepts_normal_input() {
        assert!(validate_input("Hello", &Lang::new("en"), &Lang::new("fr")).is_ok());
    }

    #[test]
    fn test_parse_provider() {
        assert_eq!(parse_provider(Some("groq")), Some(ProviderId::Groq));
        assert_eq!(parse_provider(Some("bing")), None);
        assert_eq!(parse_provider(None), None);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "ai-translate",
            "Hello",
            "-s",
            "en",
            "-t",
            "fr",
            "-p",
            "mock",
        ])
        .unwrap();
        assert_eq!(args.text.as_deref(), Some("Hello"));
        assert_eq!(args.target.as_deref(), Some("fr"));
        assert_eq!(args.provider.as_deref(), Some("mock"));
        assert!(!args.list_providers);
    }
}
