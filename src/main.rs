use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

mod cli;

use cli::Cli;
use cli::commands::Commands;
use metaprompt::config::Config;
use metaprompt::executor::PromptExecutor;
use metaprompt::llm::GeminiClient;
use metaprompt::template::{TemplateStore, TemplateValue};

fn setup_logging(verbose: bool, level: &str) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or(level);
    let mut builder = env_logger::Builder::from_env(env);

    if verbose {
        builder.target(env_logger::Target::Stderr).init();
        return Ok(());
    }

    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("metaprompt")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("metaprompt.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    match &cli.command {
        Commands::Run { prompt, model } => handle_run_command(prompt, model.as_deref(), config).await,
        Commands::Store { name, file, dir } => handle_store_command(name, file.as_deref(), dir.as_deref(), config),
        Commands::Load { name, dir } => handle_load_command(name, dir.as_deref(), config),
        Commands::List { dir } => handle_list_command(dir.as_deref(), config),
    }
}

fn template_store(dir: Option<&Path>, config: &Config) -> TemplateStore {
    TemplateStore::new(dir.unwrap_or(config.templates.dir.as_path()))
}

async fn handle_run_command(prompt: &str, model: Option<&str>, config: &Config) -> Result<()> {
    // Credential must resolve before any prompt goes out
    let api_key = config.api_key().context("Cannot configure the model client")?;
    let client = GeminiClient::new(api_key, (&config.llm).into()).context("Failed to create model client")?;
    let executor = PromptExecutor::new(client);

    info!("Executing prompt on model '{}'", model.unwrap_or(executor.default_model()));
    match executor.execute(prompt, model).await {
        Some(text) => {
            println!("{}", text);
            Ok(())
        }
        None => bail!("No response from the model (see log for details)"),
    }
}

fn handle_store_command(name: &str, file: Option<&Path>, dir: Option<&Path>, config: &Config) -> Result<()> {
    let input = match file {
        Some(path) => fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };
    let data = TemplateValue::from_yaml_str(&input).context("Input is not a valid YAML or JSON document")?;

    let store = template_store(dir, config);
    if !store.store(&data, name) {
        bail!("Failed to store template '{}' (see log for details)", name);
    }
    println!("{} {}", "Stored:".green(), store.path_for(name).display());
    Ok(())
}

fn handle_load_command(name: &str, dir: Option<&Path>, config: &Config) -> Result<()> {
    let store = template_store(dir, config);
    match store.load(name) {
        Some(data) => {
            print!("{}", data.to_yaml_string()?);
            Ok(())
        }
        None => bail!("Template '{}' not found or unreadable in {}", name, store.dir().display()),
    }
}

fn handle_list_command(dir: Option<&Path>, config: &Config) -> Result<()> {
    let store = template_store(dir, config);
    let names = store.list()?;
    if names.is_empty() {
        println!("{} {}", "No templates in".yellow(), store.dir().display());
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; real environment variables take precedence
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging once the configured level is known
    let level = config.log_level.clone().unwrap_or_else(|| "info".to_string());
    setup_logging(cli.is_verbose(), &level).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
