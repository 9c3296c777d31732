use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use smartman::application::errors::{ConfigError, Result, SmartmanError};
use smartman::application::interactive::{Dispatch, Dispatcher, LineParser, Reply, USAGE};
use smartman::application::services::LLMInterface;
use smartman::infrastructure::adapters::ConsoleAdapter;
use smartman::infrastructure::alias::{self, AliasOutcome};
use smartman::infrastructure::config::{self, Config};
use smartman::infrastructure::credentials::CredentialResolver;
use smartman::infrastructure::docs::ManRetriever;

#[derive(Parser)]
#[command(name = "smartman")]
#[command(about = "Generate man page summaries, usage examples and commands with LLMs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: ~/.smartman/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// API key (overrides environment and config)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Provider: openai, anthropic or custom
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Model name (default depends on the provider)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Skip the response cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a summary for a given command
    Summary { command_name: String },
    /// Show usage examples for a given command
    Example { command_name: String },
    /// Generate a command based on your intent
    Generate {
        #[arg(required = true, num_args = 1..)]
        intent: Vec<String>,
    },
    /// Start an interactive session
    Interactive,
    /// Add the 'llm-man' alias to your shell profile
    SetupAlias,
    /// Print a default config file
    InitConfig,
    /// Show version
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();

    let console = ConsoleAdapter::new();
    match run(cli, &console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            console.error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, console: &ConsoleAdapter) -> Result<()> {
    check_first_run(console);

    match &cli.command {
        Commands::Summary { command_name } => {
            let llm = build_llm(&cli)?;
            let dispatcher = Dispatcher::new(&llm, ManRetriever::new());
            console.status(&format!("Retrieving documentation for {}...", command_name));
            console.status("Generating summary...");
            show(console, &dispatcher.summary(command_name)?);
        }
        Commands::Example { command_name } => {
            let llm = build_llm(&cli)?;
            let dispatcher = Dispatcher::new(&llm, ManRetriever::new());
            console.status(&format!("Retrieving documentation for {}...", command_name));
            console.status("Generating examples...");
            show(console, &dispatcher.examples(command_name)?);
        }
        Commands::Generate { intent } => {
            let llm = build_llm(&cli)?;
            let dispatcher = Dispatcher::new(&llm, ManRetriever::new());
            let intent = intent.join(" ");
            console.status(&format!("Generating command for: {}", intent));
            show(console, &dispatcher.generate(&intent)?);
        }
        Commands::Interactive => {
            let llm = build_llm(&cli)?;
            run_interactive(console, &llm);
        }
        Commands::SetupAlias => setup_alias(console)?,
        Commands::InitConfig => init_config()?,
        Commands::Version => {
            println!("smartman v{}", env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}

fn build_llm(cli: &Cli) -> Result<LLMInterface> {
    let path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut config = Config::load_or_default(&path)?;
    if cli.no_cache {
        config.cache.enabled = false;
    }

    let resolution = CredentialResolver::from_env(config.clone()).resolve(
        cli.api_key.as_deref(),
        cli.provider.as_deref(),
        cli.model.as_deref(),
    )?;
    LLMInterface::from_resolution(&resolution, &config)
}

fn show(console: &ConsoleAdapter, reply: &Reply) {
    if let Some(source) = reply.source {
        console.source_notice(source);
    }
    console.reply(reply);
}

fn run_interactive(console: &ConsoleAdapter, llm: &LLMInterface) {
    let dispatcher = Dispatcher::new(llm, ManRetriever::new());
    console.message("Smartman Interactive Mode", "Type 'exit' to quit.");

    while let Some(line) = console.read_line("> ") {
        match dispatcher.dispatch(LineParser::parse(&line)) {
            Ok(Dispatch::Reply(reply)) => show(console, &reply),
            Ok(Dispatch::Usage) => console.error(&format!("Unknown command. {}", USAGE)),
            Ok(Dispatch::Nothing) => {}
            Ok(Dispatch::Exit) => break,
            Err(e) => console.error(&e),
        }
    }
}

/// Show the welcome message once per user
fn check_first_run(console: &ConsoleAdapter) {
    let flag = config::first_run_flag();
    if flag.exists() {
        return;
    }

    console.message(
        "Welcome to Smartman!",
        "For a shorter command, run: smartman setup-alias\n\
         This will add an alias called 'llm-man' to your shell profile.",
    );

    let written = flag
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::write(&flag, "First run completed"));
    if let Err(e) = written {
        tracing::debug!("Could not write {}: {}", flag.display(), e);
    }
}

fn setup_alias(console: &ConsoleAdapter) -> Result<()> {
    let home = dirs::home_dir().ok_or_else(|| {
        SmartmanError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        ))
    })?;

    match alias::install_alias(&home)? {
        AliasOutcome::AlreadyPresent(profile) => {
            console.status(&format!("Alias '{}' already exists in {}", alias::ALIAS_NAME, profile.display()));
        }
        AliasOutcome::Added(profile) => {
            console.status(&format!("Alias '{}' added to {}", alias::ALIAS_NAME, profile.display()));
            console.status(&format!("Run `source {}` to load the alias in your current session.", profile.display()));
            console.message(
                "SmartMan Usage",
                "llm-man summary ls\n\
                 llm-man example grep\n\
                 llm-man generate \"find all pdf files\"\n\
                 llm-man interactive",
            );
        }
    }
    Ok(())
}

fn init_config() -> Result<()> {
    let yaml = serde_yaml::to_string(&Config::default())
        .map_err(|e| ConfigError::Parse(e.to_string()))?;
    println!("{}", yaml);
    eprintln!(
        "\nSave this to {} and adjust as needed.",
        config::default_config_path().display()
    );
    Ok(())
}
