use clap::Parser;
use rnm_explorer::config::{Command, OutputFormat};
use rnm_explorer::core::export::characters_to_csv;
use rnm_explorer::core::RnmApi;
use rnm_explorer::utils::error::ErrorSeverity;
use rnm_explorer::utils::{logger, validation::Validate};
use rnm_explorer::{parse_response, CliConfig, ClientConfig, HttpRnmApi, RnmError};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.client_config() {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    let level = config.logging.level.as_deref();
    if cli.log_json || config.logging.json {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(e);
    }

    if let Err(e) = run(&cli.command, &config).await {
        exit_with(e);
    }
    Ok(())
}

async fn run(command: &Command, config: &ClientConfig) -> rnm_explorer::Result<()> {
    if let Command::Parse { file } = command {
        let payload = std::fs::read_to_string(file)?;
        let response = parse_response(&payload)?;
        tracing::info!("📄 {} is a {} payload", file.display(), response.kind());
        return print_json(&response);
    }

    let api = HttpRnmApi::new(config)?;
    tracing::info!("Using API at {}", api.base_url());

    match command {
        Command::Character { id } => print_json(&api.character(*id).await?),
        Command::Episode { id } => print_json(&api.episode(*id).await?),
        Command::Location { id } => print_json(&api.location(*id).await?),
        Command::Characters { filters, format } => {
            let query = filters.to_query()?;
            let page = api.characters(&query).await?;
            tracing::info!(
                "Fetched {} of {} characters ({} pages)",
                page.results.len(),
                page.info.count,
                page.info.pages
            );
            match format {
                OutputFormat::Json => print_json(&page),
                OutputFormat::Csv => {
                    print!("{}", characters_to_csv(&page.results)?);
                    Ok(())
                }
            }
        }
        Command::Parse { .. } => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> rnm_explorer::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_with(e: RnmError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

