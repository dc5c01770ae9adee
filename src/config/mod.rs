pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CharacterFilters, CliConfig, Command, OutputFormat};

#[cfg(feature = "cli")]
mod cli {
    use super::toml_config::ClientConfig;
    use crate::domain::model::ApiQuery;
    use crate::utils::error::Result;
    use clap::{Args, Parser, Subcommand, ValueEnum};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "rnm")]
    #[command(about = "Query the Rick and Morty API as typed records")]
    pub struct CliConfig {
        #[arg(long, help = "Path to a TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, help = "Override the API base URL")]
        pub base_url: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Fetch a single character
        Character { id: u32 },
        /// Search characters, one page per call
        Characters {
            #[command(flatten)]
            filters: CharacterFilters,
            #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
            format: OutputFormat,
        },
        /// Fetch a single episode
        Episode { id: u32 },
        /// Fetch a single location
        Location { id: u32 },
        /// Classify a saved API payload
        Parse { file: PathBuf },
    }

    #[derive(Debug, Clone, Default, Args)]
    pub struct CharacterFilters {
        #[arg(long)]
        pub name: Option<String>,
        #[arg(long)]
        pub status: Option<String>,
        #[arg(long)]
        pub species: Option<String>,
        #[arg(long = "type")]
        pub kind: Option<String>,
        #[arg(long)]
        pub gender: Option<String>,
        #[arg(long)]
        pub page: Option<u32>,
    }

    impl CharacterFilters {
        pub fn to_query(&self) -> Result<ApiQuery> {
            let text = |value: &Option<String>| value.clone().unwrap_or_default();
            ApiQuery::from_inputs([
                ("name", text(&self.name)),
                ("status", text(&self.status)),
                ("species", text(&self.species)),
                ("type", text(&self.kind)),
                ("gender", text(&self.gender)),
                ("page", self.page.map(|p| p.to_string()).unwrap_or_default()),
            ])
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        Json,
        Csv,
    }

    impl CliConfig {
        /// File configuration (or defaults) with command-line overrides applied.
        pub fn client_config(&self) -> Result<ClientConfig> {
            let config = match &self.config {
                Some(path) => ClientConfig::from_file(path)?,
                None => ClientConfig::default(),
            };
            Ok(match &self.base_url {
                Some(base_url) => config.with_base_url(base_url.clone()),
                None => config,
            })
        }
    }

}
