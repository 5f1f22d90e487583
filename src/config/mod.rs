pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_STORE_PATH: &str = "users.txt";
pub const DEFAULT_SALON_NAME: &str = "Salon Management System";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "salon-desk")]
#[command(about = "A small salon management tool for appointments, payments and loyalty points")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the user store path
    #[arg(long)]
    pub store: Option<String>,

    /// Override the salon display name
    #[arg(long)]
    pub salon_name: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn store_path(&self) -> &str {
        self.store.as_deref().unwrap_or(DEFAULT_STORE_PATH)
    }

    fn salon_name(&self) -> &str {
        self.salon_name.as_deref().unwrap_or(DEFAULT_SALON_NAME)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("store", self.store_path())?;
        validation::validate_non_empty_string("salon_name", self.salon_name())
    }
}
