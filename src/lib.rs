pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::store::{FileUserStore, MemoryUserStore};
pub use crate::app::menu::Menu;
pub use crate::config::CliConfig;
pub use crate::core::salon::Salon;
pub use crate::utils::error::{Result, SalonError};
