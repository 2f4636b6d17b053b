use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app_system::{ConfigError, DeskConfig};
use crate::domain::OrderStatus;

#[derive(Debug, Parser)]
#[command(name = "order-desk", version, about = "Restaurant order desk over shared JSON files")]
pub struct Cli {
    /// Directory holding menu.json, orders.json and feedback.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON config file; --data-dir overrides its data_dir
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the menu by category
    Menu,
    /// Place an order; repeat --item to order more than one
    Order {
        #[arg(long, default_value = "")]
        table: String,
        #[arg(long = "item")]
        items: Vec<String>,
    },
    /// Show an order's status
    Track {
        order_id: String,
        /// Keep following the order until it is finished
        #[arg(long)]
        watch: bool,
    },
    /// Leave feedback about your visit
    Feedback {
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        #[arg(long, default_value = "")]
        comments: String,
    },
    /// Kitchen and front-of-house commands
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Print every order, newest first
    List,
    /// Set an order's status (Pending, Preparing, Served, Completed, Cancelled)
    SetStatus {
        order_id: String,
        status: OrderStatus,
    },
    /// Move an order one step along Pending, Preparing, Served, Completed
    Advance { order_id: String },
    /// Delete all completed orders
    Purge,
    /// Re-print the board on every refresh
    Watch,
}

impl Cli {
    /// Defaults, then the config file, then command-line overrides.
    pub fn desk_config(&self) -> Result<DeskConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DeskConfig::from_file(path)?,
            None => DeskConfig::default(),
        };
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        Ok(config)
    }
}
