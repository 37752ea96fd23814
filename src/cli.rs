use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

pub mod commands;

use crate::config::AppConfig;
use crate::handlers::details::DetailsRequest;
use commands::{details, predict, report, serve};

#[derive(Parser)]
#[command(name = "salesdash")]
#[command(about = "Sales analytics dashboard: API server and report tools")]
#[command(version)]
pub struct Cli {
    /// Directory with fixture files replacing the embedded ones
    #[arg(long, global = true, env = "SALESDASH_FIXTURES_DIR")]
    pub fixtures_dir: Option<PathBuf>,

    /// Base URL of the detail table and budget predictor service
    #[arg(long, global = true, env = "SALESDASH_REMOTE_BASE_URL")]
    pub remote_base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Dashboard page printed by `report`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportPage {
    Yearly,
    Climate,
    Monthly,
    Categories,
    Taxonomy,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "SALESDASH_BIND_ADDRESS")]
        bind_address: Option<String>,
    },
    /// Print a dashboard page as JSON
    ///
    /// `climate` takes --year and --month, `monthly` takes --month.
    Report {
        #[arg(value_enum)]
        page: ReportPage,

        #[arg(short, long)]
        year: Option<i32>,

        /// Month of the year (1-12)
        #[arg(short, long)]
        month: Option<u32>,
    },
    /// Fetch one page of the product details table
    Details {
        #[arg(long)]
        category: String,

        #[arg(long)]
        sub_category: String,

        #[arg(long)]
        vertical: Option<String>,

        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,

        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        end_date: NaiveDate,

        /// Case-insensitive FSN id filter
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page: 5, 10, 15 or 20
        #[arg(long, default_value_t = 10)]
        per_page: usize,
    },
    /// Predict the media budget split of a month and allocate an amount
    Predict {
        /// Month of the year (1-12)
        #[arg(short, long)]
        month: u32,

        /// Holiday date (YYYY-MM-DD), repeatable
        #[arg(long = "holiday")]
        holidays: Vec<NaiveDate>,

        /// Sale day date (YYYY-MM-DD), repeatable
        #[arg(long = "sale-day")]
        sale_days: Vec<NaiveDate>,

        /// Budget to distribute, 1000-100000 in steps of 100
        #[arg(short, long, default_value = "10000")]
        amount: Decimal,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = AppConfig::load()?;
        if let Some(dir) = self.fixtures_dir {
            config.fixtures_dir = Some(dir);
        }
        if let Some(url) = self.remote_base_url {
            config.remote_base_url = url;
        }

        match self.command {
            Commands::Serve { bind_address } => {
                if let Some(bind_address) = bind_address {
                    config.bind_address = bind_address;
                }
                serve(&config).await?;
            }
            Commands::Report { page, year, month } => {
                report(&config, page, year, month)?;
            }
            Commands::Details {
                category,
                sub_category,
                vertical,
                start_date,
                end_date,
                search,
                page,
                per_page,
            } => {
                let request = DetailsRequest {
                    category,
                    sub_category,
                    vertical,
                    start_date,
                    end_date,
                    search,
                    page,
                    per_page,
                };
                details(&config, &request).await?;
            }
            Commands::Predict {
                month,
                holidays,
                sale_days,
                amount,
            } => {
                predict(&config, month, &holidays, &sale_days, amount).await?;
            }
        }
        Ok(())
    }
}
