//! Tally CLI
//!
//! Command-line client for a running Tally API server:
//! - Add employees and clear the roster
//! - Show the roster, ranking and statistics
//! - Import employees from CSV, export the ranking
//! - Check status and generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;

use tally::api::dto::{
    AddEmployeeRequest, AddEmployeeResponse, BatchAddRequest, BatchAddResponse,
    EmployeeListResponse, HealthResponse,
};
use tally::api::error::ErrorResponse;
use tally::integrations::{import_employees_csv, ExportFormat};
use tally::presentation::{
    render_summary, render_table, Confirm, DashboardView, PromptConfirm, TerminalChart,
    CLEAR_PROMPT,
};
use tally::roster::{EmployeeInput, RosterSnapshot};

/// Employees sent per batch request during import
const IMPORT_CHUNK: usize = 500;

#[derive(Parser)]
#[command(name = "tally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sales commission dashboard client")]
#[command(long_about = "Tally tracks employee sales, derives commissions and ranks performance.\nThis client talks to a running tally-api server.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8082", global = true)]
    pub api_url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an employee
    Add {
        /// Employee name
        name: String,
        /// Sales amount (thousands separators allowed)
        sales: String,
    },

    /// List employees in the order they were added
    List,

    /// Show the ranked view and chart
    Ranking,

    /// Show summary statistics
    Stats,

    /// Remove every employee
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Import employees from a CSV file with name and sales columns
    Import {
        /// Path to CSV file
        path: PathBuf,
        /// Validate only, send nothing to the server
        #[arg(long)]
        dry_run: bool,
    },

    /// Export the ranked view
    Export {
        /// File format (csv, json)
        #[arg(long = "as", default_value = "csv")]
        file_format: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let api = |path: &str| format!("{}{}", cli.api_url.trim_end_matches('/'), path);

    match cli.command {
        Commands::Add { name, sales } => {
            let input = EmployeeInput::parse(&name, &sales)?;
            let request = AddEmployeeRequest {
                name: input.name,
                sales: input.sales,
            };

            let response = client
                .post(api("/api/v1/employees"))
                .json(&request)
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let added: AddEmployeeResponse = check(response).await?.json().await?;

            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&added.snapshot)?);
            } else {
                let commission = added
                    .snapshot
                    .ranked
                    .iter()
                    .rev()
                    .find(|e| e.name == request.name && e.sales == request.sales)
                    .map(|e| e.commission)
                    .unwrap_or_default();
                println!(
                    "Added {} (sales {}, commission {})",
                    request.name, request.sales, commission
                );
                println!("Employees on roster: {}", added.snapshot.stats.total_employees);
            }
        }

        Commands::List => {
            let response = client
                .get(api("/api/v1/employees"))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let list: EmployeeListResponse = check(response).await?.json().await?;

            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else if list.employees.is_empty() {
                println!("No employees yet.");
                println!();
                println!("Add one with:");
                println!("  tally-cli add \"Arun\" 60000");
            } else {
                println!("{:<4} {:<24} {:>14} {:>14}", "#", "Name", "Sales", "Commission");
                println!("{}", "-".repeat(59));
                for (i, employee) in list.employees.iter().enumerate() {
                    println!(
                        "{:<4} {:<24} {:>14} {:>14}",
                        i + 1,
                        employee.name,
                        employee.sales,
                        employee.commission
                    );
                }
                println!();
                println!(
                    "Commission: {:.0}% of sales above {}",
                    list.policy.rate * 100.0,
                    list.policy.threshold
                );
            }
        }

        Commands::Ranking => {
            if cli.format == OutputFormat::Json {
                let response = client
                    .get(api("/api/v1/ranking"))
                    .send()
                    .await
                    .with_context(|| connect_hint(&cli.api_url))?;
                let ranked: serde_json::Value = check(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            } else {
                let view = fetch_dashboard(&client, &api("/api/v1/dashboard"), &cli.api_url).await?;
                print!("{}", render_table(&view.table));
                if let Some(chart) = &view.chart {
                    println!();
                    print!("{}", TerminalChart::draw(chart, 40).render());
                }
            }
        }

        Commands::Stats => {
            if cli.format == OutputFormat::Json {
                let response = client
                    .get(api("/api/v1/stats"))
                    .send()
                    .await
                    .with_context(|| connect_hint(&cli.api_url))?;
                let stats: serde_json::Value = check(response).await?.json().await?;
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let view = fetch_dashboard(&client, &api("/api/v1/dashboard"), &cli.api_url).await?;
                print!("{}", render_summary(&view.summary));
            }
        }

        Commands::Clear { yes } => {
            if !yes {
                let stdin = io::stdin();
                let mut prompt = PromptConfirm::new(stdin.lock(), io::stderr());
                if !prompt.confirm(CLEAR_PROMPT) {
                    println!("Cancelled, nothing was removed.");
                    return Ok(());
                }
            }

            let response = client
                .delete(api("/api/v1/employees?confirm=true"))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let snapshot: RosterSnapshot = check(response).await?.json().await?;

            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                println!("All employee data cleared.");
            }
        }

        Commands::Import { path, dry_run } => {
            if !path.exists() {
                bail!("File not found: {}", path.display());
            }

            let result = import_employees_csv(&path)?;

            println!("Import results:");
            println!("  Valid rows: {}", result.employees.len());
            println!("  Rows failed: {}", result.rows_failed);

            if !result.errors.is_empty() {
                println!();
                println!("Errors (first 10):");
                for error in result.errors.iter().take(10) {
                    println!("  {}", error);
                }
            }

            if dry_run {
                println!();
                println!("(Dry run - no data was imported)");
            } else if !result.employees.is_empty() {
                println!();
                println!("Importing employees...");

                let mut accepted = 0;
                let mut rejected = 0;

                for chunk in result.employees.chunks(IMPORT_CHUNK) {
                    let request = BatchAddRequest {
                        employees: chunk
                            .iter()
                            .map(|e| AddEmployeeRequest {
                                name: e.name.clone(),
                                sales: e.sales,
                            })
                            .collect(),
                    };

                    let response = client
                        .post(api("/api/v1/employees/batch"))
                        .json(&request)
                        .send()
                        .await
                        .with_context(|| connect_hint(&cli.api_url))?;

                    // 207 and 400 still carry a batch report
                    let batch: BatchAddResponse = response.json().await?;
                    accepted += batch.accepted;
                    rejected += batch.rejected;
                }

                println!("  Imported: {}", accepted);
                if rejected > 0 {
                    println!("  Rejected by server: {}", rejected);
                }
            }
        }

        Commands::Export {
            file_format,
            output,
        } => {
            let format: ExportFormat = file_format.parse().map_err(anyhow::Error::msg)?;

            let response = client
                .get(api(&format!("/api/v1/export?format={}", format.extension())))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let data = check(response).await?.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported to {}", path.display());
                }
                None => {
                    print!("{}", data);
                }
            }
        }

        Commands::Status => {
            let response = client
                .get(api("/health"))
                .send()
                .await
                .with_context(|| connect_hint(&cli.api_url))?;
            let health: HealthResponse = check(response).await?.json().await?;

            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&health)?);
            } else {
                println!("Tally v{}", health.version);
                println!();
                println!("API Status: {}", health.status);
                println!("Employees: {}", health.employees);
                println!("Live dashboards: {}", health.ws_connections);
                println!();
                println!("Uptime: {}", format_duration(health.uptime_seconds));
            }
        }

        Commands::Config { output } => {
            let config = tally::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {}", path.display());
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn connect_hint(api_url: &str) -> String {
    format!(
        "Cannot connect to Tally API at {}. Start it with: cargo run --bin tally-api",
        api_url
    )
}

/// Turn a non-success response into an error carrying the server's message
async fn check(response: reqwest::Response) -> anyhow::Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&text) {
        Ok(body) => bail!("{} ({}): {}", body.error.code, status, body.error.message),
        Err(_) => bail!("Request failed ({}): {}", status, text),
    }
}

async fn fetch_dashboard(
    client: &reqwest::Client,
    url: &str,
    api_url: &str,
) -> anyhow::Result<DashboardView> {
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| connect_hint(api_url))?;
    Ok(check(response).await?.json().await?)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
