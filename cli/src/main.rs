
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use layout::document::ExportDocument;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "reports-cli", about = "Report builder API CLI")]
struct Cli {
    #[arg(long, env = "REPORTS_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
}

impl CliContext {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Report(ReportCommand),
    Catalog(CatalogCommand),
}

#[derive(Args, Debug)]
struct ReportCommand {
    #[command(subcommand)]
    command: ReportSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReportSubcommand {
    List,
    Show {
        report_id: String,
    },
    /// Save components from a JSON file (a component array or an exported report).
    Save {
        #[arg(long)]
        name: String,
        #[arg(long)]
        components: PathBuf,
    },
    Delete {
        report_id: String,
    },
    Duplicate {
        report_id: String,
    },
    /// Download a saved report as a JSON file.
    Export {
        report_id: String,
        /// Output path; defaults to the report's export filename.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Subcommand, Debug)]
enum CatalogSubcommand {
    DataSources,
    ChartTypes,
    Palette,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Report(report) => run_report(&ctx, report).await,
        Command::Catalog(catalog) => run_catalog(&ctx, catalog).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let response = reqwest::Client::new().get(cli.url("/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_report(cli: &CliContext, report: ReportCommand) -> Result<(), CliError> {
    match report.command {
        ReportSubcommand::List => {
            let json = api_request(cli, reqwest::Method::GET, "/api/reports", None).await?;
            print_json(&json)
        }
        ReportSubcommand::Show { report_id } => {
            let path = format!("/api/reports/{report_id}");
            let json = api_request(cli, reqwest::Method::GET, &path, None).await?;
            print_json(&json)
        }
        ReportSubcommand::Save { name, components } => {
            let raw = std::fs::read_to_string(&components)?;
            let components = components_payload(serde_json::from_str(&raw)?)?;
            let body = serde_json::json!({ "name": name, "components": components });
            let json = api_request(cli, reqwest::Method::POST, "/api/reports", Some(body)).await?;
            print_json(&json)
        }
        ReportSubcommand::Delete { report_id } => {
            let path = format!("/api/reports/{report_id}");
            let json = api_request(cli, reqwest::Method::DELETE, &path, None).await?;
            print_json(&json)
        }
        ReportSubcommand::Duplicate { report_id } => {
            let path = format!("/api/reports/{report_id}/duplicate");
            let json = api_request(cli, reqwest::Method::POST, &path, None).await?;
            print_json(&json)
        }
        ReportSubcommand::Export { report_id, out } => {
            let path = format!("/api/reports/{report_id}/export");
            let json = api_request(cli, reqwest::Method::GET, &path, None).await?;
            let export: ExportDocument = serde_json::from_value(json)?;
            let out = out.unwrap_or_else(|| PathBuf::from(export.filename()));
            std::fs::write(&out, serde_json::to_string_pretty(&export)?)?;
            println!("{}", out.display());
            Ok(())
        }
    }
}

async fn run_catalog(cli: &CliContext, catalog: CatalogCommand) -> Result<(), CliError> {
    let path = match catalog.command {
        CatalogSubcommand::DataSources => "/api/catalog/data-sources",
        CatalogSubcommand::ChartTypes => "/api/catalog/chart-types",
        CatalogSubcommand::Palette => "/api/palette",
    };
    let json = api_request(cli, reqwest::Method::GET, path, None).await?;
    print_json(&json)
}

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let request = reqwest::Client::new().request(method, cli.url(path));
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: value.to_string() });
    }

    Ok(value)
}

/// Component list from a file holding either a bare array or an exported report.
fn components_payload(value: Value) -> Result<Value, CliError> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => match map.remove("components") {
            Some(components @ Value::Array(_)) => Ok(components),
            _ => Err(CliError::MissingField("components")),
        },
        _ => Err(CliError::MissingField("components")),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
