use clap::{Parser, Subcommand};
use serde_json::Value;

use ecommerce_bootstrap::services;

#[derive(Parser)]
#[command(name = "probe-cli")]
#[command(about = "Query the probe routes of an e-commerce service", long_about = None)]
struct Cli {
    /// Base URL of the service; defaults to localhost on the service's port.
    #[arg(short, long)]
    url: Option<String>,

    /// Service whose default port to use when --url is not given.
    #[arg(short, long, default_value = "user-service")]
    service: String,

    /// Path the probe routes are mounted under.
    #[arg(short, long, default_value = "/actuator")]
    base_path: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall health with port and timestamp
    Health,
    /// Liveness probe
    Liveness,
    /// Readiness probe, including failing gates
    Readiness,
    /// Service description, version and instance ID
    Info,
}

impl Commands {
    fn route(&self) -> &'static str {
        match self {
            Commands::Health => "health",
            Commands::Liveness => "liveness",
            Commands::Readiness => "readiness",
            Commands::Info => "info",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let base_url = match cli.url {
        Some(url) => url,
        None => {
            let profile = services::find(&cli.service)
                .ok_or_else(|| format!("unknown service: {}", cli.service))?;
            format!("http://localhost:{}", profile.port)
        }
    };
    let url = format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        cli.base_path.trim_end_matches('/'),
        cli.command.route()
    );

    let client = reqwest::Client::new();
    let res = client.get(&url).send().await?;
    if !print_response(res).await? {
        std::process::exit(1);
    }

    Ok(())
}

/// Print the body; returns whether the probe answered with a 2xx status.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: probe returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(true)
}
