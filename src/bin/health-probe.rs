use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

#[derive(Parser)]
#[command(name = "health-probe")]
#[command(about = "Probe the vision-service health endpoint", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, default_value_t = 2000)]
    timeout_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match probe(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: health check failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn probe(cli: &Cli) -> Result<bool, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(cli.timeout_ms))
        .build()?;

    let res = client
        .get(format!("{}/health", cli.url.trim_end_matches('/')))
        .send()
        .await?;

    let status = res.status();
    let body = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if !body.is_empty() {
            eprintln!("Response: {}", body);
        }
        return Ok(false);
    }

    let pretty = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok());
    println!("{}", pretty.unwrap_or(body));
    Ok(true)
}
