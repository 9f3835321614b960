use clap::{Parser, Subcommand};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "users-cli")]
#[command(about = "Command-line client for the user service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one user (with points when the service enriches)
    Get { id: i64 },
    /// List all users
    List,
    /// Create a user from a JSON object, e.g. '{"name":"Ada"}'
    Create {
        #[arg(long)]
        json: String,
    },
    /// Check service health
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Get { id } => {
            client.get(format!("{}/api/v1/users/{}", base, id)).send().await?
        }
        Commands::List => client.get(format!("{}/api/v1/users", base)).send().await?,
        Commands::Create { json } => {
            // Validate locally so typos fail before the request.
            let body: Value = serde_json::from_str(&json)?;
            client
                .post(format!("{}/api/v1/users", base))
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body.to_string())
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(id) = res.headers().get("x-request-id").and_then(|v| v.to_str().ok()) {
        eprintln!("request id: {}", id);
    }

    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: user service returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
