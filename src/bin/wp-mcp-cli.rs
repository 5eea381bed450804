use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "wp-mcp-cli")]
#[command(about = "Command-line client for a running wp-mcp-bridge", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the service descriptor
    Status,
    /// Run the liveness probe
    Health,
    /// List tools exposed on /mcp
    Tools,
    /// Invoke wp_request through /mcp
    Call {
        /// REST path, e.g. /wp-json/wp/v2/posts
        #[arg(long)]
        path: String,
        #[arg(long, default_value = "GET")]
        method: String,
        /// JSON object body for non-GET methods
        #[arg(long)]
        body: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Status => {
            let res = client.get(format!("{}/", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Tools => {
            let res = client
                .post(format!("{}/mcp", base))
                .json(&json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" }))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Call { path, method, body } => {
            let mut arguments = json!({ "path": path, "method": method });
            if let Some(raw) = body {
                arguments["body"] = serde_json::from_str::<Value>(&raw)?;
            }
            let res = client
                .post(format!("{}/mcp", base))
                .json(&json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "method": "tools/call",
                    "params": { "name": "wp_request", "arguments": arguments }
                }))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: bridge returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
