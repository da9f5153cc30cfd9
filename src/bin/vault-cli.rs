use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "vault-cli")]
#[command(about = "Command-line client for the Context Vault API", long_about = None)]
struct Cli {
    #[arg(short, long, env = "VAULT_URL", default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service name, version and endpoints
    Info,
    /// Check service liveness
    Health,
    /// Save a context record
    Save {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        context_type: String,
        /// Context payload as a JSON object
        #[arg(long, value_parser = parse_object)]
        data: Value,
        /// Optional metadata as a JSON object
        #[arg(long, value_parser = parse_object)]
        metadata: Option<Value>,
    },
    /// List context records, newest first
    Query {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        context_type: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Info => client.get(format!("{}/", base)).send().await?,
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::Save {
            user_id,
            context_type,
            data,
            metadata,
        } => {
            let mut body = json!({
                "user_id": user_id,
                "context_type": context_type,
                "context_data": data,
            });
            if let Some(metadata) = metadata {
                body["metadata"] = metadata;
            }
            client
                .post(format!("{}/vault/save", base))
                .json(&body)
                .send()
                .await?
        }
        Commands::Query {
            user_id,
            context_type,
            limit,
        } => {
            let mut params = vec![("limit", limit.to_string())];
            if let Some(user_id) = user_id {
                params.push(("user_id", user_id));
            }
            if let Some(context_type) = context_type {
                params.push(("context_type", context_type));
            }
            client
                .get(format!("{}/vault/context", base))
                .query(&params)
                .send()
                .await?
        }
    };

    print_response(res).await
}

fn parse_object(raw: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) if value.is_object() => Ok(value),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Vault API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
