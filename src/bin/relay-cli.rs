use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Command-line client for a running wa-relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CredentialArgs {
    /// Gateway instance id.
    #[arg(short, long, env = "WA_ID_INSTANCE")]
    instance: String,

    /// Gateway API token.
    #[arg(short, long, env = "WA_API_TOKEN", hide_env_values = true)]
    token: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the instance settings
    Settings,
    /// Show the instance authorization state
    State,
    /// Send a text message
    SendMessage {
        /// Recipient phone number, digits only
        phone: String,
        /// Message text
        text: String,
    },
    /// Send a file by URL
    SendFile {
        /// Recipient phone number, digits only
        phone: String,
        /// Public URL of the file
        file_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (path, body) = build_request(cli.command, cli.credentials);

    let res = client
        .post(endpoint(&cli.url, path))
        .json(&body)
        .send()
        .await?;
    print_response(res).await
}

/// Relay path and JSON body for a subcommand.
fn build_request(command: Commands, credentials: CredentialArgs) -> (&'static str, Value) {
    let mut body = json!({
        "idInstance": credentials.instance,
        "apiTokenInstance": credentials.token,
    });

    let path = match command {
        Commands::Settings => "get-settings",
        Commands::State => "get-state",
        Commands::SendMessage { phone, text } => {
            body["phoneNumber"] = Value::String(phone);
            body["messageText"] = Value::String(text);
            "send-message"
        }
        Commands::SendFile { phone, file_url } => {
            body["phoneNumber"] = Value::String(phone);
            body["fileUrl"] = Value::String(file_url);
            "send-file"
        }
    };
    (path, body)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/api/{}", base_url.trim_end_matches('/'), path)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text.trim_end());
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
