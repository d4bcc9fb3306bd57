use clap::{Parser, Subcommand};

use compute_gateway::backend::ProcessRequest;
use compute_gateway::client::{parse_data_list, GatewayClient, GatewayResponse};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Command-line caller for the compute gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check compute backend health through the gateway
    Health,
    /// Show compute backend statistics
    Stats,
    /// Process a comma-separated list of integers
    Process {
        /// Operation name understood by the backend (e.g. sort, sum)
        #[arg(short, long, default_value = "sort")]
        operation: String,

        /// Comma-separated integers, e.g. "5,3,8,1"
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = GatewayClient::new(&cli.url);

    let response = match cli.command {
        Commands::Health => client.health().await?,
        Commands::Stats => client.stats().await?,
        Commands::Process { operation, data } => {
            let data = match parse_data_list(&data) {
                Ok(data) => data,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(2);
                }
            };
            client.process(&ProcessRequest { data, operation }).await?
        }
    };

    print_response(response)
}

fn print_response(response: GatewayResponse) -> Result<(), Box<dyn std::error::Error>> {
    if !response.status.is_success() {
        eprintln!("Error: gateway returned status {}", response.status);
        if let Some(error) = response.body.get("error").and_then(|v| v.as_str()) {
            eprintln!("Error: {}", error);
        }
        if let Some(details) = response.body.get("details").and_then(|v| v.as_str()) {
            eprintln!("Details: {}", details);
        }
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}
