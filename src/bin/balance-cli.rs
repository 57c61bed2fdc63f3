use clap::{Parser, Subcommand};
use serde_json::Value;

use balance_proxy::http::ErrorBody;
use balance_proxy::report::{render, BalanceSheetDocument};

#[derive(Parser)]
#[command(name = "balance-cli")]
#[command(about = "Fetch and display the balance sheet through a running proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the report as a table
    Report,
    /// Print the JSON exactly as relayed
    Raw,
    /// Print one section's rows and its summary value
    Section {
        /// Section title, e.g. "Current Assets"
        title: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/balancesheet", cli.url.trim_end_matches('/')))
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let detail = match res.json::<ErrorBody>().await {
            Ok(body) => body.detail,
            Err(_) => "no detail".to_string(),
        };
        eprintln!("Error: proxy returned status {}: {}", status, detail);
        std::process::exit(1);
    }

    let json: Value = res.json().await?;

    match cli.command {
        Commands::Raw => {
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Report => {
            let doc: BalanceSheetDocument = serde_json::from_value(json)?;
            print!("{}", render(&doc)?);
        }
        Commands::Section { title } => {
            let doc: BalanceSheetDocument = serde_json::from_value(json)?;
            let section = doc.section(&title)?;
            println!("{}", title);
            for label in section.labels() {
                println!("  {}", label);
            }
            match section.summary_row().and_then(|row| row.cell_value(1)) {
                Some(total) => println!("Total: {}", total),
                None => println!("Total: (no summary row)"),
            }
        }
    }

    Ok(())
}
