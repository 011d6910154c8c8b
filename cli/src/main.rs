//! Command-line client for the Serbian SEO analysis server.
//!
//! Commands:
//! - analyze: Analyze text from a file or stdin (on the server or offline)
//! - extract: Extract the article text of a web page
//! - health: Show server status and refinement settings
//!
//! Configuration via environment:
//! - SEO_SERVER_URL: Base URL of the server (default: http://localhost:3000)

mod commands;

use clap::{Parser, Subcommand};

use commands::{analyze::AnalyzeArgs, extract::ExtractArgs, health::HealthArgs};

/// Serbian SEO analyzer CLI
///
/// JSON output by default for scripting; --human for formatted output.
#[derive(Parser)]
#[command(name = "seo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Analysis server URL
    #[arg(
        long,
        env = "SEO_SERVER_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze text and print the SEO report
    Analyze(AnalyzeArgs),

    /// Extract article content from a URL
    Extract(ExtractArgs),

    /// Check server health
    Health(HealthArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Analyze(args) => {
            commands::analyze::execute(&client, &cli.url, cli.human, args).await
        }
        Commands::Extract(args) => {
            commands::extract::execute(&client, &cli.url, cli.human, args).await
        }
        Commands::Health(args) => commands::health::execute(&client, &cli.url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
