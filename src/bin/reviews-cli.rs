use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "reviews-cli")]
#[command(about = "Command-line client for the dog house review service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a dog house with its reviews
    DogHouse { id: u64 },
    /// List reviews, optionally for one dog house
    Reviews {
        #[arg(long)]
        dog_house: Option<u64>,
    },
    /// Show one review
    Review {
        id: u64,
        /// Fetch through the nested route of this dog house
        #[arg(long)]
        dog_house: Option<u64>,
    },
    /// Create a review
    Create {
        #[arg(long)]
        dog_house: u64,
        #[arg(long)]
        username: String,
        #[arg(long)]
        comment: String,
        #[arg(long)]
        rating: i32,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::DogHouse { id } => client.get(format!("{base}/dog_houses/{id}")),
        Commands::Reviews { dog_house: Some(parent) } => {
            client.get(format!("{base}/dog_houses/{parent}/reviews"))
        }
        Commands::Reviews { dog_house: None } => client.get(format!("{base}/reviews")),
        Commands::Review { id, dog_house: Some(parent) } => {
            client.get(format!("{base}/dog_houses/{parent}/reviews/{id}"))
        }
        Commands::Review { id, dog_house: None } => client.get(format!("{base}/reviews/{id}")),
        Commands::Create { dog_house, username, comment, rating } => client
            .post(format!("{base}/reviews"))
            .json(&json!({
                "dog_house_id": dog_house,
                "username": username,
                "comment": comment,
                "rating": rating,
            })),
    };

    let ok = print_response(request.send().await?).await?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(true)
}
