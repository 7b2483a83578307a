use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "genai-cli")]
#[command(about = "Command line client for a running genai-proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5173")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Source {
    /// Read the text from a file.
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Pass the text inline.
    #[arg(short, long)]
    text: Option<String>,
}

impl Source {
    fn read(&self) -> Result<String, Box<dyn std::error::Error>> {
        match (&self.file, &self.text) {
            (Some(path), _) => Ok(std::fs::read_to_string(path)?),
            (None, Some(text)) => Ok(text.clone()),
            (None, None) => Ok(std::io::read_to_string(std::io::stdin())?),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Check the proxy is up
    Health,
    /// Summarize an article (reads stdin when no source is given)
    Summarize {
        #[command(flatten)]
        source: Source,
        #[arg(short, long, default_value = "medium")]
        length: String,
        #[arg(short, long, default_value = "paragraph")]
        style: String,
    },
    /// Generate a slide outline
    Slides {
        #[command(flatten)]
        source: Source,
        #[arg(short, long, default_value = "English")]
        language: String,
    },
    /// Generate an image
    Image {
        #[arg(short, long)]
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Health => client.get(format!("{}/api/health", base)).send().await?,
        Commands::Summarize { source, length, style } => {
            let body = json!({ "text": source.read()?, "length": length, "style": style });
            client.post(format!("{}/api/summarize", base)).json(&body).send().await?
        }
        Commands::Slides { source, language } => {
            let body = json!({ "text": source.read()?, "language": language });
            client.post(format!("{}/api/generate-slides", base)).json(&body).send().await?
        }
        Commands::Image { prompt } => {
            client
                .post(format!("{}/api/generate-image", base))
                .json(&json!({ "prompt": prompt }))
                .send()
                .await?
        }
    };

    if !print_response(res).await? {
        std::process::exit(1);
    }
    Ok(())
}

/// Print the body; returns false when the proxy answered with an error status.
async fn print_response(res: reqwest::Response) -> Result<bool, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(false);
    }

    let json: Value = res.json().await?;
    match json.get("summary").and_then(Value::as_str) {
        Some(summary) => println!("{}", summary),
        None => println!("{}", serde_json::to_string_pretty(&json)?),
    }
    Ok(true)
}
