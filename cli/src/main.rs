extern crate clap;
extern crate colored;
extern crate log;
extern crate reqwest;
extern crate serde;
extern crate tokio;

use colored::*;
use serde::Serialize;

#[allow(unused_imports)]
use log::{debug, error, info, warn};

mod banner;
use crate::banner::print_banner;

mod models;
use crate::models::queue_data::{
    normalize_user, IndexResponse, OperatorCommand, PickCommand, PositionResponse, QueueResponse,
    SongRequest, SongResponse, StatusResponse, UpgradeRequest,
};

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display current status of the request queue
    Status,
    /// Show the first COUNT requests
    Queue(QueueArgs),
    /// Request a song by its catalog code
    Request(RequestArgs),
    /// Prioritize a user's request (operators only)
    Upgrade(UpgradeArgs),
    /// Show where a user's request sits in the queue
    Position(UserArgs),
    /// Play the next waiting request (operators only)
    Next(OperatorArgs),
    /// Play a random request (operators only)
    Random(OperatorArgs),
    /// Play the request at a given position (operators only)
    Pick(PickArgs),
    /// Look up a catalog code
    Song(SongArgs),
    /// How to request a song
    Help,
    /// The request rules
    Rules,
}

#[derive(Parser, Debug)]
struct QueueArgs {
    #[clap(help = "How many requests to show", default_value_t = 10)]
    count: usize,
}

#[derive(Parser, Debug)]
struct RequestArgs {
    #[clap(help = "Catalog code of the song", required = true)]
    code: u32,
    #[clap(long, help = "Name of the requesting user", required = true)]
    user: String,
}

#[derive(Parser, Debug)]
struct UpgradeArgs {
    #[clap(help = "User whose request gets prioritized", required = true)]
    user: String,
    #[clap(long = "as", help = "Operator issuing the command", required = true)]
    actor: String,
}

#[derive(Parser, Debug)]
struct UserArgs {
    #[clap(help = "Name of the user", required = true)]
    user: String,
}

#[derive(Parser, Debug)]
struct OperatorArgs {
    #[clap(long = "as", help = "Operator issuing the command", required = true)]
    actor: String,
}

#[derive(Parser, Debug)]
struct PickArgs {
    #[clap(help = "1-based queue position", required = true)]
    position: usize,
    #[clap(long = "as", help = "Operator issuing the command", required = true)]
    actor: String,
}

#[derive(Parser, Debug)]
struct SongArgs {
    #[clap(help = "Catalog code", required = true)]
    code: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let api_hostname = match std::env::var("REQUESTCTL_HOST") {
        Ok(hostname) => {
            info!("[-] requestnonsense API base URL: {}", hostname);
            hostname
        }
        Err(_) => {
            eprintln!("Error: REQUESTCTL_HOST environment variable is not set.");
            std::process::exit(1);
        }
    };

    let cli = Cli::parse();

    match cli.command {
        Commands::Status => {
            if let Err(err) = status(&api_hostname).await {
                eprintln!("[!] Error: {}", err);
            }
        }
        Commands::Queue(args) => {
            debug!("Queue command with count: {:?}", args.count);
            print_banner();
            let queue_data = get_queue(&api_hostname, args.count)
                .await
                .unwrap_or_default();
            print_queue(&queue_data);
        }
        Commands::Request(args) => {
            let body = SongRequest {
                code: args.code,
                requestee: normalize_user(&args.user),
            };
            post_status(&api_hostname, "request", &body).await?;
        }
        Commands::Upgrade(args) => {
            let body = UpgradeRequest {
                requestee: normalize_user(&args.user),
                actor: normalize_user(&args.actor),
            };
            post_status(&api_hostname, "upgrade", &body).await?;
        }
        Commands::Position(args) => {
            position(&api_hostname, normalize_user(&args.user)).await?;
        }
        Commands::Next(args) => {
            let body = OperatorCommand {
                actor: normalize_user(&args.actor),
            };
            post_status(&api_hostname, "next", &body).await?;
        }
        Commands::Random(args) => {
            let body = OperatorCommand {
                actor: normalize_user(&args.actor),
            };
            post_status(&api_hostname, "random", &body).await?;
        }
        Commands::Pick(args) => {
            let body = PickCommand {
                actor: normalize_user(&args.actor),
                position: args.position,
            };
            post_status(&api_hostname, "pick", &body).await?;
        }
        Commands::Song(args) => {
            song(&api_hostname, args.code).await?;
        }
        Commands::Help => {
            get_status(&api_hostname, "help").await?;
        }
        Commands::Rules => {
            get_status(&api_hostname, "rules").await?;
        }
    }

    Ok(())
}

fn print_queue(queue_data: &QueueResponse) {
    println!(
        "{}{}",
        "queue length: ".green(),
        queue_data.length.to_string().green().bold()
    );

    for (index, entry) in queue_data.entries.iter().enumerate() {
        let color = if index % 2 == 0 { "cyan" } else { "magenta" };
        let marker = if entry.active {
            "▶".yellow().bold()
        } else if entry.elevated {
            "★".red().bold()
        } else {
            " ".normal()
        };

        println!(
            "  {} {:>3}  {}  {}",
            marker,
            entry.position,
            entry.song.color(color),
            entry.requestee.dimmed()
        );
    }
}

async fn get_queue(api_hostname: &str, count: usize) -> Option<QueueResponse> {
    let client = reqwest::Client::new();
    let url = format!("{}/queue?count={}", api_hostname, count);

    let response = client.get(&url).send().await.ok()?;
    if response.status().is_success() {
        let body_queue = response.text().await.ok()?;
        debug!("[?] raw queue response body: {}", body_queue);

        match serde_json::from_str::<QueueResponse>(&body_queue) {
            Ok(queue_data) => Some(queue_data),
            Err(e) => {
                eprintln!("Error: Failed to deserialize queue response: {}", e);
                None
            }
        }
    } else {
        eprintln!("Error: Failed to fetch queue (HTTP {})", response.status());
        None
    }
}

async fn status(api_hostname: &str) -> Result<(), reqwest::Error> {
    print_banner();

    let client = reqwest::Client::new();
    let url_root = format!("{}/", api_hostname);
    let response_root = match client.get(&url_root).send().await {
        Ok(response) => response,
        Err(err) => {
            eprintln!("[!] unable to reach the request server, is your host configuration correct? is the service offline?");
            return Err(err);
        }
    };

    if !response_root.status().is_success() {
        eprintln!(
            "Error: Failed to fetch status (HTTP {})",
            response_root.status()
        );
        return Ok(());
    }

    let body_root = response_root.text().await?;
    debug!("[?] raw root response body: {}", body_root);

    match serde_json::from_str::<IndexResponse>(&body_root) {
        Ok(index) => {
            println!(
                "                          {}{}",
                "queue length: ".cyan(),
                index.length.to_string().cyan().bold()
            );
            println!("{}", "now playing:".green().bold());
            match index.now_playing {
                Some(song) => println!("    {}", song.yellow().bold()),
                None => println!("    {}", "nothing is playing.".red().bold()),
            }
            if let Some(url) = index.queue_url {
                println!("{} {}", "queue:".cyan().bold(), url);
            }
            if let Some(url) = index.songlist_url {
                println!("{} {}", "songs:".cyan().bold(), url);
            }
        }
        Err(e) => {
            eprintln!("Error: Failed to deserialize root response: {}", e);
        }
    }

    Ok(())
}

// the user name becomes a single percent-encoded path segment
fn position_url(
    api_hostname: &str,
    user: &str,
) -> Result<reqwest::Url, Box<dyn std::error::Error>> {
    let mut url = reqwest::Url::parse(api_hostname)?;
    url.path_segments_mut()
        .map_err(|_| format!("{} cannot be used as a base URL", api_hostname))?
        .pop_if_empty()
        .push("position")
        .push(user);
    Ok(url)
}

async fn position(api_hostname: &str, user: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let url = position_url(api_hostname, user)?;
    let response = client.get(url).send().await?;

    if response.status().is_success() {
        let position: PositionResponse = response.json().await?;
        match position.position {
            Some(_) => println!("{}", position.message.green().bold()),
            None => println!("{}", position.message.yellow()),
        }
    } else {
        eprintln!(
            "[!] Error: Failed to fetch position (HTTP {})",
            response.status()
        );
    }

    Ok(())
}

async fn song(api_hostname: &str, code: u32) -> Result<(), reqwest::Error> {
    let client = reqwest::Client::new();
    let url = format!("{}/songs/{}", api_hostname, code);
    let response = client.get(&url).send().await?;
    let song: SongResponse = response.json().await.unwrap_or_default();

    match song.song {
        Some(title) => println!(
            "{} {}",
            song.code.to_string().cyan().bold(),
            title.green()
        ),
        None => println!("{}", format!("no song with code {}", code).red()),
    }

    Ok(())
}

async fn get_status(api_hostname: &str, path: &str) -> Result<(), reqwest::Error> {
    let client = reqwest::Client::new();
    let url = format!("{}/{}", api_hostname, path);
    let response = client.get(&url).send().await?;
    print_status_response(response).await
}

async fn post_status<B: Serialize>(
    api_hostname: &str,
    path: &str,
    body: &B,
) -> Result<(), reqwest::Error> {
    let client = reqwest::Client::new();
    let url = format!("{}/{}", api_hostname, path);

    let response = client.post(&url).json(body).send().await?;
    print_status_response(response).await
}

// the server answers refusals and misses with a message too, so always read the body
async fn print_status_response(response: reqwest::Response) -> Result<(), reqwest::Error> {
    let http_status = response.status();
    let body = response.text().await?;
    debug!("[?] raw status response body: {}", body);

    match serde_json::from_str::<StatusResponse>(&body) {
        Ok(status) if http_status.is_success() => println!("{}", status.message.green().bold()),
        Ok(status) => println!("{}", status.message.red().bold()),
        Err(e) => eprintln!(
            "Error: Failed to parse response (HTTP {}): {}",
            http_status, e
        ),
    }

    Ok(())
}
