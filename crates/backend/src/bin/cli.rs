use anyhow::bail;
use clap::{Parser, Subcommand};
use reqwest::Client;
use shared_types::{
    CreateRoomRequest, Room, RoomOverviewResponse, VerifyPasswordRequest, VerifyPasswordResponse,
};

const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

#[derive(Parser)]
#[command(name = "room-cli")]
#[command(about = "CLI for managing scheduling rooms via the backend API")]
#[command(
    long_about = "A command-line interface for the scheduling backend server.\n\n\
    Supports creating, listing, inspecting, and deleting rooms, and checking\n\
    the admin password."
)]
struct Cli {
    /// Backend server URL to connect to.
    ///
    /// The CLI will make HTTP requests to this server's API endpoints.
    /// Use this to connect to a remote server or a different port.
    #[arg(
        short,
        long,
        default_value = "http://localhost:3000",
        env = "DAYMEET_API_URL"
    )]
    base_url: String,

    /// Admin password for protected room operations.
    ///
    /// Listing, creating and deleting rooms require it. Falls back to the
    /// ADMIN_PASSWORD environment variable.
    #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
    admin_password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage rooms - create, list, inspect, and delete
    Rooms {
        #[command(subcommand)]
        action: RoomAction,
    },

    /// Check a password against the server's admin password
    Verify {
        /// The password to check.
        password: String,
    },
}

#[derive(Subcommand)]
enum RoomAction {
    /// List all rooms, newest first (admin)
    List,

    /// Create a new room and print its share id (admin)
    Create {
        /// The display name of the room (e.g. "February meetup").
        name: String,
    },

    /// Permanently delete a room and all its selections (admin)
    ///
    /// This action cannot be undone.
    Delete {
        /// The share id of the room to delete.
        /// Use 'rooms list' to find it.
        id: String,
    },

    /// Show a room's availability board
    ///
    /// Prints the participants, the per-date name groups, and marks the
    /// dates on which everyone is available with a '*'.
    Show {
        /// The share id of the room to inspect.
        id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Rooms { action } => {
            handle_rooms(&client, &cli.base_url, cli.admin_password.as_deref(), action).await?
        }
        Commands::Verify { password } => {
            let url = format!("{}/api/admin/verify", cli.base_url);
            let response: VerifyPasswordResponse = client
                .post(&url)
                .json(&VerifyPasswordRequest { password })
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if response.valid {
                println!("Password accepted.");
            } else {
                println!("Password rejected.");
            }
        }
    }

    Ok(())
}

fn required_password(password: Option<&str>) -> anyhow::Result<&str> {
    match password {
        Some(p) => Ok(p),
        None => bail!("admin password required; pass --admin-password or set ADMIN_PASSWORD"),
    }
}

async fn handle_rooms(
    client: &Client,
    base_url: &str,
    admin_password: Option<&str>,
    action: RoomAction,
) -> anyhow::Result<()> {
    let url = format!("{}/api/rooms", base_url);

    match action {
        RoomAction::List => {
            let password = required_password(admin_password)?;
            let items: Vec<Room> = client
                .get(&url)
                .header(ADMIN_PASSWORD_HEADER, password)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if items.is_empty() {
                println!("No rooms found.");
            } else {
                for room in items {
                    println!(
                        "[{}] {} (created {})",
                        room.id,
                        room.name,
                        room.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        RoomAction::Create { name } => {
            let password = required_password(admin_password)?;
            let room: Room = client
                .post(&url)
                .header(ADMIN_PASSWORD_HEADER, password)
                .json(&CreateRoomRequest { name })
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            println!("Created room: [{}] {}", room.id, room.name);
            println!("    Share path: /{}", room.id);
        }
        RoomAction::Delete { id } => {
            let password = required_password(admin_password)?;
            client
                .delete(format!("{}/{}", url, id))
                .header(ADMIN_PASSWORD_HEADER, password)
                .send()
                .await?
                .error_for_status()?;

            println!("Deleted room: {}", id);
        }
        RoomAction::Show { id } => {
            let overview: RoomOverviewResponse = client
                .get(format!("{}/{}/overview", url, id))
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            println!("Room: {} [{}]", overview.room.name, overview.room.id);

            if overview.participants.is_empty() {
                println!("No dates selected yet.");
                return Ok(());
            }

            println!(
                "Participants ({}): {}",
                overview.participants.len(),
                overview.participants.join(", ")
            );

            let total = overview.participants.len();
            for tally in &overview.dates {
                let marker = if overview.unanimous_dates.contains(&tally.date) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {} ({}/{})",
                    marker,
                    tally.date,
                    tally.names.join(", "),
                    tally.names.len(),
                    total
                );
            }
        }
    }

    Ok(())
}
