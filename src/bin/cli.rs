//! Users Management CLI
//!
//! Usage: usersmgmt-cli <COMMAND>
//!
//! Drives the app core from the command line: CRUD against the remote
//! directory, share-link construction, and a deep-link simulator that
//! exercises the dispatcher the way a device session would.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use log::info;

use usersmgmt::api::{ApiClient, GetUsersParams, NewUser};
use usersmgmt::auth::AccessGate;
use usersmgmt::deeplink::{extract, DeepLinkDispatcher, ReadinessMonitor};
use usersmgmt::navigation::{NavigationError, NavigationSurface, Route};
use usersmgmt::users::UserDirectory;
use usersmgmt::{settings, share_link};

#[derive(Parser)]
#[command(name = "usersmgmt-cli", about = "Users Management app core CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// User directory operations
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Print share links for a user profile
    Share {
        id: String,
        /// Display name used in the share message
        #[arg(long, default_value = "this user")]
        name: String,
    },
    /// Deep-link tooling
    Link {
        #[command(subcommand)]
        command: LinkCommand,
    },
}

#[derive(Subcommand)]
enum UsersCommand {
    /// List users, optionally filtered
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Fetch one user by id
    Get { id: String },
    /// Create a user
    Create {
        #[arg(long)]
        username: String,
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Replace a user record
    Update {
        id: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a user
    Delete { id: String },
}

#[derive(Subcommand)]
enum LinkCommand {
    /// Show what the extractor makes of a URL
    Parse { url: String },
    /// Feed URLs through a simulated app session
    Demo {
        /// URLs delivered in order; the first plays the cold-start slot
        urls: Vec<String>,
        /// Delay before the navigation surface reports ready
        #[arg(long, default_value_t = 300)]
        ready_after_ms: u64,
    },
}

/// Demo navigation surface: prints routes instead of rendering screens.
struct PrintingSurface {
    ready: Arc<AtomicBool>,
}

impl NavigationSurface for PrintingSurface {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn navigate(&self, route: &Route) -> Result<(), NavigationError> {
        if !self.is_ready() {
            return Err(NavigationError::NotReady);
        }
        println!("navigate -> {} {}", route.screen(), route.params());
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    settings::init_default();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Users { command } => run_users(command).await?,
        Command::Share { id, name } => {
            println!("Deep link: {}", share_link::user_deep_link(&id));
            println!("Web link:  {}", share_link::user_web_link(&id));
            println!("\n{}", share_link::share_message(&id, &name));
        }
        Command::Link { command } => run_link(command).await,
    }
    Ok(())
}

async fn run_users(command: UsersCommand) -> Result<(), Box<dyn std::error::Error>> {
    let directory = UserDirectory::new(ApiClient::from_settings());
    match command {
        UsersCommand::List { page, limit, search } => {
            let params = GetUsersParams {
                page,
                limit: limit.unwrap_or_else(|| settings::get().page_size),
                search,
            };
            let users = directory.list(&params).await?;
            println!("{}", serde_json::to_string_pretty(&users)?);
        }
        UsersCommand::Get { id } => {
            let user = directory.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UsersCommand::Create {
            username,
            firstname,
            lastname,
            email,
            city,
            phone,
        } => {
            let user = directory
                .create(&NewUser {
                    username,
                    firstname,
                    lastname,
                    email,
                    city,
                    phone,
                    avatar: None,
                })
                .await?;
            println!("Created user {}", user.id);
        }
        UsersCommand::Update {
            id,
            username,
            firstname,
            lastname,
            email,
            city,
            phone,
        } => {
            let user = directory
                .update(
                    &id,
                    &NewUser {
                        username,
                        firstname,
                        lastname,
                        email,
                        city,
                        phone,
                        avatar: None,
                    },
                )
                .await?;
            println!("Updated user {}", user.id);
        }
        UsersCommand::Delete { id } => {
            directory.delete(&id).await?;
            println!("Deleted user {}", id);
        }
    }
    Ok(())
}

async fn run_link(command: LinkCommand) {
    match command {
        LinkCommand::Parse { url } => match extract(&url) {
            Some(intent) => println!(
                "Matched: user {} (observed {})",
                intent.target_user_id, intent.observed_at
            ),
            None => println!("No match"),
        },
        LinkCommand::Demo { urls, ready_after_ms } => {
            run_demo(urls, ready_after_ms).await;
        }
    }
}

/// Replay a device session: cold-start URL, live events, delayed readiness.
async fn run_demo(urls: Vec<String>, ready_after_ms: u64) {
    let gate = Arc::new(AccessGate::new());
    let monitor = ReadinessMonitor::new();
    let ready = Arc::new(AtomicBool::new(false));
    let surface = Arc::new(PrintingSurface {
        ready: ready.clone(),
    });
    let dispatcher = DeepLinkDispatcher::new(gate.clone(), surface, monitor.handle());
    let _drain = dispatcher.spawn_ready_drain();

    monitor.mark_mounted();
    let mut urls = urls.into_iter();
    if let Some(cold_start) = urls.next() {
        info!("[Demo] Cold-start URL: {}", cold_start);
        dispatcher.handle_url(&cold_start);
    }

    tokio::time::sleep(Duration::from_millis(ready_after_ms)).await;
    ready.store(true, Ordering::SeqCst);
    monitor.mark_ready();
    info!("[Demo] Navigation surface ready");

    for url in urls {
        info!("[Demo] Live URL event: {}", url);
        dispatcher.handle_url(&url);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // Let any retries play out before reporting
    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("Viewer status: {:?}", gate.current_status());
    println!(
        "Pending intent: {:?}",
        dispatcher
            .store()
            .peek()
            .map(|intent| intent.target_user_id)
    );
}
