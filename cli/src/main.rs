use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use foody::catalog;
use foody::config::{ClientConfig, DEFAULT_API_BASE_URL};
use foody::error::{ApiError, ConfigError};
use foody::net::ApiClient;
use foody::net::types::LoginRequest;
use foody::router::{RouteGuard, Router};
use foody::state::{FavoritesStore, SessionManager};
use foody::util::error_message::describe;
use foody::util::storage::{FileStore, KeyValueStore};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{}", describe(.0))]
    Api(#[from] ApiError),
    #[error("{0}")]
    Favorites(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "foody", about = "foody diet-tracking API client")]
struct Cli {
    #[arg(long, env = "FOODY_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    base_url: String,

    /// File holding the mirrored session between runs.
    #[arg(long, env = "FOODY_STATE_FILE", default_value = ".foody-session.json")]
    state_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        id: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    Foods(FoodsArgs),
    Categories {
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
    Favorites(FavoritesCommand),
    /// Resolve a path and show the guard decision for the mirrored session.
    Route {
        path: String,
    },
}

#[derive(Args, Debug)]
struct FoodsArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long)]
    keyword: Option<String>,
    #[arg(long)]
    category: Option<String>,
    /// Search the built-in catalog instead of the backend.
    #[arg(long, default_value_t = false)]
    offline: bool,
}

#[derive(Args, Debug)]
struct FavoritesCommand {
    #[command(subcommand)]
    command: FavoritesSubcommand,
}

#[derive(Subcommand, Debug)]
enum FavoritesSubcommand {
    List,
    Add { code: String },
    Remove { favorite_id: i64 },
}

struct CliContext {
    store: Arc<dyn KeyValueStore>,
    client: Arc<ApiClient>,
}

impl CliContext {
    fn new(cli: &Cli) -> Result<Self, CliError> {
        let config = ClientConfig::from_env_with_base_url(&cli.base_url)?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&cli.state_file));
        let client = Arc::new(ApiClient::new(&config, store.clone())?);
        tracing::debug!(base_url = client.base_url(), state_file = %cli.state_file.display(), "client ready");
        Ok(Self { store, client })
    }

    fn session(&self) -> SessionManager {
        SessionManager::new(self.client.clone(), self.client.clone(), self.store.clone())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CliContext::new(&cli)?;

    match cli.command {
        Command::Login { id, password } => {
            let session = ctx.session();
            session.login(&LoginRequest { id, password }).await?;
            print_json(&session.session())
        }
        Command::Logout => {
            let session = ctx.session();
            session.logout().await;
            print_json(&session.session())
        }
        Command::Whoami => {
            let session = ctx.session();
            session.load_from_storage().await;
            print_json(&serde_json::json!({
                "status": session.status(),
                "session": session.session(),
            }))
        }
        Command::Foods(args) => run_foods(&ctx, args).await,
        Command::Categories { offline } => {
            if offline {
                print_json(&catalog::categories())
            } else {
                print_json(&ctx.client.categories().await?)
            }
        }
        Command::Favorites(favorites) => run_favorites(&ctx, favorites).await,
        Command::Route { path } => {
            let report = route_report(&ctx.session(), ctx.store.clone(), &path).await;
            print_json(&report)
        }
    }
}

/// Verify the mirrored session, then resolve `path` and run the guard over
/// whatever the mirror holds afterwards.
async fn route_report(session: &SessionManager, store: Arc<dyn KeyValueStore>, path: &str) -> Value {
    session.load_from_storage().await;
    let router = Router::new();
    let decision = RouteGuard::new(store).navigate(&router, path);
    serde_json::json!({
        "route": router.resolve(path),
        "guard": decision,
    })
}

async fn run_foods(ctx: &CliContext, args: FoodsArgs) -> Result<(), CliError> {
    if args.offline {
        let foods = catalog::search(args.keyword.as_deref(), args.category.as_deref());
        return print_json(&foods);
    }
    let page = ctx
        .client
        .food_list(args.page, args.keyword.as_deref(), args.category.as_deref())
        .await?;
    print_json(&page)
}

async fn run_favorites(ctx: &CliContext, favorites: FavoritesCommand) -> Result<(), CliError> {
    let store = FavoritesStore::new(ctx.client.clone());
    match favorites.command {
        FavoritesSubcommand::List => {
            store.fetch_favorites().await;
            let error = store.error();
            if !error.is_empty() {
                return Err(CliError::Favorites(error));
            }
            print_json(&store.favorites())
        }
        FavoritesSubcommand::Add { code } => {
            store.add_favorite(&code).await?;
            print_json(&serde_json::json!({ "added": code, "favoriteId": store.find_favorite_id_by_code(&code) }))
        }
        FavoritesSubcommand::Remove { favorite_id } => {
            store.remove_favorite(favorite_id).await?;
            print_json(&serde_json::json!({ "removed": favorite_id }))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
