use clap::{Parser, Subcommand, ValueEnum};
use repox::storage::RawOptions;
use repox::{Actor, ItemKind, RepoxConfig, RepoxPaths, RepoxService, RequestContext, TenantScope};
use std::path::PathBuf;

/// CLI arguments for repox
#[derive(Parser, Debug)]
#[command(name = "repox")]
#[command(about = "Search an external plugin/theme repository and install from it", version)]
struct Args {
    /// Configuration directory (default: $REPOX_CONFIG_DIR or ~/.config/repox)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Operate on the network-wide record instead of the single-site one
    #[arg(long, global = true)]
    network: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show or change repository settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Search the repository
    Search {
        kind: SearchKind,
        /// Search terms (empty lists everything)
        #[arg(default_value = "")]
        query: String,
    },
    /// Install an item by slug
    Install {
        /// `plugin` or `theme`
        item_type: String,
        slug: String,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the stored settings (secret masked)
    Show,
    /// Replace the stored settings
    Set {
        #[arg(long)]
        url: String,
        /// none, basic or token
        #[arg(long, default_value = "none")]
        auth_method: String,
        #[arg(long, default_value = "")]
        username: String,
        /// Password for basic auth, or the API token
        #[arg(long, env = "REPOX_PASSWORD", default_value = "", hide_env_values = true)]
        password: String,
    },
    /// Write default config.yaml and empty settings if none exist yet
    Init,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SearchKind {
    Plugins,
    Themes,
}

impl From<SearchKind> for ItemKind {
    fn from(kind: SearchKind) -> Self {
        match kind {
            SearchKind::Plugins => ItemKind::Plugin,
            SearchKind::Themes => ItemKind::Theme,
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the JSON outcome
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,repox=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let paths = match args.config_dir {
        Some(dir) => RepoxPaths::with_dir(dir),
        None => RepoxPaths::new()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?,
    };

    let config = RepoxConfig::load(&paths).await?;
    let scope = if args.network {
        TenantScope::Network
    } else {
        config.scope
    };
    tracing::debug!(%scope, config_dir = %paths.config_dir.display(), "starting repox");

    let service = RepoxService::from_config(paths.clone(), &config)?;
    let login = std::env::var("USER").unwrap_or_else(|_| "repox".to_string());
    let ctx = RequestContext::new(Actor::operator(login), scope);

    match args.command {
        Command::Config { action } => match action {
            ConfigAction::Show => print_json(&service.settings(&ctx).await?)?,
            ConfigAction::Set {
                url,
                auth_method,
                username,
                password,
            } => {
                let raw = RawOptions {
                    repo_url: Some(url),
                    auth_method: Some(auth_method),
                    auth_username: Some(username),
                    auth_password: Some(password),
                };
                let saved = service.save_settings(&ctx, &raw).await?;
                if !saved.is_configured() {
                    tracing::warn!("repository URL was rejected; searches and installs will fail");
                }
                print_json(&saved)?;
            }
            ConfigAction::Init => {
                let wrote_config = !paths.config_file().exists();
                if wrote_config {
                    config.save(&paths).await?;
                }
                let written = service.initialize(scope).await?;
                print_json(&serde_json::json!({
                    "config_written": wrote_config,
                    "initialized": written,
                }))?;
            }
        },
        Command::Search { kind, query } => {
            let outcome = match ItemKind::from(kind) {
                ItemKind::Plugin => service.search_plugins(&ctx, &query).await,
                ItemKind::Theme => service.search_themes(&ctx, &query).await,
            };
            print_json(&outcome)?;
            if outcome.is_error() {
                std::process::exit(1);
            }
        }
        Command::Install { item_type, slug } => {
            let outcome = service.install_item(&ctx, &item_type, &slug).await;
            print_json(&outcome)?;
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
