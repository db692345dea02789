//! CLI Tooling
//!
//! Command-line interface over the navigation subsystem: inspect and edit an
//! installation's menu, check routes and capabilities for the configured session.

use crate::config::{AppConfig, BackendKind, ConfigLoader};
use crate::error::ApiError;
use crate::gateway::{HttpMenuGateway, MenuGateway, SledMenuGateway};
use crate::menu::{visible_menu, EditingSession, MenuCache, ReorderOutcome};
use crate::notice::Notice;
use crate::permission::{
    CapabilityRegistry, HttpPermissionSource, LoadStatus, PermissionSource, PermissionStore,
    StaticPermissionSource,
};
use crate::route::{RouteDecision, RouteTable, RouteVisit};
use crate::tooling::format::{
    format_menu_text, format_notice, format_permissions_text, format_routes_text,
};
use crate::types::ActingUser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Tendernav CLI - permission-aware navigation for the tender suite
#[derive(Parser)]
#[command(name = "tendernav")]
#[command(about = "Inspect and edit permission-aware navigation menus")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Acting user recorded on menu writes (overrides session.user)
    #[arg(long)]
    pub user: Option<String>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Menu structure commands
    Menu {
        #[command(subcommand)]
        command: MenuCommands,
    },
    /// Route guard commands
    Route {
        #[command(subcommand)]
        command: RouteCommands,
    },
    /// Session permission commands
    Perm {
        #[command(subcommand)]
        command: PermCommands,
    },
    /// Show the effective configuration
    Config,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MenuCommands {
    /// Show the installation's menu
    Show {
        /// Only items the current session may see
        #[arg(long)]
        visible: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Rename one menu item and save
    Rename {
        /// Menu item id
        id: String,
        /// New display name
        name: String,
    },
    /// Move an item into the slot of a sibling and save
    Move {
        /// Item being moved
        active: String,
        /// Sibling whose slot it takes
        over: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RouteCommands {
    /// Check whether the session may open a path
    Check { path: String },
    /// List application routes with the session's access
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum PermCommands {
    /// List granted capabilities
    List,
    /// Check a single capability
    Check { capability: String },
}

/// CLI context holding the wired-up subsystem for one installation
pub struct CliContext {
    config: AppConfig,
    runtime: tokio::runtime::Runtime,
    cache: Arc<MenuCache>,
    permissions: Arc<PermissionStore>,
    routes: RouteTable,
    actor: ActingUser,
}

impl CliContext {
    /// Load configuration and wire the subsystem.
    pub fn new(config_path: Option<PathBuf>, user: Option<String>) -> Result<Self, ApiError> {
        let mut config = ConfigLoader::load(config_path.as_deref())?;
        if let Some(user) = user {
            config.session.user = user;
        }
        Self::from_config(config)
    }

    pub fn from_config(config: AppConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to create runtime: {}", e)))?;

        let registry = CapabilityRegistry::builtin().with_extra(config.capabilities.extra.clone());
        let routes = RouteTable::builtin();
        routes.validate(&registry)?;

        let timeout = Duration::from_secs(config.backend.timeout_secs);
        let installation = config.installation.id.clone();
        let (gateway, source): (Arc<dyn MenuGateway>, Arc<dyn PermissionSource>) =
            match config.backend.kind {
                BackendKind::Local => {
                    let store_path = config.storage.resolve_path(&installation)?;
                    (
                        Arc::new(SledMenuGateway::open(&store_path, installation.clone())?),
                        Arc::new(StaticPermissionSource::new(config.session.permissions.clone())),
                    )
                }
                BackendKind::Http => {
                    let base_url = config.backend.base_url.clone().unwrap_or_default();
                    (
                        Arc::new(HttpMenuGateway::new(
                            base_url.clone(),
                            installation.clone(),
                            config.session.token.clone(),
                            timeout,
                        )?),
                        Arc::new(HttpPermissionSource::new(
                            base_url,
                            config.session.token.clone(),
                            timeout,
                        )?),
                    )
                }
            };

        let cache = Arc::new(MenuCache::new(gateway, installation).with_registry(registry));
        let permissions = Arc::new(PermissionStore::new(source));
        let actor = ActingUser::new(config.session.user.clone());

        Ok(Self {
            config,
            runtime,
            cache,
            permissions,
            routes,
            actor,
        })
    }

    pub fn cache(&self) -> Arc<MenuCache> {
        Arc::clone(&self.cache)
    }

    pub fn permissions(&self) -> Arc<PermissionStore> {
        Arc::clone(&self.permissions)
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Menu { command } => self.execute_menu(command),
            Commands::Route { command } => self.execute_route(command),
            Commands::Perm { command } => self.execute_perm(command),
            Commands::Config => self.show_config(),
        }
    }

    fn load_permissions(&self) -> LoadStatus {
        self.runtime.block_on(self.permissions.load())
    }

    fn execute_menu(&self, command: &MenuCommands) -> Result<String, ApiError> {
        match command {
            MenuCommands::Show { visible, format } => {
                let loaded = self.runtime.block_on(self.cache.current());
                let (title, tree) = if *visible {
                    self.load_permissions();
                    ("Visible Menu", visible_menu(&loaded.tree, &self.permissions))
                } else {
                    ("Menu", loaded.tree)
                };
                if format == "json" {
                    serde_json::to_string_pretty(&tree).map_err(|e| {
                        ApiError::StorageError(crate::error::StorageError::Serialization(e))
                    })
                } else {
                    Ok(format_menu_text(title, &tree, loaded.origin))
                }
            }
            MenuCommands::Rename { id, name } => {
                let mut session = self.runtime.block_on(EditingSession::open(&self.cache));
                session.begin_edit(id)?;
                session.update_buffer(name.clone())?;
                session.commit_edit()?;
                self.save(&mut session, String::new())
            }
            MenuCommands::Move { active, over } => {
                let mut session = self.runtime.block_on(EditingSession::open(&self.cache));
                let mut out = String::new();
                if session.reorder(active, over) == ReorderOutcome::Unchanged {
                    out.push_str(&format!(
                        "'{}' and '{}' are not siblings; nothing moved.\n",
                        active, over
                    ));
                }
                self.save(&mut session, out)
            }
        }
    }

    fn save(&self, session: &mut EditingSession, mut out: String) -> Result<String, ApiError> {
        let outcome = self
            .runtime
            .block_on(session.save(&self.cache, &self.actor))?;
        info!(outcome = ?outcome, actor = %self.actor, "menu command finished");
        out.push_str(&format_notice(&Notice::from_save(&outcome)));
        Ok(out)
    }

    fn execute_route(&self, command: &RouteCommands) -> Result<String, ApiError> {
        self.load_permissions();
        match command {
            RouteCommands::Check { path } => Ok(match self.routes.visit(path, &self.permissions) {
                RouteVisit::Rendered(path) => format!("{}: allowed", path),
                RouteVisit::Unauthorized(path) => format!("{}: unauthorized", path),
                RouteVisit::NotFound(path) => format!("{}: no such route", path),
            }),
            RouteCommands::List { format } => {
                let allowed: Vec<bool> = self
                    .routes
                    .routes()
                    .iter()
                    .map(|guard| guard.check(&self.permissions) == RouteDecision::Render)
                    .collect();
                if format == "json" {
                    let rows: Vec<serde_json::Value> = self
                        .routes
                        .routes()
                        .iter()
                        .zip(&allowed)
                        .map(|(guard, allowed)| {
                            serde_json::json!({
                                "path": guard.path,
                                "module": guard.module,
                                "allowed": allowed,
                            })
                        })
                        .collect();
                    serde_json::to_string_pretty(&rows).map_err(|e| {
                        ApiError::StorageError(crate::error::StorageError::Serialization(e))
                    })
                } else {
                    Ok(format_routes_text(self.routes.routes(), &allowed))
                }
            }
        }
    }

    fn execute_perm(&self, command: &PermCommands) -> Result<String, ApiError> {
        let status = self.load_permissions();
        match command {
            PermCommands::List => Ok(format_permissions_text(
                &self.permissions.granted(),
                status == LoadStatus::Loaded,
            )),
            PermCommands::Check { capability } => {
                let verdict = if self.permissions.has(capability) {
                    "granted"
                } else {
                    "denied"
                };
                Ok(format!("{}: {}", capability, verdict))
            }
        }
    }

    fn show_config(&self) -> Result<String, ApiError> {
        let mut shown = self.config.clone();
        if shown.session.token.is_some() {
            shown.session.token = Some("<redacted>".to_string());
        }
        toml::to_string_pretty(&shown)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
