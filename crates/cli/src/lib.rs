//! # Larder CLI
//!
//! Command-line access to the recipe REST API.
//!
//! ```text
//! larder [--config FILE] [--api-url URL] [--token T] <resource> <action>
//! ```
//!
//! Resources: `ingredients`, `posts`, `recipes`, `reviews`, `users`.
//! Actions: `list`, `search`, `get`, `create`, `update`, `delete`.
//!
//! Every action runs through the same view components a front end uses:
//! `list` and `search` through an entity list, `get` through a detail
//! view, `create` and `update` through an entity dialog, and `delete`
//! through the delete dialog. Saves and deletes therefore broadcast the
//! usual list-modification event, which the CLI logs.
//!
//! Results are printed to stdout as pretty JSON in the server's wire
//! format; logs and errors go to stderr.
//!

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use larder_client::ClientConfig;
use larder_core::{Entity, EntityId, SyncError};
use larder_model::{Ingredient, Post, Recipe, Review, User};
use larder_ui::{
    ActiveModal, AppContext, EntityDeleteDialog, EntityDetailComponent, EntityDialog,
    EntityListComponent, HasService,
};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// Re-export dependencies for use in main.rs
pub use larder_client;
pub use larder_core;
pub use larder_model;
pub use larder_ui;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "larder", version, about = "Typed client for the recipe sharing REST API")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "LARDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// API root, e.g. http://127.0.0.1:8080/
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub resource: Resource,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Resource {
    Ingredients {
        #[command(subcommand)]
        action: Action,
    },
    Posts {
        #[command(subcommand)]
        action: Action,
    },
    Recipes {
        #[command(subcommand)]
        action: Action,
    },
    Reviews {
        #[command(subcommand)]
        action: Action,
    },
    Users {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Action {
    /// List entities, one page at a time
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        size: Option<u32>,
        /// Sort order such as `id,asc`; repeatable
        #[arg(long)]
        sort: Vec<String>,
    },
    /// Full-text search
    Search { term: String },
    /// Fetch one entity
    Get { id: EntityId },
    /// Create an entity from its JSON form
    Create {
        #[arg(long)]
        json: String,
    },
    /// Update an entity from its JSON form; the JSON must carry an id
    Update {
        #[arg(long)]
        json: String,
    },
    /// Delete one entity
    Delete { id: EntityId },
}

// ============================================================================
// Execution
// ============================================================================

/// Install the stderr log subscriber (`RUST_LOG`, default `info`)
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Effective configuration: file and environment, then command-line flags
pub fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.as_str());
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token.as_str());
    }
    config.validate()?;
    Ok(config)
}

/// Run one command and return its JSON result
pub async fn execute(cli: &Cli) -> Result<Value> {
    let config = resolve_config(cli)?;
    let ctx = AppContext::new(&config)?;
    debug!("Using API root {}", config.api_url);

    match &cli.resource {
        Resource::Ingredients { action } => dispatch::<Ingredient>(&ctx, action).await,
        Resource::Posts { action } => dispatch::<Post>(&ctx, action).await,
        Resource::Recipes { action } => dispatch::<Recipe>(&ctx, action).await,
        Resource::Reviews { action } => dispatch::<Review>(&ctx, action).await,
        Resource::Users { action } => dispatch::<User>(&ctx, action).await,
    }
}

/// Run one command and print its result; returns the process exit code
pub async fn run(cli: Cli) -> i32 {
    match execute(&cli).await {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                0
            }
            Err(err) => report(&err.into()),
        },
        Err(err) => report(&err),
    }
}

fn report(err: &anyhow::Error) -> i32 {
    eprintln!("{} {:#}", "error:".red().bold(), err);
    1
}

/// Run `action` for entity type `E` through the components of `ctx`
pub async fn dispatch<E: Entity>(ctx: &AppContext, action: &Action) -> Result<Value>
where
    AppContext: HasService<E>,
{
    let changes = ctx.events.subscribe_list_modified::<E, _>(|event| {
        info!("{}: {}", event.name, event.content);
    });
    let result = perform::<E>(ctx, action).await;
    ctx.events.destroy(&changes);
    result
}

async fn perform<E: Entity>(ctx: &AppContext, action: &Action) -> Result<Value>
where
    AppContext: HasService<E>,
{
    let name = E::resource().display_name();

    match action {
        Action::List { page, size, sort } => {
            let list = EntityListComponent::<E>::from_parts(
                ctx.service::<E>(),
                ctx.events.clone(),
                ctx.alerts.clone(),
                size.unwrap_or(ctx.items_per_page),
            );
            list.sort_by(sort.clone()).await;
            list.load_page(page.unwrap_or(0)).await?;
            let state = list.snapshot().await;
            if let Some(total) = state.total_items {
                info!("{} {} record(s) in total", total, name);
            }
            to_json_list(state.items)
        }
        Action::Search { term } => {
            let list = EntityListComponent::<E>::new(ctx);
            list.search(term).await?;
            let items = list.items().await;
            info!("{} {} record(s) match '{}'", items.len(), name, term);
            to_json_list(items)
        }
        Action::Get { id } => to_json(&EntityDetailComponent::<E>::new(ctx).load(*id).await?),
        Action::Create { json } => {
            let entity = parse_entity::<E>(json)?;
            if let Some(id) = entity.id() {
                bail!("a new {} cannot already have an id ({})", name, id);
            }
            save(ctx, entity).await
        }
        Action::Update { json } => {
            let entity = parse_entity::<E>(json)?;
            if entity.is_draft() {
                return Err(SyncError::missing_id(E::NAME).into());
            }
            save(ctx, entity).await
        }
        Action::Delete { id } => {
            let (active, _modal) = ActiveModal::open();
            EntityDeleteDialog::new(E::default(), active, ctx)
                .confirm_delete(*id)
                .await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

/// Save through an entity dialog: update when the entity has an id, else create
async fn save<E: Entity>(ctx: &AppContext, entity: E) -> Result<Value>
where
    AppContext: HasService<E>,
{
    let (active, _modal) = ActiveModal::open();
    let saved = EntityDialog::new(entity, active, ctx).save().await?;
    to_json(&saved)
}

/// Parse an entity from its wire JSON
pub fn parse_entity<E: Entity>(raw: &str) -> Result<E> {
    let wire: E::Wire = serde_json::from_str(raw)
        .with_context(|| format!("invalid {} JSON", E::resource().display_name()))?;
    Ok(E::from_wire(wire))
}

fn to_json<E: Entity>(entity: &E) -> Result<Value> {
    Ok(serde_json::to_value(entity.to_wire())?)
}

fn to_json_list<E: Entity>(entities: Vec<E>) -> Result<Value> {
    let wires: Vec<E::Wire> = entities.iter().map(|e| e.to_wire()).collect();
    Ok(serde_json::to_value(wires)?)
}

// ============================================================================
// Tests
// ============================================================================
