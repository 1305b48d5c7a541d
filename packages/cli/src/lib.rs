//! # alloy-cli
//!
//! Drives the collection object editor from the command line, against a
//! local directory of collections or the host's REST API.
//!
//! ```bash
//! alloy --store-dir ./data load --collection config --key default
//! alloy --store-dir ./data save --collection config --key default --value '{"enabled": true}'
//! alloy --endpoint https://api.example.com --token "$TOKEN" get --collection config --key default
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use alloy_collection_store::{CollectionStore, HttpCollectionStore, LocalDiskCollectionStore};
use alloy_editor::{
    query_collection_object, Action, CollectionEditor, Dispatch, EditorConfig, Severity,
};
use alloy_host::{HostSession, StaticConnector};

/// alloy - edit collection objects of a console extension
#[derive(Parser, Debug)]
#[command(name = "alloy")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub backend: Backend,

    /// Bearer token for --endpoint
    #[arg(long, requires = "endpoint", conflicts_with = "store_dir")]
    pub token: Option<String>,

    /// Editor config (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Backend {
    /// Directory holding one subdirectory per collection
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Base URL of the host API
    #[arg(long)]
    pub endpoint: Option<String>,
}

#[derive(clap::Args, Debug, Default)]
pub struct Target {
    /// Collection name (defaults to the config's)
    #[arg(long)]
    pub collection: Option<String>,

    /// Object key (defaults to the config's)
    #[arg(long)]
    pub key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load an object and print it
    Load(Target),
    /// Save a JSON value under a key
    Save {
        #[command(flatten)]
        target: Target,
        /// Object value as JSON text
        #[arg(long)]
        value: String,
    },
    /// Delete an object
    Delete(Target),
    /// Read an object once, printing only the value or the error
    Get(Target),
}

/// Run one command, writing results to stdout. Returns the exit code.
pub async fn run(args: Args) -> anyhow::Result<i32> {
    let stdout = std::io::stdout();
    execute(args, &mut stdout.lock()).await
}

pub async fn execute(args: Args, out: &mut impl Write) -> anyhow::Result<i32> {
    let store = open_store(&args)?;
    let session = HostSession::new(store);
    session
        .connect(&StaticConnector::connected(None))
        .await
        .context("connecting to host")?;

    let config = match &args.config {
        Some(path) => EditorConfig::from_file(path)?,
        None => EditorConfig::default(),
    };

    let (action, target, value) = match args.command {
        Command::Load(target) => (Action::Load, target, None),
        Command::Save { target, value } => (Action::Save, target, Some(value)),
        Command::Delete(target) => (Action::Delete, target, None),
        Command::Get(target) => {
            let collection = target
                .collection
                .unwrap_or_else(|| config.collection_name_default.clone());
            let key = target
                .key
                .unwrap_or_else(|| config.object_key_default.clone());
            let query =
                query_collection_object(&*session.store(), &session.readiness(), &collection, &key)
                    .await;
            return match (query.value, query.error) {
                (Some(value), _) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                    Ok(0)
                }
                (None, error) => {
                    writeln!(out, "error: {}", error.unwrap_or_default())?;
                    Ok(1)
                }
            };
        }
    };

    let editor = CollectionEditor::new(session.store(), session.readiness(), config);
    if let Some(collection) = target.collection {
        if !editor.set_collection_name(collection) {
            bail!("collection name is locked by the editor config");
        }
    }
    if let Some(key) = target.key {
        if !editor.set_object_key(key) {
            bail!("object key is locked by the editor config");
        }
    }
    if let Some(value) = value {
        editor.set_object_value(value);
    }

    let dispatch = editor.trigger(action).await;
    tracing::debug!(?action, ?dispatch, "command finished");

    let severity = editor.notification().map(|n| n.severity);
    if let Some(notification) = editor.notification() {
        writeln!(out, "{}", notification)?;
    }
    // Only a found object or the default replaces the buffer.
    if action == Action::Load
        && dispatch == Dispatch::Completed
        && matches!(severity, Some(Severity::Success | Severity::Info))
    {
        writeln!(out, "{}", editor.object_value())?;
    }

    Ok(exit_code(dispatch, severity))
}

fn open_store(args: &Args) -> anyhow::Result<Arc<dyn CollectionStore>> {
    if let Some(dir) = &args.backend.store_dir {
        if args.token.is_some() {
            bail!("--token is only used with --endpoint");
        }
        let store = LocalDiskCollectionStore::new(dir.clone())
            .with_context(|| format!("opening store at {}", dir.display()))?;
        return Ok(Arc::new(store));
    }
    if let Some(endpoint) = &args.backend.endpoint {
        let mut store = HttpCollectionStore::new(endpoint)?;
        if let Some(token) = &args.token {
            store = store.with_token(token.clone());
        }
        return Ok(Arc::new(store));
    }
    bail!("either --store-dir or --endpoint is required")
}

fn exit_code(dispatch: Dispatch, severity: Option<Severity>) -> i32 {
    match (dispatch, severity) {
        (Dispatch::Completed, Some(Severity::Danger | Severity::Warning)) => 1,
        (Dispatch::Completed, _) => 0,
        _ => 1,
    }
}
