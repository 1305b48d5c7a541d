use std::sync::Arc;

use alloy_collection_store::CollectionStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::Error;

/// Theme identifier the host reports when dark mode is active.
pub const DARK_THEME: &str = "theme-dark";

/// Data the host pushes to the extension, on connect and whenever it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Fields this crate does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostData {
    pub fn with_theme(theme: impl Into<String>) -> Self {
        Self {
            theme: Some(theme.into()),
            extra: Map::new(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.theme.as_deref() == Some(DARK_THEME)
    }
}

/// Result of the connection handshake.
#[derive(Debug, Clone, Default)]
pub struct Connection {
    pub connected: bool,
    pub data: Option<HostData>,
}

/// Performs the host-specific handshake.
#[async_trait]
pub trait HostConnector: Send + Sync {
    async fn connect(&self) -> Result<Connection, Error>;
}

/// A connector that reports a fixed handshake result.
///
/// Used when the extension runs outside the host console, e.g. from the CLI.
pub struct StaticConnector {
    connection: Connection,
}

impl StaticConnector {
    pub fn connected(data: Option<HostData>) -> Self {
        Self {
            connection: Connection {
                connected: true,
                data,
            },
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connection: Connection::default(),
        }
    }
}

#[async_trait]
impl HostConnector for StaticConnector {
    async fn connect(&self) -> Result<Connection, Error> {
        Ok(self.connection.clone())
    }
}

/// Observes whether the host session is ready for facade calls.
#[derive(Debug, Clone)]
pub struct Readiness(watch::Receiver<bool>);

impl Readiness {
    /// A gate pinned open or closed, for components used without a session.
    pub fn fixed(ready: bool) -> Self {
        let (_tx, rx) = watch::channel(ready);
        Self(rx)
    }

    pub fn is_ready(&self) -> bool {
        *self.0.borrow()
    }

    /// Resolve once the gate is open.
    pub async fn wait_ready(&self) -> Result<(), Error> {
        let mut rx = self.0.clone();
        rx.wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| Error::Closed)
    }
}

/// One extension's session with its host.
///
/// # Example
///
/// ```rust,ignore
/// let session = HostSession::new(Arc::new(store));
/// session.connect(&connector).await?;
///
/// let editor = CollectionEditor::new(session.store(), session.readiness(), config);
/// ```
pub struct HostSession {
    store: Arc<dyn CollectionStore>,
    ready: watch::Sender<bool>,
    data: watch::Sender<Option<HostData>>,
}

impl HostSession {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        let (ready, _) = watch::channel(false);
        let (data, _) = watch::channel(None);
        Self { store, ready, data }
    }

    /// Run the handshake and publish its result.
    pub async fn connect(&self, connector: &dyn HostConnector) -> Result<(), Error> {
        if *self.ready.borrow() {
            return Err(Error::AlreadyConnected);
        }

        let connection = connector.connect().await?;
        tracing::info!(connected = connection.connected, "host handshake complete");

        self.data.send_replace(connection.data);
        self.ready.send_replace(connection.connected);
        Ok(())
    }

    /// Relay a host data event.
    pub fn publish_data(&self, data: HostData) {
        tracing::debug!(theme = ?data.theme, "host data updated");
        self.data.send_replace(Some(data));
    }

    /// Close the readiness gate.
    pub fn disconnect(&self) {
        self.ready.send_replace(false);
    }

    pub fn is_initialized(&self) -> bool {
        *self.ready.borrow()
    }

    pub fn readiness(&self) -> Readiness {
        Readiness(self.ready.subscribe())
    }

    pub fn data(&self) -> watch::Receiver<Option<HostData>> {
        self.data.subscribe()
    }

    pub fn current_data(&self) -> Option<HostData> {
        self.data.borrow().clone()
    }

    /// The facade; only call it once [`is_initialized`](Self::is_initialized).
    pub fn store(&self) -> Arc<dyn CollectionStore> {
        self.store.clone()
    }
}
