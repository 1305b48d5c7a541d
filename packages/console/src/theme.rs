use std::collections::BTreeSet;

use alloy_host::HostData;
use tokio::sync::watch;

/// Root document class that switches the UI toolkit to its dark palette.
pub const DARK_THEME_CLASS: &str = "pf-v6-theme-dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    Unchanged,
    Added,
    Removed,
}

/// Tracks the classes on the document root that follow the host theme.
#[derive(Debug, Clone, Default)]
pub struct ThemeShim {
    classes: BTreeSet<String>,
}

impl ThemeShim {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn is_dark(&self) -> bool {
        self.classes.contains(DARK_THEME_CLASS)
    }

    /// Apply one host data snapshot. No data yet means no change.
    pub fn apply(&mut self, data: Option<&HostData>) -> ThemeChange {
        let Some(data) = data else {
            return ThemeChange::Unchanged;
        };

        if data.is_dark() {
            if self.classes.insert(DARK_THEME_CLASS.to_string()) {
                return ThemeChange::Added;
            }
        } else if self.classes.remove(DARK_THEME_CLASS) {
            return ThemeChange::Removed;
        }
        ThemeChange::Unchanged
    }

    /// Apply the current snapshot and every later one until the session
    /// goes away, calling `on_change` after each actual change.
    pub async fn follow(
        &mut self,
        mut data: watch::Receiver<Option<HostData>>,
        mut on_change: impl FnMut(&ThemeShim, ThemeChange),
    ) {
        loop {
            let snapshot = data.borrow_and_update().clone();
            let change = self.apply(snapshot.as_ref());
            if change != ThemeChange::Unchanged {
                tracing::debug!(?change, "theme updated");
                on_change(self, change);
            }
            if data.changed().await.is_err() {
                break;
            }
        }
    }
}
