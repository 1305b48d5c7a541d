//! # alloy-console
//!
//! Layout building blocks for extensions shown inside the host console.
//!
//! - [`ConsolePage`]: a full page with a masthead and, for multi-page apps,
//!   a sidebar generated from its routes.
//! - [`ConsoleExtension`]: an embedded panel.
//! - [`ThemeShim`]: keeps the document's theme classes in step with the
//!   theme the host reports.
//!
//! These types describe what to draw; drawing is left to the UI toolkit.

mod extension;
mod page;
mod theme;

pub use extension::{ConsoleExtension, EXTENSION_PANEL_CLASS};
pub use page::{ConsolePage, HashLocation, NavItem, PageLayout, Route};
pub use theme::{ThemeChange, ThemeShim, DARK_THEME_CLASS};
