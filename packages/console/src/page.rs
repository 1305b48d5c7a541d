//! Full-page layout with optional route-driven navigation.

use serde::Serialize;

/// One navigable page of a multi-page [`ConsolePage`].
#[derive(Debug, Clone)]
pub struct Route<E> {
    /// e.g. `/home`; also usable to deep-link from host navigation.
    pub path: String,
    /// Navigation label. Not added as a heading.
    pub title: String,
    pub element: E,
}

impl<E> Route<E> {
    pub fn new(path: impl Into<String>, title: impl Into<String>, element: E) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            element,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: String,
    pub title: String,
    pub active: bool,
}

/// What a page shows for one location.
#[derive(Debug)]
pub struct PageLayout<'a, E> {
    pub masthead: &'a str,
    /// Present only for pages with routes.
    pub sidebar: Option<Vec<NavItem>>,
    pub children: Option<&'a E>,
    /// Element of the route matching the location, if any.
    pub routed: Option<&'a E>,
}

/// A full host console page.
///
/// Single pages pass children; multi-page apps pass routes, and the sidebar
/// is generated from them.
#[derive(Debug, Clone)]
pub struct ConsolePage<E> {
    title: String,
    children: Option<E>,
    routes: Option<Vec<Route<E>>>,
}

impl<E> ConsolePage<E> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: None,
            routes: None,
        }
    }

    pub fn with_children(mut self, children: E) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_route(mut self, route: Route<E>) -> Self {
        self.routes.get_or_insert_with(Vec::new).push(route);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn routes(&self) -> &[Route<E>] {
        self.routes.as_deref().unwrap_or_default()
    }

    pub fn layout(&self, location: &HashLocation) -> PageLayout<'_, E> {
        let sidebar = self.routes.as_ref().map(|routes| {
            routes
                .iter()
                .map(|route| NavItem {
                    path: route.path.clone(),
                    title: route.title.clone(),
                    active: route.path == location.path(),
                })
                .collect()
        });

        let routed = self
            .routes()
            .iter()
            .find(|route| route.path == location.path())
            .map(|route| &route.element);

        PageLayout {
            masthead: &self.title,
            sidebar,
            children: self.children.as_ref(),
            routed,
        }
    }
}

/// The path carried in a URL fragment, e.g. `#/settings`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLocation {
    path: String,
}

impl HashLocation {
    pub fn parse(fragment: &str) -> Self {
        let trimmed = fragment.strip_prefix('#').unwrap_or(fragment);
        // Query strings are not part of the route path.
        let path = trimmed.split('?').next().unwrap_or_default();
        let path = if path.is_empty() {
            "/".to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        Self { path }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Default for HashLocation {
    fn default() -> Self {
        Self::parse("")
    }
}
