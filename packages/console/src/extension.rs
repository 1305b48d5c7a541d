use crate::ThemeShim;

/// CSS class of the panel wrapping an extension.
pub const EXTENSION_PANEL_CLASS: &str = "alloy-main";

/// An extension embedded in a host console page.
#[derive(Debug, Clone)]
pub struct ConsoleExtension<E> {
    children: E,
    theme: ThemeShim,
}

impl<E> ConsoleExtension<E> {
    pub fn new(children: E) -> Self {
        Self {
            children,
            theme: ThemeShim::new(),
        }
    }

    pub fn children(&self) -> &E {
        &self.children
    }

    pub fn panel_class(&self) -> &'static str {
        EXTENSION_PANEL_CLASS
    }

    pub fn theme(&self) -> &ThemeShim {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeShim {
        &mut self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_host::HostData;

    #[test]
    fn wraps_children_in_panel() {
        let mut extension = ConsoleExtension::new("hello");
        assert_eq!(*extension.children(), "hello");
        assert_eq!(extension.panel_class(), "alloy-main");

        extension
            .theme_mut()
            .apply(Some(&HostData::with_theme("theme-dark")));
        assert!(extension.theme().is_dark());
    }
}
