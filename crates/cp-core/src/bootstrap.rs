//! Page detection for the bootstrap.

/// Answers whether a piece of page markup exists.
pub trait PageProbe {
    fn has(&self, selector: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    Game,
    Favorites,
    Gallery,
    Generate,
}

impl PageKind {
    pub const ALL: [PageKind; 5] = [
        PageKind::Home,
        PageKind::Game,
        PageKind::Favorites,
        PageKind::Gallery,
        PageKind::Generate,
    ];

    /// Selector whose presence activates this page.
    pub fn marker(self) -> &'static str {
        match self {
            PageKind::Home => "#explorer-toggle",
            PageKind::Game => ".card-container",
            PageKind::Favorites => "#favorites-container",
            PageKind::Gallery => "#gallery-grid",
            PageKind::Generate => "#generate-btn",
        }
    }
}

pub fn detect_pages(probe: &impl PageProbe) -> Vec<PageKind> {
    PageKind::ALL
        .into_iter()
        .filter(|page| probe.has(page.marker()))
        .collect()
}

/// Last path segment, `index.html` for the site root.
pub fn current_page_name(pathname: &str) -> &str {
    match pathname.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "index.html",
    }
}

pub fn header_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Markup(&'static [&'static str]);

    impl PageProbe for Markup {
        fn has(&self, selector: &str) -> bool {
            self.0.iter().any(|s| *s == selector)
        }
    }

    #[test]
    fn detects_each_present_page() {
        assert_eq!(detect_pages(&Markup(&[".card-container"])), vec![PageKind::Game]);
        assert_eq!(
            detect_pages(&Markup(&["#explorer-toggle", "#favorites-container"])),
            vec![PageKind::Home, PageKind::Favorites]
        );
        assert!(detect_pages(&Markup(&["#unrelated"])).is_empty());
    }

    #[test]
    fn page_name_from_path() {
        assert_eq!(current_page_name("/site/gallery.html"), "gallery.html");
        assert_eq!(current_page_name("/"), "index.html");
        assert_eq!(current_page_name(""), "index.html");
        assert_eq!(current_page_name("favorites.html"), "favorites.html");
    }

    #[test]
    fn header_threshold_is_exclusive() {
        assert!(!header_scrolled(50.0, 50.0));
        assert!(header_scrolled(50.5, 50.0));
    }
}
