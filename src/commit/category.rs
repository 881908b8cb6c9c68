//! Coarse file categorization by path.

use std::fmt;

/// Category of a changed file, used as the commit scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Components,
    Hooks,
    Api,
    Layout,
    Pages,
    Types,
    Utils,
    Styles,
    Config,
    Docs,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Components => "components",
            Category::Hooks => "hooks",
            Category::Api => "api",
            Category::Layout => "layout",
            Category::Pages => "pages",
            Category::Types => "types",
            Category::Utils => "utils",
            Category::Styles => "styles",
            Category::Config => "config",
            Category::Docs => "docs",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorize a path. Rules are checked in order on the lowercased path and
/// the first match wins.
pub fn categorize(path: &str) -> Option<Category> {
    let path = path.to_lowercase();
    let has = |needle: &str| path.contains(needle);

    if has("component") {
        Some(Category::Components)
    } else if has("hook") || path.starts_with("hooks/") {
        Some(Category::Hooks)
    } else if has("api/") || has("route") {
        Some(Category::Api)
    } else if has("app/") && has("layout") {
        Some(Category::Layout)
    } else if has("app/") && has("page") {
        Some(Category::Pages)
    } else if has("types/") || path.ends_with(".d.ts") {
        Some(Category::Types)
    } else if has("utils/") || has("lib/") {
        Some(Category::Utils)
    } else if has("styles/") || path.ends_with(".css") {
        Some(Category::Styles)
    } else if path.ends_with(".json") {
        Some(Category::Config)
    } else if path.ends_with(".md") {
        Some(Category::Docs)
    } else {
        None
    }
}
