//! Fragment routing. The fragment (the part of a URL after `#`) is the
//! only navigation state: empty means the article list, anything else is
//! a percent-encoded article slug.

use tracing::debug;

use crate::catalog::{Article, Catalog};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Main,
    Article(String),
}

/// Fragment for an article: its slug, percent-encoded.
pub fn encode_fragment(article: &Article) -> String {
    urlencoding::encode(&article.slug()).into_owned()
}

/// Resolves the current fragment against the catalog. Total: an empty,
/// undecodable or unknown fragment falls back to the main view.
pub fn handle_location_change(fragment: &str, catalog: &Catalog) -> Route {
    if fragment.is_empty() {
        return Route::Main;
    }
    let decoded = match urlencoding::decode(fragment) {
        Ok(slug) => slug,
        Err(err) => {
            debug!(%fragment, error = %err, "undecodable fragment, falling back to main view");
            return Route::Main;
        }
    };
    match catalog.find_by_slug(&decoded) {
        Some(article) => Route::Article(article.filename.clone()),
        None => Route::Main,
    }
}

/// Stand-in for the browser address bar: the current fragment plus
/// back/forward history. `replace` rewrites the fragment without touching
/// history and never re-dispatches, mirroring a programmatic hash write.
#[derive(Debug, Clone, Default)]
pub struct AddressBar {
    current: String,
    back: Vec<String>,
    forward: Vec<String>,
}

impl AddressBar {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.current
    }

    /// User-style navigation: pushes the old fragment onto the back stack
    /// and clears the forward stack.
    pub fn navigate(&mut self, fragment: impl Into<String>) {
        let fragment = fragment.into();
        if fragment == self.current {
            return;
        }
        self.back.push(std::mem::replace(&mut self.current, fragment));
        self.forward.clear();
    }

    /// Programmatic rewrite: history stays untouched.
    pub fn replace(&mut self, fragment: impl Into<String>) {
        self.current = fragment.into();
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Moves one entry back and returns the restored fragment, which the
    /// caller is expected to re-dispatch through `handle_location_change`.
    pub fn back(&mut self) -> Option<&str> {
        let previous = self.back.pop()?;
        self.forward
            .push(std::mem::replace(&mut self.current, previous));
        Some(&self.current)
    }

    pub fn forward(&mut self) -> Option<&str> {
        let next = self.forward.pop()?;
        self.back.push(std::mem::replace(&mut self.current, next));
        Some(&self.current)
    }
}
