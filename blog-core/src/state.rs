//! Session view state. Owned by the app controller and handed to the
//! renderers, which are pure functions of it.

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Main,
    /// Detail view for the article with this catalog filename.
    Article(String),
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub active_tag: Option<String>,
    pub search_term: String,
    pub view: View,
}

impl ViewState {
    /// Applies a tag-button click. An empty tag value means "all".
    /// Clicking the already-active tag is a no-op; returns whether the
    /// selection actually moved.
    pub fn set_active_tag(&mut self, tag: Option<&str>) -> bool {
        let normalized = tag.filter(|t| !t.is_empty()).map(ToOwned::to_owned);
        if normalized == self.active_tag {
            return false;
        }
        self.active_tag = normalized;
        true
    }

    pub fn show_main(&mut self) {
        self.view = View::Main;
    }

    pub fn show_article(&mut self, filename: impl Into<String>) {
        self.view = View::Article(filename.into());
    }

    pub fn current_article(&self) -> Option<&str> {
        match &self.view {
            View::Article(filename) => Some(filename),
            View::Main => None,
        }
    }
}
