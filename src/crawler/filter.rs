//! Removal of unwanted elements (navigation, menus, banners) from pages

use crate::config::FilterConfig;
use scraper::Html;

/// Strips elements by id and by class from a document
#[derive(Debug, Clone, Default)]
pub struct ElementFilter {
    ids: Vec<String>,
    classes: Vec<String>,
}

impl ElementFilter {
    /// Creates a filter; blank selectors are dropped
    pub fn new<I, C>(ids: I, classes: C) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        fn clean<T: Into<String>>(items: impl IntoIterator<Item = T>) -> Vec<String> {
            items
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.trim().is_empty())
                .collect()
        }

        Self {
            ids: clean(ids),
            classes: clean(classes),
        }
    }

    /// Builds the filter from the `[filters]` config section
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.ids.iter().cloned(), config.classes.iter().cloned())
    }

    /// Returns true if the filter would never remove anything
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.classes.is_empty()
    }

    /// Removes matching elements, with their subtrees, from `document`
    ///
    /// Id filters run first and remove the first element carrying that id.
    /// Class filters then remove every remaining element whose `class`
    /// attribute contains the token as a substring, so `menu` also strips
    /// `class="menu thin-scrollbar"` and `class="navmenu"`.
    pub fn apply(&self, document: &mut Html) {
        for id in &self.ids {
            let target = document
                .tree
                .root()
                .descendants()
                .find(|node| {
                    node.value()
                        .as_element()
                        .and_then(|el| el.attr("id"))
                        .is_some_and(|value| value == id.as_str())
                })
                .map(|node| node.id());

            if let Some(mut node) = target.and_then(|id| document.tree.get_mut(id)) {
                node.detach();
            }
        }

        for class in &self.classes {
            let targets: Vec<_> = document
                .tree
                .root()
                .descendants()
                .filter(|node| {
                    node.value()
                        .as_element()
                        .and_then(|el| el.attr("class"))
                        .is_some_and(|value| value.contains(class.as_str()))
                })
                .map(|node| node.id())
                .collect();

            // Nested matches are detached from an already-detached parent, which is harmless
            for target in targets {
                if let Some(mut node) = document.tree.get_mut(target) {
                    node.detach();
                }
            }
        }
    }
}

/// Applies id and class filters to `document` in place
pub fn filter_elements(document: &mut Html, ids: &[String], classes: &[String]) {
    ElementFilter::new(ids.iter().cloned(), classes.iter().cloned()).apply(document);
}
