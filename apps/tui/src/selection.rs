//! District selector: a searchless dropdown over the district catalog.

use std::fmt;

use crate::domain::{DistrictCatalog, DistrictKey};

/// One dropdown entry. `id` is the district key, `text` the shortened label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: DistrictKey,
    pub text: String,
}

impl SelectOption {
    pub fn new(key: &str, label_prefix: &str) -> Self {
        let text = if label_prefix.is_empty() {
            key.to_string()
        } else {
            key.replacen(label_prefix, "", 1)
        };

        Self {
            id: key.to_string(),
            text,
        }
    }
}

type ChangeHandler = Box<dyn FnMut(&DistrictKey) + Send>;

#[derive(Default)]
pub struct SelectionController {
    options: Vec<SelectOption>,
    selected: Option<usize>,
    highlighted: usize,
    handlers: Vec<ChangeHandler>,
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("options", &self.options)
            .field("selected", &self.selected)
            .field("highlighted", &self.highlighted)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the options with one entry per catalog key and selects the first.
    pub fn populate(&mut self, catalog: &DistrictCatalog, label_prefix: &str) {
        self.options = catalog
            .iter()
            .map(|key| SelectOption::new(key, label_prefix))
            .collect();
        self.selected = if self.options.is_empty() { None } else { Some(0) };
        self.highlighted = 0;
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn current_selection(&self) -> Option<&DistrictKey> {
        self.current_option().map(|option| &option.id)
    }

    pub fn current_option(&self) -> Option<&SelectOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Registers a handler called with the new key on every selection change.
    pub fn on_change(&mut self, handler: impl FnMut(&DistrictKey) + Send + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Selects the option at `index`. Handlers only run if the selection changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.options.len() || self.selected == Some(index) {
            return false;
        }

        self.selected = Some(index);
        self.highlighted = index;
        let key = self.options[index].id.clone();
        for handler in &mut self.handlers {
            handler(&key);
        }
        true
    }

    pub fn select_key(&mut self, key: &str) -> bool {
        self.position(key).is_some_and(|index| self.select(index))
    }

    /// Sets the initial value without notifying handlers.
    pub fn preselect(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) => {
                self.selected = Some(index);
                self.highlighted = index;
                true
            }
            None => false,
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.options.iter().position(|option| option.id == key)
    }

    pub const fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlight_next(&mut self) {
        self.highlighted = wrap_increment(self.highlighted, self.options.len());
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = wrap_decrement(self.highlighted, self.options.len());
    }

    pub fn select_highlighted(&mut self) -> bool {
        self.select(self.highlighted)
    }

    /// Moves the highlight back onto the current selection.
    pub fn reset_highlight(&mut self) {
        self.highlighted = self.selected.unwrap_or(0);
    }
}

const fn wrap_decrement(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    if index == 0 {
        len - 1
    } else {
        index - 1
    }
}

const fn wrap_increment(index: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }

    (index + 1) % len
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn catalog(keys: &[&str]) -> DistrictCatalog {
        let mut catalog = DistrictCatalog::new();
        for key in keys {
            catalog.push_unique(key);
        }
        catalog
    }

    fn recorder(selector: &mut SelectionController) -> Arc<Mutex<Vec<DistrictKey>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        selector.on_change(move |key| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(key.clone());
            }
        });
        seen
    }

    fn seen(log: &Arc<Mutex<Vec<DistrictKey>>>) -> Vec<DistrictKey> {
        log.lock().map(|seen| seen.clone()).unwrap_or_default()
    }

    #[test]
    fn populate_strips_prefix_and_selects_first() {
        let mut selector = SelectionController::new();
        selector.populate(&catalog(&["臺北市中正區", "臺北市大同區"]), "臺北市");

        assert_eq!(
            selector.options(),
            [
                SelectOption {
                    id: "臺北市中正區".to_string(),
                    text: "中正區".to_string(),
                },
                SelectOption {
                    id: "臺北市大同區".to_string(),
                    text: "大同區".to_string(),
                },
            ]
        );
        assert_eq!(selector.current_selection().map(String::as_str), Some("臺北市中正區"));
    }

    #[test]
    fn label_without_prefix_is_kept_whole() {
        assert_eq!(SelectOption::new("新北市板橋區", "臺北市").text, "新北市板橋區");
        assert_eq!(SelectOption::new("臺北市中山區", "").text, "臺北市中山區");
    }

    #[test]
    fn empty_catalog_has_no_selection() {
        let mut selector = SelectionController::new();
        selector.populate(&DistrictCatalog::new(), "臺北市");

        assert!(selector.current_selection().is_none());
        assert!(!selector.select(0));
    }

    #[test]
    fn select_notifies_handlers_on_change_only() {
        let mut selector = SelectionController::new();
        selector.populate(&catalog(&["臺北市中正區", "臺北市大同區"]), "臺北市");
        let log = recorder(&mut selector);

        assert!(selector.select(1));
        assert!(!selector.select(1));
        assert!(!selector.select(7));
        assert!(selector.select_key("臺北市中正區"));

        assert_eq!(seen(&log), ["臺北市大同區", "臺北市中正區"]);
    }

    #[test]
    fn preselect_is_silent() {
        let mut selector = SelectionController::new();
        selector.populate(&catalog(&["臺北市中正區", "臺北市大同區"]), "臺北市");
        let log = recorder(&mut selector);

        assert!(selector.preselect("臺北市大同區"));
        assert!(!selector.preselect("臺北市信義區"));

        assert_eq!(selector.current_selection().map(String::as_str), Some("臺北市大同區"));
        assert!(seen(&log).is_empty());
    }

    #[test]
    fn highlight_wraps_and_commits() {
        let mut selector = SelectionController::new();
        selector.populate(&catalog(&["臺北市中正區", "臺北市大同區", "臺北市中山區"]), "臺北市");
        let log = recorder(&mut selector);

        selector.highlight_prev();
        assert_eq!(selector.highlighted(), 2);
        selector.highlight_next();
        assert_eq!(selector.highlighted(), 0);
        selector.highlight_next();
        assert!(selector.select_highlighted());

        selector.highlight_next();
        selector.reset_highlight();
        assert_eq!(selector.highlighted(), 1);
        assert_eq!(seen(&log), ["臺北市大同區"]);
    }
}
