//! Selection state machine behind the searchable selector.
//!
//! Everything here is pure: rendering and input routing live in the parent
//! module, which drives this state through explicit transitions.

use serde::{Deserialize, Serialize};

/// One selectable entry. `value` identifies the option and must be unique
/// within a list; duplicates are not detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str, mode: MatchMode) -> bool {
        if self.label.to_lowercase().contains(needle) {
            return true;
        }
        match mode {
            MatchMode::Label => false,
            MatchMode::Extended => {
                self.value.to_lowercase().contains(needle)
                    || self
                        .name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(needle))
            }
        }
    }
}

/// Which fields a search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Label only.
    #[default]
    Label,
    /// Label, value or name (any of them).
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Indices of the options matching `term`, in their original order.
///
/// Matching is a case-insensitive substring test; an empty term matches
/// everything.
pub fn filter_options(options: &[SelectOption], term: &str, mode: MatchMode) -> Vec<usize> {
    if term.is_empty() {
        return (0..options.len()).collect();
    }

    let needle = term.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.matches(&needle, mode))
        .map(|(index, _)| index)
        .collect()
}

/// Volatile state of an open or closed selector.
///
/// `highlighted` is `None` or a valid index into `filtered`, never a stale
/// one: every recomputation of the filtered view clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    is_open: bool,
    search_term: String,
    highlighted: Option<usize>,
    selected_value: Option<String>,
    filtered: Vec<usize>,
}

impl SelectionState {
    pub fn new(options: &[SelectOption], selected_value: Option<String>) -> Self {
        Self {
            filtered: (0..options.len()).collect(),
            selected_value,
            ..Self::default()
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.selected_value.as_deref()
    }

    /// Indices into the option list of the rows currently shown.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    pub fn set_selected_value(&mut self, value: Option<String>) {
        self.selected_value = value.filter(|value| !value.is_empty());
    }

    /// Recompute the filtered view from the current term. Call whenever the
    /// option list itself is replaced.
    pub fn refilter(&mut self, options: &[SelectOption], mode: MatchMode) {
        self.filtered = filter_options(options, &self.search_term, mode);
        self.highlighted = None;
    }

    pub fn open(&mut self, options: &[SelectOption], mode: MatchMode) {
        self.is_open = true;
        self.search_term.clear();
        self.refilter(options, mode);
    }

    /// Close without touching the selection.
    pub fn close(&mut self, options: &[SelectOption], mode: MatchMode) {
        self.is_open = false;
        self.search_term.clear();
        self.refilter(options, mode);
    }

    pub fn set_search_term(&mut self, term: &str, options: &[SelectOption], mode: MatchMode) {
        self.search_term.clear();
        self.search_term.push_str(term);
        self.refilter(options, mode);
    }

    /// Move the highlight with wraparound. No-op on an empty filtered view.
    pub fn navigate(&mut self, direction: Direction) {
        let len = self.filtered.len();
        if len == 0 {
            return;
        }

        self.highlighted = Some(match (direction, self.highlighted) {
            (Direction::Down, Some(index)) if index + 1 < len => index + 1,
            (Direction::Down, _) => 0,
            (Direction::Up, Some(index)) if index > 0 => index - 1,
            (Direction::Up, _) => len - 1,
        });
    }

    /// Resolve the row to commit (`index` into the filtered view, or the
    /// highlighted row) and return the value to report.
    ///
    /// Committing the option that is already selected clears the
    /// selection: the reported value is then the empty string.
    pub fn commit(&mut self, index: Option<usize>, options: &[SelectOption], mode: MatchMode) -> Option<String> {
        let row = index.or(self.highlighted)?;
        let option = options.get(*self.filtered.get(row)?)?;

        let value = if self.selected_value.as_deref() == Some(option.value.as_str()) {
            String::new()
        } else {
            option.value.clone()
        };

        self.set_selected_value(Some(value.clone()));
        self.close(options, mode);
        Some(value)
    }
}
