/// Transition produced by [`Selection::set`] when the selected name changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<String>,
    pub current: Option<String>,
}

impl SelectionChange {
    pub fn is_cleared(&self) -> bool {
        self.current.is_none()
    }
}

/// At most one selected location name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<String>,
}

impl Selection {
    pub const fn new() -> Self {
        Self { current: None }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.current.as_deref() == Some(name)
    }

    /// Replaces the selection and reports the transition, or `None` when
    /// nothing changed.
    pub fn set(&mut self, next: Option<String>) -> Option<SelectionChange> {
        if self.current == next {
            return None;
        }
        let previous = std::mem::replace(&mut self.current, next);
        Some(SelectionChange {
            previous,
            current: self.current.clone(),
        })
    }

    /// Selects `name`, or deselects it when it is already the selection.
    pub fn toggle(&mut self, name: &str) -> Option<SelectionChange> {
        if self.is_selected(name) {
            self.set(None)
        } else {
            self.set(Some(name.to_string()))
        }
    }

    pub fn clear(&mut self) -> Option<SelectionChange> {
        self.set(None)
    }

    /// Programmatic change that produces no transition.
    pub fn restore(&mut self, next: Option<String>) {
        self.current = next;
    }
}
