//! Focus and pane state for the two-column layout.
//!
//! The screen is a nav bar (logo, search box, result count) above two boxes:
//! the result list on the left and, on the right, either the details pane or
//! the watched summary and list. Exactly one of the search box and the two
//! boxes has keyboard focus.

/// Which area receives keys that no global binding claimed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    /// Typing into the search box. Characters edit the query.
    #[default]
    SearchInput,

    /// Moving through search results with j/k.
    Results,

    /// The right-hand box: the details pane while viewing, the watched list otherwise.
    SidePane,
}

impl Focus {
    /// Next focus target for Tab.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::SearchInput => Self::Results,
            Self::Results => Self::SidePane,
            Self::SidePane => Self::SearchInput,
        }
    }

    /// Previous focus target for Shift+Tab.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::SearchInput => Self::SidePane,
            Self::Results => Self::SearchInput,
            Self::SidePane => Self::Results,
        }
    }
}

/// The two collapsible boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneBox {
    Results,
    Side,
}

/// Open/closed state of both boxes. Both start open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxState {
    pub results_open: bool,
    pub side_open: bool,
}

impl Default for BoxState {
    fn default() -> Self {
        Self {
            results_open: true,
            side_open: true,
        }
    }
}

impl BoxState {
    pub fn toggle(&mut self, pane: PaneBox) {
        match pane {
            PaneBox::Results => self.results_open = !self.results_open,
            PaneBox::Side => self.side_open = !self.side_open,
        }
    }

    #[must_use]
    pub const fn is_open(self, pane: PaneBox) -> bool {
        match pane {
            PaneBox::Results => self.results_open,
            PaneBox::Side => self.side_open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_cycles_through_every_area() {
        let start = Focus::SearchInput;
        assert_eq!(start.next().next().next(), start);
        assert_eq!(start.next().previous(), start);
    }

    #[test]
    fn boxes_toggle_independently() {
        let mut boxes = BoxState::default();
        boxes.toggle(PaneBox::Side);
        assert!(boxes.is_open(PaneBox::Results));
        assert!(!boxes.is_open(PaneBox::Side));
        boxes.toggle(PaneBox::Side);
        assert!(boxes.is_open(PaneBox::Side));
    }
}
