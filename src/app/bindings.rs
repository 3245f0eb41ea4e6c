//! Global key bindings owned by views.
//!
//! A view that wants to react to a key regardless of where focus is (the
//! search box grabbing `Enter`, the details pane grabbing `Escape`) registers
//! a binding when it mounts and releases it when it unmounts. Bindings are
//! plain data: dispatching a key returns the events bound to it, and the
//! caller feeds those back into the event handler.

use std::fmt;

/// Keys the plugin distinguishes, independent of the host's key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(' ') => f.write_str("Space"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Enter => f.write_str("Enter"),
            Self::Escape => f.write_str("Esc"),
            Self::Backspace => f.write_str("Backspace"),
            Self::Tab => f.write_str("Tab"),
            Self::BackTab => f.write_str("Shift+Tab"),
            Self::Up => f.write_str("↑"),
            Self::Down => f.write_str("↓"),
            Self::Left => f.write_str("←"),
            Self::Right => f.write_str("→"),
        }
    }
}

/// Views that can own bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingOwner {
    SearchBox,
    DetailsPane,
}

/// When a binding is allowed to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingGuard {
    Always,
    /// Suppressed while the search input has focus, so typing is never hijacked.
    SearchUnfocused,
}

/// Focus facts a guard is evaluated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    pub search_focused: bool,
}

/// Identifies one registration; stale handles release nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingHandle(u64);

#[derive(Debug, Clone)]
struct Binding<E> {
    handle: BindingHandle,
    owner: BindingOwner,
    key: Key,
    guard: BindingGuard,
    event: E,
}

/// Registry of active global bindings.
///
/// At most one binding exists per `(owner, key)`: binding again replaces the
/// previous event and invalidates its handle.
///
/// # Examples
///
/// ```
/// use popcorn::app::bindings::{BindingGuard, BindingOwner, DispatchContext, Key, KeyBindings};
///
/// let mut bindings = KeyBindings::default();
/// bindings.bind(BindingOwner::DetailsPane, Key::Escape, BindingGuard::Always, "close");
///
/// let ctx = DispatchContext::default();
/// assert_eq!(bindings.dispatch(Key::Escape, ctx), vec!["close"]);
///
/// bindings.release_owner(BindingOwner::DetailsPane);
/// assert!(bindings.dispatch(Key::Escape, ctx).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct KeyBindings<E> {
    next_handle: u64,
    bindings: Vec<Binding<E>>,
}

impl<E> Default for KeyBindings<E> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            bindings: Vec::new(),
        }
    }
}

impl<E: Clone> KeyBindings<E> {
    /// Registers `event` for `key` on behalf of `owner`.
    pub fn bind(&mut self, owner: BindingOwner, key: Key, guard: BindingGuard, event: E) -> BindingHandle {
        self.next_handle += 1;
        let handle = BindingHandle(self.next_handle);

        let binding = Binding {
            handle,
            owner,
            key,
            guard,
            event,
        };

        if let Some(existing) = self
            .bindings
            .iter_mut()
            .find(|b| b.owner == owner && b.key == key)
        {
            tracing::trace!(?owner, %key, "replacing key binding");
            *existing = binding;
        } else {
            tracing::trace!(?owner, %key, "adding key binding");
            self.bindings.push(binding);
        }

        handle
    }

    /// Removes one binding. Returns `false` if the handle was already released or replaced.
    pub fn release(&mut self, handle: BindingHandle) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|b| b.handle != handle);
        before != self.bindings.len()
    }

    /// Removes every binding registered by `owner`.
    pub fn release_owner(&mut self, owner: BindingOwner) {
        self.bindings.retain(|b| b.owner != owner);
    }

    /// Events bound to exactly `key` whose guard passes, in registration order.
    #[must_use]
    pub fn dispatch(&self, key: Key, ctx: DispatchContext) -> Vec<E> {
        self.bindings
            .iter()
            .filter(|b| b.key == key)
            .filter(|b| match b.guard {
                BindingGuard::Always => true,
                BindingGuard::SearchUnfocused => !ctx.search_focused,
            })
            .map(|b| b.event.clone())
            .collect()
    }

    #[must_use]
    pub fn is_bound(&self, owner: BindingOwner, key: Key) -> bool {
        self.bindings.iter().any(|b| b.owner == owner && b.key == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNFOCUSED: DispatchContext = DispatchContext { search_focused: false };
    const FOCUSED: DispatchContext = DispatchContext { search_focused: true };

    #[test]
    fn dispatch_requires_exact_key() {
        let mut bindings = KeyBindings::default();
        bindings.bind(BindingOwner::SearchBox, Key::Enter, BindingGuard::Always, 1);

        assert!(bindings.dispatch(Key::Char('\n'), UNFOCUSED).is_empty());
        assert!(bindings.dispatch(Key::Escape, UNFOCUSED).is_empty());
        assert_eq!(bindings.dispatch(Key::Enter, UNFOCUSED), vec![1]);
    }

    #[test]
    fn search_unfocused_guard_is_skipped_while_typing() {
        let mut bindings = KeyBindings::default();
        bindings.bind(BindingOwner::SearchBox, Key::Enter, BindingGuard::SearchUnfocused, "focus");

        assert!(bindings.dispatch(Key::Enter, FOCUSED).is_empty());
        assert_eq!(bindings.dispatch(Key::Enter, UNFOCUSED), vec!["focus"]);
    }

    #[test]
    fn rebinding_replaces_instead_of_duplicating() {
        let mut bindings = KeyBindings::default();
        let old = bindings.bind(BindingOwner::DetailsPane, Key::Escape, BindingGuard::Always, "old");
        bindings.bind(BindingOwner::DetailsPane, Key::Escape, BindingGuard::Always, "new");

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.dispatch(Key::Escape, UNFOCUSED), vec!["new"]);
        assert!(!bindings.release(old));
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn release_removes_only_that_binding() {
        let mut bindings = KeyBindings::default();
        let enter = bindings.bind(BindingOwner::SearchBox, Key::Enter, BindingGuard::Always, 1);
        bindings.bind(BindingOwner::DetailsPane, Key::Escape, BindingGuard::Always, 2);

        assert!(bindings.release(enter));
        assert!(!bindings.is_bound(BindingOwner::SearchBox, Key::Enter));
        assert!(bindings.is_bound(BindingOwner::DetailsPane, Key::Escape));
    }

    #[test]
    fn release_owner_leaves_other_views_alone() {
        let mut bindings = KeyBindings::default();
        bindings.bind(BindingOwner::SearchBox, Key::Enter, BindingGuard::Always, 1);
        bindings.bind(BindingOwner::DetailsPane, Key::Escape, BindingGuard::Always, 2);
        bindings.bind(BindingOwner::DetailsPane, Key::Char('a'), BindingGuard::Always, 3);

        bindings.release_owner(BindingOwner::DetailsPane);

        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.dispatch(Key::Enter, UNFOCUSED), vec![1]);
    }

    #[test]
    fn same_key_from_two_owners_fires_both_in_order() {
        let mut bindings = KeyBindings::default();
        bindings.bind(BindingOwner::SearchBox, Key::Escape, BindingGuard::Always, "search");
        bindings.bind(BindingOwner::DetailsPane, Key::Escape, BindingGuard::Always, "details");

        assert_eq!(bindings.dispatch(Key::Escape, UNFOCUSED), vec!["search", "details"]);
    }
}
