//! Action paths: the ordered sequence of actions taken from the root.
//!
//! A path is owned by exactly one fringe element at a time. When an element
//! fans out into several successors, each successor receives its own
//! [`ActionPath::appended`] copy, so branch histories never alias.

/// An ordered sequence of actions from the initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionPath<A> {
    actions: Vec<A>,
}

impl<A> ActionPath<A> {
    /// Create an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// Attach `action` at the tail of the path.
    pub fn append(&mut self, action: A) {
        self.actions.push(action);
    }

    /// Release every action payload. Releasing an empty path is a no-op.
    ///
    /// Returns the number of payloads released.
    #[allow(clippy::needless_pass_by_value)]
    pub fn release(self) -> usize {
        self.actions.len()
    }

    /// Number of actions on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the path has no actions (the root was already a goal).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate actions from the root outward.
    pub fn iter(&self) -> std::slice::Iter<'_, A> {
        self.actions.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[A] {
        &self.actions
    }

    /// The first action taken, if any.
    #[must_use]
    pub fn first(&self) -> Option<&A> {
        self.actions.first()
    }

    /// The action that reached the path's destination, if any.
    #[must_use]
    pub fn last(&self) -> Option<&A> {
        self.actions.last()
    }

    /// Consume the path and hand its actions to the caller.
    #[must_use]
    pub fn into_actions(self) -> Vec<A> {
        self.actions
    }
}

impl<A: Clone> ActionPath<A> {
    /// Produce an independent copy: every payload is cloned, order is kept.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Duplicate this path and append `action` to the copy.
    ///
    /// This is the branch operation used once per successor during expansion.
    #[must_use]
    pub fn appended(&self, action: A) -> Self {
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend(self.actions.iter().cloned());
        actions.push(action);
        Self { actions }
    }
}

impl<A> Default for ActionPath<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> From<Vec<A>> for ActionPath<A> {
    fn from(actions: Vec<A>) -> Self {
        Self { actions }
    }
}

impl<A> FromIterator<A> for ActionPath<A> {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl<A> IntoIterator for ActionPath<A> {
    type Item = A;
    type IntoIter = std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a ActionPath<A> {
    type Item = &'a A;
    type IntoIter = std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
