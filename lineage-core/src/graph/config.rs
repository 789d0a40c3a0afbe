//! Store Configuration

/// How [`Dag::add_member`](super::Dag::add_member) behaves when its second
/// relation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberInsertion {
    /// Insert the two relations one after the other. If the second one
    /// fails, the first stays committed and the caller sees the error.
    #[default]
    Sequential,

    /// Roll back the first relation when the second one fails, leaving the
    /// store as it was before the call.
    Atomic,
}

/// Configuration for a [`Dag`](super::Dag).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DagConfig {
    /// Number of nodes to reserve space for up front.
    pub initial_capacity: usize,

    /// Policy for the two-step `add_member` insertion.
    pub member_insertion: MemberInsertion,
}

impl DagConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve space for `capacity` nodes.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Choose the `add_member` policy.
    pub fn with_member_insertion(mut self, policy: MemberInsertion) -> Self {
        self.member_insertion = policy;
        self
    }
}
