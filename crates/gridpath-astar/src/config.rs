//! Search policy knobs.

/// Which frontier node wins when several share the minimum `f`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// The most recently discovered node wins.
    #[default]
    Newest,
    /// The earliest discovered node wins (FIFO).
    Oldest,
}

/// When the search stops once the goal has been reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// Stop as soon as the goal enters the frontier.
    ///
    /// Only optimal because every step costs exactly 1.
    #[default]
    OnDiscovery,
    /// Stop when the goal is selected for expansion (textbook A*).
    OnExpansion,
}

/// Configuration for a [`PathFinder`](crate::PathFinder).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub tie_break: TieBreak,
    pub termination: Termination,
}

impl SearchConfig {
    /// Set the tie-break policy.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the termination policy.
    pub fn termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }
}
