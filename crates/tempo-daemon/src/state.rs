// crates/tempo-daemon/src/state.rs
//
// Node state machine for the Tempo daemon.
//
// Valid transitions:
//   Initializing -> Producing -> Halted
//   Any state -> ShuttingDown

use std::fmt;

/// Lifecycle states of the daemon node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeState {
    /// Node is loading configuration and genesis.
    Initializing,
    /// Node is producing blocks.
    Producing,
    /// A block failed; processing stopped at the last committed block.
    Halted,
    /// Node is shutting down gracefully.
    ShuttingDown,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeState::Initializing => write!(f, "Initializing"),
            NodeState::Producing => write!(f, "Producing"),
            NodeState::Halted => write!(f, "Halted"),
            NodeState::ShuttingDown => write!(f, "ShuttingDown"),
        }
    }
}

/// State machine for managing node lifecycle transitions.
pub struct NodeStateMachine {
    pub current: NodeState,
}

impl NodeStateMachine {
    /// Create a new state machine starting in the Initializing state.
    pub fn new() -> Self {
        Self {
            current: NodeState::Initializing,
        }
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns an error if the transition is not valid.
    pub fn transition(&mut self, new_state: NodeState) -> Result<(), String> {
        let valid = match (&self.current, &new_state) {
            (_, NodeState::ShuttingDown) => true,
            (NodeState::Initializing, NodeState::Producing) => true,
            (NodeState::Producing, NodeState::Halted) => true,
            _ => false,
        };

        if valid {
            tracing::info!("State transition: {} -> {}", self.current, new_state);
            self.current = new_state;
            Ok(())
        } else {
            Err(format!(
                "Invalid state transition: {} -> {}",
                self.current, new_state
            ))
        }
    }
}

impl Default for NodeStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
