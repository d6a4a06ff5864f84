//! Search parameters and configuration
//!
//! Depth is fixed: there is no iterative deepening or time control.

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Plies searched below each root move (the root ply is extra)
    pub depth: u8,

    /// Put captures of more valuable pieces first at every node
    pub enable_ordering: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            depth: 3,
            enable_ordering: true,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set depth below the root in plies
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Enable or disable move ordering
    pub fn enable_ordering(mut self, enable: bool) -> Self {
        self.enable_ordering = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let params = SearchParams::new().depth(1).enable_ordering(false);
        assert_eq!(params.depth, 1);
        assert!(!params.enable_ordering);
        assert_eq!(SearchParams::default().depth, 3);
    }
}
