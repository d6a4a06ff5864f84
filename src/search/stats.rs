//! Search statistics
//!
//! Node and cutoff counters plus timing for one `best_move` call.

use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes visited, root children included
    pub nodes: u64,

    /// Root moves searched
    pub root_nodes: u64,

    /// Static evaluations at depth 0
    pub leaf_evals: u64,

    /// Beta cutoffs
    pub cutoffs: u64,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Update elapsed time and NPS
    pub fn update_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.search_time = start.elapsed();
            let elapsed_ms = self.search_time.as_millis() as u64;
            if elapsed_ms > 0 {
                self.nps = (self.nodes * 1000) / elapsed_ms;
            }
        }
    }

    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    pub fn inc_root_node(&mut self) {
        self.root_nodes += 1;
    }

    pub fn inc_leaf_eval(&mut self) {
        self.leaf_evals += 1;
    }

    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes {} root {} leaves {} cutoffs {} time {} ms nps {}",
            self.nodes,
            self.root_nodes,
            self.leaf_evals,
            self.cutoffs,
            self.search_time.as_millis(),
            self.nps
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_reset() {
        let mut stats = SearchStats::new();
        stats.start_timing();
        stats.inc_node();
        stats.inc_node();
        stats.inc_cutoff();
        stats.update_timing();
        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.cutoffs, 1);
        assert!(stats.to_string().starts_with("nodes 2"));
        stats.reset();
        assert_eq!(stats.nodes, 0);
        assert!(stats.start_time.is_none());
    }
}
