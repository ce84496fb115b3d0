//! Resource accounting for a single search.
//!
//! The state space grows exponentially with the number of pieces, so every
//! driver runs against a [`Budget`]: it counts the work done and fails with
//! [`SearchError::ResourceExhausted`] as soon as a configured limit is passed.

use super::{SearchError, SearchLimits, SearchStats};
use std::time::Instant;

#[derive(Debug, Clone)]
pub(crate) struct Budget {
    limits: SearchLimits,
    started: Instant,
    stats: SearchStats,
}

impl Budget {
    pub fn new(limits: SearchLimits) -> Self {
        Self {
            limits,
            started: Instant::now(),
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Called once before each node is expanded.
    pub fn expand(&mut self, frontier_len: usize) -> Result<(), SearchError> {
        self.stats.expanded += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(frontier_len);

        if let Some(limit) = self.limits.max_expansions {
            self.check("expansions", self.stats.expanded, limit)?;
        }
        if let Some(budget) = self.limits.time_budget {
            let elapsed = self.started.elapsed();
            if elapsed > budget {
                return Err(self.exhausted(
                    "milliseconds",
                    budget.as_millis() as u64,
                    elapsed.as_millis() as u64,
                ));
            }
        }
        Ok(())
    }

    pub fn generated(&mut self) {
        self.stats.generated += 1;
    }

    pub fn duplicate(&mut self) {
        self.stats.duplicates += 1;
    }

    /// Called after every insertion into the visited set.
    pub fn visited(&mut self, visited_len: usize) -> Result<(), SearchError> {
        self.stats.visited = visited_len;
        match self.limits.max_visited {
            Some(limit) => self.check("visited states", visited_len as u64, limit as u64),
            None => Ok(()),
        }
    }

    fn check(&self, metric: &'static str, observed: u64, limit: u64) -> Result<(), SearchError> {
        if observed > limit {
            Err(self.exhausted(metric, limit, observed))
        } else {
            Ok(())
        }
    }

    fn exhausted(&self, metric: &'static str, limit: u64, observed: u64) -> SearchError {
        SearchError::ResourceExhausted {
            metric,
            limit,
            observed,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn expansion_limit_is_inclusive() {
        let mut budget = Budget::new(SearchLimits {
            max_expansions: Some(2),
            ..SearchLimits::default()
        });
        assert!(budget.expand(1).is_ok());
        assert!(budget.expand(3).is_ok());
        match budget.expand(2) {
            Err(SearchError::ResourceExhausted {
                metric,
                limit,
                observed,
                stats,
            }) => {
                assert_eq!(metric, "expansions");
                assert_eq!((limit, observed), (2, 3));
                assert_eq!(stats.max_frontier, 3);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn visited_limit() {
        let mut budget = Budget::new(SearchLimits {
            max_visited: Some(1),
            ..SearchLimits::default()
        });
        assert!(budget.visited(1).is_ok());
        assert!(budget.visited(2).is_err());
    }

    #[test]
    fn zero_time_budget_trips() {
        let mut budget = Budget::new(SearchLimits {
            time_budget: Some(Duration::ZERO),
            ..SearchLimits::default()
        });
        std::thread::sleep(Duration::from_millis(2));
        assert!(matches!(
            budget.expand(0),
            Err(SearchError::ResourceExhausted {
                metric: "milliseconds",
                ..
            })
        ));
    }
}
