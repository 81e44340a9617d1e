//! Shared search accounting and parallel root scoring.
//!
//! Workers never share mutable board state: each one rates its own slice of
//! root moves on copied positions. The only shared state is the node counter
//! and the stop flag below.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;

/// Node accounting and cancellation shared by every worker of one search.
#[derive(Debug)]
pub struct SharedSearchState {
    stop: AtomicBool,
    nodes_visited: AtomicU64,
    // 0 means unlimited
    node_budget: u64,
}

impl SharedSearchState {
    pub fn new(node_budget: Option<u64>) -> Self {
        Self {
            stop: AtomicBool::new(false),
            nodes_visited: AtomicU64::new(0),
            node_budget: node_budget.unwrap_or(0),
        }
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes_visited.load(Ordering::Relaxed)
    }

    /// Counts `n` visited nodes. Returns true, and raises the stop flag, once
    /// the budget is spent.
    #[inline]
    pub fn bump_nodes_and_check_budget(&self, n: u64) -> bool {
        let new_nodes = self.nodes_visited.fetch_add(n, Ordering::Relaxed) + n;
        if self.node_budget != 0 && new_nodes > self.node_budget {
            self.request_stop();
        }
        self.should_stop()
    }
}

/// Normalized worker count; zero is treated as one.
#[inline]
pub fn normalized_threads(requested: usize) -> usize {
    requested.max(1)
}

/// Maps `rate` over `items`, splitting the work across up to `threads` scoped
/// workers. Output order matches input order whatever the thread count.
pub fn parallel_map<T, R, F>(items: &[T], threads: usize, rate: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let threads = normalized_threads(threads).min(items.len().max(1));
    if threads == 1 {
        return items.iter().map(&rate).collect();
    }

    let chunk_len = items.len().div_ceil(threads);
    let rate = &rate;
    thread::scope(|scope| {
        let handles: Vec<_> = items
            .chunks(chunk_len)
            .map(|chunk| scope.spawn(move || chunk.iter().map(rate).collect::<Vec<R>>()))
            .collect();

        // A panicking worker re-raises its panic here.
        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    })
}
