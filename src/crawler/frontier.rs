//! Crawl state: the frontier queue, the visited set and the page counter

use std::collections::{HashSet, VecDeque};

/// State owned by a single crawl
///
/// The frontier is FIFO so the crawl is breadth-first. A URL is marked
/// visited when it is dequeued for fetching, so it is attempted at most
/// once whatever the outcome of the fetch.
#[derive(Debug)]
pub struct CrawlState {
    visited: HashSet<String>,
    frontier: VecDeque<String>,
    queued: HashSet<String>,
    page_count: usize,
    max_frontier: usize,
}

impl CrawlState {
    /// Creates a state whose frontier holds only the seed URL
    pub fn new(seed: impl Into<String>, max_frontier: usize) -> Self {
        let seed = seed.into();
        let mut state = Self {
            visited: HashSet::new(),
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            page_count: 0,
            max_frontier: max_frontier.max(1),
        };
        state.queued.insert(seed.clone());
        state.frontier.push_back(seed);
        state
    }

    /// Takes the next unvisited URL off the frontier and marks it visited
    ///
    /// Increments the page count for the returned URL.
    pub fn next_url(&mut self) -> Option<String> {
        while let Some(url) = self.frontier.pop_front() {
            self.queued.remove(&url);
            if self.visited.insert(url.clone()) {
                self.page_count += 1;
                return Some(url);
            }
        }
        None
    }

    /// Queues a URL unless it was visited, is already queued, or the
    /// frontier is full. Returns whether the URL was queued.
    pub fn enqueue(&mut self, url: String) -> bool {
        if self.frontier.len() >= self.max_frontier
            || self.visited.contains(&url)
            || self.queued.contains(&url)
        {
            return false;
        }
        self.queued.insert(url.clone());
        self.frontier.push_back(url);
        true
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.frontier.is_empty()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }
}
