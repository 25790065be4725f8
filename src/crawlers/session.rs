use crate::results::PageResult;
use std::collections::{HashSet, VecDeque};

/// What a worker should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextUrl {
    /// Fetch this URL; it is reserved for the caller until recorded
    Fetch(String),
    /// Nothing to take right now, but in-flight fetches may change that
    Wait,
    /// The frontier is drained or the page budget is spent
    Done,
}

/// State of a single crawl invocation
///
/// A URL is fetched at most once: duplicates are allowed into the frontier
/// and dropped when they reach the front of it. The budget counts successful
/// fetches only, and reservations never let it be exceeded.
#[derive(Debug)]
pub struct CrawlSession {
    max_pages: usize,
    frontier: VecDeque<String>,
    visited: HashSet<String>,
    in_flight: HashSet<String>,
    pages: Vec<PageResult>,
}

impl CrawlSession {
    pub fn new(start_url: &str, max_pages: usize) -> Self {
        Self {
            max_pages,
            frontier: VecDeque::from([start_url.to_string()]),
            visited: HashSet::new(),
            in_flight: HashSet::new(),
            pages: Vec::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    /// Dequeues the next fetchable URL, skipping visited and reserved ones
    pub fn next_url(&mut self) -> NextUrl {
        loop {
            if self.is_exhausted() {
                return NextUrl::Done;
            }

            // Every remaining page of budget is already reserved
            if self.visited.len() + self.in_flight.len() >= self.max_pages {
                return NextUrl::Wait;
            }

            let Some(url) = self.frontier.pop_front() else {
                return if self.in_flight.is_empty() {
                    NextUrl::Done
                } else {
                    NextUrl::Wait
                };
            };

            if self.visited.contains(&url) || self.in_flight.contains(&url) {
                ::log::trace!("Skipping already visited: {}", url);
                continue;
            }

            self.in_flight.insert(url.clone());
            return NextUrl::Fetch(url);
        }
    }

    /// Records a successfully fetched page and queues the links found on it
    pub fn record_page(&mut self, page: PageResult, links: Vec<String>) {
        self.in_flight.remove(&page.url);
        self.visited.insert(page.url.clone());
        self.pages.push(page);
        self.frontier.extend(links);
    }

    /// Releases the reservation of a URL that could not be fetched
    pub fn record_failure(&mut self, url: &str) {
        self.in_flight.remove(url);
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Pages in the order they were fetched
    pub fn into_pages(self) -> Vec<PageResult> {
        self.pages
    }
}
