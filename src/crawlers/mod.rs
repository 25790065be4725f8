pub mod fetch;
pub mod session;
pub mod web;

#[cfg(test)]
mod tests;

pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use session::{CrawlSession, NextUrl};
