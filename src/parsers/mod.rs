pub mod html;
pub mod text;


pub use html::parse;

/// Result of parsing one fetched page
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Visible text, lowercased and whitespace-collapsed
    pub content: String,
    /// Raw `href` values of every anchor, in document order
    pub links: Vec<String>,
}

impl ParseResult {
    /// Creates a new parse result with the given content and links
    pub fn new(content: String, links: Vec<String>) -> Self {
        Self { content, links }
    }
}
