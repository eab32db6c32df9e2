use std::fmt;

/// Agent a chat query is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Questions about the movie itself
    Ingestion,
    /// Purchases and gift cards
    Commerce,
    /// Everything else
    Reasoning,
}

impl Intent {
    pub fn agent_name(&self) -> &'static str {
        match self {
            Self::Ingestion => "ingestion",
            Self::Commerce => "commerce",
            Self::Reasoning => "reasoning",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.agent_name())
    }
}

/// Keyword routing; commerce is checked first
pub fn route_query(query: &str) -> Intent {
    let query = query.to_lowercase();
    if query.contains("buy") || query.contains("gift card") {
        Intent::Commerce
    } else if query.contains("matrix") || query.contains("find") {
        Intent::Ingestion
    } else {
        Intent::Reasoning
    }
}
