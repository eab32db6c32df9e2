use serde_json::Value;

use super::cards;

/// Background information about the movie being watched
#[derive(Debug, Clone)]
pub struct MovieInfo {
    pub title: String,
    pub source_url: String,
    pub summary: String,
    pub poster_url: Option<String>,
}

impl MovieInfo {
    pub fn demo() -> Self {
        Self {
            title: "Night Train".to_string(),
            source_url: "https://example.com/films/night-train".to_string(),
            summary: "Two couriers carrying a stolen drive have one night to get out of the \
                      city before the people hunting them close every road."
                .to_string(),
            poster_url: Some("https://example.com/films/night-train/poster.jpg".to_string()),
        }
    }

    pub fn to_card(&self) -> Value {
        cards::info_card(
            &self.title,
            &self.source_url,
            &self.summary,
            self.poster_url.as_deref(),
            None,
        )
    }
}

/// Context card shown while playback is inside `[start, end]`
#[derive(Debug, Clone)]
pub struct ContextCard {
    pub start: u64,
    pub end: u64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl ContextCard {
    pub fn is_active(&self, seconds: u64) -> bool {
        self.start <= seconds && seconds <= self.end
    }

    pub fn to_node(&self) -> Value {
        cards::info_card(
            &self.title,
            &self.description,
            &self.content,
            self.image_url.as_deref(),
            None,
        )
    }
}

/// Timed context cards for a track
#[derive(Debug, Clone, Default)]
pub struct CardCatalog {
    cards: Vec<ContextCard>,
}

impl CardCatalog {
    pub fn new(cards: Vec<ContextCard>) -> Self {
        Self { cards }
    }

    pub fn demo() -> Self {
        let card = |start, end, title: &str, description: &str, content: &str| ContextCard {
            start,
            end,
            title: title.to_string(),
            description: description.to_string(),
            content: content.to_string(),
            image_url: None,
        };

        Self::new(vec![
            card(
                0,
                25,
                "The Safehouse",
                "Location",
                "The opening scenes were shot in a single converted warehouse over four nights.",
            ),
            card(
                28,
                50,
                "Rooftop Escape",
                "Stunts",
                "The roof chase used no wires; the cast trained with a parkour team for six weeks.",
            ),
            card(
                58,
                80,
                "The Letters",
                "Story",
                "The letters were written by the lead actor in character before filming began.",
            ),
            card(
                88,
                120,
                "Platform Six",
                "Location",
                "The station is a disused freight terminal dressed to look like a commuter line.",
            ),
        ])
    }

    /// Schema nodes for every card active at `seconds`, in catalogue order
    pub fn schema_at(&self, seconds: u64) -> Vec<Value> {
        self.cards
            .iter()
            .filter(|card| card.is_active(seconds))
            .map(ContextCard::to_node)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_at_filters_by_time() {
        let catalog = CardCatalog::demo();

        assert_eq!(catalog.schema_at(10).len(), 1);
        assert!(catalog.schema_at(26).is_empty());
        assert_eq!(catalog.schema_at(28).len(), 1);
        assert!(catalog.schema_at(299).is_empty());
    }

    #[test]
    fn test_overlapping_cards_keep_order() {
        let catalog = CardCatalog::new(vec![
            ContextCard {
                start: 0,
                end: 10,
                title: "first".to_string(),
                description: String::new(),
                content: String::new(),
                image_url: None,
            },
            ContextCard {
                start: 5,
                end: 10,
                title: "second".to_string(),
                description: String::new(),
                content: String::new(),
                image_url: None,
            },
        ]);

        let schema = catalog.schema_at(7);
        assert_eq!(schema.len(), 2);
        assert!(schema[0].to_string().contains("first"));
        assert!(schema[1].to_string().contains("second"));
    }
}
