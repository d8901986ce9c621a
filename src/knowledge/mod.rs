//! Built-in building-code knowledge and the keyword matcher.
//!
//! The table is `'static` data compiled into the binary. [`match_topic`]
//! lower-cases its input and returns the first topic, in [`Topic::ALL`]
//! order, that has any keyword as a plain substring. No tokenization and
//! no stemming: "firewall" matches fire safety, "loading" matches structural.

mod table;

use std::fmt::Write as _;

use serde::Serialize;

use table::TOPICS;

/// The four subject areas, declared in match-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    FireSafety,
    EnergyEfficiency,
    Structural,
    Accessibility,
}

impl Topic {
    /// All topics, highest priority first.
    pub const ALL: [Topic; 4] = [
        Topic::FireSafety,
        Topic::EnergyEfficiency,
        Topic::Structural,
        Topic::Accessibility,
    ];

    /// Stable snake_case key used in logs.
    pub fn key(self) -> &'static str {
        match self {
            Topic::FireSafety => "fire_safety",
            Topic::EnergyEfficiency => "energy_efficiency",
            Topic::Structural => "structural",
            Topic::Accessibility => "accessibility",
        }
    }
}

/// A citation returned verbatim to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Source {
    pub section: &'static str,
    pub title: &'static str,
    pub excerpt: &'static str,
}

/// One topic record. Never constructed at runtime.
#[derive(Debug, PartialEq)]
pub struct KnowledgeTopic {
    pub topic: Topic,
    pub section_label: &'static str,
    pub content: &'static str,
    pub keywords: &'static [&'static str],
    pub sources: &'static [Source],
}

impl KnowledgeTopic {
    /// Text appended to the system prompt when this topic matched.
    pub fn context_block(&self) -> String {
        let mut block = format!("\nRelevant BCA Information:\n{}\n\nSources:\n", self.content);
        for s in self.sources {
            // Writing into a String cannot fail.
            let _ = writeln!(block, "- {}: {} - {}", s.section, s.title, s.excerpt);
        }
        block
    }
}

/// Record for `topic`.
pub fn topic(topic: Topic) -> &'static KnowledgeTopic {
    // TOPICS is declared in Topic::ALL order.
    &TOPICS[topic as usize]
}

/// First topic whose keywords appear in `text`, or `None`.
pub fn match_topic(text: &str) -> Option<&'static KnowledgeTopic> {
    let haystack = text.to_lowercase();
    TOPICS
        .iter()
        .find(|t| t.keywords.iter().any(|k| haystack.contains(k)))
}
