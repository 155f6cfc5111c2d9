use rand::Rng;
use serde::{Deserialize, Serialize};

/// Smallest batch [`generate_cards`] produces.
pub const MIN_CARDS: usize = 1;
/// Largest batch [`generate_cards`] produces.
pub const MAX_CARDS: usize = 12;

/// Short labels sampled for card titles.
pub const TITLE_POOL: &[&str] = &[
    "Quarterly Report",
    "Design Review",
    "Launch Checklist",
    "Team Offsite",
    "Product Roadmap",
    "Weekly Digest",
    "Release Notes",
    "Customer Story",
    "Onboarding",
    "Field Notes",
    "Inbox Zero",
    "Getting Started",
];

/// One- or two-sentence descriptions sampled for card bodies.
pub const BODY_POOL: &[&str] = &[
    "A quick summary of what changed this week and what is coming next.",
    "Review the latest mockups and leave feedback before Friday.",
    "Everything you need to ship with confidence. Check each item off as you go.",
    "Plan the agenda, book the venue, and share travel details with the team.",
    "Explore the milestones we are targeting for the next two quarters.",
    "Highlights from across the organization, collected in one place.",
    "Bug fixes, performance improvements, and a few new shortcuts.",
    "How one team cut their build times in half. Read the full write-up.",
    "Set up your workspace and meet the people you will be working with.",
    "Observations gathered from a week of user interviews.",
];

/// One generated content card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Position-based id, unique within a batch.
    pub id: String,
    /// Short label.
    pub title: String,
    /// Description text.
    pub body: String,
}

/// Generate a fresh batch of cards using the thread-local RNG.
pub fn generate_cards(count: usize) -> Vec<Card> {
    generate_cards_with(count, &mut rand::thread_rng())
}

/// Generate `count` cards (clamped to `[1, 12]`) from `rng`.
///
/// Each card samples a title and a body independently and with replacement.
pub fn generate_cards_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Card> {
    let count = count.clamp(MIN_CARDS, MAX_CARDS);
    (0..count)
        .map(|i| Card {
            id: format!("card-{}", i + 1),
            title: TITLE_POOL[rng.gen_range(0..TITLE_POOL.len())].to_owned(),
            body: BODY_POOL[rng.gen_range(0..BODY_POOL.len())].to_owned(),
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/cards/generate.rs"]
mod tests;
