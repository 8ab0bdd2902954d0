//! Duplicate saved card detection.
//!
//! Two cards are duplicates when they share a fingerprint, the provider's
//! hash of the physical card. Each card is compared with one neighbour in
//! listing order: the first card with its successor, every other card with
//! its predecessor. A card is flagged when it shares the neighbour's
//! fingerprint and was created strictly earlier.
//!
//! Only adjacent duplicates are caught. `[A(fp=1), B(fp=2), C(fp=1)]` flags
//! nothing, because A and C are never compared.

/// A saved card as seen by the duplicate detection.
pub trait FingerprintedCard {
    /// Provider fingerprint of the physical card, if known.
    fn fingerprint(&self) -> Option<&str>;

    /// Creation time in epoch seconds.
    fn created(&self) -> i64;
}

/// Indices of the cards that should be detached, in listing order.
#[must_use]
pub fn duplicate_card_indices<T: FingerprintedCard>(cards: &[T]) -> Vec<usize> {
    if cards.len() < 2 {
        return Vec::new();
    }

    cards
        .iter()
        .enumerate()
        .filter(|(index, card)| {
            let neighbour = if *index == 0 {
                &cards[1]
            } else {
                &cards[index - 1]
            };
            is_older_duplicate(*card, neighbour)
        })
        .map(|(index, _)| index)
        .collect()
}

fn is_older_duplicate<T: FingerprintedCard>(card: &T, neighbour: &T) -> bool {
    match (card.fingerprint(), neighbour.fingerprint()) {
        (Some(a), Some(b)) => a == b && card.created() < neighbour.created(),
        // no fingerprint, no evidence of duplication
        _ => false,
    }
}
