// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Enumeration of the combinations available in a hand.
//!
//! [HandEvaluation::evaluate] groups the cards by rank and collects every
//! four of a kind with kicker, full house, straight window and pair found in
//! the hand. Combinations may share cards with each other, only the singles
//! are guaranteed to be disjoint from the cards used by the other groups.
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::{Card, Hand, HandKind, Rank, Suit};

/// Priority offset that sorts bombs above any other combination.
const BOMB_PRIORITY: i32 = 10_000;

/// Cards with a weight at or above this value are considered high cards.
pub const HIGH_CARD_WEIGHT: u32 = 40;

/// Straight windows as rank orders, with the rank of the card that ranks the
/// straight.
const STRAIGHT_WINDOWS: [([usize; 5], usize); 10] = [
    ([11, 12, 0, 1, 2], 2),
    ([0, 1, 2, 3, 4], 4),
    ([1, 2, 3, 4, 5], 5),
    ([2, 3, 4, 5, 6], 6),
    ([3, 4, 5, 6, 7], 7),
    ([4, 5, 6, 7, 8], 8),
    ([5, 6, 7, 8, 9], 9),
    ([6, 7, 8, 9, 10], 10),
    ([7, 8, 9, 10, 11], 11),
    ([12, 0, 1, 2, 3], 3),
];

/// The category of a combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A four of a kind or a straight flush.
    Bomb,
    /// A non-bomb hand with five or more cards.
    Five,
    /// A pair.
    Pair,
    /// A single card.
    Single,
}

/// A playable combination of cards found in a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Hand", into = "Hand")]
pub struct Combination {
    hand: Hand,
    priority: i32,
    category: Category,
}

impl Combination {
    /// Creates a combination from a classified hand.
    pub fn new(hand: Hand) -> Self {
        let strength = hand.strength() as i32;
        let (category, priority) = match hand.kind() {
            HandKind::Single => (Category::Single, strength),
            HandKind::Pair => (Category::Pair, strength),
            HandKind::FourOfAKind | HandKind::StraightFlush => {
                (Category::Bomb, strength + BOMB_PRIORITY)
            }
            kind => (Category::Five, kind.type_rank() as i32 * 1_000 + strength),
        };

        Self {
            hand,
            priority,
            category,
        }
    }

    /// Creates a single card combination.
    pub fn single(card: Card) -> Self {
        Self::new(Hand::single(card))
    }

    /// The combination cards sorted by weight.
    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    /// The classified hand.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// The priority used to order combinations.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// The combination category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Number of cards in the combination.
    pub fn len(&self) -> usize {
        self.hand.len()
    }

    /// Always false, a combination has at least one card.
    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Checks if this combination uses any of the given cards.
    pub fn shares_cards(&self, cards: &[Card]) -> bool {
        cards.iter().any(|c| self.hand.contains(*c))
    }

    /// Checks if this combination contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.hand.contains(card)
    }
}

impl From<Hand> for Combination {
    fn from(hand: Hand) -> Self {
        Self::new(hand)
    }
}

impl From<Combination> for Hand {
    fn from(combination: Combination) -> Hand {
        combination.hand
    }
}

/// The combinations found in a hand.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HandEvaluation {
    bombs: Vec<Combination>,
    fives: Vec<Combination>,
    pairs: Vec<Combination>,
    singles: Vec<Card>,
    total_strength: i32,
}

impl HandEvaluation {
    /// Enumerates the combinations in a hand of up to 13 cards.
    ///
    /// Bombs, five cards hands, and pairs are sorted by descending priority,
    /// combinations with the same priority keep their enumeration order.
    pub fn evaluate(cards: &[Card]) -> Self {
        let mut cards = cards.to_vec();
        cards.sort();
        cards.dedup();

        let mut by_rank: [Vec<Card>; Rank::COUNT] = Default::default();
        for card in &cards {
            by_rank[card.rank().order() as usize].push(*card);
        }

        let mut fives = FiveCollector::default();

        // Four of a kind with each available kicker.
        for group in by_rank.iter().filter(|g| g.len() >= 4) {
            let rank = group[0].rank();
            for kicker in cards.iter().filter(|c| c.rank() != rank) {
                let mut combo = group[..4].to_vec();
                combo.push(*kicker);
                fives.add(&combo);
            }
        }

        // Full houses for each triple and pair of different ranks.
        for (triple_rank, triple) in by_rank.iter().enumerate().filter(|(_, g)| g.len() >= 3) {
            for (pair_rank, pair) in by_rank.iter().enumerate().filter(|(_, g)| g.len() >= 2) {
                if pair_rank != triple_rank {
                    let mut combo = triple[..3].to_vec();
                    combo.extend_from_slice(&pair[..2]);
                    fives.add(&combo);
                }
            }
        }

        // Straight windows, with a flush variant for each suit that covers it.
        for (window, ranking) in STRAIGHT_WINDOWS {
            if window.iter().any(|r| by_rank[*r].is_empty()) {
                continue;
            }

            let low = window.iter().map(|r| by_rank[*r][0]).collect::<Vec<_>>();
            fives.add(&low);

            let high = window
                .iter()
                .map(|r| {
                    let group = &by_rank[*r];
                    if *r == ranking {
                        group[group.len() - 1]
                    } else {
                        group[0]
                    }
                })
                .collect::<Vec<_>>();
            fives.add(&high);

            for suit in Suit::suits() {
                let flush = window
                    .iter()
                    .map(|r| by_rank[*r].iter().find(|c| c.suit() == suit).copied())
                    .collect::<Option<Vec<_>>>();
                if let Some(flush) = flush {
                    fives.add(&flush);
                }
            }
        }

        let FiveCollector {
            mut bombs,
            fives: mut five_cards,
            ..
        } = fives;

        let mut pairs = cards
            .windows(2)
            .filter(|w| w[0].rank() == w[1].rank())
            .filter_map(Hand::identify)
            .map(Combination::new)
            .collect::<Vec<_>>();

        sort_by_priority(&mut bombs);
        sort_by_priority(&mut five_cards);
        sort_by_priority(&mut pairs);

        let used = bombs
            .iter()
            .chain(five_cards.iter())
            .chain(pairs.iter())
            .flat_map(|c| c.cards().iter().copied())
            .collect::<AHashSet<_>>();

        let singles = cards
            .iter()
            .copied()
            .filter(|c| !used.contains(c))
            .collect::<Vec<_>>();

        let high_singles = singles
            .iter()
            .filter(|c| c.weight() >= HIGH_CARD_WEIGHT)
            .count();

        let total_strength = 1_000 * bombs.len() as i32
            + 200 * five_cards.len() as i32
            + 30 * pairs.len() as i32
            - 5 * high_singles as i32;

        Self {
            bombs,
            fives: five_cards,
            pairs,
            singles,
            total_strength,
        }
    }

    /// The four of a kind and straight flush combinations.
    pub fn bombs(&self) -> &[Combination] {
        &self.bombs
    }

    /// The non-bomb five cards combinations.
    pub fn fives(&self) -> &[Combination] {
        &self.fives
    }

    /// The pairs.
    pub fn pairs(&self) -> &[Combination] {
        &self.pairs
    }

    /// Cards not used by any five cards combination or pair.
    pub fn singles(&self) -> &[Card] {
        &self.singles
    }

    /// A coarse score of the overall hand strength.
    pub fn total_strength(&self) -> i32 {
        self.total_strength
    }

    /// Iterates the five cards combinations followed by the bombs.
    pub fn fives_and_bombs(&self) -> impl Iterator<Item = &Combination> {
        self.fives.iter().chain(self.bombs.iter())
    }
}

/// Collects unique five cards combinations splitting bombs from other hands.
#[derive(Default)]
struct FiveCollector {
    seen: AHashSet<Vec<Card>>,
    bombs: Vec<Combination>,
    fives: Vec<Combination>,
}

impl FiveCollector {
    fn add(&mut self, cards: &[Card]) {
        let Some(hand) = Hand::identify(cards) else {
            return;
        };

        if !self.seen.insert(hand.cards().to_vec()) {
            return;
        }

        let combo = Combination::new(hand);
        match combo.category() {
            Category::Bomb => self.bombs.push(combo),
            _ => self.fives.push(combo),
        }
    }
}

fn sort_by_priority(combos: &mut [Combination]) {
    combos.sort_by(|a, b| b.priority().cmp(&a.priority()));
}
