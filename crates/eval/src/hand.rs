// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand classification and comparison.
//!
//! A [Hand] is a group of 1, 2, 5, or 13 cards that form a recognized Big Two
//! pattern. Each hand has a [HandKind] and a strength used to compare hands of
//! the same kind and length. Four of a kind and straight flush hands are bombs
//! and can be played on top of any non-bomb hand.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use thiserror::Error;

use crate::{Card, Rank};

/// The kind of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandKind {
    /// A single card.
    Single,
    /// Two cards with the same rank.
    Pair,
    /// Five cards with consecutive ranks.
    Straight,
    /// Three cards of one rank and two of another rank.
    FullHouse,
    /// Four cards of one rank and a kicker.
    FourOfAKind,
    /// A straight with all the cards of the same suit.
    StraightFlush,
    /// Thirteen cards, one for each rank.
    Dragon,
}

impl HandKind {
    /// The rank used to compare bombs of different kinds.
    pub fn type_rank(&self) -> u32 {
        match self {
            HandKind::Single | HandKind::Pair => 1,
            HandKind::Straight => 2,
            HandKind::FullHouse => 3,
            HandKind::FourOfAKind => 4,
            HandKind::StraightFlush => 5,
            HandKind::Dragon => 6,
        }
    }

    /// Checks if this kind overrides the kind matching rules.
    pub fn is_bomb(&self) -> bool {
        matches!(self, HandKind::FourOfAKind | HandKind::StraightFlush)
    }
}

impl TryFrom<Vec<Card>> for Hand {
    type Error = InvalidHandError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Hand::identify(&cards).ok_or(InvalidHandError)
    }
}

impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Vec<Card> {
        hand.cards
    }
}

impl fmt::Display for HandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandKind::Single => "Single",
            HandKind::Pair => "Pair",
            HandKind::Straight => "Straight",
            HandKind::FullHouse => "Full House",
            HandKind::FourOfAKind => "Four of a Kind",
            HandKind::StraightFlush => "Straight Flush",
            HandKind::Dragon => "Dragon",
        };

        write!(f, "{name}")
    }
}

/// Error returned when cards don't form a recognized hand.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cards don't form a valid hand")]
pub struct InvalidHandError;

/// A classified hand.
///
/// A hand serializes as its cards and is classified again when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Hand {
    cards: Vec<Card>,
    kind: HandKind,
    strength: u32,
}

impl Hand {
    /// Classifies a group of cards.
    ///
    /// Returns `None` if the cards don't form a recognized hand, this includes
    /// groups of unsupported length and groups with duplicated cards.
    pub fn identify(cards: &[Card]) -> Option<Hand> {
        let mut cards = cards.to_vec();
        cards.sort();

        if cards.windows(2).any(|w| w[0] == w[1]) {
            return None;
        }

        let (kind, strength) = match cards.len() {
            1 => (HandKind::Single, cards[0].weight()),
            2 => classify_pair(&cards)?,
            5 => classify_five(&cards)?,
            13 => classify_dragon(&cards)?,
            _ => return None,
        };

        Some(Hand {
            cards,
            kind,
            strength,
        })
    }

    /// Creates a single card hand.
    pub fn single(card: Card) -> Hand {
        Hand {
            cards: vec![card],
            kind: HandKind::Single,
            strength: card.weight(),
        }
    }

    /// The hand cards sorted by weight.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The hand kind.
    pub fn kind(&self) -> HandKind {
        self.kind
    }

    /// The hand strength, comparable only between hands of the same kind.
    pub fn strength(&self) -> u32 {
        self.strength
    }

    /// The number of cards in this hand.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false, a hand has at least one card.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Checks if this hand is a bomb.
    pub fn is_bomb(&self) -> bool {
        self.kind.is_bomb()
    }

    /// Checks if this hand contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.binary_search(&card).is_ok()
    }

    /// Checks if this hand can be played on top of the `other` hand.
    ///
    /// A bomb beats any non-bomb hand, two bombs are compared by kind and then
    /// by strength, all other hands must have the same length and kind and a
    /// greater strength.
    pub fn beats(&self, other: &Hand) -> bool {
        match (self.is_bomb(), other.is_bomb()) {
            (true, false) => true,
            (true, true) => match self.kind.type_rank().cmp(&other.kind.type_rank()) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => self.strength > other.strength,
            },
            _ => {
                self.len() == other.len()
                    && self.kind == other.kind
                    && self.strength > other.strength
            }
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.kind)?;
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}

fn classify_pair(cards: &[Card]) -> Option<(HandKind, u32)> {
    (cards[0].rank() == cards[1].rank()).then(|| (HandKind::Pair, cards[1].weight()))
}

fn classify_dragon(cards: &[Card]) -> Option<(HandKind, u32)> {
    // Sorted cards, distinct neighbours means distinct ranks.
    let distinct = cards.windows(2).all(|w| w[0].rank() != w[1].rank());
    distinct.then(|| (HandKind::Dragon, cards[cards.len() - 1].weight()))
}

fn classify_five(cards: &[Card]) -> Option<(HandKind, u32)> {
    if let Some((sequence, ranking_card)) = straight_sequence(cards) {
        let strength = sequence * 10 + ranking_card.suit().order();
        let suit = cards[0].suit();
        let kind = if cards.iter().all(|c| c.suit() == suit) {
            HandKind::StraightFlush
        } else {
            HandKind::Straight
        };

        return Some((kind, strength));
    }

    let r = cards.iter().map(Card::rank).collect::<Vec<_>>();

    // The quad takes the first or the last four slots.
    if r[0] == r[3] || r[1] == r[4] {
        return Some((HandKind::FourOfAKind, r[1].order()));
    }

    if r[0] == r[2] && r[3] == r[4] {
        return Some((HandKind::FullHouse, r[0].order()));
    }

    if r[0] == r[1] && r[2] == r[4] {
        return Some((HandKind::FullHouse, r[2].order()));
    }

    None
}

/// Returns the sequence rank (1..=10) and the ranking card if the five sorted
/// cards form a straight.
///
/// A2345 is the lowest sequence and 23456 the highest, the standard windows
/// from 34567 to TJQKA rank in between. Runs ending with a deuce are not
/// straights.
fn straight_sequence(cards: &[Card]) -> Option<(u32, Card)> {
    let orders = cards.iter().map(|c| c.rank().order()).collect::<Vec<_>>();
    let deuce = Rank::Deuce.order();
    let ace = Rank::Ace.order();

    if orders == [0, 1, 2, ace, deuce] {
        return Some((1, cards[2]));
    }

    if orders == [0, 1, 2, 3, deuce] {
        return Some((10, cards[3]));
    }

    let consecutive = orders.windows(2).all(|w| w[1] == w[0] + 1);
    if consecutive && orders[4] < deuce {
        return Some((orders[4] - 2, cards[4]));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Deck, Suit, parse_cards};

    fn hand(s: &str) -> Option<Hand> {
        Hand::identify(&parse_cards(s).unwrap())
    }

    fn kind(s: &str) -> Option<HandKind> {
        hand(s).map(|h| h.kind())
    }

    #[test]
    fn deserialize_classifies_cards() {
        use serde::de::{IntoDeserializer, value::Error};

        fn deserialize(weights: Vec<u8>) -> Result<Hand, Error> {
            Hand::deserialize(weights.into_deserializer())
        }

        let pair = deserialize(vec![123, 120]).unwrap();
        assert_eq!(Some(pair.clone()), hand("2C 2S"));
        assert_eq!(pair.strength(), 123);
        assert_eq!(Vec::<Card>::from(pair.clone()), pair.cards().to_vec());

        // Duplicated cards, invalid weights, and unrecognized groups.
        assert!(deserialize(vec![120, 120]).is_err());
        assert!(deserialize(vec![200, 120]).is_err());
        assert!(deserialize(vec![0, 11]).is_err());
        assert!(deserialize(vec![]).is_err());

        assert_eq!(
            Hand::try_from(parse_cards("3C 4D").unwrap()),
            Err(InvalidHandError)
        );
    }

    #[test]
    fn singles() {
        for card in Deck::default() {
            let h = Hand::identify(&[card]).unwrap();
            assert_eq!(h.kind(), HandKind::Single);
            assert_eq!(h.strength(), card.weight());
        }
    }

    #[test]
    fn pairs() {
        let cards = Deck::default().into_iter().collect::<Vec<_>>();
        for (i, c1) in cards.iter().enumerate() {
            for c2 in &cards[i + 1..] {
                let h = Hand::identify(&[*c1, *c2]);
                if c1.rank() == c2.rank() {
                    let h = h.unwrap();
                    assert_eq!(h.kind(), HandKind::Pair);
                    assert_eq!(h.strength(), c1.weight().max(c2.weight()));
                } else {
                    assert!(h.is_none());
                }
            }
        }
    }

    #[test]
    fn malformed_groups() {
        assert!(Hand::identify(&[]).is_none());
        assert!(hand("3C 4C 5C").is_none());
        assert!(hand("3C 3D 3H 3S").is_none());
        assert!(hand("3C 3C").is_none());
        assert!(hand("3C 4C 5C 6C 6C").is_none());
    }

    #[test]
    fn straights() {
        let low = hand("3C 4C 5C 6C 7C").unwrap();
        assert_eq!(low.kind(), HandKind::StraightFlush);
        assert_eq!(low.strength(), 20);

        let wrap = hand("2C 3C 4C 5C 6C").unwrap();
        let broadway = hand("TS JS QS KS AS").unwrap();
        assert_eq!(wrap.kind(), HandKind::StraightFlush);
        assert_eq!(broadway.kind(), HandKind::StraightFlush);
        assert_eq!(broadway.strength(), 93);
        assert_eq!(wrap.strength(), 100);
        assert!(wrap.strength() > broadway.strength());

        let a2345 = hand("AD 2C 3H 4S 5D").unwrap();
        assert_eq!(a2345.kind(), HandKind::Straight);
        assert_eq!(a2345.strength(), 11);

        // The six ranks the 23456 wrap.
        let wrap = hand("2S 3C 4D 5H 6C").unwrap();
        assert_eq!(wrap.kind(), HandKind::Straight);
        assert_eq!(wrap.strength(), 100);

        assert_eq!(kind("9C TD JH QS KC"), Some(HandKind::Straight));
        assert_eq!(kind("JC QD KH AS 2C"), None);
        assert_eq!(kind("KC AD 2H 3S 4C"), None);
        assert_eq!(kind("3C 4C 5C 6C 8C"), None);
    }

    #[test]
    fn straight_strength_ordering() {
        // Each window beats the previous one.
        let windows = [
            "AC 2C 3D 4C 5C",
            "3C 4C 5C 6C 7D",
            "4C 5C 6C 7C 8D",
            "5C 6C 7C 8C 9D",
            "6C 7C 8C 9C TD",
            "7C 8C 9C TC JD",
            "8C 9C TC JC QD",
            "9C TC JC QC KD",
            "TC JC QC KC AD",
            "2C 3C 4C 5C 6D",
        ];

        let hands = windows.iter().map(|w| hand(w).unwrap()).collect::<Vec<_>>();
        for w in hands.windows(2) {
            assert!(w[1].beats(&w[0]), "{} should beat {}", w[1], w[0]);
            assert!(!w[0].beats(&w[1]));
        }

        // Same window, the ranking card suit breaks the tie.
        let s1 = hand("3C 4C 5C 6C 7D").unwrap();
        let s2 = hand("3D 4C 5C 6C 7H").unwrap();
        assert!(s2.beats(&s1));
    }

    #[test]
    fn four_of_a_kind_and_full_house() {
        let quad = hand("9C 9D 9H 9S 3D").unwrap();
        assert_eq!(quad.kind(), HandKind::FourOfAKind);
        assert_eq!(quad.strength(), Rank::Nine.order());

        let quad = hand("3D 2C 2D 2H 2S").unwrap();
        assert_eq!(quad.kind(), HandKind::FourOfAKind);
        assert_eq!(quad.strength(), Rank::Deuce.order());

        let fh = hand("4C 4D KH KS KC").unwrap();
        assert_eq!(fh.kind(), HandKind::FullHouse);
        assert_eq!(fh.strength(), Rank::King.order());

        let fh = hand("4C 4D 4H KS KC").unwrap();
        assert_eq!(fh.kind(), HandKind::FullHouse);
        assert_eq!(fh.strength(), Rank::Four.order());

        assert_eq!(kind("4C 4D KH KS QC"), None);
        assert_eq!(kind("4C 4D 4H KS QC"), None);
    }

    #[test]
    fn full_house_suits_tie() {
        let fh1 = hand("KC KD KH 4C 4D").unwrap();
        let fh2 = hand("KS KD KH 5C 5D").unwrap();
        assert_eq!(fh1.strength(), fh2.strength());
        assert!(!fh1.beats(&fh2));
        assert!(!fh2.beats(&fh1));
    }

    #[test]
    fn dragon() {
        let dragon = hand("3C 4D 5H 6S 7C 8D 9H TS JC QD KH AS 2D").unwrap();
        assert_eq!(dragon.kind(), HandKind::Dragon);
        assert_eq!(dragon.strength(), Card::new(Rank::Deuce, Suit::Diamonds).weight());
        assert_eq!(dragon.len(), 13);

        assert_eq!(kind("3C 3D 5H 6S 7C 8D 9H TS JC QD KH AS 2D"), None);
    }

    #[test]
    fn bombs_override() {
        let quad = hand("3C 3D 3H 3S 4C").unwrap();
        let straight = hand("TC JD QH KS AC").unwrap();
        let single = hand("2S").unwrap();
        let pair = hand("2S 2H").unwrap();
        let dragon = hand("3C 4D 5H 6S 7C 8D 9H TS JC QD KH AS 2D").unwrap();

        assert!(quad.beats(&straight));
        assert!(quad.beats(&single));
        assert!(quad.beats(&pair));
        assert!(quad.beats(&dragon));
        assert!(!straight.beats(&quad));
        assert!(!single.beats(&quad));

        let flush = hand("3D 4D 5D 6D 7D").unwrap();
        let big_quad = hand("2C 2D 2H 2S AC").unwrap();
        assert!(flush.beats(&big_quad));
        assert!(!big_quad.beats(&flush));
        assert!(big_quad.beats(&quad));
        assert!(!quad.beats(&big_quad));

        let flush2 = hand("4H 5H 6H 7H 8H").unwrap();
        assert!(flush2.beats(&flush));
        assert!(!flush.beats(&flush2));
    }

    #[test]
    fn kind_mismatch() {
        let straight = hand("3C 4D 5H 6S 7C").unwrap();
        let full_house = hand("4C 4D 4H 5S 5C").unwrap();
        assert!(!straight.beats(&full_house));
        assert!(!full_house.beats(&straight));

        let single = hand("2S").unwrap();
        let pair = hand("3C 3D").unwrap();
        assert!(!single.beats(&pair));
        assert!(!pair.beats(&single));

        assert!(hand("3D").unwrap().beats(&hand("3C").unwrap()));
        assert!(!hand("3C").unwrap().beats(&hand("3C").unwrap()));
    }

    #[test]
    fn hand_display() {
        let h = hand("7C 3C 5H 4S 6D").unwrap();
        assert_eq!(h.to_string(), "Straight [3C 4S 5H 6D 7C]");
        assert!(h.contains(Card::THREE_OF_CLUBS));
    }
}
