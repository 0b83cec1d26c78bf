// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Big Two cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A Big Two card.
///
/// A card is represented by its weight, a unique value in 0..=129 computed as
/// `rank * 10 + suit` where ranks and suits use the Big Two ordering:
///
/// ```text
///   rank: 3=0, 4=1, 5=2, ..., K=10, A=11, 2=12
///   suit: clubs=0, diamonds=1, hearts=2, spades=3
/// ```
///
/// Comparing two cards compares their weights, so the three of clubs is the
/// lowest card and the two of spades the highest.
///
/// Cards serialize as their weight, deserializing a value that is not the
/// weight of a card fails.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// The card that must be played on the first turn of a round.
    pub const THREE_OF_CLUBS: Card = Card(0);

    /// Create a card given a rank and suit.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Self(rank as u8 * 10 + suit as u8)
    }

    /// The card weight, unique for each card in the deck.
    #[inline]
    pub fn weight(&self) -> u32 {
        self.0 as u32
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        Rank::from_order(self.0 / 10)
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.0 % 10 {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = ParseCardError;

    fn try_from(weight: u8) -> Result<Self, Self::Error> {
        if weight > Card::new(Rank::Deuce, Suit::Spades).0 || weight % 10 > Suit::Spades as u8 {
            Err(ParseCardError::Weight(weight))
        } else {
            Ok(Card(weight))
        }
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

/// Error returned when parsing a card from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The text is not a rank followed by a suit.
    #[error("invalid card '{0}'")]
    Format(String),
    /// Unknown rank character.
    #[error("invalid rank '{0}'")]
    Rank(String),
    /// Unknown suit character.
    #[error("invalid suit '{0}'")]
    Suit(char),
    /// The value is not the weight of a card.
    #[error("invalid card weight {0}")]
    Weight(u8),
}

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit_char = chars
            .next_back()
            .ok_or_else(|| ParseCardError::Format(s.to_string()))?;
        let rank_str = chars.as_str();
        if rank_str.is_empty() {
            return Err(ParseCardError::Format(s.to_string()));
        }

        let rank = match rank_str.to_ascii_uppercase().as_str() {
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            "2" => Rank::Deuce,
            _ => return Err(ParseCardError::Rank(rank_str.to_string())),
        };

        let suit = match suit_char.to_ascii_uppercase() {
            'C' => Suit::Clubs,
            'D' => Suit::Diamonds,
            'H' => Suit::Hearts,
            'S' => Suit::Spades,
            c => return Err(ParseCardError::Suit(c)),
        };

        Ok(Card::new(rank, suit))
    }
}

/// Parses a whitespace separated list of cards (eg. "3C 4D TH").
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    s.split_whitespace().map(str::parse).collect()
}

/// Sorts cards in ascending weight order.
pub fn sort_cards(cards: &mut [Card]) {
    cards.sort();
}

/// Card rank in Big Two order, the deuce is the highest rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Trey
    Trey = 0,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
    /// Deuce
    Deuce,
}

impl Rank {
    /// Number of ranks.
    pub const COUNT: usize = 13;

    /// Returns all ranks from the lowest to the highest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace, Deuce,
        ]
        .into_iter()
    }

    /// The rank position in Big Two order (trey=0, deuce=12).
    #[inline]
    pub fn order(&self) -> u32 {
        *self as u32
    }

    /// Returns the rank for an order value, values past the deuce saturate.
    pub fn from_order(order: u8) -> Rank {
        match order {
            0 => Rank::Trey,
            1 => Rank::Four,
            2 => Rank::Five,
            3 => Rank::Six,
            4 => Rank::Seven,
            5 => Rank::Eight,
            6 => Rank::Nine,
            7 => Rank::Ten,
            8 => Rank::Jack,
            9 => Rank::Queen,
            10 => Rank::King,
            11 => Rank::Ace,
            _ => Rank::Deuce,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Deuce => '2',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits from the lowest to the highest.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// The suit position in Big Two order (clubs=0, spades=3).
    #[inline]
    pub fn order(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// The number of seats at a table.
    pub const SEATS: usize = 4;

    /// The number of cards dealt to each seat.
    pub const HAND_SIZE: usize = Self::SIZE / Self::SEATS;

    /// Creates a new deck shuffled with the given random generator.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Creates a new deck shuffled with the thread random generator.
    pub fn shuffled() -> Self {
        Self::new_and_shuffled(&mut rand::rng())
    }

    /// Shuffles the cards left in the deck.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deals the cards left in the deck to the four seats, one card at a time,
    /// and returns each seat hand sorted.
    pub fn deal_hands(mut self) -> [Vec<Card>; Self::SEATS] {
        let mut hands: [Vec<Card>; Self::SEATS] = Default::default();

        let mut seat = 0;
        while let Some(card) = self.deal() {
            hands[seat].push(card);
            seat = (seat + 1) % Self::SEATS;
        }

        for hand in hands.iter_mut() {
            sort_cards(hand);
        }

        hands
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
