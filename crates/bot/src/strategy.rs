// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Move selection.
use log::debug;

use bigtwo_eval::{Card, Combination, Hand, HandEvaluation, HandKind, Rank};

use crate::{Config, Difficulty, TableContext, lookahead};

/// A Big Two bot strategy.
pub trait Strategy: Send + 'static {
    /// Chooses the cards to play from `hand`, returns `None` to pass.
    fn choose(&mut self, hand: &[Card], ctx: &TableContext) -> Option<Vec<Card>>;
}

/// A bot that plays with a given configuration.
#[derive(Debug, Clone, Default)]
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a bot.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// This bot configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Strategy for Bot {
    fn choose(&mut self, hand: &[Card], ctx: &TableContext) -> Option<Vec<Card>> {
        choose_move(hand, ctx, &self.config)
    }
}

/// Chooses the cards to play from `hand`, returns `None` to pass.
///
/// Passing is the result whenever no legal candidate exists, this function
/// never fails.
pub fn choose_move(hand: &[Card], ctx: &TableContext, config: &Config) -> Option<Vec<Card>> {
    let mut hand = hand.to_vec();
    hand.sort();
    hand.dedup();

    if hand.is_empty() {
        return None;
    }

    let turn = Turn::new(&hand, ctx, config);
    let choice = match config.difficulty {
        Difficulty::Minimal => turn.minimal_move(),
        Difficulty::Easy => turn.easy_move(),
        Difficulty::Hard => turn.hard_move(),
    };

    match &choice {
        Some(combo) => debug!("{} bot plays {}", config.difficulty, combo.hand()),
        None => debug!("{} bot passes", config.difficulty),
    }

    choice.map(|combo| combo.cards().to_vec())
}

/// The data used to choose a move.
struct Turn<'a> {
    hand: &'a [Card],
    eval: HandEvaluation,
    ctx: &'a TableContext,
    config: &'a Config,
}

impl<'a> Turn<'a> {
    fn new(hand: &'a [Card], ctx: &'a TableContext, config: &'a Config) -> Self {
        Self {
            hand,
            eval: HandEvaluation::evaluate(hand),
            ctx,
            config,
        }
    }

    fn is_late_game(&self) -> bool {
        self.hand.len() <= self.config.late_game_threshold
    }

    fn is_dangerous(&self) -> bool {
        self.ctx.is_dangerous(self.config.danger_threshold)
    }

    fn must_open(&self) -> bool {
        self.ctx.is_first_turn && self.hand.contains(&Card::THREE_OF_CLUBS)
    }

    /// Plays the three of clubs on the first turn, otherwise the smallest
    /// single, never plays pairs or five cards hands.
    fn minimal_move(&self) -> Option<Combination> {
        if self.must_open() {
            return Some(Combination::single(Card::THREE_OF_CLUBS));
        }

        match &self.ctx.last_played {
            None => self.hand.first().map(|c| Combination::single(*c)),
            Some(last) => self.beating_singles(last).into_iter().next(),
        }
    }

    fn easy_move(&self) -> Option<Combination> {
        if self.must_open() {
            return Some(self.opening_move());
        }

        match &self.ctx.last_played {
            None => self.lead_move(),
            Some(last) => match last.kind() {
                HandKind::Single => self.follow_single(last),
                HandKind::Pair => self.follow_pair(last),
                _ => self
                    .eval
                    .fives_and_bombs()
                    .find(|c| c.hand().beats(last))
                    .cloned(),
            },
        }
    }

    fn hard_move(&self) -> Option<Combination> {
        let candidates = self.candidates();
        lookahead::best_move(self.hand, &candidates, self.ctx, self.config)
    }

    /// Opens the round with the largest group that contains the three of clubs.
    fn opening_move(&self) -> Combination {
        let three = Card::THREE_OF_CLUBS;
        self.eval
            .fives_and_bombs()
            .chain(self.eval.pairs())
            .find(|c| c.contains(three))
            .cloned()
            .unwrap_or_else(|| Combination::single(three))
    }

    fn lead_move(&self) -> Option<Combination> {
        if let Some(hand) = Hand::identify(self.hand) {
            return Some(Combination::new(hand));
        }

        if let Some(five) = self.eval.fives().last() {
            return Some(five.clone());
        }

        // Bombs are held back until late game.
        if self.is_late_game() {
            if let Some(bomb) = self.eval.bombs().last() {
                return Some(bomb.clone());
            }
        }

        if let Some(pair) = self.eval.pairs().last() {
            return Some(pair.clone());
        }

        self.eval
            .singles()
            .iter()
            .find(|c| c.rank() < Rank::Ten)
            .or_else(|| self.hand.first())
            .map(|c| Combination::single(*c))
    }

    fn follow_single(&self, last: &Hand) -> Option<Combination> {
        let singles = self.beating_singles(last);

        // Block the next player from going out with the largest single.
        if self.ctx.next_player_has_one_card() {
            return singles.last().cloned().or_else(|| self.weakest_bomb(last));
        }

        let single = singles
            .iter()
            .find(|c| c.cards()[0].rank() != Rank::Deuce)
            .or_else(|| singles.first())
            .cloned();

        if single.is_some() {
            single
        } else if self.is_dangerous() || self.is_late_game() {
            self.weakest_bomb(last)
        } else {
            None
        }
    }

    fn follow_pair(&self, last: &Hand) -> Option<Combination> {
        match self.smallest_beating_pair(last) {
            Some(pair) if is_deuce_pair(pair) && !self.can_spend_deuces() => None,
            Some(pair) => Some(pair.clone()),
            None => self.weakest_bomb(last),
        }
    }

    /// Candidate moves for the lookahead bot.
    ///
    /// The same conservation rules of the rank based bot are applied here so
    /// that the lookahead only ranks moves the bot is willing to make.
    fn candidates(&self) -> Vec<Combination> {
        // Open with the largest groups that contain the three of clubs.
        if self.must_open() {
            let opening = self
                .all_combinations()
                .into_iter()
                .filter(|c| c.contains(Card::THREE_OF_CLUBS))
                .collect::<Vec<_>>();
            let largest = opening.iter().map(Combination::len).max().unwrap_or_default();
            return opening.into_iter().filter(|c| c.len() == largest).collect();
        }

        let Some(last) = &self.ctx.last_played else {
            return self.all_combinations();
        };

        let (bombs, mut moves): (Vec<_>, Vec<_>) = self
            .all_combinations()
            .into_iter()
            .filter(|c| c.hand().beats(last))
            .partition(|c| c.hand().is_bomb());

        let allow_bombs = match last.kind() {
            HandKind::Single if self.ctx.next_player_has_one_card() => moves.is_empty(),
            HandKind::Single => moves.is_empty() && (self.is_dangerous() || self.is_late_game()),
            HandKind::Pair => moves.is_empty(),
            _ => true,
        };

        match last.kind() {
            HandKind::Single if self.ctx.next_player_has_one_card() => {
                moves = moves.pop().into_iter().collect();
            }
            HandKind::Pair if !self.can_spend_deuces() => {
                moves.retain(|c| !is_deuce_pair(c));
            }
            _ => {}
        }

        if allow_bombs {
            moves.extend(bombs);
        }

        moves
    }

    /// Every combination in the hand, weakest first within each group.
    fn all_combinations(&self) -> Vec<Combination> {
        let mut combos = Vec::new();

        if self.hand.len() == 13 {
            if let Some(dragon) = Hand::identify(self.hand) {
                combos.push(Combination::new(dragon));
            }
        }

        combos.extend(self.hand.iter().map(|c| Combination::single(*c)));
        combos.extend(self.eval.pairs().iter().rev().cloned());
        combos.extend(self.eval.fives().iter().rev().cloned());
        combos.extend(self.eval.bombs().iter().rev().cloned());
        combos
    }

    /// Singles that beat `last`, smallest first.
    fn beating_singles(&self, last: &Hand) -> Vec<Combination> {
        self.hand
            .iter()
            .map(|c| Combination::single(*c))
            .filter(|c| c.hand().beats(last))
            .collect()
    }

    fn smallest_beating_pair(&self, last: &Hand) -> Option<&Combination> {
        self.eval
            .pairs()
            .iter()
            .rev()
            .find(|c| c.hand().beats(last))
    }

    fn weakest_bomb(&self, last: &Hand) -> Option<Combination> {
        self.eval
            .bombs()
            .iter()
            .rev()
            .find(|c| c.hand().beats(last))
            .cloned()
    }

    /// A pair of deuces is only spent against a dangerous opponent or when
    /// the bot is close to going out.
    fn can_spend_deuces(&self) -> bool {
        self.is_dangerous() || self.is_late_game()
    }
}

fn is_deuce_pair(combo: &Combination) -> bool {
    combo.hand().kind() == HandKind::Pair && combo.cards()[0].rank() == Rank::Deuce
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigtwo_eval::parse_cards;

    fn cards(s: &str) -> Vec<Card> {
        parse_cards(s).unwrap()
    }

    fn hand(s: &str) -> Hand {
        Hand::identify(&cards(s)).unwrap()
    }

    fn following(last: &str, opponents: [usize; 3]) -> TableContext {
        TableContext {
            last_played: Some(hand(last)),
            is_first_turn: false,
            opponent_hand_sizes: opponents.to_vec(),
            next_player_hand_size: Some(opponents[0]),
        }
    }

    fn leading(opponents: [usize; 3]) -> TableContext {
        TableContext {
            last_played: None,
            is_first_turn: false,
            opponent_hand_sizes: opponents.to_vec(),
            next_player_hand_size: Some(opponents[0]),
        }
    }

    fn all_configs() -> [Config; 3] {
        [Config::minimal(), Config::easy(), Config::hard()]
    }

    #[test]
    fn opening_with_three_of_clubs_alone() {
        let ctx = TableContext {
            is_first_turn: true,
            opponent_hand_sizes: vec![13, 13, 13],
            next_player_hand_size: Some(13),
            ..Default::default()
        };

        // No fours, no other treys.
        let hand = cards("3C 5D 7H 9S JC KD AH 2S 6H 8C TD QS 9D");
        for config in all_configs() {
            assert_eq!(
                choose_move(&hand, &ctx, &config),
                Some(vec![Card::THREE_OF_CLUBS]),
                "{:?}",
                config.difficulty
            );
        }
    }

    #[test]
    fn opening_prefers_larger_groups() {
        let ctx = TableContext {
            is_first_turn: true,
            opponent_hand_sizes: vec![13, 13, 13],
            next_player_hand_size: Some(13),
            ..Default::default()
        };

        let hand = cards("3C 3D 7H 9S JC KD AH 2S 4H 6H 8C TD QS");
        for config in [Config::easy(), Config::hard()] {
            let played = choose_move(&hand, &ctx, &config).unwrap();
            assert_eq!(played, cards("3C 3D"));
        }

        // A five cards hand is preferred to the pair of treys.
        let hand = cards("3C 4D 5H 6S 7C 3D 9H JS KC KD AS 2H QH");
        for config in [Config::easy(), Config::hard()] {
            let played = choose_move(&hand, &ctx, &config).unwrap();
            assert_eq!(played.len(), 5);
            assert!(played.contains(&Card::THREE_OF_CLUBS));
        }

        let hand = cards("3C 4D 5H 6S 7C KD AH 2S 4H 6H 8C TD QS");
        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert_eq!(played.len(), 5);
        assert!(played.contains(&Card::THREE_OF_CLUBS));

        // Every difficulty includes the opening card.
        for config in all_configs() {
            let played = choose_move(&hand, &ctx, &config).unwrap();
            assert!(played.contains(&Card::THREE_OF_CLUBS));
        }
    }

    #[test]
    fn pass_when_nothing_beats() {
        let ctx = following("2S", [10, 10, 10]);
        let hand = cards("3C 5D 7H 9S JC KD AH");
        for config in all_configs() {
            assert_eq!(choose_move(&hand, &ctx, &config), None);
        }

        let ctx = following("3C 4D 5H 6S 7C", [10, 10, 10]);
        for config in all_configs() {
            assert_eq!(choose_move(&hand, &ctx, &config), None);
        }
    }

    #[test]
    fn pass_with_empty_hand() {
        let ctx = leading([10, 10, 10]);
        for config in all_configs() {
            assert_eq!(choose_move(&[], &ctx, &config), None);
        }
    }

    #[test]
    fn withhold_pair_of_deuces() {
        let ctx = following("2C 2D", [10, 10, 10]);
        let hand = cards("2H 2S 4C 6D 8H TC QS");
        for config in all_configs() {
            assert_eq!(choose_move(&hand, &ctx, &config), None);
        }

        // A dangerous opponent releases the deuces.
        let ctx = following("2C 2D", [10, 2, 10]);
        for config in [Config::easy(), Config::hard()] {
            assert_eq!(choose_move(&hand, &ctx, &config), Some(cards("2H 2S")));
        }

        // As does being close to going out.
        let ctx = following("2C 2D", [10, 10, 10]);
        let hand = cards("2H 2S 4C 6D");
        for config in [Config::easy(), Config::hard()] {
            assert_eq!(choose_move(&hand, &ctx, &config), Some(cards("2H 2S")));
        }
    }

    #[test]
    fn smallest_pair_that_beats() {
        let ctx = following("5C 5D", [10, 10, 10]);
        let hand = cards("4C 4D 6H 6S 9C 9D KH 2S");
        assert_eq!(choose_move(&hand, &ctx, &Config::easy()), Some(cards("6H 6S")));
        assert_eq!(choose_move(&hand, &ctx, &Config::minimal()), None);
    }

    #[test]
    fn follow_single() {
        let ctx = following("8C", [10, 10, 10]);
        let hand = cards("3D 6C 9H KD 2S AC");
        assert_eq!(choose_move(&hand, &ctx, &Config::easy()), Some(cards("9H")));
        assert_eq!(choose_move(&hand, &ctx, &Config::minimal()), Some(cards("9H")));

        // Deuces are spent only when nothing else beats.
        let ctx = following("AS", [10, 10, 10]);
        assert_eq!(choose_move(&hand, &ctx, &Config::easy()), Some(cards("2S")));
    }

    #[test]
    fn block_next_player_with_one_card() {
        let ctx = following("5C", [1, 10, 10]);
        let hand = cards("3D 6C 9H KD 2S AC");
        for config in [Config::easy(), Config::hard()] {
            assert_eq!(choose_move(&hand, &ctx, &config), Some(cards("2S")));
        }

        // The smallest single for the minimal bot.
        assert_eq!(
            choose_move(&hand, &ctx, &Config::minimal()),
            Some(cards("6C"))
        );
    }

    #[test]
    fn bomb_fallback_on_singles() {
        let hand = cards("4C 4D 4H 4S 6C 9D JH");

        // Held back when nobody is dangerous.
        let ctx = following("2S", [10, 10, 10]);
        assert_eq!(choose_move(&hand, &ctx, &Config::easy()), None);
        assert_eq!(choose_move(&hand, &ctx, &Config::hard()), None);

        let ctx = following("2S", [10, 3, 10]);
        for config in [Config::easy(), Config::hard()] {
            let played = choose_move(&hand, &ctx, &config).unwrap();
            let played = Hand::identify(&played).unwrap();
            assert_eq!(played.kind(), HandKind::FourOfAKind);
        }
    }

    #[test]
    fn follow_five_cards() {
        let ctx = following("3C 4D 5H 6S 7D", [10, 10, 10]);
        let hand = cards("4C 5D 6H 7S 8C 9C 9D 9H 9S QD");

        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert!(Hand::identify(&played).unwrap().beats(&hand_of(&ctx)));

        let played = choose_move(&hand, &ctx, &Config::hard()).unwrap();
        let played = Hand::identify(&played).unwrap();
        assert_eq!(played.kind(), HandKind::Straight);

        assert_eq!(choose_move(&hand, &ctx, &Config::minimal()), None);
    }

    fn hand_of(ctx: &TableContext) -> Hand {
        ctx.last_played.clone().unwrap()
    }

    #[test]
    fn bombs_beat_five_cards_references() {
        let ctx = following("TC JD QH KS AC", [10, 10, 10]);
        let hand = cards("3C 5C 5D 5H 5S 8D 9H JC");
        for config in [Config::easy(), Config::hard()] {
            let played = choose_move(&hand, &ctx, &config).unwrap();
            assert!(Hand::identify(&played).unwrap().is_bomb());
        }
    }

    #[test]
    fn lead_clears_hand() {
        let ctx = leading([10, 10, 10]);
        let hand = cards("3C 4D 5H 6S 7C");
        for config in [Config::easy(), Config::hard()] {
            assert_eq!(choose_move(&hand, &ctx, &config), Some(hand.clone()));
        }

        let hand = cards("9C 9D");
        for config in [Config::easy(), Config::hard()] {
            assert_eq!(choose_move(&hand, &ctx, &config), Some(hand.clone()));
        }
    }

    #[test]
    fn easy_lead_order() {
        let ctx = leading([10, 10, 10]);

        // Five cards hands first.
        let hand = cards("3C 4D 5H 6S 7C 9D 9H KS");
        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert_eq!(played, cards("3C 4D 5H 6S 7C"));

        // Then the weakest pair.
        let hand = cards("3C 5D 9H 9S KC KD 2S");
        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert_eq!(played, cards("9H 9S"));

        // Then a small single.
        let hand = cards("6C 9D JH KS 2S AC");
        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert_eq!(played, cards("6C"));

        // Then the weakest card.
        let hand = cards("JH KS 2S AC");
        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert_eq!(played, cards("JH"));
    }

    #[test]
    fn easy_holds_bombs_early() {
        let ctx = leading([10, 10, 10]);
        let hand = cards("3C 5D 5C 5H 5S 8D 9H JC");
        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert_eq!(played, cards("5C 5D"));

        let hand = cards("5D 5C 5H 5S 8D");
        let played = choose_move(&hand, &ctx, &Config::easy()).unwrap();
        assert_eq!(played, cards("5C 5D 5H 5S 8D"));
    }

    #[test]
    fn hard_leads_lowest_single() {
        let ctx = leading([10, 10, 10]);
        let hand = cards("3D 5C 7H 9S JD KC 2H");
        let played = choose_move(&hand, &ctx, &Config::hard()).unwrap();
        assert_eq!(played, cards("3D"));
    }

    #[test]
    fn minimal_leads_smallest_card() {
        let ctx = leading([10, 10, 10]);
        let hand = cards("3D 4D 5H 6S 7C 9D 9H");
        assert_eq!(choose_move(&hand, &ctx, &Config::minimal()), Some(cards("3D")));

        let ctx = following("3C 3S", [10, 10, 10]);
        assert_eq!(choose_move(&hand, &ctx, &Config::minimal()), None);
    }

    #[test]
    fn choices_are_legal() {
        use bigtwo_eval::Deck;
        use rand::{SeedableRng, rngs::StdRng};

        let mut rng = StdRng::seed_from_u64(99);
        let references = ["3C", "KH", "5C 5D", "3C 4D 5H 6S 7C", "8C 8D 8H 4C 4D"];

        for _ in 0..8 {
            let hands = Deck::new_and_shuffled(&mut rng).deal_hands();
            for hand in &hands {
                for reference in references {
                    let ctx = following(reference, [10, 2, 10]);
                    for config in all_configs() {
                        if let Some(played) = choose_move(hand, &ctx, &config) {
                            assert!(played.iter().all(|c| hand.contains(c)));
                            let played = Hand::identify(&played).unwrap();
                            assert!(played.beats(&hand_of(&ctx)));
                        }
                    }
                }

                let ctx = leading([10, 10, 10]);
                for config in all_configs() {
                    let played = choose_move(hand, &ctx, &config).unwrap();
                    assert!(Hand::identify(&played).is_some());
                }
            }
        }
    }

    #[test]
    fn bot_strategy() {
        let mut bot = Bot::new(Config::easy());
        assert_eq!(bot.config().difficulty, Difficulty::Easy);

        let ctx = following("8C", [10, 10, 10]);
        let hand = cards("3D 6C 9H KD 2S AC");
        assert_eq!(bot.choose(&hand, &ctx), Some(cards("9H")));
    }
}
