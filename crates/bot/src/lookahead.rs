// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lookahead move scoring.
//!
//! Each candidate gets the score of the move itself, plus the discounted score
//! of the best sequence of leads from the remaining cards, plus an adjustment
//! when an opponent is close to going out. The highest score wins and ties
//! keep the first candidate.
use log::trace;

use bigtwo_eval::{Card, Category, Combination, HIGH_CARD_WEIGHT, HandEvaluation};

use crate::{Config, MAX_LOOKAHEAD_DEPTH, TableContext};

/// Score for each card played.
const CARD_PLAYED: i32 = 10;
/// Bonus for playing a five cards hand.
const FIVE_BONUS: i32 = 40;
/// Bonus for playing a bomb.
const BOMB_BONUS: i32 = 20;
/// Cost of playing a single or pair that belongs to a five cards hand.
const BREAK_FIVE_COST: i32 = 25;
/// Cost of playing a single or pair that belongs to a bomb.
const BREAK_BOMB_COST: i32 = 60;
/// Cost of a bomb that doesn't go out while nobody is dangerous.
const GRATUITOUS_BOMB_COST: i32 = 150;
/// Value of an empty hand.
const WIN_SCORE: i32 = 1_000;
/// Cost of each card left in the hand.
const CARD_LEFT_COST: i32 = 15;
/// Cost of each high card left in the hand.
const HIGH_CARD_LEFT_COST: i32 = 5;
/// Continuation scores are divided by this at each ply.
const FUTURE_DISCOUNT: i32 = 2;
/// Bonus for bombs when an opponent is dangerous.
const DANGER_BOMB_BONUS: i32 = 150;
/// Cost of a weak single when an opponent is dangerous.
const DANGER_WEAK_SINGLE_COST: i32 = 50;

/// Returns the candidate with the highest score.
pub(crate) fn best_move(
    hand: &[Card],
    candidates: &[Combination],
    ctx: &TableContext,
    config: &Config,
) -> Option<Combination> {
    let eval = HandEvaluation::evaluate(hand);
    let danger = ctx.is_dangerous(config.danger_threshold);
    let depth = config.lookahead_depth.clamp(1, MAX_LOOKAHEAD_DEPTH) - 1;

    let mut best: Option<(i32, &Combination)> = None;
    for candidate in candidates {
        let remaining = remove_cards(hand, candidate.cards());
        let score = immediate_score(candidate, &eval, remaining.len(), danger)
            + simulate_future(&remaining, depth)
            + danger_adjustment(candidate, danger);

        trace!("{} scores {score}", candidate.hand());

        if best.is_none_or(|(best_score, _)| score > best_score) {
            best = Some((score, candidate));
        }
    }

    best.map(|(_, candidate)| candidate.clone())
}

/// The value of a move before looking at the remaining cards.
fn immediate_score(
    candidate: &Combination,
    eval: &HandEvaluation,
    cards_left: usize,
    danger: bool,
) -> i32 {
    let mut score = CARD_PLAYED * candidate.len() as i32;

    score += match candidate.category() {
        Category::Five => FIVE_BONUS,
        Category::Bomb => BOMB_BONUS,
        Category::Pair | Category::Single => 0,
    };

    score -= move_cost(candidate, eval);

    if candidate.category() == Category::Bomb && cards_left > 0 && !danger {
        score -= GRATUITOUS_BOMB_COST;
    }

    score
}

/// The cost of spending cards on a small play, higher for strong cards and
/// for cards taken from a five cards hand or a bomb.
fn move_cost(candidate: &Combination, eval: &HandEvaluation) -> i32 {
    if candidate.len() >= 5 {
        return 0;
    }

    let cards = candidate.cards();
    let mut cost = cards.iter().map(|c| c.weight() as i32 / 5).sum::<i32>();

    if eval.fives().iter().any(|c| c.shares_cards(cards)) {
        cost += BREAK_FIVE_COST;
    }

    if eval.bombs().iter().any(|c| c.shares_cards(cards)) {
        cost += BREAK_BOMB_COST;
    }

    cost
}

/// Scores the best sequence of leads from the remaining cards.
fn simulate_future(remaining: &[Card], depth: u8) -> i32 {
    if remaining.is_empty() {
        return WIN_SCORE;
    }

    let eval = HandEvaluation::evaluate(remaining);
    if depth == 0 {
        return residual_value(remaining, &eval);
    }

    let best = lead_options(remaining, &eval)
        .iter()
        .map(|option| {
            let rest = remove_cards(remaining, option.cards());
            immediate_score(option, &eval, rest.len(), false) + simulate_future(&rest, depth - 1)
        })
        .max()
        .unwrap_or_else(|| residual_value(remaining, &eval));

    best / FUTURE_DISCOUNT
}

/// The value of the cards left at the end of the search.
fn residual_value(remaining: &[Card], eval: &HandEvaluation) -> i32 {
    let high_cards = remaining
        .iter()
        .filter(|c| c.weight() >= HIGH_CARD_WEIGHT)
        .count() as i32;

    eval.total_strength()
        - CARD_LEFT_COST * remaining.len() as i32
        - HIGH_CARD_LEFT_COST * high_cards
}

fn danger_adjustment(candidate: &Combination, danger: bool) -> i32 {
    if !danger {
        return 0;
    }

    match candidate.category() {
        Category::Bomb => DANGER_BOMB_BONUS,
        Category::Single if candidate.cards()[0].weight() < HIGH_CARD_WEIGHT => {
            -DANGER_WEAK_SINGLE_COST
        }
        _ => 0,
    }
}

/// Every move available when leading a trick.
fn lead_options(cards: &[Card], eval: &HandEvaluation) -> Vec<Combination> {
    cards
        .iter()
        .map(|c| Combination::single(*c))
        .chain(eval.pairs().iter().cloned())
        .chain(eval.fives().iter().cloned())
        .chain(eval.bombs().iter().cloned())
        .collect()
}

fn remove_cards(hand: &[Card], cards: &[Card]) -> Vec<Card> {
    hand.iter().copied().filter(|c| !cards.contains(c)).collect()
}
