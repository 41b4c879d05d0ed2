use std::cmp::Ordering;

use crate::cards::{Card, Suit};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

/// Strength of the best five-card hand found in seven cards.
/// Kickers are ordered high to low and break ties within a category.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    pub kickers: [u8; 5],
}

pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

/// Evaluate the best five-card hand from exactly seven cards
/// (two hole cards and a full board).
pub fn evaluate_seven(cards: &[Card; 7]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // indices 2..=14
    let mut suit_masks = [0u16; 4];
    let mut rank_mask: u16 = 0;
    for &c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        suit_masks[suit_index(c.suit)] |= 1 << r;
    }

    let flush_suit = (0..4).find(|&s| (suit_masks[s] as u16).count_ones() >= 5);

    if let Some(s) = flush_suit {
        if let Some(high) = straight_high(suit_masks[s]) {
            return strength(Category::StraightFlush, &[high]);
        }
    }

    if let Some(quad) = highest_with_count(&rank_counts, 4) {
        let kicker = top_ranks(&rank_counts, &[quad], 1);
        return strength(Category::FourOfAKind, &[quad, kicker[0]]);
    }

    let trips: Vec<u8> = ranks_with_count(&rank_counts, 3);
    let pairs: Vec<u8> = ranks_with_count(&rank_counts, 2);
    if let Some(&t) = trips.first() {
        // second trip plays as the pair of a full house
        let pair = trips.get(1).copied().or_else(|| pairs.first().copied());
        if let Some(p) = pair {
            return strength(Category::FullHouse, &[t, p]);
        }
    }

    if let Some(s) = flush_suit {
        let mut ranks: Vec<u8> = (2..=14u8).rev().filter(|r| suit_masks[s] & (1 << r) != 0).collect();
        ranks.truncate(5);
        return strength(Category::Flush, &ranks);
    }

    if let Some(high) = straight_high(rank_mask) {
        return strength(Category::Straight, &[high]);
    }

    if let Some(&t) = trips.first() {
        let mut k = vec![t];
        k.extend(top_ranks(&rank_counts, &[t], 2));
        return strength(Category::ThreeOfAKind, &k);
    }

    if pairs.len() >= 2 {
        let kicker = top_ranks(&rank_counts, &pairs[..2], 1);
        return strength(Category::TwoPair, &[pairs[0], pairs[1], kicker[0]]);
    }

    if let Some(&p) = pairs.first() {
        let mut k = vec![p];
        k.extend(top_ranks(&rank_counts, &[p], 3));
        return strength(Category::OnePair, &k);
    }

    strength(Category::HighCard, &top_ranks(&rank_counts, &[], 5))
}

fn strength(category: Category, kickers: &[u8]) -> HandStrength {
    let mut k = [0u8; 5];
    for (i, &r) in kickers.iter().take(5).enumerate() {
        k[i] = r;
    }
    HandStrength {
        category,
        kickers: k,
    }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Hearts => 0,
        Suit::Diamonds => 1,
        Suit::Clubs => 2,
        Suit::Spades => 3,
    }
}

/// High card of the best straight in a rank bitmask, treating the ace as
/// both high and low. None when no five ranks run consecutively.
fn straight_high(mask: u16) -> Option<u8> {
    let mut m = mask;
    if m & (1 << 14) != 0 {
        m |= 1 << 1; // wheel
    }
    for high in (5..=14u8).rev() {
        let window: u16 = 0b11111 << (high - 4);
        if m & window == window {
            return Some(high);
        }
    }
    None
}

fn highest_with_count(counts: &[u8; 15], want: u8) -> Option<u8> {
    (2..=14u8).rev().find(|&r| counts[r as usize] == want)
}

/// Ranks with exactly `want` copies, descending.
fn ranks_with_count(counts: &[u8; 15], want: u8) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&r| counts[r as usize] == want)
        .collect()
}

/// Top `n` present ranks descending, skipping `exclude`.
fn top_ranks(counts: &[u8; 15], exclude: &[u8], n: usize) -> Vec<u8> {
    (2..=14u8)
        .rev()
        .filter(|&r| counts[r as usize] > 0 && !exclude.contains(&r))
        .take(n)
        .collect()
}
