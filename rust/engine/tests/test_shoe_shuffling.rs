use std::collections::HashMap;
use std::collections::HashSet;

use twentyone_engine::cards::Card;
use twentyone_engine::shoe::Shoe;

#[test]
fn single_deck_shoe_covers_all_52_cards_exactly_once() {
    let mut shoe = Shoe::new(1, 42).expect("valid shoe");
    let mut set = HashSet::new();
    for i in 0..52 {
        let c = shoe.draw().expect("should have 52 cards");
        assert!(set.insert(c), "card {:?} duplicated at position {}", c, i);
    }
    assert!(
        shoe.draw().is_err(),
        "after 52 cards, the shoe should be empty"
    );
}

#[test]
fn six_deck_shoe_holds_each_card_six_times() {
    let mut shoe = Shoe::new(6, 7).expect("valid shoe");
    let mut counts: HashMap<Card, u32> = HashMap::new();
    for _ in 0..(6 * 52) {
        let c = shoe.draw().expect("six decks of cards");
        *counts.entry(c).or_default() += 1;
    }
    assert_eq!(counts.len(), 52);
    assert!(counts.values().all(|&n| n == 6));
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut s1 = Shoe::new(6, 12345).expect("valid shoe");
    let mut s2 = Shoe::new(6, 12345).expect("valid shoe");
    let a: Vec<Card> = (0..10).map(|_| s1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| s2.draw().unwrap()).collect();
    assert_eq!(a, b, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut s1 = Shoe::new(6, 1).expect("valid shoe");
    let mut s2 = Shoe::new(6, 2).expect("valid shoe");
    let a: Vec<Card> = (0..10).map(|_| s1.draw().unwrap()).collect();
    let b: Vec<Card> = (0..10).map(|_| s2.draw().unwrap()).collect();
    assert_ne!(
        a, b,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn needs_reshuffle_triggers_at_threshold_never_before() {
    let mut shoe = Shoe::new(1, 9).expect("valid shoe");
    let threshold = 0.75;
    for dealt in 1..=52u32 {
        shoe.draw().expect("card");
        let penetration = dealt as f64 / 52.0;
        assert_eq!(
            shoe.needs_reshuffle(threshold),
            penetration >= threshold,
            "mismatch after {} cards dealt",
            dealt
        );
    }
}

#[test]
fn reshuffle_continues_the_seeded_stream_deterministically() {
    let run = |seed: u64| -> Vec<Card> {
        let mut shoe = Shoe::new(1, seed).expect("valid shoe");
        for _ in 0..40 {
            shoe.draw().unwrap();
        }
        shoe.reshuffle();
        (0..10).map(|_| shoe.draw().unwrap()).collect()
    };
    assert_eq!(run(777), run(777), "reshuffles must replay under one seed");
}
