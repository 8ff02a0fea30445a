use super::*;
use engine_core::{Determinizer, Heuristic};
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Two-player deck where seat 0 is dealt `seat0` and seat 1 `seat1` in the
/// first round, with `filler` underneath for later rounds.
fn stacked_deck(seat0: &[Card], seat1: &[Card], filler: &[Card]) -> Vec<Card> {
    let mut deck = filler.to_vec();
    deck.extend_from_slice(seat1);
    deck.extend_from_slice(seat0);
    deck
}

fn play(state: &mut State, picks: &[Action]) {
    for action in picks {
        state.apply(action);
    }
}

fn card_counts<'a>(cards: impl Iterator<Item = &'a Card>) -> HashMap<Card, usize> {
    let mut counts = HashMap::new();
    for &card in cards {
        *counts.entry(card).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_standard_deck_composition() {
    let deck = standard_deck();
    assert_eq!(deck.len(), 108);
    let counts = card_counts(deck.iter());
    assert_eq!(counts[&Card::Tempura], 14);
    assert_eq!(counts[&Card::Maki(2)], 12);
    assert_eq!(counts[&Card::Pudding], 10);
    assert_eq!(counts[&Card::Chopsticks], 4);
}

#[test]
fn test_new_game_deals_hands() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let state = State::new(4, &mut rng).unwrap();

    for player in 0..4 {
        assert_eq!(state.hand(player).len(), 8);
        assert_eq!(state.score(player), 0);
    }
    assert_eq!(state.deck().len(), 108 - 32);
    assert_eq!(state.round_counter(), 0);
    assert_eq!(state.turn_counter(), 0);
    assert_eq!(state.current_player(), 0);
    assert!(!state.is_terminal());
}

#[test]
fn test_hand_sizes_by_player_count() {
    assert_eq!(hand_size(2), 10);
    assert_eq!(hand_size(3), 9);
    assert_eq!(hand_size(4), 8);
    assert_eq!(hand_size(5), 7);
}

#[test]
fn test_rejects_bad_player_counts() {
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    assert!(matches!(State::new(1, &mut rng), Err(SetupError::PlayerCount(1))));
    assert!(matches!(State::new(6, &mut rng), Err(SetupError::PlayerCount(6))));
}

#[test]
fn test_rejects_short_deck() {
    let result = State::custom(2, 3, 2, vec![Card::Tempura; 11]);
    assert!(matches!(
        result,
        Err(SetupError::DeckExhausted {
            needed: 12,
            available: 11
        })
    ));
}

#[test]
fn test_legal_actions_are_distinct_cards() {
    let deck = stacked_deck(
        &[Card::Sashimi, Card::Sashimi, Card::Wasabi],
        &[Card::Tempura, Card::Tempura, Card::EggNigiri],
        &[],
    );
    let state = State::custom(2, 3, 1, deck).unwrap();

    assert_eq!(
        state.legal_actions(),
        vec![Action::Pick(Card::Sashimi), Action::Pick(Card::Wasabi)]
    );
}

#[test]
fn test_pick_stays_hidden_until_reveal() {
    let deck = stacked_deck(
        &[Card::Sashimi, Card::Sashimi, Card::Wasabi],
        &[Card::Tempura, Card::Tempura, Card::EggNigiri],
        &[],
    );
    let mut state = State::custom(2, 3, 1, deck).unwrap();

    state.apply(&Action::Pick(Card::Sashimi));
    assert_eq!(state.pending(0), &[Card::Sashimi]);
    assert_eq!(state.tableau(0), &Tableau::default());
    assert_eq!(state.current_player(), 1);
    assert_eq!(state.turn_counter(), 0);

    state.apply(&Action::Pick(Card::EggNigiri));
    assert_eq!(state.tableau(0).sashimi, 1);
    assert_eq!(state.tableau(1).nigiri_points, 1);
    assert!(state.pending(0).is_empty());
    assert_eq!(state.turn_counter(), 1);
    assert_eq!(state.current_player(), 0);

    // Hands passed along
    assert_eq!(state.hand(0), &[Card::Tempura, Card::Tempura]);
    assert_eq!(state.hand(1), &[Card::Sashimi, Card::Wasabi]);
}

#[test]
fn test_info_key_hides_pending_pick() {
    let deck = stacked_deck(
        &[Card::Sashimi, Card::Sashimi, Card::Wasabi],
        &[Card::Tempura, Card::Tempura, Card::EggNigiri],
        &[],
    );
    let start = State::custom(2, 3, 1, deck).unwrap();

    let mut took_sashimi = start.clone();
    took_sashimi.apply(&Action::Pick(Card::Sashimi));
    let mut took_wasabi = start.clone();
    took_wasabi.apply(&Action::Pick(Card::Wasabi));

    // Seat 1 cannot tell the picks apart, seat 0 can
    assert_eq!(took_sashimi.info_key(1), took_wasabi.info_key(1));
    assert_ne!(took_sashimi.info_key(0), took_wasabi.info_key(0));
    assert_ne!(took_sashimi.info_key(0), took_sashimi.info_key(1));
}

#[test]
fn test_info_key_ignores_hand_order() {
    let a = State::custom(
        2,
        2,
        1,
        stacked_deck(&[Card::Tempura, Card::Wasabi], &[Card::Pudding, Card::Dumpling], &[]),
    )
    .unwrap();
    let b = State::custom(
        2,
        2,
        1,
        stacked_deck(&[Card::Wasabi, Card::Tempura], &[Card::Dumpling, Card::Pudding], &[]),
    )
    .unwrap();

    assert_eq!(a.info_key(0), b.info_key(0));
}

#[test]
fn test_wasabi_triples_next_nigiri() {
    let deck = stacked_deck(
        &[Card::Wasabi, Card::SquidNigiri],
        &[Card::Wasabi, Card::SquidNigiri],
        &[],
    );
    let mut state = State::custom(2, 2, 1, deck).unwrap();

    play(
        &mut state,
        &[
            Action::Pick(Card::Wasabi),
            Action::Pick(Card::Wasabi),
            Action::Pick(Card::SquidNigiri),
            Action::Pick(Card::SquidNigiri),
        ],
    );

    assert!(state.is_terminal());
    assert_eq!(state.score(0), 9);
    assert_eq!(state.score(1), 9);
}

#[test]
fn test_tableau_set_scoring() {
    let mut tableau = Tableau::default();
    for _ in 0..5 {
        tableau.add(Card::Tempura);
    }
    assert_eq!(tableau.round_points(), 10);

    let mut tableau = Tableau::default();
    for _ in 0..7 {
        tableau.add(Card::Sashimi);
    }
    assert_eq!(tableau.round_points(), 20);

    let mut tableau = Tableau::default();
    for (count, expected) in [1, 3, 6, 10, 15, 15, 15].into_iter().enumerate() {
        tableau.add(Card::Dumpling);
        assert_eq!(tableau.round_points(), expected, "{} dumplings", count + 1);
    }
}

#[test]
fn test_nigiri_without_wasabi_scores_face_value() {
    let mut tableau = Tableau::default();
    tableau.add(Card::SalmonNigiri);
    tableau.add(Card::Wasabi);
    assert_eq!(tableau.nigiri_points, 2);
    assert_eq!(tableau.open_wasabi, 1);

    tableau.add(Card::EggNigiri);
    assert_eq!(tableau.nigiri_points, 5);
    assert_eq!(tableau.open_wasabi, 0);
}

#[test]
fn test_maki_awards() {
    assert_eq!(maki_awards(&[6, 3, 1]), vec![6, 3, 0]);
    assert_eq!(maki_awards(&[4, 2, 2]), vec![6, 1, 1]);
    assert_eq!(maki_awards(&[3, 0, 0]), vec![6, 0, 0]);
    assert_eq!(maki_awards(&[0, 0]), vec![0, 0]);
}

#[test]
fn test_maki_tie_for_first_skips_second() {
    assert_eq!(maki_awards(&[5, 5, 2]), vec![3, 3, 0]);
    assert_eq!(maki_awards(&[4, 4, 4, 1]), vec![2, 2, 2, 0]);
}

#[test]
fn test_pudding_awards() {
    assert_eq!(pudding_awards(&[3, 1, 1]), vec![6, -3, -3]);
    assert_eq!(pudding_awards(&[3, 3, 0, 1]), vec![3, 3, -6, 0]);
    assert_eq!(pudding_awards(&[2, 2, 2]), vec![0, 0, 0]);
}

#[test]
fn test_two_player_pudding_has_no_penalty() {
    assert_eq!(pudding_awards(&[2, 0]), vec![6, 0]);
}

#[test]
fn test_round_transition_and_final_scoring() {
    // Round 1: seat 0 gets Pudding, seat 1 Egg. Round 2: Maki(3) vs Maki(1).
    let deck = vec![Card::Maki(1), Card::Maki(3), Card::EggNigiri, Card::Pudding];
    let mut state = State::custom(2, 1, 2, deck).unwrap();

    play(&mut state, &[Action::Pick(Card::Pudding), Action::Pick(Card::EggNigiri)]);
    assert_eq!(state.round_counter(), 1);
    assert_eq!(state.turn_counter(), 1);
    assert_eq!(state.score(0), 0);
    assert_eq!(state.score(1), 1);
    assert_eq!(state.puddings(0), 1);
    assert_eq!(state.tableau(0), &Tableau::default());
    assert_eq!(state.hand(0), &[Card::Maki(3)]);
    assert_eq!(state.hand(1), &[Card::Maki(1)]);
    assert!(!state.is_terminal());

    play(&mut state, &[Action::Pick(Card::Maki(3)), Action::Pick(Card::Maki(1))]);
    assert!(state.is_terminal());
    // Maki 6 + pudding 6 for seat 0, egg 1 + maki 3 for seat 1
    assert_eq!(state.game_score(0), 12.0);
    assert_eq!(state.game_score(1), 4.0);
    assert!(state.legal_actions().is_empty());
}

#[test]
fn test_chopsticks_take_two_cards() {
    let deck = stacked_deck(
        &[Card::Chopsticks, Card::EggNigiri, Card::EggNigiri],
        &[Card::EggNigiri, Card::Wasabi, Card::SalmonNigiri],
        &[],
    );
    let mut state = State::custom(2, 3, 1, deck).unwrap();

    play(&mut state, &[Action::Pick(Card::Chopsticks), Action::Pick(Card::EggNigiri)]);
    assert_eq!(state.tableau(0).chopsticks, 1);
    assert_eq!(state.hand(0), &[Card::Wasabi, Card::SalmonNigiri]);
    assert_eq!(
        state.legal_actions(),
        vec![
            Action::Pick(Card::SalmonNigiri),
            Action::Pick(Card::Wasabi),
            Action::Chopsticks(Card::SalmonNigiri, Card::Wasabi),
        ]
    );

    let pair = Action::chopsticks(Card::Wasabi, Card::SalmonNigiri);
    play(&mut state, &[pair, Action::Pick(Card::EggNigiri)]);
    assert_eq!(state.tableau(0).nigiri_points, 6);
    assert_eq!(state.tableau(0).chopsticks, 0);
    // Chopsticks went back into the hand and were passed on
    assert_eq!(state.hand(1), &[Card::Chopsticks]);
    assert_eq!(state.hand(0), &[Card::EggNigiri]);

    play(&mut state, &[Action::Pick(Card::EggNigiri), Action::Pick(Card::Chopsticks)]);
    assert!(state.is_terminal());
    assert_eq!(state.score(0), 7);
    assert_eq!(state.score(1), 2);
}

#[test]
fn test_chopsticks_pairs_need_two_copies() {
    let deck = stacked_deck(
        &[Card::Chopsticks, Card::Tempura, Card::Tempura, Card::Dumpling],
        &[Card::Pudding; 4],
        &[],
    );
    let mut state = State::custom(2, 4, 1, deck).unwrap();
    play(&mut state, &[Action::Pick(Card::Chopsticks), Action::Pick(Card::Pudding)]);
    play(&mut state, &[Action::Pick(Card::Pudding)]);

    // Seat 1 now holds the tempura hand but has no chopsticks on the table
    assert_eq!(state.current_player(), 1);
    assert!(state
        .legal_actions()
        .iter()
        .all(|action| matches!(action, Action::Pick(_))));

    let mut state = State::custom(
        2,
        4,
        1,
        stacked_deck(
            &[Card::Chopsticks, Card::Pudding, Card::Pudding, Card::Pudding],
            &[Card::Tempura, Card::Tempura, Card::Dumpling, Card::Pudding],
            &[],
        ),
    )
    .unwrap();
    play(&mut state, &[Action::Pick(Card::Chopsticks), Action::Pick(Card::Pudding)]);

    let legal = state.legal_actions();
    assert!(legal.contains(&Action::Chopsticks(Card::Tempura, Card::Tempura)));
    assert!(legal.contains(&Action::Chopsticks(Card::Tempura, Card::Dumpling)));
    assert!(!legal.contains(&Action::Chopsticks(Card::Dumpling, Card::Dumpling)));
}

#[test]
fn test_random_game_runs_to_completion() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let mut state = State::new(4, &mut rng).unwrap();
    let mut rules = SushiGo;

    while !state.is_terminal() {
        let legal = rules.compute_available_actions(&state);
        assert!(!legal.is_empty());
        let action = legal[rng.gen_range(0..legal.len())];
        rules.next(&mut state, &action);
    }

    assert_eq!(state.round_counter(), ROUNDS);
    assert_eq!(state.turn_counter(), ROUNDS * hand_size(4) as u32);
    assert_eq!(state.deck().len(), 108 - 3 * 4 * 8);
    assert!(rules.compute_available_actions(&state).is_empty());
}

#[test]
fn test_determinize_preserves_observer_view() {
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let mut state = State::new(4, &mut rng).unwrap();
    let first = state.legal_actions()[0];
    state.apply(&first);
    let second = state.legal_actions()[0];
    state.apply(&second);

    let observer = 1;
    let sampled = UnseenCardShuffle.determinize(&state, observer, &mut rng);

    assert_eq!(sampled.info_key(observer), state.info_key(observer));
    assert_eq!(sampled.hand(observer), state.hand(observer));
    assert_eq!(sampled.pending(observer), state.pending(observer));
    for player in 0..4 {
        assert_eq!(sampled.hand(player).len(), state.hand(player).len());
        assert_eq!(sampled.pending(player).len(), state.pending(player).len());
        assert_eq!(sampled.tableau(player), state.tableau(player));
    }
    assert_eq!(sampled.deck().len(), state.deck().len());
}

#[test]
fn test_determinize_reshuffles_unseen_cards() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let state = State::new(4, &mut rng).unwrap();
    let observer = 0;

    let unseen = |s: &State| {
        let mut cards: Vec<Card> = (1..4)
            .flat_map(|p| s.hand(p).iter().chain(s.pending(p)).copied().collect::<Vec<_>>())
            .collect();
        cards.extend_from_slice(s.deck());
        card_counts(cards.iter())
    };

    let a = UnseenCardShuffle.determinize(&state, observer, &mut ChaCha20Rng::seed_from_u64(10));
    let b = UnseenCardShuffle.determinize(&state, observer, &mut ChaCha20Rng::seed_from_u64(11));

    assert_eq!(unseen(&a), unseen(&state));
    assert_eq!(unseen(&b), unseen(&state));
    assert_ne!(a.hand(1), b.hand(1));
}

#[test]
fn test_determinize_is_reproducible() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let state = State::new(3, &mut rng).unwrap();

    let a = UnseenCardShuffle.determinize(&state, 2, &mut ChaCha20Rng::seed_from_u64(99));
    let b = UnseenCardShuffle.determinize(&state, 2, &mut ChaCha20Rng::seed_from_u64(99));
    assert_eq!(a, b);
}

fn heuristic_state(rounds: u32) -> State {
    let seat0 = [
        Card::Tempura,
        Card::Sashimi,
        Card::Dumpling,
        Card::Maki(3),
        Card::SquidNigiri,
        Card::Wasabi,
        Card::Pudding,
        Card::EggNigiri,
    ];
    let filler = vec![Card::Dumpling; 16 * (rounds as usize - 1)];
    State::custom(2, 8, rounds, stacked_deck(&seat0, &[Card::Tempura; 8], &filler)).unwrap()
}

#[test]
fn test_heuristic_single_pick_values() {
    let state = heuristic_state(3);
    let heuristic = DraftHeuristic::default();
    let value = |card| heuristic.evaluate(&state, 0, &Action::Pick(card));

    assert!((value(Card::Tempura) - 1.5).abs() < 1e-9);
    assert!((value(Card::Sashimi) - 3.5).abs() < 1e-9);
    assert!((value(Card::Dumpling) - 1.0).abs() < 1e-9);
    assert!((value(Card::Maki(3)) - 3.0).abs() < 1e-9);
    assert!((value(Card::SquidNigiri) - 3.0).abs() < 1e-9);
    assert!((value(Card::Wasabi) - 2.0).abs() < 1e-9);
    assert!((value(Card::Pudding) - 0.6).abs() < 1e-9);
    assert!((value(Card::EggNigiri) - 1.0).abs() < 1e-9);
}

#[test]
fn test_heuristic_values_pudding_in_last_round() {
    let state = heuristic_state(1);
    let heuristic = DraftHeuristic::default();
    let value = heuristic.evaluate(&state, 0, &Action::Pick(Card::Pudding));
    assert!((value - 1.4).abs() < 1e-9);
}

#[test]
fn test_heuristic_rewards_completed_pair() {
    let deck = stacked_deck(
        &[Card::Tempura, Card::Pudding, Card::Pudding],
        &[Card::Tempura, Card::Pudding, Card::Pudding],
        &[],
    );
    let mut state = State::custom(2, 3, 1, deck).unwrap();
    play(&mut state, &[Action::Pick(Card::Tempura), Action::Pick(Card::Pudding)]);

    // Seat 0 holds one tempura and now sees the other
    let heuristic = DraftHeuristic::default();
    let pair = heuristic.evaluate(&state, 0, &Action::Pick(Card::Tempura));
    let pudding = heuristic.evaluate(&state, 0, &Action::Pick(Card::Pudding));
    assert!(pair > pudding);
    assert!((pair - 5.0).abs() < 1e-9);
}

#[test]
fn test_heuristic_ignores_hidden_cards() {
    let mut rng = ChaCha20Rng::seed_from_u64(21);
    let state = State::new(4, &mut rng).unwrap();
    let heuristic = DraftHeuristic::default();
    let sampled = UnseenCardShuffle.determinize(&state, 0, &mut rng);

    for action in state.legal_actions() {
        assert_eq!(
            heuristic.evaluate(&state, 0, &action),
            heuristic.evaluate(&sampled, 0, &action)
        );
    }
}
