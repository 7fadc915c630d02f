use hanabi_core::belief::{PossibilitySet, close_exhausted};
use hanabi_core::game::action::Action;
use hanabi_core::game::rules::Rules;
use hanabi_core::game::state::{GameError, GameState};
use hanabi_core::model::card::Card;
use hanabi_core::model::deck::{CardSlot, Deck};
use hanabi_core::model::hint::{Clue, Hint};
use hanabi_core::model::number::Number;
use hanabi_core::model::player::PlayerId;
use hanabi_core::model::suit::Suit;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

fn random_action(state: &GameState, rng: &mut StdRng) -> Action {
    let player = state.current_player();
    let rules = state.rules();
    let size = state.hand(player).map(|hand| hand.len()).unwrap_or(0);
    let roll = rng.gen_range(0..3);
    if roll == 0 && state.hints() > 0 {
        let others: Vec<PlayerId> = player
            .others(rules.players())
            .filter(|p| state.hand(*p).is_some_and(|hand| !hand.is_empty()))
            .collect();
        if !others.is_empty() {
            let target = others[rng.gen_range(0..others.len())];
            let cards = state.hand(target).map(|hand| hand.cards()).unwrap_or_default();
            let pick = cards[rng.gen_range(0..cards.len())];
            let clue = if rng.gen_bool(0.5) {
                Clue::Suit(pick.suit)
            } else {
                Clue::Number(pick.number)
            };
            return Action::Hint(Hint::new(target, clue, &cards).unwrap());
        }
    }
    let position = rng.gen_range(0..size);
    if roll == 1 {
        Action::Play { position }
    } else {
        Action::Discard { position }
    }
}

fn assert_sound(state: &GameState) {
    for player in PlayerId::all(state.rules().players()) {
        for held in state.hand(player).unwrap().iter() {
            assert!(
                held.knowledge().possibilities().contains(held.card()),
                "{player} lost track of {}",
                held.card()
            );
        }
    }
}

fn assert_conserved(state: &GameState) {
    for card in Card::all() {
        assert_eq!(state.location_counts(card).total(), card.copies(), "{card}");
    }
}

/// Possibility set of every held card at the table, keyed by physical card.
fn knowledge_by_slot(state: &GameState) -> HashMap<CardSlot, PossibilitySet> {
    PlayerId::all(state.rules().players())
        .flat_map(|player| state.hand(player).unwrap().iter())
        .map(|held| (held.slot(), held.knowledge().possibilities()))
        .collect()
}

/// Asserts no surviving card gained a possibility. Returns how many narrowed.
fn assert_narrowed(before: &HashMap<CardSlot, PossibilitySet>, state: &GameState) -> usize {
    let mut narrowed = 0;
    for (slot, after) in knowledge_by_slot(state) {
        let Some(old) = before.get(&slot) else {
            continue;
        };
        assert!(
            after.iter().all(|card| old.contains(card)),
            "possibility set grew from {} to {}",
            old.len(),
            after.len()
        );
        if after.len() < old.len() {
            narrowed += 1;
        }
    }
    narrowed
}

/// Plays random legal moves to the end. Returns the final state and the
/// number of observed narrowing steps.
fn run_random_game(players: usize, seed: u64) -> (GameState, usize) {
    let rules = Rules::new(players).unwrap();
    let mut state = GameState::with_seed(rules, seed).unwrap();
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
    let mut narrowed = 0;
    while !state.is_done() {
        let player = state.current_player();
        let before = knowledge_by_slot(&state);
        {
            let mut view = state.seat_view(player).unwrap();
            close_exhausted(&mut view.own, &view.others, &view.board).unwrap();
        }
        let action = random_action(&state, &mut rng);
        state.apply(player, action).unwrap();
        narrowed += assert_narrowed(&before, &state);
        assert_sound(&state);
        assert_conserved(&state);
    }
    (state, narrowed)
}

#[test]
fn random_games_stay_sound_and_conserve_copies() {
    let mut narrowed = 0;
    for players in 2..=5 {
        for seed in 0..8u64 {
            let (state, steps) = run_random_game(players, seed * 31 + players as u64);
            assert!(state.is_done());
            assert!(state.turns() > 0);
            narrowed += steps;
        }
    }
    assert!(narrowed > 0, "no hint or elimination ever narrowed a card");
}

#[test]
fn exhausted_cards_are_closed_from_own_knowledge() {
    let b1 = Card::new(Suit::Blue, Number::One);
    let filler = Card::new(Suit::Red, Number::Four);
    // Dealt round-robin, so player 1 holds all three blue ones.
    let top = [
        filler,
        b1,
        Card::new(Suit::Green, Number::Two),
        b1,
        Card::new(Suit::Yellow, Number::Three),
        b1,
    ];
    let rules = Rules::new(2).unwrap();
    let mut state = GameState::from_deck(rules, Deck::stacked(&top).unwrap()).unwrap();
    let p1 = PlayerId::new(1);
    for _ in 0..3 {
        state.discard(p1, 0).unwrap();
    }
    assert_eq!(state.board().discard_count(b1), 3);

    let mut view = state.seat_view(PlayerId::new(0)).unwrap();
    assert!(view.own.iter().all(|k| k.possibilities().contains(b1)));
    close_exhausted(&mut view.own, &view.others, &view.board).unwrap();
    assert!(view.own.iter().all(|k| !k.possibilities().contains(b1)));
}

#[test]
fn failed_play_spends_a_fail_token() {
    let w4 = Card::new(Suit::White, Number::Four);
    let rules = Rules::new(2).unwrap();
    let mut state = GameState::from_deck(rules, Deck::stacked(&[w4]).unwrap()).unwrap();
    assert_eq!(state.fails(), 3);
    assert!(!state.board().allow_play(w4));

    let outcome = state.apply(PlayerId::new(0), Action::Play { position: 0 }).unwrap();
    assert!(matches!(
        outcome,
        hanabi_core::game::action::ActionOutcome::Played(play) if !play.success
    ));
    assert_eq!(state.fails(), 2);
    assert_eq!(state.location_counts(w4).discarded, 1);
}

#[test]
fn discard_never_pushes_hints_past_cap() {
    let rules = Rules::new(3).unwrap().with_hint_tokens(8).unwrap();
    let mut state = GameState::with_seed(rules, 5).unwrap();
    assert_eq!(state.hints(), 8);
    state.apply(PlayerId::new(0), Action::Discard { position: 2 }).unwrap();
    assert_eq!(state.hints(), 8);
}

#[test]
fn empty_deck_draw_costs_exactly_one_final_turn() {
    let rules = Rules::new(2).unwrap();
    let mut state = GameState::with_seed(rules, 11).unwrap();
    let mut seat = 0u8;
    while state.deck().depth() > 0 {
        state.discard(PlayerId::new(seat), 0).unwrap();
        seat ^= 1;
    }
    assert_eq!(state.final_turns(), 2);
    assert!(!state.is_done());

    assert_eq!(state.draw(PlayerId::new(0)).unwrap(), None);
    assert_eq!(state.final_turns(), 1);

    state.discard(PlayerId::new(1), 0).unwrap();
    assert_eq!(state.final_turns(), 0);
    assert!(state.is_done());
    assert_eq!(
        state.apply(state.current_player(), Action::Discard { position: 0 }),
        Err(GameError::GameOver)
    );
}

#[test]
fn both_dimension_hints_are_rejected() {
    assert!(Clue::from_parts(Some(Suit::Red), Some(Number::One)).is_err());
    assert!(Clue::from_parts(None, None).is_err());
    let hand = [Card::new(Suit::Red, Number::Two)];
    assert!(Hint::new(PlayerId::new(1), Clue::Suit(Suit::Blue), &hand).is_err());
}
