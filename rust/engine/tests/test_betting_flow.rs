mod support;

use holdem_engine::errors::GameError;
use holdem_engine::game::{Game, HandStatus, Street};
use holdem_engine::player::{ActionKind as A, Player};
use holdem_engine::rules::ValidatedAction;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use support::{cards, stacked_deck};

fn three_handed() -> Game {
    let mut game = Game::new(["ann", "bob", "cat"], 10).unwrap();
    game.start_hand(&mut ChaCha20Rng::seed_from_u64(21)).unwrap();
    game
}

#[test]
fn out_of_turn_is_rejected() {
    let mut game = three_handed();
    let err = game.take_action(0, A::Fold).unwrap_err();
    assert_eq!(
        err,
        GameError::OutOfTurn {
            expected: 2,
            actual: 0
        }
    );
    assert!(!game.players()[0].is_folded());
}

#[test]
fn actions_need_a_hand_in_progress() {
    let mut game = Game::new(["ann", "bob"], 10).unwrap();
    assert_eq!(game.take_action(0, A::Fold).unwrap_err(), GameError::NoHandInProgress);
}

#[test]
fn too_small_raise_leaves_state_unchanged() {
    let mut game = three_handed();
    let before = game.snapshot();
    let err = game.take_action(2, A::Raise(30)).unwrap_err();
    assert_eq!(
        err,
        GameError::RaiseTooSmall {
            amount: 30,
            minimum: 40
        }
    );
    assert_eq!(game.snapshot(), before);
}

#[test]
fn take_action_does_not_move_position() {
    let mut game = three_handed();
    let applied = game.take_action(2, A::CheckCall).unwrap();
    assert_eq!(applied, ValidatedAction::Call(20));
    assert_eq!(game.position(), Some(2));
    assert_eq!(game.pot(), 50);

    assert_eq!(game.advance_position(), Some(0));
    assert_eq!(game.position(), Some(0));
}

#[test]
fn short_call_goes_all_in() {
    let players = vec![Player::new("ann", 1000), Player::new("bob", 1000), Player::new("cat", 15)];
    let mut game = Game::from_players(players, 10).unwrap();
    game.start_hand(&mut ChaCha20Rng::seed_from_u64(1)).unwrap();

    let outcome = game.apply_action(2, A::CheckCall).unwrap();
    assert_eq!(outcome.applied, ValidatedAction::AllIn(15));
    let cat = &game.players()[2];
    assert!(cat.is_all_in());
    assert_eq!(cat.cash(), 0);
    assert_eq!(cat.bet_this_round(), 15);
    // the bet did not go up
    assert_eq!(game.current_bet(), 20);
}

#[test]
fn big_blind_gets_the_option_preflop() {
    let mut game = three_handed();
    game.apply_action(2, A::CheckCall).unwrap();
    let outcome = game.apply_action(0, A::CheckCall).unwrap();
    assert_eq!(outcome.progress.status, HandStatus::AwaitingAction { seat: 1 });
    assert!(!game.is_street_complete());

    let outcome = game.apply_action(1, A::CheckCall).unwrap();
    assert_eq!(outcome.applied, ValidatedAction::Check);
    assert_eq!(outcome.progress.streets_dealt, vec![Street::Flop]);
    assert_eq!(game.round(), Street::Flop);
    assert_eq!(game.community().len(), 3);
    assert_eq!(game.current_bet(), 0);
    assert!(game.players().iter().all(|p| p.bet_this_round() == 0));
    // small blind opens the flop
    assert_eq!(outcome.progress.status, HandStatus::AwaitingAction { seat: 0 });
}

#[test]
fn raise_reopens_action_for_earlier_players() {
    let mut game = three_handed();
    game.apply_action(2, A::CheckCall).unwrap();
    game.apply_action(0, A::CheckCall).unwrap();
    let outcome = game.apply_action(1, A::Raise(60)).unwrap();
    assert_eq!(outcome.applied, ValidatedAction::Raise { to: 60, cost: 40 });
    assert_eq!(game.current_bet(), 60);
    assert_eq!(outcome.progress.status, HandStatus::AwaitingAction { seat: 2 });

    game.apply_action(2, A::CheckCall).unwrap();
    let outcome = game.apply_action(0, A::Fold).unwrap();
    assert_eq!(outcome.progress.streets_dealt, vec![Street::Flop]);
    assert_eq!(game.pot(), 20 + 60 + 60);
}

#[test]
fn streets_burn_one_card_before_dealing() {
    let deck = stacked_deck(&["AS KS", "2C 7D"], "QS JS TS 3H 4H");
    let mut game = Game::new(["ann", "bob"], 10).unwrap();
    game.start_hand_with_deck(deck).unwrap();
    // heads-up: small blind (ann) acts first preflop
    game.apply_action(0, A::CheckCall).unwrap();
    game.apply_action(1, A::CheckCall).unwrap();
    assert_eq!(game.community(), cards("QS JS TS").as_slice());
    assert_eq!(game.deck_remaining(), 52 - 4 - 4);

    // big blind acts first after the flop
    assert_eq!(game.position(), Some(1));
    game.apply_action(1, A::CheckCall).unwrap();
    game.apply_action(0, A::CheckCall).unwrap();
    assert_eq!(game.community(), cards("QS JS TS 3H").as_slice());
    assert_eq!(game.deck_remaining(), 52 - 4 - 6);
}

#[test]
fn all_in_and_call_runs_out_the_board() {
    let deck = stacked_deck(&["AS AD", "KC KD"], "2C 7H 9S 3D 4C");
    let mut game = Game::new(["ann", "bob"], 10).unwrap();
    game.start_hand_with_deck(deck).unwrap();

    game.apply_action(0, A::AllIn).unwrap();
    let outcome = game.apply_action(1, A::CheckCall).unwrap();
    assert_eq!(
        outcome.progress.streets_dealt,
        vec![Street::Flop, Street::Turn, Street::River]
    );
    let HandStatus::Complete(result) = outcome.progress.status else {
        panic!("hand should be over");
    };
    assert!(result.showdown);
    assert_eq!(result.winners, ["ann"]);
    assert_eq!(game.players()[0].cash(), 2000);
    assert_eq!(game.players()[1].cash(), 0);
    assert!(!game.is_hand_in_progress());
}

#[test]
fn last_player_standing_wins_without_showdown() {
    let mut game = three_handed();
    game.apply_action(2, A::Raise(100)).unwrap();
    game.apply_action(0, A::Fold).unwrap();
    let outcome = game.apply_action(1, A::Fold).unwrap();
    let HandStatus::Complete(result) = outcome.progress.status else {
        panic!("hand should be over");
    };
    assert!(!result.showdown);
    assert!(result.shown.is_empty());
    assert_eq!(result.pot, 130);
    assert_eq!(game.players()[2].cash(), 1030);
    assert!(game.community().is_empty());
}

#[test]
fn abort_refunds_every_contribution() {
    let mut game = three_handed();
    game.apply_action(2, A::Raise(80)).unwrap();
    game.apply_action(0, A::CheckCall).unwrap();
    assert_eq!(game.abort_hand(), 20 + 80 + 80);
    assert!(game.players().iter().all(|p| p.cash() == 1000));
    assert_eq!(game.pot(), 0);
    assert!(game.position().is_none());
}
