use holdem_engine::config::TableConfig;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Game, HandStatus, Street, MAX_PLAYERS};
use holdem_engine::player::{ActionKind as A, Player, STARTING_STACK};
use holdem_engine::pot::RemainderPolicy;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn new_seats_players_in_order_with_starting_stack() {
    let game = Game::new(["ann", "bob", "cat"], 10).unwrap();
    let names: Vec<&str> = game.players().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["ann", "bob", "cat"]);
    for p in game.players() {
        assert_eq!(p.cash(), STARTING_STACK);
        assert!(p.hole_cards().is_none());
        assert!(!p.is_folded());
        assert!(!p.is_all_in());
        assert_eq!(p.bet_this_round(), 0);
    }
    assert_eq!(game.pot(), 0);
    assert_eq!(game.big_blind(), 20);
    assert_eq!(game.total_chips(), 3 * u64::from(STARTING_STACK));
    assert!(game.position().is_none());
}

#[test]
fn rejects_bad_tables() {
    assert_eq!(
        Game::new(["solo"], 10).unwrap_err(),
        GameError::NotEnoughPlayers {
            minimum: 2,
            actual: 1
        }
    );
    assert_eq!(
        Game::new(["ann", "ann"], 10).unwrap_err(),
        GameError::DuplicatePlayer("ann".into())
    );
    assert_eq!(Game::new(["ann", "bob"], 0).unwrap_err(), GameError::InvalidBlind);
    assert_eq!(
        Game::with_stack(["ann", "bob"], 10, 0).unwrap_err(),
        GameError::InvalidStack("ann".into())
    );
    let crowd: Vec<String> = (0..=MAX_PLAYERS).map(|i| format!("p{}", i)).collect();
    assert!(matches!(
        Game::new(crowd, 10),
        Err(GameError::TooManyPlayers { .. })
    ));
}

#[test]
fn full_table_can_be_dealt() {
    let names: Vec<String> = (0..MAX_PLAYERS).map(|i| format!("p{}", i)).collect();
    let mut game = Game::new(names, 5).unwrap();
    game.start_hand(&mut ChaCha20Rng::seed_from_u64(5)).unwrap();
    assert_eq!(game.deck_remaining(), 52 - 2 * MAX_PLAYERS);
}

#[test]
fn from_config_applies_stack_blind_and_policy() {
    let cfg = TableConfig {
        starting_stack: 500,
        small_blind: 25,
        remainder_policy: RemainderPolicy::House,
        ..TableConfig::default()
    };
    let game = Game::from_config(["a", "b"], &cfg).unwrap();
    assert_eq!(game.players()[1].cash(), 500);
    assert_eq!(game.small_blind(), 25);
    assert_eq!(game.remainder_policy(), RemainderPolicy::House);
}

#[test]
fn first_hand_posts_blinds_and_deals() {
    let mut game = Game::new(["ann", "bob", "cat", "dan"], 10).unwrap();
    let progress = game.start_hand(&mut ChaCha20Rng::seed_from_u64(11)).unwrap();

    assert_eq!(game.hand_number(), 1);
    assert_eq!(game.blind_index(), 0);
    assert_eq!(game.players()[0].bet_this_round(), 10);
    assert_eq!(game.players()[1].bet_this_round(), 20);
    assert_eq!(game.current_bet(), 20);
    assert_eq!(game.pot(), 30);
    assert_eq!(game.round(), Street::Preflop);
    assert!(game.community().is_empty());
    assert!(game.players().iter().all(|p| p.hole_cards().is_some()));
    assert_eq!(game.deck_remaining(), 52 - 8);
    // first to act sits after the big blind
    assert_eq!(progress.status, HandStatus::AwaitingAction { seat: 2 });
    assert_eq!(game.position(), Some(2));
}

#[test]
fn blinds_rotate_every_hand() {
    let mut game = Game::new(["ann", "bob", "cat"], 10).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    for expected_sb in [0, 1, 2, 0] {
        game.start_hand(&mut rng).unwrap();
        assert_eq!(game.blind_index(), expected_sb);
        game.abort_hand();
    }
}

#[test]
fn cannot_start_twice_or_change_blinds_mid_hand() {
    let mut game = Game::new(["ann", "bob"], 10).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    game.start_hand(&mut rng).unwrap();
    assert_eq!(game.start_hand(&mut rng).unwrap_err(), GameError::HandInProgress);
    assert_eq!(game.set_small_blind(20).unwrap_err(), GameError::HandInProgress);
    assert!(game.eliminate_below(20).is_err());
}

#[test]
fn same_seed_deals_same_hole_cards() {
    let deal = |seed| {
        let mut game = Game::new(["ann", "bob", "cat"], 10).unwrap();
        game.start_hand(&mut ChaCha20Rng::seed_from_u64(seed)).unwrap();
        game.players().iter().map(|p| p.hole_cards()).collect::<Vec<_>>()
    };
    assert_eq!(deal(9), deal(9));
    assert_ne!(deal(9), deal(10));
}

#[test]
fn elimination_removes_short_stacks_and_keeps_rotation() {
    let players = vec![
        Player::new("ann", 1000),
        Player::new("bob", 15),
        Player::new("cat", 1000),
        Player::new("dan", 5),
    ];
    let mut game = Game::from_players(players, 10).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    // hand 1: ann small blind; hand 2 would put bob there
    game.start_hand(&mut rng).unwrap();
    game.abort_hand();

    let removed = game.eliminate_below(game.big_blind()).unwrap();
    let removed: Vec<&str> = removed.iter().map(|p| p.name()).collect();
    assert_eq!(removed, ["bob", "dan"]);
    assert_eq!(game.retired_chips(), 20);
    assert_eq!(game.chips_accounted(), game.total_chips());

    // bob is gone, so cat is next in line for the small blind
    game.start_hand(&mut rng).unwrap();
    assert_eq!(game.players()[game.blind_index()].name(), "cat");
}

#[test]
fn elimination_keeps_richest_when_everyone_is_short() {
    let players = vec![Player::new("ann", 5), Player::new("bob", 9), Player::new("cat", 9)];
    let mut game = Game::from_players(players, 10).unwrap();
    let removed = game.eliminate_below(20).unwrap();
    assert_eq!(removed.len(), 2);
    assert_eq!(game.players().len(), 1);
    assert_eq!(game.players()[0].name(), "bob");
}

#[test]
fn snapshot_redaction_hides_other_hole_cards() {
    let mut game = Game::new(["ann", "bob"], 10).unwrap();
    game.start_hand(&mut ChaCha20Rng::seed_from_u64(8)).unwrap();
    let full = game.snapshot();
    let view = full.redacted_for("bob");
    assert!(view.players[0].hole_cards.is_none());
    assert_eq!(view.players[1].hole_cards, full.players[1].hole_cards);
    assert_eq!(view.pot, full.pot);
}

/// Everyone shoves until the hand is over.
fn shove_out(game: &mut Game, rng: &mut ChaCha20Rng) {
    let mut progress = game.start_hand(rng).unwrap();
    for _ in 0..50 {
        match progress.status {
            HandStatus::AwaitingAction { seat } => {
                progress = game.apply_action(seat, A::AllIn).unwrap().progress;
            }
            HandStatus::Complete(_) => return,
        }
    }
    panic!("shove-out hand did not finish");
}

#[test]
fn busted_seat_blocks_the_next_hand_until_eliminated() {
    let (mut game, mut rng) = (0..64)
        .find_map(|seed| {
            let mut game = Game::with_stack(["ann", "bob", "cat"], 10, 100).unwrap();
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            shove_out(&mut game, &mut rng);
            game.players().iter().any(|p| p.cash() == 0).then_some((game, rng))
        })
        .expect("some seed busts a player");
    let broke = game
        .players()
        .iter()
        .find(|p| p.cash() == 0)
        .map(|p| p.name().to_string())
        .unwrap();
    let hand_number = game.hand_number();

    assert_eq!(game.start_hand(&mut rng).unwrap_err(), GameError::InvalidStack(broke));
    assert!(!game.is_hand_in_progress());
    assert_eq!(game.hand_number(), hand_number);
    assert_eq!(game.chips_accounted(), game.total_chips());

    game.eliminate_below(game.big_blind()).unwrap();
    let mut progress = game.start_hand(&mut rng).unwrap();
    for _ in 0..50 {
        match progress.status {
            HandStatus::AwaitingAction { seat } => {
                assert!(game.players()[seat].cash() > 0);
                progress = game.apply_action(seat, A::CheckCall).unwrap().progress;
            }
            HandStatus::Complete(_) => {
                assert_eq!(game.chips_accounted(), game.total_chips());
                return;
            }
        }
    }
    panic!("hand after elimination did not finish");
}

#[test]
fn blind_that_empties_a_stack_marks_it_all_in() {
    let players = vec![Player::new("ann", 10), Player::new("bob", 1000)];
    let mut game = Game::from_players(players, 10).unwrap();
    game.start_hand(&mut ChaCha20Rng::seed_from_u64(1)).unwrap();
    let ann = game.player(0).unwrap();
    assert_eq!(ann.cash(), 0);
    assert!(ann.is_all_in());
    assert!(!ann.can_act());
}

#[test]
fn tables_whose_chips_overflow_a_pot_are_rejected() {
    let err = Game::with_stack(["ann", "bob", "cat"], 10, 2_000_000_000).unwrap_err();
    assert_eq!(
        err,
        GameError::TooManyChips {
            total: 6_000_000_000,
            maximum: u32::MAX
        }
    );

    let mut game = Game::with_stack(["ann", "bob"], 10, 2_000_000_000).unwrap();
    shove_out(&mut game, &mut ChaCha20Rng::seed_from_u64(3));
    assert_eq!(game.chips_accounted(), 4_000_000_000);
}
