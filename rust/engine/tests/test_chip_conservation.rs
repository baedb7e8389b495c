use holdem_engine::game::Game;
use holdem_engine::player::ActionKind;
use holdem_engine::pot::RemainderPolicy;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn to_kind(choice: u8, amount: u32) -> ActionKind {
    match choice % 4 {
        0 => ActionKind::Fold,
        1 => ActionKind::CheckCall,
        2 => ActionKind::Raise(amount),
        _ => ActionKind::AllIn,
    }
}

fn assert_invariants(game: &Game) -> Result<(), TestCaseError> {
    prop_assert_eq!(game.chips_accounted(), game.total_chips());
    if game.is_hand_in_progress() {
        for p in game.players() {
            if p.is_live() {
                prop_assert!(p.bet_this_round() <= game.current_bet());
            }
            if p.can_act() {
                prop_assert!(p.cash() > 0, "{} can act with no chips", p.name());
            }
        }
        let committed: u32 = game.players().iter().map(|p| p.committed()).sum();
        prop_assert_eq!(committed, game.pot());
    } else {
        prop_assert_eq!(game.pot(), 0);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn chips_are_conserved_under_random_play(
        seats in 2usize..=6,
        seed in any::<u64>(),
        house in any::<bool>(),
        script in prop::collection::vec((any::<u8>(), 0u32..1500), 1..400),
    ) {
        let names: Vec<String> = (0..seats).map(|i| format!("p{}", i)).collect();
        let mut game = Game::with_stack(names, 5, 300).unwrap();
        if house {
            game.set_remainder_policy(RemainderPolicy::House);
        }
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        for (choice, amount) in script {
            if !game.is_hand_in_progress() {
                game.eliminate_below(game.big_blind()).unwrap();
                if game.players().len() < 2 {
                    break;
                }
                game.start_hand(&mut rng).unwrap();
                assert_invariants(&game)?;
                continue;
            }
            let seat = game.position().unwrap();
            if game.apply_action(seat, to_kind(choice, amount)).is_err() {
                game.apply_action(seat, ActionKind::CheckCall).unwrap();
            }
            assert_invariants(&game)?;
        }
    }
}
