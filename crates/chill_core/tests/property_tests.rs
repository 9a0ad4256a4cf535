//! Property-based tests for chill_core.
//!
//! Drives `MoodState` with arbitrary action sequences and mutation amounts
//! and checks the bounds and streak invariants after every step.

use chill_core::{ActionId, MoodState};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_action() -> impl Strategy<Value = ActionId> {
    (0usize..ActionId::ALL.len()).prop_map(|i| ActionId::ALL[i])
}

#[derive(Debug, Clone)]
enum Op {
    Record(ActionId),
    Decrease(u32),
    Increase(u32),
    Force(u32),
    Raise,
    Lower,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_action().prop_map(Op::Record),
        (0u32..=200).prop_map(Op::Decrease),
        (0u32..=200).prop_map(Op::Increase),
        (0u32..=300).prop_map(Op::Force),
        Just(Op::Raise),
        Just(Op::Lower),
    ]
}

proptest! {
    /// Stress stays in [0, 100] and alert never exceeds its cap.
    #[test]
    fn bounds_hold_after_every_mutation(
        initial in 0u32..=100,
        ops in prop::collection::vec(arb_op(), 0..200),
    ) {
        let mut mood = MoodState::new(initial, 5, 10);
        for op in ops {
            match op {
                Op::Record(a) => mood.record_action(a),
                Op::Decrease(n) => mood.decrease_stress(n),
                Op::Increase(n) => mood.increase_stress(n),
                Op::Force(n) => mood.force_stress(n),
                Op::Raise => { mood.raise_alert(); }
                Op::Lower => { mood.lower_alert(); }
            }
            prop_assert!(mood.stress() <= 100);
            prop_assert!(mood.alert_level() <= 5);
            prop_assert!(mood.history().len() <= 10);
        }
    }

    /// Only the most recent action ever has a non-zero streak, and that
    /// streak equals the length of the trailing run in history.
    #[test]
    fn streaks_mutually_exclusive(actions in prop::collection::vec(arb_action(), 1..60)) {
        let mut mood = MoodState::default();
        for (i, &a) in actions.iter().enumerate() {
            mood.record_action(a);

            let run = actions[..=i].iter().rev().take_while(|&&x| x == a).count() as u32;
            prop_assert_eq!(mood.streak(a), run);
            for other in ActionId::ALL.iter().filter(|&&o| o != a) {
                prop_assert_eq!(mood.streak(*other), 0);
            }
        }
    }

    /// History always equals the last ten recorded actions, in order.
    #[test]
    fn history_is_fifo_tail(actions in prop::collection::vec(arb_action(), 0..40)) {
        let mut mood = MoodState::default();
        for &a in &actions {
            mood.record_action(a);
        }
        let skip = actions.len().saturating_sub(10);
        let expected: Vec<ActionId> = actions[skip..].to_vec();
        let got: Vec<ActionId> = mood.history().iter().copied().collect();
        prop_assert_eq!(got, expected);
    }
}
