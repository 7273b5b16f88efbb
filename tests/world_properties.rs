//! Property tests for the grid world: encoding, dynamics and rewards.
//!
//! Invariants covered:
//! - Encoding is a bijection between on-grid states and `[0, N)`.
//! - Off-grid states and out-of-range indices are rejected.
//! - Every transition stays on the grid and moves each coordinate by at most one.
//! - Rewards depend only on the relative offset of mouse and cat.

use catmouse::world::{
    Action, Delta, GridDims, State, StateCodec, TransitionModel, chebyshev_reward,
};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

fn dims_strategy() -> impl Strategy<Value = GridDims> {
    (1usize..=12, 1usize..=12).prop_map(|(w, h)| GridDims::new(w, h).unwrap())
}

fn dims_and_state() -> impl Strategy<Value = (GridDims, State)> {
    dims_strategy().prop_flat_map(|dims| {
        let (w, h) = (dims.width(), dims.height());
        (0..w, 0..h, 0..w, 0..h)
            .prop_map(move |(mx, my, cx, cy)| (dims, State::new(mx, my, cx, cy)))
    })
}

fn delta_strategy() -> impl Strategy<Value = Delta> {
    (-1i8..=1, -1i8..=1).prop_map(|(dx, dy)| Delta::new(dx, dy).unwrap())
}

proptest! {
    #[test]
    fn prop_encode_decode_round_trip((dims, state) in dims_and_state()) {
        let codec = StateCodec::new(dims).unwrap();
        let index = codec.encode(&state).unwrap();
        prop_assert!(index < codec.num_states());
        prop_assert_eq!(codec.decode(index).unwrap(), state);
    }

    #[test]
    fn prop_indices_cover_range(dims in dims_strategy(), seed in any::<u64>()) {
        let codec = StateCodec::new(dims).unwrap();
        let n = codec.num_states();
        prop_assert_eq!(n, dims.cells() * dims.cells());

        let index = (seed % n as u64) as usize;
        let state = codec.decode(index).unwrap();
        prop_assert_eq!(codec.encode(&state).unwrap(), index);

        prop_assert!(codec.decode(n).is_err());
        prop_assert!(codec.decode(n + index).is_err());
    }

    #[test]
    fn prop_off_grid_state_rejected((dims, state) in dims_and_state(), axis in 0usize..4) {
        let codec = StateCodec::new(dims).unwrap();
        let mut axes = state.axes();
        axes[axis] = if axis % 2 == 0 { dims.width() } else { dims.height() };
        prop_assert!(codec.encode(&State::from_axes(axes)).is_err());
    }

    #[test]
    fn prop_transition_stays_on_grid(
        (dims, state) in dims_and_state(),
        mouse in delta_strategy(),
        cat in prop::option::of(delta_strategy()),
        seed in any::<u64>(),
    ) {
        let model = TransitionModel::new(dims);
        let mut rng = StdRng::seed_from_u64(seed);
        let next = model.apply(state, mouse, cat, &mut rng);

        prop_assert!(next.check_bounds(dims).is_ok());
        for (before, after) in state.axes().into_iter().zip(next.axes()) {
            prop_assert!(before.abs_diff(after) <= 1);
        }

        // The mouse's move is deterministic
        let expected_x = state.mouse.x as i64 + i64::from(mouse.dx);
        if (0..dims.width() as i64).contains(&expected_x) {
            prop_assert_eq!(next.mouse.x as i64, expected_x);
        } else {
            prop_assert_eq!(next.mouse.x, state.mouse.x);
        }
    }

    #[test]
    fn prop_action_delta_round_trip(index in 0usize..9) {
        let action = Action::new(index).unwrap();
        prop_assert_eq!(Action::from_delta(action.delta()), action);
    }

    #[test]
    fn prop_reward_is_translation_invariant(
        (dims, state) in dims_and_state(),
        shift_x in 0usize..6,
        shift_y in 0usize..6,
    ) {
        let shifted = State::new(
            state.mouse.x + shift_x,
            state.mouse.y + shift_y,
            state.cat.x + shift_x,
            state.cat.y + shift_y,
        );
        prop_assert_eq!(chebyshev_reward(&state), chebyshev_reward(&shifted));

        let reward = chebyshev_reward(&state);
        prop_assert!(reward >= 0.0);
        prop_assert!(reward <= (dims.width().max(dims.height()) - 1) as f64);
        prop_assert_eq!(reward == 0.0, state.mouse == state.cat);
    }
}

#[test]
fn test_corner_clamping() {
    let dims = GridDims::new(4, 3).unwrap();
    let model = TransitionModel::new(dims);
    let mut rng = StdRng::seed_from_u64(0);

    let down_left = Delta::new(-1, -1).unwrap();
    let origin = State::new(0, 0, 0, 0);
    assert_eq!(
        model.apply(origin, down_left, Some(down_left), &mut rng),
        origin
    );

    let up_right = Delta::new(1, 1).unwrap();
    let far = State::new(3, 2, 3, 2);
    assert_eq!(model.apply(far, up_right, Some(up_right), &mut rng), far);
}
