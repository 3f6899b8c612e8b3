//! End-to-end reducer scenarios driven by the built-in presets.

use ludic_engine::{
    create_initial_state, preset, reduce, GameConfig, GameEvent, GameState, GameStatus,
    GravityDirection, OverflowPolicy, PlacementMode, Player, Position,
};

fn rules(id: &str) -> GameConfig {
    GameConfig::from(&preset(id).expect("known preset").config)
}

fn place(row: i32, col: i32) -> GameEvent {
    GameEvent::Place {
        position: Position::new(row, col),
    }
}

fn drop_into(col: i32) -> GameEvent {
    GameEvent::ActivateColumn { col }
}

fn play(config: &GameConfig, events: &[GameEvent]) -> GameState {
    events
        .iter()
        .fold(create_initial_state(config), |state, event| {
            reduce(state, event, config)
        })
}

#[test]
fn test_tic_tac_toe_top_row_win() {
    let config = rules("tic-tac-toe");
    let state = play(
        &config,
        &[place(0, 0), place(1, 0), place(0, 1), place(1, 1), place(0, 2)],
    );
    assert_eq!(state.status, GameStatus::Won);
    assert_eq!(state.winner, Some(Player::X));
    assert_eq!(state.current_player, Player::X);
    assert_eq!(state.move_count, 5);
}

#[test]
fn test_connect_4_vertical_win_through_column_drops() {
    let config = rules("connect-4");
    // X stacks column 3 while O fills columns 0 and 1.
    let state = play(
        &config,
        &[
            drop_into(3),
            drop_into(0),
            drop_into(3),
            drop_into(0),
            drop_into(3),
            drop_into(1),
            drop_into(3),
        ],
    );
    assert_eq!(state.status, GameStatus::Won);
    assert_eq!(state.winner, Some(Player::X));
    for row in 2..6 {
        assert_eq!(state.grid.get(Position::new(row, 3)), Some(Player::X));
    }
}

#[test]
fn test_rejected_events_leave_state_identical() {
    let config = rules("tic-tac-toe");
    let state = play(&config, &[place(1, 1)]);
    let rejected = [
        place(1, 1),   // occupied
        place(-1, 0),  // off the board
        place(0, 9),   // off the board
        drop_into(0),  // wrong placement mode
    ];
    for event in rejected {
        assert_eq!(reduce(state.clone(), &event, &config), state);
    }
}

#[test]
fn test_full_column_is_rejected_under_reject_overflow() {
    let config = rules("connect-4");
    let full = play(&config, &vec![drop_into(2); 6]);
    assert_eq!(full.move_count, 6);
    assert_eq!(full.status, GameStatus::Playing);
    let next = reduce(full.clone(), &drop_into(2), &config);
    assert_eq!(next, full);
}

#[test]
fn test_popout_recirculates_a_full_column() {
    let config = rules("connect-4-popout");
    let full = play(&config, &vec![drop_into(4); 6]);
    assert_eq!(full.current_player, Player::X);

    let popped = reduce(full.clone(), &drop_into(4), &config);
    assert_eq!(popped.move_count, 7);
    // Column occupancy is conserved and nothing else fills in.
    assert_eq!(popped.grid.occupied_count(), 6);
    // The floor disc (X's first) was ejected; O's first disc now sits there.
    assert_eq!(popped.grid.get(Position::new(5, 4)), Some(Player::O));
    // The mover's new disc enters at the top of the lane.
    assert_eq!(popped.grid.get(Position::new(0, 4)), Some(Player::X));
    assert_eq!(popped.status, GameStatus::Playing);
}

#[test]
fn test_reset_rebuilds_the_seeded_opening() {
    let config = rules("reversi");
    let state = play(&config, &[place(2, 3)]);
    assert_eq!(state.move_count, 1);
    let reset = reduce(state, &GameEvent::Reset, &config);
    assert_eq!(reset, create_initial_state(&config));
    assert_eq!(reset.grid.occupied_count(), 4);
    assert_eq!(reset.move_count, 0);
}

#[test]
fn test_replaying_a_log_reproduces_the_state() {
    let config = rules("connect-4-popout");
    let log: Vec<GameEvent> = (0..20).map(|i| drop_into(i % 3)).collect();
    assert_eq!(play(&config, &log), play(&config, &log));
}

#[test]
fn test_projection_carries_reducer_relevant_fields() {
    let rules = rules("connect-4-popout");
    assert_eq!(rules.width, 7);
    assert_eq!(rules.height, 6);
    assert_eq!(rules.win_length, 4);
    assert_eq!(rules.placement, PlacementMode::Gravity);
    assert_eq!(rules.gravity, GravityDirection::Down);
    assert_eq!(rules.overflow, OverflowPolicy::PopOutBottom);
    assert!(!rules.capture);
    assert!(rules.initial.is_empty());
}
