//! Whole-solver properties checked against an independent minimax search.

use std::collections::HashMap;

use rowgame::{
    Action, Agent, BoardState, EncodedState, Player, RowGame, Solver, StepOutcome, Value,
    config::{Coverage, SolverConfig},
    game::collect_reachable_states,
    ports::GameRules,
};

/// Plain recursive minimax from the point of view of the player to move.
fn minimax(board: &BoardState, memo: &mut HashMap<EncodedState, Value>) -> Value {
    let key = EncodedState::from_board(board);
    if let Some(value) = memo.get(&key) {
        return *value;
    }

    let value = board
        .legal_actions()
        .into_iter()
        .map(|action| {
            let (next, outcome) = board.step(action).unwrap();
            match outcome {
                StepOutcome::Win => Value::Win,
                StepOutcome::Draw => Value::Draw,
                StepOutcome::WaitingNextAction => minimax(&next, memo).negate(),
            }
        })
        .max()
        .unwrap();

    memo.insert(key, value);
    value
}

fn solve(size: usize, coverage: Coverage) -> (RowGame, Agent, Agent) {
    let rules = RowGame::new(size).unwrap();
    let config = SolverConfig::default().with_coverage(coverage);
    let (first, second) = Agent::new_agents_with(&rules, config).unwrap();
    (rules, first, second)
}

fn initial(rules: &RowGame) -> EncodedState {
    rules.encode(&rules.initial_state())
}

fn columns(actions: Vec<Action>) -> Vec<usize> {
    actions.into_iter().map(usize::from).collect()
}

fn opponent_of<'a>(agent: &Agent, first: &'a Agent, second: &'a Agent) -> &'a Agent {
    match agent.player() {
        Player::First => second,
        Player::Second => first,
    }
}

#[test]
fn three_cells_first_player_takes_the_centre() {
    let (rules, first, second) = solve(3, Coverage::Principal);
    let root = initial(&rules);

    assert_eq!(first.value_of(root).unwrap(), Value::Win);
    assert_eq!(columns(first.optimal_actions(root).unwrap()), vec![1]);

    for agent in [&first, &second] {
        for state in agent.states() {
            assert!(
                agent.value_of(state).unwrap().is_defined(),
                "{} left undefined",
                agent.label(state)
            );
        }
    }
}

#[test]
fn two_cells_are_a_draw() {
    let (rules, first, second) = solve(2, Coverage::Principal);
    let root = initial(&rules);

    assert_eq!(first.value_of(root).unwrap(), Value::Draw);
    assert_eq!(columns(first.optimal_actions(root).unwrap()), vec![0, 1]);
    // every reply fills the row next to the opponent's mark
    for (_, _, entry) in second.entries() {
        assert_eq!(entry.outcome(), StepOutcome::Draw);
        assert_eq!(entry.value(), Value::Draw);
    }
}

#[test]
fn single_cell_is_a_draw() {
    let (rules, first, second) = solve(1, Coverage::Principal);
    assert_eq!(first.value_of(initial(&rules)).unwrap(), Value::Draw);
    assert!(second.is_empty());
}

#[test]
fn first_player_wins_from_the_inner_columns() {
    for size in 3..=7 {
        let (rules, first, _) = solve(size, Coverage::Principal);
        let root = initial(&rules);
        assert_eq!(first.value_of(root).unwrap(), Value::Win, "size {size}");
        let expected: Vec<usize> = (1..size - 1).collect();
        assert_eq!(columns(first.optimal_actions(root).unwrap()), expected, "size {size}");
    }
}

#[test]
fn solving_is_deterministic() {
    for coverage in [Coverage::Principal, Coverage::Exhaustive] {
        let (_, first_a, second_a) = solve(5, coverage);
        let (_, first_b, second_b) = solve(5, coverage);
        assert_eq!(first_a, first_b);
        assert_eq!(second_a, second_b);
        assert_eq!(first_a.to_string(), first_b.to_string());
    }
}

#[test]
fn terminal_entries_keep_their_values() {
    for size in 1..=6 {
        let (_, first, second) = solve(size, Coverage::Principal);
        for (_, _, entry) in first.entries().chain(second.entries()) {
            match entry.outcome() {
                StepOutcome::Win => assert_eq!(entry.value(), Value::Win),
                StepOutcome::Draw => assert_eq!(entry.value(), Value::Draw),
                StepOutcome::WaitingNextAction => {}
            }
        }
    }
}

#[test]
fn optimal_moves_are_zero_sum() {
    for coverage in [Coverage::Principal, Coverage::Exhaustive] {
        for size in 2..=7 {
            let (_, first, second) = solve(size, coverage);
            for agent in [&first, &second] {
                let opponent = opponent_of(agent, &first, &second);
                for state in agent.states() {
                    let value = agent.value_of(state).unwrap();
                    if !value.is_defined() {
                        continue;
                    }
                    for action in agent.optimal_actions(state).unwrap() {
                        let entry = agent.reward(state, action).unwrap();
                        if entry.is_terminal() {
                            continue;
                        }
                        let reply = opponent.value_of(entry.successor()).unwrap();
                        if reply.is_defined() {
                            assert_eq!(
                                value,
                                reply.negate(),
                                "size {size}, {} then {action}",
                                agent.label(state)
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn exhaustive_coverage_matches_minimax_everywhere() {
    for size in 1..=8 {
        let (_, first, second) = solve(size, Coverage::Exhaustive);
        let mut memo = HashMap::new();
        for agent in [&first, &second] {
            for state in agent.states() {
                let board = state.to_board(size).unwrap();
                assert_eq!(board.to_move, agent.player());
                assert_eq!(
                    agent.value_of(state).unwrap(),
                    minimax(&board, &mut memo),
                    "size {size}, {}",
                    agent.label(state)
                );
            }
        }
    }
}

#[test]
fn principal_coverage_agrees_with_minimax_where_defined() {
    for size in 3..=8 {
        let (_, first, second) = solve(size, Coverage::Principal);
        let mut memo = HashMap::new();
        for agent in [&first, &second] {
            for state in agent.states() {
                let value = agent.value_of(state).unwrap();
                if value.is_defined() {
                    let board = state.to_board(size).unwrap();
                    assert_eq!(value, minimax(&board, &mut memo), "size {size}");
                }
            }
        }
    }
}

#[test]
fn discovery_records_every_reachable_decision() {
    for size in 1..=6 {
        let rules = RowGame::new(size).unwrap();
        let (_, first, second) = solve(size, Coverage::Principal);
        let reachable = collect_reachable_states(&rules).unwrap();

        let decisions: Vec<_> = reachable.non_terminal().collect();
        assert_eq!(decisions.len(), first.len() + second.len(), "size {size}");
        for (key, board) in decisions {
            let agent = match board.to_move {
                Player::First => &first,
                Player::Second => &second,
            };
            assert!(agent.contains(*key), "size {size}: {} missing", board.label());
            assert_eq!(agent.actions(*key).unwrap().len(), board.legal_actions().len());
        }
    }
}

#[test]
fn convergence_survives_extra_epochs() {
    for size in 1..=6 {
        let rules = RowGame::new(size).unwrap();
        let mut solver = Solver::new(&rules, SolverConfig::default()).unwrap();
        let report = solver.train().unwrap();

        let last = report.epochs.last().unwrap();
        assert!(!last.changed);
        assert!(report.epoch_count() <= 4, "size {size}");

        let before = (solver.first().to_string(), solver.second().to_string());
        for player in [Player::First, Player::Second] {
            assert!(!solver.run_epoch_for(player).unwrap().changed, "size {size}");
        }
        let after = (solver.first().to_string(), solver.second().to_string());
        assert_eq!(before, after);
    }
}

#[test]
fn queries_on_terminal_positions_fail() {
    let (_, first, second) = solve(3, Coverage::Principal);
    let finished = EncodedState::from_board(&BoardState::from_label("1,1,2").unwrap());
    assert!(first.value_of(finished).is_err());
    assert!(second.value_of(finished).is_err());
    assert!(first.optimal_actions(finished).is_err());
}
