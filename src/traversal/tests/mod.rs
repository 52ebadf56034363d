//! Tests for the exact and shorthand traversal algorithms.
//!
//! Shorthand traversal of a graph must always agree with exact traversal of the same graph
//! after [`Graph::expand_paths`]; most of the scenario tests below check both.


use crate::graph::{Graph, StateSet, TransitionId};
use crate::test_utils::example_graphs::{
    collapsed_ab, ends_with_ab, lambda_cycle, lambda_to_final, mixed_shorthand, single_symbol,
};
use crate::test_utils::{all_words, init_logger, mk_graph, mk_states};
use crate::traversal::{
    ConsumeInput, EdgeCursor, ExactStep, ExactTraversal, Frontier, ShorthandTraversal,
    TraversalConfig, TraversalMode, TraversalRun, TraversalState, Verdict, normalize_input,
    step_exact, step_shorthand, traverse,
};
use cancel_this::Cancellable;
use computation_process::{Algorithm, Computable, ComputationStep, Stateful};
use std::time::Duration;

fn run_exact(graph: &Graph, input: &str) -> Cancellable<TraversalRun> {
    ExactTraversal::run(graph, input)
}

fn run_shorthand(graph: &Graph, input: &str) -> Cancellable<TraversalRun> {
    ShorthandTraversal::run(graph, input)
}

// ========== Exact mode ==========

#[test]
fn test_single_symbol_accepted() -> Cancellable<()> {
    init_logger();
    let graph = single_symbol();

    let run = run_exact(&graph, "a")?;

    assert_eq!(run.verdict(), Verdict::Accepted);
    assert_eq!(run.steps().len(), 2);
    assert_eq!(run.steps()[0].states(), &mk_states(&[0]));
    assert_eq!(run.steps()[1].states(), &mk_states(&[1]));
    assert_eq!(run.steps()[1].symbol(), Some('a'));
    assert_eq!(run.steps()[1].symbol_index(), Some(0));
    assert_eq!(run.final_states(), mk_states(&[1]));
    assert_eq!(run.failed_at(), None);
    assert_eq!(run.mode(), TraversalMode::Exact);
    Ok(())
}

#[test]
fn test_single_symbol_rejected_immediately() -> Cancellable<()> {
    init_logger();
    let graph = single_symbol();

    let run = run_exact(&graph, "b")?;

    assert_eq!(run.verdict(), Verdict::Rejected);
    assert_eq!(run.failed_at(), Some(0));
    assert_eq!(run.steps().len(), 2);
    assert!(run.final_states().is_empty());
    Ok(())
}

#[test]
fn test_rejection_stops_consuming_input() -> Cancellable<()> {
    init_logger();
    let graph = single_symbol();

    let run = run_exact(&graph, "aaaa")?;

    // Initial step, `a` into q1, `a` into nothing. The rest is never consumed.
    assert_eq!(run.steps().len(), 3);
    assert_eq!(run.failed_at(), Some(1));
    assert_eq!(run.verdict(), Verdict::Rejected);
    Ok(())
}

#[test]
fn test_input_exhausted_in_non_final_state() -> Cancellable<()> {
    init_logger();
    let graph = ends_with_ab();

    let run = run_exact(&graph, "aba")?;

    assert_eq!(run.verdict(), Verdict::Rejected);
    assert_eq!(run.failed_at(), None);
    assert_eq!(run.final_states(), mk_states(&[0, 1]));
    Ok(())
}

#[test]
fn test_nondeterministic_branches() -> Cancellable<()> {
    init_logger();
    let graph = ends_with_ab();

    let run = run_exact(&graph, "aab")?;

    assert!(run.is_accepted());
    let sets: Vec<StateSet> = run.steps().iter().map(|it| it.states().clone()).collect();
    assert_eq!(
        sets,
        vec![
            mk_states(&[0]),
            mk_states(&[0, 1]),
            mk_states(&[0, 1]),
            mk_states(&[0, 2]),
        ]
    );
    Ok(())
}

#[test]
fn test_empty_input_accepted_through_lambda() -> Cancellable<()> {
    init_logger();
    let graph = lambda_to_final();

    let run = run_exact(&graph, "")?;

    assert!(run.is_accepted());
    assert_eq!(run.steps().len(), 1);
    assert_eq!(run.final_states(), mk_states(&[0, 1]));
    Ok(())
}

#[test]
fn test_empty_input_rejected_without_final_in_closure() -> Cancellable<()> {
    init_logger();
    let graph = single_symbol();

    let run = run_exact(&graph, "")?;

    assert_eq!(run.verdict(), Verdict::Rejected);
    assert_eq!(run.failed_at(), None);
    Ok(())
}

#[test]
fn test_lambda_glyph_input_is_empty() -> Cancellable<()> {
    init_logger();
    assert!(normalize_input("λ").is_empty());
    assert!(normalize_input("ε").is_empty());
    assert_eq!(normalize_input("aλ"), vec!['a', 'λ']);

    let run = run_exact(&lambda_to_final(), "ε")?;
    assert!(run.is_accepted());
    assert!(run.input().is_empty());
    Ok(())
}

#[test]
fn test_lambda_cycle_traversal() -> Cancellable<()> {
    init_logger();
    let graph = lambda_cycle();

    let run = run_exact(&graph, "a")?;
    assert!(run.is_accepted());
    assert_eq!(run.steps()[0].states(), &mk_states(&[0, 1, 2]));
    assert_eq!(run.final_states(), mk_states(&[3]));

    let run = run_exact(&graph, "aa")?;
    assert!(!run.is_accepted());
    assert_eq!(run.failed_at(), Some(1));
    Ok(())
}

#[test]
fn test_exact_step_ignores_paths() -> Cancellable<()> {
    init_logger();
    let graph = collapsed_ab();
    assert!(step_exact(&graph, &mk_states(&[0]), 'a')?.is_empty());
    Ok(())
}

#[test]
fn test_exact_step_is_deterministic() -> Cancellable<()> {
    init_logger();
    let graph = ends_with_ab();
    let states = mk_states(&[0, 1]);
    for symbol in ['a', 'b', 'c'] {
        assert_eq!(
            step_exact(&graph, &states, symbol)?,
            step_exact(&graph, &states, symbol)?
        );
    }
    Ok(())
}

// ========== Shorthand mode ==========

#[test]
fn test_shorthand_partial_path_is_not_rejection() -> Cancellable<()> {
    init_logger();
    let graph = collapsed_ab();

    let next = step_shorthand(&graph, &Frontier::initial(&graph), 'a')?;
    assert!(next.states.is_empty());
    assert_eq!(next.active_edges().len(), 1);
    assert!(!next.is_empty());

    let run = run_shorthand(&graph, "a")?;
    assert_eq!(run.verdict(), Verdict::Rejected);
    assert_eq!(run.failed_at(), None);
    assert_eq!(run.steps().len(), 2);
    assert_eq!(
        run.steps()[1].edges().iter().copied().collect::<Vec<_>>(),
        vec![EdgeCursor {
            transition: TransitionId(0),
            consumed: 1
        }]
    );
    Ok(())
}

#[test]
fn test_shorthand_completes_path() -> Cancellable<()> {
    init_logger();
    let graph = collapsed_ab();

    let run = run_shorthand(&graph, "ab")?;

    assert!(run.is_accepted());
    assert_eq!(run.final_states(), mk_states(&[1]));
    assert!(run.steps()[2].edges().is_empty());
    assert_eq!(run.mode(), TraversalMode::Shorthand);
    Ok(())
}

#[test]
fn test_shorthand_wrong_continuation_rejects() -> Cancellable<()> {
    init_logger();
    let graph = collapsed_ab();

    let run = run_shorthand(&graph, "aa")?;

    assert_eq!(run.failed_at(), Some(1));
    assert!(run.steps()[2].frontier().is_empty());
    Ok(())
}

#[test]
fn test_shorthand_takes_both_branches() -> Cancellable<()> {
    init_logger();
    let graph = mixed_shorthand();

    let next = step_shorthand(&graph, &Frontier::initial(&graph), 'a')?;

    // `q0 -a-> q1` completes (and q1 reaches q3 by lambda), `q0 -a:b:a-> q2` starts.
    assert_eq!(next.states, mk_states(&[1, 3]));
    assert_eq!(
        next.edges.iter().copied().collect::<Vec<_>>(),
        vec![EdgeCursor {
            transition: TransitionId(1),
            consumed: 1
        }]
    );
    Ok(())
}

#[test]
fn test_shorthand_reentered_path_loop() -> Cancellable<()> {
    init_logger();
    let graph = mixed_shorthand();
    let loop_edge = TransitionId(4);

    let frontier = Frontier {
        states: mk_states(&[2]),
        edges: [EdgeCursor {
            transition: loop_edge,
            consumed: 1,
        }]
        .into(),
    };
    let next = step_shorthand(&graph, &frontier, 'a')?;

    // The in-flight cursor completes back into q2, and q2 starts the loop again.
    assert_eq!(next.states, mk_states(&[2]));
    assert_eq!(
        next.edges.iter().copied().collect::<Vec<_>>(),
        vec![EdgeCursor {
            transition: loop_edge,
            consumed: 1
        }]
    );
    Ok(())
}

#[test]
fn test_shorthand_cursors_at_different_progress() -> Cancellable<()> {
    init_logger();
    let graph = mk_graph(2, 0, &[1], &[(0, 0, "a"), (0, 1, "a:a:a")]);
    let path = TransitionId(1);

    let first = step_shorthand(&graph, &Frontier::initial(&graph), 'a')?;
    let second = step_shorthand(&graph, &first, 'a')?;

    assert_eq!(second.states, mk_states(&[0]));
    assert_eq!(second.active_edges().into_iter().collect::<Vec<_>>(), vec![path]);
    assert_eq!(
        second.edges.iter().map(|it| it.consumed).collect::<Vec<_>>(),
        vec![1, 2]
    );

    let third = step_shorthand(&graph, &second, 'a')?;
    assert_eq!(third.states, mk_states(&[0, 1]));
    Ok(())
}

#[test]
fn test_shorthand_step_is_deterministic() -> Cancellable<()> {
    init_logger();
    let graph = mixed_shorthand();
    let frontier = step_shorthand(&graph, &Frontier::initial(&graph), 'a')?;
    for symbol in ['a', 'b'] {
        assert_eq!(
            step_shorthand(&graph, &frontier, symbol)?,
            step_shorthand(&graph, &frontier, symbol)?
        );
    }
    Ok(())
}

#[test]
fn test_shorthand_agrees_with_expanded_exact() -> Cancellable<()> {
    init_logger();
    let graphs = [
        collapsed_ab(),
        mixed_shorthand(),
        ends_with_ab(),
        lambda_cycle(),
        mk_graph(
            3,
            0,
            &[0],
            &[(0, 1, "a:b"), (1, 0, "b:a:&lambda;"), (1, 2, "a"), (2, 0, "λ")],
        ),
    ];

    for graph in &graphs {
        let expanded = graph.expand_paths();
        for word in all_words(&['a', 'b'], 6) {
            let shorthand = run_shorthand(graph, &word)?;
            let exact = run_exact(&expanded, &word)?;
            assert_eq!(
                shorthand.verdict(),
                exact.verdict(),
                "Verdicts differ on `{word}`"
            );
        }
    }
    Ok(())
}

#[test]
fn test_single_symbol_graphs_agree_across_modes() -> Cancellable<()> {
    init_logger();
    for graph in [single_symbol(), ends_with_ab(), lambda_cycle()] {
        for word in all_words(&['a', 'b'], 5) {
            let shorthand = run_shorthand(&graph, &word)?;
            let exact = run_exact(&graph, &word)?;
            assert_eq!(shorthand.verdict(), exact.verdict());
            assert_eq!(shorthand.final_states(), exact.final_states());
        }
    }
    Ok(())
}

// ========== Computation driver ==========

#[test]
fn test_one_suspension_per_step() {
    init_logger();
    let graph = ends_with_ab();
    let mut computation = ExactTraversal::configure(&graph, "ab");

    let mut suspended = 0;
    let accepted = loop {
        match computation.try_compute() {
            Ok(run) => break run.is_accepted(),
            Err(_) => suspended += 1,
        }
    };

    // Initial frontier, then one step per symbol.
    assert_eq!(suspended, 3);
    assert!(accepted);
}

#[test]
fn test_traverse_dispatches_on_mode() -> Cancellable<()> {
    init_logger();
    let config = TraversalConfig::new(collapsed_ab());
    assert_eq!(config.mode, TraversalMode::Shorthand);
    assert!(traverse(&config, "ab")?.is_accepted());

    let config = config.with_mode(TraversalMode::Exact);
    assert!(!traverse(&config, "ab")?.is_accepted());
    Ok(())
}

#[test]
fn test_max_active_states_cancels() {
    init_logger();
    let mut config = TraversalConfig::new(ends_with_ab());
    config.max_active_states = 1;

    // The first `a` makes both q0 and q1 active.
    assert!(traverse(&config, "a").is_err());
    assert!(traverse(&config, "b").is_ok());
}

#[test]
fn test_steps_observe_cancellation() {
    init_logger();
    let graph = mixed_shorthand();
    let frontier = Frontier::initial(&graph);
    let wait = || std::thread::sleep(Duration::from_millis(50));

    let exact = cancel_this::on_timeout(Duration::from_millis(1), || {
        wait();
        step_exact(&graph, &frontier.states, 'a')
    });
    assert!(exact.is_err());

    let shorthand = cancel_this::on_timeout(Duration::from_millis(1), || {
        wait();
        step_shorthand(&graph, &frontier, 'a')
    });
    assert!(shorthand.is_err());
}

#[test]
fn test_multi_character_label_never_matches() -> Cancellable<()> {
    init_logger();
    let graph = mk_graph(3, 0, &[1, 2], &[(0, 1, "ab"), (0, 2, "a:bc")]);

    for input in ["a", "ab", "abc"] {
        let exact = run_exact(&graph, input)?;
        let shorthand = run_shorthand(&graph, input)?;
        assert_eq!(exact.failed_at(), Some(0));
        assert_eq!(shorthand.failed_at(), Some(0));
    }
    Ok(())
}

#[test]
fn test_state_finishes_on_exhaustion_or_rejection() {
    init_logger();
    let config = TraversalConfig::new(single_symbol());

    let mut state = TraversalState::from("a");
    assert!(!state.is_finished());
    assert!(ConsumeInput::<ExactStep>::step(&config, &mut state).is_err());
    assert!(!state.is_finished());
    assert!(ConsumeInput::<ExactStep>::step(&config, &mut state).is_err());
    assert!(state.is_finished());
    assert_eq!(state.consumed(), 1);
    assert!(ConsumeInput::<ExactStep>::step(&config, &mut state).is_ok());

    // `b` empties the frontier before the input is exhausted.
    let mut state = TraversalState::from("ba");
    for _ in 0..2 {
        assert!(ConsumeInput::<ExactStep>::step(&config, &mut state).is_err());
    }
    assert!(state.is_finished());
    assert_eq!(state.consumed(), 1);
    assert_eq!(state.steps().len(), 2);
}
