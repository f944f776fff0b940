use checkmate_practice::chess::piece::Color;
use std::time::Duration;

use checkmate_practice::config::{PracticeConfig, SamplerLimits};
use checkmate_practice::ledger::{CompletionLedger, MemoryStorage};
use checkmate_practice::session::{
    CommandOutcome, EngineGameOptions, GameHost, IgnoredReason, PracticeSession, SessionCommand,
    SessionState, PRACTICE_ENGINE,
};
use checkmate_practice::PracticeError;

/// Scripted host: a ply counter, an optional conclusion and a log of what the session did.
#[derive(Default)]
struct ScriptedHost {
    started: Vec<EngineGameOptions>,
    loaded: bool,
    plies: usize,
    conclusion: Option<String>,
    unloads: usize,
    rewinds: usize,
    reselects: usize,
    undo_signals: Vec<bool>,
    refuse_start: bool,
}

impl ScriptedHost {
    fn play(&mut self) {
        assert!(self.loaded);
        self.plies += 1;
    }

    fn conclude(&mut self, conclusion: &str) {
        self.conclusion = Some(conclusion.to_string());
    }
}

impl GameHost for ScriptedHost {
    fn start_engine_game(&mut self, options: EngineGameOptions) -> Result<(), PracticeError> {
        if self.refuse_start {
            return Err(PracticeError::Host("engine unavailable".to_string()));
        }
        self.started.push(options);
        self.loaded = true;
        self.plies = 0;
        self.conclusion = None;
        Ok(())
    }

    fn unload_game(&mut self) {
        self.unloads += 1;
        self.loaded = false;
    }

    fn is_game_over(&self) -> bool {
        self.conclusion.is_some()
    }

    fn ply_count(&self) -> usize {
        self.plies
    }

    fn game_conclusion(&self) -> Option<String> {
        self.conclusion.clone()
    }

    fn is_our_turn(&self) -> bool {
        self.plies % 2 == 0
    }

    fn rewind_move(&mut self) {
        self.plies -= 1;
        self.rewinds += 1;
        self.conclusion = None;
    }

    fn reselect_piece(&mut self) {
        self.reselects += 1;
    }

    fn undo_availability_changed(&mut self, legal: bool) {
        self.undo_signals.push(legal);
    }
}

fn session() -> PracticeSession<ScriptedHost, MemoryStorage> {
    let ledger = CompletionLedger::open(MemoryStorage::new()).unwrap();
    PracticeSession::new(
        ScriptedHost::default(),
        ledger,
        PracticeConfig::default().with_seed(2024),
    )
}

#[test]
fn start_enters_practice_with_undo_disabled() {
    let mut s = session();
    s.start("2Q-1k").unwrap();

    assert!(s.in_practice());
    assert!(!s.undo_legal());
    assert_eq!(s.puzzle().map(|p| p.as_str()), Some("2Q-1k"));
    assert_eq!(s.host().undo_signals, vec![false]);

    let opts = &s.host().started[0];
    assert_eq!(opts.engine, PRACTICE_ENGINE);
    assert_eq!(opts.player_color, Color::White);
    assert_eq!(opts.variant.starting_position.len(), 3);
    assert_eq!(
        opts.variant.position_string,
        opts.variant.starting_position.to_compact()
    );
}

#[test]
fn unknown_puzzle_leaves_the_session_untouched() {
    let mut s = session();
    assert!(matches!(
        s.start("9Q-1k"),
        Err(PracticeError::UnknownPuzzle { .. })
    ));
    assert!(matches!(
        s.start("2Q"),
        Err(PracticeError::MalformedPuzzleId { .. })
    ));
    assert_eq!(s.state(), &SessionState::Idle);
    assert!(s.host().started.is_empty());

    s.start("3R-1k").unwrap();
    assert!(s.start("nope").is_err());
    assert_eq!(s.puzzle().map(|p| p.as_str()), Some("3R-1k"));
}

#[test]
fn unloading_leaves_practice() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    s.host_mut().unload_game();
    s.on_game_unloaded();
    assert_eq!(s.state(), &SessionState::Idle);
    assert!(!s.undo_legal());
}

#[test]
fn undo_becomes_legal_after_the_engine_replies() {
    let mut s = session();
    s.start("1K2R-1k").unwrap();

    s.host_mut().play();
    s.on_human_move();
    assert!(!s.undo_legal());

    s.host_mut().play();
    s.on_engine_move();
    assert!(s.undo_legal());

    assert_eq!(s.request_undo(), CommandOutcome::Undone { plies: 2 });
    assert_eq!(s.host().plies, 0);
    assert_eq!(s.host().reselects, 1);
    assert!(!s.undo_legal());
    assert_eq!(s.host().undo_signals, vec![false, true, false]);

    // Nothing left to take back, and undo is illegal again anyway.
    assert_eq!(
        s.request_undo(),
        CommandOutcome::Ignored(IgnoredReason::UndoIllegal)
    );
}

#[test]
fn human_move_revokes_undo_until_the_engine_answers() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    for _ in 0..2 {
        s.host_mut().play();
    }
    s.on_engine_move();
    assert!(s.undo_legal());

    s.host_mut().play();
    s.on_human_move();
    assert!(!s.undo_legal());
    assert_eq!(
        s.request_undo(),
        CommandOutcome::Ignored(IgnoredReason::UndoIllegal)
    );
}

#[test]
fn mating_move_enables_a_single_ply_undo() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    for _ in 0..3 {
        s.host_mut().play();
    }
    s.host_mut().conclude("white checkmate");
    s.on_human_move();
    assert!(s.undo_legal());

    assert!(s.on_game_concluded().unwrap());
    assert!(s.ledger().is_beaten("2Q-1k"));

    assert_eq!(s.request_undo(), CommandOutcome::Undone { plies: 1 });
    assert_eq!(s.host().plies, 2);
    assert!(!s.host().is_game_over());
}

#[test]
fn losses_and_draws_are_not_recorded() {
    let mut s = session();
    s.start("3R-1k").unwrap();
    s.host_mut().conclude("draw stalemate");
    assert!(!s.on_game_concluded().unwrap());
    s.host_mut().conclude("black time");
    assert!(!s.on_game_concluded().unwrap());
    assert!(s.ledger().beaten().is_empty());
}

#[test]
fn conclusion_before_the_game_ends_is_an_error() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    assert!(matches!(
        s.on_game_concluded(),
        Err(PracticeError::GameNotConcluded)
    ));
    assert!(s.ledger().beaten().is_empty());
    assert!(s.in_practice());
}

#[test]
fn commands_outside_practice_are_ignored() {
    let mut s = session();
    assert_eq!(
        s.handle(SessionCommand::Undo).unwrap(),
        CommandOutcome::Ignored(IgnoredReason::NotInPractice)
    );
    assert_eq!(
        s.handle(SessionCommand::Restart {
            puzzle: "2Q-1k".to_string()
        })
        .unwrap(),
        CommandOutcome::Ignored(IgnoredReason::NotInPractice)
    );
    assert!(s.host().started.is_empty());
    assert!(!s.on_game_concluded().unwrap());
}

#[test]
fn undo_is_refused_while_the_engine_thinks() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    for _ in 0..2 {
        s.host_mut().play();
    }
    s.on_engine_move();
    assert!(s.undo_legal());
    // The host advanced without telling us about the human move yet.
    s.host_mut().play();
    assert_eq!(
        s.request_undo(),
        CommandOutcome::Ignored(IgnoredReason::OpponentToMove)
    );
    assert_eq!(s.host().rewinds, 0);
}

#[test]
fn restart_loads_a_fresh_game() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    s.host_mut().play();

    let out = s
        .handle(SessionCommand::Restart {
            puzzle: "1K1Q1N-1k".to_string(),
        })
        .unwrap();
    assert_eq!(out, CommandOutcome::Restarted);
    assert_eq!(s.host().unloads, 1);
    assert_eq!(s.host().started.len(), 2);
    assert_eq!(s.host().plies, 0);
    assert_eq!(s.puzzle().map(|p| p.as_str()), Some("1K1Q1N-1k"));
    assert!(!s.undo_legal());
}

#[test]
fn starting_over_a_running_game_unloads_it_first() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    s.start("3R-1k").unwrap();
    assert_eq!(s.host().unloads, 1);
    assert_eq!(s.puzzle().map(|p| p.as_str()), Some("3R-1k"));
}

#[test]
fn erase_progress_clears_beaten_puzzles() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    s.host_mut().conclude("white checkmate");
    assert!(s.on_game_concluded().unwrap());
    s.erase_progress().unwrap();
    assert!(s.ledger().beaten().is_empty());
}

#[test]
fn engine_mate_on_our_turn_takes_back_both_plies() {
    let mut s = session();
    s.start("1K1Q1N-1k").unwrap();
    s.host_mut().play();
    s.on_human_move();
    s.host_mut().play();
    s.on_engine_move();
    s.host_mut().play();
    s.on_human_move();
    assert!(!s.undo_legal());

    // The engine's reply ends the game with the player to move.
    s.host_mut().play();
    s.host_mut().conclude("black checkmate");
    s.on_engine_move();
    assert!(s.undo_legal());
    assert!(!s.on_game_concluded().unwrap());

    assert_eq!(s.request_undo(), CommandOutcome::Undone { plies: 2 });
    assert_eq!(s.host().plies, 2);
    assert!(!s.host().is_game_over());
    assert!(!s.ledger().is_beaten("1K1Q1N-1k"));
}

#[test]
fn undo_with_an_empty_move_list_is_ignored() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    for _ in 0..2 {
        s.host_mut().play();
    }
    s.on_engine_move();
    assert!(s.undo_legal());

    // The host rewound on its own without telling the session.
    s.host_mut().plies = 0;
    assert_eq!(
        s.request_undo(),
        CommandOutcome::Ignored(IgnoredReason::NoMovesPlayed)
    );
    assert_eq!(s.host().rewinds, 0);
    assert!(s.undo_legal());
}

#[test]
fn restart_with_a_bad_id_keeps_the_running_game() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    s.host_mut().play();

    for bad in ["9Q-1k", "2Q"] {
        assert!(s
            .handle(SessionCommand::Restart {
                puzzle: bad.to_string(),
            })
            .is_err());
        assert_eq!(s.host().unloads, 0);
        assert!(s.host().loaded);
        assert_eq!(s.host().plies, 1);
        assert_eq!(s.puzzle().map(|p| p.as_str()), Some("2Q-1k"));
    }
}

#[test]
fn infeasible_puzzle_fails_before_unloading() {
    let mut starved = PracticeSession::new(
        ScriptedHost::default(),
        CompletionLedger::open(MemoryStorage::new()).unwrap(),
        PracticeConfig::default()
            .with_seed(5)
            .with_limits(SamplerLimits {
                max_attempts_per_piece: 0,
            }),
    );
    assert!(matches!(
        starved.start("2Q-1k"),
        Err(PracticeError::Infeasible { attempts: 0, .. })
    ));
    assert_eq!(starved.state(), &SessionState::Idle);
    assert!(starved.host().started.is_empty());
    assert!(starved.host().undo_signals.is_empty());
}

#[test]
fn host_refusal_after_unload_leaves_practice() {
    let mut s = session();
    s.start("2Q-1k").unwrap();
    s.host_mut().refuse_start = true;
    assert!(matches!(s.start("3R-1k"), Err(PracticeError::Host(_))));
    assert_eq!(s.host().unloads, 1);
    assert_eq!(s.state(), &SessionState::Idle);
}

#[test]
fn engine_move_time_is_handed_to_the_host() {
    let ledger = CompletionLedger::open(MemoryStorage::new()).unwrap();
    let mut s = PracticeSession::new(
        ScriptedHost::default(),
        ledger,
        PracticeConfig::default()
            .with_seed(11)
            .with_engine_move_time(Duration::from_millis(1500)),
    );
    s.start("3R-1k").unwrap();
    assert_eq!(
        s.host().started[0].move_time_limit,
        Duration::from_millis(1500)
    );
}
