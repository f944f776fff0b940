//! Checkmate practice session: the start/move/undo/restart/conclude state machine.
//!
//! The session is the single writer of its [`SessionState`] and of the [`CompletionLedger`]
//! it owns. All board mutation is delegated to the [`GameHost`]. Every handler runs to
//! completion on the caller's thread; signals are expected in the order they happened.

pub mod host;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::catalogue;
use crate::chess::piece::Color;
use crate::config::PracticeConfig;
use crate::core::position::Position;
use crate::error::PracticeError;
use crate::generate::sampler::{sample_position, ProximityPolicy};
use crate::ledger::{CompletionLedger, Storage};
use crate::puzzle::PuzzleId;

pub use host::{EngineGameOptions, GameConclusion, GameHost, PRACTICE_ENGINE};

/// The player always takes white against the practice engine.
pub const PLAYER_COLOR: Color = Color::White;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active { puzzle: PuzzleId, undo_legal: bool },
}

/// Commands arriving from the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Undo,
    Restart { puzzle: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    NotInPractice,
    UndoIllegal,
    NoMovesPlayed,
    OpponentToMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Undone { plies: usize },
    Restarted,
    Ignored(IgnoredReason),
}

pub struct PracticeSession<H, S> {
    host: H,
    ledger: CompletionLedger<S>,
    config: PracticeConfig,
    rng: StdRng,
    state: SessionState,
}

impl<H: GameHost, S: Storage> PracticeSession<H, S> {
    pub fn new(host: H, ledger: CompletionLedger<S>, config: PracticeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            host,
            ledger,
            config,
            rng,
            state: SessionState::Idle,
        }
    }

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    pub fn in_practice(&self) -> bool {
        matches!(self.state, SessionState::Active { .. })
    }

    #[inline]
    pub fn undo_legal(&self) -> bool {
        matches!(
            self.state,
            SessionState::Active {
                undo_legal: true,
                ..
            }
        )
    }

    pub fn puzzle(&self) -> Option<&PuzzleId> {
        match &self.state {
            SessionState::Active { puzzle, .. } => Some(puzzle),
            SessionState::Idle => None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn ledger(&self) -> &CompletionLedger<S> {
        &self.ledger
    }

    /// Generates a position for `id` and asks the host to start a game against the engine.
    ///
    /// The id is validated and the position generated before anything else happens, so an
    /// invalid or infeasible puzzle leaves the session untouched. A running practice game is
    /// then unloaded; if the host refuses the new game afterwards, the session is Idle.
    pub fn start(&mut self, id: &str) -> Result<(), PracticeError> {
        let (puzzle, position) = self.prepare(id)?;
        self.launch(puzzle, position)
    }

    fn prepare(&mut self, id: &str) -> Result<(PuzzleId, Position), PracticeError> {
        let puzzle = catalogue::lookup(id)?;
        let position = sample_position(
            puzzle.instructions(),
            ProximityPolicy::for_puzzle(&puzzle),
            &mut self.rng,
            self.config.limits,
        )?;
        Ok((puzzle, position))
    }

    fn launch(&mut self, puzzle: PuzzleId, position: Position) -> Result<(), PracticeError> {
        if self.in_practice() {
            debug!("replacing the running practice game");
            self.host.unload_game();
            self.on_game_unloaded();
        }

        let options = EngineGameOptions::for_puzzle(&puzzle, position, &self.config, Utc::now());
        info!(
            puzzle = %puzzle,
            position = %options.variant.position_string,
            "starting checkmate practice"
        );
        self.host.start_engine_game(options)?;

        self.state = SessionState::Active {
            puzzle,
            undo_legal: false,
        };
        self.host.undo_availability_changed(false);
        Ok(())
    }

    /// The host unloaded the game: leave practice unconditionally.
    pub fn on_game_unloaded(&mut self) {
        if let SessionState::Active { puzzle, undo_legal } = &self.state {
            debug!(puzzle = %puzzle, "leaving checkmate practice");
            if *undo_legal {
                self.host.undo_availability_changed(false);
            }
        }
        self.state = SessionState::Idle;
    }

    pub fn on_human_move(&mut self) {
        let SessionState::Active { undo_legal, .. } = self.state else {
            return;
        };
        let over = self.host.is_game_over();
        if over && !undo_legal {
            self.set_undo_legal(true);
        } else if !over && undo_legal {
            self.set_undo_legal(false);
        }
    }

    pub fn on_engine_move(&mut self) {
        let SessionState::Active { undo_legal, .. } = self.state else {
            return;
        };
        if !undo_legal && self.host.ply_count() >= 2 {
            self.set_undo_legal(true);
        }
    }

    /// Takes back the engine's reply and the player's move (or just the last ply once the
    /// game is over on the engine's turn).
    pub fn request_undo(&mut self) -> CommandOutcome {
        let SessionState::Active { undo_legal, .. } = self.state else {
            warn!("undo requested outside checkmate practice");
            return CommandOutcome::Ignored(IgnoredReason::NotInPractice);
        };
        if !undo_legal {
            debug!("undo requested while undoing is illegal");
            return CommandOutcome::Ignored(IgnoredReason::UndoIllegal);
        }
        let plies = self.host.ply_count();
        if plies == 0 {
            warn!("undo requested with no moves played");
            return CommandOutcome::Ignored(IgnoredReason::NoMovesPlayed);
        }
        let our_turn = self.host.is_our_turn();
        if !our_turn && !self.host.is_game_over() {
            debug!("undo requested while the engine is to move");
            return CommandOutcome::Ignored(IgnoredReason::OpponentToMove);
        }

        self.set_undo_legal(false);
        self.host.clear_animations();
        self.host.view_front();
        self.host.rewind_move();
        let mut rewound = 1;
        if our_turn && plies >= 2 {
            self.host.rewind_move();
            rewound = 2;
        }
        self.host.reselect_piece();
        debug!(plies = rewound, "undid practice moves");
        CommandOutcome::Undone { plies: rewound }
    }

    /// Unloads the current game and starts `id` afresh. A bad id keeps the current game.
    pub fn restart(&mut self, id: &str) -> Result<CommandOutcome, PracticeError> {
        if !self.in_practice() {
            warn!(puzzle = id, "restart requested outside checkmate practice");
            return Ok(CommandOutcome::Ignored(IgnoredReason::NotInPractice));
        }
        let (puzzle, position) = self.prepare(id)?;
        self.launch(puzzle, position)?;
        Ok(CommandOutcome::Restarted)
    }

    pub fn handle(&mut self, cmd: SessionCommand) -> Result<CommandOutcome, PracticeError> {
        match cmd {
            SessionCommand::Undo => Ok(self.request_undo()),
            SessionCommand::Restart { puzzle } => self.restart(&puzzle),
        }
    }

    /// The engine game ended. Returns whether the player won (and the puzzle was recorded).
    ///
    /// Calling this before the host reports a conclusion is a sequencing fault.
    pub fn on_game_concluded(&mut self) -> Result<bool, PracticeError> {
        let SessionState::Active { puzzle, .. } = &self.state else {
            return Ok(false);
        };
        let raw = self
            .host
            .game_conclusion()
            .ok_or(PracticeError::GameNotConcluded)?;
        let conclusion = GameConclusion::parse(&raw);
        debug!(puzzle = %puzzle, conclusion = %raw, "practice game concluded");
        if conclusion.victor != Some(PLAYER_COLOR) {
            return Ok(false);
        }
        let puzzle = puzzle.clone();
        self.ledger.mark_beaten(&puzzle)?;
        Ok(true)
    }

    /// Wipes all recorded progress.
    pub fn erase_progress(&mut self) -> Result<(), PracticeError> {
        self.ledger.erase()
    }

    fn set_undo_legal(&mut self, legal: bool) {
        if let SessionState::Active { undo_legal, .. } = &mut self.state {
            if *undo_legal != legal {
                *undo_legal = legal;
                debug!(legal, "undo availability changed");
                self.host.undo_availability_changed(legal);
            }
        }
    }
}
