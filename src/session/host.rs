//! The game host: the collaborator that owns the board, the move list and the engine loop.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::chess::piece::{Color, PieceKind};
use crate::config::PracticeConfig;
use crate::core::coord::Coord;
use crate::core::position::Position;
use crate::error::PracticeError;
use crate::puzzle::PuzzleId;

/// Opponent tag of the built-in practice engine.
pub const PRACTICE_ENGINE: &str = "engineCheckmatePractice";

/// Operations a practice session needs from the game host.
///
/// Presentation hooks (`clear_animations`, `view_front`, `reselect_piece`,
/// `undo_availability_changed`) default to no-ops for hosts without a UI.
pub trait GameHost {
    fn start_engine_game(&mut self, options: EngineGameOptions) -> Result<(), PracticeError>;

    fn unload_game(&mut self);

    fn is_game_over(&self) -> bool;

    /// Number of plies played in the current game.
    fn ply_count(&self) -> usize;

    /// Conclusion string such as `"white checkmate"`, or `None` while the game is running.
    fn game_conclusion(&self) -> Option<String>;

    fn is_our_turn(&self) -> bool;

    /// Takes back the last ply (and any conclusion it produced).
    fn rewind_move(&mut self);

    fn clear_animations(&mut self) {}

    fn view_front(&mut self) {}

    fn reselect_piece(&mut self) {}

    fn undo_availability_changed(&mut self, _legal: bool) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMetadata {
    pub event: String,
    pub site: String,
    pub round: String,
    pub time_control: String,
    pub white: String,
    pub black: String,
    /// `YYYY.MM.DD`
    pub utc_date: String,
    /// `HH:MM:SS`
    pub utc_time: String,
}

impl GameMetadata {
    pub fn practice(now: DateTime<Utc>) -> Self {
        Self {
            event: "Infinite chess checkmate practice".to_string(),
            site: "https://www.infinitechess.org/".to_string(),
            round: "-".to_string(),
            time_control: "-".to_string(),
            white: "You".to_string(),
            black: "Engine".to_string(),
            utc_date: now.format("%Y.%m.%d").to_string(),
            utc_time: now.format("%H:%M:%S").to_string(),
        }
    }
}

/// Minimal rule set for practice games: no promotions, checkmate wins, white moves first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRules {
    pub promotions_allowed: BTreeMap<Color, Vec<PieceKind>>,
    pub win_conditions: BTreeMap<Color, Vec<String>>,
    pub turn_order: [Color; 2],
}

impl GameRules {
    pub fn practice() -> Self {
        let checkmate = || vec!["checkmate".to_string()];
        Self {
            promotions_allowed: BTreeMap::from([
                (Color::White, Vec::new()),
                (Color::Black, Vec::new()),
            ]),
            win_conditions: BTreeMap::from([
                (Color::White, checkmate()),
                (Color::Black, checkmate()),
            ]),
            turn_order: [Color::White, Color::Black],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOptions {
    pub full_move: u32,
    pub starting_position: Position,
    pub position_string: String,
    pub special_rights: BTreeSet<Coord>,
    pub rules: GameRules,
}

/// Everything the host needs to start a practice game against the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineGameOptions {
    pub metadata: GameMetadata,
    pub player_color: Color,
    pub engine: &'static str,
    pub puzzle: PuzzleId,
    pub move_time_limit: Duration,
    pub variant: VariantOptions,
}

impl EngineGameOptions {
    pub fn for_puzzle(
        puzzle: &PuzzleId,
        position: Position,
        config: &PracticeConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let position_string = position.to_compact();
        Self {
            metadata: GameMetadata::practice(now),
            player_color: Color::White,
            engine: PRACTICE_ENGINE,
            puzzle: puzzle.clone(),
            move_time_limit: config.engine_move_time,
            variant: VariantOptions {
                full_move: 1,
                starting_position: position,
                position_string,
                special_rights: BTreeSet::new(),
                rules: GameRules::practice(),
            },
        }
    }
}

/// A parsed conclusion string: `"<victor> <condition>"`, `"draw <condition>"` or a bare
/// condition such as `"aborted"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConclusion {
    pub victor: Option<Color>,
    pub condition: String,
}

impl GameConclusion {
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let (head, rest) = s.split_once(' ').unwrap_or((s, ""));
        let victor = match head {
            "white" => Some(Color::White),
            "black" => Some(Color::Black),
            "draw" => None,
            _ => {
                return Self {
                    victor: None,
                    condition: s.to_string(),
                }
            }
        };
        Self {
            victor,
            condition: rest.trim().to_string(),
        }
    }
}
