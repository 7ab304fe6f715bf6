//! Core engine data types: marks, the 3x3 board, results and notifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const BOARD_SIDE: usize = 3;
pub const NUM_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

/// A player's mark. Also used as the turn indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// None = empty cell.
pub type Cell = Option<Mark>;

/// A cell coordinate. Both components are always in `0..3`; the only ways
/// to build one are the checked constructors and deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    row: usize,
    col: usize,
}

#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    col: usize,
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawPosition::deserialize(deserializer)?;
        Position::new(raw.row, raw.col).ok_or_else(|| {
            serde::de::Error::custom(format!("position ({}, {}) is off the board", raw.row, raw.col))
        })
    }
}

impl Position {
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIDE && col < BOARD_SIDE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_CELLS {
            Some(Self { row: index / BOARD_SIDE, col: index % BOARD_SIDE })
        } else {
            None
        }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    pub fn index(self) -> usize {
        self.row * BOARD_SIDE + self.col
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 grid, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; NUM_CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Writes a cell unconditionally. Move legality is the session's job.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    pub fn cells(&self) -> &[Cell; NUM_CELLS] {
        &self.cells
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .filter_map(|(i, _)| Position::from_index(i))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Row-by-row view for rendering.
    pub fn rows(&self) -> [[Cell; BOARD_SIDE]; BOARD_SIDE] {
        let mut grid = [[None; BOARD_SIDE]; BOARD_SIDE];
        for (i, cell) in self.cells.iter().enumerate() {
            grid[i / BOARD_SIDE][i % BOARD_SIDE] = *cell;
        }
        grid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    InProgress,
    XWins,
    OWins,
    Draw,
}

impl GameResult {
    pub fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::X => GameResult::XWins,
            Mark::O => GameResult::OWins,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    HumanVsHuman,
    HumanVsBot,
}

impl Mode {
    /// The mark played automatically by the engine, if any.
    pub fn bot_mark(self) -> Option<Mark> {
        match self {
            Mode::HumanVsHuman => None,
            Mode::HumanVsBot => Some(Mark::O),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human_vs_human" | "pvp" | "human" => Ok(Mode::HumanVsHuman),
            "human_vs_bot" | "bot" => Ok(Mode::HumanVsBot),
            other => Err(format!("unknown mode '{}', expected human_vs_human or human_vs_bot", other)),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::HumanVsHuman => write!(f, "human_vs_human"),
            Mode::HumanVsBot => write!(f, "human_vs_bot"),
        }
    }
}

/// Running win/draw counters. Field names match the persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "XWins", default)]
    pub x_wins: u64,
    #[serde(rename = "OWins", default)]
    pub o_wins: u64,
    #[serde(rename = "Draws", default)]
    pub draws: u64,
}

impl Statistics {
    /// Bump the counter matching a terminal result. `InProgress` is a no-op.
    /// Counters stick at `u64::MAX`.
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::XWins => self.x_wins = self.x_wins.saturating_add(1),
            GameResult::OWins => self.o_wins = self.o_wins.saturating_add(1),
            GameResult::Draw => self.draws = self.draws.saturating_add(1),
            GameResult::InProgress => {}
        }
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "X Wins: {}, O Wins: {}, Draws: {}", self.x_wins, self.o_wins, self.draws)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Colour hint for rendered marks.
    pub fn mark_color(self) -> &'static str {
        match self {
            Theme::Light => "black",
            Theme::Dark => "white",
        }
    }
}

/// Notifications returned synchronously by the mutating session operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum Event {
    MarkPlaced { position: Position, mark: Mark, by_bot: bool },
    TurnChanged { turn: Mark },
    GameOver { result: GameResult, statistics: Statistics },
    GameReset,
    StatisticsReset,
    ThemeChanged { theme: Theme },
}

/// Everything a UI needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: [[Cell; BOARD_SIDE]; BOARD_SIDE],
    pub turn: Mark,
    pub result: GameResult,
    pub mode: Mode,
    pub status: String,
    pub statistics: Statistics,
    pub theme: Theme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(2, 2).is_some());
        assert!(Position::new(3, 0).is_none());
        assert!(Position::new(0, 3).is_none());
        assert_eq!(Position::new(1, 2).unwrap().index(), 5);
        assert_eq!(Position::from_index(7), Position::new(2, 1));
        assert!(Position::from_index(9).is_none());
        let pos = Position::new(2, 1).unwrap();
        assert_eq!((pos.row(), pos.col()), (2, 1));
    }

    #[test]
    fn test_position_deserialize_checks_bounds() {
        let pos: Position = serde_json::from_str(r#"{"row": 1, "col": 2}"#).unwrap();
        assert_eq!(pos, Position::new(1, 2).unwrap());
        assert_eq!(serde_json::to_value(pos).unwrap(), serde_json::json!({"row": 1, "col": 2}));

        let err = serde_json::from_str::<Position>(r#"{"row": 0, "col": 5}"#).unwrap_err();
        assert!(err.to_string().contains("off the board"), "{}", err);
        assert!(serde_json::from_str::<Position>(r#"{"row": 5, "col": 5}"#).is_err());
    }

    #[test]
    fn test_board_rejects_aliased_cells() {
        let mut board = Board::new();
        board.set(Position::new(1, 2).unwrap(), Some(Mark::X));
        // (0, 5) would alias (1, 2) as a flat index; it cannot be built.
        assert!(Position::new(0, 5).is_none());
        assert_eq!(board.get(Position::new(0, 2).unwrap()), None);
        assert_eq!(board.empty_count(), 8);
    }

    #[test]
    fn test_board_rows_and_empties() {
        let mut board = Board::new();
        assert_eq!(board.empty_count(), 9);
        board.set(Position::new(1, 1).unwrap(), Some(Mark::X));
        board.set(Position::new(0, 2).unwrap(), Some(Mark::O));
        assert_eq!(board.empty_count(), 7);
        assert!(!board.empty_positions().contains(&Position::new(1, 1).unwrap()));
        let rows = board.rows();
        assert_eq!(rows[1][1], Some(Mark::X));
        assert_eq!(rows[0][2], Some(Mark::O));
        assert_eq!(rows[2][0], None);
    }

    #[test]
    fn test_statistics_record_and_display() {
        let mut stats = Statistics::default();
        stats.record(GameResult::XWins);
        stats.record(GameResult::Draw);
        stats.record(GameResult::Draw);
        stats.record(GameResult::InProgress);
        assert_eq!(stats, Statistics { x_wins: 1, o_wins: 0, draws: 2 });
        assert_eq!(stats.to_string(), "X Wins: 1, O Wins: 0, Draws: 2");
    }

    #[test]
    fn test_statistics_saturate() {
        let mut stats = Statistics { x_wins: u64::MAX, o_wins: u64::MAX, draws: u64::MAX };
        stats.record(GameResult::XWins);
        stats.record(GameResult::OWins);
        stats.record(GameResult::Draw);
        assert_eq!(stats, Statistics { x_wins: u64::MAX, o_wins: u64::MAX, draws: u64::MAX });
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("bot".parse::<Mode>(), Ok(Mode::HumanVsBot));
        assert_eq!("Human_Vs_Human".parse::<Mode>(), Ok(Mode::HumanVsHuman));
        assert!("robot".parse::<Mode>().is_err());
        assert_eq!(Mode::HumanVsBot.bot_mark(), Some(Mark::O));
        assert_eq!(Mode::HumanVsHuman.bot_mark(), None);
    }

    #[test]
    fn test_statistics_serde_keys() {
        let stats = Statistics { x_wins: 3, o_wins: 1, draws: 2 };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json, serde_json::json!({"XWins": 3, "OWins": 1, "Draws": 2}));
    }
}
