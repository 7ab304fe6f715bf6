//! The game session: board, turn, mode, statistics and the injected store.
//!
//! Every mutating operation runs to completion synchronously and returns the
//! ordered list of [`Event`]s it produced. Invalid input (an occupied cell, a
//! finished game, coordinates off the board) is ignored and yields no events.

use crate::engine::bot_strategy::{BotStrategy, RandomStrategy};
use crate::engine::models::*;
use crate::engine::rules;
use crate::store::SettingsStore;

pub struct GameSession<S: SettingsStore> {
    board: Board,
    turn: Mark,
    mode: Mode,
    statistics: Statistics,
    theme: Theme,
    store: S,
    bot: Box<dyn BotStrategy>,
}

impl<S: SettingsStore> GameSession<S> {
    /// Session with an unseeded random bot.
    pub fn new(store: S) -> Self {
        Self::with_bot(store, Box::new(RandomStrategy::from_entropy()))
    }

    /// Loads counters and theme from `store`. Load failures fall back to
    /// zero counters and the light theme.
    pub fn with_bot(store: S, bot: Box<dyn BotStrategy>) -> Self {
        let statistics = store.load_counters().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load statistics, starting from zero");
            Statistics::default()
        });
        let dark = store.load_theme_preference().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load theme preference, using light");
            false
        });
        tracing::debug!(%statistics, dark, bot = bot.name(), "session created");

        Self {
            board: Board::new(),
            turn: Mark::X,
            mode: Mode::default(),
            statistics,
            theme: Theme::from_dark_flag(dark),
            store,
            bot,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Always derived from the board.
    pub fn result(&self) -> GameResult {
        rules::evaluate(&self.board)
    }

    pub fn status_text(&self) -> String {
        match self.result() {
            GameResult::InProgress => format!("Player {}'s turn", self.turn),
            GameResult::XWins => "Player X wins!".into(),
            GameResult::OWins => "Player O wins!".into(),
            GameResult::Draw => "It's a draw!".into(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.rows(),
            turn: self.turn,
            result: self.result(),
            mode: self.mode,
            status: self.status_text(),
            statistics: self.statistics,
            theme: self.theme,
        }
    }

    /// Places the current turn's mark at (row, col). In bot mode the bot's
    /// reply is played before returning.
    pub fn submit_move(&mut self, row: usize, col: usize) -> Vec<Event> {
        let Some(pos) = Position::new(row, col) else {
            tracing::debug!(row, col, "ignoring move off the board");
            return Vec::new();
        };
        if self.result().is_terminal() {
            tracing::debug!(%pos, "ignoring move after game over");
            return Vec::new();
        }
        if self.board.get(pos).is_some() {
            tracing::debug!(%pos, "ignoring move into occupied cell");
            return Vec::new();
        }

        let mut events = Vec::new();
        self.place(pos, false, &mut events);

        if let Some(bot_mark) = self.mode.bot_mark() {
            if !self.result().is_terminal() && self.turn == bot_mark {
                self.bot_move(&mut events);
            }
        }
        events
    }

    pub fn reset_game(&mut self) -> Vec<Event> {
        self.board = Board::new();
        self.turn = Mark::X;
        tracing::info!(mode = %self.mode, "game reset");
        vec![Event::GameReset]
    }

    pub fn reset_statistics(&mut self) -> Vec<Event> {
        self.statistics = Statistics::default();
        self.persist_counters();
        tracing::info!("statistics reset");
        vec![Event::StatisticsReset]
    }

    /// Switches mode and starts a fresh game.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Event> {
        tracing::info!(from = %self.mode, to = %mode, "mode changed");
        self.mode = mode;
        self.reset_game()
    }

    pub fn toggle_theme(&mut self) -> Vec<Event> {
        self.theme = Theme::from_dark_flag(!self.theme.is_dark());
        if let Err(e) = self.store.save_theme_preference(self.theme.is_dark()) {
            tracing::warn!(error = %e, "failed to persist theme preference");
        }
        tracing::info!(theme = ?self.theme, "theme toggled");
        vec![Event::ThemeChanged { theme: self.theme }]
    }

    fn bot_move(&mut self, events: &mut Vec<Event>) {
        let pos = self
            .bot
            .choose_cell(&self.board)
            .expect("bot strategy returned no move for a board with empty cells");
        assert!(
            self.board.get(pos).is_none(),
            "bot strategy picked occupied cell {}",
            pos
        );
        tracing::debug!(%pos, bot = self.bot.name(), mark = %self.turn, "bot move");
        self.place(pos, true, events);
    }

    /// Places the mark, then resolves win, draw or turn flip in that order.
    fn place(&mut self, pos: Position, by_bot: bool, events: &mut Vec<Event>) {
        let mark = self.turn;
        self.board.set(pos, Some(mark));
        events.push(Event::MarkPlaced { position: pos, mark, by_bot });

        let result = self.result();
        if result.is_terminal() {
            self.statistics.record(result);
            self.persist_counters();
            tracing::info!(?result, statistics = %self.statistics, "game over");
            events.push(Event::GameOver { result, statistics: self.statistics });
        } else {
            self.turn = mark.other();
            tracing::debug!(%pos, %mark, next = %self.turn, "move accepted");
            events.push(Event::TurnChanged { turn: self.turn });
        }
    }

    fn persist_counters(&mut self) {
        if let Err(e) = self.store.save_counters(&self.statistics) {
            tracing::warn!(error = %e, "failed to persist statistics");
        }
    }
}
