//! The game engine: one owner for board, turn, status and scores.

use super::action::{Move, MoveError, MoveOutcome};
use super::events::{GameEvent, GameObserver};
use super::invariants::{EngineInvariants, InvariantSet};
use super::rng::GameRng;
use super::rules::{self, WinningLine};
use super::schedule::{ComputerTurn, Generation};
use super::{Board, GameMode, GameStatus, Player, Position, Scores, Square};
use tracing::{debug, error, info, instrument, warn};

/// Tic-tac-toe game engine.
///
/// Every mutation goes through `&mut self` and runs to completion, including
/// outcome evaluation and observer notification, before returning.
pub struct GameEngine {
    pub(crate) board: Board,
    pub(crate) current_player: Player,
    pub(crate) status: GameStatus,
    pub(crate) history: Vec<Move>,
    scores: Scores,
    mode: GameMode,
    winning_line: Option<WinningLine>,
    generation: Generation,
    rng: GameRng,
    observers: Vec<Box<dyn GameObserver + Send>>,
}

impl GameEngine {
    /// Creates an engine whose computer opponent is seeded from the OS.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        Self::with_rng(mode, GameRng::from_entropy())
    }

    /// Creates an engine with a reproducible computer opponent.
    #[instrument]
    pub fn with_seed(mode: GameMode, seed: u64) -> Self {
        Self::with_rng(mode, GameRng::new(seed))
    }

    /// Creates an engine around an existing RNG.
    pub fn with_rng(mode: GameMode, rng: GameRng) -> Self {
        debug!(%mode, seed = rng.seed(), "Creating game engine");
        Self {
            board: Board::new(),
            current_player: Player::X,
            status: GameStatus::InProgress,
            history: Vec::new(),
            scores: Scores::default(),
            mode,
            winning_line: None,
            generation: Generation::default(),
            rng,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for [`GameEvent`]s.
    pub fn subscribe(&mut self, observer: impl GameObserver + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player whose mark goes down next.
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns the session scores.
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// The completed line, only while the game is won.
    pub fn winning_line(&self) -> Option<WinningLine> {
        self.winning_line
    }

    /// Returns the current mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Moves played in the current game, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of resets so far.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Empty cells, in row-major order.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// True when the game is running and the computer holds the next move.
    pub fn is_computer_turn(&self) -> bool {
        !self.status.is_over() && self.mode.computer_mark() == Some(self.current_player)
    }

    // ─────────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────────

    /// Places the current player's mark at `position`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoveError`] and leaves the engine untouched when the game
    /// is over, when the computer is due to move, or when the cell is taken.
    #[instrument(skip(self), fields(player = %self.current_player, generation = %self.generation))]
    pub fn place_mark(&mut self, position: Position) -> Result<MoveOutcome, MoveError> {
        if self.status.is_over() {
            debug!("Ignoring placement after game end");
            return Err(MoveError::GameOver);
        }

        if self.is_computer_turn() {
            debug!("Ignoring human placement on the computer's turn");
            return Err(MoveError::ComputerTurn);
        }

        self.apply(position)
    }

    /// Places the current player's mark at a row-major index.
    ///
    /// # Errors
    ///
    /// As [`place_mark`](Self::place_mark), plus [`MoveError::OutOfBounds`]
    /// for indices of 9 and above.
    pub fn place_index(&mut self, index: usize) -> Result<MoveOutcome, MoveError> {
        let position = Position::try_from(index)?;
        self.place_mark(position)
    }

    /// Classifies the board and, on the transition into a win, credits the
    /// winner and records the line.
    ///
    /// Terminal states are sticky: once the game is over this returns the
    /// stored status without scoring again.
    #[instrument(skip(self))]
    pub fn evaluate_outcome(&mut self) -> GameStatus {
        if self.status.is_over() {
            return self.status;
        }

        if let Some((winner, line)) = rules::find_win(&self.board) {
            self.status = GameStatus::Won(winner);
            self.winning_line = Some(line);
            self.scores.record_win(winner);
            info!(%winner, ?line, x = self.scores.x(), o = self.scores.o(), board = %self.board.display(), "Game won");
        } else if rules::is_full(&self.board) {
            self.status = GameStatus::Draw;
            info!(board = %self.board.display(), "Game drawn");
        } else {
            return GameStatus::InProgress;
        }

        self.emit(GameEvent::GameEnded {
            status: self.status,
            winning_line: self.winning_line,
        });
        self.status
    }

    /// Lets the computer play O on a uniformly random empty cell.
    ///
    /// Returns the chosen cell, or `None` without touching anything when
    /// there is nothing to do. Calling this outside the computer's turn is a
    /// caller bug and is reported with a warning.
    #[instrument(skip(self), fields(mode = %self.mode, generation = %self.generation))]
    pub fn computer_move(&mut self) -> Option<Position> {
        if self.mode != GameMode::VsComputer {
            warn!("computer_move called outside vs-computer mode");
            return None;
        }
        if self.status.is_over() {
            warn!(status = %self.status, "computer_move called after game end");
            return None;
        }
        if !self.is_computer_turn() {
            warn!(player = %self.current_player, "computer_move called on the human's turn");
            return None;
        }

        let empty = self.valid_moves();
        let Some(&position) = self.rng.choose(&empty) else {
            debug!("No empty cells left for the computer");
            return None;
        };

        match self.apply(position) {
            Ok(outcome) => {
                debug!(%position, status = %outcome.status, "Computer moved");
                Some(position)
            }
            Err(e) => {
                error!(error = %e, %position, "Computer picked an unplayable cell");
                None
            }
        }
    }

    /// Issues a ticket for a delayed computer move if one is due now.
    pub fn schedule_computer_turn(&self) -> Option<ComputerTurn> {
        self.is_computer_turn().then(|| ComputerTurn::new(self.generation))
    }

    /// Redeems a ticket from [`schedule_computer_turn`](Self::schedule_computer_turn).
    ///
    /// Tickets from before the latest reset are discarded.
    #[instrument(skip(self), fields(current = %self.generation))]
    pub fn run_computer_turn(&mut self, turn: ComputerTurn) -> Option<Position> {
        if turn.generation() != self.generation {
            debug!(ticket = %turn.generation(), "Discarding stale computer turn");
            return None;
        }
        if !self.is_computer_turn() {
            debug!("Computer turn no longer due");
            return None;
        }
        self.computer_move()
    }

    /// Clears the board for a new game. Scores are kept.
    #[instrument(skip(self))]
    pub fn reset_board(&mut self) {
        self.reset(false);
    }

    /// Zeroes both scores and clears the board.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
        self.reset(true);
    }

    /// Switches mode. The board is cleared since whose turn belongs to the
    /// computer has changed.
    #[instrument(skip(self))]
    pub fn set_mode(&mut self, mode: GameMode) {
        info!(from = %self.mode, to = %mode, "Changing game mode");
        self.mode = mode;
        self.reset(false);
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn apply(&mut self, position: Position) -> Result<MoveOutcome, MoveError> {
        if !self.board.is_empty(position) {
            debug!(%position, "Ignoring placement on occupied square");
            return Err(MoveError::CellOccupied(position));
        }

        let mark = self.current_player;
        self.board.set(position, Square::Occupied(mark));
        self.history.push(Move::new(mark, position));
        self.emit(GameEvent::MoveApplied { position, mark });

        let status = self.evaluate_outcome();
        if status == GameStatus::InProgress {
            self.current_player = mark.opponent();
        }

        if cfg!(debug_assertions) {
            self.verify_invariants();
        }

        Ok(MoveOutcome {
            applied: Move::new(mark, position),
            status,
        })
    }

    fn reset(&mut self, scores_cleared: bool) {
        self.board = Board::new();
        self.current_player = Player::X;
        self.status = GameStatus::InProgress;
        self.history.clear();
        self.winning_line = None;
        self.generation.bump();
        info!(generation = %self.generation, scores_cleared, "Board reset");
        self.emit(GameEvent::Reset { scores_cleared });
    }

    fn emit(&mut self, event: GameEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }

    fn verify_invariants(&self) {
        if let Err(violations) = EngineInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            error!(%descriptions, "Engine invariant violated");
            debug_assert!(false, "Engine invariant violated: {}", descriptions);
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("board", &self.board)
            .field("current_player", &self.current_player)
            .field("status", &self.status)
            .field("scores", &self.scores)
            .field("mode", &self.mode)
            .field("generation", &self.generation)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_starts_clean() {
        let engine = GameEngine::with_seed(GameMode::TwoPlayer, 5);
        assert_eq!(engine.current_player(), Player::X);
        assert_eq!(*engine.status(), GameStatus::InProgress);
        assert_eq!(*engine.scores(), Scores::default());
        assert_eq!(engine.valid_moves().len(), 9);
        assert_eq!(engine.generation().value(), 0);
    }

    #[test]
    fn test_evaluate_outcome_does_not_double_count() {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 5);
        for index in [0, 3, 1, 4, 2] {
            engine.place_index(index).expect("legal move");
        }
        assert_eq!(engine.evaluate_outcome(), GameStatus::Won(Player::X));
        assert_eq!(engine.evaluate_outcome(), GameStatus::Won(Player::X));
        assert_eq!(*engine.scores().x(), 1);
    }

    #[test]
    fn test_final_board_renders_as_logged() {
        let mut engine = GameEngine::with_seed(GameMode::TwoPlayer, 5);
        for index in [0, 3, 1, 4, 2] {
            engine.place_index(index).expect("legal move");
        }
        assert_eq!(engine.board().display(), "X|X|X\n-+-+-\nO|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_computer_turn_flag() {
        let mut engine = GameEngine::with_seed(GameMode::VsComputer, 5);
        assert!(!engine.is_computer_turn());
        engine.place_mark(Position::Center).expect("legal move");
        assert!(engine.is_computer_turn());
    }

    #[test]
    fn test_debug_does_not_list_rng() {
        let engine = GameEngine::with_seed(GameMode::TwoPlayer, 5);
        let rendered = format!("{:?}", engine);
        assert!(rendered.contains("GameEngine"));
        assert!(!rendered.contains("rng"));
    }
}
