//! Game-end detection and the live game session.
//!
//! A `Game` owns the one position that counts for repetition, together with
//! its repetition table and random generator. Positions explored by search
//! or legality checks are plain copies and never reach the table.

use std::fmt;

use crate::board::{Color, Move, PieceKind, Position};
use crate::fen::FenError;
use crate::legality::MoveParseError;
use crate::repetition::RepetitionTable;
use crate::rng::Pcg32;
use crate::search::{Search, SearchParams};
use crate::utils::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEnd {
    Ongoing,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
    DrawRepetition,
}

impl GameEnd {
    pub fn is_over(self) -> bool {
        self != GameEnd::Ongoing
    }

    /// Result line for a finished game. `to_move` is the side to move in
    /// the final position, i.e. the mated side on checkmate.
    pub fn result_label(self, to_move: Color) -> &'static str {
        match (self, to_move) {
            (GameEnd::Checkmate, Color::White) => "Black Wins - Checkmate",
            (GameEnd::Checkmate, Color::Black) => "White Wins - Checkmate",
            (GameEnd::Stalemate, _) => "Stalemate",
            (GameEnd::DrawFiftyMove, _) => "Draw by 50 move rule",
            (GameEnd::DrawRepetition, _) => "Draw by repetition",
            (GameEnd::Ongoing, _) => "Game not over",
        }
    }
}

impl fmt::Display for GameEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameEnd::Ongoing => "ongoing",
            GameEnd::Checkmate => "checkmate",
            GameEnd::Stalemate => "stalemate",
            GameEnd::DrawFiftyMove => "draw (50 move rule)",
            GameEnd::DrawRepetition => "draw (repetition)",
        };
        write!(f, "{}", s)
    }
}

/// Classify `pos`.
///
/// Repetition is only considered when `repetitions` is given, i.e. for the
/// live game position. It is checked before the 50 move rule.
pub fn check_game_end(pos: &Position, repetitions: Option<&RepetitionTable>) -> GameEnd {
    if pos.legal_moves().is_empty() {
        return if pos.in_check() {
            GameEnd::Checkmate
        } else {
            GameEnd::Stalemate
        };
    }
    if let Some(table) = repetitions {
        if table.occurrences(pos) >= 3 {
            return GameEnd::DrawRepetition;
        }
    }
    if pos.halfmove >= 100 {
        return GameEnd::DrawFiftyMove;
    }
    GameEnd::Ongoing
}

/// Live game session
pub struct Game {
    initial: Position,
    position: Position,
    repetitions: RepetitionTable,
    rng: Pcg32,
    search: Search,
    history: Vec<Move>,
}

impl Game {
    /// New game from the standard start position
    pub fn new(rng: Pcg32) -> Self {
        Self::from_position(Position::start(), rng)
    }

    pub fn from_fen(fen: &str, rng: Pcg32) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?, rng))
    }

    pub fn from_position(position: Position, rng: Pcg32) -> Self {
        let mut repetitions = RepetitionTable::new();
        repetitions.record(&position);
        Game {
            initial: position,
            position,
            repetitions,
            rng,
            search: Search::new(),
            history: Vec::new(),
        }
    }

    /// Replace the search parameters used by `best_move`
    pub fn with_search_params(mut self, params: SearchParams) -> Self {
        self.search = Search::with_params(params);
        self
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn repetitions(&self) -> &RepetitionTable {
        &self.repetitions
    }

    /// Moves played since the initial position
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn search(&self) -> &Search {
        &self.search
    }

    /// Back to the initial position with an empty repetition table
    pub fn reset(&mut self) {
        self.position = self.initial;
        self.repetitions.clear();
        self.repetitions.record(&self.position);
        self.history.clear();
    }

    /// Apply a legal move to the live position and count the result.
    /// A move that is not legal here is refused and changes nothing.
    pub fn play(&mut self, mv: Move) -> Result<(), MoveParseError> {
        if !self.position.legal_moves().contains(&mv) {
            log::warn!("play: refusing illegal move {} in {}", mv, self.position.to_fen());
            return Err(MoveParseError::IllegalMove(mv.to_uci()));
        }
        if !self.position.apply_move(mv) {
            return Err(MoveParseError::IllegalMove(mv.to_uci()));
        }
        self.repetitions.record(&self.position);
        self.history.push(mv);
        Ok(())
    }

    /// Play a move given in coordinate notation
    pub fn play_uci(&mut self, uci: &str) -> Result<Move, MoveParseError> {
        let mv = self.position.parse_uci_move(uci)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Rebuild the game from its initial position and a move list.
    /// Stops at the first move that does not parse, leaving the moves
    /// before it applied.
    pub fn replay_uci<'a, I>(&mut self, moves: I) -> Result<(), MoveParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.reset();
        for uci in moves {
            self.play_uci(uci)?;
        }
        Ok(())
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves()
    }

    pub fn legal_moves_from(&self, sq: Square) -> Vec<Move> {
        self.position.legal_moves_from(sq)
    }

    /// Squares to highlight after selecting `sq`: the legal destinations
    /// followed by `sq` itself. Empty when the piece cannot move or does not
    /// belong to the side to move.
    pub fn highlighted_squares(&self, sq: Square) -> Vec<Square> {
        if !matches!(self.position.piece_at(sq), Some(p) if p.color == self.position.side) {
            return Vec::new();
        }
        let mut squares: Vec<Square> = Vec::new();
        for mv in self.position.legal_moves_from(sq) {
            if !squares.contains(&mv.to()) {
                squares.push(mv.to());
            }
        }
        if !squares.is_empty() {
            squares.push(sq);
        }
        squares
    }

    /// Resolve an origin/destination pair (e.g. two clicks) and play it.
    /// A promotion without a chosen piece promotes to a queen. Returns None
    /// and leaves the game untouched when no legal move matches.
    pub fn try_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Option<Move> {
        let candidates: Vec<Move> = self
            .position
            .legal_moves_from(from)
            .into_iter()
            .filter(|m| m.to() == to)
            .collect();
        let wanted = if candidates.iter().any(|m| m.promotion().is_some()) {
            Some(promotion.unwrap_or(PieceKind::Queen))
        } else {
            None
        };
        let mv = candidates.into_iter().find(|m| m.promotion() == wanted)?;
        self.play(mv).ok()?;
        Some(mv)
    }

    /// State of the live position, repetition included
    pub fn state(&self) -> GameEnd {
        check_game_end(&self.position, Some(&self.repetitions))
    }

    /// Search the live position
    pub fn best_move(&mut self) -> Option<Move> {
        self.search.best_move(&self.position, &mut self.rng)
    }

    /// Computer turn: search and play a move unless the game is over.
    /// Returns the state after the move (or the terminal state found before).
    pub fn play_computer_move(&mut self) -> (Option<Move>, GameEnd) {
        let end = self.state();
        if end.is_over() {
            return (None, end);
        }
        let Some(mv) = self.best_move() else {
            return (None, end);
        };
        if self.play(mv).is_err() {
            return (None, end);
        }
        (Some(mv), self.state())
    }
}
