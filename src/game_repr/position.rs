use super::{Color, GamePosition, GameStatus, MoveList};
use crate::error::{Result, SearchError};
use chess::{BitBoard, Board, BoardStatus, ChessMove, MoveGen, Piece, EMPTY};
use std::fmt;
use std::str::FromStr;

/// Halfmoves without a capture or pawn move after which the game is drawn
pub const SEVENTY_FIVE_MOVE_LIMIT: u32 = 150;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Odd 64-bit constant spreading the half-move clock across the key
const CLOCK_KEY_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

// Material values in centipawns for capture ordering
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 320;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

/// Get material value for a piece type
#[inline]
pub fn piece_material_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

/// Chess position: a `chess::Board` plus the halfmove clock the board
/// itself does not track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    halfmove_clock: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            board: Board::default(),
            halfmove_clock: 0,
        }
    }
}

impl Position {
    /// Parse a FEN string. The halfmove clock field is optional.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let board = Board::from_str(fen)
            .map_err(|e| SearchError::InvalidPosition(format!("{} ({:?})", fen, e)))?;

        let halfmove_clock = fen
            .split_whitespace()
            .nth(4)
            .and_then(|field| field.parse().ok())
            .unwrap_or(0);

        Ok(Self { board, halfmove_clock })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// The same position with colors swapped and the board flipped
    /// vertically. Every evaluation of the mirror is the negation of the
    /// original's.
    pub fn mirrored(&self) -> Result<Self> {
        Self::from_fen(&mirror_fen(&self.to_string()))
    }

    /// Kings only, or kings plus a single minor piece
    fn is_insufficient_material(&self) -> bool {
        let combined = self.board.combined();
        let heavy = *self.board.pieces(Piece::Pawn)
            | *self.board.pieces(Piece::Rook)
            | *self.board.pieces(Piece::Queen);

        match combined.popcnt() {
            2 => true,
            3 => heavy == EMPTY,
            _ => false,
        }
    }

    fn is_en_passant(&self, mv: ChessMove) -> bool {
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && mv.get_source().get_file() != mv.get_dest().get_file()
            && self.board.piece_on(mv.get_dest()).is_none()
    }
}

impl GamePosition for Position {
    type Move = ChessMove;

    fn legal_moves(&self) -> MoveList<ChessMove> {
        MoveGen::new_legal(&self.board).collect()
    }

    fn apply(&self, mv: ChessMove) -> Result<Self> {
        if !self.board.legal(mv) {
            return Err(SearchError::InvalidMoveApplication { mv: mv.to_string() });
        }

        let resets_clock = self.is_capture(mv)
            || self.board.piece_on(mv.get_source()) == Some(Piece::Pawn);

        Ok(Self {
            board: self.board.make_move_new(mv),
            halfmove_clock: if resets_clock { 0 } else { self.halfmove_clock + 1 },
        })
    }

    fn side_to_move(&self) -> Color {
        match self.board.side_to_move() {
            chess::Color::White => Color::White,
            chess::Color::Black => Color::Black,
        }
    }

    fn status(&self) -> GameStatus {
        match self.board.status() {
            BoardStatus::Checkmate => GameStatus::Checkmate,
            BoardStatus::Stalemate => GameStatus::Draw,
            BoardStatus::Ongoing => {
                if self.halfmove_clock >= SEVENTY_FIVE_MOVE_LIMIT || self.is_insufficient_material() {
                    GameStatus::Draw
                } else {
                    GameStatus::Ongoing
                }
            }
        }
    }

    fn is_check(&self) -> bool {
        *self.board.checkers() != EMPTY
    }

    fn is_capture(&self, mv: ChessMove) -> bool {
        let opponent = !self.board.side_to_move();
        self.board.color_on(mv.get_dest()) == Some(opponent) || self.is_en_passant(mv)
    }

    fn gives_check(&self, mv: ChessMove) -> bool {
        *self.board.make_move_new(mv).checkers() != EMPTY
    }

    fn capture_score(&self, mv: ChessMove) -> i32 {
        if let Some(promotion) = mv.get_promotion() {
            return 10000 + piece_material_value(promotion);
        }

        if !self.is_capture(mv) {
            return 0;
        }

        let attacker = self
            .board
            .piece_on(mv.get_source())
            .map(piece_material_value)
            .unwrap_or(0);

        // MVV-LVA: prioritize capturing valuable pieces with cheap pieces
        self.victim_value(mv) * 10 - attacker
    }

    fn victim_value(&self, mv: ChessMove) -> i32 {
        if self.is_en_passant(mv) {
            return PAWN_VALUE;
        }

        match self.board.color_on(mv.get_dest()) {
            Some(color) if color != self.board.side_to_move() => self
                .board
                .piece_on(mv.get_dest())
                .map(piece_material_value)
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Board hash with the half-move clock mixed in, so positions on either
    /// side of the 75-move draw never share cache entries
    fn key(&self) -> u64 {
        self.board.get_hash() ^ u64::from(self.halfmove_clock).wrapping_mul(CLOCK_KEY_MULTIPLIER)
    }
}

impl FromStr for Position {
    type Err = SearchError;

    fn from_str(fen: &str) -> Result<Self> {
        Self::from_fen(fen)
    }
}

/// FEN with the half-move clock in place of the board's zero
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.board.to_string();
        let fields: Vec<&str> = board.split_whitespace().collect();
        write!(f, "{}", fields[..fields.len().min(4)].join(" "))?;
        write!(f, " {}", self.halfmove_clock)?;
        match fields.get(5) {
            Some(fullmove) => write!(f, " {}", fullmove),
            None => write!(f, " 1"),
        }
    }
}

/// Bitboard of every square holding a piece of `piece` and `color`
pub fn pieces_of(board: &Board, piece: Piece, color: chess::Color) -> BitBoard {
    *board.pieces(piece) & *board.color_combined(color)
}

fn mirror_fen(fen: &str) -> String {
    let mut fields = fen.split_whitespace();

    let placement = fields
        .next()
        .unwrap_or("")
        .split('/')
        .rev()
        .map(swap_case)
        .collect::<Vec<_>>()
        .join("/");

    let side = match fields.next() {
        Some("b") => "w",
        _ => "b",
    };

    let castling = match fields.next() {
        None | Some("-") => "-".to_string(),
        Some(rights) => {
            let swapped = swap_case(rights);
            let upper = swapped.chars().filter(|c| c.is_ascii_uppercase());
            let lower = swapped.chars().filter(|c| c.is_ascii_lowercase());
            upper.chain(lower).collect()
        }
    };

    let en_passant = match fields.next() {
        None | Some("-") => "-".to_string(),
        Some(square) => square
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(rank) => char::from_digit(9 - rank, 10).unwrap_or(c),
                None => c,
            })
            .collect(),
    };

    let counters: Vec<&str> = fields.collect();
    let mut mirrored = format!("{} {} {} {}", placement, side, castling, en_passant);
    for counter in counters {
        mirrored.push(' ');
        mirrored.push_str(counter);
    }
    mirrored
}

fn swap_case(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                c.to_ascii_lowercase()
            } else {
                c.to_ascii_uppercase()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirror_fen() {
        assert_eq!(
            mirror_fen("r3k2r/pp3ppp/8/3pP3/8/8/PPP2PPP/R3K2R w KQq d6 0 12"),
            "r3k2r/ppp2ppp/8/8/3Pp3/8/PP3PPP/R3K2R b Qkq d3 0 12"
        );
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let pos = Position::from_fen("rnbqkb1r/pp3ppp/4pn2/2pp4/3P4/2N1PN2/PPP2PPP/R1BQKB1R w KQkq - 0 5")
            .unwrap();
        let back = pos.mirrored().unwrap().mirrored().unwrap();
        assert_eq!(pos.key(), back.key());
    }
}
