//! Occurrence counting for the live game position.
//!
//! Fixed-capacity open addressing with linear probing. Every slot keeps a
//! full snapshot of its position so a hash collision is detected instead of
//! being counted as a repetition. A full table does not grow: further new
//! positions are logged and dropped.

use crate::board::{CastlingRights, Color, Piece, Position};

pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Clone, Copy)]
struct Slot {
    hash: u64,
    side: Color,
    ep: Option<u8>,
    castling: CastlingRights,
    board: [Option<Piece>; 64],
    occurrences: u32,
}

impl Slot {
    fn new(pos: &Position) -> Self {
        Slot {
            hash: pos.hash,
            side: pos.side,
            ep: pos.ep,
            castling: pos.castling,
            board: pos.board,
            occurrences: 1,
        }
    }

    fn matches(&self, pos: &Position) -> bool {
        self.side == pos.side
            && self.ep == pos.ep
            && self.castling == pos.castling
            && self.board == pos.board
    }
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Full,
}

pub struct RepetitionTable {
    slots: Vec<Option<Slot>>,
    mask: usize,
    len: usize,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Capacity is rounded up to a power of two
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = capacity.max(1).next_power_of_two();
        RepetitionTable {
            slots: vec![None; cap],
            mask: cap - 1,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of distinct positions stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.len = 0;
    }

    fn probe(&self, pos: &Position) -> Probe {
        let start = (pos.hash as usize) & self.mask;
        let mut idx = start;
        loop {
            match &self.slots[idx] {
                None => return Probe::Vacant(idx),
                Some(slot) if slot.hash == pos.hash => {
                    if slot.matches(pos) {
                        return Probe::Found(idx);
                    }
                    log::warn!("zobrist hash collision at slot {} (hash {:#018x})", idx, pos.hash);
                }
                Some(_) => {}
            }
            idx = (idx + 1) & self.mask;
            if idx == start {
                return Probe::Full;
            }
        }
    }

    /// Count one more occurrence of `pos`
    pub fn record(&mut self, pos: &Position) {
        match self.probe(pos) {
            Probe::Found(idx) => {
                if let Some(slot) = self.slots[idx].as_mut() {
                    slot.occurrences += 1;
                }
            }
            Probe::Vacant(idx) => {
                self.slots[idx] = Some(Slot::new(pos));
                self.len += 1;
            }
            Probe::Full => {
                log::warn!("repetition table is full ({} slots), position not recorded", self.capacity());
            }
        }
    }

    /// How many times `pos` has been recorded (0 if never, or if the table
    /// filled up before it could be stored)
    pub fn occurrences(&self, pos: &Position) -> u32 {
        match self.probe(pos) {
            Probe::Found(idx) => self.slots[idx].map_or(0, |s| s.occurrences),
            Probe::Vacant(_) => 0,
            Probe::Full => {
                log::warn!("repetition table is full ({} slots)", self.capacity());
                0
            }
        }
    }
}

impl Default for RepetitionTable {
    fn default() -> Self {
        Self::new()
    }
}
