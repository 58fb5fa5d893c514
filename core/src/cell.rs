use serde::{Deserialize, Serialize};

/// Player-facing state of one grid cell, composed from the mine mask and the
/// revealed mask on query.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    pub has_mine: bool,
}

impl Cell {
    pub const fn is_revealed_mine(self) -> bool {
        self.revealed && self.has_mine
    }

    pub const fn is_revealed_gem(self) -> bool {
        self.revealed && !self.has_mine
    }
}
