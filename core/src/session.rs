use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::*;

pub type SessionId = Uuid;

/// Wager lifecycle. Valid transitions: `Active` to any of `Won`, `Lost`,
/// `CashedOut`; nothing leaves a terminal state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Won,
    Lost,
    CashedOut,
}

impl SessionStatus {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::CashedOut)
    }

    /// Terminal result for the history record, `None` while the wager runs.
    pub const fn result(self) -> Option<SessionResult> {
        match self {
            Self::Active => None,
            Self::Won => Some(SessionResult::Won),
            Self::Lost => Some(SessionResult::Lost),
            Self::CashedOut => Some(SessionResult::CashedOut),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionResult {
    Won,
    Lost,
    CashedOut,
}

/// Outcome of one reveal. `Safe` carries the amount a cash-out would pay
/// right now, `Won` the final payout, `Lost` forfeits the bet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    Safe { potential_payout: f64 },
    Won { payout: f64 },
    Lost,
}

impl RevealOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won { .. } | Self::Lost)
    }
}

/// Log entry produced once per session, at the terminal transition. The
/// engine builds the content; storing it belongs to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: SessionId,
    pub bet: f64,
    pub mine_count: CellCount,
    pub payout: f64,
    pub result: SessionResult,
    pub multiplier: f64,
    pub timestamp: DateTime<Utc>,
}

/// One wager from bet placement to its terminal state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    mines: MineField,
    revealed: Array2<bool>,
    revealed_safe: CellCount,
    status: SessionStatus,
    bet: f64,
    multiplier: f64,
}

impl Session {
    /// Opens a session over a freshly generated board.
    pub fn start<G: BoardGenerator>(
        id: SessionId,
        bet: f64,
        size: Coord,
        mine_count: CellCount,
        generator: G,
    ) -> Result<Self> {
        check_bet(bet)?;
        check_mine_count(mine_count, mult(size, size))?;
        let spec = BoardSpec::new_unchecked(size, mine_count);
        Ok(Self::new_unchecked(id, bet, generator.generate(spec)))
    }

    /// Opens a session over a pre-built field. Used for deterministic
    /// boards; validation matches [`Session::start`].
    pub fn with_field(id: SessionId, bet: f64, mines: MineField) -> Result<Self> {
        check_bet(bet)?;
        check_mine_count(mines.mine_count(), mines.total_cells())?;
        Ok(Self::new_unchecked(id, bet, mines))
    }

    fn new_unchecked(id: SessionId, bet: f64, mines: MineField) -> Self {
        let size = mines.size();
        log::debug!(
            "session {id}: opened with bet {bet} and {} mines on a {size}x{size} board",
            mines.mine_count()
        );
        Self {
            id,
            mines,
            revealed: Array2::default((size, size).to_nd_index()),
            revealed_safe: 0,
            status: SessionStatus::Active,
            bet,
            multiplier: 1.0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn size(&self) -> Coord {
        self.mines.size()
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.total_cells()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines.mine_count()
    }

    pub fn revealed_safe_count(&self) -> CellCount {
        self.revealed_safe
    }

    /// `bet * multiplier`: the amount a cash-out would lock in, and the
    /// final payout for `Won`/`CashedOut` sessions. A `Lost` wager pays 0
    /// even though the frozen multiplier stays readable here; the mapping
    /// lives in [`Session::history_record`].
    pub fn potential_payout(&self) -> f64 {
        self.bet * self.multiplier
    }

    /// Coords must be in bounds.
    pub fn cell_at(&self, coords: Coord2) -> Cell {
        Cell {
            revealed: self.revealed[coords.to_nd_index()],
            has_mine: self.mines.contains_mine(coords),
        }
    }

    pub fn is_won(&self) -> bool {
        self.revealed_safe == self.mines.safe_cell_count()
    }

    /// Reveals one cell. Precondition failures leave the session untouched.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_active()?;
        let coords = self.mines.validate_coords(coords)?;
        let index = coords.to_nd_index();
        if self.revealed[index] {
            return Err(GameError::CellAlreadyRevealed);
        }

        self.revealed[index] = true;

        if self.mines.contains_mine(coords) {
            self.status = SessionStatus::Lost;
            log::debug!("session {}: mine at {:?}, bet forfeited", self.id, coords);
            return Ok(RevealOutcome::Lost);
        }

        self.revealed_safe += 1;
        self.multiplier = payout::multiplier(
            self.revealed_safe,
            self.mines.total_cells(),
            self.mines.mine_count(),
        );

        if self.is_won() {
            self.status = SessionStatus::Won;
            log::debug!(
                "session {}: board cleared at x{:.4}",
                self.id,
                self.multiplier
            );
            Ok(RevealOutcome::Won {
                payout: self.potential_payout(),
            })
        } else {
            Ok(RevealOutcome::Safe {
                potential_payout: self.potential_payout(),
            })
        }
    }

    /// Ends the wager voluntarily, locking in the current multiplier.
    pub fn cash_out(&mut self) -> Result<f64> {
        self.check_active()?;
        self.status = SessionStatus::CashedOut;
        log::debug!(
            "session {}: cashed out at x{:.4}",
            self.id,
            self.multiplier
        );
        Ok(self.potential_payout())
    }

    /// Record content for a terminal session, stamped with `timestamp`.
    pub fn history_record(&self, timestamp: DateTime<Utc>) -> Option<HistoryRecord> {
        let result = self.status.result()?;
        let payout = match result {
            SessionResult::Lost => 0.0,
            SessionResult::Won | SessionResult::CashedOut => self.potential_payout(),
        };
        Some(HistoryRecord {
            id: self.id,
            bet: self.bet,
            mine_count: self.mines.mine_count(),
            payout,
            result,
            multiplier: self.multiplier,
            timestamp,
        })
    }

    fn check_active(&self) -> Result<()> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(GameError::NoActiveSession)
        }
    }
}

fn check_bet(bet: f64) -> Result<()> {
    if bet.is_finite() && bet > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidBet)
    }
}

fn check_mine_count(mines: CellCount, total: CellCount) -> Result<()> {
    if mines >= 1 && mines < total {
        Ok(())
    } else {
        Err(GameError::InvalidMineCount)
    }
}
