use chrono::{DateTime, Utc};
use minepot_core::{
    Cell, CellCount, Coord, Coord2, GameError, HistoryRecord, Session, SessionId, SessionResult,
    SessionStatus,
};
use serde::{Deserialize, Serialize};

/// Reference table limits, shared with clients so inputs can be rejected
/// before a request is made.
pub mod limits {
    pub const GRID_SIZE: u8 = 5;
    pub const MIN_MINES: u16 = 1;
    pub const MAX_MINES: u16 = 24;
    pub const MIN_BET: f64 = 1.0;
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub bet: f64,
    pub mine_count: CellCount,
}

/// Coordinates arrive as signed integers; [`RevealCellRequest::coords`]
/// narrows them for the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealCellRequest {
    pub row: i32,
    pub col: i32,
}

impl RevealCellRequest {
    pub fn coords(&self) -> Result<Coord2, GameError> {
        let row = Coord::try_from(self.row).map_err(|_| GameError::OutOfBounds)?;
        let col = Coord::try_from(self.col).map_err(|_| GameError::OutOfBounds)?;
        Ok((row, col))
    }
}

/// What a client may see of one cell. Unrevealed mines stay hidden until the
/// session is terminal; the engine is the only party that knows the layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellView {
    Hidden,
    Gem,
    Mine,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: SessionId,
    pub board: Vec<Vec<CellView>>,
    pub status: SessionStatus,
    pub bet: f64,
    pub mine_count: CellCount,
    pub current_multiplier: f64,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let size = session.size();
        let terminal = session.status().is_terminal();
        let board = (0..size)
            .map(|row| {
                (0..size)
                    .map(|col| cell_view(session.cell_at((row, col)), terminal))
                    .collect()
            })
            .collect();
        Self {
            id: session.id(),
            board,
            status: session.status(),
            bet: session.bet(),
            mine_count: session.mine_count(),
            current_multiplier: session.multiplier(),
        }
    }
}

fn cell_view(cell: Cell, terminal: bool) -> CellView {
    match (cell.revealed, cell.has_mine) {
        (true, true) => CellView::Mine,
        (true, false) => CellView::Gem,
        (false, true) if terminal => CellView::Mine,
        (false, _) => CellView::Hidden,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub game: SessionView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payout: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
}

impl GameResponse {
    pub fn new(session: &Session) -> Self {
        Self {
            game: session.into(),
            payout: None,
            balance: None,
        }
    }

    pub fn with_payout(session: &Session, payout: f64) -> Self {
        Self {
            payout: Some(payout),
            ..Self::new(session)
        }
    }

    pub fn with_balance(session: &Session, balance: f64) -> Self {
        Self {
            balance: Some(balance),
            ..Self::new(session)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub balance: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: SessionId,
    pub bet: f64,
    pub mine_count: CellCount,
    pub payout: f64,
    pub result: SessionResult,
    pub multiplier: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<&HistoryRecord> for HistoryEntry {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            id: record.id,
            bet: record.bet,
            mine_count: record.mine_count,
            payout: record.payout,
            result: record.result,
            multiplier: record.multiplier,
            timestamp: record.timestamp,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}
