use std::collections::HashMap;

use chrono::Utc;
use minepot_core::{
    mult, CellCount, Coord, Coord2, GameError, RandomBoardGenerator, RevealOutcome, Session,
    SessionId,
};
use rand::prelude::*;

use crate::{BalanceLedger, HistoryStore, MemHistory, MemLedger, Result, TableError};

/// Identifies one seat at the table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl core::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Board shape every wager at this table is dealt on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TableRules {
    pub board_size: Coord,
}

impl TableRules {
    pub const fn total_cells(&self) -> CellCount {
        mult(self.board_size, self.board_size)
    }

    pub const fn max_mines(&self) -> CellCount {
        self.total_cells().saturating_sub(1)
    }
}

impl Default for TableRules {
    fn default() -> Self {
        Self { board_size: 5 }
    }
}

#[derive(Clone, Debug)]
struct Seat<L, H> {
    session: Option<Session>,
    ledger: L,
    history: H,
}

impl<L: Default, H: Default> Seat<L, H> {
    fn new() -> Self {
        Self {
            session: None,
            ledger: L::default(),
            history: H::default(),
        }
    }
}

/// Keyed session store plus the ledger and history each seat settles
/// against. All mutation funnels through `&mut self`, which serializes the
/// wager lifecycle per table; share one behind a mutex.
#[derive(Clone, Debug)]
pub struct Table<L = MemLedger, H = MemHistory> {
    rules: TableRules,
    seats: HashMap<PlayerId, Seat<L, H>>,
    seeds: SmallRng,
}

impl<L, H> Table<L, H>
where
    L: BalanceLedger + Default,
    H: HistoryStore + Default,
{
    pub fn new(rules: TableRules) -> Self {
        Self::with_seed(rules, rand::rng().random())
    }

    /// Fixed seed: every board this table deals becomes reproducible.
    pub fn with_seed(rules: TableRules, seed: u64) -> Self {
        Self {
            rules,
            seats: HashMap::new(),
            seeds: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn rules(&self) -> TableRules {
        self.rules
    }

    /// Opens a wager for the seat: validates the bet, checks the funds,
    /// then debits the bet and deals a fresh board in one step.
    pub fn start_game(
        &mut self,
        player: PlayerId,
        bet: f64,
        mine_count: CellCount,
    ) -> Result<&Session> {
        let board_seed: u64 = self.seeds.random();
        let rules = self.rules;
        let seat = self.seats.entry(player).or_insert_with(Seat::new);

        if matches!(&seat.session, Some(session) if session.status().is_active()) {
            return Err(TableError::SessionInProgress);
        }

        let session = Session::start(
            SessionId::new_v4(),
            bet,
            rules.board_size,
            mine_count,
            RandomBoardGenerator::new(board_seed),
        )?;

        let available = seat.ledger.balance();
        if bet > available {
            return Err(TableError::InsufficientBalance { bet, available });
        }

        seat.ledger.debit(bet);
        log::info!(
            "{player}: wagered {bet} on {mine_count} mines (session {})",
            session.id()
        );
        Ok(seat.session.insert(session))
    }

    /// Reveals one cell of the running session. Returns the session and the
    /// amount the move is worth: the potential payout while the session
    /// stays active, the credited payout on a win, zero on a mine.
    pub fn reveal_cell(&mut self, player: PlayerId, coords: Coord2) -> Result<(&Session, f64)> {
        let seat = self.seat_mut(player)?;
        let session = seat.session.as_mut().ok_or(GameError::NoActiveSession)?;

        let outcome = session.reveal(coords)?;
        let payout = match outcome {
            RevealOutcome::Safe { potential_payout } => potential_payout,
            RevealOutcome::Won { payout } => payout,
            RevealOutcome::Lost => 0.0,
        };

        if outcome.is_terminal() {
            if let RevealOutcome::Won { payout } = outcome {
                seat.ledger.credit(payout);
            }
            if let Some(record) = session.history_record(Utc::now()) {
                seat.history.append(record);
            }
            log::info!("{player}: session {} settled at {payout}", session.id());
        }

        Ok((&*session, payout))
    }

    /// Ends the running session at its current multiplier and credits the
    /// payout to the seat.
    pub fn cash_out(&mut self, player: PlayerId) -> Result<(&Session, f64)> {
        let seat = self.seat_mut(player)?;
        let session = seat.session.as_mut().ok_or(GameError::NoActiveSession)?;

        let payout = session.cash_out()?;
        seat.ledger.credit(payout);
        if let Some(record) = session.history_record(Utc::now()) {
            seat.history.append(record);
        }
        log::info!("{player}: cashed out {payout} from session {}", session.id());

        Ok((&*session, payout))
    }

    /// Latest session dealt to the seat, terminal ones included.
    pub fn current_session(&self, player: PlayerId) -> Option<&Session> {
        self.seats.get(&player)?.session.as_ref()
    }

    pub fn balance(&self, player: PlayerId) -> Option<f64> {
        Some(self.seats.get(&player)?.ledger.balance())
    }

    pub fn history(&self, player: PlayerId) -> Option<&H> {
        Some(&self.seats.get(&player)?.history)
    }

    /// Adds funds to the seat, opening it if needed. Returns the new
    /// balance.
    pub fn deposit(&mut self, player: PlayerId, amount: f64) -> Result<f64> {
        if !(amount.is_finite() && amount > 0.0) {
            return Err(TableError::InvalidDeposit);
        }
        let seat = self.seats.entry(player).or_insert_with(Seat::new);
        seat.ledger.credit(amount);
        Ok(seat.ledger.balance())
    }

    /// Demo facility: forces the seat balance to the given amount. The
    /// target must be finite and non-negative; unlike [`Table::deposit`],
    /// zero is allowed.
    pub fn reset_balance(&mut self, player: PlayerId, to: f64) -> Result<f64> {
        if !(to.is_finite() && to >= 0.0) {
            return Err(TableError::InvalidReset);
        }
        let seat = self.seats.entry(player).or_insert_with(Seat::new);
        let current = seat.ledger.balance();
        if to > current {
            seat.ledger.credit(to - current);
        } else {
            seat.ledger.debit(current - to);
        }
        Ok(seat.ledger.balance())
    }

    fn seat_mut(&mut self, player: PlayerId) -> Result<&mut Seat<L, H>> {
        self.seats
            .get_mut(&player)
            .ok_or(TableError::Game(GameError::NoActiveSession))
    }
}
