/// Balance every new seat opens with.
pub const STARTING_BALANCE: f64 = 1000.0;

/// Funds a seat settles against. The table checks the balance before any
/// debit, so implementations never see a debit exceeding it.
pub trait BalanceLedger {
    fn debit(&mut self, amount: f64);
    fn credit(&mut self, amount: f64);
    fn balance(&self) -> f64;
}

/// Demo ledger holding a single in-memory balance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MemLedger {
    funds: f64,
}

impl MemLedger {
    pub const fn new(funds: f64) -> Self {
        Self { funds }
    }
}

impl Default for MemLedger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl BalanceLedger for MemLedger {
    fn debit(&mut self, amount: f64) {
        debug_assert!(amount <= self.funds);
        self.funds -= amount;
    }

    fn credit(&mut self, amount: f64) {
        self.funds += amount;
    }

    fn balance(&self) -> f64 {
        self.funds
    }
}
