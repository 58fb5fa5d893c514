pub use error::*;
pub use history::*;
pub use ledger::*;
pub use manager::*;

mod error;
mod history;
mod ledger;
mod manager;
