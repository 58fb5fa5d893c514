use crate::*;
pub use random::*;

mod random;

/// Produces the mine placement for one session. Implementations consume
/// themselves; independent boards come from independent generator values.
pub trait BoardGenerator {
    fn generate(self, spec: BoardSpec) -> MineField;
}
