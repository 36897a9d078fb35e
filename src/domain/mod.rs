mod clock;
mod ledger;
mod money;
mod query;
mod record;

pub use clock::*;
pub use ledger::*;
pub use money::*;
pub use query::*;
pub use record::*;
