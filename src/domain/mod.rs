mod expense;
mod itinerary;
mod ledger;
mod member;
mod money;
mod split;
mod trip;

pub use expense::*;
pub use itinerary::*;
pub use ledger::*;
pub use member::*;
pub use money::*;
pub use split::*;
pub use trip::*;
