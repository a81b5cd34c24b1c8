pub mod extract;
pub mod listing;
pub mod util;

pub use extract::*;
pub use listing::*;
pub use util::*;
