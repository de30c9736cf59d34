pub mod pair;
pub mod status;

pub use pair::*;
pub use status::*;
