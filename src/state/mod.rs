pub mod details;
pub mod game_match;
pub mod object;
pub mod tournament;

pub use details::*;
pub use game_match::*;
pub use object::*;
pub use tournament::*;
