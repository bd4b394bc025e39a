pub mod suit;
pub mod rank;
pub mod strain;
pub mod card;
pub mod hand;
pub mod deal;
pub mod call;
pub mod auction;
pub mod io;

pub use suit::Suit;
pub use rank::Rank;
pub use strain::Strain;
pub use card::Card;
pub use hand::Hand;
pub use deal::{Deal, Position};
pub use call::{Call, ParseCallError};
pub use auction::Auction;
