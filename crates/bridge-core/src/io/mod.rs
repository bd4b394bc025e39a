pub mod hand_parser;
pub mod pbn;
