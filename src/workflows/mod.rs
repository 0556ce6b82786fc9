pub mod lottery;
pub mod roster;
