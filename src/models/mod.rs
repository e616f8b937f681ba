pub mod bids;
pub mod gigs;
