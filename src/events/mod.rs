pub mod inbound;
pub mod kill;
pub mod outbound;
