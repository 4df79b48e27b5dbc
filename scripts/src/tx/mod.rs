//! On-chain side of the scripts

pub mod client;
pub mod deployer;
