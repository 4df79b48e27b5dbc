//! Compilation of the Solidity contracts

pub mod hardhat;
