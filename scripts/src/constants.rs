//! Constants used in the deploy scripts

/// Default RPC endpoint, a local Hardhat node
pub const DEFAULT_RPC: &str = "http://127.0.0.1:8545";

/// Where `hardhat compile` writes its artifacts, relative to the project root
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Confirmations to wait for before a contract counts as live
pub const DEFAULT_CONFIRMATIONS: u64 = 1;

/// Seconds to wait for a deployment receipt
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

/// The marketplace purchase token
pub const NALNDA_TOKEN: &str = "NalndaToken";

/// Factory for the marketplace contracts
pub const MARKETPLACE_FACTORY: &str = "MarketplaceFactory";

/// Contracts deployed by the scripts, in deployment order
pub const DEPLOYMENT_ORDER: [&str; 2] = [NALNDA_TOKEN, MARKETPLACE_FACTORY];
