//! Solidity bindings for the UniswapX contracts this workspace talks to,
//! together with the addresses they are deployed at on each network.

pub mod permit2;
pub mod quoter;
pub mod reactor;

pub mod networks {
    pub const MAINNET: u64 = 1;
    pub const GOERLI: u64 = 5;
    pub const POLYGON: u64 = 137;
    /// Chain id used by the UniswapX team for their forked test network.
    pub const UNISWAP_TESTNET: u64 = 12341234;
}
