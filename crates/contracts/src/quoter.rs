//! The `OrderQuoter` lens contract. It simulates a fill of a signed order
//! and reverts with the resolved order, which the contract catches and
//! returns; any validation failure bubbles up as the reactor's revert.

use {
    crate::networks::*,
    alloy::primitives::{Address, address},
    std::{collections::HashMap, sync::LazyLock},
};

alloy::sol! {
    #![sol(all_derives)]

    struct OrderInfo {
        address reactor;
        address swapper;
        uint256 nonce;
        uint256 deadline;
        address additionalValidationContract;
        bytes additionalValidationData;
    }

    struct InputToken {
        address token;
        uint256 amount;
        uint256 maxAmount;
    }

    struct OutputToken {
        address token;
        uint256 amount;
        address recipient;
    }

    struct ResolvedOrder {
        OrderInfo info;
        InputToken input;
        OutputToken[] outputs;
        bytes sig;
        bytes32 hash;
    }

    #[sol(rpc)]
    interface OrderQuoter {
        function quote(bytes memory order, bytes memory sig) external returns (ResolvedOrder memory result);
    }
}

/// Known `OrderQuoter` deployments.
pub static DEPLOYMENT_INFO: LazyLock<HashMap<u64, Address>> = LazyLock::new(|| {
    let mainnet = address!("0x54539967a06Fc0E3C3ED0ee320Eb67362D13C5fF");
    maplit::hashmap! {
        MAINNET => mainnet,
        GOERLI => mainnet,
        POLYGON => mainnet,
        UNISWAP_TESTNET => address!("0xbea0901A41177811b099F787D753436b2c47690E"),
    }
});

/// Returns the quoter deployed on `chain_id`, if any.
pub fn deployment_address(chain_id: u64) -> Option<Address> {
    DEPLOYMENT_INFO.get(&chain_id).copied()
}
