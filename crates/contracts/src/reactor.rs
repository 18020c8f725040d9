//! ABI layout of the exclusive dutch order as consumed by the
//! `ExclusiveDutchOrderReactor`, plus the reactor's `execute` entry point.
//!
//! Field order is part of the wire format and mirrors the on-chain structs.

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

    struct DutchInput {
        address token;
        uint256 startAmount;
        uint256 endAmount;
    }

    struct DutchOutput {
        address token;
        uint256 startAmount;
        uint256 endAmount;
        address recipient;
    }

    struct ExclusiveDutchOrder {
        OrderInfo info;
        uint256 decayStartTime;
        uint256 decayEndTime;
        address exclusiveFiller;
        uint256 exclusivityOverrideBps;
        DutchInput input;
        DutchOutput[] outputs;
    }

    struct SignedOrder {
        bytes order;
        bytes sig;
    }

    interface IReactor {
        function execute(SignedOrder calldata order) external payable;
    }
}

/// Known `ExclusiveDutchOrderReactor` deployments.
pub static DEPLOYMENT_INFO: LazyLock<HashMap<u64, Address>> = LazyLock::new(|| {
    maplit::hashmap! {
        MAINNET => address!("0x6000da47483062A0D734Ba3dc7576Ce6A0B645C4"),
    }
});

/// Returns the reactor deployed on `chain_id`, if any.
pub fn deployment_address(chain_id: u64) -> Option<Address> {
    DEPLOYMENT_INFO.get(&chain_id).copied()
}
