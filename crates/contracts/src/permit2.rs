//! EIP-712 types signed by swappers. The order travels as the witness of a
//! Permit2 `permitWitnessTransferFrom`, so the struct and field names below
//! take part in the signed hash and must match the reactor's type strings.

use alloy::primitives::{Address, address};

/// Permit2 is deployed at the same address on every network.
pub const PERMIT2: Address = address!("0x000000000022D473030F116dDEE9F6B43aC78BA3");

/// EIP-712 domain name of the Permit2 contract.
pub const DOMAIN_NAME: &str = "Permit2";

alloy::sol! {
    #![sol(all_derives)]

    struct TokenPermissions {
        address token;
        uint256 amount;
    }

    struct OrderInfo {
        address reactor;
        address swapper;
        uint256 nonce;
        uint256 deadline;
        address additionalValidationContract;
        bytes additionalValidationData;
    }

    struct DutchOutput {
        address token;
        uint256 startAmount;
        uint256 endAmount;
        address recipient;
    }

    /// Unlike the ABI struct, the witness flattens the input token.
    struct ExclusiveDutchOrder {
        OrderInfo info;
        uint256 decayStartTime;
        uint256 decayEndTime;
        address exclusiveFiller;
        uint256 exclusivityOverrideBps;
        address inputToken;
        uint256 inputStartAmount;
        uint256 inputEndAmount;
        DutchOutput[] outputs;
    }

    struct PermitWitnessTransferFrom {
        TokenPermissions permitted;
        address spender;
        uint256 nonce;
        uint256 deadline;
        ExclusiveDutchOrder witness;
    }
}
