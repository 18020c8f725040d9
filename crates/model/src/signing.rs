//! The Permit2 `PermitWitnessTransferFrom` typed data a swapper signs to
//! authorize the reactor to pull the input token for a given order.

use {
    crate::order::Order,
    alloy::{
        primitives::{Address, B256, Signature, SignatureError, U256},
        sol_types::{Eip712Domain, SolStruct},
    },
    contracts::permit2,
    std::borrow::Cow,
};

/// The Permit2 domain on `chain_id`. Permit2 does not use a version.
pub fn permit2_domain(chain_id: u64) -> Eip712Domain {
    Eip712Domain::new(
        Some(Cow::Borrowed(permit2::DOMAIN_NAME)),
        None,
        Some(U256::from(chain_id)),
        Some(permit2::PERMIT2),
        None,
    )
}

/// The witness part of the permit. Its struct hash is the order hash.
pub(crate) fn witness(order: &Order) -> permit2::ExclusiveDutchOrder {
    let info = order.info();
    let input = order.input();
    permit2::ExclusiveDutchOrder {
        info: permit2::OrderInfo {
            reactor: info.reactor(),
            swapper: info.swapper(),
            nonce: info.nonce(),
            deadline: info.deadline(),
            additionalValidationContract: info.validation_contract(),
            additionalValidationData: info.validation_data().clone(),
        },
        decayStartTime: order.decay_time().start(),
        decayEndTime: order.decay_time().end(),
        exclusiveFiller: order.exclusive_filler().filler(),
        exclusivityOverrideBps: order.exclusive_filler().override_bps(),
        inputToken: input.token(),
        inputStartAmount: input.start_amount(),
        inputEndAmount: input.end_amount(),
        outputs: order
            .outputs()
            .iter()
            .map(|output| permit2::DutchOutput {
                token: output.token(),
                startAmount: output.start_amount(),
                endAmount: output.end_amount(),
                recipient: output.recipient(),
            })
            .collect(),
    }
}

/// Typed data ready to be signed by the swapper.
#[derive(Clone, Debug)]
pub struct SignableMessage {
    pub domain: Eip712Domain,
    pub message: permit2::PermitWitnessTransferFrom,
}

/// Builds the permit for `order` on `chain_id`. The permitted amount is the
/// input end amount and the spender is the order's reactor.
pub fn create_signable_message(order: &Order, chain_id: u64) -> SignableMessage {
    let info = order.info();
    SignableMessage {
        domain: permit2_domain(chain_id),
        message: permit2::PermitWitnessTransferFrom {
            permitted: permit2::TokenPermissions {
                token: order.input().token(),
                amount: order.input().end_amount(),
            },
            spender: info.reactor(),
            nonce: info.nonce(),
            deadline: info.deadline(),
            witness: witness(order),
        },
    }
}

impl SignableMessage {
    pub fn domain_separator(&self) -> B256 {
        self.domain.hash_struct()
    }

    pub fn struct_hash(&self) -> B256 {
        self.message.eip712_hash_struct()
    }

    /// `keccak256(0x1901 || domain_separator || struct_hash)`, the digest
    /// the swapper's key signs.
    pub fn signing_hash(&self) -> B256 {
        self.message.eip712_signing_hash(&self.domain)
    }

    /// The address that produced `signature` over this message.
    pub fn recover(&self, signature: &Signature) -> Result<Address, SignatureError> {
        signature.recover_address_from_prehash(&self.signing_hash())
    }
}
