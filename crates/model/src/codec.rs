//! ABI encoding of orders in the exact layout the reactor decodes, and of the
//! reactor's `execute` call data.

use {
    crate::{
        address::InvalidAddress,
        order::{DecayTime, ExclusiveFiller, InputToken, Order, OrderInfo, OutputToken},
        signing::{SignableMessage, create_signable_message},
    },
    alloy::{
        hex,
        primitives::Bytes,
        sol_types::{SolCall, SolValue},
    },
    contracts::reactor,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("order is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("malformed order encoding: {0}")]
    Abi(#[from] alloy::sol_types::Error),
}

/// ABI encodes the order as the single tuple argument
/// `((address,address,uint256,uint256,address,bytes),uint256,uint256,address,uint256,(address,uint256,uint256),(address,uint256,uint256,address)[])`.
pub fn encode_order(order: &Order) -> Bytes {
    reactor::ExclusiveDutchOrder::from(order).abi_encode().into()
}

/// Parses encoded order bytes back into the reactor's tuple layout.
pub fn decode_order(data: &[u8]) -> Result<reactor::ExclusiveDutchOrder, DecodeError> {
    Ok(reactor::ExclusiveDutchOrder::abi_decode(data)?)
}

/// Like [`decode_order`] but from a hex string, with or without `0x`.
pub fn decode_order_hex(data: &str) -> Result<reactor::ExclusiveDutchOrder, DecodeError> {
    decode_order(&hex::decode(data)?)
}

/// Call data for `execute((bytes,bytes))` on the reactor.
pub fn encode_execute(order: &[u8], sig: &[u8]) -> Bytes {
    reactor::IReactor::executeCall {
        order: reactor::SignedOrder {
            order: Bytes::copy_from_slice(order),
            sig: Bytes::copy_from_slice(sig),
        },
    }
    .abi_encode()
    .into()
}

/// Produces everything a swapper needs for an order on one chain.
#[derive(Clone, Copy, Debug)]
pub struct OrderEncoder {
    chain_id: u64,
}

/// An encoded order together with the message the swapper has to sign.
#[derive(Clone, Debug)]
pub struct EncodedOrder {
    pub order: Bytes,
    pub message: SignableMessage,
}

impl OrderEncoder {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn encode(&self, order: &Order) -> EncodedOrder {
        EncodedOrder {
            order: encode_order(order),
            message: create_signable_message(order, self.chain_id),
        }
    }
}

impl From<&Order> for reactor::ExclusiveDutchOrder {
    fn from(order: &Order) -> Self {
        let info = order.info();
        let input = order.input();
        Self {
            info: reactor::OrderInfo {
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
            input: reactor::DutchInput {
                token: input.token(),
                startAmount: input.start_amount(),
                endAmount: input.end_amount(),
            },
            outputs: order
                .outputs()
                .iter()
                .map(|output| reactor::DutchOutput {
                    token: output.token(),
                    startAmount: output.start_amount(),
                    endAmount: output.end_amount(),
                    recipient: output.recipient(),
                })
                .collect(),
        }
    }
}

impl TryFrom<reactor::ExclusiveDutchOrder> for Order {
    type Error = InvalidAddress;

    fn try_from(order: reactor::ExclusiveDutchOrder) -> Result<Self, Self::Error> {
        let reactor::OrderInfo {
            reactor,
            swapper,
            nonce,
            deadline,
            additionalValidationContract,
            additionalValidationData,
        } = order.info;
        let info = OrderInfo::new(reactor, swapper, nonce, deadline)?
            .with_validation(additionalValidationContract, additionalValidationData)?;
        let input = InputToken::new(
            order.input.token,
            order.input.startAmount,
            order.input.endAmount,
        )?;
        let outputs = order
            .outputs
            .into_iter()
            .map(|output| {
                OutputToken::new(
                    output.token,
                    output.startAmount,
                    output.endAmount,
                    output.recipient,
                )
            })
            .collect::<Result<_, _>>()?;
        Ok(Order::new(
            info,
            DecayTime::new(order.decayStartTime, order.decayEndTime),
            input,
            outputs,
            ExclusiveFiller::new(order.exclusiveFiller, order.exclusivityOverrideBps)?,
        ))
    }
}
