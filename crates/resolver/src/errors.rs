//! Classification of failed order quotes.
//!
//! The quoter reverts with whatever the reactor reverted with, so a failed
//! quote carries either a custom error of one of the UniswapX contracts or a
//! string revert from a token transfer.

use {
    alloy::{
        contract::Error as ContractError,
        hex,
        primitives::{Bytes, FixedBytes},
        sol_types::{Panic, Revert, SolError},
        transports::RpcError,
    },
    thiserror::Error,
};

/// Revert reason of the Solmate/Permit2 safe transfer helpers when the
/// swapper lacks the balance or allowance.
pub const TRANSFER_FROM_FAILED: &str = "TRANSFER_FROM_FAILED";

/// Why the reactor would refuse to fill an order. All kinds are terminal for
/// the quoted order, signature and block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ErrorKind {
    #[strum(to_string = "Invalid Signature")]
    InvalidSignature,
    #[strum(to_string = "Invalid Nonce")]
    NonceUsed,
    #[strum(to_string = "Invalid Order Fields")]
    InvalidOrderFields,
    #[strum(to_string = "Expired Order")]
    ExpiredOrder,
    #[strum(to_string = "Validation Failed")]
    ValidationFailed,
    #[strum(to_string = "Exclusivity Period")]
    ExclusivityPeriod,
    #[strum(to_string = "Insufficient Funds")]
    InsufficientFunds,
    /// A custom error no other kind covers.
    #[strum(to_string = "Order Validation Error")]
    Unclassified,
}

/// What a failed simulation told us.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureSignal<'a> {
    /// Selector of a custom error revert.
    Selector(FixedBytes<4>),
    /// Reason of a string revert or the node's error message.
    Reason(&'a str),
}

/// Maps a failure to its kind. New contract errors get appended here.
pub fn classify(signal: &FailureSignal) -> ErrorKind {
    match signal {
        FailureSignal::Selector(selector) => match selector.0 {
            // InvalidSignature(), InvalidSigner()
            [0x8b, 0xaa, 0x57, 0x9f] | [0x81, 0x5e, 0x1d, 0x64] => ErrorKind::InvalidSignature,
            // InvalidNonce(), OrderAlreadyFilled()
            [0x75, 0x66, 0x88, 0xfe] | [0xee, 0x3b, 0x3d, 0x4b] => ErrorKind::NonceUsed,
            // DeadlineBeforeEndTime(), InvalidReactor(), InputAndOutputDecay(),
            // IncorrectAmounts(), EndTimeBeforeStartTime(),
            // OrderEndTimeBeforeStartTime()
            [0x30, 0x2e, 0x5b, 0x7c]
            | [0x77, 0x3a, 0x61, 0x87]
            | [0x4d, 0xdf, 0x4a, 0x64]
            | [0xd3, 0x03, 0x75, 0x8b]
            | [0x7c, 0x1f, 0x81, 0x13]
            | [0x43, 0x13, 0x34, 0x53]
            | [0x48, 0xfe, 0xe6, 0x9c] => ErrorKind::InvalidOrderFields,
            // DeadlinePassed()
            [0x70, 0xf6, 0x5c, 0xaa] => ErrorKind::ExpiredOrder,
            // ValidationFailed()
            [0x0a, 0x0b, 0x0d, 0x79] => ErrorKind::ValidationFailed,
            // NoExclusiveOverride(), NotExclusiveFiller(), NotExclusiveFiller(address)
            [0xb9, 0xec, 0x1e, 0x96] | [0x06, 0x2d, 0xec, 0x56] | [0x75, 0xc1, 0xbb, 0x14] => {
                ErrorKind::ExclusivityPeriod
            }
            _ => ErrorKind::Unclassified,
        },
        FailureSignal::Reason(reason) if reason.contains(TRANSFER_FROM_FAILED) => {
            ErrorKind::InsufficientFunds
        }
        FailureSignal::Reason(_) => ErrorKind::Unclassified,
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct OrderValidationError {
    pub kind: ErrorKind,
    /// The custom error selector as hex or the revert reason.
    pub message: String,
    /// Raw revert data, empty when the node only returned a message.
    pub data: Bytes,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] OrderValidationError),
    /// Anything that could not be classified, including node and transport
    /// failures, exactly as returned.
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error("could not fetch chain id: {0}")]
    ChainId(#[source] alloy::transports::TransportError),
    #[error("no order quoter deployed on chain {0}")]
    UnsupportedChain(u64),
}

impl Error {
    /// The validation failure kind, if the order was rejected.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Validation(err) => Some(err.kind),
            _ => None,
        }
    }
}

/// Turns a failed `quote` call into a validation error where possible.
pub(crate) fn classify_quote_error(err: ContractError) -> Error {
    if let Some(data) = err.as_revert_data() {
        if let Some(classified) = classify_revert(&data) {
            return classified.into();
        }
    } else if let Some(message) = node_message(&err) {
        if classify(&FailureSignal::Reason(message)) == ErrorKind::InsufficientFunds {
            return OrderValidationError {
                kind: ErrorKind::InsufficientFunds,
                message: message.to_owned(),
                data: Bytes::new(),
            }
            .into();
        }
    }
    Error::Contract(err)
}

fn classify_revert(data: &Bytes) -> Option<OrderValidationError> {
    let selector = FixedBytes::<4>::try_from(data.get(..4)?).ok()?;
    if selector.0 == Panic::SELECTOR {
        return None;
    }
    if selector.0 == Revert::SELECTOR {
        let revert = Revert::abi_decode(data).ok()?;
        if classify(&FailureSignal::Reason(&revert.reason)) != ErrorKind::InsufficientFunds {
            return None;
        }
        return Some(OrderValidationError {
            kind: ErrorKind::InsufficientFunds,
            message: revert.reason,
            data: data.clone(),
        });
    }
    Some(OrderValidationError {
        kind: classify(&FailureSignal::Selector(selector)),
        message: hex::encode_prefixed(selector),
        data: data.clone(),
    })
}

fn node_message(err: &ContractError) -> Option<&str> {
    match err {
        ContractError::TransportError(RpcError::ErrorResp(payload)) => Some(payload.message.as_ref()),
        _ => None,
    }
}
