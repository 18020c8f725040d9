//! Exclusive dutch orders: the order values, their ABI encoding for the
//! reactor and the Permit2 message a swapper signs for them.

pub mod address;
pub mod codec;
pub mod nonce;
pub mod order;
pub mod signing;

pub use {
    address::{InvalidAddress, ToAddress},
    codec::{DecodeError, EncodedOrder, OrderEncoder, decode_order, encode_execute, encode_order},
    nonce::{DEFAULT_DEADLINE_DURATION, generate_nonce, get_deadline, get_default_deadline},
    order::{DecayTime, ExclusiveFiller, InputToken, Order, OrderInfo, OutputToken},
    signing::{SignableMessage, create_signable_message},
};
