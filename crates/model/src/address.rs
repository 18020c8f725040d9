//! Normalization of the loosely typed address representations accepted by
//! the order constructors.

use {alloy::primitives::Address, thiserror::Error};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid address: {0}")]
pub struct InvalidAddress(pub String);

/// Anything that can be turned into a 20 byte address: an [`Address`], a hex
/// string in any letter case with or without `0x` prefix, or a byte slice of
/// exactly 20 bytes.
///
/// The checksum of mixed case strings is not verified, any hex digits are
/// accepted and the resulting [`Address`] always displays checksummed.
pub trait ToAddress {
    fn to_address(&self) -> Result<Address, InvalidAddress>;
}

impl ToAddress for Address {
    fn to_address(&self) -> Result<Address, InvalidAddress> {
        Ok(*self)
    }
}

impl ToAddress for str {
    fn to_address(&self) -> Result<Address, InvalidAddress> {
        let hex = self.strip_prefix("0x").unwrap_or(self);
        if hex.len() != 40 {
            return Err(InvalidAddress(self.to_owned()));
        }
        hex.parse().map_err(|_| InvalidAddress(self.to_owned()))
    }
}

impl ToAddress for String {
    fn to_address(&self) -> Result<Address, InvalidAddress> {
        self.as_str().to_address()
    }
}

impl ToAddress for [u8] {
    fn to_address(&self) -> Result<Address, InvalidAddress> {
        Address::try_from(self).map_err(|_| InvalidAddress(alloy::hex::encode_prefixed(self)))
    }
}

impl ToAddress for [u8; 20] {
    fn to_address(&self) -> Result<Address, InvalidAddress> {
        Ok(Address::from(*self))
    }
}

impl ToAddress for Vec<u8> {
    fn to_address(&self) -> Result<Address, InvalidAddress> {
        self.as_slice().to_address()
    }
}

impl<T: ToAddress + ?Sized> ToAddress for &T {
    fn to_address(&self) -> Result<Address, InvalidAddress> {
        (**self).to_address()
    }
}

/// Serializes an address as its EIP-55 checksummed string.
pub fn serialize_checksummed<S: serde::Serializer>(
    address: &Address,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&address.to_checksum(None))
}
