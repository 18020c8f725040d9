//! Value types describing an exclusive dutch order.
//!
//! All types are immutable once built. Constructors normalize addresses and
//! fail with [`InvalidAddress`] on malformed input.

use {
    crate::address::{InvalidAddress, ToAddress, serialize_checksummed},
    alloy::primitives::{Address, B256, Bytes, U256},
    serde::{Deserialize, Serialize},
};

/// Generic order information shared by all UniswapX order types.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    #[serde(serialize_with = "serialize_checksummed")]
    reactor: Address,
    #[serde(serialize_with = "serialize_checksummed")]
    swapper: Address,
    nonce: U256,
    deadline: U256,
    #[serde(
        rename = "additionalValidationContract",
        default,
        serialize_with = "serialize_checksummed"
    )]
    validation_contract: Address,
    #[serde(rename = "additionalValidationData", default)]
    validation_data: Bytes,
}

impl OrderInfo {
    pub fn new(
        reactor: impl ToAddress,
        swapper: impl ToAddress,
        nonce: U256,
        deadline: U256,
    ) -> Result<Self, InvalidAddress> {
        Ok(Self {
            reactor: reactor.to_address()?,
            swapper: swapper.to_address()?,
            nonce,
            deadline,
            validation_contract: Address::ZERO,
            validation_data: Bytes::new(),
        })
    }

    /// Attaches an additional validation contract that the reactor calls
    /// with `data` before filling.
    pub fn with_validation(
        self,
        contract: impl ToAddress,
        data: impl Into<Bytes>,
    ) -> Result<Self, InvalidAddress> {
        Ok(Self {
            validation_contract: contract.to_address()?,
            validation_data: data.into(),
            ..self
        })
    }

    pub fn reactor(&self) -> Address {
        self.reactor
    }

    pub fn swapper(&self) -> Address {
        self.swapper
    }

    pub fn nonce(&self) -> U256 {
        self.nonce
    }

    pub fn deadline(&self) -> U256 {
        self.deadline
    }

    /// The zero address means no additional validation.
    pub fn validation_contract(&self) -> Address {
        self.validation_contract
    }

    pub fn validation_data(&self) -> &Bytes {
        &self.validation_data
    }
}

/// The window over which output amounts decay. `start <= end` is expected
/// but left for the reactor to enforce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayTime {
    #[serde(rename = "decayStartTime")]
    start: U256,
    #[serde(rename = "decayEndTime")]
    end: U256,
}

impl DecayTime {
    pub fn new(start: U256, end: U256) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> U256 {
        self.start
    }

    pub fn end(&self) -> U256 {
        self.end
    }
}

/// The token the swapper sells. For exclusive dutch orders the input does
/// not decay in practice, so both amounts are usually equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputToken {
    #[serde(serialize_with = "serialize_checksummed")]
    token: Address,
    start_amount: U256,
    end_amount: U256,
}

impl InputToken {
    pub fn new(
        token: impl ToAddress,
        start_amount: U256,
        end_amount: U256,
    ) -> Result<Self, InvalidAddress> {
        Ok(Self {
            token: token.to_address()?,
            start_amount,
            end_amount,
        })
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn start_amount(&self) -> U256 {
        self.start_amount
    }

    pub fn end_amount(&self) -> U256 {
        self.end_amount
    }
}

/// A token paid out to `recipient` whose amount decays from `start_amount`
/// to `end_amount`. The zero token address denotes native ETH.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputToken {
    #[serde(serialize_with = "serialize_checksummed")]
    token: Address,
    start_amount: U256,
    end_amount: U256,
    #[serde(serialize_with = "serialize_checksummed")]
    recipient: Address,
}

impl OutputToken {
    pub fn new(
        token: impl ToAddress,
        start_amount: U256,
        end_amount: U256,
        recipient: impl ToAddress,
    ) -> Result<Self, InvalidAddress> {
        Ok(Self {
            token: token.to_address()?,
            start_amount,
            end_amount,
            recipient: recipient.to_address()?,
        })
    }

    pub fn token(&self) -> Address {
        self.token
    }

    pub fn start_amount(&self) -> U256 {
        self.start_amount
    }

    pub fn end_amount(&self) -> U256 {
        self.end_amount
    }

    pub fn recipient(&self) -> Address {
        self.recipient
    }
}

/// Filler allowed to fill the order before the decay starts. A zero filler
/// means the order is open to everyone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveFiller {
    #[serde(serialize_with = "serialize_checksummed")]
    filler: Address,
    /// Basis points other fillers must improve on the outputs by to override
    /// the exclusivity, in `[0, 10000]`.
    override_bps: U256,
}

impl ExclusiveFiller {
    pub fn new(filler: impl ToAddress, override_bps: U256) -> Result<Self, InvalidAddress> {
        Ok(Self {
            filler: filler.to_address()?,
            override_bps,
        })
    }

    pub fn filler(&self) -> Address {
        self.filler
    }

    pub fn override_bps(&self) -> U256 {
        self.override_bps
    }
}

/// An exclusive dutch order. Outputs are kept in order since their position
/// is part of both the encoding and the signed hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    info: OrderInfo,
    decay_time: DecayTime,
    input: InputToken,
    outputs: Vec<OutputToken>,
    #[serde(default)]
    exclusive_filler: ExclusiveFiller,
}

impl Order {
    pub fn new(
        info: OrderInfo,
        decay_time: DecayTime,
        input: InputToken,
        outputs: Vec<OutputToken>,
        exclusive_filler: ExclusiveFiller,
    ) -> Self {
        Self {
            info,
            decay_time,
            input,
            outputs,
            exclusive_filler,
        }
    }

    pub fn info(&self) -> &OrderInfo {
        &self.info
    }

    pub fn decay_time(&self) -> &DecayTime {
        &self.decay_time
    }

    pub fn input(&self) -> &InputToken {
        &self.input
    }

    pub fn outputs(&self) -> &[OutputToken] {
        &self.outputs
    }

    pub fn exclusive_filler(&self) -> &ExclusiveFiller {
        &self.exclusive_filler
    }

    /// The order hash the reactor computes on-chain. It is the EIP-712
    /// struct hash of the order as Permit2 witness.
    pub fn hash(&self) -> B256 {
        use alloy::sol_types::SolStruct;
        crate::signing::witness(self).eip712_hash_struct()
    }
}
