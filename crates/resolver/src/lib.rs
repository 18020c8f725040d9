//! Resolves signed UniswapX orders against the on-chain `OrderQuoter`.
//!
//! Resolving simulates a fill with `eth_call`, which yields the input and
//! output amounts decayed to the timestamp of the queried block, or the
//! reason the reactor would reject the order.

pub mod errors;

pub use {
    contracts::quoter::ResolvedOrder,
    errors::{Error, ErrorKind, FailureSignal, OrderValidationError, classify},
};
use {
    alloy::{
        eips::BlockId,
        primitives::{Address, Bytes},
        providers::{DynProvider, Provider, ProviderBuilder},
    },
    contracts::quoter::{self, OrderQuoter},
    model::{Order, encode_order},
    tracing::instrument,
    url::Url,
};

/// A resolver bound to the quoter of the chain its provider is connected to.
///
/// Cloning is cheap and clones can resolve concurrently.
#[derive(Clone)]
pub struct OrderResolver {
    chain_id: u64,
    quoter: OrderQuoter::OrderQuoterInstance<DynProvider>,
}

impl std::fmt::Debug for OrderResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderResolver")
            .field("chain_id", &self.chain_id)
            .field("quoter", self.quoter.address())
            .finish()
    }
}

impl OrderResolver {
    /// Fetches the chain id from the node and picks the quoter deployed there.
    pub async fn new(provider: DynProvider) -> Result<Self, Error> {
        let chain_id = provider.get_chain_id().await.map_err(Error::ChainId)?;
        let address =
            quoter::deployment_address(chain_id).ok_or(Error::UnsupportedChain(chain_id))?;
        tracing::debug!(chain_id, ?address, "bound order resolver");
        Ok(Self {
            chain_id,
            quoter: OrderQuoter::new(address, provider),
        })
    }

    /// Like [`OrderResolver::new`] with an HTTP provider for `url`.
    pub async fn connect(url: Url) -> Result<Self, Error> {
        Self::new(ProviderBuilder::new().connect_http(url).erased()).await
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn quoter(&self) -> Address {
        *self.quoter.address()
    }

    /// Quotes the encoded order and its signature at `block`.
    #[instrument(skip_all, fields(chain_id = self.chain_id, block = ?block))]
    pub async fn resolve(
        &self,
        order: &[u8],
        sig: &[u8],
        block: BlockId,
    ) -> Result<ResolvedOrder, Error> {
        let result = self
            .quoter
            .quote(Bytes::copy_from_slice(order), Bytes::copy_from_slice(sig))
            .block(block)
            .call()
            .await;
        match result {
            Ok(resolved) => {
                tracing::debug!(
                    hash = ?resolved.hash,
                    outputs = resolved.outputs.len(),
                    "resolved order"
                );
                Ok(resolved)
            }
            Err(err) => {
                let err = errors::classify_quote_error(err);
                tracing::debug!(kind = ?err.kind(), ?err, "order did not resolve");
                Err(err)
            }
        }
    }

    pub async fn resolve_latest(&self, order: &[u8], sig: &[u8]) -> Result<ResolvedOrder, Error> {
        self.resolve(order, sig, BlockId::latest()).await
    }

    /// Encodes `order` and resolves it at `block`.
    pub async fn resolve_order(
        &self,
        order: &Order,
        sig: &[u8],
        block: BlockId,
    ) -> Result<ResolvedOrder, Error> {
        self.resolve(&encode_order(order), sig, block).await
    }
}
