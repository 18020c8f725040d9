//! UniswapX order discovery API client.
//!
//! The HTTP API is documented at <https://api.uniswap.org/v2/uniswapx/docs>.

use {
    alloy::primitives::{B256, Bytes},
    reqwest::{Client, IntoUrl, Url},
    serde::{Deserialize, Serialize},
    thiserror::Error,
};

/// Lifecycle state of an order as tracked by the API.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Deserialize,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Open,
    Expired,
    Error,
    Cancelled,
    Filled,
    InsufficientFunds,
}

/// Query parameters of `GET /orders`.
#[derive(Clone, Debug)]
pub struct OrdersQuery {
    pub status: OrderStatus,
    /// Maximum number of orders in the response.
    pub limit: usize,
    /// Cursor returned by a previous page.
    pub cursor: Option<String>,
    /// Additional filters such as `swapper` or `sortKey`, passed through as
    /// is.
    pub extra: Vec<(String, String)>,
}

impl Default for OrdersQuery {
    fn default() -> Self {
        Self {
            status: OrderStatus::Open,
            limit: 10,
            cursor: None,
            extra: Vec::new(),
        }
    }
}

impl OrdersQuery {
    const RESERVED: [&'static str; 4] = ["chainId", "orderStatus", "limit", "cursor"];

    /// `GET {base_url}/orders` with the filters of this query.
    fn format_url(&self, base_url: &Url, chain_id: u64) -> Result<Url, url::ParseError> {
        let mut url = base_url.join("orders")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.extra {
                if !Self::RESERVED.contains(&key.as_str()) {
                    pairs.append_pair(key, value);
                }
            }
            pairs
                .append_pair("chainId", &chain_id.to_string())
                .append_pair("orderStatus", &self.status.to_string())
                .append_pair("limit", &self.limit.to_string());
            if let Some(cursor) = &self.cursor {
                pairs.append_pair("cursor", cursor);
            }
        }
        Ok(url)
    }
}

/// An order as listed by the API. Fields this client does not model are
/// kept in `extra`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiOrder {
    pub order_hash: B256,
    pub encoded_order: Bytes,
    pub signature: Bytes,
    pub chain_id: u64,
    pub order_status: OrderStatus,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct OrdersResponse {
    pub orders: Vec<ApiOrder>,
    /// Present when more orders match the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    error_code: Option<String>,
    detail: Option<String>,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid api url: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid api base url: {0}")]
    BaseUrl(reqwest::Error),

    #[error("api returned {status}: {code:?} {detail:?}")]
    Api {
        status: reqwest::StatusCode,
        code: Option<String>,
        detail: Option<String>,
    },

    #[error("unexpected response body ({0}): {1}")]
    Deserialize(serde_json::Error, String),

    /// The body of a received response could not be read.
    #[error("failed to read response body: {0}")]
    TextFetch(reqwest::Error),

    /// No response was received.
    #[error("request failed: {0}")]
    Send(reqwest::Error),
}

/// Abstract UniswapX API. Provides a mockable implementation.
#[mockall::automock]
#[async_trait::async_trait]
pub trait UniswapXApi: Send + Sync {
    /// Retrieves one page of orders matching `query`.
    async fn get_orders(&self, query: &OrdersQuery) -> Result<OrdersResponse, Error>;
}

/// UniswapX API client implementation.
#[derive(Debug, Clone)]
pub struct DefaultUniswapXApi {
    client: Client,
    base_url: Url,
    chain_id: u64,
}

impl DefaultUniswapXApi {
    /// Default UniswapX API URL.
    pub const DEFAULT_URL: &'static str = "https://api.uniswap.org/v2/";

    /// Create a new client listing orders of `chain_id` with the specified
    /// base URL.
    pub fn new(base_url: impl IntoUrl, chain_id: u64, client: Client) -> Result<Self, Error> {
        let mut base_url = base_url.into_url().map_err(Error::BaseUrl)?;
        // `Url::join` replaces the last path segment unless it ends with `/`.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client,
            base_url,
            chain_id,
        })
    }

    pub fn with_default_url(chain_id: u64, client: Client) -> Result<Self, Error> {
        Self::new(Self::DEFAULT_URL, chain_id, client)
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    async fn request<T: for<'a> serde::Deserialize<'a>>(&self, url: Url) -> Result<T, Error> {
        tracing::debug!(%url, "querying UniswapX API");

        let response = self.client.get(url).send().await.map_err(Error::Send)?;
        let status = response.status();
        let response_text = response.text().await.map_err(Error::TextFetch)?;
        tracing::trace!(%status, response = %response_text, "response from UniswapX API");

        if !status.is_success() {
            let error = serde_json::from_str::<ErrorResponse>(&response_text).ok();
            return Err(Error::Api {
                status,
                code: error.as_ref().and_then(|error| error.error_code.clone()),
                detail: error.and_then(|error| error.detail),
            });
        }
        serde_json::from_str(&response_text).map_err(|err| Error::Deserialize(err, response_text))
    }
}

#[async_trait::async_trait]
impl UniswapXApi for DefaultUniswapXApi {
    async fn get_orders(&self, query: &OrdersQuery) -> Result<OrdersResponse, Error> {
        self.request(query.format_url(&self.base_url, self.chain_id)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json, std::str::FromStr, strum::IntoEnumIterator};

    #[test]
    fn default_query_url() {
        let api = DefaultUniswapXApi::with_default_url(1, Client::new()).unwrap();
        let url = OrdersQuery::default()
            .format_url(&api.base_url, api.chain_id)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.uniswap.org/v2/orders?chainId=1&orderStatus=open&limit=10"
        );
    }

    #[test]
    fn query_url_with_filters() {
        let api = DefaultUniswapXApi::new("http://localhost:8080/v2", 137, Client::new()).unwrap();
        let query = OrdersQuery {
            status: OrderStatus::InsufficientFunds,
            limit: 5,
            cursor: Some("abc=".to_string()),
            extra: vec![
                (
                    "swapper".to_string(),
                    "0xcd7328a5D376D5530f054EAF0B9D235a4Fd36059".to_string(),
                ),
                ("chainId".to_string(), "5".to_string()),
            ],
        };
        let url = query.format_url(&api.base_url, api.chain_id).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v2/orders?swapper=0xcd7328a5D376D5530f054EAF0B9D235a4Fd36059&\
             chainId=137&orderStatus=insufficient-funds&limit=5&cursor=abc%3D"
        );
    }

    #[test]
    fn status_names() {
        let names = OrderStatus::iter().map(|status| status.to_string()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "open",
                "expired",
                "error",
                "cancelled",
                "filled",
                "insufficient-funds"
            ]
        );
        for status in OrderStatus::iter() {
            assert_eq!(OrderStatus::from_str(&status.to_string()).unwrap(), status);
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.to_string())
            );
        }
        assert!(OrderStatus::from_str("pending").is_err());
    }

    #[test]
    fn deserialize_orders() {
        let response: OrdersResponse = serde_json::from_value(json!({
            "orders": [{
                "type": "Dutch",
                "orderStatus": "open",
                "signature": "0x39c849e3ddfe618036330549c61cbd232dcbfac040fc734ba7903c2019bba5763f4bca563210f4c55b83ccf114a77dd880a5b5de08428e4800633bf1753216751b",
                "encodedOrder": "0x0000000000000000000000000000000000000000000000000000000000000020",
                "chainId": 1,
                "orderHash": "0xad6458d660510a3b437d609092c457485816b26d50f5ac9cad04fb7d31cae9c5",
                "swapper": "0x5b50cbaaaa89c040bd4aa114cda7dfd85f8c2528",
                "createdAt": 1703579446,
                "outputs": [{
                    "token": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                    "startAmount": "6691446380",
                    "endAmount": "6643550761",
                    "recipient": "0x5b50cbaaaa89c040bd4aa114cda7dfd85f8c2528"
                }]
            }],
            "cursor": "eyJjaGFpbklkIjoxfQ=="
        }))
        .unwrap();

        assert_eq!(response.cursor.as_deref(), Some("eyJjaGFpbklkIjoxfQ=="));
        let order = &response.orders[0];
        assert_eq!(order.order_status, OrderStatus::Open);
        assert_eq!(order.kind, "Dutch");
        assert_eq!(order.chain_id, 1);
        assert_eq!(order.signature.len(), 65);
        assert_eq!(order.encoded_order.len(), 32);
        assert_eq!(order.extra["createdAt"], json!(1703579446));
        assert_eq!(
            order.extra["swapper"],
            json!("0x5b50cbaaaa89c040bd4aa114cda7dfd85f8c2528")
        );
        assert!(!order.extra.contains_key("orderHash"));
    }

    #[test]
    fn deserialize_last_page() {
        let response: OrdersResponse = serde_json::from_value(json!({ "orders": [] })).unwrap();
        assert_eq!(response, OrdersResponse::default());
    }

    #[tokio::test]
    async fn mockable() {
        let mut api = MockUniswapXApi::new();
        api.expect_get_orders()
            .withf(|query| query.status == OrderStatus::Filled)
            .returning(|_| Ok(OrdersResponse::default()));
        let api: Box<dyn UniswapXApi> = Box::new(api);
        let query = OrdersQuery {
            status: OrderStatus::Filled,
            ..Default::default()
        };
        assert!(api.get_orders(&query).await.unwrap().orders.is_empty());
    }

    #[tokio::test]
    #[ignore]
    async fn mainnet_open_orders() {
        let api = DefaultUniswapXApi::with_default_url(1, Client::new()).unwrap();
        let response = api.get_orders(&OrdersQuery::default()).await.unwrap();
        assert!(response.orders.len() <= 10);
        for order in response.orders {
            assert_eq!(order.chain_id, 1);
            assert_eq!(order.order_status, OrderStatus::Open);
        }
    }
}
