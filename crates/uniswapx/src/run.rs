use {
    crate::arguments::{Arguments, Command},
    alloy::{
        eips::BlockId,
        primitives::{Address, B256, Bytes, Signature, U256},
    },
    anyhow::{Context, Result},
    clap::Parser,
    model::{
        Order,
        OrderEncoder,
        create_signable_message,
        decode_order,
        encode_execute,
        generate_nonce,
        get_deadline,
    },
    orders_api::{DefaultUniswapXApi, OrderStatus, OrdersQuery, OrdersResponse, UniswapXApi},
    resolver::{OrderResolver, ResolvedOrder},
    serde::Serialize,
    serde_with::{DisplayFromStr, serde_as},
    std::{io::Read, path::Path},
};

pub async fn start(args: impl Iterator<Item = String>) -> Result<()> {
    let args = Arguments::parse_from(args);
    observe::tracing::initialize(&args.observe());
    tracing::debug!("running uniswapx with arguments:\n{}", args);
    run(args).await
}

pub async fn run(args: Arguments) -> Result<()> {
    match &args.command {
        Command::Encode { file } => {
            let order = read_order(file.as_deref())?;
            check_reactor(&order, args.chain_id);
            print_json(&encode(&order, args.chain_id))
        }
        Command::Decode { order } => print_json(&decode(order)?),
        Command::Hash { order, signature } => {
            print_json(&hash(order, signature.as_ref(), args.chain_id)?)
        }
        Command::ExecuteData { order, signature } => {
            println!("{}", encode_execute(order, signature));
            Ok(())
        }
        Command::Nonce => {
            println!("{}", generate_nonce());
            Ok(())
        }
        Command::Deadline { duration } => {
            println!("{}", get_deadline(*duration));
            Ok(())
        }
        Command::Resolve {
            order,
            signature,
            block,
        } => {
            let resolver = OrderResolver::connect(args.node_url.clone())
                .await
                .context("failed to bind order resolver")?;
            if resolver.chain_id() != args.chain_id {
                tracing::warn!(
                    node = resolver.chain_id(),
                    configured = args.chain_id,
                    "node is connected to a different chain"
                );
            }
            let block = match block {
                Some(number) => BlockId::number(*number),
                None => BlockId::latest(),
            };
            let resolved = resolver
                .resolve(order, signature, block)
                .await
                .context("order did not resolve")?;
            print_json(&Resolved::from(resolved))
        }
        Command::Orders {
            status,
            limit,
            cursor,
            swapper,
        } => {
            let api = DefaultUniswapXApi::new(
                args.api_url.clone(),
                args.chain_id,
                reqwest::Client::new(),
            )?;
            let query = orders_query(*status, *limit, cursor.clone(), swapper.clone());
            print_json(&list_orders(&api, &query).await?)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_order(file: Option<&Path>) -> Result<Order> {
    let json = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("failed to read stdin")?;
            json
        }
    };
    serde_json::from_str(&json).context("invalid order JSON")
}

fn check_reactor(order: &Order, chain_id: u64) {
    let reactor = order.info().reactor();
    if contracts::reactor::deployment_address(chain_id).is_some_and(|known| known != reactor) {
        tracing::warn!(?reactor, chain_id, "order is not addressed to the known reactor");
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Encoded {
    encoded_order: Bytes,
    order_hash: B256,
    signing_hash: B256,
    domain_separator: B256,
}

fn encode(order: &Order, chain_id: u64) -> Encoded {
    let encoded = OrderEncoder::new(chain_id).encode(order);
    Encoded {
        encoded_order: encoded.order,
        order_hash: order.hash(),
        signing_hash: encoded.message.signing_hash(),
        domain_separator: encoded.message.domain_separator(),
    }
}

fn decode(order: &[u8]) -> Result<Order> {
    Ok(Order::try_from(decode_order(order)?)?)
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Hashes {
    order_hash: B256,
    signing_hash: B256,
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    signer: Option<Address>,
}

fn hash(order: &[u8], signature: Option<&Bytes>, chain_id: u64) -> Result<Hashes> {
    let order = decode(order)?;
    let message = create_signable_message(&order, chain_id);
    let signer = signature
        .map(|signature| {
            let signature =
                Signature::try_from(&signature[..]).context("malformed signature")?;
            message
                .recover(&signature)
                .context("failed to recover signer")
        })
        .transpose()?;
    Ok(Hashes {
        order_hash: order.hash(),
        signing_hash: message.signing_hash(),
        signer,
    })
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Resolved {
    order_hash: B256,
    #[serde_as(as = "DisplayFromStr")]
    reactor: Address,
    #[serde_as(as = "DisplayFromStr")]
    swapper: Address,
    #[serde_as(as = "DisplayFromStr")]
    nonce: U256,
    #[serde_as(as = "DisplayFromStr")]
    deadline: U256,
    input: ResolvedInput,
    outputs: Vec<ResolvedOutput>,
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedInput {
    #[serde_as(as = "DisplayFromStr")]
    token: Address,
    #[serde_as(as = "DisplayFromStr")]
    amount: U256,
    #[serde_as(as = "DisplayFromStr")]
    max_amount: U256,
}

#[serde_as]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedOutput {
    #[serde_as(as = "DisplayFromStr")]
    token: Address,
    #[serde_as(as = "DisplayFromStr")]
    amount: U256,
    #[serde_as(as = "DisplayFromStr")]
    recipient: Address,
}

impl From<ResolvedOrder> for Resolved {
    fn from(resolved: ResolvedOrder) -> Self {
        Self {
            order_hash: resolved.hash,
            reactor: resolved.info.reactor,
            swapper: resolved.info.swapper,
            nonce: resolved.info.nonce,
            deadline: resolved.info.deadline,
            input: ResolvedInput {
                token: resolved.input.token,
                amount: resolved.input.amount,
                max_amount: resolved.input.maxAmount,
            },
            outputs: resolved
                .outputs
                .into_iter()
                .map(|output| ResolvedOutput {
                    token: output.token,
                    amount: output.amount,
                    recipient: output.recipient,
                })
                .collect(),
        }
    }
}

fn orders_query(
    status: OrderStatus,
    limit: usize,
    cursor: Option<String>,
    swapper: Option<String>,
) -> OrdersQuery {
    OrdersQuery {
        status,
        limit,
        cursor,
        extra: swapper
            .into_iter()
            .map(|swapper| ("swapper".to_string(), swapper))
            .collect(),
    }
}

async fn list_orders(api: &dyn UniswapXApi, query: &OrdersQuery) -> Result<OrdersResponse> {
    let response = api
        .get_orders(query)
        .await
        .context("failed to fetch orders")?;
    tracing::debug!(
        orders = response.orders.len(),
        more = response.cursor.is_some(),
        "fetched orders"
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        alloy::primitives::{address, b256, bytes, uint},
        contracts::quoter,
        hex_literal::hex,
        orders_api::MockUniswapXApi,
        serde_json::json,
    };

    fn order_json(swapper: &str, nonce: &str, filler: serde_json::Value) -> serde_json::Value {
        json!({
            "info": {
                "reactor": "0x6000da47483062a0d734ba3dc7576ce6a0b645c4",
                "swapper": swapper,
                "nonce": nonce,
                "deadline": "1704283964"
            },
            "decayTime": {
                "decayStartTime": "1704283832",
                "decayEndTime": "1704283952"
            },
            "input": {
                "token": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                "startAmount": "11514000000",
                "endAmount": "11514000000"
            },
            "outputs": [
                {
                    "token": "0x0000000000000000000000000000000000000000",
                    "startAmount": "5357273070919632430",
                    "endAmount": "5129553448285053856",
                    "recipient": "0xe7f525dd1bc6d748ae4d7f21d31e54741e05e110"
                },
                {
                    "token": "0x0000000000000000000000000000000000000000",
                    "startAmount": "8047981578747570",
                    "endAmount": "7705889005936485",
                    "recipient": "0x37a8f295612602f2774d331e562be9e61b83a327"
                }
            ],
            "exclusiveFiller": filler
        })
    }

    fn exclusive_order() -> Order {
        serde_json::from_value(order_json(
            "0xe7f525dd1bc6d748ae4d7f21d31e54741e05e110",
            "1993350810584104428432150966441163937812467703763408189373898424638421800960",
            json!({
                "filler": "0x919f9173e2dc833ec708812b4f1cb11b1a17efde",
                "overrideBps": "100"
            }),
        ))
        .unwrap()
    }

    fn moo_order() -> Order {
        serde_json::from_value(order_json(
            "0xcd7328a5D376D5530f054EAF0B9D235a4Fd36059",
            "17044488556984821651367783140780206339718078492509275355826173425128561760239",
            json!({
                "filler": "0x0000000000000000000000000000000000000000",
                "overrideBps": "0"
            }),
        ))
        .unwrap()
    }

    #[test]
    fn encode_order_json() {
        let order = exclusive_order();
        let encoded = encode(&order, 1);
        assert_eq!(
            encoded.order_hash,
            b256!("0xd1a982a611fc9dcd1230226140f22100994d769b2e01036dd8b3473ded7a3529")
        );
        assert_eq!(
            encoded.domain_separator,
            b256!("0x866a5aba21966af95d6c7ab78eb2b2fc913915c28be3b9aa07cc04ff903e3f28")
        );
        let decoded = decode(&encoded.encoded_order).unwrap();
        assert_eq!(decoded, order);
        assert_eq!(
            serde_json::to_value(&decoded).unwrap()["exclusiveFiller"]["filler"],
            order.exclusive_filler().filler().to_checksum(None)
        );

        let json = serde_json::to_value(&encoded).unwrap();
        assert_eq!(
            json["orderHash"],
            "0xd1a982a611fc9dcd1230226140f22100994d769b2e01036dd8b3473ded7a3529"
        );
        assert!(json["encodedOrder"].as_str().unwrap().starts_with("0x"));
    }

    #[test]
    fn read_order_file() {
        let path = std::env::temp_dir().join("uniswapx-read-order-file.json");
        std::fs::write(&path, serde_json::to_string(&exclusive_order()).unwrap()).unwrap();
        assert_eq!(read_order(Some(&path)).unwrap(), exclusive_order());

        std::fs::write(&path, "{}").unwrap();
        assert!(read_order(Some(&path)).is_err());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn hash_recovers_signer() {
        let order = model::encode_order(&moo_order());
        let signature = Bytes::from(hex!(
            "f4ff6b7dffc473ab3ad0d8635d1ce8fda152e3ef1786d66683edc84d49b5d0d0"
            "72336c06dd04e17abd978a8737b78fbd7699694012c2378e8ffacad9b3ddde01"
            "1c"
        ));

        let hashes = hash(&order, Some(&signature), 1).unwrap();
        assert_eq!(
            hashes.order_hash,
            b256!("0x590c4e012c46ac26c064198722fa89fd52d603a03b827efbf9e18ff3709f24b2")
        );
        assert_eq!(
            hashes.signing_hash,
            b256!("0xb1cb43e506d8afa8cda6fbf2de430f80d1e43a15ceaa2d0ee7db20fa78711e3d")
        );
        assert_eq!(
            hashes.signer,
            Some(address!("0xcd7328a5D376D5530f054EAF0B9D235a4Fd36059"))
        );
        assert_eq!(
            serde_json::to_value(&hashes).unwrap()["signer"],
            "0xcd7328a5D376D5530f054EAF0B9D235a4Fd36059"
        );

        let hashes = hash(&order, None, 1).unwrap();
        assert!(
            !serde_json::to_value(&hashes)
                .unwrap()
                .as_object()
                .unwrap()
                .contains_key("signer")
        );

        assert!(hash(&order, Some(&bytes!("1234")), 1).is_err());
        assert!(hash(&bytes!("1234"), None, 1).is_err());
    }

    #[test]
    fn resolved_order_json() {
        let resolved = ResolvedOrder {
            info: quoter::OrderInfo {
                reactor: address!("0x6000da47483062A0D734Ba3dc7576Ce6A0B645C4"),
                swapper: address!("0xcd7328a5D376D5530f054EAF0B9D235a4Fd36059"),
                nonce: uint!(1993350810584104428432150966441163937812467703763408189373898424638421800960_U256),
                deadline: U256::from(1704283964),
                additionalValidationContract: Address::ZERO,
                additionalValidationData: Bytes::new(),
            },
            input: quoter::InputToken {
                token: address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                amount: U256::from(11514000000u64),
                maxAmount: U256::from(11514000000u64),
            },
            outputs: vec![quoter::OutputToken {
                token: Address::ZERO,
                amount: U256::from(5129553448285053856u64),
                recipient: address!("0xe7f525dd1bc6d748AE4D7F21D31e54741e05e110"),
            }],
            sig: bytes!("1c"),
            hash: b256!("0xd1a982a611fc9dcd1230226140f22100994d769b2e01036dd8b3473ded7a3529"),
        };

        assert_eq!(
            serde_json::to_value(Resolved::from(resolved)).unwrap(),
            json!({
                "orderHash": "0xd1a982a611fc9dcd1230226140f22100994d769b2e01036dd8b3473ded7a3529",
                "reactor": "0x6000da47483062A0D734Ba3dc7576Ce6A0B645C4",
                "swapper": "0xcd7328a5D376D5530f054EAF0B9D235a4Fd36059",
                "nonce": "1993350810584104428432150966441163937812467703763408189373898424638421800960",
                "deadline": "1704283964",
                "input": {
                    "token": "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
                    "amount": "11514000000",
                    "maxAmount": "11514000000"
                },
                "outputs": [{
                    "token": "0x0000000000000000000000000000000000000000",
                    "amount": "5129553448285053856",
                    "recipient": "0xe7f525dd1bc6d748AE4D7F21D31e54741e05e110"
                }]
            })
        );
    }

    #[tokio::test]
    async fn lists_orders_of_swapper() {
        let mut api = MockUniswapXApi::new();
        api.expect_get_orders()
            .withf(|query| {
                query.status == OrderStatus::Expired
                    && query.limit == 3
                    && query.cursor.as_deref() == Some("next")
                    && query.extra == [("swapper".to_string(), "0xabc".to_string())]
            })
            .times(1)
            .returning(|_| {
                Ok(OrdersResponse {
                    orders: Vec::new(),
                    cursor: Some("after".to_string()),
                })
            });

        let query = orders_query(
            OrderStatus::Expired,
            3,
            Some("next".to_string()),
            Some("0xabc".to_string()),
        );
        let response = list_orders(&api, &query).await.unwrap();
        assert_eq!(response.cursor.as_deref(), Some("after"));
    }

    #[tokio::test]
    async fn surfaces_api_errors() {
        let mut api = MockUniswapXApi::new();
        api.expect_get_orders().returning(|_| {
            Err(orders_api::Error::Api {
                status: reqwest::StatusCode::BAD_REQUEST,
                code: Some("VALIDATION_ERROR".to_string()),
                detail: None,
            })
        });
        let err = list_orders(&api, &orders_query(OrderStatus::Open, 10, None, None))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("VALIDATION_ERROR"));
    }
}
