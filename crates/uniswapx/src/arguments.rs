use {
    alloy::primitives::Bytes,
    clap::{Parser, Subcommand},
    orders_api::{DefaultUniswapXApi, OrderStatus},
    std::{path::PathBuf, time::Duration},
    tracing::Level,
    url::Url,
};

/// Build, inspect and resolve UniswapX exclusive dutch orders.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Arguments {
    /// The Ethereum node URL to connect to.
    #[clap(long, env, default_value = "http://localhost:8545")]
    pub node_url: Url,

    /// Chain the orders are signed for.
    #[clap(long, env, default_value = "1")]
    pub chain_id: u64,

    /// Base URL of the UniswapX order discovery API.
    #[clap(long, env, default_value = DefaultUniswapXApi::DEFAULT_URL)]
    pub api_url: Url,

    #[clap(long, env, default_value = observe::config::DEFAULT_FILTER)]
    pub log_filter: String,

    /// Events at or above this level are written to stderr instead of
    /// stdout.
    #[clap(long, env)]
    pub log_stderr_threshold: Option<Level>,

    #[clap(long, env)]
    pub use_json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode an order given as JSON and print its hashes.
    Encode {
        /// File with the order JSON. Reads stdin when omitted.
        #[clap(long)]
        file: Option<PathBuf>,
    },
    /// Decode an ABI encoded order into JSON.
    Decode { order: Bytes },
    /// Print the order hash and Permit2 signing hash of an encoded order.
    Hash {
        order: Bytes,
        /// Also recover the address that produced this signature.
        #[clap(long)]
        signature: Option<Bytes>,
    },
    /// Print the reactor `execute` call data for a signed order.
    ExecuteData { order: Bytes, signature: Bytes },
    /// Generate a fresh order nonce.
    Nonce,
    /// Print the deadline timestamp the given number of seconds from now.
    Deadline {
        #[clap(
            long,
            default_value = "600",
            value_parser = duration_from_seconds,
        )]
        duration: Duration,
    },
    /// Resolve a signed order against the order quoter of the node's chain.
    Resolve {
        order: Bytes,
        signature: Bytes,
        /// Block to resolve at. Defaults to the latest block.
        #[clap(long)]
        block: Option<u64>,
    },
    /// List orders from the order discovery API.
    Orders {
        #[clap(long, default_value = "open")]
        status: OrderStatus,
        #[clap(long, default_value = "10")]
        limit: usize,
        #[clap(long)]
        cursor: Option<String>,
        /// Only list orders of this swapper.
        #[clap(long)]
        swapper: Option<String>,
    },
}

fn duration_from_seconds(s: &str) -> Result<Duration, std::num::ParseIntError> {
    Ok(Duration::from_secs(s.parse()?))
}

impl Arguments {
    pub fn observe(&self) -> observe::Config {
        observe::Config::new(&self.log_filter)
            .stderr_threshold(self.log_stderr_threshold)
            .json(self.use_json_logs)
    }
}

impl std::fmt::Display for Arguments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "node_url: SECRET")?;
        writeln!(f, "chain_id: {}", self.chain_id)?;
        writeln!(f, "api_url: {}", self.api_url)?;
        writeln!(f, "log_filter: {}", self.log_filter)?;
        writeln!(f, "log_stderr_threshold: {:?}", self.log_stderr_threshold)?;
        writeln!(f, "use_json_logs: {}", self.use_json_logs)?;
        Ok(())
    }
}
