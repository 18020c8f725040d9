#[tokio::main]
async fn main() -> anyhow::Result<()> {
    uniswapx::start(std::env::args()).await
}
