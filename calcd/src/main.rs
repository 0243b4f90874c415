use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    calcd::cli::run().await
}
