use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    selwait_cli::cli::run().await
}
