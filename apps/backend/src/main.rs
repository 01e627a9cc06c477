#[tokio::main]
async fn main() -> anyhow::Result<()> {
    brainbolt_backend::run().await
}
