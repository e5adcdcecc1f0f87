#[tokio::main]
async fn main() -> anyhow::Result<()> {
    subscription_lib::run().await
}
