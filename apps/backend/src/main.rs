#[tokio::main]
async fn main() -> anyhow::Result<()> {
    trivia_backend::run().await
}
