#[tokio::main]
async fn main() -> anyhow::Result<()> {
    posture_guard_lib::run().await
}
