#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = campushub::run().await {
        eprintln!("campushub fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
