/*
 * Responsibility
 * - tokio runtime entry point
 * - Delegates to app::run(); no logic here
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    choremonsta::app::run().await
}
