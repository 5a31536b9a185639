use anyhow::Result;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
}

/// # Errors
/// Returns an error if the mock server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    crate::mock::new(args.port).await
}
