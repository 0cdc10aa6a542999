use anyhow::Result;
use event_loop::EventLoop;
use timeout_demos::{Console, register_all};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_tracing() {
    // Logs go to stderr so stdout carries only the example output.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();

    let console = Console::stdout();
    let mut event_loop = EventLoop::new();
    register_all(&mut event_loop, &console)?;

    let fired = event_loop.run().await?;
    tracing::info!(fired, elapsed = ?event_loop.elapsed(), "all timers fired");
    Ok(())
}
