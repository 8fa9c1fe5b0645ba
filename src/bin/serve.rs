use std::{env, io::BufReader, net::TcpListener};

use tracing::info;
use tracing_subscriber::EnvFilter;

use jetfdm::{resources::SimulationConfig, server::Session};

/// Headless driver: one TCP client, newline-delimited JSON commands.
///
/// An optional first argument names a YAML simulation config.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path)?,
        None => SimulationConfig::default(),
    };
    let mut session = Session::new(config)?;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    println!("PORT={}", listener.local_addr()?.port());

    let (stream, addr) = listener.accept()?;
    info!(%addr, "client connected");

    let reader = BufReader::new(stream.try_clone()?);
    session.serve(reader, stream)?;

    info!("session closed");
    Ok(())
}
