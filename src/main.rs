use std::io::Write;

use medianset_core::replay::read_script;
use medianset_core::{Backend, MultisetConfig, ReplayError, Replayer};
use tracing_subscriber::EnvFilter;

fn run() -> Result<(), ReplayError> {
    let backend = match std::env::args().nth(1) {
        Some(name) => name.parse::<Backend>()?,
        None => Backend::default(),
    };
    let config = MultisetConfig {
        backend,
        ..Default::default()
    };

    let ops = read_script(std::io::stdin().lock())?;
    tracing::info!("replaying {} operations on {} backend", ops.len(), backend);

    let mut replayer = Replayer::with_config(&config);
    let mut out = std::io::stdout().lock();
    for op in ops {
        writeln!(out, "{}", replayer.apply(op))?;
    }
    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
