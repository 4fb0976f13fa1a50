use anyhow::Result;
use cratos::{parse_args_os, Cratos};
use std::io::Write;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv = parse_args_os(std::env::args_os());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Cratos::default().run(&argv, &mut out)?;
    out.flush()?;
    Ok(())
}
