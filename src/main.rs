use std::net::TcpListener;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::error;

use flatfs::{serve, FileStore, FileSystemManager};

#[derive(Parser)]
struct Args {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Path of the virtual disk image
    #[arg(short, long, default_value = "disk.img")]
    disk: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    if let Err(err) = run(&args) {
        error!("server failed: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&args.disk)?;
    let fs = Arc::new(FileSystemManager::new(store)?);
    let listener = TcpListener::bind(("0.0.0.0", args.port))?;
    serve(listener, fs)?;
    Ok(())
}
