use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use fugarv_loader::{DEFAULT_DEVICE, INSTMEM_OFFSET, INSTMEM_SIZE};

const EXIT_FAILURE: u8 = 1;

#[derive(Parser, Debug)]
#[command(author, version, about = "FugaRV instruction memory loader", long_about = None)]
struct Args {
    /// Path to the raw firmware image
    image: PathBuf,

    /// Physical memory device to map the instruction memory from
    #[arg(short, long, default_value = DEFAULT_DEVICE)]
    device: PathBuf,

    /// Enable debug-level tracing
    #[arg(short, long)]
    trace: bool,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_FAILURE),
            };
        }
    };

    let level = if args.trace {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    debug!(
        "Instruction memory window: {:#x} bytes at {:#x} via {:?}",
        INSTMEM_SIZE, INSTMEM_OFFSET, args.device
    );
    let written = fugarv_loader::load(&args.image, &args.device)?;
    info!("Loaded {} bytes from {:?}", written, args.image);
    Ok(())
}
