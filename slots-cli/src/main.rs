use std::path::PathBuf;

use clap::Parser;

use rvjni_cframe::Address;

mod cli;
mod error;
mod logger;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn address(text: &str) -> Result<Address, String> {
    cli::parse_address(text).map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "rvslots", about = "Inspects RV32 call argument slots and native frames")]
struct Args {
    /// Turn on verbose logging. Repeat to increase verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sets the logging to write to a file.
    #[arg(short, long)]
    log_file: Option<PathBuf>,

    /// Selects the subcommand.
    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Packs arguments into slots and prints the slot layout.
    Pack {
        /// Arguments as kind:value, where kind is one of i32, i64, ref, f32, f64.
        #[arg(required = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Decodes slot words back into arguments.
    Unpack {
        /// Comma-separated argument kinds, for example i32,i64,ref.
        #[arg(long, value_delimiter = ',', required = true)]
        kinds: Vec<String>,

        /// Slot words in hex (0x...) or decimal.
        #[arg(allow_hyphen_values = true)]
        slots: Vec<String>,
    },
    /// Walks native frames in a raw little-endian memory image.
    Walk {
        /// Path to the memory image.
        image: PathBuf,

        /// Target address of the first byte of the image.
        #[arg(long, value_parser = address)]
        base: Address,

        /// Frame pointer of the innermost frame.
        #[arg(long, value_parser = address)]
        fp: Address,

        /// Program counter of the innermost frame.
        #[arg(long, value_parser = address)]
        pc: Address,

        /// Stack pointer of the stopped thread.
        #[arg(long, value_parser = address)]
        sp: Address,
    },
    /// Prints the version number of the tool.
    Version,
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    logger::configure(args.verbose, args.log_file)?;

    match args.action {
        Action::Pack { args } => cli::pack(&args),
        Action::Unpack { kinds, slots } => cli::unpack(&kinds, &slots),
        Action::Walk {
            image,
            base,
            fp,
            pc,
            sp,
        } => cli::walk_frames(&image, base, fp, pc, sp),
        Action::Version => {
            println!("rvslots version {VERSION}");
            Ok(())
        }
    }
}
