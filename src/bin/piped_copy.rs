//! Two-stage file copy through a bounded in-memory pipe.
//!
//! Run with: cargo run --bin piped_copy <source> <target>

use std::env;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process;

use parallel_vector_math::pipe;

/// Blocks the reader may run ahead of the writer.
const CHANNEL_CAPACITY: usize = 8;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: piped_copy <source> <target>");
        process::exit(2);
    }

    match run(Path::new(&args[1]), Path::new(&args[2])) {
        Ok(written) => println!("copied {} bytes from {} to {}", written, args[1], args[2]),
        Err(error) => {
            eprintln!("copy failed: {}", error);
            process::exit(1);
        }
    }
}

fn run(source: &Path, target: &Path) -> io::Result<u64> {
    if !source.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source {} is not a readable file", source.display()),
        ));
    }
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("target directory {} does not exist", parent.display()),
            ));
        }
    }

    let reader = File::open(source)?;
    let writer = File::create(target)?;
    pipe::copy_pipelined(reader, writer, CHANNEL_CAPACITY)
}
