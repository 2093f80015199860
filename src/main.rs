//! CLI entry point for filist

use std::io;
use std::process;

fn main() {
    filist::logging::init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = filist::cli::run(std::env::args_os(), &mut out);
    process::exit(filist::cli::flush_output(code, &mut out));
}
