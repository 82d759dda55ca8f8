use std::process;

fn main() {
    if let Err(e) = optcomp::cli::run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
