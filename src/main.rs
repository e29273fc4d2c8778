fn main() {
    if let Err(e) = orca::cli::main() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
