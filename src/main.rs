fn main() {
    if let Err(e) = actsrv::cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
