fn main() {
    if let Err(err) = uorun::cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
