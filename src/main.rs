fn main() {
    if let Err(err) = gtfs_canon::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
