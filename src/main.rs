fn main() {
    if let Err(err) = campaign_split::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
