fn main() {
    if let Err(err) = word_cloud_packer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
