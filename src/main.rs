#[tokio::main]
async fn main() {
    if let Err(e) = buyeuropean::cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
