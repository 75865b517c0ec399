//! gcterm binary entrypoint.

use gcterm::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        cli::utils::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
