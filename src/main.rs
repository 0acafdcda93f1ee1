//! rworktime main entrypoint.

use rworktime::{logging, run};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        rworktime::ui::messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
