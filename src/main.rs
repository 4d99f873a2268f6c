#[tokio::main]
async fn main() {
    registrar::tracing::init();

    if let Err(e) = registrar::app::run().await {
        log::error!("❌ {:#}", e);
        std::process::exit(1);
    }
}
