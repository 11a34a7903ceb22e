use libris_api::config::Service;
use libris_api::server;

#[tokio::main]
async fn main() {
    server::init_tracing();

    if let Err(err) = server::run(Service::Catalog).await {
        tracing::error!(error = %err, "catalog-service terminated");
        std::process::exit(1);
    }
}
