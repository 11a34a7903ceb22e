use libris_api::config::Service;
use libris_api::server;

#[tokio::main]
async fn main() {
    server::init_tracing();

    if let Err(err) = server::run(Service::Users).await {
        tracing::error!(error = %err, "user-service terminated");
        std::process::exit(1);
    }
}
