pub use site_relay::feed::handler;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    site_relay::setup_logging();
    lambda_runtime::run(lambda_runtime::service_fn(handler)).await
}
