/// Site relay - serverless request handlers backing the nonprofit website.
///
/// This crate implements two independent Lambda functions:
/// 1. A contact Lambda that validates form submissions, optionally verifies a
///    Turnstile challenge token and optionally relays the message through Resend
/// 2. A feed Lambda that serves recent Instagram posts, falling back to a fixed
///    sample set whenever the Graph API is unconfigured or unavailable
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution, one binary per handler
/// - reqwest for the outbound calls to Turnstile, Resend and the Graph API
/// - Tokio for async runtime
///
/// Each invocation is stateless. Optional upstreams are switched on purely by
/// the presence of their credentials in the environment.
///
/// # Example
///
/// ```no_run
/// use site_relay::api::parsing::InboundRequest;
/// use site_relay::contact::ContactService;
/// use site_relay::core::config::ContactConfig;
///
/// #[tokio::main]
/// async fn main() {
///     site_relay::setup_logging();
///
///     let config = ContactConfig::from_env();
///     let service = ContactService::from_config(&config);
///
///     let request = InboundRequest::new("POST")
///         .with_header("Content-Type", "application/x-www-form-urlencoded")
///         .with_body("name=A&email=a%40b.com&message=hi");
///
///     let response = service.handle(&request).await;
///     println!("{response}");
/// }
/// ```
pub mod api;
pub mod clients;
pub mod contact;
pub mod core;
pub mod errors;
pub mod feed;

pub use errors::RelayError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level filter is taken from `RUST_LOG` and
/// defaults to `info`. Calling it again after a subscriber is installed is a no-op.
///
/// # Example
///
/// ```
/// site_relay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
