//! Gateway event parsing and response building shared by the Lambdas

pub mod helpers;
pub mod parsing;

pub use parsing::InboundRequest;
