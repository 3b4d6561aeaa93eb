/// Inbound adapters - Transports that drive the application use cases
pub mod webhook;
