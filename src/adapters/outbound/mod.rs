/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod formatters;
pub mod manifest;
pub mod network;
