/// Ports module defining interfaces for hexagonal architecture
///
/// Only outbound ports (driven ports - infrastructure interfaces) exist; the
/// webhook adapter drives the use cases directly.
pub mod outbound;
