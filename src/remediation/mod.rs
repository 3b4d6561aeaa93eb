/// Remediation domain - component identities, policy decisions and the
/// pure logic that interprets them
pub mod domain;
pub mod services;
