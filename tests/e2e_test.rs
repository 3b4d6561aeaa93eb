/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("pr-remediator")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--check-config"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("pr-remediator")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 0: configuration check with defaults
    #[test]
    fn test_exit_code_check_config() {
        let dir = tempfile::tempdir().unwrap();
        cargo_bin_cmd!("pr-remediator")
            .current_dir(dir.path())
            .arg("--check-config")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Configuration OK"));
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("pr-remediator")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid log format value
    #[test]
    fn test_exit_code_invalid_log_format() {
        cargo_bin_cmd!("pr-remediator")
            .args(["--log-format", "xml", "--check-config"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - unparseable listen address
    #[test]
    fn test_exit_code_application_error_invalid_listen() {
        let dir = tempfile::tempdir().unwrap();
        cargo_bin_cmd!("pr-remediator")
            .current_dir(dir.path())
            .args(["--listen", "not-an-address", "--check-config"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("not-an-address"));
    }

    /// Exit code 3: Application error - listen address already taken
    #[test]
    fn test_exit_code_application_error_address_in_use() {
        let dir = tempfile::tempdir().unwrap();
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = occupied.local_addr().unwrap().to_string();

        cargo_bin_cmd!("pr-remediator")
            .current_dir(dir.path())
            .args(["--listen", addr.as_str()])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to bind"));
    }
}

#[test]
fn test_check_config_reports_defaults() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("pr-remediator")
        .current_dir(dir.path())
        .arg("--check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("listen: 0.0.0.0:8080"))
        .stdout(predicate::str::contains("max_concurrent_evaluations: 1"))
        .stdout(predicate::str::contains("memoize_evaluations: false"))
        .stdout(predicate::str::contains("policy_timeout_seconds: 30"))
        .stdout(predicate::str::contains("comment_when_clean: false"))
        .stdout(predicate::str::contains("log_format: text"));
}

#[test]
fn test_check_config_cli_overrides() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("pr-remediator")
        .current_dir(dir.path())
        .args([
            "-l",
            "127.0.0.1:9000",
            "--log-format",
            "json",
            "--check-config",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("listen: 127.0.0.1:9000"))
        .stdout(predicate::str::contains("log_format: json"));
}
