/// End-to-end tests for the CLI
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const CHAINS_FIXTURE: &str = "tests/fixtures/chains.cdx.json";
const CYCLIC_FIXTURE: &str = "tests/fixtures/cyclic.cdx.json";
const NO_METADATA_FIXTURE: &str = "tests/fixtures/no-metadata.cdx.json";
const SEVERITY_ENV: &str = "SBOM_DECOMPOSE_MIN_TRANSITIVE_SEVERITY";

fn stdout_json(args: &[&str]) -> serde_json::Value {
    let output = cargo_bin_cmd!("sbom-decompose")
        .env_remove(SEVERITY_ENV)
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: Success - normal execution
    #[test]
    fn test_exit_code_success() {
        cargo_bin_cmd!("sbom-decompose")
            .env_remove(SEVERITY_ENV)
            .arg(CYCLIC_FIXTURE)
            .assert()
            .code(0);
    }

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("sbom-decompose").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("sbom-decompose")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 1: --fail-on-vulnerable with transitive exposure
    #[test]
    fn test_exit_code_vulnerabilities_detected() {
        cargo_bin_cmd!("sbom-decompose")
            .env_remove(SEVERITY_ENV)
            .args([CHAINS_FIXTURE, "--fail-on-vulnerable"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failing as requested"));
    }

    /// Exit code 0: --fail-on-vulnerable without exposure above the threshold
    #[test]
    fn test_exit_code_fail_on_vulnerable_below_threshold() {
        cargo_bin_cmd!("sbom-decompose")
            .env_remove(SEVERITY_ENV)
            .args([CYCLIC_FIXTURE, "--fail-on-vulnerable"])
            .assert()
            .code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("sbom-decompose")
            .args([CYCLIC_FIXTURE, "--invalid-option"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("sbom-decompose")
            .args([CYCLIC_FIXTURE, "-f", "invalid_format"])
            .assert()
            .code(2);
    }

    /// Exit code 2: Missing input path
    #[test]
    fn test_exit_code_missing_input() {
        cargo_bin_cmd!("sbom-decompose").assert().code(2);
    }

    /// Exit code 2: Severity threshold out of range
    #[test]
    fn test_exit_code_severity_out_of_range() {
        cargo_bin_cmd!("sbom-decompose")
            .env_remove(SEVERITY_ENV)
            .args([CYCLIC_FIXTURE, "--min-severity", "11"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("between 0.0 and 10.0"));
    }

    /// Exit code 3: Application error - non-existent input
    #[test]
    fn test_exit_code_application_error_nonexistent_path() {
        cargo_bin_cmd!("sbom-decompose")
            .arg("/nonexistent/path/bom.cdx.json")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("SBOM file not found"));
    }

    /// Exit code 3: Application error - input is not a CycloneDX document
    #[test]
    fn test_exit_code_application_error_not_cyclonedx() {
        cargo_bin_cmd!("sbom-decompose")
            .arg("Cargo.toml")
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to parse SBOM file"));
    }

    /// Exit code 3: Application error - no root component
    #[test]
    fn test_exit_code_application_error_missing_root() {
        cargo_bin_cmd!("sbom-decompose")
            .arg(NO_METADATA_FIXTURE)
            .assert()
            .code(3)
            .stderr(predicate::str::contains("missing a root component"));
    }
}

#[test]
fn test_e2e_json_format() {
    let json = stdout_json(&[CHAINS_FIXTURE]);

    assert_eq!(json["summary"]["total_nodes"], 100);
    assert_eq!(json["summary"]["total_vulnerabilities"], 5);
    assert_eq!(json["summary"]["has_transitive_vulnerabilities"], true);
    assert_eq!(json["tree"]["bom_ref"], "chains-app");
    assert_eq!(json["topological_order"].as_array().unwrap().len(), 100);
    assert_eq!(json["meta"]["bom_version"], "1.5");
    assert!(json["cycles"]["cycles"].as_array().unwrap().is_empty());
}

#[test]
fn test_e2e_only_vulnerable() {
    let json = stdout_json(&[CHAINS_FIXTURE, "--only-vulnerable"]);
    assert_eq!(json["summary"]["total_nodes"], 38);
}

#[test]
fn test_e2e_max_depth() {
    let json = stdout_json(&[CHAINS_FIXTURE, "--max-depth", "2"]);
    assert_eq!(json["summary"]["total_nodes"], 23);
    assert_eq!(json["summary"]["max_level"], 2);
}

#[test]
fn test_e2e_cycles_reported() {
    let json = stdout_json(&[CYCLIC_FIXTURE]);

    assert_eq!(json["cycles"]["cycles"][0]["display"], "lib-a → lib-b → lib-a");
    assert_eq!(json["cycles"]["broken_edges"][0], "lib-b -> lib-a");
    assert_eq!(
        json["cycles"]["summary"],
        "Automatically broke 1 dependency cycle(s) to build an acyclic graph"
    );
}

#[test]
fn test_e2e_markdown_format() {
    cargo_bin_cmd!("sbom-decompose")
        .env_remove(SEVERITY_ENV)
        .args([CYCLIC_FIXTURE, "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# SBOM Decomposition: webapp 2.1.0"))
        .stdout(predicate::str::contains("## Dependency Tree"))
        .stdout(predicate::str::contains("| CVE-2023-4242 | medium | 5.3 | lib-b |"))
        .stdout(predicate::str::contains("## Dependency Cycles"));
}

#[test]
fn test_e2e_progress_and_warnings_on_stderr() {
    cargo_bin_cmd!("sbom-decompose")
        .env_remove(SEVERITY_ENV)
        .arg(CYCLIC_FIXTURE)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped 1 dependency edge(s)"))
        .stderr(predicate::str::contains("Broke 1 dependency cycle(s)"))
        .stderr(predicate::str::contains("Rendering JSON decomposition"));
}

#[test]
fn test_e2e_quiet_mode() {
    cargo_bin_cmd!("sbom-decompose")
        .env_remove(SEVERITY_ENV)
        .args([CYCLIC_FIXTURE, "--quiet"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_e2e_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("report.md");

    cargo_bin_cmd!("sbom-decompose")
        .env_remove(SEVERITY_ENV)
        .args([CYCLIC_FIXTURE, "-f", "md", "-o"])
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("## Vulnerabilities"));
}

#[test]
fn test_e2e_output_file_missing_parent() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("missing").join("report.json");

    cargo_bin_cmd!("sbom-decompose")
        .env_remove(SEVERITY_ENV)
        .args([CYCLIC_FIXTURE, "-o"])
        .arg(&output_path)
        .assert()
        .code(3);
}

#[test]
fn test_e2e_severity_from_environment() {
    cargo_bin_cmd!("sbom-decompose")
        .env(SEVERITY_ENV, "5.0")
        .args([CYCLIC_FIXTURE, "--fail-on-vulnerable"])
        .assert()
        .code(1);
}

#[test]
fn test_e2e_cli_severity_beats_environment() {
    cargo_bin_cmd!("sbom-decompose")
        .env(SEVERITY_ENV, "5.0")
        .args([CYCLIC_FIXTURE, "--fail-on-vulnerable", "--min-severity", "9.0"])
        .assert()
        .code(0);
}
