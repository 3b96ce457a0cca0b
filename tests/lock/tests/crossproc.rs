//! Cross-process determinism: spawns the `search_fixture` binary under
//! several working directories and environment variants and asserts that
//! every run prints identical output.

use std::path::Path;
use std::process::Command;

/// Resolve the path to the compiled binary.
///
/// `cargo test` puts test binaries in `target/debug/deps/`; the
/// `search_fixture` binary lives one level up.
fn binary_path() -> String {
    let mut path = std::env::current_exe()
        .expect("can resolve test binary path")
        .parent()
        .expect("binary dir exists")
        .parent()
        .expect("deps parent exists")
        .to_path_buf();
    path.push("search_fixture");
    path.to_string_lossy().to_string()
}

/// Run the binary with the given cwd and environment overrides.
/// Returns stdout as a string.
fn run_variant(work_dir: &Path, env_overrides: &[(&str, &str)]) -> String {
    let bin = binary_path();

    let mut command = Command::new(&bin);
    command
        .current_dir(work_dir)
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE")
        .env_remove("RUST_LOG");
    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!(
            "failed to spawn {bin} (work_dir={}, overrides={env_overrides:?}): {e}",
            work_dir.display()
        )
    });
    assert!(
        output.status.success(),
        "search_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn field<'a>(output: &'a str, key: &str) -> &'a str {
    output
        .lines()
        .find_map(|line| line.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
        .unwrap_or_else(|| panic!("missing {key} in output:\n{output}"))
}

#[test]
fn crossproc_output_is_identical_across_variants() {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let baseline = run_variant(manifest_dir, &[]);

    let scratch = tempfile::tempdir().unwrap();
    let variant_cwd = run_variant(scratch.path(), &[]);
    assert_eq!(baseline, variant_cwd, "output differs when cwd changes");

    let variant_locale = run_variant(manifest_dir, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(baseline, variant_locale, "output differs when LC_ALL=C LANG=C");

    let variant_noise = run_variant(
        scratch.path(),
        &[
            ("ASTAR_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("RUST_LOG", "trace"),
        ],
    );
    assert_eq!(baseline, variant_noise, "output differs with spurious env vars");
}

#[test]
fn crossproc_output_reports_expected_routes() {
    let output = run_variant(Path::new(env!("CARGO_MANIFEST_DIR")), &[]);

    assert_eq!(field(&output, "graph_termination"), "goal_reached");
    assert_eq!(field(&output, "graph_path"), "A,D,G");
    assert_eq!(field(&output, "graph_cost"), "7");
    assert_eq!(field(&output, "graph_expansions"), "7");
    assert!(field(&output, "graph_report_digest").starts_with("sha256:"));

    assert_eq!(field(&output, "grid_termination"), "goal_reached");
    assert_eq!(field(&output, "grid_path_len"), "2");
    assert!(field(&output, "grid_report_digest").starts_with("sha256:"));
}
