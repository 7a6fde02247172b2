use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use hilos_common::test_case::TestCase;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail {
        expected: Option<String>,
        actual: String,
    },
}

/// Runs compatibility cases through `hilos check`.
pub struct TestRunner {
    cli_path: PathBuf,
}

impl TestRunner {
    pub fn from_path(path: PathBuf) -> Self {
        TestRunner { cli_path: path }
    }

    pub fn run(&self, test_case: &TestCase) -> TestResult {
        match self.check(test_case) {
            Ok(output) => {
                let output_trimmed = output.trim_end_matches(&['\r', '\n'][..]);
                let expected_trimmed = test_case.result.trim_end_matches(&['\r', '\n'][..]);

                if expected_trimmed == output_trimmed {
                    TestResult::Pass
                } else {
                    TestResult::Fail {
                        expected: Some(test_case.result.clone()),
                        actual: output,
                    }
                }
            }
            Err(err) => TestResult::Fail {
                expected: None,
                actual: format!("Error running test: {}", err),
            },
        }
    }

    /// Writes the script as `<case name>.squiffy` in a scratch directory so
    /// warnings name a predictable file, then captures the check output.
    fn check(&self, test_case: &TestCase) -> std::io::Result<String> {
        let file_stem = test_case
            .path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy();
        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join(format!("{}.squiffy", file_stem));

        let mut file = std::fs::File::create(&script_path)?;
        writeln!(file, "{}", test_case.script)?;

        let result = Command::new(&self.cli_path)
            .arg("check")
            .arg(&script_path)
            .output()?;

        let mut output = String::from_utf8_lossy(&result.stdout).to_string();
        if !result.status.success() {
            output.push_str(&String::from_utf8_lossy(&result.stderr));
        }
        Ok(output)
    }
}
