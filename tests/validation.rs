//! Verification runs with a stand-in checker binary.

mod common;

use common::*;
use nagstage::application::{BuildRequest, ValidationRunner};
use nagstage::infrastructure::LocalFs;
use nagstage::presentation::create_orchestrator;
use nagstage::NagstageError;

/// Checker that fails unless the config's cfg_dir holds a hosts.cfg
const CHECKER: &str = r#"
dir=$(sed -n 's/^cfg_dir=//p' "$3")
if [ -f "$dir/hosts.cfg" ]; then
    echo "Total Warnings: 0"
    echo "Total Errors:   0"
    exit 0
fi
echo "Error: no objects in $dir" >&2
exit 1
"#;

#[test]
fn checker_sees_staged_objects() {
    let env = TestEnv::new();
    let hosts = env.write_hosts("web.json", &web_hosts());
    env.write_live("east", &document(&hosts));
    create_orchestrator(&env.config)
        .build(&BuildRequest::new("east"))
        .unwrap();
    write_script(&env.config.binaries.checker, CHECKER);

    let fs = LocalFs::new();
    let layout = env.layout();
    let report = ValidationRunner::new(&fs, &layout, &env.config.binaries.checker)
        .validate("east")
        .unwrap();

    assert!(report.success(), "output: {:?}", report.output);
    assert_eq!(report.output, vec!["Total Warnings: 0", "Total Errors:   0"]);
    assert!(env.staged("east", "nagios.cfg").is_some());
}

#[test]
fn checker_failure_is_reported_not_raised() {
    let env = TestEnv::new();
    write_script(&env.config.binaries.checker, CHECKER);

    let fs = LocalFs::new();
    let layout = env.layout();
    let report = ValidationRunner::new(&fs, &layout, &env.config.binaries.checker)
        .validate("east")
        .unwrap();

    assert_eq!(report.exit_code, 1);
    assert!(report.output[0].starts_with("Error: no objects in "));
}

#[test]
fn missing_checker_is_an_error() {
    let env = TestEnv::new();
    let fs = LocalFs::new();
    let layout = env.layout();

    let err = ValidationRunner::new(&fs, &layout, &env.config.binaries.checker)
        .validate("east")
        .unwrap_err();
    assert!(matches!(err, NagstageError::MissingBinary { role: "checker binary", .. }));
}
