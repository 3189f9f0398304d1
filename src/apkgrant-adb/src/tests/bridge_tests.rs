//! Tests for the adb and aapt front-ends against scripted output.

use std::io;
use std::path::Path;

use apkgrant_common::{SeparatedOutput, request_interrupt};
use pretty_assertions::assert_eq;
use serial_test::serial;

use crate::aapt::PackagingTool;
use crate::bridge::{DeviceBridge, DeviceContext};
use crate::error::AdbError;
use crate::grant::GrantOutcome;
use crate::testing::ScriptedRunner;

const DEVICES: &str = "List of devices attached\nR58M\tdevice model:SM_A515F\n";

fn ctx() -> DeviceContext {
    DeviceContext::new("R58M")
}

#[test]
fn test_list_devices_parses_stdout() {
    let runner = ScriptedRunner::new().on(&["devices", "-l"], SeparatedOutput::with_stdout(DEVICES));
    let bridge = DeviceBridge::new("adb", &runner);

    let devices = bridge.list_devices();

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].serial, "R58M");
    assert_eq!(runner.invocations()[0].args, vec!["devices", "-l"]);
}

#[test]
fn test_list_devices_with_stderr_is_empty() {
    let runner = ScriptedRunner::new().on(
        &["devices", "-l"],
        SeparatedOutput {
            stdout: DEVICES.to_string(),
            stderr: "adb: failed to check server version\n".to_string(),
            exit_code: Some(1),
        },
    );
    let bridge = DeviceBridge::new("adb", &runner);

    assert!(bridge.list_devices().is_empty());
}

#[test]
fn test_list_devices_spawn_failure_is_empty() {
    let runner = ScriptedRunner::new().on_with(&["devices"], |_| {
        Err(io::Error::new(io::ErrorKind::NotFound, "no adb"))
    });
    let bridge = DeviceBridge::new("adb", &runner);

    assert!(bridge.list_devices().is_empty());
}

#[test]
#[serial]
fn test_list_packages_targets_device_explicitly() {
    let runner = ScriptedRunner::new().on(
        &["pm", "list", "packages"],
        SeparatedOutput::with_stdout("package:/data/app/A.apk=com.a\n"),
    );
    let bridge = DeviceBridge::new("adb", &runner);

    let listing = bridge.list_packages(&ctx());

    assert_eq!(listing.packages.len(), 1);
    assert_eq!(
        runner.invocations()[0].args,
        vec!["-s", "R58M", "shell", "pm", "list", "packages", "-f", "-3"]
    );
}

#[test]
#[serial]
fn test_list_packages_with_stderr_is_empty() {
    let runner = ScriptedRunner::new().on(
        &["pm", "list", "packages"],
        SeparatedOutput {
            stdout: "package:/data/app/A.apk=com.a\n".to_string(),
            stderr: "error: device offline\n".to_string(),
            exit_code: Some(1),
        },
    );
    let bridge = DeviceBridge::new("adb", &runner);

    assert!(bridge.list_packages(&ctx()).is_empty());
}

#[test]
#[serial]
fn test_list_packages_interrupted_is_empty() {
    let runner = ScriptedRunner::new().on_with(&["pm", "list", "packages"], |_| {
        request_interrupt();
        Ok(SeparatedOutput::with_stdout("package:/data/app/A.apk=com.a\n"))
    });
    let bridge = DeviceBridge::new("adb", &runner);

    assert!(bridge.list_packages(&ctx()).is_empty());
    assert!(!apkgrant_common::interrupt_requested());
}

#[test]
fn test_pull_success_and_failure() {
    let runner = ScriptedRunner::new()
        .on(&["pull", "/data/app/A.apk"], SeparatedOutput::with_stdout("1 file pulled\n"))
        .on(
            &["pull", "/data/app/B.apk"],
            SeparatedOutput::with_stderr("adb: error: remote object does not exist\n"),
        );
    let bridge = DeviceBridge::new("adb", &runner);

    assert!(bridge.pull(&ctx(), "/data/app/A.apk", Path::new("com.a.apk")).is_ok());
    let err = bridge
        .pull(&ctx(), "/data/app/B.apk", Path::new("com.b.apk"))
        .unwrap_err();
    assert!(matches!(err, AdbError::Reported { ref message, .. } if message == "adb: error: remote object does not exist"));

    assert_eq!(
        runner.invocations()[0].args,
        vec!["-s", "R58M", "pull", "/data/app/A.apk", "com.a.apk"]
    );
}

#[test]
fn test_grant_outcomes() {
    let runner = ScriptedRunner::new()
        .on(&["android.permission.CAMERA"], SeparatedOutput::default())
        .on(
            &["android.permission.INTERNET"],
            SeparatedOutput::with_stderr(
                "Exception occurred while executing 'grant':\njava.lang.SecurityException: Permission android.permission.INTERNET is not a changeable permission type\n",
            ),
        )
        .on_with(&["android.permission.BROKEN"], |_| {
            Err(io::Error::other("pipe closed"))
        });
    let bridge = DeviceBridge::new("adb", &runner);

    assert_eq!(
        bridge.grant(&ctx(), "com.a", "android.permission.CAMERA"),
        GrantOutcome::Granted
    );
    assert_eq!(
        bridge.grant(&ctx(), "com.a", "android.permission.INTERNET"),
        GrantOutcome::Rejected {
            reason: "Exception occurred while executing 'grant':".to_string()
        }
    );
    assert!(matches!(
        bridge.grant(&ctx(), "com.a", "android.permission.BROKEN"),
        GrantOutcome::Failed { .. }
    ));

    assert_eq!(
        runner.invocations()[0].args,
        vec!["-s", "R58M", "shell", "pm", "grant", "com.a", "android.permission.CAMERA"]
    );
}

#[test]
fn test_grant_refuses_non_identifier_words() {
    let runner = ScriptedRunner::new().on(&["pm", "grant"], SeparatedOutput::default());
    let bridge = DeviceBridge::new("adb", &runner);

    assert!(matches!(
        bridge.grant(&ctx(), "com.a;reboot", "android.permission.CAMERA"),
        GrantOutcome::Failed { .. }
    ));
    assert!(matches!(
        bridge.grant(&ctx(), "com.a", "$(reboot)"),
        GrantOutcome::Failed { .. }
    ));
    assert!(runner.invocations().is_empty());
}

#[test]
fn test_dump_permissions_three_way_outcome() {
    let runner = ScriptedRunner::new()
        .on(
            &["with.apk"],
            SeparatedOutput::with_stdout(
                "package: com.with\nuses-permission: name='android.permission.CAMERA'\n",
            ),
        )
        .on(&["empty.apk"], SeparatedOutput::with_stdout("package: com.empty\n"))
        .on(
            &["broken.apk"],
            SeparatedOutput::with_stderr("ERROR: dump failed because no AndroidManifest.xml found\n"),
        );
    let aapt = PackagingTool::new("aapt", &runner);

    assert_eq!(
        aapt.dump_permissions(Path::new("with.apk")).unwrap(),
        vec!["android.permission.CAMERA"]
    );
    assert!(aapt.dump_permissions(Path::new("empty.apk")).unwrap().is_empty());
    assert!(aapt.dump_permissions(Path::new("broken.apk")).is_err());

    assert_eq!(runner.invocations()[0].args, vec!["d", "permissions", "with.apk"]);
}
