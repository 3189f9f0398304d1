//! Tests for permission dump parsing.

use crate::permissions::*;
use pretty_assertions::assert_eq;

#[test]
fn test_extracts_single_permission_and_ignores_other_lines() {
    let output = "package: com.example.foo\n\
                  uses-permission: name='android.permission.CAMERA'\n\
                  permission: com.example.foo.permission.C2D_MESSAGE\n";
    assert_eq!(parse_permissions(output), vec!["android.permission.CAMERA"]);
}

#[test]
fn test_first_quoted_token_wins() {
    let output = "uses-permission: name='android.permission.WRITE_EXTERNAL_STORAGE' maxSdkVersion='28'\n";
    assert_eq!(
        parse_permissions(output),
        vec!["android.permission.WRITE_EXTERNAL_STORAGE"]
    );
}

#[test]
fn test_marker_without_quotes_is_skipped() {
    let output = "uses-permission: android.permission.INTERNET\n\
                  uses-permission: name='android.permission.INTERNET'\n";
    assert_eq!(parse_permissions(output), vec!["android.permission.INTERNET"]);
}

#[test]
fn test_duplicates_and_order_preserved() {
    let output = "uses-permission: name='b'\nuses-permission: name='a'\nuses-permission: name='b'\n";
    assert_eq!(parse_permissions(output), vec!["b", "a", "b"]);
}

#[test]
fn test_no_permissions_is_empty() {
    assert!(parse_permissions("package: com.example.empty\n").is_empty());
    assert!(parse_permissions("").is_empty());
}

#[test]
fn test_sdk23_marker_variant_is_not_matched() {
    let output = "uses-permission-sdk-23: name='android.permission.ACCESS_FINE_LOCATION'\n";
    assert!(parse_permissions(output).is_empty());
}
