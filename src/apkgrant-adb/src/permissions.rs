//! Declared permissions as reported by `aapt d permissions`.

use regex::Regex;
use std::sync::LazyLock;

/// Marker identifying a permission request line in the dump.
pub const USES_PERMISSION_MARKER: &str = "uses-permission:";

/// First single-quoted token on a line.
static QUOTED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'(.*?)'").expect("quoted token regex is valid"));

/// Extract permission identifiers from a permission dump.
///
/// ```text
/// package: com.example.foo
/// uses-permission: name='android.permission.CAMERA'
/// uses-permission: name='android.permission.INTERNET' maxSdkVersion='28'
/// permission: com.example.foo.C2D_MESSAGE
/// ```
///
/// Only lines carrying the marker count; of those, only ones with a quoted
/// token. Order and duplicates are preserved.
pub fn parse_permissions(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains(USES_PERMISSION_MARKER))
        .filter_map(|line| QUOTED_TOKEN.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|token| token.as_str().to_string())
        .collect()
}
