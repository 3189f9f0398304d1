//! Identifier checks for strings that end up as words of a device shell
//! command or as local file names.
//!
//! `adb shell` joins its arguments into one line for the device's `sh`, so
//! anything read from the device or from an APK is checked here before it is
//! passed on.

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_package_component(comp: &str) -> bool {
    let mut bytes = comp.bytes();
    bytes.next().is_some_and(|b| b.is_ascii_alphabetic()) && bytes.all(is_word_byte)
}

/// Android application ID: at least two dot-separated components, each
/// starting with a letter and made of `[A-Za-z0-9_]`.
pub fn is_package_name(name: &str) -> bool {
    let mut components = name.split('.');
    for _ in 0..2 {
        if !components.next().is_some_and(is_package_component) {
            return false;
        }
    }
    components.all(is_package_component)
}

/// Permission identifier: non-empty dot-separated components of `[A-Za-z0-9_]`.
pub fn is_permission_name(permission: &str) -> bool {
    permission
        .split('.')
        .all(|comp| !comp.is_empty() && comp.bytes().all(is_word_byte))
}
