//! Installed packages as reported by `pm list packages -f`.

use std::fmt;

use tracing::warn;

use crate::ident::is_package_name;

/// An installed application and the on-device path of its APK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub installed_path: String,
}

impl Package {
    /// Local file name used while the APK is inspected.
    pub fn apk_file_name(&self) -> String {
        format!("{}.apk", self.name)
    }
}

/// Why a listing line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    /// No `:` separating the `package` prefix.
    MissingPrefix,
    /// No `=` separating the path from the name.
    MissingSeparator,
    EmptyPath,
    EmptyName,
    /// The name is not a valid application ID, e.g. contains `/` or `;`.
    InvalidName,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            MalformedReason::MissingPrefix => "missing 'package:' prefix",
            MalformedReason::MissingSeparator => "missing '=' before package name",
            MalformedReason::EmptyPath => "empty installed path",
            MalformedReason::EmptyName => "empty package name",
            MalformedReason::InvalidName => "invalid package name",
        };
        f.write_str(reason)
    }
}

/// A listing line that could not be turned into a [`Package`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number within the listing output.
    pub line_number: usize,
    pub content: String,
    pub reason: MalformedReason,
}

/// Parsed packages plus every line that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageListing {
    pub packages: Vec<Package>,
    pub malformed: Vec<MalformedLine>,
}

impl PackageListing {
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Parse one `package:<path>=<name>` line.
///
/// The name is used as a local file name and as a device shell word, so it
/// must be a valid application ID.
///
/// The name is taken after the *last* `=`, so a path that itself contains
/// `=` (as split APK directories on recent Android versions do) stays intact.
pub fn parse_package_line(line: &str) -> Result<Package, MalformedReason> {
    let line = line.trim();
    let (_, rest) = line
        .split_once(':')
        .ok_or(MalformedReason::MissingPrefix)?;
    let (path, name) = rest
        .rsplit_once('=')
        .ok_or(MalformedReason::MissingSeparator)?;

    if path.is_empty() {
        return Err(MalformedReason::EmptyPath);
    }
    if name.is_empty() {
        return Err(MalformedReason::EmptyName);
    }
    if !is_package_name(name) {
        return Err(MalformedReason::InvalidName);
    }

    Ok(Package {
        name: name.to_string(),
        installed_path: path.to_string(),
    })
}

/// Parse the whole listing, skipping blank lines and collecting malformed ones.
pub fn parse_package_list(output: &str) -> PackageListing {
    let mut listing = PackageListing::default();

    for (idx, line) in output.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_package_line(line) {
            Ok(package) => listing.packages.push(package),
            Err(reason) => {
                warn!(line = idx + 1, content = line.trim(), %reason, "Skipping malformed package line");
                listing.malformed.push(MalformedLine {
                    line_number: idx + 1,
                    content: line.trim().to_string(),
                    reason,
                });
            }
        }
    }

    listing
}
