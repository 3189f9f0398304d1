//! Typed wrappers over the Android device bridge (`adb`) and the Android
//! asset packaging tool (`aapt`).
//!
//! Every external call goes through a [`CommandRunner`], so the whole surface
//! can be driven by canned output in tests. Parsing is kept in pure functions
//! next to the types they produce:
//!
//! - [`device`] - `adb devices -l`
//! - [`package`] - `pm list packages -f -3`
//! - [`permissions`] - `aapt d permissions`
//!
//! # Example
//!
//! ```rust,ignore
//! use apkgrant_adb::{DeviceBridge, SystemRunner, ToolOverrides, resolve_tools};
//!
//! let tools = resolve_tools(&ToolOverrides::default())?;
//! let bridge = DeviceBridge::new(tools.adb, SystemRunner);
//! for device in bridge.list_devices() {
//!     println!("{device}");
//! }
//! ```

pub mod aapt;
pub mod bridge;
pub mod device;
pub mod error;
pub mod grant;
pub mod ident;
pub mod package;
pub mod permissions;
pub mod runner;
pub mod tools;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use aapt::PackagingTool;
pub use bridge::{DeviceBridge, DeviceContext};
pub use device::{Device, parse_device_list};
pub use error::{AdbError, Result};
pub use grant::{GrantOutcome, GrantReport, PermissionGrant, grant_permissions};
pub use ident::{is_package_name, is_permission_name};
pub use package::{
    MalformedLine, MalformedReason, Package, PackageListing, parse_package_line,
    parse_package_list,
};
pub use permissions::{USES_PERMISSION_MARKER, parse_permissions};
pub use runner::{CommandRunner, Invocation, SystemRunner};
pub use tools::{AAPT, ADB, ToolOverrides, ToolPaths, resolve_tools};

#[cfg(test)]
mod tests;
