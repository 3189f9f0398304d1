//! CLI styling and formatting.

use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Styled help theme.
pub fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
        .valid(AnsiColor::Cyan.on_default())
        .invalid(AnsiColor::Yellow.on_default())
}

/// After-help section with the run outline and environment variables.
pub const AFTER_HELP: &str = color_print::cstr!(
    r#"<cyan,bold>WHAT IT DOES</>
    1. Lists devices with <green>adb devices -l</> and asks which one to use
    2. Lists third-party packages with <green>pm list packages -f -3</>
    3. For each package: pulls the APK into the work directory, reads its
       permissions with <green>aapt d permissions</>, deletes the APK and runs
       <green>pm grant</> for every declared permission

<cyan,bold>ENVIRONMENT VARIABLES</>
    <yellow>APKGRANT_ADB</>         Path to the adb executable (alternative to --adb)
    <yellow>APKGRANT_AAPT</>        Path to the aapt executable (alternative to --aapt)
    <yellow>APKGRANT_LOG_LEVEL</>   Log verbosity (error, warn, info, debug, trace)
    <yellow>RUST_LOG</>             Full tracing filter, overrides every level flag"#
);
