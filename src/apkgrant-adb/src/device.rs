//! Connected devices as reported by `adb devices -l`.

use std::fmt;

/// One attached device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    /// Serial assigned by adb, unique per connected device.
    pub serial: String,
    /// Free-text remainder of the line: state, usb path, product, model...
    pub descriptor: String,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.serial, self.descriptor)
    }
}

/// Parse the long-form device listing.
///
/// ```text
/// List of devices attached
/// R58M123ABC     device usb:1-1 product:a51 model:SM_A515F device:a51 transport_id:3
/// emulator-5554  device product:sdk_gphone64 model:sdk_gphone64 transport_id:1
/// ```
///
/// The header line is dropped. Blank lines and adb server status lines
/// (`* daemon started successfully`) are skipped.
pub fn parse_device_list(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter(|line| !line.starts_with("* "))
        .skip(1)
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let serial = tokens.next()?;
            Some(Device {
                serial: serial.to_string(),
                descriptor: tokens.collect::<Vec<_>>().join(" "),
            })
        })
        .collect()
}
