//! Interactive device selection.

use std::io::{self, BufRead, Write};

use apkgrant_adb::Device;

/// Print the numbered device menu: `(1) - <serial> [<descriptor>]`.
pub fn print_menu<W: Write>(out: &mut W, devices: &[Device]) -> io::Result<()> {
    for (idx, device) in devices.iter().enumerate() {
        writeln!(out, "({}) - {}", idx + 1, device)?;
    }
    out.flush()
}

/// Read lines until one is a 1-based index in `[1, count]`.
///
/// Anything else is silently ignored and the next line is read. Returns the
/// zero-based index, or `None` if the input ends first.
pub fn select_index<B: BufRead>(count: usize, mut input: B) -> io::Result<Option<usize>> {
    let mut line = Vec::new();
    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        let text = String::from_utf8_lossy(&line);
        if let Ok(choice) = text.trim().parse::<usize>()
            && (1..=count).contains(&choice)
        {
            return Ok(Some(choice - 1));
        }
    }
}
