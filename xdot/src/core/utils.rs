//! File helpers for the command line tool. The parsers never touch the file
//! system; they work on strings.

use std::fs::{self, File};
use std::io::{Result, Write};

pub fn save_to_file(filename: &str, content: &str) -> Result<()> {
    let mut f = File::create(filename)?;
    f.write_all(content.as_bytes())?;
    log::info!("Wrote {} ({} bytes)", filename, content.len());
    Ok(())
}

pub fn load_from_file(filename: &str) -> Result<String> {
    let content = fs::read_to_string(filename)?;
    log::debug!("Read {} ({} bytes)", filename, content.len());
    Ok(content)
}

#[test]
fn save_and_load() {
    let path = std::env::temp_dir().join("xdot_utils_test.svg");
    let path = path.to_string_lossy().to_string();
    save_to_file(&path, "<svg></svg>").unwrap();
    assert_eq!(load_from_file(&path).unwrap(), "<svg></svg>");
    let _ = fs::remove_file(&path);
    assert!(load_from_file(&path).is_err());
}
