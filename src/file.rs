// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use serde::Serialize;

/// Serialize `value` as JSON to `out` (a file, parents created) or stdout.
/// Pretty by default; `pretty = false` gives one compact line.
pub fn write_json<T: Serialize + ?Sized>(value: &T, out: Option<&Path>, pretty: bool) -> io::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    ensure_directory(parent)?;
                }
            }
            let file = File::create(path)?; // truncate/overwrite
            let mut w = BufWriter::new(file);
            emit(&mut w, value, pretty)?;
            w.flush()
        }
        None => {
            let stdout = io::stdout();
            let mut w = stdout.lock();
            emit(&mut w, value, pretty)?;
            w.flush()
        }
    }
}

/// JSON text for `value`, same layout rules as [`write_json`].
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn emit<W: Write, T: Serialize + ?Sized>(w: &mut W, value: &T, pretty: bool) -> io::Result<()> {
    let text = to_json_string(value, pretty)?;
    w.write_all(text.as_bytes())?;
    w.write_all(b"\n")
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
