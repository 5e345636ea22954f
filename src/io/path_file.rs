use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::geometry::WaypointPath;
use crate::math::Point2;

/// Writes a path as a bracketed list of `[x, y]` pairs, one per line.
///
/// ```text
/// [
///   [9.0, 1.0],
///   [1.0, 1.0]
/// ]
/// ```
///
/// The output parses both as JSON and as a YAML flow sequence.
///
/// # Errors
///
/// Returns `FurrowError::Io` if the writer fails.
pub fn write_path<W: Write>(mut writer: W, path: &WaypointPath) -> Result<()> {
    writer.write_all(b"[\n")?;
    for (i, p) in path.points.iter().enumerate() {
        let sep = if i + 1 < path.len() { "," } else { "" };
        writeln!(writer, "  [{:?}, {:?}]{sep}", p.x, p.y)?;
    }
    writer.write_all(b"]")?;
    writer.flush()?;
    Ok(())
}

/// Formats a path the way [`write_path`] writes it.
#[must_use]
pub fn format_path(path: &WaypointPath) -> String {
    let mut out = String::from("[\n");
    let lines: Vec<String> = path
        .points
        .iter()
        .map(|p| format!("  [{:?}, {:?}]", p.x, p.y))
        .collect();
    out.push_str(&lines.join(",\n"));
    if !lines.is_empty() {
        out.push('\n');
    }
    out.push(']');
    out
}

/// Parses a path from a list of `[x, y]` pairs.
///
/// # Errors
///
/// Returns `FurrowError::Format` if the text is not a list of number pairs.
pub fn parse_path(text: &str) -> Result<WaypointPath> {
    let pairs: Vec<[f64; 2]> = serde_json::from_str(text)?;
    Ok(pairs.into_iter().map(|[x, y]| Point2::new(x, y)).collect::<Vec<_>>().into())
}

/// Reads a path from a reader.
///
/// # Errors
///
/// Returns `FurrowError::Io` if reading fails, or `FurrowError::Format` for
/// malformed content.
pub fn read_path<R: Read>(reader: R) -> Result<WaypointPath> {
    let pairs: Vec<[f64; 2]> = serde_json::from_reader(reader)?;
    Ok(pairs.into_iter().map(|[x, y]| Point2::new(x, y)).collect::<Vec<_>>().into())
}

/// Saves a path to a file, replacing any existing content.
///
/// # Errors
///
/// Returns `FurrowError::Io` if the file cannot be created or written.
pub fn save_path(file: impl AsRef<Path>, path: &WaypointPath) -> Result<()> {
    write_path(BufWriter::new(File::create(file)?), path)
}

/// Loads a path saved by [`save_path`].
///
/// # Errors
///
/// Returns `FurrowError::Io` if the file cannot be opened, or
/// `FurrowError::Format` for malformed content.
pub fn load_path(file: impl AsRef<Path>) -> Result<WaypointPath> {
    read_path(BufReader::new(File::open(file)?))
}
