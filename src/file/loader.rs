//! Descriptor file loading.
//!
//! This module reads descriptor documents from files or stdin and parses them
//! into `DocTree` structures. The format is taken from the file extension
//! (`.xml`, `.yaml`/`.yml`, `.json`, each optionally followed by `.gz`) and
//! sniffed from the content otherwise.

use crate::document::parser::{parse_document, DocFormat};
use crate::document::tree::DocTree;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Loads and parses a descriptor file from the filesystem.
///
/// # Examples
///
/// ```no_run
/// use pomassert::file::loader::load_document_file;
///
/// let tree = load_document_file("pom.xml").unwrap();
/// println!("{} elements", tree.elements().len());
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - The contents cannot be parsed; the cause is a
///   [`ParseError`](crate::error::ParseError)
pub fn load_document_file<P: AsRef<Path>>(path: P) -> Result<DocTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let format = DocFormat::from_path(path_ref).unwrap_or_else(|| DocFormat::sniff(&content));
    tracing::debug!(path = %path_ref.display(), format = format.name(), "loading document");

    parse_document(&content, format)
        .with_context(|| format!("Failed to parse {}", path_ref.display()))
}

/// Loads and parses a descriptor from standard input.
///
/// Gzip input is detected by its magic bytes; the format is sniffed.
pub fn load_document_from_stdin() -> Result<DocTree> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    let format = DocFormat::sniff(&content);
    parse_document(&content, format).context("Failed to parse document from stdin")
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = fs::read(path).context("Failed to open gzipped file")?;
    decompress_gzip_bytes(&bytes)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped content - data may be corrupted")?;
    Ok(content)
}
