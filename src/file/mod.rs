//! File I/O for descriptor documents.
//!
//! This module loads descriptors from disk or stdin, transparently
//! decompressing gzip input, and hands the text to the document parsers.

pub mod loader;
