//! Static file serving
//!
//! This module resolves request targets to files below the configured
//! server root and reads them through a pluggable filesystem.

pub mod fs;
pub mod resolver;

pub use fs::{FileStat, FileSystem, FsError, LocalFs, MemoryFs};
pub use resolver::{ResolvedFile, Resolver};
