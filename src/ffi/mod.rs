//! FFI Module for mylib
//!
//! The C ABI surface of the library and the tools for talking to it from the
//! outside.
//!
//! # Architecture
//!
//! ```text
//! C / C# / Unity caller
//!       │
//!       ▼
//! libmylib.so / libmylib.dylib / mylib.dll   (crate-type = "cdylib")
//!       │
//!       ▼
//! exports: add, subtract, multiply, divide   (#[no_mangle] extern "C")
//!       │
//!       ▼
//! arith (safe Rust API)
//! ```
//!
//! [`ArithLibrary`] goes the other way: it loads a built shared object with
//! libloading and calls the same four symbols, which is how the CLI and the
//! ABI tests exercise a real build.
//!
//! # Example
//!
//! ```ignore
//! let lib = ArithLibrary::load("target/release/libmylib.so")?;
//! assert_eq!(lib.add(1, 2), 3);
//! ```

pub mod exports;
mod loader;
mod types;

pub use exports::{find_export, ExportDecl, Status, EXPORTS};
pub use loader::{library_filename, ArithLibrary, DynamicLibrary, LibraryLoader, LoadError};
pub use types::{CType, DocComment, Function, Param, Signature};

#[cfg(test)]
mod tests;
