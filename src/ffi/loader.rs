//! Dynamic Library Loader
//!
//! Safe wrapper around libloading for calling a built `mylib` shared object
//! through its C symbols.

use std::ffi::CString;
use std::path::{Path, PathBuf};

use libc::c_int;
use libloading::{Library, Symbol};
use thiserror::Error;
use tracing::debug;

use super::exports::Status;
use crate::arith::{ArithError, Operation};

/// Error type for loading and calling a shared library
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load library '{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("symbol '{name}' not found in '{path}': {source}")]
    SymbolNotFound {
        name: String,
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("invalid symbol name: {0}")]
    InvalidSymbol(String),

    #[error("library '{0}' not found in search paths")]
    LibraryNotFound(String),

    #[error("unexpected status code {0} from divide")]
    UnknownStatus(c_int),

    #[error(transparent)]
    Arith(#[from] ArithError),
}

/// A dynamically loaded library
pub struct DynamicLibrary {
    /// Path to the library
    path: PathBuf,
    /// The loaded library handle
    library: Library,
}

impl DynamicLibrary {
    /// Load a library from the given path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref().to_path_buf();

        // SAFETY: loading runs the library's initializers. The caller vouches
        // for the path.
        let library = unsafe { Library::new(&path) }.map_err(|source| LoadError::Load {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded shared library");

        Ok(Self { path, library })
    }

    /// Get the path to this library
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a symbol and copy out its value.
    ///
    /// # Safety
    ///
    /// `T` must match the actual type of the exported symbol.
    pub unsafe fn symbol<T: Copy>(&self, name: &str) -> Result<T, LoadError> {
        let c_name = CString::new(name).map_err(|_| LoadError::InvalidSymbol(name.to_string()))?;

        let symbol: Symbol<T> = unsafe { self.library.get(c_name.as_bytes_with_nul()) }
            .map_err(|source| LoadError::SymbolNotFound {
                name: name.to_string(),
                path: self.path.clone(),
                source,
            })?;
        debug!(symbol = name, "resolved symbol");

        Ok(*symbol)
    }
}

type BinaryFn = unsafe extern "C" fn(c_int, c_int) -> c_int;
type DivideFn = unsafe extern "C" fn(c_int, c_int, *mut c_int) -> c_int;

/// The four arithmetic exports resolved from a loaded library.
///
/// The function pointers stay valid for as long as `library` is held.
pub struct ArithLibrary {
    library: DynamicLibrary,
    add: BinaryFn,
    subtract: BinaryFn,
    multiply: BinaryFn,
    divide: DivideFn,
}

impl ArithLibrary {
    /// Load a shared object and resolve all four exports.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let library = DynamicLibrary::load(path)?;

        // SAFETY: the types mirror the declarations in include/mylib.h.
        let (add, subtract, multiply, divide) = unsafe {
            (
                library.symbol::<BinaryFn>("add")?,
                library.symbol::<BinaryFn>("subtract")?,
                library.symbol::<BinaryFn>("multiply")?,
                library.symbol::<DivideFn>("divide")?,
            )
        };

        Ok(Self {
            library,
            add,
            subtract,
            multiply,
            divide,
        })
    }

    pub fn path(&self) -> &Path {
        self.library.path()
    }

    pub fn add(&self, a: i32, b: i32) -> i32 {
        unsafe { (self.add)(a, b) }
    }

    pub fn subtract(&self, a: i32, b: i32) -> i32 {
        unsafe { (self.subtract)(a, b) }
    }

    pub fn multiply(&self, a: i32, b: i32) -> i32 {
        unsafe { (self.multiply)(a, b) }
    }

    pub fn divide(&self, a: i32, b: i32) -> Result<i32, LoadError> {
        let mut quotient: c_int = 0;
        let status = unsafe { (self.divide)(a, b, &mut quotient) };
        match Status::from_code(status) {
            Some(Status::Ok) => Ok(quotient),
            Some(Status::DivisionByZero) => Err(ArithError::DivisionByZero.into()),
            Some(Status::NullPointer) | None => Err(LoadError::UnknownStatus(status)),
        }
    }

    /// Evaluate an operation through the loaded symbols.
    pub fn call(&self, op: Operation, a: i32, b: i32) -> Result<i32, LoadError> {
        match op {
            Operation::Add => Ok(self.add(a, b)),
            Operation::Subtract => Ok(self.subtract(a, b)),
            Operation::Multiply => Ok(self.multiply(a, b)),
            Operation::Divide => self.divide(a, b),
        }
    }
}

/// Library lookup with search paths
pub struct LibraryLoader {
    /// Search paths for libraries
    search_paths: Vec<PathBuf>,
}

impl LibraryLoader {
    /// Create a new library loader
    pub fn new() -> Self {
        Self {
            search_paths: default_search_paths(),
        }
    }

    /// Create a loader that only searches the given directories
    pub fn with_search_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths: paths,
        }
    }

    /// Add a search path
    pub fn add_search_path(&mut self, path: impl AsRef<Path>) {
        self.search_paths.push(path.as_ref().to_path_buf());
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find a library by name or path
    pub fn find_library(&self, name: &str) -> Option<PathBuf> {
        let path = Path::new(name);
        if path.is_file() {
            return Some(path.to_path_buf());
        }

        let lib_name = library_filename(name);
        self.search_paths
            .iter()
            .map(|dir| dir.join(&lib_name))
            .find(|candidate| candidate.is_file())
    }

    /// Find and load the arithmetic library
    pub fn load(&self, name: &str) -> Result<ArithLibrary, LoadError> {
        let path = self
            .find_library(name)
            .ok_or_else(|| LoadError::LibraryNotFound(name.to_string()))?;
        ArithLibrary::load(path)
    }
}

impl Default for LibraryLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the default library search paths for this platform
fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    #[cfg(target_os = "linux")]
    {
        paths.push(PathBuf::from("/usr/lib"));
        paths.push(PathBuf::from("/usr/local/lib"));
        paths.push(PathBuf::from("/lib"));
        paths.push(PathBuf::from("/lib64"));
        paths.push(PathBuf::from("/usr/lib64"));

        if let Ok(ld_path) = std::env::var("LD_LIBRARY_PATH") {
            paths.extend(ld_path.split(':').filter(|p| !p.is_empty()).map(PathBuf::from));
        }
    }

    #[cfg(target_os = "macos")]
    {
        paths.push(PathBuf::from("/usr/lib"));
        paths.push(PathBuf::from("/usr/local/lib"));
        paths.push(PathBuf::from("/opt/homebrew/lib"));

        if let Ok(dyld_path) = std::env::var("DYLD_LIBRARY_PATH") {
            paths.extend(dyld_path.split(':').filter(|p| !p.is_empty()).map(PathBuf::from));
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(path) = std::env::var("PATH") {
            paths.extend(path.split(';').filter(|p| !p.is_empty()).map(PathBuf::from));
        }
    }

    paths
}

/// Construct the platform-specific library filename
pub fn library_filename(name: &str) -> String {
    #[cfg(target_os = "macos")]
    {
        if name.starts_with("lib") && name.ends_with(".dylib") {
            name.to_string()
        } else {
            format!("lib{}.dylib", name)
        }
    }

    #[cfg(target_os = "windows")]
    {
        if name.ends_with(".dll") {
            name.to_string()
        } else {
            format!("{}.dll", name)
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        if name.starts_with("lib") && name.ends_with(".so") {
            name.to_string()
        } else {
            format!("lib{}.so", name)
        }
    }
}
