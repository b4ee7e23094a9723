//! Unity binding generator
//!
//! Reads C headers that mark their exports with `EXTERN_C_API` and writes a
//! C# class of `[DllImport]` declarations, carrying the header's doc comments
//! over as XML documentation.
//!
//! ```ignore
//! let mut generator = Generator::new();
//! generator.read_header("include/mylib.h")?;
//! let path = generator.write("CppNative", "mylib", "Assets/Plugins")?;
//! ```

mod csharp;
mod parse;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::ffi::Function;

pub use csharp::render_class;
pub use parse::parse_header;

/// Default generated class name.
pub const DEFAULT_CLASS_NAME: &str = "CppNative";

/// Binding generator errors.
#[derive(Debug, Error)]
pub enum BindgenError {
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported type '{ty}' in declaration of '{function}'")]
    UnknownType { ty: String, function: String },

    #[error("cannot parse parameter '{param}' of '{function}'")]
    MalformedParam { param: String, function: String },

    #[error("malformed comment: {0}")]
    MalformedComment(String),

    #[error("no EXTERN_C_API declarations found in '{0}'")]
    NoFunctions(PathBuf),
}

/// Accumulates declarations from one or more headers and renders them.
#[derive(Debug, Default)]
pub struct Generator {
    functions: Vec<Function>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a header file and append its declarations.
    ///
    /// Returns the number of declarations found.
    pub fn read_header(&mut self, path: impl AsRef<Path>) -> Result<usize, BindgenError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| BindgenError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let count = self.add_source(&source)?;
        if count == 0 {
            return Err(BindgenError::NoFunctions(path.to_path_buf()));
        }
        info!(header = %path.display(), count, "read header");
        Ok(count)
    }

    /// Parse header text and append its declarations.
    pub fn add_source(&mut self, source: &str) -> Result<usize, BindgenError> {
        let functions = parse_header(source)?;
        let count = functions.len();
        self.functions.extend(functions);
        Ok(count)
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }

    /// Render the C# source.
    pub fn render(&self, class_name: &str, lib_name: &str) -> String {
        render_class(class_name, lib_name, &self.functions)
    }

    /// Write `<output_dir>/<class_name>.cs` and return its path.
    pub fn write(
        &self,
        class_name: &str,
        lib_name: &str,
        output_dir: impl AsRef<Path>,
    ) -> Result<PathBuf, BindgenError> {
        let path = output_dir.as_ref().join(format!("{}.cs", class_name));
        fs::write(&path, self.render(class_name, lib_name)).map_err(|source| {
            BindgenError::Io {
                path: path.clone(),
                source,
            }
        })?;
        info!(output = %path.display(), functions = self.functions.len(), "wrote bindings");
        Ok(path)
    }
}
