//! C Type Model
//!
//! Types for describing C function declarations: the exported symbols of this
//! library and the declarations read back out of C headers.

use std::fmt;

/// C types understood by the header tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CType {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `double`
    Double,
    /// `void`
    Void,
    /// `string` (C++ headers)
    String,
    /// `char`
    Char,
    /// `char*`
    CharPtr,
    /// `int*`
    IntPtr,
    /// `float*`
    FloatPtr,
    /// `double*`
    DoublePtr,
    /// `void*`
    VoidPtr,
}

impl CType {
    /// Parse a C type name.
    ///
    /// Case-insensitive; whitespace inside the name is ignored so that
    /// `char *` and `char*` are the same type.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "int" => Some(CType::Int),
            "float" => Some(CType::Float),
            "double" => Some(CType::Double),
            "void" => Some(CType::Void),
            "string" => Some(CType::String),
            "char" => Some(CType::Char),
            "char*" => Some(CType::CharPtr),
            "int*" => Some(CType::IntPtr),
            "float*" => Some(CType::FloatPtr),
            "double*" => Some(CType::DoublePtr),
            "void*" => Some(CType::VoidPtr),
            _ => None,
        }
    }

    /// Check if this type is a pointer type
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            CType::CharPtr | CType::IntPtr | CType::FloatPtr | CType::DoublePtr | CType::VoidPtr
        )
    }

    /// The C# type used for this C type in a `DllImport` declaration.
    pub fn to_csharp(&self) -> &'static str {
        match self {
            CType::Int => "int",
            CType::Float => "float",
            CType::Double => "double",
            CType::Void => "void",
            CType::String => "string",
            CType::Char => "char",
            CType::CharPtr => "string",
            CType::IntPtr | CType::FloatPtr | CType::DoublePtr | CType::VoidPtr => "IntPtr",
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CType::Int => "int",
            CType::Float => "float",
            CType::Double => "double",
            CType::Void => "void",
            CType::String => "string",
            CType::Char => "char",
            CType::CharPtr => "char*",
            CType::IntPtr => "int*",
            CType::FloatPtr => "float*",
            CType::DoublePtr => "double*",
            CType::VoidPtr => "void*",
        };
        f.write_str(name)
    }
}

/// A named function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: CType,
    pub name: String,
}

impl Param {
    pub fn new(ty: CType, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

/// C function signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Function name
    pub name: String,
    /// Parameters in declaration order
    pub params: Vec<Param>,
    /// Return type
    pub return_type: CType,
}

impl Signature {
    /// Create a new function signature
    pub fn new(name: impl Into<String>, params: Vec<Param>, return_type: CType) -> Self {
        Self {
            name: name.into(),
            params,
            return_type,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", param.ty, param.name)?;
        }
        write!(f, ")")
    }
}

/// Documentation attached to a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// Free-form summary, one entry per line
    pub summary: Vec<String>,
    /// `@param` descriptions in declaration order
    pub params: Vec<(String, String)>,
    /// `@return` description
    pub returns: Option<String>,
}

impl DocComment {
    /// A comment with a single summary line
    pub fn summary(line: impl Into<String>) -> Self {
        Self {
            summary: vec![line.into()],
            ..Self::default()
        }
    }
}

/// A declared function together with its documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub signature: Signature,
    pub doc: Option<DocComment>,
}
