//! C ABI exports
//!
//! These are the symbols a `cdylib` build of this crate makes visible:
//!
//! ```c
//! int add(int a, int b);
//! int subtract(int a, int b);
//! int multiply(int a, int b);
//! int divide(int a, int b, int* result);
//! ```

use libc::c_int;

use super::types::{CType, DocComment, Function, Param, Signature};
use crate::arith::{self, ArithError};

/// Status codes returned by `divide`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok = 0,
    DivisionByZero = 1,
    NullPointer = 2,
}

impl Status {
    /// Name of the matching `#define` in the C header.
    pub fn macro_name(self) -> &'static str {
        match self {
            Status::Ok => "MYLIB_OK",
            Status::DivisionByZero => "MYLIB_ERR_DIVISION_BY_ZERO",
            Status::NullPointer => "MYLIB_ERR_NULL_POINTER",
        }
    }

    pub fn from_code(code: c_int) -> Option<Self> {
        match code {
            0 => Some(Status::Ok),
            1 => Some(Status::DivisionByZero),
            2 => Some(Status::NullPointer),
            _ => None,
        }
    }

    pub fn code(self) -> c_int {
        self as c_int
    }

    pub const ALL: [Status; 3] = [Status::Ok, Status::DivisionByZero, Status::NullPointer];
}

impl From<ArithError> for Status {
    fn from(err: ArithError) -> Self {
        match err {
            ArithError::DivisionByZero => Status::DivisionByZero,
        }
    }
}

/// Add two integers, wrapping on overflow.
#[no_mangle]
pub extern "C" fn add(a: c_int, b: c_int) -> c_int {
    arith::add(a, b)
}

/// Subtract `b` from `a`, wrapping on overflow.
#[no_mangle]
pub extern "C" fn subtract(a: c_int, b: c_int) -> c_int {
    arith::subtract(a, b)
}

/// Multiply two integers, wrapping on overflow.
#[no_mangle]
pub extern "C" fn multiply(a: c_int, b: c_int) -> c_int {
    arith::multiply(a, b)
}

/// Divide `a` by `b`, truncating toward zero.
///
/// Writes the quotient to `result` and returns `MYLIB_OK`. A zero divisor
/// returns `MYLIB_ERR_DIVISION_BY_ZERO` and a null `result` returns
/// `MYLIB_ERR_NULL_POINTER`; neither writes to `result`.
///
/// # Safety
///
/// `result` must be null or point to writable memory for one `int`.
#[no_mangle]
pub unsafe extern "C" fn divide(a: c_int, b: c_int, result: *mut c_int) -> c_int {
    if result.is_null() {
        return Status::NullPointer.code();
    }
    match arith::divide(a, b) {
        Ok(quotient) => {
            // SAFETY: non-null and writable per the contract above.
            unsafe { result.write(quotient) };
            Status::Ok.code()
        }
        Err(err) => Status::from(err).code(),
    }
}

/// Static description of one exported symbol
#[derive(Debug, Clone, Copy)]
pub struct ExportDecl {
    pub name: &'static str,
    pub return_type: CType,
    /// (type, name, description)
    pub params: &'static [(CType, &'static str, &'static str)],
    pub summary: &'static str,
    pub returns: &'static str,
}

impl ExportDecl {
    pub fn signature(&self) -> Signature {
        Signature::new(
            self.name,
            self.params
                .iter()
                .map(|&(ty, name, _)| Param::new(ty, name))
                .collect(),
            self.return_type,
        )
    }

    pub fn to_function(&self) -> Function {
        Function {
            signature: self.signature(),
            doc: Some(DocComment {
                summary: vec![self.summary.to_string()],
                params: self
                    .params
                    .iter()
                    .map(|&(_, name, desc)| (name.to_string(), desc.to_string()))
                    .collect(),
                returns: Some(self.returns.to_string()),
            }),
        }
    }
}

const BINARY_PARAMS: &[(CType, &str, &str)] = &[
    (CType::Int, "a", "First operand"),
    (CType::Int, "b", "Second operand"),
];

/// Every exported symbol, in header order.
pub const EXPORTS: &[ExportDecl] = &[
    ExportDecl {
        name: "add",
        return_type: CType::Int,
        params: BINARY_PARAMS,
        summary: "Add two integers, wrapping on overflow",
        returns: "The wrapped sum",
    },
    ExportDecl {
        name: "subtract",
        return_type: CType::Int,
        params: BINARY_PARAMS,
        summary: "Subtract b from a, wrapping on overflow",
        returns: "The wrapped difference",
    },
    ExportDecl {
        name: "multiply",
        return_type: CType::Int,
        params: BINARY_PARAMS,
        summary: "Multiply two integers, wrapping on overflow",
        returns: "The wrapped product",
    },
    ExportDecl {
        name: "divide",
        return_type: CType::Int,
        params: &[
            (CType::Int, "a", "Dividend"),
            (CType::Int, "b", "Divisor"),
            (CType::IntPtr, "result", "Receives the quotient on success"),
        ],
        summary: "Divide a by b, truncating toward zero",
        returns: "MYLIB_OK or an MYLIB_ERR_* status code",
    },
];

/// Look up an export by symbol name.
pub fn find_export(name: &str) -> Option<&'static ExportDecl> {
    EXPORTS.iter().find(|decl| decl.name == name)
}
