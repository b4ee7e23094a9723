//! mylib - C-callable integer arithmetic
//!
//! Four functions on 32-bit signed integers, exported with the C calling
//! convention from a shared library (`libmylib.so`, `libmylib.dylib`,
//! `mylib.dll`) so that C, C++ and Unity/C# code can call them directly.
//!
//! # Overflow and division
//!
//! - `add`, `subtract`, `multiply` wrap modulo 2^32 on overflow.
//! - `divide` truncates toward zero. A zero divisor is reported, never trapped:
//!   [`arith::divide`] returns [`ArithError::DivisionByZero`], and the C export
//!   returns `MYLIB_ERR_DIVISION_BY_ZERO`.
//!
//! # Example
//!
//! ```rust
//! use mylib::arith::{self, ArithError};
//!
//! assert_eq!(arith::add(i32::MAX, 1), i32::MIN);
//! assert_eq!(arith::divide(-10, 3), Ok(-3));
//! assert_eq!(arith::divide(1, 0), Err(ArithError::DivisionByZero));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐
//! │ C / C# caller│     │  mylib-cli    │
//! └──────┬───────┘     └──────┬────────┘
//!        │ C ABI              │ libloading (--lib)
//!        ▼                    ▼
//! ┌─────────────────────────────────────┐
//! │ ffi::exports (#[no_mangle])         │
//! └──────────────────┬──────────────────┘
//!                    ▼
//!            ┌──────────────┐
//!            │    arith     │
//!            └──────────────┘
//!
//! include/mylib.h ──► bindgen ──► CppNative.cs
//! ```
//!
//! The shipped header is rendered by [`header::render_header`] from the same
//! export table the symbols are defined next to; [`bindgen`] turns any
//! `EXTERN_C_API` header into a Unity `DllImport` class.

pub mod arith;
pub mod bindgen;
pub mod config;
pub mod ffi;
pub mod header;
pub mod logging;

pub use arith::{ArithError, Operation};
pub use ffi::{ArithLibrary, LoadError, Status};
