//! FFI Module Tests

use super::exports;
use super::*;
use libc::c_int;

#[test]
fn test_c_type_parsing() {
    assert_eq!(CType::parse("int"), Some(CType::Int));
    assert_eq!(CType::parse("INT"), Some(CType::Int));
    assert_eq!(CType::parse("double"), Some(CType::Double));
    assert_eq!(CType::parse("void*"), Some(CType::VoidPtr));
    assert_eq!(CType::parse("char *"), Some(CType::CharPtr));
    assert_eq!(CType::parse("int*"), Some(CType::IntPtr));
    assert_eq!(CType::parse("long"), None);
}

#[test]
fn test_c_type_to_csharp() {
    assert_eq!(CType::Int.to_csharp(), "int");
    assert_eq!(CType::Void.to_csharp(), "void");
    assert_eq!(CType::CharPtr.to_csharp(), "string");
    assert_eq!(CType::IntPtr.to_csharp(), "IntPtr");
    assert_eq!(CType::VoidPtr.to_csharp(), "IntPtr");

    assert!(CType::DoublePtr.is_pointer());
    assert!(!CType::Char.is_pointer());
}

#[test]
fn test_signature_display() {
    let sig = Signature::new(
        "divide",
        vec![
            Param::new(CType::Int, "a"),
            Param::new(CType::Int, "b"),
            Param::new(CType::IntPtr, "result"),
        ],
        CType::Int,
    );
    assert_eq!(sig.to_string(), "int divide(int a, int b, int* result)");

    let sig = Signature::new("tick", vec![], CType::Void);
    assert_eq!(sig.to_string(), "void tick()");
}

#[test]
fn test_export_table() {
    let names: Vec<_> = EXPORTS.iter().map(|e| e.name).collect();
    assert_eq!(names, ["add", "subtract", "multiply", "divide"]);

    let divide = find_export("divide").expect("divide is exported");
    assert_eq!(divide.signature().params.len(), 3);
    assert_eq!(divide.signature().params[2].ty, CType::IntPtr);
    assert!(find_export("modulo").is_none());

    let doc = find_export("add").unwrap().to_function().doc.unwrap();
    assert_eq!(doc.params[0], ("a".to_string(), "First operand".to_string()));
    assert_eq!(doc.returns.as_deref(), Some("The wrapped sum"));
}

#[test]
fn test_exports_match_safe_api() {
    for &(a, b) in &[(1, 2), (-10, 3), (i32::MAX, 1), (i32::MIN, -1), (0, 0)] {
        assert_eq!(exports::add(a, b), crate::arith::add(a, b));
        assert_eq!(exports::subtract(a, b), crate::arith::subtract(a, b));
        assert_eq!(exports::multiply(a, b), crate::arith::multiply(a, b));
    }
}

#[test]
fn test_divide_status_codes() {
    let mut out: c_int = 77;

    let status = unsafe { exports::divide(-10, 3, &mut out) };
    assert_eq!(status, Status::Ok.code());
    assert_eq!(out, -3);

    let status = unsafe { exports::divide(5, 0, &mut out) };
    assert_eq!(status, Status::DivisionByZero.code());
    assert_eq!(out, -3, "output slot must be untouched on error");

    let status = unsafe { exports::divide(5, 1, std::ptr::null_mut()) };
    assert_eq!(status, Status::NullPointer.code());
}

#[test]
fn test_status_round_trip() {
    for status in Status::ALL {
        assert_eq!(Status::from_code(status.code()), Some(status));
    }
    assert_eq!(Status::from_code(42), None);
    assert_eq!(Status::DivisionByZero.macro_name(), "MYLIB_ERR_DIVISION_BY_ZERO");
}

#[test]
fn test_library_filename() {
    #[cfg(target_os = "linux")]
    {
        assert_eq!(library_filename("mylib"), "libmylib.so");
        assert_eq!(library_filename("libmylib.so"), "libmylib.so");
    }
    #[cfg(target_os = "macos")]
    assert_eq!(library_filename("mylib"), "libmylib.dylib");
    #[cfg(target_os = "windows")]
    assert_eq!(library_filename("mylib"), "mylib.dll");
}

#[test]
fn test_loader_missing_library() {
    let loader = LibraryLoader::with_search_paths(vec![std::env::temp_dir()]);
    assert!(loader.find_library("definitely_not_a_real_library_xyz").is_none());
    match loader.load("definitely_not_a_real_library_xyz") {
        Err(LoadError::LibraryNotFound(name)) => {
            assert_eq!(name, "definitely_not_a_real_library_xyz")
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("expected LibraryNotFound"),
    }
}

#[test]
fn test_loader_added_search_path() {
    let dir = tempfile::tempdir().unwrap();
    let lib_name = library_filename("fakearith");
    std::fs::write(dir.path().join(&lib_name), b"not a shared object").unwrap();

    let mut loader = LibraryLoader::with_search_paths(Vec::new());
    assert!(loader.search_paths().is_empty());
    assert!(loader.find_library("fakearith").is_none());

    loader.add_search_path(dir.path());
    assert_eq!(loader.search_paths(), [dir.path().to_path_buf()]);
    assert_eq!(
        loader.find_library("fakearith"),
        Some(dir.path().join(&lib_name))
    );
    // found, but not loadable
    assert!(matches!(
        loader.load("fakearith"),
        Err(LoadError::Load { .. })
    ));
}

#[test]
fn test_load_error_display() {
    let err = LoadError::LibraryNotFound("mylib".to_string());
    assert!(err.to_string().contains("mylib"));

    let err = LoadError::from(crate::arith::ArithError::DivisionByZero);
    assert_eq!(err.to_string(), "division by zero");
}
