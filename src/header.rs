//! C header rendering
//!
//! Produces `include/mylib.h` from the export table so the shipped header and
//! the compiled symbols cannot drift apart.

use crate::ffi::{ExportDecl, Status, EXPORTS};

/// Include guard macro.
pub const GUARD: &str = "MYLIB_H";

/// Render the complete C header for all exports.
pub fn render_header() -> String {
    let mut out = String::new();

    out.push_str(&format!("#ifndef {}\n#define {}\n\n", GUARD, GUARD));

    out.push_str("#ifdef _WIN32\n");
    out.push_str("  #define EXTERN_C_API __declspec(dllexport)\n");
    out.push_str("#else\n");
    out.push_str("  #define EXTERN_C_API\n");
    out.push_str("#endif\n\n");

    for status in Status::ALL {
        out.push_str(&format!("#define {} {}\n", status.macro_name(), status.code()));
    }
    out.push('\n');

    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n");

    for decl in EXPORTS {
        out.push('\n');
        out.push_str(&render_decl(decl));
    }

    out.push_str("\n#ifdef __cplusplus\n}\n#endif\n\n");
    out.push_str(&format!("#endif /* {} */\n", GUARD));
    out
}

/// Render one documented declaration.
fn render_decl(decl: &ExportDecl) -> String {
    let mut out = String::from("/**\n");
    out.push_str(&format!(" * {}\n", decl.summary));
    for (_, name, desc) in decl.params {
        out.push_str(&format!(" * @param {} {}\n", name, desc));
    }
    out.push_str(&format!(" * @return {}\n", decl.returns));
    out.push_str(" */\n");

    let params: Vec<String> = decl
        .params
        .iter()
        .map(|(ty, name, _)| format!("{} {}", ty, name))
        .collect();
    out.push_str(&format!(
        "EXTERN_C_API {} {}({});\n",
        decl.return_type,
        decl.name,
        params.join(", ")
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindgen::parse_header;

    #[test]
    fn test_header_matches_shipped_file() {
        let shipped = include_str!("../include/mylib.h");
        assert_eq!(render_header(), shipped);
    }

    #[test]
    fn test_header_parses_back_to_exports() {
        let functions = parse_header(&render_header()).expect("rendered header parses");
        assert_eq!(functions.len(), EXPORTS.len());
        for (function, decl) in functions.iter().zip(EXPORTS) {
            assert_eq!(function.signature, decl.signature());
            assert_eq!(function.doc, decl.to_function().doc);
        }
    }

    #[test]
    fn test_header_declares_status_codes() {
        let header = render_header();
        assert!(header.contains("#define MYLIB_OK 0\n"));
        assert!(header.contains("#define MYLIB_ERR_DIVISION_BY_ZERO 1\n"));
        assert!(header.contains("#define MYLIB_ERR_NULL_POINTER 2\n"));
        assert!(header.contains("EXTERN_C_API int divide(int a, int b, int* result);\n"));
    }
}
