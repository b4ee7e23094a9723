//! C# rendering
//!
//! Emits a static class of `[DllImport]` externs that Unity can use to call
//! the native library on every player platform.

use crate::ffi::{DocComment, Function};

/// C# reserved keywords. A C identifier that collides with one needs an `@`
/// prefix in the generated source.
const CSHARP_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Render the complete C# source file for `functions`.
pub fn render_class(class_name: &str, lib_name: &str, functions: &[Function]) -> String {
    // IntPtr lives in System
    let needs_system = functions.iter().any(|f| {
        let sig = &f.signature;
        std::iter::once(sig.return_type)
            .chain(sig.params.iter().map(|p| p.ty))
            .any(|ty| ty.to_csharp() == "IntPtr")
    });

    let mut out = String::new();
    if needs_system {
        out.push_str("using System;\n");
    }
    out.push_str("using System.Runtime.InteropServices;\n\n");
    out.push_str(&format!("public static class {}\n{{\n", class_name));
    out.push_str("#if UNITY_STANDALONE_WIN || UNITY_EDITOR_WIN\n");
    out.push_str(&format!(
        "    const string LIB_NAME = \"{0}\"; // {0}.dll\n",
        lib_name
    ));
    out.push_str("#elif UNITY_STANDALONE_LINUX || UNITY_EDITOR_LINUX\n");
    out.push_str(&format!(
        "    const string LIB_NAME = \"lib{}.so\"; // Linux\n",
        lib_name
    ));
    out.push_str("#elif UNITY_STANDALONE_OSX || UNITY_EDITOR_OSX\n");
    out.push_str(&format!(
        "    const string LIB_NAME = \"lib{}.dylib\"; // macOS\n",
        lib_name
    ));
    out.push_str("#else\n");
    out.push_str("    const string LIB_NAME = \"__Internal\"; // iOS uses static linking\n");
    out.push_str("#endif\n\n");

    for function in functions {
        out.push_str(&render_function(function));
        out.push('\n');
    }

    out.push_str("\n}\n");
    out
}

fn render_function(function: &Function) -> String {
    let sig = &function.signature;
    let mut out = String::from("\n");

    if let Some(doc) = &function.doc {
        out.push_str(&render_doc(doc));
    }

    let params: Vec<String> = sig
        .params
        .iter()
        .map(|p| format!("{} {}", p.ty.to_csharp(), csharp_ident(&p.name)))
        .collect();

    out.push_str("    [DllImport(LIB_NAME)]\n");
    out.push_str(&format!(
        "    public static extern {} {}({});",
        sig.return_type.to_csharp(),
        csharp_ident(&sig.name),
        params.join(", ")
    ));
    out
}

fn render_doc(doc: &DocComment) -> String {
    let mut out = String::from("    /// <summary>\n");
    for line in &doc.summary {
        out.push_str(&format!("    /// {}\n", escape_xml(line)));
    }
    out.push_str("    /// </summary>\n");

    for (name, desc) in &doc.params {
        out.push_str(&format!(
            "    /// <param name=\"{}\">{}</param>\n",
            escape_xml(name),
            escape_xml(desc)
        ));
    }

    if let Some(returns) = doc.returns.as_deref().filter(|r| !r.is_empty()) {
        out.push_str(&format!("    /// <returns>{}</returns>\n", escape_xml(returns)));
    }
    out
}

fn csharp_ident(name: &str) -> String {
    if CSHARP_KEYWORDS.contains(&name) {
        format!("@{}", name)
    } else {
        name.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{CType, Param, Signature};

    fn function(name: &str, params: Vec<Param>, ret: CType, doc: Option<DocComment>) -> Function {
        Function {
            signature: Signature::new(name, params, ret),
            doc,
        }
    }

    #[test]
    fn test_render_single_function() {
        let add = function(
            "add",
            vec![Param::new(CType::Int, "a"), Param::new(CType::Int, "b")],
            CType::Int,
            Some(DocComment {
                summary: vec!["Add two integers".to_string()],
                params: vec![("a".to_string(), "First".to_string())],
                returns: Some("The sum".to_string()),
            }),
        );

        let expected = r#"using System.Runtime.InteropServices;

public static class CppNative
{
#if UNITY_STANDALONE_WIN || UNITY_EDITOR_WIN
    const string LIB_NAME = "mylib"; // mylib.dll
#elif UNITY_STANDALONE_LINUX || UNITY_EDITOR_LINUX
    const string LIB_NAME = "libmylib.so"; // Linux
#elif UNITY_STANDALONE_OSX || UNITY_EDITOR_OSX
    const string LIB_NAME = "libmylib.dylib"; // macOS
#else
    const string LIB_NAME = "__Internal"; // iOS uses static linking
#endif


    /// <summary>
    /// Add two integers
    /// </summary>
    /// <param name="a">First</param>
    /// <returns>The sum</returns>
    [DllImport(LIB_NAME)]
    public static extern int add(int a, int b);

}
"#;
        assert_eq!(render_class("CppNative", "mylib", &[add]), expected);
    }

    #[test]
    fn test_pointer_params_pull_in_system() {
        let divide = function(
            "divide",
            vec![
                Param::new(CType::Int, "a"),
                Param::new(CType::Int, "b"),
                Param::new(CType::IntPtr, "result"),
            ],
            CType::Int,
            None,
        );
        let out = render_class("Native", "calc", &[divide]);
        assert!(out.starts_with("using System;\nusing System.Runtime.InteropServices;\n"));
        assert!(out.contains("public static extern int divide(int a, int b, IntPtr result);"));
        assert!(!out.contains("<summary>"));
    }

    #[test]
    fn test_strings_do_not_need_system() {
        let greet = function(
            "greet",
            vec![Param::new(CType::CharPtr, "name")],
            CType::Void,
            None,
        );
        let out = render_class("Native", "calc", &[greet]);
        assert!(out.starts_with("using System.Runtime.InteropServices;"));
        assert!(out.contains("public static extern void greet(string name);"));
    }

    #[test]
    fn test_keywords_and_xml_are_escaped() {
        let f = function(
            "copy",
            vec![Param::new(CType::VoidPtr, "out")],
            CType::Void,
            Some(DocComment::summary("Copies a < b & c")),
        );
        let out = render_class("Native", "calc", &[f]);
        assert!(out.contains("IntPtr @out"));
        assert!(out.contains("/// Copies a &lt; b &amp; c\n"));
    }

    #[test]
    fn test_every_keyword_gets_a_verbatim_prefix() {
        for &kw in CSHARP_KEYWORDS {
            let f = function(kw, vec![Param::new(CType::Int, kw)], CType::Void, None);
            let out = render_class("Native", "calc", &[f]);
            assert!(
                out.contains(&format!("public static extern void @{0}(int @{0});", kw)),
                "keyword '{}' not escaped",
                kw
            );
        }
    }

    #[test]
    fn test_contextual_keywords_stay_plain() {
        let f = function(
            "set",
            vec![Param::new(CType::Int, "value"), Param::new(CType::Int, "var")],
            CType::Void,
            None,
        );
        let out = render_class("Native", "calc", &[f]);
        assert!(out.contains("public static extern void set(int value, int var);"));
    }
}
