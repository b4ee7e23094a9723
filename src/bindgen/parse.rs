//! Header parsing
//!
//! Extracts `EXTERN_C_API` declarations and the comment block directly above
//! each one. Three comment shapes are recognized: doxygen blocks
//! (`/** ... @param ... @return ... */`), one-line blocks (`/** text **/`) and
//! runs of `//` line comments.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::BindgenError;
use crate::ffi::{CType, DocComment, Function, Param, Signature};

static DECL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"EXTERN_C_API\s+((?:const\s+)?\w+(?:\s*\*+\s*|\s+))(\w+)\s*\(([^)]*)\)")
        .expect("declaration pattern is valid")
});
static BLOCK_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/\*+").expect("block start pattern is valid"));
static BLOCK_END_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*+/").expect("block end pattern is valid"));
static LINE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//+").expect("line comment pattern is valid"));

/// Parse every exported declaration in a header, in source order.
pub fn parse_header(source: &str) -> Result<Vec<Function>, BindgenError> {
    let mut functions = Vec::new();

    for caps in DECL_RE.captures_iter(source) {
        let start = caps.get(0).map_or(0, |m| m.start());
        let name = &caps[2];

        let return_type = parse_type(&caps[1], name)?;
        let params = parse_params(&caps[3], name)?;
        let signature = Signature::new(name, params, return_type);
        let doc = find_doc_comment(&source[..start])?;

        debug!(function = %signature, documented = doc.is_some(), "parsed declaration");
        functions.push(Function { signature, doc });
    }

    Ok(functions)
}

fn strip_const(s: &str) -> &str {
    let s = s.trim();
    match s.strip_prefix("const") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => s,
    }
}

fn parse_type(raw: &str, function: &str) -> Result<CType, BindgenError> {
    CType::parse(strip_const(raw)).ok_or_else(|| BindgenError::UnknownType {
        ty: raw.trim().to_string(),
        function: function.to_string(),
    })
}

fn parse_params(raw: &str, function: &str) -> Result<Vec<Param>, BindgenError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "void" {
        return Ok(Vec::new());
    }

    raw.split(',')
        .map(|param| parse_param(param.trim(), function))
        .collect()
}

fn parse_param(param: &str, function: &str) -> Result<Param, BindgenError> {
    let malformed = || BindgenError::MalformedParam {
        param: param.to_string(),
        function: function.to_string(),
    };

    let decl = strip_const(param);
    let (ty, name) = match decl.rsplit_once(char::is_whitespace) {
        Some((ty, name)) => (ty.trim().to_string(), name),
        // `int*p`
        None => match decl.rsplit_once('*') {
            Some((ty, name)) => (format!("{}*", ty.trim()), name),
            None => return Err(malformed()),
        },
    };

    // `int *p` binds the star to the type
    let bare = name.trim_start_matches('*');
    let stars = name.len() - bare.len();
    let ty = format!("{}{}", ty, "*".repeat(stars));

    if bare.is_empty() || !bare.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(malformed());
    }

    Ok(Param::new(parse_type(&ty, function)?, bare))
}

/// Find the comment block ending on the line above a declaration.
///
/// `before` is the header text preceding the declaration.
fn find_doc_comment(before: &str) -> Result<Option<DocComment>, BindgenError> {
    let mut lines: Vec<&str> = before.split('\n').collect();
    // Text on the declaration's own line.
    lines.pop();

    let mut collected: Vec<&str> = Vec::new();
    let mut in_block = false;
    let mut block_opened = false;

    for line in lines.iter().rev() {
        if in_block {
            collected.push(*line);
            if line.contains("/*") {
                block_opened = true;
                break;
            }
            continue;
        }

        if line.contains("*/") {
            if !collected.is_empty() {
                break;
            }
            if line.contains("/*") {
                return Ok(non_empty(parse_one_line_block(line)));
            }
            collected.push(*line);
            in_block = true;
        } else if line.contains("//") {
            collected.push(*line);
        } else {
            break;
        }
    }

    if in_block && !block_opened {
        return Err(BindgenError::MalformedComment(
            "block comment closed but never opened".to_string(),
        ));
    }

    collected.reverse();
    if collected.is_empty() {
        return Ok(None);
    }

    let doc = if in_block {
        parse_block_comment(&collected.join("\n"))?
    } else {
        parse_line_comments(&collected)
    };
    Ok(non_empty(doc))
}

fn non_empty(doc: DocComment) -> Option<DocComment> {
    if doc.summary.is_empty() && doc.params.is_empty() && doc.returns.is_none() {
        None
    } else {
        Some(doc)
    }
}

fn strip_block_markers(text: &str) -> String {
    let text = BLOCK_START_RE.replacen(text, 1, "");
    BLOCK_END_RE.replacen(&text, 1, "").into_owned()
}

fn parse_one_line_block(line: &str) -> DocComment {
    let text = strip_block_markers(line);
    let text = text.trim();
    if text.is_empty() {
        DocComment::default()
    } else {
        DocComment::summary(text)
    }
}

/// Strip `tag` from the front of `line` when it is followed by whitespace or
/// nothing.
fn tagged<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(tag)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn parse_block_comment(block: &str) -> Result<DocComment, BindgenError> {
    let body = strip_block_markers(block);
    let mut doc = DocComment::default();

    for line in body.trim().lines() {
        let line = line.trim().trim_matches('*').trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = tagged(line, "@param") {
            if rest.is_empty() {
                return Err(BindgenError::MalformedComment(format!(
                    "'{}' names no parameter",
                    line
                )));
            }
            let (name, desc) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            doc.params.push((name.to_string(), desc.trim().to_string()));
        } else if let Some(rest) =
            tagged(line, "@returns").or_else(|| tagged(line, "@return"))
        {
            doc.returns = Some(rest.to_string());
        } else {
            doc.summary.push(line.to_string());
        }
    }

    Ok(doc)
}

fn parse_line_comments(lines: &[&str]) -> DocComment {
    let summary = lines
        .iter()
        .map(|line| LINE_START_RE.replacen(line, 1, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();
    DocComment {
        summary,
        ..DocComment::default()
    }
}
