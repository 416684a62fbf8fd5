/* Shared text-builder used by all six emitters (§9 design notes: replace
 * ad-hoc string substitution with a typed builder carrying indentation
 * level, current namespace, and current interface scope). */

pub mod common;
pub mod proxy;
pub mod service;

use crate::error::ResolveError;
use crate::ir::Arg;
use crate::resolver::{self, is_void};

/// Accumulates generated source text. Tracks indentation so emitters can
/// nest blocks without hand-balancing whitespace in literal strings.
pub struct Writer {
    buf: String,
    indent: usize,
}

impl std::fmt::Write for Writer {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl Writer {
    pub fn new() -> Self {
        Writer { buf: String::new(), indent: 0 }
    }

    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.buf.push('\n');
            return;
        }
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    pub fn indented(&mut self, body: impl FnOnce(&mut Self)) {
        self.indent += 1;
        body(self);
        self.indent -= 1;
    }

    pub fn namespace_start(&mut self, modules: &[String]) {
        for m in modules {
            self.line(&format!("namespace {m} {{"));
        }
        self.blank();
    }

    pub fn namespace_end(&mut self, modules: &[String]) {
        self.blank();
        for m in modules.iter().rev() {
            self.line(&format!("}}  // namespace {m}"));
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// A resolved argument with its final spelling and emitted name.
pub struct ResolvedArg {
    pub name: String,
    pub spelling: String,
}

/// Resolve an argument list, synthesizing `<direction>_arg_<index>` names
/// for anonymous arguments (§3 invariant). Returns `None` if the list
/// resolves to a single void entry (suppressed per §3/§4.1).
pub fn resolve_args(
    direction: &str,
    args: &[Arg],
) -> Result<Option<Vec<ResolvedArg>>, ResolveError> {
    if args.is_empty() {
        return Ok(None);
    }

    let mut resolved = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        let spelling = resolver::resolve(&arg.ty)?;
        if is_void(&spelling) {
            return Ok(None);
        }
        let name = arg
            .name
            .clone()
            .unwrap_or_else(|| format!("{direction}_arg_{i}"));
        resolved.push(ResolvedArg { name, spelling });
    }

    Ok(Some(resolved))
}

/// Data-wrapper struct member name: `<function>_arg_<1-based-index>` when
/// anonymous (§3 invariant; distinct convention from the in/out argument
/// lists, which are 0-based).
pub fn wrapper_member_name(function_name: &str, explicit: Option<&str>, index: usize) -> String {
    explicit
        .map(str::to_string)
        .unwrap_or_else(|| format!("{function_name}_arg_{}", index + 1))
}

/// Builds the `#ifndef`/`#define` include-guard name shared by all three
/// emitted headers.
pub fn common_guard(doc: &crate::ir::Document, base_name: &str, tail: &str) -> String {
    let prefix = doc
        .module
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("_");
    if prefix.is_empty() {
        format!("{}_{tail}_H_", base_name.to_uppercase())
    } else {
        format!("{prefix}_{}_{tail}_H_", base_name.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeRef;

    fn arg(name: Option<&str>, tokens: &[&str]) -> Arg {
        Arg {
            name: name.map(str::to_string),
            ty: TypeRef::Tokens(tokens.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn synthesizes_anonymous_names() {
        let args = vec![arg(None, &["long"]), arg(Some("b"), &["long"])];
        let resolved = resolve_args("in", &args).unwrap().unwrap();
        assert_eq!(resolved[0].name, "in_arg_0");
        assert_eq!(resolved[1].name, "b");
    }

    #[test]
    fn void_return_suppresses_list() {
        let args = vec![arg(None, &["void"])];
        assert!(resolve_args("out", &args).unwrap().is_none());
    }

    #[test]
    fn empty_list_suppresses() {
        assert!(resolve_args("in", &[]).unwrap().is_none());
    }
}
