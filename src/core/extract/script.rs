//! Key extraction from JavaScript/TypeScript sources.
//!
//! Files are parsed with swc and walked once for `t` bindings, then once for
//! references:
//!
//! - tagged templates: ``t`Some text` ``
//! - `t("key")`, only when the file binds `t` to a translation function
//! - `translate("text", "key")`
//! - `applyLocale("<markup>")`, `attr("data-i18n", "key")`,
//!   `setAttribute("data-i18n", "key")`, `el.dataset.i18n = "key"`
//! - `data-i18n` on JSX elements
//! - any string or template literal containing `data-i18n` markup
//!
//! Only static arguments count. `t(prefix + name)` is skipped silently.

use std::{
    path::Path,
    sync::{Arc, LazyLock},
};

use anyhow::{Result, anyhow};
use regex::Regex;
use swc_common::{FileName, GLOBALS, Globals, SourceMap};
use swc_ecma_ast::{
    AssignExpr, AssignTarget, CallExpr, Callee, Expr, ExprOrSpread, ImportDecl, ImportSpecifier,
    JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementChild, Lit, MemberExpr,
    MemberProp, ObjectPatProp, Pat, Program, SimpleAssignTarget, Str, TaggedTpl, Tpl,
    VarDeclarator,
};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use super::markup::{
    I18N_ATTRIBUTE, I18nToken, extract_attribute_value, extract_html, extract_markup_text,
    parse_tokens,
};
use crate::core::KeyCatalog;

/// Module paths that suggest a translation module.
const MODULE_HINTS: &[&str] = &["i18n", "locale", "l10n", "translation", "translator"];

/// Objects `t` may be destructured from.
const BINDING_OBJECTS: &[&str] = &["i18n", "i18next", "locale", "translator", "translation"];

static ASSET_PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(?:js|mjs|cjs|wasm|json|ts|tsx)(?:\?|$)").unwrap());

static HASH_QUERY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\?[0-9a-f]{3,}$").unwrap());

/// Literals passed to `t(...)` that are clearly not keys (module paths, markup, hashes).
pub fn is_noise_key(candidate: &str) -> bool {
    let text = candidate.trim();
    text.is_empty()
        || ["./", "../", "/", "?"].iter().any(|p| text.starts_with(p))
        || ["node_modules/", "/src/", "dist/"]
            .iter()
            .any(|p| text.contains(p))
        || text.contains('<')
        || text.contains('>')
        || ASSET_PATH_REGEX.is_match(text)
        || HASH_QUERY_REGEX.is_match(text)
}

fn syntax_for(path: &Path) -> Syntax {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("ts") | Some("mts") | Some("cts") => Syntax::Typescript(TsSyntax::default()),
        Some("tsx") => Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsSyntax {
            jsx: true,
            ..Default::default()
        }),
    }
}

/// Parse a script file; the syntax follows the file extension.
pub fn parse_script(content: &str, path: &Path) -> Result<Program> {
    let source_map: Arc<SourceMap> = Default::default();

    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(
            FileName::Real(path.to_path_buf()).into(),
            content.to_string(),
        );
        let mut parser = Parser::new(syntax_for(path), StringInput::from(&*source_file), None);

        parser
            .parse_program()
            .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e.kind().msg()))
    })
}

/// Extract keys from the script at `path` with the given content.
pub fn extract_script(content: &str, path: &Path) -> Result<KeyCatalog> {
    let program = parse_script(content, path)?;

    let mut visitor = KeyVisitor {
        catalog: KeyCatalog::new(),
        t_bound: has_t_binding(&program),
    };
    program.visit_with(&mut visitor);
    Ok(visitor.catalog)
}

/// Whether the program binds `t` to a translation function.
///
/// A bare `t(...)` is too common a name to trust otherwise.
pub fn has_t_binding(program: &Program) -> bool {
    let mut finder = BindingFinder::default();
    program.visit_with(&mut finder);
    finder.found
}

fn unwrap_paren(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unwrap_paren(&paren.expr),
        Expr::TsAs(ts_as) => unwrap_paren(&ts_as.expr),
        Expr::TsConstAssertion(ts_const) => unwrap_paren(&ts_const.expr),
        Expr::TsSatisfies(ts_sat) => unwrap_paren(&ts_sat.expr),
        Expr::TsNonNull(non_null) => unwrap_paren(&non_null.expr),
        _ => expr,
    }
}

fn is_ident(expr: &Expr, name: &str) -> bool {
    matches!(unwrap_paren(expr), Expr::Ident(ident) if ident.sym.as_str() == name)
}

fn member_prop_is(member: &MemberExpr, name: &str) -> bool {
    matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_str() == name)
}

/// `translate`, `i18n.t` or `window.t`.
fn is_translation_fn(expr: &Expr) -> bool {
    match unwrap_paren(expr) {
        Expr::Ident(ident) => ident.sym.as_str() == "translate",
        Expr::Member(member) => {
            member_prop_is(member, "t") && (is_ident(&member.obj, "i18n") || is_ident(&member.obj, "window"))
        }
        _ => false,
    }
}

fn binds_t(pat: &Pat) -> bool {
    matches!(pat, Pat::Ident(ident) if ident.id.sym.as_str() == "t")
}

#[derive(Default)]
struct BindingFinder {
    found: bool,
}

impl Visit for BindingFinder {
    fn visit_import_decl(&mut self, node: &ImportDecl) {
        let Some(module_path) = node.src.value.as_str() else {
            return;
        };
        if !MODULE_HINTS.iter().any(|hint| module_path.contains(hint)) {
            return;
        }
        let imports_t = node.specifiers.iter().any(|specifier| match specifier {
            ImportSpecifier::Named(named) => named.local.sym.as_str() == "t",
            ImportSpecifier::Default(default) => default.local.sym.as_str() == "t",
            ImportSpecifier::Namespace(_) => false,
        });
        self.found |= imports_t;
    }

    fn visit_var_declarator(&mut self, node: &VarDeclarator) {
        if let Some(init) = &node.init {
            match &node.name {
                // const { t } = i18n
                Pat::Object(object) => {
                    let destructures_t = object.props.iter().any(|prop| match prop {
                        ObjectPatProp::Assign(assign) => assign.key.sym.as_str() == "t",
                        ObjectPatProp::KeyValue(kv) => binds_t(&kv.value),
                        ObjectPatProp::Rest(_) => false,
                    });
                    let from_i18n = BINDING_OBJECTS.iter().any(|name| is_ident(init, name));
                    self.found |= destructures_t && from_i18n;
                }
                // const t = translate
                pat if binds_t(pat) => self.found |= is_translation_fn(init),
                _ => {}
            }
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        // this.t = translate
        if let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &node.left
            && matches!(&*member.obj, Expr::This(_))
            && member_prop_is(member, "t")
        {
            self.found |= is_translation_fn(&node.right);
        }
        node.visit_children_with(self);
    }
}

struct KeyVisitor {
    catalog: KeyCatalog,
    t_bound: bool,
}

/// A string literal or an interpolation-free template literal.
fn static_value(arg: Option<&ExprOrSpread>) -> Option<String> {
    let arg = arg.filter(|a| a.spread.is_none())?;
    static_text(&arg.expr)
}

fn static_text(expr: &Expr) -> Option<String> {
    match unwrap_paren(expr) {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(str::to_string),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str())
            .map(str::to_string),
        _ => None,
    }
}

/// Template text with each `${...}` replaced by `${0}`, `${1}`...
fn template_text(tpl: &Tpl) -> String {
    let mut text = String::new();
    for (i, quasi) in tpl.quasis.iter().enumerate() {
        match quasi.cooked.as_ref().and_then(|c| c.as_str()) {
            Some(cooked) => text.push_str(cooked),
            None => text.push_str(&quasi.raw),
        }
        if i < tpl.exprs.len() {
            text.push_str(&format!("${{{}}}", i));
        }
    }
    text
}

/// Name of the called function: `(name, is_member_call)`.
fn callee_name(call: &CallExpr) -> Option<(&str, bool)> {
    let Callee::Expr(callee) = &call.callee else {
        return None;
    };
    match unwrap_paren(callee) {
        Expr::Ident(ident) => Some((ident.sym.as_str(), false)),
        Expr::Member(member) => match &member.prop {
            MemberProp::Ident(prop) => Some((prop.sym.as_str(), true)),
            _ => None,
        },
        _ => None,
    }
}

/// Text content of a JSX element, whitespace collapsed.
fn jsx_text(element: &JSXElement) -> String {
    fn collect(element: &JSXElement, out: &mut Vec<String>) {
        for child in &element.children {
            match child {
                JSXElementChild::JSXText(text) => out.push(text.value.to_string()),
                JSXElementChild::JSXElement(inner) => collect(inner, out),
                _ => {}
            }
        }
    }

    let mut parts = Vec::new();
    collect(element, &mut parts);
    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn jsx_attribute<'a>(element: &'a JSXElement, wanted: &str) -> Option<&'a Str> {
    element.opening.attrs.iter().find_map(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) => {
            let JSXAttrName::Ident(name) = &attr.name else {
                return None;
            };
            match &attr.value {
                Some(JSXAttrValue::Str(s)) if name.sym.as_str().eq_ignore_ascii_case(wanted) => {
                    Some(s)
                }
                _ => None,
            }
        }
        JSXAttrOrSpread::SpreadElement(_) => None,
    })
}

impl KeyVisitor {
    fn t_call(&mut self, node: &CallExpr) {
        if let Some(key) = static_value(node.args.first())
            && !is_noise_key(&key)
        {
            self.catalog.insert(key.clone(), key);
        }
    }

    fn translate_call(&mut self, node: &CallExpr) {
        let text = static_value(node.args.first());
        let key = static_value(node.args.get(1))
            .filter(|k| !k.is_empty())
            .or_else(|| text.clone());
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            let default_text = text.unwrap_or_else(|| key.clone());
            self.catalog.insert(key, default_text);
        }
    }

    fn apply_locale_call(&mut self, node: &CallExpr) {
        if let Some(html) = static_value(node.args.first())
            && html.contains(I18N_ATTRIBUTE)
        {
            self.catalog.extend(extract_html(&html));
        }
    }

    /// `(name, value)` calls that set `data-i18n` on an element.
    fn attribute_setter(&mut self, node: &CallExpr) {
        if let Some(name) = static_value(node.args.first())
            && name == I18N_ATTRIBUTE
            && let Some(value) = static_value(node.args.get(1))
        {
            self.catalog.extend(extract_attribute_value(&value));
        }
    }
}

impl Visit for KeyVisitor {
    fn visit_tagged_tpl(&mut self, node: &TaggedTpl) {
        if is_ident(&node.tag, "t") {
            let key = template_text(&node.tpl);
            self.catalog.insert(key.clone(), key);
        }
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        match callee_name(node) {
            Some(("t", false)) if self.t_bound => self.t_call(node),
            Some(("translate", false)) => self.translate_call(node),
            Some(("applyLocale", _)) => self.apply_locale_call(node),
            Some(("attr", _)) | Some(("setAttribute", _)) => self.attribute_setter(node),
            _ => {}
        }
        node.visit_children_with(self);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        // el.dataset.i18n = "key"
        if let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = &node.left
            && member_prop_is(member, "i18n")
            && let Expr::Member(dataset) = unwrap_paren(&member.obj)
            && member_prop_is(dataset, "dataset")
            && let Some(value) = static_text(&node.right)
        {
            self.catalog.extend(extract_attribute_value(&value));
        }
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        if let Some(value) = jsx_attribute(node, I18N_ATTRIBUTE).and_then(|s| s.value.as_str()) {
            for token in parse_tokens(value) {
                let default_text = match token {
                    I18nToken::Text(_) => jsx_text(node),
                    I18nToken::Attribute { name, .. } => jsx_attribute(node, name)
                        .and_then(|s| s.value.as_str())
                        .map(|s| s.trim().to_string())
                        .unwrap_or_default(),
                };
                self.catalog.insert(token.key(), default_text);
            }
        }
        node.visit_children_with(self);
    }

    fn visit_str(&mut self, node: &Str) {
        if let Some(text) = node.value.as_str()
            && text.contains(I18N_ATTRIBUTE)
        {
            self.catalog.extend(extract_markup_text(text));
        }
    }

    fn visit_tpl(&mut self, node: &Tpl) {
        let text = template_text(node);
        if text.contains(I18N_ATTRIBUTE) {
            self.catalog.extend(extract_markup_text(&text));
        }
        node.visit_children_with(self);
    }
}
