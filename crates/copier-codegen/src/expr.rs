//! Syntactic checks over user-supplied mapping expressions.

use proc_macro2::{Span, TokenStream, TokenTree};
use syn::punctuated::Punctuated;
use syn::visit::{self, Visit};

const TRAILING_OPERATORS: &[char] = &['+', '-', '*', '/', '=', '<', '>', '!', '&', '|', '^', '%'];

/// Validates `text` and parses it. Errors point at `span`.
pub(crate) fn validate_syntax(text: &str, span: Span) -> syn::Result<syn::Expr> {
    if text.trim().is_empty() {
        return Err(syn::Error::new(span, "expression is empty"));
    }

    check_delimiters(text).map_err(|msg| syn::Error::new(span, msg))?;
    check_trailing_operator(text).map_err(|msg| syn::Error::new(span, msg))?;

    syn::parse_str(text)
        .map_err(|err| syn::Error::new(span, format!("invalid expression: {err}")))
}

fn check_delimiters(text: &str) -> Result<(), String> {
    let mut stack = vec![];
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => skip_string(&mut chars)?,
            'r' if matches!(chars.peek(), Some('"' | '#')) => {
                let mut hashes = 0;
                while chars.next_if_eq(&'#').is_some() {
                    hashes += 1;
                }
                if chars.next() != Some('"') {
                    // `r#ident`
                    continue;
                }
                skip_raw_string(&mut chars, hashes)?;
            }
            '\'' => skip_char(&mut chars)?,
            '(' | '[' | '{' => stack.push(c),
            ')' | ']' | '}' => {
                let open = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };

                match stack.pop() {
                    Some(top) if top == open => {}
                    Some(top) => return Err(format!("mismatched `{c}`, expected close of `{top}`")),
                    None => return Err(format!("unbalanced `{c}`")),
                }
            }
            _ => {}
        }
    }

    match stack.pop() {
        Some(open) => Err(format!("unclosed `{open}`")),
        None => Ok(()),
    }
}

fn skip_string(chars: &mut impl Iterator<Item = char>) -> Result<(), String> {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => return Ok(()),
            _ => {}
        }
    }

    Err("unterminated string literal".to_string())
}

fn skip_raw_string(chars: &mut impl Iterator<Item = char>, hashes: usize) -> Result<(), String> {
    let mut chars = chars.peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            let mut seen = 0;
            while seen < hashes && chars.next_if_eq(&'#').is_some() {
                seen += 1;
            }
            if seen == hashes {
                return Ok(());
            }
        }
    }

    Err("unterminated raw string literal".to_string())
}

/// A `'` opens a character literal when it is escaped or closes one
/// character later; otherwise it starts a lifetime or label.
fn skip_char(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<(), String> {
    let mut lookahead = chars.clone();

    match lookahead.next() {
        Some('\\') => {
            chars.next();
            chars.next();
            // `\u{..}` escapes run up to the closing quote
            for c in chars.by_ref() {
                if c == '\'' {
                    return Ok(());
                }
            }
            Err("unterminated character literal".to_string())
        }
        Some(_) if lookahead.next() == Some('\'') => {
            chars.next();
            chars.next();
            Ok(())
        }
        _ => Ok(()),
    }
}

fn check_trailing_operator(text: &str) -> Result<(), String> {
    let trimmed = text.trim_end();

    if trimmed.ends_with("++") || trimmed.ends_with("--") {
        return Ok(());
    }

    match trimmed.chars().last() {
        Some(c) if TRAILING_OPERATORS.contains(&c) => {
            Err(format!("expression ends with dangling operator `{c}`"))
        }
        _ => Ok(()),
    }
}

/// Single-segment, lower-case paths used as values that no closure
/// parameter, `let`, `match` arm or `for` pattern inside the expression
/// binds. Function names in call position are not values.
pub(crate) fn free_variables(expr: &syn::Expr) -> Vec<String> {
    let mut scan = FreeVariables {
        scopes: vec![vec![]],
        out: vec![],
    };
    scan.visit_expr(expr);
    scan.out
}

struct FreeVariables {
    scopes: Vec<Vec<String>>,
    out: Vec<String>,
}

impl FreeVariables {
    fn is_bound(&self, name: &str) -> bool {
        self.scopes.iter().any(|scope| scope.iter().any(|bound| bound == name))
    }

    fn bind(&mut self, pat: &syn::Pat) {
        let mut bindings = Bindings(vec![]);
        bindings.visit_pat(pat);

        if let Some(scope) = self.scopes.last_mut() {
            scope.extend(bindings.0);
        }
    }

    fn scoped(&mut self, f: impl FnOnce(&mut Self)) {
        self.scopes.push(vec![]);
        f(self);
        self.scopes.pop();
    }
}

impl<'ast> Visit<'ast> for FreeVariables {
    fn visit_expr_path(&mut self, expr: &'ast syn::ExprPath) {
        if expr.qself.is_some() {
            return;
        }

        let Some(ident) = expr.path.get_ident() else {
            return;
        };

        let name = ident.to_string();
        let capitalized = name.starts_with(|c: char| c.is_ascii_uppercase());

        if capitalized || name == "self" || self.is_bound(&name) || self.out.contains(&name) {
            return;
        }

        self.out.push(name);
    }

    fn visit_expr_call(&mut self, expr: &'ast syn::ExprCall) {
        match &*expr.func {
            syn::Expr::Path(path) if path.path.get_ident().is_some() => {}
            func => self.visit_expr(func),
        }

        for arg in &expr.args {
            self.visit_expr(arg);
        }
    }

    fn visit_expr_closure(&mut self, expr: &'ast syn::ExprClosure) {
        self.scoped(|scan| {
            for input in &expr.inputs {
                scan.bind(input);
            }
            scan.visit_expr(&expr.body);
        });
    }

    fn visit_block(&mut self, block: &'ast syn::Block) {
        self.scoped(|scan| visit::visit_block(scan, block));
    }

    fn visit_local(&mut self, local: &'ast syn::Local) {
        if let Some(init) = &local.init {
            self.visit_expr(&init.expr);
            if let Some((_, diverge)) = &init.diverge {
                self.visit_expr(diverge);
            }
        }

        self.bind(&local.pat);
    }

    fn visit_expr_let(&mut self, expr: &'ast syn::ExprLet) {
        self.visit_expr(&expr.expr);
        self.bind(&expr.pat);
    }

    fn visit_expr_if(&mut self, expr: &'ast syn::ExprIf) {
        self.scoped(|scan| {
            scan.visit_expr(&expr.cond);
            scan.visit_block(&expr.then_branch);
        });

        if let Some((_, else_branch)) = &expr.else_branch {
            self.visit_expr(else_branch);
        }
    }

    fn visit_expr_while(&mut self, expr: &'ast syn::ExprWhile) {
        self.scoped(|scan| {
            scan.visit_expr(&expr.cond);
            scan.visit_block(&expr.body);
        });
    }

    fn visit_expr_for_loop(&mut self, expr: &'ast syn::ExprForLoop) {
        self.visit_expr(&expr.expr);
        self.scoped(|scan| {
            scan.bind(&expr.pat);
            scan.visit_block(&expr.body);
        });
    }

    fn visit_arm(&mut self, arm: &'ast syn::Arm) {
        self.scoped(|scan| {
            scan.bind(&arm.pat);
            if let Some((_, guard)) = &arm.guard {
                scan.visit_expr(guard);
            }
            scan.visit_expr(&arm.body);
        });
    }

    /// Macro bodies are scanned when they read as comma-separated
    /// expressions, as `format!` and `vec!` arguments do.
    fn visit_macro(&mut self, mac: &'ast syn::Macro) {
        let Ok(args) = mac.parse_body_with(Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated)
        else {
            return;
        };

        for arg in &args {
            self.visit_expr(arg);
        }
    }
}

/// Names introduced by a pattern.
struct Bindings(Vec<String>);

impl<'ast> Visit<'ast> for Bindings {
    fn visit_pat_ident(&mut self, pat: &'ast syn::PatIdent) {
        self.0.push(pat.ident.to_string());
        visit::visit_pat_ident(self, pat);
    }
}

/// Field names accessed as `source.<name>`.
pub(crate) fn source_fields(expr: &TokenStream) -> Vec<String> {
    let tokens = flatten(expr);
    let mut out: Vec<String> = vec![];

    for window in tokens.windows(3) {
        let [Flat::Ident(base), Flat::Punct('.'), Flat::Ident(field)] = window else {
            continue;
        };

        if base == "source" && !out.contains(field) {
            out.push(field.clone());
        }
    }

    out
}

enum Flat {
    Ident(String),
    Punct(char),
    /// Literals and group boundaries
    Other,
}

fn flatten(stream: &TokenStream) -> Vec<Flat> {
    let mut out = vec![];
    flatten_into(stream.clone(), &mut out);
    out
}

fn flatten_into(stream: TokenStream, out: &mut Vec<Flat>) {
    for tree in stream {
        match tree {
            TokenTree::Ident(ident) => out.push(Flat::Ident(ident.to_string())),
            TokenTree::Punct(punct) => out.push(Flat::Punct(punct.as_char())),
            TokenTree::Literal(_) => out.push(Flat::Other),
            TokenTree::Group(group) => {
                out.push(Flat::Other);
                flatten_into(group.stream(), out);
                out.push(Flat::Other);
            }
        }
    }
}
