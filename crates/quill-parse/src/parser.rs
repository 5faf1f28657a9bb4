use crate::lexer::Lexer;
use crate::token::{Span, Tok, TokKind};
use anyhow::{bail, Result};
use quill_ast::{Binding, Exp, PrimOp, Program, Value, VarDecl};
use std::collections::HashSet;

/// Maximum list nesting accepted by the reader
const MAX_NESTING_DEPTH: usize = 512;

/// Spans are `u32` byte offsets
const MAX_SOURCE_LEN: usize = u32::MAX as usize;

fn check_source_len(len: usize) -> Result<()> {
    if len > MAX_SOURCE_LEN {
        bail!(
            "source is {} bytes; at most {} bytes can be parsed",
            len,
            MAX_SOURCE_LEN
        );
    }
    Ok(())
}

/// Parse a whole program: one or more top-level forms.
pub fn parse_program(src: &str) -> Result<Program> {
    let forms = read_all(src)?;
    if forms.is_empty() {
        bail!("unexpected empty program");
    }
    let exps = forms.iter().map(parse_top).collect::<Result<Vec<_>>>()?;
    Ok(Program { exps })
}

/// Parse exactly one top-level form.
pub fn parse_exp(src: &str) -> Result<Exp> {
    let forms = read_all(src)?;
    match forms.as_slice() {
        [one] => parse_top(one),
        [] => bail!("expected one expression, found none"),
        _ => bail!("expected one expression, found {}", forms.len()),
    }
}

/// Parse one quoted datum, as it would appear after `quote`.
pub fn parse_datum(src: &str) -> Result<Value> {
    let forms = read_all(src)?;
    match forms.as_slice() {
        [one] => datum(one),
        _ => bail!("expected one datum, found {}", forms.len()),
    }
}

// ======= reader: tokens -> s-expressions =======

#[derive(Debug, Clone, PartialEq)]
enum Sexp {
    Atom(String),
    Str(String),
    List(Vec<Sexp>),
}

struct Reader<'a> {
    lex: Lexer<'a>,
    cur: Tok,
    depth: usize,
}

fn read_all(src: &str) -> Result<Vec<Sexp>> {
    check_source_len(src.len())?;
    let mut r = Reader::new(src);
    let mut out = Vec::new();
    while !matches!(r.cur.kind, TokKind::Eof) {
        out.push(r.read()?);
    }
    Ok(out)
}

impl<'a> Reader<'a> {
    fn new(src: &'a str) -> Self {
        let mut lex = Lexer::new(src);
        let cur = lex.next_tok();
        Self { lex, cur, depth: 0 }
    }

    fn bump(&mut self) -> Tok {
        std::mem::replace(&mut self.cur, self.lex.next_tok())
    }

    fn read(&mut self) -> Result<Sexp> {
        let tok = self.bump();
        match tok.kind {
            TokKind::Atom(s) => Ok(Sexp::Atom(s)),
            TokKind::Str(s) => Ok(Sexp::Str(s)),
            TokKind::Quote => {
                let quoted = self.read()?;
                Ok(Sexp::List(vec![Sexp::Atom("quote".into()), quoted]))
            }
            TokKind::LParen => self.read_list(tok.span),
            TokKind::RParen => bail!("unexpected ')' at offset {}", tok.span.start),
            TokKind::Error(msg) => bail!("{} at offset {}", msg, tok.span.start),
            TokKind::Eof => bail!("unexpected end of input"),
        }
    }

    fn read_list(&mut self, open: Span) -> Result<Sexp> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            bail!(
                "nesting depth limit exceeded (limit: {})",
                MAX_NESTING_DEPTH
            );
        }
        let mut items = Vec::new();
        loop {
            match self.cur.kind {
                TokKind::RParen => {
                    self.bump();
                    break;
                }
                TokKind::Eof => bail!("unclosed '(' at offset {}", open.start),
                _ => items.push(self.read()?),
            }
        }
        self.depth -= 1;
        Ok(Sexp::List(items))
    }
}

// ======= s-expressions -> expressions =======

fn parse_number(s: &str) -> Option<f64> {
    let body = s.strip_prefix(['+', '-']).unwrap_or(s);
    let body = body.strip_prefix('.').unwrap_or(body);
    if body.starts_with(|c: char| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn is_identifier(s: &str) -> bool {
    s != "#t" && s != "#f" && s != "." && parse_number(s).is_none()
}

fn parse_top(sexp: &Sexp) -> Result<Exp> {
    match sexp {
        Sexp::List(items) if matches!(items.first(), Some(Sexp::Atom(k)) if k == "define") => {
            parse_define(&items[1..])
        }
        _ => parse_cexp(sexp),
    }
}

/// References to a primitive keyword always parse as the primitive, so the
/// keyword can never be bound.
fn check_bindable(name: &str) -> Result<()> {
    if PrimOp::from_keyword(name).is_some() {
        bail!("cannot bind primitive `{}`", name);
    }
    Ok(())
}

fn parse_define(args: &[Sexp]) -> Result<Exp> {
    match args {
        [] => bail!("define missing 2 arguments"),
        [_] => bail!("define missing 1 argument"),
        [Sexp::Atom(name), val] if is_identifier(name) => {
            check_bindable(name)?;
            Ok(Exp::Define {
                var: VarDecl::new(name.as_str()),
                val: Box::new(parse_cexp(val)?),
            })
        }
        [_, _] => bail!("first argument of define must be an identifier"),
        _ => bail!("define has too many arguments"),
    }
}

fn parse_cexp(sexp: &Sexp) -> Result<Exp> {
    match sexp {
        Sexp::Str(s) => Ok(Exp::Str(s.clone())),
        Sexp::Atom(a) => Ok(parse_atom(a)),
        Sexp::List(items) => match items.as_slice() {
            [] => bail!("expression cannot be an empty list"),
            [Sexp::Atom(k), rest @ ..] => match k.as_str() {
                "define" => bail!("define is only allowed at top level"),
                "lambda" => parse_lambda(rest),
                "if" => parse_if(rest),
                "let" => parse_let(rest),
                "quote" => match rest {
                    [d] => Ok(Exp::Lit(datum(d)?)),
                    _ => bail!("quote expects exactly one datum"),
                },
                _ => parse_app(items),
            },
            _ => parse_app(items),
        },
    }
}

fn parse_atom(a: &str) -> Exp {
    match a {
        "#t" => Exp::Bool(true),
        "#f" => Exp::Bool(false),
        _ => {
            if let Some(n) = parse_number(a) {
                Exp::Num(n)
            } else if let Some(op) = PrimOp::from_keyword(a) {
                Exp::Prim(op)
            } else {
                Exp::Var(a.to_string())
            }
        }
    }
}

fn parse_app(items: &[Sexp]) -> Result<Exp> {
    let rator = parse_cexp(&items[0])?;
    let rands = items[1..].iter().map(parse_cexp).collect::<Result<Vec<_>>>()?;
    Ok(Exp::App {
        rator: Box::new(rator),
        rands,
    })
}

fn parse_if(args: &[Sexp]) -> Result<Exp> {
    match args {
        [test, then, alt] => Ok(Exp::If {
            test: Box::new(parse_cexp(test)?),
            then: Box::new(parse_cexp(then)?),
            alt: Box::new(parse_cexp(alt)?),
        }),
        _ => bail!(
            "expression not of the form (if <cexp> <cexp> <cexp>), found {} parts",
            args.len()
        ),
    }
}

fn parse_decl(sexp: &Sexp, seen: &mut HashSet<String>) -> Result<VarDecl> {
    match sexp {
        Sexp::Atom(name) if is_identifier(name) => {
            check_bindable(name)?;
            if !seen.insert(name.clone()) {
                bail!("duplicate parameter `{}`", name);
            }
            Ok(VarDecl::new(name.as_str()))
        }
        other => bail!("expected identifier in declaration, found {:?}", other),
    }
}

fn parse_body(body: &[Sexp], form: &str) -> Result<Vec<Exp>> {
    if body.is_empty() {
        bail!("{} requires at least one body expression", form);
    }
    body.iter().map(parse_cexp).collect()
}

fn parse_lambda(args: &[Sexp]) -> Result<Exp> {
    let Some((Sexp::List(vars), body)) = args.split_first() else {
        bail!("invalid parameter list for lambda");
    };
    let mut seen = HashSet::new();
    let params = vars
        .iter()
        .map(|v| parse_decl(v, &mut seen))
        .collect::<Result<Vec<_>>>()?;
    Ok(Exp::Proc {
        params,
        body: parse_body(body, "lambda")?,
    })
}

fn parse_let(args: &[Sexp]) -> Result<Exp> {
    let Some((Sexp::List(raw), body)) = args.split_first() else {
        bail!("invalid bindings for let");
    };
    let mut seen = HashSet::new();
    let mut bindings = Vec::with_capacity(raw.len());
    for b in raw {
        let Sexp::List(pair) = b else {
            bail!("invalid let binding: {:?}", b);
        };
        let [var, val] = pair.as_slice() else {
            bail!("let binding must have the form (<var> <cexp>)");
        };
        bindings.push(Binding {
            var: parse_decl(var, &mut seen)?,
            val: parse_cexp(val)?,
        });
    }
    Ok(Exp::Let {
        bindings,
        body: parse_body(body, "let")?,
    })
}

fn datum(sexp: &Sexp) -> Result<Value> {
    match sexp {
        Sexp::Str(s) => Ok(Value::Str(s.clone())),
        Sexp::Atom(a) => Ok(match a.as_str() {
            "#t" => Value::Bool(true),
            "#f" => Value::Bool(false),
            _ => match parse_number(a) {
                Some(n) => Value::Number(n),
                None => Value::Symbol(a.clone()),
            },
        }),
        Sexp::List(items) => {
            let dot = Sexp::Atom(".".into());
            let (elems, tail) = match items.iter().position(|s| *s == dot) {
                None => (items.as_slice(), Value::Empty),
                Some(i) if i > 0 && i + 2 == items.len() => (&items[..i], datum(&items[i + 1])?),
                Some(_) => bail!("bad dotted datum"),
            };
            let mut out = tail;
            for e in elems.iter().rev() {
                out = Value::cons(datum(e)?, out);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn source_past_span_range_is_rejected() {
        assert!(check_source_len(MAX_SOURCE_LEN).is_ok());
        let err = check_source_len(MAX_SOURCE_LEN + 1).unwrap_err().to_string();
        assert!(err.contains("at most"));
    }

    #[test]
    fn classifies_atoms() {
        assert_eq!(parse_atom("42"), Exp::Num(42.0));
        assert_eq!(parse_atom("-1.5"), Exp::Num(-1.5));
        assert_eq!(parse_atom("+"), Exp::Prim(PrimOp::Add));
        assert_eq!(parse_atom("#f"), Exp::Bool(false));
        assert_eq!(parse_atom("x"), Exp::var("x"));
    }

    #[test]
    fn number_requires_leading_digit() {
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("nan"), None);
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn reads_dotted_pairs() {
        let v = parse_datum("(1 . 2)").unwrap();
        assert_eq!(v, Value::cons(Value::Number(1.0), Value::Number(2.0)));
        assert!(parse_datum("(. 2)").is_err());
        assert!(parse_datum("(1 . 2 3)").is_err());
    }
}
