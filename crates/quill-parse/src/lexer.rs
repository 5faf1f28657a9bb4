use crate::token::{Span, Tok, TokKind};

pub struct Lexer<'a> {
    text: &'a str,
    src: &'a [u8],
    pos: usize,
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b'\'' | b'"' | b';')
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            text: src,
            src: src.as_bytes(),
            pos: 0,
        }
    }

    fn bump(&mut self) -> Option<u8> {
        if self.pos >= self.src.len() {
            None
        } else {
            let b = self.src[self.pos];
            self.pos += 1;
            Some(b)
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    /// Offsets saturate at `u32::MAX`; the parser rejects longer sources
    /// before lexing.
    fn span(&self, start: usize) -> Span {
        let offset = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Span {
            start: offset(start),
            end: offset(self.pos),
        }
    }

    fn skip_ws_and_comments(&mut self) {
        loop {
            while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
                self.bump();
            }
            // line comment: ;
            if self.peek() == Some(b';') {
                while let Some(b) = self.peek() {
                    if b == b'\n' {
                        break;
                    }
                    self.bump();
                }
                continue;
            }
            break;
        }
    }

    pub fn next_tok(&mut self) -> Tok {
        self.skip_ws_and_comments();
        let start = self.pos;
        let Some(b) = self.bump() else {
            return Tok {
                kind: TokKind::Eof,
                span: self.span(start),
            };
        };

        let single = match b {
            b'(' => Some(TokKind::LParen),
            b')' => Some(TokKind::RParen),
            b'\'' => Some(TokKind::Quote),
            _ => None,
        };
        if let Some(k) = single {
            return Tok {
                kind: k,
                span: self.span(start),
            };
        }

        // string
        if b == b'"' {
            let mut bytes = Vec::new();
            let mut closed = false;
            while let Some(ch) = self.bump() {
                if ch == b'"' {
                    closed = true;
                    break;
                }
                if ch == b'\\' {
                    let Some(esc) = self.bump() else {
                        break;
                    };
                    let real = match esc {
                        b'n' => b'\n',
                        b't' => b'\t',
                        _ => esc,
                    };
                    bytes.push(real);
                } else {
                    bytes.push(ch);
                }
            }
            if !closed {
                return Tok {
                    kind: TokKind::Error("unterminated string literal".to_string()),
                    span: self.span(start),
                };
            }
            return Tok {
                kind: TokKind::Str(String::from_utf8_lossy(&bytes).into_owned()),
                span: self.span(start),
            };
        }

        // atom: everything up to the next delimiter
        while matches!(self.peek(), Some(p) if !is_delimiter(p)) {
            self.bump();
        }
        Tok {
            kind: TokKind::Atom(self.text[start..self.pos].to_string()),
            span: self.span(start),
        }
    }
}
