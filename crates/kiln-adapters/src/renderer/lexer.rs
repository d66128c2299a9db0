//! Splits template source into text runs and tags.
//!
//! The lexer only finds tag boundaries; tag bodies are interpreted by the
//! parser. Whitespace control (`~`) is applied here, so the parser never sees
//! the trimmed whitespace.

use kiln_core::domain::RenderError;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const TRIPLE_CLOSE: &str = "}}}";
const TRIPLE_CLOSE_TRIM: &str = "}~}}";
const ESCAPED_OPEN: &str = "\\{{";

/// One lexed element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Text(String),
    Tag(Tag),
}

/// A `{{ … }}` tag with delimiters and trim markers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tag {
    /// Trimmed body; empty for comments.
    pub body: String,
    pub line: usize,
    pub comment: bool,
    trim_before: bool,
    trim_after: bool,
}

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, RenderError> {
    let mut lexer = Lexer {
        source,
        pos: 0,
        line: 1,
        tokens: Vec::new(),
        text: String::new(),
    };
    lexer.run()?;
    apply_whitespace_control(&mut lexer.tokens);
    Ok(lexer.tokens)
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
    text: String,
}

impl Lexer<'_> {
    fn rest(&self) -> &str {
        &self.source[self.pos..]
    }

    fn run(&mut self) -> Result<(), RenderError> {
        while self.pos < self.source.len() {
            if self.rest().starts_with(ESCAPED_OPEN) {
                self.text.push_str(OPEN);
                self.pos += ESCAPED_OPEN.len();
                continue;
            }

            if self.rest().starts_with(OPEN) {
                self.flush_text();
                let tag = self.lex_tag()?;
                self.tokens.push(Token::Tag(tag));
                continue;
            }

            let next = self
                .rest()
                .find(['{', '\\'])
                .map(|offset| if offset == 0 { 1 } else { offset })
                .unwrap_or(self.rest().len());
            let chunk = &self.source[self.pos..self.pos + next];
            self.line += chunk.matches('\n').count();
            self.text.push_str(chunk);
            self.pos += next;
        }

        self.flush_text();
        Ok(())
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            self.tokens.push(Token::Text(std::mem::take(&mut self.text)));
        }
    }

    /// Lex one tag starting at `{{`.
    fn lex_tag(&mut self) -> Result<Tag, RenderError> {
        let line = self.line;
        let mut start = self.pos + OPEN.len();

        let trim_before = self.source[start..].starts_with('~');
        if trim_before {
            start += 1;
        }

        let inner = &self.source[start..];
        let mut trim_after = false;
        let (body_end, close_len, comment) = if inner.starts_with("!--") {
            // body keeps `--` and any `~`, so only `}}` is the close
            let (end, terminator) = [("--}}", 4), ("--~}}", 5)]
                .into_iter()
                .filter_map(|(pattern, len)| inner.find(pattern).map(|end| (end, len)))
                .min()
                .ok_or_else(|| RenderError::new(line, "unclosed comment"))?;
            (start + end + terminator - CLOSE.len(), CLOSE.len(), true)
        } else if inner.starts_with('!') {
            let end = inner
                .find(CLOSE)
                .ok_or_else(|| RenderError::new(line, "unclosed comment"))?;
            (start + end, CLOSE.len(), true)
        } else if inner.starts_with('{') {
            start += 1;
            let (end, close_len, trimmed) = find_triple_close(&self.source[start..], line)?;
            trim_after = trimmed;
            (start + end, close_len, false)
        } else {
            let end = find_close(inner, CLOSE, line)?;
            (start + end, CLOSE.len(), false)
        };

        let mut body = &self.source[start..body_end];
        if let Some(stripped) = body.strip_suffix('~') {
            body = stripped;
            trim_after = true;
        }

        let end = body_end + close_len;
        self.line += self.source[self.pos..end].matches('\n').count();
        self.pos = end;

        Ok(Tag {
            body: if comment { String::new() } else { body.trim().to_string() },
            line,
            comment,
            trim_before,
            trim_after,
        })
    }
}

/// Offset of `close` in `s`, skipping over quoted strings.
fn find_close(s: &str, close: &str, line: usize) -> Result<usize, RenderError> {
    let bytes = s.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                let end = s[i + 1..]
                    .find(quote as char)
                    .ok_or_else(|| RenderError::new(line, "unterminated string literal"))?;
                i += end + 2;
            }
            _ if bytes[i..].starts_with(close.as_bytes()) => return Ok(i),
            _ => i += 1,
        }
    }

    Err(RenderError::new(line, format!("unclosed tag, expected '{close}'")))
}

/// Close of a triple-stash tag: `}}}`, `~}}}` or `}~}}`. Returns the offset,
/// the close length and whether the close itself carries the trim marker.
fn find_triple_close(s: &str, line: usize) -> Result<(usize, usize, bool), RenderError> {
    let plain = find_close(s, TRIPLE_CLOSE, line);
    let tilde_inside = find_close(s, TRIPLE_CLOSE_TRIM, line);

    match (plain, tilde_inside) {
        (Ok(p), Ok(t)) if t < p => Ok((t, TRIPLE_CLOSE_TRIM.len(), true)),
        (Ok(p), _) => Ok((p, TRIPLE_CLOSE.len(), false)),
        (Err(_), Ok(t)) => Ok((t, TRIPLE_CLOSE_TRIM.len(), true)),
        (Err(e), Err(_)) => Err(e),
    }
}

fn apply_whitespace_control(tokens: &mut [Token]) {
    for i in 0..tokens.len() {
        let (before, after) = match &tokens[i] {
            Token::Tag(tag) => (tag.trim_before, tag.trim_after),
            Token::Text(_) => continue,
        };

        if before && i > 0 {
            if let Token::Text(text) = &mut tokens[i - 1] {
                let kept = text.trim_end().len();
                text.truncate(kept);
            }
        }
        if after && i + 1 < tokens.len() {
            if let Token::Text(text) = &mut tokens[i + 1] {
                *text = text.trim_start().to_string();
            }
        }
    }
}
