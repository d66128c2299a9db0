//! Builds the [`Template`] tree from lexed tokens.
//!
//! Two levels: block structure (`#if`, `#unless`, `else`, `/close`) over the
//! token stream, and expression parsing inside each tag body.

use serde_json::{Number, Value};

use kiln_core::domain::RenderError;

use super::{
    ast::{Branch, Expr, Node, Template},
    helpers::Helper,
    lexer::{Tag, Token, tokenize},
};

/// Parse template source.
pub fn parse(source: &str) -> Result<Template, RenderError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        tokens: tokens.into_iter(),
    };

    let (nodes, stop) = parser.parse_body()?;
    match stop {
        Stop::Eof => Ok(Template { nodes }),
        Stop::Else { line, .. } => Err(RenderError::new(line, "'else' outside of a block")),
        Stop::Close { name, line } => Err(RenderError::new(
            line,
            format!("unmatched closing tag {{{{/{name}}}}}"),
        )),
    }
}

/// What ended a run of nodes.
enum Stop {
    Eof,
    Else { condition: Option<Expr>, line: usize },
    Close { name: String, line: usize },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Block {
    If,
    Unless,
}

impl Block {
    fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
        }
    }
}

struct Parser {
    tokens: std::vec::IntoIter<Token>,
}

impl Parser {
    fn parse_body(&mut self) -> Result<(Vec<Node>, Stop), RenderError> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            let tag = match token {
                Token::Text(text) => {
                    if !text.is_empty() {
                        nodes.push(Node::Text(text));
                    }
                    continue;
                }
                Token::Tag(tag) if tag.comment => continue,
                Token::Tag(tag) => tag,
            };

            if let Some(rest) = tag.body.strip_prefix('#') {
                nodes.push(self.parse_block(rest, tag.line)?);
            } else if let Some(name) = tag.body.strip_prefix('/') {
                return Ok((
                    nodes,
                    Stop::Close {
                        name: name.trim().to_string(),
                        line: tag.line,
                    },
                ));
            } else if let Some(condition) = else_condition(&tag)? {
                return Ok((
                    nodes,
                    Stop::Else {
                        condition,
                        line: tag.line,
                    },
                ));
            } else {
                nodes.push(Node::Output(parse_expression(&tag.body, tag.line)?));
            }
        }

        Ok((nodes, Stop::Eof))
    }

    fn parse_block(&mut self, header: &str, line: usize) -> Result<Node, RenderError> {
        let (name, rest) = split_word(header);
        let block = match name {
            "if" => Block::If,
            "unless" => Block::Unless,
            other => {
                return Err(RenderError::new(
                    line,
                    format!("unknown block helper '#{other}'"),
                ));
            }
        };

        let condition = parse_expression(rest, line)?;
        let (body, mut stop) = self.parse_body()?;

        let mut branches = vec![Branch { condition, body }];
        let mut otherwise = Vec::new();

        loop {
            match stop {
                Stop::Close {
                    name,
                    line: close_line,
                } => {
                    if name != block.name() {
                        return Err(RenderError::new(
                            close_line,
                            format!(
                                "mismatched closing tag: expected {{{{/{}}}}}, found {{{{/{name}}}}}",
                                block.name()
                            ),
                        ));
                    }
                    break;
                }
                Stop::Eof => {
                    return Err(RenderError::new(
                        line,
                        format!("unclosed block {{{{#{}}}}}", block.name()),
                    ));
                }
                Stop::Else {
                    condition: Some(condition),
                    line: else_line,
                } => {
                    if block == Block::Unless {
                        return Err(RenderError::new(
                            else_line,
                            "'else if' is not allowed inside {{#unless}}",
                        ));
                    }
                    let (body, next) = self.parse_body()?;
                    branches.push(Branch { condition, body });
                    stop = next;
                }
                Stop::Else {
                    condition: None, ..
                } => {
                    let (body, next) = self.parse_body()?;
                    otherwise = body;
                    if let Stop::Else { line, .. } = next {
                        return Err(RenderError::new(
                            line,
                            format!(
                                "'else' after the final branch of {{{{#{}}}}}",
                                block.name()
                            ),
                        ));
                    }
                    stop = next;
                }
            }
        }

        Ok(match block {
            Block::If => Node::If {
                branches,
                otherwise,
            },
            Block::Unless => {
                let Branch { condition, body } = branches.remove(0);
                Node::Unless {
                    condition,
                    body,
                    otherwise,
                }
            }
        })
    }
}

/// `else` → `Some(None)`, `else if expr` → `Some(Some(expr))`, anything else → `None`.
fn else_condition(tag: &Tag) -> Result<Option<Option<Expr>>, RenderError> {
    let (word, rest) = split_word(&tag.body);
    if word != "else" {
        return Ok(None);
    }
    if rest.is_empty() {
        return Ok(Some(None));
    }

    let (keyword, condition) = split_word(rest);
    if keyword != "if" {
        return Err(RenderError::new(
            tag.line,
            format!("unexpected '{rest}' after 'else'"),
        ));
    }
    Ok(Some(Some(parse_expression(condition, tag.line)?)))
}

/// First whitespace-delimited word and the trimmed remainder.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.find(char::is_whitespace) {
        Some(at) => (&s[..at], s[at..].trim_start()),
        None => (s, ""),
    }
}

// ── Expressions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Open,
    Close,
    Str(String),
    Word(String),
}

fn lex_expression(body: &str, line: usize) -> Result<Vec<Piece>, RenderError> {
    let mut pieces = Vec::new();
    let mut chars = body.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '(' => pieces.push(Piece::Open),
            ')' => pieces.push(Piece::Close),
            '"' | '\'' => {
                let mut value = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == c {
                        closed = true;
                        break;
                    }
                    value.push(next);
                }
                if !closed {
                    return Err(RenderError::new(line, "unterminated string literal"));
                }
                pieces.push(Piece::Str(value));
            }
            _ => {
                let mut end = at + c.len_utf8();
                while let Some(&(next_at, next)) = chars.peek() {
                    if next.is_whitespace() || matches!(next, '(' | ')' | '"' | '\'') {
                        break;
                    }
                    end = next_at + next.len_utf8();
                    chars.next();
                }
                pieces.push(Piece::Word(body[at..end].to_string()));
            }
        }
    }

    Ok(pieces)
}

/// Parse a tag body (or block condition) into an expression.
pub(crate) fn parse_expression(body: &str, line: usize) -> Result<Expr, RenderError> {
    let mut parser = ExprParser {
        pieces: lex_expression(body, line)?,
        pos: 0,
        line,
    };

    let expr = parser.parse_sequence(false)?;
    if parser.pos < parser.pieces.len() {
        return Err(parser.error("unbalanced parentheses"));
    }
    Ok(expr)
}

struct ExprParser {
    pieces: Vec<Piece>,
    pos: usize,
    line: usize,
}

impl ExprParser {
    fn error(&self, message: impl Into<String>) -> RenderError {
        RenderError::new(self.line, message)
    }

    fn peek(&self) -> Option<&Piece> {
        self.pieces.get(self.pos)
    }

    fn at_sequence_end(&self) -> bool {
        matches!(self.peek(), None | Some(Piece::Close))
    }

    /// `helper arg…` or a single term. Inside parentheses only helper calls
    /// are allowed.
    fn parse_sequence(&mut self, in_parens: bool) -> Result<Expr, RenderError> {
        if self.at_sequence_end() {
            return Err(self.error("empty expression"));
        }

        if let Some(Piece::Word(word)) = self.peek() {
            let word = word.clone();
            if let Some(helper) = Helper::from_name(&word) {
                self.pos += 1;
                return self.parse_call(helper);
            }

            let has_args = !matches!(self.pieces.get(self.pos + 1), None | Some(Piece::Close));
            if is_identifier(&word) && (in_parens || has_args) {
                return Err(self.error(format!("unknown helper '{word}'")));
            }
        }

        if in_parens {
            return Err(self.error("sub-expression must start with a helper name"));
        }

        let term = self.parse_term()?;
        if !self.at_sequence_end() {
            return Err(self.error("unexpected extra arguments"));
        }
        Ok(term)
    }

    fn parse_call(&mut self, helper: Helper) -> Result<Expr, RenderError> {
        let mut args = Vec::new();
        while !self.at_sequence_end() {
            args.push(self.parse_term()?);
        }

        if !helper.arity().accepts(args.len()) {
            return Err(self.error(format!(
                "helper '{helper}' takes {}, got {}",
                helper.arity(),
                args.len()
            )));
        }
        Ok(Expr::Call { helper, args })
    }

    fn parse_term(&mut self) -> Result<Expr, RenderError> {
        let piece = self
            .pieces
            .get(self.pos)
            .cloned()
            .ok_or_else(|| self.error("empty expression"))?;
        self.pos += 1;

        match piece {
            Piece::Open => {
                let inner = self.parse_sequence(true)?;
                match self.peek() {
                    Some(Piece::Close) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    _ => Err(self.error("unbalanced parentheses")),
                }
            }
            Piece::Close => Err(self.error("unbalanced parentheses")),
            Piece::Str(value) => Ok(Expr::Literal(Value::String(value))),
            Piece::Word(word) => self.parse_word(&word),
        }
    }

    fn parse_word(&self, word: &str) -> Result<Expr, RenderError> {
        match word {
            "true" => return Ok(Expr::Literal(Value::Bool(true))),
            "false" => return Ok(Expr::Literal(Value::Bool(false))),
            "null" => return Ok(Expr::Literal(Value::Null)),
            _ => {}
        }

        let numeric = word
            .strip_prefix('-')
            .unwrap_or(word)
            .starts_with(|c: char| c.is_ascii_digit());
        if numeric {
            return parse_number(word)
                .map(Expr::Literal)
                .ok_or_else(|| self.error(format!("invalid number '{word}'")));
        }

        let path = word
            .strip_prefix("@root")
            .or_else(|| word.strip_prefix("this"))
            .filter(|rest| rest.is_empty() || rest.starts_with('.'))
            .map(|rest| rest.trim_start_matches('.'))
            .unwrap_or(word);

        if path.is_empty() {
            return Ok(Expr::Path(Vec::new()));
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(self.error(format!("invalid path '{word}'")));
        }
        Ok(Expr::Path(segments))
    }
}

fn is_identifier(word: &str) -> bool {
    word.chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        && !word.starts_with(|c: char| c.is_ascii_digit())
}

fn parse_number(word: &str) -> Option<Value> {
    if let Ok(int) = word.parse::<i64>() {
        return Some(Value::Number(int.into()));
    }
    word.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
}
