use std::sync::OnceLock;

use regex::Regex;

/// Search fields the query grammar accepts.
const FIELDS: &[&str] = &[
    "keyword",
    "title",
    "author",
    "subject",
    "journal_title",
    "identifier",
    "published",
    "date",
    "filter",
    "fulltext",
];

/// Boolean operators, longest first so `AND NOT` wins over `AND`.
const OPERATORS: &[&str] = &["AND NOT", "AND", "OR", "NOT"];

fn field_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z_]+").unwrap())
}

/// Validate a client query. Returns the first problem found, phrased for the
/// client-facing error details.
pub fn validate(query: &str) -> Result<(), String> {
    let mut parser = Parser {
        input: query,
        pos: 0,
    };
    parser.expression()?;
    parser.skip_ws();
    if parser.pos != parser.input.len() {
        return Err(format!(
            "unexpected input at offset {}: {}",
            parser.pos,
            &parser.input[parser.pos..]
        ));
    }
    Ok(())
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<(), String> {
        self.clause()?;
        loop {
            self.skip_ws();
            match self.boolean_operator() {
                Some(op) => {
                    self.skip_ws();
                    self.clause()
                        .map_err(|err| format!("expected clause after {}: {}", op, err))?;
                }
                None => return Ok(()),
            }
        }
    }

    fn clause(&mut self) -> Result<(), String> {
        self.skip_ws();
        if self.eat('(') {
            self.expression()?;
            self.skip_ws();
            if !self.eat(')') {
                return Err("unbalanced parentheses".to_string());
            }
            return Ok(());
        }

        let field = self.field_name()?;
        if !FIELDS.contains(&field.as_str()) {
            return Err(format!("unknown search field: {}", field));
        }
        self.skip_ws();
        if !self.eat(':') {
            return Err(format!("expected ':' after {}", field));
        }
        self.skip_ws();
        if !self.eat('{') {
            return Err(format!("expected '{{' to open the {} term", field));
        }
        self.term_body(&field)
    }

    // term text is free-form; braces may nest and must balance
    fn term_body(&mut self, field: &str) -> Result<(), String> {
        let mut depth = 1;
        while let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(format!("unterminated {} term", field))
    }

    fn field_name(&mut self) -> Result<String, String> {
        let rest = &self.input[self.pos..];
        match field_pattern().find(rest) {
            Some(found) => {
                self.pos += found.end();
                Ok(found.as_str().to_string())
            }
            None => Err(format!("expected a search field at offset {}", self.pos)),
        }
    }

    fn boolean_operator(&mut self) -> Option<&'static str> {
        let rest = &self.input[self.pos..];
        for op in OPERATORS.iter().copied() {
            if rest.starts_with(op) {
                // operators are whole words
                let following = rest[op.len()..].chars().next();
                if matches!(following, Some(c) if c.is_ascii_alphanumeric()) {
                    continue;
                }
                self.pos += op.len();
                return Some(op);
            }
        }
        None
    }

    fn skip_ws(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            return true;
        }
        false
    }
}
