//! Grammar rules for parsing markup fragments.
//!
//! A fragment is a sequence of elements and text runs:
//!
//! ```text
//! <div class="greeting" hidden>
//!   <h1>Hello</h1>
//!   <hr />
//!   <!-- ignored -->
//! </div>
//! ```
//!
//! Attribute values are quoted (single or double) or bare; an attribute
//! without a value parses as boolean true. The parser produces element and
//! text virtual nodes only — component nodes are built through the
//! `ComponentNode` API.

use arbor_core::{ElementNode, ParseError, Value, VNode};

/// Options controlling fragment parsing.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Keep text runs that consist only of whitespace (dropped by default —
    /// indentation between elements is markup formatting, not content).
    pub preserve_whitespace: bool,
}

/// Parse a fragment into its root nodes, with default options.
pub fn parse(input: &str) -> Result<Vec<VNode>, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parse a fragment into its root nodes.
pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Vec<VNode>, ParseError> {
    let mut parser = Parser::new(input, options);
    let nodes = parser.parse_nodes()?;
    if parser.current().is_some() {
        // A stray closing tag at the top level.
        return Err(parser.unexpected("element or text"));
    }
    Ok(nodes)
}

/// Parse a fragment that must contain exactly one root node.
pub fn parse_one(input: &str) -> Result<VNode, ParseError> {
    parse_one_with(input, &ParseOptions::default())
}

/// Parse a single-root fragment with explicit options.
pub fn parse_one_with(input: &str, options: &ParseOptions) -> Result<VNode, ParseError> {
    let mut parser = Parser::new(input, options);
    parser.skip_whitespace();
    parser.skip_comments();
    let node = match parser.parse_node()? {
        Some(node) => node,
        None => return Err(ParseError::UnexpectedEof),
    };
    parser.skip_whitespace();
    parser.skip_comments();
    if parser.current().is_some() {
        return Err(ParseError::ExtraContent { line: parser.line });
    }
    Ok(node)
}

/// Stateful parser that tracks position in the input.
struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(input: &str, options: &'a ParseOptions) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            options,
        }
    }

    /// Current character, if any.
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Advance one character, tracking line and column.
    fn advance(&mut self) {
        if let Some(c) = self.current() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += 1;
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn skip(&mut self, s: &str) {
        for _ in s.chars() {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn skip_comments(&mut self) {
        while self.starts_with("<!--") {
            self.skip_comment();
            self.skip_whitespace();
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        match self.current() {
            Some(c) if c == expected => {
                self.advance();
                Ok(())
            }
            Some(_) => Err(self.unexpected(&format!("'{expected}'"))),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.current().map(String::from).unwrap_or_default();
        ParseError::UnexpectedToken {
            found,
            expected: expected.to_string(),
            line: self.line,
            column: self.column,
        }
    }

    /// Parse sibling nodes until end of input or a closing tag.
    fn parse_nodes(&mut self) -> Result<Vec<VNode>, ParseError> {
        let mut nodes = Vec::new();
        while self.current().is_some() {
            if self.starts_with("<!--") {
                self.skip_comment();
            } else if self.starts_with("</") {
                break;
            } else if self.current() == Some('<') {
                if let Some(node) = self.parse_node()? {
                    nodes.push(node);
                }
            } else if let Some(text) = self.parse_text() {
                nodes.push(text);
            }
        }
        Ok(nodes)
    }

    /// Parse one element, or return `None` at end of input.
    fn parse_node(&mut self) -> Result<Option<VNode>, ParseError> {
        if self.current().is_none() {
            return Ok(None);
        }
        if self.current() != Some('<') {
            return Ok(self.parse_text());
        }
        self.parse_element().map(Some)
    }

    fn parse_element(&mut self) -> Result<VNode, ParseError> {
        self.expect('<')?;

        let tag = self.parse_name();
        if tag.is_empty() {
            return Err(self.unexpected("tag name"));
        }

        let mut element = ElementNode::new(tag.as_str());

        // Attributes up to `>` or `/>`.
        loop {
            self.skip_whitespace();
            match self.current() {
                Some('>') | Some('/') => break,
                Some(_) => {
                    let (name, value) = self.parse_attribute()?;
                    element.attrs.insert(name, value);
                }
                None => return Err(ParseError::UnexpectedEof),
            }
        }

        if self.starts_with("/>") {
            self.skip("/>");
            return Ok(element.into());
        }
        self.expect('>')?;

        element.children = self.parse_nodes()?;

        // Closing tag.
        if !self.starts_with("</") {
            return Err(ParseError::UnexpectedEof);
        }
        self.skip("</");
        let closing = self.parse_name();
        if closing != tag {
            return Err(ParseError::MismatchedTag {
                opened: tag,
                closed: closing,
                line: self.line,
            });
        }
        self.skip_whitespace();
        self.expect('>')?;

        Ok(element.into())
    }

    fn parse_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.current() {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == ':' {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    fn parse_attribute(&mut self) -> Result<(String, Value), ParseError> {
        let name = self.parse_name();
        if name.is_empty() {
            return Err(self.unexpected("attribute name"));
        }

        self.skip_whitespace();
        if self.current() != Some('=') {
            // Bare attribute: presence means true.
            return Ok((name, Value::Bool(true)));
        }
        self.advance();
        self.skip_whitespace();

        let value = self.parse_attribute_value()?;
        Ok((name, Value::String(value)))
    }

    fn parse_attribute_value(&mut self) -> Result<String, ParseError> {
        let quote = match self.current() {
            Some(c @ ('"' | '\'')) => c,
            Some(_) => {
                // Bare value runs to whitespace or tag end.
                let mut value = String::new();
                while let Some(c) = self.current() {
                    if c.is_whitespace() || c == '>' || c == '/' {
                        break;
                    }
                    value.push(c);
                    self.advance();
                }
                return Ok(value);
            }
            None => return Err(ParseError::UnexpectedEof),
        };

        let start_line = self.line;
        self.advance();
        let mut value = String::new();
        loop {
            match self.current() {
                Some(c) if c == quote => {
                    self.advance();
                    return Ok(value);
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
                None => return Err(ParseError::UnterminatedString { line: start_line }),
            }
        }
    }

    fn parse_text(&mut self) -> Option<VNode> {
        let mut text = String::new();
        while let Some(c) = self.current() {
            if c == '<' {
                break;
            }
            text.push(c);
            self.advance();
        }

        if text.is_empty() {
            return None;
        }
        if !self.options.preserve_whitespace && text.trim().is_empty() {
            return None;
        }
        Some(VNode::Text(text))
    }

    fn skip_comment(&mut self) {
        self.skip("<!--");
        while self.current().is_some() && !self.starts_with("-->") {
            self.advance();
        }
        self.skip("-->");
    }
}
