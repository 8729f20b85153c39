use crate::ast::{BinOp, Node};
use crate::error::ParseError;
use crate::lexer::{Spanned, Token};
use crate::names::{Builtin, Entry, NameTable};

/// Maximum nesting of parentheses, signs and function calls.
pub(crate) const MAX_DEPTH: usize = 128;

/// Maximum height of a compiled tree.
///
/// Evaluation recurses once per level, so this bounds its stack use.
pub(crate) const MAX_HEIGHT: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Item {
    Number(f64),
    Constant(f64),
    Variable(usize),
    Function(Builtin),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Item {
    /// Whether this item can begin the right operand of an implicit product.
    ///
    /// Numbers never do: `x 2` is rejected rather than read as `x*2`.
    fn starts_implicit_factor(self, allow_functions: bool) -> bool {
        match self {
            Item::Variable(_) | Item::Constant(_) | Item::LParen => true,
            Item::Function(_) => allow_functions,
            _ => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Lexeme {
    item: Item,
    pos: usize,
    text: String,
}

impl Lexeme {
    fn unexpected(&self) -> ParseError {
        ParseError::UnexpectedToken {
            found: self.text.clone(),
            pos: self.pos,
        }
    }
}

/// Parses a token stream into a tree.
///
/// Identifiers are resolved against the declared variables first and the
/// name table second. A name that matches neither is split into a run of
/// known names when possible (`xsin` reads as `x sin`), which is how
/// juxtaposed names become implicit products.
pub(crate) fn parse(
    tokens: Vec<Spanned>,
    names: &NameTable,
    variables: &[String],
) -> Result<Node, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let longest = variables
        .iter()
        .map(|v| v.chars().count())
        .chain(std::iter::once(names.longest_name()))
        .max()
        .unwrap_or(0);
    let resolver = Resolver {
        names,
        variables,
        longest,
    };
    let lexemes = resolver.resolve(tokens)?;

    let mut parser = Parser {
        lexemes,
        cursor: 0,
        depth: 0,
    };
    let tree = parser.expr()?;
    match parser.peek() {
        Some(trailing) => Err(trailing.unexpected()),
        None => Ok(tree.node),
    }
}

struct Resolver<'a> {
    names: &'a NameTable,
    variables: &'a [String],
    /// Length in characters of the longest known name.
    longest: usize,
}

impl Resolver<'_> {
    fn resolve(&self, tokens: Vec<Spanned>) -> Result<Vec<Lexeme>, ParseError> {
        let mut lexemes = Vec::with_capacity(tokens.len());
        for Spanned { token, pos } in tokens {
            let item = match &token {
                Token::Ident(word) => {
                    let parts = self.split(word).ok_or_else(|| ParseError::UnknownIdentifier {
                        name: word.clone(),
                        pos,
                    })?;
                    lexemes.extend(parts.into_iter().map(|(item, part)| Lexeme {
                        item,
                        pos,
                        text: format!("name `{part}`"),
                    }));
                    continue;
                }
                Token::Number(n) => Item::Number(*n),
                Token::Plus => Item::Plus,
                Token::Minus => Item::Minus,
                Token::Star => Item::Star,
                Token::Slash => Item::Slash,
                Token::Caret => Item::Caret,
                Token::LParen => Item::LParen,
                Token::RParen => Item::RParen,
            };
            lexemes.push(Lexeme {
                item,
                pos,
                text: token.describe(),
            });
        }
        Ok(lexemes)
    }

    fn lookup(&self, name: &str) -> Option<Item> {
        if let Some(index) = self.variables.iter().position(|v| v == name) {
            return Some(Item::Variable(index));
        }
        match self.names.get(name)? {
            Entry::Function(builtin) => Some(Item::Function(builtin)),
            Entry::Constant(value) => Some(Item::Constant(value)),
        }
    }

    /// Splits a word into known names, preferring the longest prefix.
    ///
    /// Works right to left over character boundaries so every suffix is
    /// solved once. Candidates never run past the longest known name, and
    /// each solved position only records its first name and where the rest
    /// starts, so the work grows linearly with the word.
    fn split<'w>(&self, word: &'w str) -> Option<Vec<(Item, &'w str)>> {
        let bounds: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let last = bounds.len() - 1;

        let mut next: Vec<Option<(Item, usize)>> = vec![None; bounds.len()];
        for start in (0..last).rev() {
            for end in (start + 1..=last.min(start + self.longest)).rev() {
                if end < last && next[end].is_none() {
                    continue;
                }
                if let Some(item) = self.lookup(&word[bounds[start]..bounds[end]]) {
                    next[start] = Some((item, end));
                    break;
                }
            }
        }

        let mut parts = Vec::new();
        let mut start = 0;
        while start < last {
            let (item, end) = next[start]?;
            parts.push((item, &word[bounds[start]..bounds[end]]));
            start = end;
        }
        Some(parts)
    }
}

/// Recursive-descent parser over resolved lexemes.
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := factor (('*' | '/') factor | <implicit> factor)*
/// factor  := ('-' | '+') factor | power
/// power   := primary ('^' factor)?
/// primary := number | constant | variable | '(' expr ')' | call
/// call    := function '(' expr ')' | function bare
/// bare    := factor (<implicit> power)*
/// ```
///
/// An implicit product starts at a variable, constant, `(` or (outside a
/// bare argument) a function name.
struct Parser {
    lexemes: Vec<Lexeme>,
    cursor: usize,
    depth: usize,
}

/// A subtree and its height.
///
/// Long flat chains such as `x+x+...+x` nest no parentheses but still grow
/// the tree, so height is checked as nodes are joined.
struct Tree {
    node: Node,
    height: usize,
}

impl Tree {
    fn leaf(node: Node) -> Self {
        Self { node, height: 1 }
    }

    fn wrap(self, make: impl FnOnce(Box<Node>) -> Node) -> Result<Self, ParseError> {
        let height = checked_height(self.height + 1)?;
        Ok(Self {
            node: make(Box::new(self.node)),
            height,
        })
    }

    fn join(op: BinOp, lhs: Tree, rhs: Tree) -> Result<Self, ParseError> {
        let height = checked_height(lhs.height.max(rhs.height) + 1)?;
        Ok(Self {
            node: Node::binary(op, lhs.node, rhs.node),
            height,
        })
    }
}

fn checked_height(height: usize) -> Result<usize, ParseError> {
    if height > MAX_HEIGHT {
        return Err(ParseError::TooLarge { limit: MAX_HEIGHT });
    }
    Ok(height)
}

impl Parser {
    fn peek(&self) -> Option<&Lexeme> {
        self.lexemes.get(self.cursor)
    }

    fn peek_item(&self) -> Option<Item> {
        self.peek().map(|lexeme| lexeme.item)
    }

    fn advance(&mut self) -> Option<Lexeme> {
        let lexeme = self.lexemes.get(self.cursor).cloned();
        if lexeme.is_some() {
            self.cursor += 1;
        }
        lexeme
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn expr(&mut self) -> Result<Tree, ParseError> {
        let mut tree = self.term()?;
        loop {
            let op = match self.peek_item() {
                Some(Item::Plus) => BinOp::Add,
                Some(Item::Minus) => BinOp::Sub,
                _ => break,
            };
            self.cursor += 1;
            let rhs = self.term()?;
            tree = Tree::join(op, tree, rhs)?;
        }
        Ok(tree)
    }

    fn term(&mut self) -> Result<Tree, ParseError> {
        let mut tree = self.factor()?;
        loop {
            let op = match self.peek_item() {
                Some(Item::Star) => {
                    self.cursor += 1;
                    BinOp::Mul
                }
                Some(Item::Slash) => {
                    self.cursor += 1;
                    BinOp::Div
                }
                Some(item) if item.starts_implicit_factor(true) => BinOp::Mul,
                _ => break,
            };
            let rhs = self.factor()?;
            tree = Tree::join(op, tree, rhs)?;
        }
        Ok(tree)
    }

    fn factor(&mut self) -> Result<Tree, ParseError> {
        self.enter()?;
        let tree = match self.peek_item() {
            Some(Item::Minus) => {
                self.cursor += 1;
                self.factor()?.wrap(Node::Negate)?
            }
            Some(Item::Plus) => {
                self.cursor += 1;
                self.factor()?
            }
            _ => self.power()?,
        };
        self.leave();
        Ok(tree)
    }

    fn power(&mut self) -> Result<Tree, ParseError> {
        let base = self.primary()?;
        if self.peek_item() == Some(Item::Caret) {
            self.cursor += 1;
            let exponent = self.factor()?;
            return Tree::join(BinOp::Pow, base, exponent);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Tree, ParseError> {
        let lexeme = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        match lexeme.item {
            Item::Number(value) | Item::Constant(value) => Ok(Tree::leaf(Node::Number(value))),
            Item::Variable(index) => Ok(Tree::leaf(Node::Variable(index))),
            Item::LParen => self.group(lexeme.pos),
            Item::Function(builtin) => self.call(builtin),
            _ => Err(lexeme.unexpected()),
        }
    }

    /// Parses the rest of a parenthesized group whose `(` was consumed.
    fn group(&mut self, open: usize) -> Result<Tree, ParseError> {
        self.enter()?;
        let inner = self.expr()?;
        match self.advance() {
            Some(Lexeme {
                item: Item::RParen, ..
            }) => {
                self.leave();
                Ok(inner)
            }
            Some(other) => Err(other.unexpected()),
            None => Err(ParseError::UnclosedParen { pos: open }),
        }
    }

    fn call(&mut self, builtin: Builtin) -> Result<Tree, ParseError> {
        let arg = match self.peek() {
            Some(Lexeme {
                item: Item::LParen,
                pos,
                ..
            }) => {
                let open = *pos;
                self.cursor += 1;
                self.group(open)?
            }
            Some(_) => self.bare_argument()?,
            None => return Err(ParseError::UnexpectedEnd),
        };
        arg.wrap(|arg| Node::Call(builtin, arg))
    }

    /// Parses a function argument written without parentheses (`sin 2x`).
    ///
    /// The argument runs over implicit products and stops at the next
    /// function name or explicit operator, so `sin x/2` is `sin(x) / 2` and
    /// `sin 2x/2` is `sin(2x) / 2`. Write `sin(x/2)` to divide inside.
    fn bare_argument(&mut self) -> Result<Tree, ParseError> {
        let mut tree = self.factor()?;
        while self
            .peek_item()
            .is_some_and(|item| item.starts_implicit_factor(false))
        {
            let rhs = self.power()?;
            tree = Tree::join(BinOp::Mul, tree, rhs)?;
        }
        Ok(tree)
    }
}
