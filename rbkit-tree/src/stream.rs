//! Preorder text dump of a tree and the decoder that reads it back.
//!
//! Grammar, with whitespace allowed between tokens on input:
//!
//! ```text
//! subtree := "N" | "(" value "," color ")" subtree subtree
//! color   := "0" (black) | "1".."9" (red)
//! ```

use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use tracing::debug;

use crate::compare::{Comparator, NaturalOrder};
use crate::node::{Color, Link, Node, Side};
use crate::tree::RBTree;
use crate::validate::InvariantViolation;

/// Depth guard applied by [`RBTree::read_from_stream`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Deepest node level accepted, the root being level 1.
    pub max_depth: usize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Errors that can occur while reading a tree dump.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("Unexpected {found:?} at byte {offset}, expected {expected}")]
    UnexpectedChar {
        found: char,
        offset: usize,
        expected: &'static str,
    },

    #[error("Invalid value {text:?} at byte {offset}")]
    InvalidValue { text: String, offset: usize },

    #[error("Invalid color {found:?} at byte {offset}")]
    InvalidColor { found: char, offset: usize },

    #[error("Tree is deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },

    #[error("Trailing input at byte {offset}")]
    TrailingInput { offset: usize },

    #[error("Not a red-black tree: {0}")]
    Invalid(#[from] InvariantViolation),
}

impl<T: fmt::Display, C> fmt::Display for RBTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![self.root];
        while let Some(link) = pending.pop() {
            match link {
                None => f.write_str("N")?,
                Some(node) => {
                    // SAFETY: every link reachable from `root` is live while `self` is borrowed.
                    let node = unsafe { &*node.as_ptr() };
                    write!(f, "({}, {})", node.value, node.color.digit())?;
                    pending.push(node.right);
                    pending.push(node.left);
                }
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display, C> RBTree<T, C> {
    /// Write the preorder dump to `out`.
    ///
    /// Fails with [`io::ErrorKind::InvalidData`], before writing anything,
    /// if a value's text could not be read back unchanged: it contains `,`,
    /// `(` or `)`, or starts or ends with whitespace. [`fmt::Display`] on the
    /// tree renders such values without this check.
    pub fn save_in_stream<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let mut dump = String::new();
        let mut pending = vec![self.root];
        while let Some(link) = pending.pop() {
            match link {
                None => dump.push('N'),
                Some(node) => {
                    // SAFETY: every link reachable from `root` is live while `self` is borrowed.
                    let node = unsafe { &*node.as_ptr() };
                    let text = node.value.to_string();
                    if !is_encodable(&text) {
                        return Err(io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("value {text:?} cannot be written to a tree dump"),
                        ));
                    }
                    dump.push('(');
                    dump.push_str(&text);
                    dump.push_str(", ");
                    dump.push(node.color.digit());
                    dump.push(')');
                    pending.push(node.right);
                    pending.push(node.left);
                }
            }
        }
        out.write_all(dump.as_bytes())
    }
}

/// Whether [`Lexer::value`] reads `text` back as written.
fn is_encodable(text: &str) -> bool {
    !text.contains([',', '(', ')'])
        && !text.starts_with(|c: char| c.is_ascii_whitespace())
        && text.trim_end() == text
}

impl<T: FromStr + PartialOrd> RBTree<T, NaturalOrder> {
    /// Read one tree dump ordered by [`NaturalOrder`].
    ///
    /// Exactly one tree is consumed; bytes after its last token stay in
    /// `input`, so pass `&mut reader` to read several dumps back to back.
    pub fn read_from_stream<R: BufRead>(input: R) -> Result<Self, ReadError> {
        Self::read_from_stream_with(input, NaturalOrder, &ReadOptions::default())
    }
}

impl<T: FromStr, C: Comparator<T>> RBTree<T, C> {
    /// Read one tree dump ordered by `cmp`.
    ///
    /// The decoded tree must satisfy every red-black invariant under `cmp`;
    /// otherwise [`ReadError::Invalid`] is returned.
    pub fn read_from_stream_with<R: BufRead>(
        input: R,
        cmp: C,
        options: &ReadOptions,
    ) -> Result<Self, ReadError> {
        let tree = decode(input, cmp, options)?;
        tree.check_invariants()?;
        debug!(size = tree.size, "decoded tree");
        Ok(tree)
    }
}

impl<T: FromStr + PartialOrd> FromStr for RBTree<T, NaturalOrder> {
    type Err = ReadError;

    fn from_str(s: &str) -> Result<Self, ReadError> {
        let mut rest = s.as_bytes();
        let tree = Self::read_from_stream(&mut rest)?;
        let consumed = s.len() - rest.len();
        match rest.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(pos) => Err(ReadError::TrailingInput {
                offset: consumed + pos,
            }),
            None => Ok(tree),
        }
    }
}

/// Build a tree from a dump without checking the red-black invariants.
///
/// Nodes are linked into the result as soon as they are read, so a failure
/// part-way through releases everything decoded so far.
pub(crate) fn decode<T, C, R>(
    input: R,
    cmp: C,
    options: &ReadOptions,
) -> Result<RBTree<T, C>, ReadError>
where
    T: FromStr,
    R: BufRead,
{
    let mut tree = RBTree::with_comparator(cmp);
    let mut lexer = Lexer::new(input);

    // Child slots still to be read: (parent, side, level of the child).
    let mut pending: Vec<(Link<T>, Side, usize)> = vec![(None, Side::Left, 1)];
    while let Some((parent, side, depth)) = pending.pop() {
        let Some((value, color)) = lexer.subtree_head()? else {
            continue;
        };
        if depth > options.max_depth {
            return Err(ReadError::TooDeep {
                max_depth: options.max_depth,
            });
        }

        let node = Node::alloc(value, color);
        // SAFETY: `parent` was linked into `tree` earlier in this loop and is live.
        unsafe {
            (*node.as_ptr()).parent = parent;
            match parent {
                Some(parent) => (*parent.as_ptr()).set_child(side, Some(node)),
                None => tree.root = Some(node),
            }
        }
        tree.size += 1;

        pending.push((Some(node), Side::Right, depth + 1));
        pending.push((Some(node), Side::Left, depth + 1));
    }
    Ok(tree)
}

/// Byte-level tokenizer tracking the offset for error reports.
struct Lexer<R> {
    input: R,
    offset: usize,
}

impl<R: BufRead> Lexer<R> {
    fn new(input: R) -> Self {
        Self { input, offset: 0 }
    }

    fn peek(&mut self) -> Result<Option<u8>, ReadError> {
        loop {
            match self.input.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn bump(&mut self) {
        self.input.consume(1);
        self.offset += 1;
    }

    fn next_byte(&mut self) -> Result<u8, ReadError> {
        let byte = self.peek()?.ok_or(ReadError::UnexpectedEof {
            offset: self.offset,
        })?;
        self.bump();
        Ok(byte)
    }

    fn skip_whitespace(&mut self) -> Result<(), ReadError> {
        while let Some(byte) = self.peek()? {
            if !byte.is_ascii_whitespace() {
                break;
            }
            self.bump();
        }
        Ok(())
    }

    fn expect(&mut self, wanted: u8, expected: &'static str) -> Result<(), ReadError> {
        self.skip_whitespace()?;
        let offset = self.offset;
        match self.next_byte()? {
            byte if byte == wanted => Ok(()),
            byte => Err(ReadError::UnexpectedChar {
                found: byte as char,
                offset,
                expected,
            }),
        }
    }

    /// `None` for an `N` marker, otherwise the value and color of a node.
    fn subtree_head<T: FromStr>(&mut self) -> Result<Option<(T, Color)>, ReadError> {
        self.skip_whitespace()?;
        let offset = self.offset;
        match self.next_byte()? {
            b'N' => Ok(None),
            b'(' => {
                let value = self.value()?;
                self.expect(b',', "','")?;
                let color = self.color()?;
                self.expect(b')', "')'")?;
                Ok(Some((value, color)))
            }
            byte => Err(ReadError::UnexpectedChar {
                found: byte as char,
                offset,
                expected: "'(' or 'N'",
            }),
        }
    }

    /// Value text runs up to the next `,`, which is left for the caller.
    fn value<T: FromStr>(&mut self) -> Result<T, ReadError> {
        self.skip_whitespace()?;
        let offset = self.offset;
        let mut bytes = Vec::new();
        loop {
            match self.peek()? {
                None => {
                    return Err(ReadError::UnexpectedEof {
                        offset: self.offset,
                    })
                }
                Some(b',') => break,
                Some(byte @ (b'(' | b')')) => {
                    return Err(ReadError::UnexpectedChar {
                        found: byte as char,
                        offset: self.offset,
                        expected: "','",
                    })
                }
                Some(byte) => {
                    bytes.push(byte);
                    self.bump();
                }
            }
        }

        let text = String::from_utf8(bytes).map_err(|err| ReadError::InvalidValue {
            text: String::from_utf8_lossy(err.as_bytes()).into_owned(),
            offset,
        })?;
        let text = text.trim_end();
        text.parse().map_err(|_| ReadError::InvalidValue {
            text: text.to_string(),
            offset,
        })
    }

    fn color(&mut self) -> Result<Color, ReadError> {
        self.skip_whitespace()?;
        let offset = self.offset;
        let byte = self.next_byte()?;
        Color::from_digit(byte).ok_or(ReadError::InvalidColor {
            found: byte as char,
            offset,
        })
    }
}
