//! Argument values and flattening
//!
//! Call arguments are trees: scalars, strings, `Vec3`s and nested lists.
//! `flatten` turns one into the ordered token list that goes on the wire.

use std::fmt;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::error::{McError, Result};
use crate::vec3::Vec3;

/// A (possibly nested) call argument
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Vec3(Vec3),
    List(Vec<Arg>),
}

/// A primitive token after flattening
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Arg {
    /// The empty list: flattens to nothing, so the argument is omitted
    pub fn none() -> Self {
        Arg::List(Vec::new())
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Arg>,
    {
        Arg::List(items.into_iter().map(Into::into).collect())
    }

    /// Integer block coordinates of a position
    pub fn tile(pos: Vec3) -> Self {
        Arg::list(pos.tile())
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Arg::List(items) if items.is_empty())
    }
}

/// Canonical wire rendering. Floats always keep a fractional part or an
/// exponent (`64.0`, `0.1`, `1e16`) so the server can tell them from ints.
/// Non-finite floats use the spelling `Double.parseDouble` accepts.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(v) => write!(f, "{}", v),
            Token::Float(v) if v.is_nan() => f.write_str("NaN"),
            Token::Float(v) if v.is_infinite() => {
                f.write_str(if v.is_sign_positive() { "Infinity" } else { "-Infinity" })
            }
            Token::Float(v) => write!(f, "{:?}", v),
            Token::Bool(v) => write!(f, "{}", v),
            Token::Str(s) => f.write_str(s),
        }
    }
}

/// Flatten with the default depth limit
pub fn flatten(arg: &Arg) -> Result<Vec<Token>> {
    flatten_with_depth(arg, DEFAULT_MAX_DEPTH)
}

/// Flatten several argument groups in order into one token list
pub fn flatten_all(args: &[Arg], max_depth: usize) -> Result<Vec<Token>> {
    let mut out = Vec::new();
    for arg in args {
        push_tokens(arg, 0, max_depth, &mut out)?;
    }
    Ok(out)
}

/// Depth-first, left-to-right flattening. Strings are atomic, a `Vec3`
/// contributes x, y, z and empty lists contribute nothing.
pub fn flatten_with_depth(arg: &Arg, max_depth: usize) -> Result<Vec<Token>> {
    let mut out = Vec::new();
    push_tokens(arg, 0, max_depth, &mut out)?;
    Ok(out)
}

fn push_tokens(arg: &Arg, depth: usize, max_depth: usize, out: &mut Vec<Token>) -> Result<()> {
    if depth > max_depth {
        return Err(McError::Argument(format!(
            "argument nesting deeper than {} levels",
            max_depth
        )));
    }

    match arg {
        Arg::Int(v) => out.push(Token::Int(*v)),
        Arg::Float(v) => out.push(Token::Float(*v)),
        Arg::Bool(v) => out.push(Token::Bool(*v)),
        Arg::Str(s) => out.push(Token::Str(s.clone())),
        Arg::Vec3(v) => out.extend([Token::Float(v.x), Token::Float(v.y), Token::Float(v.z)]),
        Arg::List(items) => {
            for item in items {
                push_tokens(item, depth + 1, max_depth, out)?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! int_arg {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(v: $t) -> Self {
                    Arg::Int(v as i64)
                }
            }
        )*
    };
}

int_arg!(i8, i16, i32, i64, u8, u16, u32, usize, isize);

impl From<f32> for Arg {
    fn from(v: f32) -> Self {
        Arg::Float(v as f64)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<&String> for Arg {
    fn from(v: &String) -> Self {
        Arg::Str(v.clone())
    }
}

impl From<Vec3> for Arg {
    fn from(v: Vec3) -> Self {
        Arg::Vec3(v)
    }
}

impl From<Token> for Arg {
    fn from(t: Token) -> Self {
        match t {
            Token::Int(v) => Arg::Int(v),
            Token::Float(v) => Arg::Float(v),
            Token::Bool(v) => Arg::Bool(v),
            Token::Str(s) => Arg::Str(s),
        }
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(items: Vec<T>) -> Self {
        Arg::list(items)
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(items: [T; N]) -> Self {
        Arg::list(items)
    }
}

/// `None` becomes the empty list and drops out of the request
impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Arg::none(),
        }
    }
}

/// Build a `Vec<Arg>` from heterogeneous expressions
///
/// ```
/// use mcremote::{args, Vec3};
/// let a = args![Vec3::new(0.0, 64.0, 0.0), "STONE"];
/// assert_eq!(a.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::protocol::Arg>::new() };
    ($($x:expr),+ $(,)?) => {
        vec![$($crate::protocol::Arg::from($x)),+]
    };
}
