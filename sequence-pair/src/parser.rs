/// Reads instances from whitespace-separated unsigned integers:
///
/// ```text
/// <container width> <container height>
/// <number of rectangles>
/// <width> <height>
/// ...
/// ```
///
/// Line breaks carry no meaning. Anything after the last rectangle is ignored.
use std::io::Read;
use std::num::ParseIntError;
use std::str::{FromStr, SplitWhitespace};

use thiserror::Error;

use crate::instance::{Instance, Rectangle};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("invalid {expected}: {token:?}")]
    InvalidNumber {
        expected: String,
        token: String,
        #[source]
        source: ParseIntError,
    },
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next_number<T>(&mut self, expected: impl Fn() -> String) -> Result<T, ParseError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let token = self
            .inner
            .next()
            .ok_or_else(|| ParseError::UnexpectedEnd { expected: expected() })?;
        token.parse().map_err(|source| ParseError::InvalidNumber {
            expected: expected(),
            token: token.to_string(),
            source,
        })
    }

    fn next_rectangle(&mut self, name: &str) -> Result<Rectangle, ParseError> {
        let width = self.next_number(|| format!("{} width", name))?;
        let height = self.next_number(|| format!("{} height", name))?;
        Ok(Rectangle::new(width, height))
    }
}

pub fn parse_instance(input: &str) -> Result<Instance, ParseError> {
    let mut tokens = Tokens {
        inner: input.split_whitespace(),
    };
    let container = tokens.next_rectangle("container")?;
    let num_rectangles: usize = tokens.next_number(|| "number of rectangles".to_string())?;
    let mut instance = Instance::new(container);
    for index in 0..num_rectangles {
        instance.add_rectangle(tokens.next_rectangle(&format!("rectangle {}", index))?);
    }
    Ok(instance)
}

pub fn read_instance(mut reader: impl Read) -> Result<Instance, ParseError> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    parse_instance(&input)
}
