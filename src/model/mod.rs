use std::fmt;

use grid_labs_common::{BoardCell, GameDict, Nested};

use crate::{
    config::Limits,
    data::{Field, Shape},
    error::{Error, Result},
    logic::mines::check_cells,
};

/// Splits a flat row-major buffer into nested arrays of the given shape.
pub(crate) fn nest<T: Clone>(dimensions: &[usize], flat: &[T]) -> Nested<T> {
    match dimensions.split_first() {
        None => Nested::Leaf(flat[0].clone()),
        Some((&size, rest)) => {
            let chunk = flat.len() / size;
            Nested::Array(flat.chunks(chunk).map(|part| nest(rest, part)).collect())
        }
    }
}

/// Inverse of [`nest`], checking that every level has the expected length.
pub(crate) fn flatten<T: Clone>(
    dimensions: &[usize],
    nested: &Nested<T>,
    out: &mut Vec<T>,
) -> Result<()> {
    match (dimensions.split_first(), nested) {
        (None, Nested::Leaf(value)) => {
            out.push(value.clone());
            Ok(())
        }
        (None, Nested::Array(_)) => Err(Error::ShapeMismatch(
            "arrays nested deeper than the dimensions".to_string(),
        )),
        (Some(_), Nested::Leaf(_)) => Err(Error::ShapeMismatch(
            "arrays nested shallower than the dimensions".to_string(),
        )),
        (Some((&size, rest)), Nested::Array(items)) => {
            if items.len() != size {
                return Err(Error::ShapeMismatch(format!(
                    "expected {size} entries, found {}",
                    items.len()
                )));
            }
            items
                .iter()
                .try_for_each(|item| flatten(rest, item, out))
        }
    }
}

impl Field {
    /// Restores a game verbatim from its dictionary form. Only the shape of
    /// `board` and `mask` is checked; counts and state are trusted as given.
    pub fn from_dict(dict: &GameDict) -> Result<Self> {
        Self::from_dict_with_limits(dict, &Limits::from_env())
    }

    pub fn from_dict_with_limits(dict: &GameDict, limits: &Limits) -> Result<Self> {
        let shape = Shape::new(dict.dimensions.clone())?;
        check_cells(&shape, limits)?;

        for (name, depth) in [("board", dict.board.depth()), ("mask", dict.mask.depth())] {
            if depth != shape.rank() {
                return Err(Error::ShapeMismatch(format!(
                    "{name} is nested {depth} deep for {} dimensions",
                    shape.rank()
                )));
            }
        }

        let mut board = Vec::with_capacity(shape.len());
        flatten(shape.dimensions(), &dict.board, &mut board)?;
        let mut mask = Vec::with_capacity(shape.len());
        flatten(shape.dimensions(), &dict.mask, &mut mask)?;

        Ok(Self {
            shape,
            board,
            mask,
            state: dict.state,
        })
    }

    pub fn to_dict(&self) -> GameDict {
        GameDict {
            dimensions: self.shape.dimensions().to_vec(),
            board: nest(self.shape.dimensions(), &self.board),
            mask: nest(self.shape.dimensions(), &self.mask),
            state: self.state,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let dict: GameDict = serde_json::from_str(text)?;
        Self::from_dict(&dict)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_dict())?)
    }
}

impl From<&Field> for GameDict {
    fn from(value: &Field) -> Self {
        value.to_dict()
    }
}

impl TryFrom<&GameDict> for Field {
    type Error = Error;

    fn try_from(value: &GameDict) -> Result<Self> {
        Field::from_dict(value)
    }
}

struct Listing<'a, T>(&'a Nested<T>);

impl<T: fmt::Display> fmt::Display for Listing<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Nested::Leaf(value) => write!(f, "{value}"),
            Nested::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", Listing(item))?;
                }
                write!(f, "]")
            }
        }
    }
}

fn write_rows<T: fmt::Display>(f: &mut fmt::Formatter, nested: &Nested<T>) -> fmt::Result {
    let Nested::Array(rows) = nested else {
        return write!(f, "{}", Listing(nested));
    };
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            write!(f, "\n       ")?;
        }
        write!(f, "{}", Listing(row))?;
    }
    Ok(())
}

/// One line per attribute, the board and mask split along the first axis.
/// Mask entries print as Rust booleans (`true`/`false`).
impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let dict = self.to_dict();
        writeln!(f, "dimensions: {:?}", dict.dimensions)?;
        write!(f, "board: ")?;
        write_rows::<BoardCell>(f, &dict.board)?;
        write!(f, "\nmask:  ")?;
        write_rows(f, &dict.mask)?;
        write!(f, "\nstate: {}", dict.state)
    }
}
