use std::collections::HashSet;

use grid_labs_common::{BoardCell, FieldParams, GameState, Nested};
use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::{
    config::Limits,
    data::{Field, Shape},
    error::{Error, Result},
    model,
};

pub(crate) fn check_cells(shape: &Shape, limits: &Limits) -> Result<()> {
    if shape.len() > limits.max_cells {
        return Err(Error::TooLarge {
            cells: shape.len(),
            limit: limits.max_cells,
        });
    }
    Ok(())
}

fn generate_bombs<R: Rng + ?Sized>(length: usize, bombs: usize, rng: &mut R) -> Vec<bool> {
    let mut layout = Vec::with_capacity(length);

    let mut bombs_left = bombs.min(length);
    for cells_left in (1..=length).rev() {
        let value = rng.random_range(0..cells_left) < bombs_left;
        layout.push(value);
        if value {
            bombs_left -= 1;
        }
    }

    layout
}

fn count_adjacent_bombs(shape: &Shape, bombs: &[bool], index: usize) -> u32 {
    shape
        .neighbors(index)
        .into_iter()
        .filter(|&neighbor| neighbor != index && bombs[neighbor])
        .count() as u32
}

impl Field {
    /// New game with bombs at the given coordinates, limits taken from the
    /// environment.
    pub fn new<I, C>(dimensions: Vec<usize>, bombs: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[usize]>,
    {
        Self::with_limits(dimensions, bombs, &Limits::from_env())
    }

    pub fn with_limits<I, C>(dimensions: Vec<usize>, bombs: I, limits: &Limits) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: AsRef<[usize]>,
    {
        let shape = Shape::new(dimensions)?;
        check_cells(&shape, limits)?;

        let mut layout = vec![false; shape.len()];
        for bomb in bombs {
            layout[shape.checked_index(bomb.as_ref())?] = true;
        }

        Ok(Self::from_layout(shape, &layout))
    }

    /// New game with `params.bombs` bombs placed uniformly at random. The
    /// bomb count is capped at the number of cells.
    pub fn random<R: Rng + ?Sized>(params: &FieldParams, rng: &mut R) -> Result<Self> {
        let shape = Shape::new(params.dimensions.clone())?;
        check_cells(&shape, &Limits::from_env())?;

        let layout = generate_bombs(shape.len(), params.bombs, rng);
        Ok(Self::from_layout(shape, &layout))
    }

    fn from_layout(shape: Shape, layout: &[bool]) -> Self {
        let board = (0..shape.len())
            .map(|index| {
                if layout[index] {
                    BoardCell::Bomb
                } else {
                    BoardCell::Count(count_adjacent_bombs(&shape, layout, index))
                }
            })
            .collect();

        Self {
            mask: vec![false; shape.len()],
            shape,
            board,
            state: GameState::Ongoing,
        }
    }

    pub fn dimensions(&self) -> &[usize] {
        self.shape.dimensions()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn cell(&self, coord: &[usize]) -> Result<BoardCell> {
        Ok(self.board[self.shape.checked_index(coord)?])
    }

    pub fn is_visible(&self, coord: &[usize]) -> Result<bool> {
        Ok(self.mask[self.shape.checked_index(coord)?])
    }

    pub fn bomb_count(&self) -> usize {
        self.board.iter().filter(|cell| cell.is_bomb()).count()
    }

    pub fn hidden_count(&self) -> usize {
        self.mask.iter().filter(|&&visible| !visible).count()
    }

    /// Every safe cell visible and every bomb hidden.
    pub fn has_won(&self) -> bool {
        self.board
            .iter()
            .zip(&self.mask)
            .all(|(cell, &visible)| cell.is_bomb() != visible)
    }

    /// Digs at `coord` and returns how many cells became visible.
    ///
    /// Finished games and already visible cells are left untouched and
    /// report 0. Digging a bomb loses the game. Digging a zero cell reveals
    /// its whole zero region together with the numbered cells bordering it.
    #[instrument(level = "debug", skip(self), fields(state = %self.state))]
    pub fn dig(&mut self, coord: &[usize]) -> Result<usize> {
        if self.state.is_terminal() {
            return Ok(0);
        }

        let index = self.shape.checked_index(coord)?;
        if self.mask[index] {
            return Ok(0);
        }

        if self.board[index].is_bomb() {
            self.mask[index] = true;
            self.state = GameState::Defeat;
            debug!("Bomb uncovered, game lost");
            return Ok(1);
        }

        let revealed = self.reveal_from(index);
        if self.has_won() {
            self.state = GameState::Victory;
            debug!("All safe cells revealed, game won");
        }

        debug!("Revealed {} cells", revealed);
        Ok(revealed)
    }

    fn reveal_from(&mut self, start: usize) -> usize {
        let mut visited = HashSet::from([start]);
        let mut pending = vec![start];
        let mut revealed = 0;

        while let Some(index) = pending.pop() {
            self.mask[index] = true;
            revealed += 1;

            if self.board[index] != BoardCell::Count(0) {
                continue;
            }

            for neighbor in self.shape.neighbors(index) {
                if self.mask[neighbor] || self.board[neighbor].is_bomb() {
                    continue;
                }
                if visited.insert(neighbor) {
                    pending.push(neighbor);
                }
            }
        }

        trace!(visited = visited.len(), "Flood fill finished");
        revealed
    }

    /// Symbols for every cell in board shape: `"."` bomb, `" "` zero, the
    /// count otherwise. Hidden cells show `"_"` unless `xray` is set.
    pub fn render(&self, xray: bool) -> Nested<String> {
        model::nest(self.shape.dimensions(), &self.symbols(xray))
    }

    /// Rows of a 2-dimensional game joined by newlines.
    pub fn render_ascii(&self, xray: bool) -> Result<String> {
        if self.shape.rank() != 2 {
            return Err(Error::NotTwoDimensional(self.shape.rank()));
        }

        let columns = self.shape.dimensions()[1];
        let rows: Vec<String> = self
            .symbols(xray)
            .chunks(columns)
            .map(|row| row.concat())
            .collect();
        Ok(rows.join("\n"))
    }

    fn symbols(&self, xray: bool) -> Vec<String> {
        self.board
            .iter()
            .zip(&self.mask)
            .map(|(cell, &visible)| {
                if xray || visible {
                    cell.symbol()
                } else {
                    "_".to_string()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn lab_field() -> Field {
        Field::new(vec![2, 4], [[0usize, 0], [1, 0], [1, 1]]).unwrap()
    }

    #[test]
    fn counts_adjacent_bombs() {
        let field = lab_field();
        assert_eq!(field.cell(&[0, 1]).unwrap(), BoardCell::Count(3));
        assert_eq!(field.cell(&[0, 2]).unwrap(), BoardCell::Count(1));
        assert_eq!(field.cell(&[1, 3]).unwrap(), BoardCell::Count(0));
        assert_eq!(field.cell(&[1, 1]).unwrap(), BoardCell::Bomb);
        assert_eq!(field.bomb_count(), 3);
        assert_eq!(field.hidden_count(), 8);
        assert_eq!(field.state(), GameState::Ongoing);
    }

    #[test]
    fn three_dimensional_counts() {
        let field = Field::new(vec![2, 4, 2], [[0usize, 0, 1], [1, 0, 0], [1, 1, 1]]).unwrap();
        assert_eq!(field.render(true), model::nest(&[2, 4, 2], &[
            "3", ".", "3", "3", "1", "1", " ", " ",
            ".", "3", "3", ".", "1", "1", " ", " ",
        ].map(String::from)));
    }

    #[test]
    fn out_of_range_bomb_is_rejected() {
        let result = Field::new(vec![2, 2], [[0usize, 2]]);
        assert!(matches!(result, Err(Error::InvalidCoordinate { .. })));
        let result = Field::new(vec![2, 2], [vec![0usize]]);
        assert!(matches!(result, Err(Error::InvalidCoordinate { .. })));
    }

    #[test]
    fn limits_are_enforced() {
        let limits = Limits {
            max_cells: 8,
            ..Limits::default()
        };
        let result = Field::with_limits(vec![3, 3], Vec::<Vec<usize>>::new(), &limits);
        assert!(matches!(result, Err(Error::TooLarge { cells: 9, limit: 8 })));
    }

    #[test]
    fn dig_bomb_loses() {
        let mut field = lab_field();
        assert_eq!(field.dig(&[0, 0]).unwrap(), 1);
        assert_eq!(field.state(), GameState::Defeat);
        assert!(field.is_visible(&[0, 0]).unwrap());
        assert_eq!(field.dig(&[0, 3]).unwrap(), 0);
        assert!(!field.is_visible(&[0, 3]).unwrap());
    }

    #[test]
    fn dig_numbered_cell_reveals_only_it() {
        let mut field = lab_field();
        assert_eq!(field.dig(&[0, 2]).unwrap(), 1);
        assert_eq!(field.dig(&[0, 2]).unwrap(), 0);
        assert_eq!(field.state(), GameState::Ongoing);
    }

    #[test]
    fn dig_wins_when_all_safe_cells_are_visible() {
        let mut field = lab_field();
        assert_eq!(field.dig(&[0, 3]).unwrap(), 4);
        assert_eq!(field.state(), GameState::Ongoing);
        assert_eq!(field.dig(&[0, 1]).unwrap(), 1);
        assert_eq!(field.state(), GameState::Victory);
        assert!(field.has_won());
    }

    #[test]
    fn dig_rejects_bad_coordinate_while_ongoing() {
        let mut field = lab_field();
        assert!(matches!(
            field.dig(&[2, 0]),
            Err(Error::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn render_masks_hidden_cells() {
        let mut field = lab_field();
        field.dig(&[0, 3]).unwrap();
        assert_eq!(field.render_ascii(false).unwrap(), "__1 \n__1 ");
        assert_eq!(field.render_ascii(true).unwrap(), ".31 \n..1 ");
    }

    #[test]
    fn render_ascii_needs_two_dimensions() {
        let field = Field::new(vec![2, 2, 2], Vec::<Vec<usize>>::new()).unwrap();
        assert!(matches!(
            field.render_ascii(false),
            Err(Error::NotTwoDimensional(3))
        ));
    }

    #[test]
    fn empty_board_is_cleared_in_one_dig() {
        let mut field = Field::new(vec![3, 3, 3], Vec::<Vec<usize>>::new()).unwrap();
        assert_eq!(field.dig(&[1, 1, 1]).unwrap(), 27);
        assert_eq!(field.state(), GameState::Victory);
    }

    #[test]
    fn random_board_places_requested_bombs() {
        let mut rng = StdRng::seed_from_u64(7);
        let params = FieldParams {
            dimensions: vec![4, 5, 3],
            bombs: 12,
        };
        let field = Field::random(&params, &mut rng).unwrap();
        assert_eq!(field.bomb_count(), 12);

        let crowded = FieldParams {
            dimensions: vec![2, 2],
            bombs: 10,
        };
        let field = Field::random(&crowded, &mut rng).unwrap();
        assert_eq!(field.bomb_count(), 4);
    }

    #[test]
    fn long_corridor_does_not_overflow_the_stack() {
        let mut field = Field::new(vec![1, 200_000], [[0usize, 199_999]]).unwrap();
        assert_eq!(field.dig(&[0, 0]).unwrap(), 199_999);
        assert_eq!(field.state(), GameState::Victory);
    }
}
