use crate::error::Error;
use crate::matrix::Matrix;
use math::poly::Poly;
use math::ring::RingContext;

/// Coordinates of one `l x d` tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockId {
    pub row_block: usize,
    pub col_block: usize,
}

/// Tiling of a `rows x cols` matrix into `l x d` tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGrid {
    pub row_blocks: usize,
    pub col_blocks: usize,
}

impl BlockGrid {
    pub fn new(rows: usize, cols: usize, l: usize, d: usize) -> Self {
        Self {
            row_blocks: rows.div_ceil(l),
            col_blocks: cols.div_ceil(d),
        }
    }

    /// Grid of the operand as it is packed: a vector is a single row of
    /// tiles, a transposed matrix is tiled along its columns.
    pub fn for_operand(matrix: &Matrix, ctx: &RingContext, transpose: bool) -> Self {
        if matrix.is_vector() {
            Self {
                row_blocks: 1,
                col_blocks: matrix.cols().div_ceil(ctx.d()),
            }
        } else if transpose {
            Self::new(matrix.cols(), matrix.rows(), ctx.l(), ctx.d())
        } else {
            Self::new(matrix.rows(), matrix.cols(), ctx.l(), ctx.d())
        }
    }

    pub fn len(&self) -> usize {
        self.row_blocks * self.col_blocks
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Blocks in row-major order.
    pub fn blocks(&self) -> impl Iterator<Item = BlockId> + '_ {
        (0..self.row_blocks).flat_map(move |row_block| {
            (0..self.col_blocks).map(move |col_block| BlockId {
                row_block,
                col_block,
            })
        })
    }
}

/// Returns the `l` slot polynomials (each of length `d`) of one tile.
///
/// - matrix: slot `s`, coefficient `j` is `M[row_block * l + s][col_block * d + j]`;
/// - transposed matrix: the same on the transpose of `M`;
/// - vector (one row): every slot holds `M[0][col_block * d + j]`.
///
/// Entries outside the matrix are zero.
pub fn partition(matrix: &Matrix, block: BlockId, ctx: &RingContext, transpose: bool) -> Vec<Poly<u64>> {
    let (l, d) = (ctx.l(), ctx.d());
    let col_offset: usize = block.col_block * d;

    if matrix.is_vector() {
        let chunk: Poly<u64> = Poly((0..d).map(|j| matrix.at(0, col_offset + j)).collect());
        return vec![chunk; l];
    }

    let row_offset: usize = block.row_block * l;
    (0..l)
        .map(|s| {
            Poly(
                (0..d)
                    .map(|j| {
                        let (i, k) = (row_offset + s, col_offset + j);
                        if transpose { matrix.at(k, i) } else { matrix.at(i, k) }
                    })
                    .collect(),
            )
        })
        .collect()
}

/// Writes the `l` scalars extracted from one result ciphertext.
///
/// - matrix output: `out[row_block * l + s][col]`;
/// - vector output (one row): `out[0][row_block * l + s]`.
///
/// Writing stops at the matrix boundary; remaining scalars are dropped.
/// Returns the number of entries written.
pub fn fill_result(
    out: &mut Matrix,
    row_block: usize,
    col: usize,
    scalars: &[u64],
    l: usize,
) -> Result<usize, Error> {
    if scalars.len() != l {
        return Err(Error::SlotCountMismatch {
            expected: l,
            got: scalars.len(),
        });
    }

    let offset: usize = row_block * l;
    let written: usize = if out.is_vector() {
        scalars
            .iter()
            .enumerate()
            .take_while(|(s, v)| out.set(0, offset + s, **v))
            .count()
    } else {
        scalars
            .iter()
            .enumerate()
            .take_while(|(s, v)| out.set(offset + s, col, **v))
            .count()
    };

    Ok(written)
}

/// Position of result ciphertext `idx` in the server's emission order:
/// `(row_block, col) = (idx / num_cols, idx % num_cols)`.
pub fn result_position(idx: usize, num_cols: usize) -> (usize, usize) {
    (idx / num_cols, idx % num_cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_small() -> RingContext {
        RingContext::new(5, 17).unwrap()
    }

    fn counting_matrix(rows: usize, cols: usize) -> Matrix {
        Matrix::from_rows(
            (0..rows)
                .map(|i| (0..cols).map(|j| (i * cols + j + 1) as u64).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn tiling_10x10() {
        let ctx: RingContext = ctx_small();
        let m: Matrix = counting_matrix(10, 10);
        let grid: BlockGrid = BlockGrid::for_operand(&m, &ctx, false);
        assert_eq!(grid, BlockGrid { row_blocks: 2, col_blocks: 3 });
        assert_eq!(grid.blocks().count(), 6);

        let block: Vec<Poly<u64>> = partition(&m, BlockId { row_block: 1, col_block: 2 }, &ctx, false);
        assert_eq!(block.len(), 8);
        // rows 8, 9 and columns 8, 9 exist; everything else is padding
        assert_eq!(block[0], Poly(vec![89, 90, 0, 0]));
        assert_eq!(block[1], Poly(vec![99, 100, 0, 0]));
        (2..8).for_each(|s| assert_eq!(block[s], Poly(vec![0; 4])));

        let block: Vec<Poly<u64>> = partition(&m, BlockId { row_block: 0, col_block: 0 }, &ctx, false);
        assert_eq!(block[7], Poly(vec![71, 72, 73, 74]));
    }

    #[test]
    fn transposed_partition() {
        let ctx: RingContext = ctx_small();
        let m: Matrix = counting_matrix(6, 3);
        let grid: BlockGrid = BlockGrid::for_operand(&m, &ctx, true);
        assert_eq!(grid, BlockGrid { row_blocks: 1, col_blocks: 2 });
        let block: Vec<Poly<u64>> = partition(&m, BlockId { row_block: 0, col_block: 1 }, &ctx, true);
        // slot s reads column s, coefficients read rows 4..8
        assert_eq!(block[0], Poly(vec![13, 16, 0, 0]));
        assert_eq!(block[2], Poly(vec![15, 18, 0, 0]));
        assert_eq!(block[3], Poly(vec![0; 4]));
    }

    #[test]
    fn vector_partition_broadcasts() {
        let ctx: RingContext = ctx_small();
        let v: Matrix = counting_matrix(1, 6);
        assert_eq!(BlockGrid::for_operand(&v, &ctx, false).len(), 2);
        let block: Vec<Poly<u64>> = partition(&v, BlockId { row_block: 0, col_block: 1 }, &ctx, false);
        block.iter().for_each(|s| assert_eq!(*s, Poly(vec![5, 6, 0, 0])));
    }

    #[test]
    fn fill_result_truncates_at_boundary() {
        let mut out: Matrix = Matrix::zero(5, 1);
        let scalars: Vec<u64> = (1..=8).collect();
        assert_eq!(fill_result(&mut out, 0, 0, &scalars, 8), Ok(5));
        assert_eq!(out, Matrix::from_rows((1..=5).map(|v| vec![v]).collect()).unwrap());

        let mut out: Matrix = Matrix::zero(1, 10);
        assert_eq!(fill_result(&mut out, 1, 0, &scalars, 8), Ok(2));
        assert_eq!(out.row(0), &[0, 0, 0, 0, 0, 0, 0, 0, 1, 2]);

        assert_eq!(
            fill_result(&mut out, 0, 0, &scalars[..3], 8),
            Err(Error::SlotCountMismatch { expected: 8, got: 3 })
        );
    }

    #[test]
    fn result_positions_are_row_major() {
        assert_eq!(result_position(0, 3), (0, 0));
        assert_eq!(result_position(4, 3), (1, 1));
        assert_eq!(result_position(8, 3), (2, 2));
    }
}
