use crate::permutation::{Permutation, RankMap};

/// One inequality `coefficients · vars <= rhs` over the 2n-wide variable
/// space (x block at columns 0..n, y block at n..2n).
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub coefficients: Vec<f64>,
    pub rhs: f64,
}

impl Row {
    fn zero(width: usize, rhs: f64) -> Self {
        Self {
            coefficients: vec![0.0; width],
            rhs,
        }
    }

    /// Number of non-zero coefficients.
    pub fn support(&self) -> usize {
        self.coefficients.iter().filter(|&&c| c != 0.0).count()
    }
}

/// Append-only accumulator for inequality rows.
///
/// Row order is part of the encoder's observable contract: downstream
/// violation reports reference rows by index, so the assembly step owns
/// one of these and appends generator output in a fixed order.
#[derive(Debug, Clone)]
pub struct InequalitySystem {
    width: usize,
    matrix: Vec<Vec<f64>>,
    rhs: Vec<f64>,
}

impl InequalitySystem {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            matrix: Vec::new(),
            rhs: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(row.coefficients.len(), self.width);
        self.matrix.push(row.coefficients);
        self.rhs.push(row.rhs);
    }

    pub fn extend(&mut self, rows: Vec<Row>) {
        for row in rows {
            self.push(row);
        }
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn into_parts(self) -> (Vec<Vec<f64>>, Vec<f64>) {
        (self.matrix, self.rhs)
    }
}

/// Column of `x_value` in the 2n-wide space.
fn x_column(value: usize) -> usize {
    value - 1
}

/// Column of `y_value` in the 2n-wide space.
fn y_column(n: usize, value: usize) -> usize {
    n + value - 1
}

/// Order constraints: the first element of each permutation is anchored at
/// 1, then each consecutive pair is ordered.
///
/// Row order: x anchor, y anchor, P1 chain, P2 chain; `2 + 2(n-1)` rows.
pub fn monotonicity_rows(p1: &Permutation, p2: &Permutation) -> Vec<Row> {
    let n = p1.len();
    let width = 2 * n;
    let mut rows = Vec::with_capacity(2 * n);

    // -x_{P1[0]} <= -1 and -y_{P2[0]} <= -1.
    let mut anchor = Row::zero(width, -1.0);
    anchor.coefficients[x_column(p1.first())] = -1.0;
    rows.push(anchor);

    let mut anchor = Row::zero(width, -1.0);
    anchor.coefficients[y_column(n, p2.first())] = -1.0;
    rows.push(anchor);

    // x_{P1[i]} - x_{P1[i+1]} <= 0 along the listed order.
    for pair in p1.values().windows(2) {
        let mut row = Row::zero(width, 0.0);
        row.coefficients[x_column(pair[0])] = 1.0;
        row.coefficients[x_column(pair[1])] = -1.0;
        rows.push(row);
    }
    for pair in p2.values().windows(2) {
        let mut row = Row::zero(width, 0.0);
        row.coefficients[y_column(n, pair[0])] = 1.0;
        row.coefficients[y_column(n, pair[1])] = -1.0;
        rows.push(row);
    }

    rows
}

/// The spacing rule for one interior element: when its rank in the other
/// permutation is a strict local extremum of the rank triple, its two
/// neighbors must sit at least a unit apart. Ties are not extrema.
fn extremum_row(
    width: usize,
    ranks: (usize, usize, usize),
    neighbor_columns: (usize, usize),
) -> Option<Row> {
    let (a, b, c) = (ranks.0 as i64, ranks.1 as i64, ranks.2 as i64);
    if (a - b) * (c - b) <= 0 {
        return None;
    }
    let mut row = Row::zero(width, -1.0);
    row.coefficients[neighbor_columns.0] = 1.0;
    row.coefficients[neighbor_columns.1] = -1.0;
    Some(row)
}

/// Unit-gap constraints at local extrema: P1 interior elements ranked via
/// Q2 emit x rows, then P2 interior elements ranked via Q1 emit y rows.
/// Up to `2(n-2)` rows.
pub fn spacing_rows(
    p1: &Permutation,
    p2: &Permutation,
    q1: &RankMap,
    q2: &RankMap,
) -> Vec<Row> {
    let n = p1.len();
    let width = 2 * n;
    let mut rows = Vec::new();

    let order = p1.values();
    for i in 1..n - 1 {
        let ranks = (
            q2.rank(order[i - 1]),
            q2.rank(order[i]),
            q2.rank(order[i + 1]),
        );
        let columns = (x_column(order[i - 1]), x_column(order[i + 1]));
        if let Some(row) = extremum_row(width, ranks, columns) {
            rows.push(row);
        }
    }

    let order = p2.values();
    for i in 1..n - 1 {
        let ranks = (
            q1.rank(order[i - 1]),
            q1.rank(order[i]),
            q1.rank(order[i + 1]),
        );
        let columns = (y_column(n, order[i - 1]), y_column(n, order[i + 1]));
        if let Some(row) = extremum_row(width, ranks, columns) {
            rows.push(row);
        }
    }

    rows
}

/// One cross-linked row: the primary pair always advances by a unit
/// (`+v -u`, rhs -1), and the companion pair points the same way when
/// `companion_forward`, the opposite way otherwise.
fn linked_row(
    width: usize,
    primary: (usize, usize),
    companion: (usize, usize),
    companion_forward: bool,
) -> Row {
    let mut row = Row::zero(width, -1.0);
    row.coefficients[primary.0] = 1.0;
    row.coefficients[primary.1] = -1.0;
    if companion_forward {
        row.coefficients[companion.0] = 1.0;
        row.coefficients[companion.1] = -1.0;
    } else {
        row.coefficients[companion.1] = 1.0;
        row.coefficients[companion.0] = -1.0;
    }
    row
}

/// Cross-linked constraints for adjacent pairs: each P1-adjacent pair
/// (v, u) forces `x_v <= x_u - 1` and couples the y pair in the direction
/// given by their Q2 ranks; P2-adjacent pairs do the symmetric thing with
/// Q1. Exactly `2(n-1)` rows of 4 non-zeros each.
pub fn combined_rows(
    p1: &Permutation,
    p2: &Permutation,
    q1: &RankMap,
    q2: &RankMap,
) -> Vec<Row> {
    let n = p1.len();
    let width = 2 * n;
    let mut rows = Vec::with_capacity(2 * (n - 1));

    for pair in p1.values().windows(2) {
        let (v, u) = (pair[0], pair[1]);
        rows.push(linked_row(
            width,
            (x_column(v), x_column(u)),
            (y_column(n, v), y_column(n, u)),
            q2.rank(v) < q2.rank(u),
        ));
    }
    for pair in p2.values().windows(2) {
        let (v, u) = (pair[0], pair[1]);
        rows.push(linked_row(
            width,
            (y_column(n, v), y_column(n, u)),
            (x_column(v), x_column(u)),
            q1.rank(v) < q1.rank(u),
        ));
    }

    rows
}
