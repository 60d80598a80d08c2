//! General-purpose utility functions

/// Given an index into a row-major cell buffer and the width of a row, returns the row and column.
pub fn get_coords(index: usize, cols: usize) -> (usize, usize) {
    debug_assert!(cols > 0);
    let col = index % cols;
    let row = (index - col) / cols;
    (row, col)
}

/// Given a row and column and the width of a row, returns the index of that coordinate in a row-major buffer.
pub fn get_index(row: usize, col: usize, cols: usize) -> usize {
    debug_assert!(col < cols);
    row * cols + col
}

/// Wraps `x` into `[0, n)`, re-entering from the opposite side for negative values.
pub fn wrap(x: isize, n: usize) -> usize {
    debug_assert!(n > 0);
    let n = n as isize;
    (((x % n) + n) % n) as usize
}

/// Reflects `x` back into `[0, n)` across the nearest boundary without repeating the boundary cell, so `-1` maps to
/// `1` and `n` maps to `n - 2`.  Coordinates more than a full width out keep bouncing between the two edges.  A
/// single-cell axis maps everything onto `0`.
pub fn mirror(x: isize, n: usize) -> usize {
    debug_assert!(n > 0);
    if n == 1 {
        return 0;
    }

    let period = 2 * (n - 1);
    let folded = wrap(x, period);
    if folded < n {
        folded
    } else {
        period - folded
    }
}

/// Returns the smallest `n` such that `n * n == len`, if there is one.
pub fn exact_sqrt(len: usize) -> Option<usize> {
    let guess = (len as f64).sqrt().round() as usize;
    // float rounding can be off by one for large inputs
    (guess.saturating_sub(1)..=guess + 1).find(|&n| n * n == len)
}

#[test]
fn coords_index_agree() {
    let cols = 7;
    for index in 0..(cols * 5) {
        let (row, col) = get_coords(index, cols);
        assert_eq!(get_index(row, col, cols), index);
    }
    assert_eq!(get_coords(15, 7), (2, 1));
}

#[test]
fn wrapping() {
    assert_eq!(wrap(-1, 5), 4);
    assert_eq!(wrap(5, 5), 0);
    assert_eq!(wrap(-11, 5), 4);
    assert_eq!(wrap(3, 5), 3);
}

#[test]
fn mirroring() {
    assert_eq!(mirror(-1, 4), 1);
    assert_eq!(mirror(-2, 4), 2);
    assert_eq!(mirror(4, 4), 2);
    assert_eq!(mirror(5, 4), 1);
    assert_eq!(mirror(6, 4), 0);
    assert_eq!(mirror(2, 4), 2);
    assert_eq!(mirror(-1, 2), 1);
    assert_eq!(mirror(2, 2), 0);
    assert_eq!(mirror(-3, 1), 0);
    // one step past an edge never lands back on the edge cell
    for n in 2..6 {
        assert_ne!(mirror(-1, n), 0);
        assert_ne!(mirror(n as isize, n), n - 1);
    }
}

#[test]
fn perfect_squares() {
    assert_eq!(exact_sqrt(0), Some(0));
    assert_eq!(exact_sqrt(1), Some(1));
    assert_eq!(exact_sqrt(9), Some(3));
    assert_eq!(exact_sqrt(10), None);
    assert_eq!(exact_sqrt(1_000_000), Some(1000));
}
