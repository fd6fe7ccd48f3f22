//! Cursor arithmetic shared by the scheduler and the reconciler.
//!
//! Without wrap-around a cursor index lives in `[-1, n]`: `-1` is the closed
//! book showing its front cover and `n` the closed book showing its back
//! cover. With wrap-around it lives in `[0, n - 1]` and steps modulo `n`.

/// Euclidean modulus, so `modulo(-1, 5) == 4`.
///
/// `n` must be positive.
pub fn modulo(value: i64, n: i64) -> i64 {
    value.rem_euclid(n)
}

/// Move `index` by `delta`, wrapping or clamping per the wrap-around rule.
pub fn step_index(index: i64, delta: i64, len: usize, wrap_around: bool) -> i64 {
    let n = len as i64;
    if wrap_around && n > 0 {
        modulo(index + delta, n)
    } else {
        (index + delta).clamp(-1, n)
    }
}

/// Bring an arbitrary page number into the cursor domain.
pub fn normalize_index(index: i64, len: usize, wrap_around: bool) -> i64 {
    step_index(index, 0, len, wrap_around)
}

/// Cursor state owned by the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    /// Logical position, advanced optimistically when a turn starts.
    pub current: i64,
    /// Position shown on the side that is not turning; moves only when a
    /// turn settles.
    pub static_side: i64,
}

impl CursorState {
    pub fn at(index: i64) -> Self {
        Self {
            current: index,
            static_side: index,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.static_side
    }
}
