//! Graph colorers. Each one reads a `ColoringInstance` and returns a `ColoringResult`.

use bit_set::BitSet;

/// degree-ordered sequential greedy
pub mod greedy;

/// Welsh-Powell (one independent color class per pass)
pub mod welsh_powell;

/// greedy DSATUR algorithm
pub mod dsatur_greedy;

/// population-based stochastic search
pub mod genetic;

/// smallest color absent from `forbidden`. Counts one step per rejected color.
pub(crate) fn first_available_color(forbidden:&BitSet, steps:&mut u64) -> usize {
    let mut color:usize = 0;
    while forbidden.contains(color) {
        color += 1;
        *steps += 1;
    }
    color
}
