use std::fmt::{self, Display};

use itertools::Itertools;

use super::index::carry_over;
use super::narray::NdArray;

/// A pretty display representation of an array.
/// 1. Pads elements within each matrix so that columns are aligned
/// 2. Partitions on the matrix level, higher order structures are labeled by index
///
/// *eg*. a rank 3 array of extents [2, 2, 2] is printed as
/// ```text
/// (0)
/// [x, x]
/// [x, x]
///
/// (1)
/// [x, x]
/// [x, x]
/// ```
/// while higher ranks are labeled by `(a, b, ...)`, the number of dimensions minus 2.
/// Vectors and matrices are not labeled, an unsized array prints as `[]`.
impl<T: Display, const N: usize> Display for NdArray<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        let extents = self.extents();
        let cols = extents[N - 1];
        let rows = if N > 1 { extents[N.saturating_sub(2)] } else { 1 };

        let mut label = vec![0usize; N.saturating_sub(2)];
        for (k, block) in self.as_slice().chunks(rows * cols).enumerate() {
            if k > 0 {
                write!(f, "\n\n")?;
            }
            if !label.is_empty() {
                writeln!(f, "({})", label.iter().join(", "))?;
                let outer = label.len();
                carry_over(&mut label, &extents[..outer]);
            }
            let cells = format_pad_elem(block);
            let matrix = cells.chunks(cols).map(|row| format!("[{}]", row.iter().join(", "))).join("\n");
            write!(f, "{}", matrix)?;
        }
        Ok(())
    }
}

/// Pads each element so that every string representation has the same length
fn format_pad_elem<T: Display>(arr: &[T]) -> Vec<String> {
    let strs = arr.iter().map(|x| x.to_string()).collect::<Vec<String>>();
    let width = strs.iter().map(|s| s.chars().count()).max().unwrap_or(0);
    strs.into_iter().map(|s| format!("{:>width$}", s, width = width)).collect()
}
