//! Row-count rules for horizontal concatenation

use crate::error::{Error, Result};

/// How a single input's columns are brought to the output height
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fit {
    /// Already the output height
    Keep,
    /// Single row repeated to the output height
    Broadcast,
    /// Tail padded with this many nulls
    Pad(usize),
}

/// Output height plus the fit of every input, in input order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub height: usize,
    pub fits: Vec<Fit>,
}

/// Strict rule: every input height is either 1 or one common value.
///
/// Height-1 inputs broadcast to the common height. Any two inputs whose
/// heights differ and are both not 1 fail, however many inputs there are.
/// A `None` height marks an input without columns; it fits any height and
/// never sets one.
pub fn strict<H>(heights: &[H]) -> Result<Layout>
where
    H: Into<Option<usize>> + Copy,
{
    if heights.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut target = None;
    let mut single_row = false;
    for (input, height) in heights.iter().enumerate() {
        let height: Option<usize> = (*height).into();
        let Some(height) = height else {
            continue;
        };
        if height == 1 {
            single_row = true;
            continue;
        }
        match target {
            None => target = Some(height),
            Some(expected) if expected == height => {}
            Some(expected) => {
                return Err(Error::ShapeError {
                    input,
                    expected,
                    found: height,
                })
            }
        }
    }

    let height = target.unwrap_or(usize::from(single_row));
    let fits = heights
        .iter()
        .map(|&h| match Into::<Option<usize>>::into(h) {
            Some(h) if h != height => Fit::Broadcast,
            _ => Fit::Keep,
        })
        .collect();
    Ok(Layout { height, fits })
}

/// Relaxed rule: the output is as tall as the tallest input, shorter inputs
/// are padded with nulls. Single-row inputs are padded too, not repeated.
pub fn relaxed(heights: &[usize]) -> Result<Layout> {
    let height = heights.iter().copied().max().ok_or(Error::EmptyInput)?;
    let fits = heights
        .iter()
        .map(|&h| if h == height { Fit::Keep } else { Fit::Pad(height - h) })
        .collect();
    Ok(Layout { height, fits })
}
