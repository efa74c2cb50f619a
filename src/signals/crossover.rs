//! Threshold crossing rule shared by every voting indicator.

use crate::models::indicators::IndicatorSeries;

/// Right-hand side of a crossing test
#[derive(Debug, Clone, Copy)]
pub enum Line<'a> {
    Series(&'a IndicatorSeries),
    Closes(&'a [f64]),
    Level(f64),
}

impl<'a> Line<'a> {
    pub fn at(&self, index: usize) -> Option<f64> {
        match self {
            Line::Series(series) => series.get(index),
            Line::Closes(closes) => closes.get(index).copied(),
            Line::Level(level) => Some(*level),
        }
    }
}

impl<'a> From<&'a IndicatorSeries> for Line<'a> {
    fn from(series: &'a IndicatorSeries) -> Self {
        Line::Series(series)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Above,
    Below,
}

/// Values of both lines at `index - 1` and `index`, if all are defined
fn pair(a: Line<'_>, b: Line<'_>, index: usize) -> Option<((f64, f64), (f64, f64))> {
    if index == 0 {
        return None;
    }
    let prev = (a.at(index - 1)?, b.at(index - 1)?);
    let curr = (a.at(index)?, b.at(index)?);
    Some((prev, curr))
}

/// `a[i] > b[i]` and `a[i-1] <= b[i-1]`
pub fn crosses_above(a: Line<'_>, b: Line<'_>, index: usize) -> bool {
    matches!(pair(a, b, index), Some(((pa, pb), (ca, cb))) if ca > cb && pa <= pb)
}

/// `a[i] < b[i]` and `a[i-1] >= b[i-1]`
pub fn crosses_below(a: Line<'_>, b: Line<'_>, index: usize) -> bool {
    matches!(pair(a, b, index), Some(((pa, pb), (ca, cb))) if ca < cb && pa >= pb)
}

pub fn crossing(a: Line<'_>, b: Line<'_>, index: usize) -> Option<Crossing> {
    if crosses_above(a, b, index) {
        Some(Crossing::Above)
    } else if crosses_below(a, b, index) {
        Some(Crossing::Below)
    } else {
        None
    }
}
