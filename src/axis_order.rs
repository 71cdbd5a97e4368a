//! Semantic axes and the closed registry of axis orders a variable's shape can be laid out in.
use serde::{Deserialize, Serialize};
use std::ops::Index;
use strum::IntoEnumIterator;

#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum Axis {
    /// Batch
    N,
    /// Channel
    C,
    /// Height
    H,
    /// Width
    W,
    /// Time step
    T,
}

/// Every axis order a variable can carry. Each variant spells out its axes, outermost first.
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum AxisOrder {
    C,
    NC,
    CN,
    NT,
    NTC,
    CHW,
    HWC,
    NHWC,
    HWNC,
    HWCN,
    NCHW,
    CNHW,
    CHWN,
}

impl AxisOrder {
    pub fn axes(&self) -> &'static [Axis] {
        use Axis::*;
        match self {
            AxisOrder::C => &[C],
            AxisOrder::NC => &[N, C],
            AxisOrder::CN => &[C, N],
            AxisOrder::NT => &[N, T],
            AxisOrder::NTC => &[N, T, C],
            AxisOrder::CHW => &[C, H, W],
            AxisOrder::HWC => &[H, W, C],
            AxisOrder::NHWC => &[N, H, W, C],
            AxisOrder::HWNC => &[H, W, N, C],
            AxisOrder::HWCN => &[H, W, C, N],
            AxisOrder::NCHW => &[N, C, H, W],
            AxisOrder::CNHW => &[C, N, H, W],
            AxisOrder::CHWN => &[C, H, W, N],
        }
    }

    pub fn ndim(&self) -> usize {
        self.axes().len()
    }

    pub fn contains(&self, axis: Axis) -> bool {
        self.axes().contains(&axis)
    }

    pub fn axis_index(&self, axis: Axis) -> Option<usize> {
        self.axes().iter().position(|a| *a == axis)
    }

    /// Looks up the registered order whose axes are exactly `axes`, in that order.
    pub fn from_axes(axes: &[Axis]) -> Option<AxisOrder> {
        AxisOrder::iter().find(|order| order.axes() == axes)
    }

    /// Pairs each axis with the matching entry of `shape`.
    ///
    /// `shape` must have one entry per axis; extra entries on either side are ignored.
    pub fn shape_dict(&self, shape: &[usize]) -> ShapeDict {
        debug_assert_eq!(shape.len(), self.ndim());
        ShapeDict {
            entries: self.axes().iter().copied().zip(shape.iter().copied()).collect(),
        }
    }
}

/// Axis name to size mapping of one shape, kept in the order of the axis order it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDict {
    entries: Vec<(Axis, usize)>,
}

impl ShapeDict {
    pub fn get(&self, axis: Axis) -> Option<usize> {
        self.entries
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, size)| *size)
    }

    pub fn contains(&self, axis: Axis) -> bool {
        self.get(axis).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Axis, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Index<Axis> for ShapeDict {
    type Output = usize;

    fn index(&self, axis: Axis) -> &usize {
        self.entries
            .iter()
            .find(|(a, _)| *a == axis)
            .map(|(_, size)| size)
            .unwrap_or_else(|| panic!("axis {axis} is not present in shape dict"))
    }
}
