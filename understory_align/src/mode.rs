// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alignment modes and the placements reported back to callers.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// How a box is positioned relative to a reference box on a single axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Flush with the reference's start edge.
    Start,
    /// Far edge flush with the reference's far edge.
    End,
    /// Centered on the reference.
    Center,
    /// Immediately before the reference, outside it.
    StartOutside,
    /// Immediately after the reference, outside it.
    EndOutside,
}

impl Align {
    /// All modes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Start,
        Self::End,
        Self::Center,
        Self::StartOutside,
        Self::EndOutside,
    ];

    /// The geometrically opposite mode used when flipping, if there is one.
    ///
    /// [`Align::Center`] has no opposite.
    pub const fn opposite(self) -> Option<Self> {
        match self {
            Self::Start => Some(Self::End),
            Self::End => Some(Self::Start),
            Self::StartOutside => Some(Self::EndOutside),
            Self::EndOutside => Some(Self::StartOutside),
            Self::Center => None,
        }
    }

    /// Offset of the target origin from the reference origin.
    ///
    /// ```
    /// use understory_align::Align;
    ///
    /// assert_eq!(Align::Center.offset(10.0, 30.0), -10.0);
    /// assert_eq!(Align::EndOutside.offset(10.0, 30.0), 10.0);
    /// ```
    pub fn offset(self, ref_len: f64, target_len: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => -(target_len - ref_len) / 2.0,
            Self::End => ref_len - target_len,
            Self::StartOutside => -target_len,
            Self::EndOutside => ref_len,
        }
    }

    /// The textual name of this mode, as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Center => "center",
            Self::StartOutside => "start-outside",
            Self::EndOutside => "end-outside",
        }
    }
}

impl fmt::Display for Align {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized alignment mode.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid alignment mode: \"{mode}\"")]
pub struct ParseAlignError {
    /// The rejected input.
    pub mode: String,
}

impl FromStr for Align {
    type Err = ParseAlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseAlignError {
                mode: s.to_string(),
            })
    }
}

/// The placement actually used on an axis after fallbacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// See [`Align::Start`].
    Start,
    /// See [`Align::End`].
    End,
    /// See [`Align::Center`].
    Center,
    /// See [`Align::StartOutside`].
    StartOutside,
    /// See [`Align::EndOutside`].
    EndOutside,
    /// Neither the requested nor the flipped mode fit; the far edge was clamped to the viewport.
    Contain,
}

impl Placement {
    /// The alignment mode this placement corresponds to, or `None` for [`Placement::Contain`].
    pub const fn align(self) -> Option<Align> {
        match self {
            Self::Start => Some(Align::Start),
            Self::End => Some(Align::End),
            Self::Center => Some(Align::Center),
            Self::StartOutside => Some(Align::StartOutside),
            Self::EndOutside => Some(Align::EndOutside),
            Self::Contain => None,
        }
    }
}

impl From<Align> for Placement {
    fn from(mode: Align) -> Self {
        match mode {
            Align::Start => Self::Start,
            Align::End => Self::End,
            Align::Center => Self::Center,
            Align::StartOutside => Self::StartOutside,
            Align::EndOutside => Self::EndOutside,
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.align() {
            Some(mode) => f.write_str(mode.as_str()),
            None => f.write_str("contain"),
        }
    }
}
