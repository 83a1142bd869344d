//! Cursor over the frame sequence.

use serde::{Deserialize, Serialize};

/// Which frame is "current".
///
/// The index carried by `At` doubles as the 0-based frame number, so the
/// structural position and the ordinal cannot drift apart.
#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// No frame is referenced (the sequence is empty).
    #[default]
    Undefined,
    At(usize),
}

impl Cursor {
    /// The single normalization rule: an empty sequence, or an index left past
    /// the end by a removal, collapses to `Undefined`.
    #[inline]
    pub fn normalized(self, len: usize) -> Cursor {
        match self {
            Cursor::At(i) if i < len => Cursor::At(i),
            _ => Cursor::Undefined,
        }
    }

    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            Cursor::At(i) => Some(i),
            Cursor::Undefined => None,
        }
    }

    /// 0-based frame number; the undefined cursor reports 0.
    #[inline]
    pub fn frame_number(self) -> usize {
        self.index().unwrap_or(0)
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        matches!(self, Cursor::At(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_dangling_positions() {
        assert_eq!(Cursor::At(0).normalized(0), Cursor::Undefined);
        assert_eq!(Cursor::At(3).normalized(3), Cursor::Undefined);
        assert_eq!(Cursor::At(2).normalized(3), Cursor::At(2));
        assert_eq!(Cursor::Undefined.normalized(5), Cursor::Undefined);
    }

    #[test]
    fn undefined_reports_frame_zero() {
        assert_eq!(Cursor::Undefined.frame_number(), 0);
        assert_eq!(Cursor::At(4).frame_number(), 4);
        assert!(!Cursor::Undefined.is_defined());
    }
}
