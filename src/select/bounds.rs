///
/// A rectangular region of the canvas with inclusive bounds: a selection of the single
/// pixel at (3, 4) has left == right == 3 and top == bottom == 4
///
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectionBounds {
    pub left:   i32,
    pub top:    i32,
    pub right:  i32,
    pub bottom: i32,
}

impl SelectionBounds {
    ///
    /// The normalized rectangle spanning two corner points, in any order
    ///
    pub fn from_corners(a: (i32, i32), b: (i32, i32)) -> SelectionBounds {
        SelectionBounds {
            left:   a.0.min(b.0),
            top:    a.1.min(b.1),
            right:  a.0.max(b.0),
            bottom: a.1.max(b.1),
        }
    }

    #[inline] pub fn width(&self) -> i32    { self.right - self.left + 1 }
    #[inline] pub fn height(&self) -> i32   { self.bottom - self.top + 1 }

    ///
    /// True if a point lies within these bounds
    ///
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    ///
    /// These bounds shifted by an offset
    ///
    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> SelectionBounds {
        SelectionBounds {
            left:   self.left + dx,
            top:    self.top + dy,
            right:  self.right + dx,
            bottom: self.bottom + dy,
        }
    }
}

///
/// The corner being dragged during a scaling gesture
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScaleHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ScaleHandle {
    ///
    /// The corner of a rectangle that stays put while this handle is dragged
    ///
    pub (crate) fn fixed_corner(&self, bounds: &SelectionBounds) -> (i32, i32) {
        match self {
            ScaleHandle::TopLeft        => (bounds.right, bounds.bottom),
            ScaleHandle::TopRight       => (bounds.left, bounds.bottom),
            ScaleHandle::BottomLeft     => (bounds.right, bounds.top),
            ScaleHandle::BottomRight    => (bounds.left, bounds.top),
        }
    }

    ///
    /// The rectangle size requested by dragging this handle to a pointer position,
    /// measured inclusively from the fixed corner
    ///
    /// Either dimension comes back zero or negative when the pointer has crossed to the
    /// wrong side of the fixed corner.
    ///
    pub (crate) fn requested_size(&self, bounds: &SelectionBounds, x: i32, y: i32) -> (i32, i32) {
        let (fixed_x, fixed_y) = self.fixed_corner(bounds);

        let width = match self {
            ScaleHandle::TopRight | ScaleHandle::BottomRight    => x - fixed_x + 1,
            ScaleHandle::TopLeft | ScaleHandle::BottomLeft      => fixed_x - x + 1,
        };
        let height = match self {
            ScaleHandle::BottomLeft | ScaleHandle::BottomRight  => y - fixed_y + 1,
            ScaleHandle::TopLeft | ScaleHandle::TopRight        => fixed_y - y + 1,
        };

        (width, height)
    }

    ///
    /// A rectangle of the given size anchored at this handle's fixed corner, growing
    /// towards the handle
    ///
    pub (crate) fn anchored(&self, bounds: &SelectionBounds, width: i32, height: i32) -> SelectionBounds {
        let (fixed_x, fixed_y) = self.fixed_corner(bounds);

        let (left, right) = match self {
            ScaleHandle::TopRight | ScaleHandle::BottomRight    => (fixed_x, fixed_x + width - 1),
            ScaleHandle::TopLeft | ScaleHandle::BottomLeft      => (fixed_x - width + 1, fixed_x),
        };
        let (top, bottom) = match self {
            ScaleHandle::BottomLeft | ScaleHandle::BottomRight  => (fixed_y, fixed_y + height - 1),
            ScaleHandle::TopLeft | ScaleHandle::TopRight        => (fixed_y - height + 1, fixed_y),
        };

        SelectionBounds { left: left, top: top, right: right, bottom: bottom }
    }
}
