use std::mem::{align_of, size_of};

/// Size and alignment of an inline storage block.
///
/// A variant set's [`LAYOUT`](crate::VariantSet::LAYOUT) is the union of the
/// layouts of all of its members: the largest size and the strictest
/// alignment. The generated enum is at least this large, so every member
/// fits without spilling to the heap.
///
/// ```
/// use inline_poly::StorageLayout;
///
/// let layout = StorageLayout::of::<u16>().union(StorageLayout::of::<[u8; 5]>());
/// assert_eq!(layout.size, 5);
/// assert_eq!(layout.align, 2);
/// assert!(layout.fits::<u16>());
/// assert!(!layout.fits::<u64>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageLayout {
    pub size: usize,
    pub align: usize,
}

impl StorageLayout {
    /// Layout of a block that holds nothing.
    pub const EMPTY: Self = Self { size: 0, align: 1 };

    pub const fn of<T>() -> Self {
        Self {
            size: size_of::<T>(),
            align: align_of::<T>(),
        }
    }

    /// Smallest layout able to hold either `self` or `other`.
    pub const fn union(self, other: Self) -> Self {
        Self {
            size: if self.size > other.size { self.size } else { other.size },
            align: if self.align > other.align { self.align } else { other.align },
        }
    }

    /// Whether a `T` can be placed in a block of this layout.
    pub const fn fits<T>(self) -> bool {
        size_of::<T>() <= self.size && align_of::<T>() <= self.align
    }

    /// Size rounded up to a multiple of the alignment.
    pub const fn padded_size(self) -> usize {
        (self.size + self.align - 1) / self.align * self.align
    }
}

impl Default for StorageLayout {
    fn default() -> Self {
        Self::EMPTY
    }
}
