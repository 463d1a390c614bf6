//! One-dimensional windowing over a run of items.
//!
//! A window answers "which items intersect this scroll range" without
//! touching the items themselves. Size changes are staged and only become
//! visible after [`VirtualizedWindow::force_recompute`], mirroring how the
//! cached extents of a virtualized region must be explicitly invalidated.

use std::ops::Range;

pub trait VirtualizedWindow {
    fn item_count(&self) -> usize;

    /// Extent of item `index` in pixels; `0` when out of range.
    fn item_size(&self, index: usize) -> u64;

    /// Start offset of item `index`. `item_offset(item_count())` is the total.
    fn item_offset(&self, index: usize) -> u64;

    fn total_size(&self) -> u64;

    /// Non-empty item containing `offset`.
    fn item_at(&self, offset: u64) -> Option<usize>;

    /// Indices intersecting `[scroll_offset, scroll_offset + viewport)` plus
    /// overscan on both sides. Zero-size items inside the range are never
    /// counted as overscan.
    fn visible_range(&self, scroll_offset: u64, viewport: u64) -> Range<usize>;

    /// Applies staged size changes and rebuilds cached extents.
    fn force_recompute(&mut self);

    /// Visible indices with non-zero size.
    fn visible_items(&self, scroll_offset: u64, viewport: u64) -> Vec<usize> {
        self.visible_range(scroll_offset, viewport)
            .filter(|index| self.item_size(*index) > 0)
            .collect()
    }

    /// Largest scroll offset that still fills `viewport`.
    fn max_scroll(&self, viewport: u64) -> u64 {
        self.total_size().saturating_sub(viewport)
    }
}

/// Window over items of identical size, resolved arithmetically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedSizeWindow {
    count: usize,
    size: u64,
    overscan: usize,
    pending: Option<(usize, u64)>,
}

impl FixedSizeWindow {
    pub fn new(count: usize, size: u64, overscan: usize) -> Self {
        Self {
            count,
            size,
            overscan,
            pending: None,
        }
    }

    /// Stages a new item count and size.
    pub fn resize(&mut self, count: usize, size: u64) {
        self.pending = Some((count, size));
    }

    fn count_u64(&self) -> u64 {
        u64::try_from(self.count).unwrap_or(u64::MAX)
    }
}

impl VirtualizedWindow for FixedSizeWindow {
    fn item_count(&self) -> usize {
        self.count
    }

    fn item_size(&self, index: usize) -> u64 {
        if index < self.count { self.size } else { 0 }
    }

    fn item_offset(&self, index: usize) -> u64 {
        let index = u64::try_from(index.min(self.count)).unwrap_or(u64::MAX);
        index.saturating_mul(self.size)
    }

    fn total_size(&self) -> u64 {
        self.count_u64().saturating_mul(self.size)
    }

    fn item_at(&self, offset: u64) -> Option<usize> {
        if self.size == 0 || offset >= self.total_size() {
            return None;
        }
        usize::try_from(offset / self.size).ok()
    }

    fn visible_range(&self, scroll_offset: u64, viewport: u64) -> Range<usize> {
        if self.size == 0 || viewport == 0 || self.count == 0 {
            return 0..0;
        }
        let offset = scroll_offset.min(self.max_scroll(viewport));
        let first = offset / self.size;
        let last = offset.saturating_add(viewport).div_ceil(self.size).min(self.count_u64());
        let first = usize::try_from(first).unwrap_or(usize::MAX);
        let last = usize::try_from(last).unwrap_or(self.count);
        first.saturating_sub(self.overscan)..last.saturating_add(self.overscan).min(self.count)
    }

    fn force_recompute(&mut self) {
        if let Some((count, size)) = self.pending.take() {
            self.count = count;
            self.size = size;
        }
    }
}

/// Window over items of differing sizes.
///
/// Offsets are served from a prefix-sum cache where `prefix[i]` is the total
/// size of items `0..i`, and lookups binary-search that cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSizeWindow {
    sizes: Vec<u64>,
    prefix: Vec<u64>,
    overscan: usize,
}

impl VariableSizeWindow {
    pub fn new(sizes: Vec<u64>, overscan: usize) -> Self {
        let mut window = Self {
            sizes,
            prefix: vec![0],
            overscan,
        };
        window.force_recompute();
        window
    }

    /// Stages new item sizes.
    pub fn set_sizes(&mut self, sizes: Vec<u64>) {
        self.sizes = sizes;
    }

    fn extend_back(&self, start: usize) -> usize {
        let mut start = start;
        let mut taken = 0;
        while start > 0 && taken < self.overscan {
            start -= 1;
            if self.item_size(start) > 0 {
                taken += 1;
            }
        }
        start
    }

    fn extend_forward(&self, end: usize) -> usize {
        let count = self.item_count();
        let mut end = end;
        let mut taken = 0;
        while end < count && taken < self.overscan {
            if self.item_size(end) > 0 {
                taken += 1;
            }
            end += 1;
        }
        end
    }
}

impl VirtualizedWindow for VariableSizeWindow {
    fn item_count(&self) -> usize {
        self.prefix.len().saturating_sub(1)
    }

    fn item_size(&self, index: usize) -> u64 {
        match (self.prefix.get(index), self.prefix.get(index + 1)) {
            (Some(start), Some(end)) => end - start,
            _ => 0,
        }
    }

    fn item_offset(&self, index: usize) -> u64 {
        let index = index.min(self.item_count());
        self.prefix.get(index).copied().unwrap_or(0)
    }

    fn total_size(&self) -> u64 {
        self.prefix.last().copied().unwrap_or(0)
    }

    fn item_at(&self, offset: u64) -> Option<usize> {
        if offset >= self.total_size() {
            return None;
        }
        // Last item starting at or before `offset`; zero-size items share
        // their successor's start and are passed over.
        Some(self.prefix.partition_point(|start| *start <= offset).saturating_sub(1))
    }

    fn visible_range(&self, scroll_offset: u64, viewport: u64) -> Range<usize> {
        let total = self.total_size();
        if viewport == 0 || total == 0 {
            return 0..0;
        }
        let offset = scroll_offset.min(self.max_scroll(viewport));
        let Some(first) = self.item_at(offset) else {
            return 0..0;
        };
        let last_pixel = offset.saturating_add(viewport).min(total) - 1;
        let last = self.item_at(last_pixel).unwrap_or(first);
        self.extend_back(first)..self.extend_forward(last + 1)
    }

    fn force_recompute(&mut self) {
        self.prefix.clear();
        self.prefix.reserve(self.sizes.len() + 1);
        self.prefix.push(0);
        let mut total: u64 = 0;
        for size in &self.sizes {
            total = total.saturating_add(*size);
            self.prefix.push(total);
        }
    }
}
