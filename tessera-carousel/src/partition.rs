//! Splits an ordered item collection into navigable pages.
//!
//! ## Usage
//!
//! Call [`partition`] directly, or keep a [`PagePartitioner`] around to reuse
//! the previous result while the inputs stay the same.
use std::{ops::Range, sync::Arc};

use crate::config::whole_items;

/// A contiguous group of items navigated as one unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Page {
    index: usize,
    items: Range<usize>,
}

impl Page {
    /// Zero-based index of the page.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Item indices belonging to this page.
    pub fn items(&self) -> Range<usize> {
        self.items.clone()
    }

    /// First item of the page; the item aligned to the scroll-start edge.
    pub fn first_item(&self) -> usize {
        self.items.start
    }

    /// Number of items on the page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Pages are never empty; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns `true` if `item` belongs to this page.
    pub fn contains(&self, item: usize) -> bool {
        self.items.contains(&item)
    }
}

/// Shared, immutable list of pages.
///
/// Cloning is cheap. Two `Pages` produced from the same inputs by a
/// [`PagePartitioner`] share storage, see [`Pages::ptr_eq`].
#[derive(Clone, Debug, Default)]
pub struct Pages(Arc<[Page]>);

impl Pages {
    /// Number of pages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when there are no pages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the page at `index`.
    pub fn get(&self, index: usize) -> Option<&Page> {
        self.0.get(index)
    }

    /// Iterates over the pages in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.0.iter()
    }

    /// Index of the last page, if any.
    pub fn last_index(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// Index of the page that owns `item`.
    pub fn page_of_item(&self, item: usize) -> Option<usize> {
        let position = self.0.partition_point(|page| page.items.end <= item);
        self.0
            .get(position)
            .filter(|page| page.contains(item))
            .map(Page::index)
    }

    /// Total number of items across all pages.
    pub fn item_count(&self) -> usize {
        self.0.last().map_or(0, |page| page.items.end)
    }

    /// Returns `true` if both values share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Pages {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for Pages {}

impl std::ops::Index<usize> for Pages {
    type Output = Page;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Pages {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Partitions `item_count` items into pages of `floor(items_per_page)` items.
///
/// The fractional part of `items_per_page` only affects how much of the next
/// item peeks into the viewport; membership uses the floored count. The last
/// page holds the remainder. Non-positive or non-finite values count as one
/// item per page.
///
/// ```
/// use tessera_carousel::partition;
///
/// let pages = partition(7, 2.25);
/// assert_eq!(pages.len(), 4);
/// assert_eq!(pages[3].items(), 6..7);
/// ```
pub fn partition(item_count: usize, items_per_page: f32) -> Pages {
    if item_count == 0 {
        return Pages::default();
    }
    if items_per_page.is_finite() && items_per_page >= item_count as f32 {
        return Pages(Arc::from([Page {
            index: 0,
            items: 0..item_count,
        }]));
    }

    let per_page = whole_items(items_per_page);
    let pages: Vec<Page> = (0..item_count)
        .step_by(per_page)
        .enumerate()
        .map(|(index, start)| Page {
            index,
            items: start..(start + per_page).min(item_count),
        })
        .collect();
    Pages(pages.into())
}

/// Memoising wrapper around [`partition`].
#[derive(Clone, Debug, Default)]
pub struct PagePartitioner {
    inputs: Option<(usize, u32)>,
    pages: Pages,
}

impl PagePartitioner {
    /// Creates an empty partitioner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pages for the given inputs, recomputing only when they
    /// differ from the previous call.
    pub fn update(&mut self, item_count: usize, items_per_page: f32) -> &Pages {
        let key = (item_count, items_per_page.to_bits());
        if self.inputs != Some(key) {
            self.pages = partition(item_count, items_per_page);
            self.inputs = Some(key);
        }
        &self.pages
    }

    /// The most recent result.
    pub fn pages(&self) -> &Pages {
        &self.pages
    }
}
