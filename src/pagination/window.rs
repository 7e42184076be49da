//! Page window computation
//!
//! Decides which page numbers a listing renders and where the gaps go.
//!
//! ## Zones
//!
//! | Zone       | Condition                   | Rendered                                         |
//! |------------|-----------------------------|--------------------------------------------------|
//! | Near-start | `current <= 2r + 1`         | `1..=current+r`, gap, last `r`                   |
//! | Near-end   | `current >= count - 2r`     | first `r`, gap, `current-r..=count`              |
//! | Middle     | otherwise                   | first `r`, gap, `current-r..=current+r`, gap, last `r` |
//!
//! Ranges that touch or overlap are merged, so a gap only appears where at
//! least one page is actually hidden, and each gap becomes a single ellipsis.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PaginationConfig;
use crate::error::PaginationError;

/// Neighbours shown either side of the current page unless configured
pub const DEFAULT_RADIUS: u32 = 2;

fn default_radius() -> u32 {
    DEFAULT_RADIUS
}

/// One rendered position in a pagination bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageSlot {
    /// A clickable page number
    Number { page: u32, current: bool },
    /// A collapsed run of hidden pages
    Ellipsis,
}

impl PageSlot {
    /// Page number, if this slot is one
    pub fn page(&self) -> Option<u32> {
        match self {
            PageSlot::Number { page, .. } => Some(*page),
            PageSlot::Ellipsis => None,
        }
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageSlot::Ellipsis)
    }

    pub fn is_current(&self) -> bool {
        matches!(self, PageSlot::Number { current: true, .. })
    }
}

impl fmt::Display for PageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSlot::Number {
                page,
                current: true,
            } => write!(f, "[{}]", page),
            PageSlot::Number { page, .. } => write!(f, "{}", page),
            PageSlot::Ellipsis => f.write_str("…"),
        }
    }
}

/// Inputs to [`compute_window`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub current_page: u32,
    pub page_count: u32,
    #[serde(default = "default_radius")]
    pub radius: u32,
}

impl PageRequest {
    /// Request with the default radius
    pub fn new(current_page: u32, page_count: u32) -> Self {
        Self {
            current_page,
            page_count,
            radius: DEFAULT_RADIUS,
        }
    }

    /// Request using the configured radius
    pub fn from_config(current_page: u32, page_count: u32, config: &PaginationConfig) -> Self {
        Self::new(current_page, page_count).with_radius(config.radius)
    }

    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    pub fn window(&self) -> Result<Vec<PageSlot>, PaginationError> {
        compute_window(self.current_page, self.page_count, self.radius)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Zone {
    NearStart,
    NearEnd,
    Middle,
}

impl Zone {
    fn of(anchor: u32, page_count: u32, radius: u32) -> Self {
        let span = radius.saturating_mul(2);
        if anchor <= span.saturating_add(1) {
            Zone::NearStart
        } else if anchor >= page_count.saturating_sub(span) {
            Zone::NearEnd
        } else {
            Zone::Middle
        }
    }

    /// Inclusive page ranges to render, ordered by start page
    fn visible_ranges(self, anchor: u32, page_count: u32, radius: u32) -> Vec<(u32, u32)> {
        let head = (1, radius.min(page_count));
        let tail = (page_count.saturating_sub(radius) + 1, page_count);
        let around_start = anchor.saturating_sub(radius).max(1);
        let around_end = anchor.saturating_add(radius).min(page_count);

        match self {
            Zone::NearStart => vec![(1, around_end), tail],
            Zone::NearEnd => vec![head, (around_start, page_count)],
            Zone::Middle => vec![head, (around_start, around_end), tail],
        }
    }
}

/// Compute the slots of a pagination bar.
///
/// Pages past the end (`current_page > page_count`) are windowed as if the
/// last page were current, but no slot is flagged current.
///
/// # Errors
///
/// `current_page == 0` and `radius == 0` are rejected.
pub fn compute_window(
    current_page: u32,
    page_count: u32,
    radius: u32,
) -> Result<Vec<PageSlot>, PaginationError> {
    if current_page == 0 {
        return Err(PaginationError::InvalidCurrentPage { current_page });
    }
    if radius == 0 {
        return Err(PaginationError::InvalidRadius { radius });
    }
    if page_count == 0 {
        return Ok(Vec::new());
    }

    let anchor = current_page.min(page_count);
    let zone = Zone::of(anchor, page_count, radius);
    debug!(
        current_page,
        page_count,
        radius,
        ?zone,
        "computing page window"
    );

    let mut slots = Vec::new();
    let mut last_shown: Option<u32> = None;

    for (start, end) in zone.visible_ranges(anchor, page_count, radius) {
        let start = match last_shown {
            Some(prev) if prev >= end => continue,
            Some(prev) => start.max(prev + 1),
            None => start,
        };
        if let Some(prev) = last_shown {
            if start > prev + 1 {
                slots.push(PageSlot::Ellipsis);
            }
        }
        slots.extend((start..=end).map(|page| PageSlot::Number {
            page,
            current: page == current_page,
        }));
        last_shown = Some(end);
    }

    Ok(slots)
}

/// Render slots as text, e.g. `1 2 … 8 9 [10] 11 12 … 19 20`
pub fn render_window(slots: &[PageSlot]) -> String {
    slots
        .iter()
        .map(|slot| slot.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
