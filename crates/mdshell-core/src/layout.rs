// ── Capability-driven layout ──
//
// Layout modifiers come from the device capability set plus the page
// flags in application state. `LayoutMetrics` turns them into a concrete
// panel size for the available area.

use serde::Serialize;

use crate::model::{Capability, DeviceState};

/// Independent, composable layout modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LayoutModifiers {
    /// The device can list its contents, so the panel grows to fit a list.
    pub list_sized: bool,
    /// Explicit request for the full available height.
    pub full_height: bool,
    /// Explicit request for (almost) the full available width.
    pub full_width: bool,
}

impl LayoutModifiers {
    pub fn resolve(device: &DeviceState, page_full_height: bool, page_full_width: bool) -> Self {
        Self {
            list_sized: device.has_capability(Capability::ContentList),
            full_height: page_full_height,
            full_width: page_full_width,
        }
    }
}

/// Width class of the available area, in terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Breakpoint {
    Compact,
    Desktop,
    WideDesktop,
}

impl Breakpoint {
    pub const DESKTOP_MIN_WIDTH: u16 = 100;
    pub const WIDE_MIN_WIDTH: u16 = 140;

    pub fn for_width(width: u16) -> Self {
        if width >= Self::WIDE_MIN_WIDTH {
            Self::WideDesktop
        } else if width >= Self::DESKTOP_MIN_WIDTH {
            Self::Desktop
        } else {
            Self::Compact
        }
    }
}

/// Concrete size of the content panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelSize {
    pub width: u16,
    pub height: u16,
    pub breakpoint: Breakpoint,
}

/// Panel sizing rules per breakpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutMetrics {
    pub desktop_width: u16,
    pub wide_width: u16,
    /// Percentage of the available width used for `full_width` on desktop.
    pub full_width_percent: u16,
    pub desktop_height: u16,
    pub wide_height: u16,
    pub desktop_list_height: u16,
    pub wide_list_height: u16,
    /// Rows left free below the panel in compact layouts.
    pub compact_reserved_rows: u16,
    /// Rows left free below the panel for `full_height`.
    pub full_height_reserved_rows: u16,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            desktop_width: 60,
            wide_width: 70,
            full_width_percent: 90,
            desktop_height: 12,
            wide_height: 16,
            desktop_list_height: 30,
            wide_list_height: 40,
            compact_reserved_rows: 2,
            full_height_reserved_rows: 5,
        }
    }
}

impl LayoutMetrics {
    /// Size the content panel for `available` = (columns, rows).
    ///
    /// `full_height` dominates `list_sized`. Results never exceed the
    /// available area.
    pub fn panel_size(&self, modifiers: LayoutModifiers, available: (u16, u16)) -> PanelSize {
        let (avail_w, avail_h) = available;
        let breakpoint = Breakpoint::for_width(avail_w);

        let width = match breakpoint {
            Breakpoint::Compact => avail_w,
            _ if modifiers.full_width => percent_of(avail_w, self.full_width_percent),
            Breakpoint::Desktop => self.desktop_width,
            Breakpoint::WideDesktop => self.wide_width,
        };

        let compact_height = avail_h.saturating_sub(self.compact_reserved_rows);
        let base_height = match breakpoint {
            Breakpoint::Compact => compact_height,
            Breakpoint::Desktop => self.desktop_height,
            Breakpoint::WideDesktop => self.wide_height,
        };
        let list_height = match breakpoint {
            Breakpoint::Compact => compact_height,
            Breakpoint::Desktop => self.desktop_list_height,
            Breakpoint::WideDesktop => self.wide_list_height,
        };
        let full_height = avail_h.saturating_sub(self.full_height_reserved_rows);

        let height = match (modifiers.list_sized, modifiers.full_height) {
            (_, true) => full_height,
            (true, false) => list_height,
            (false, false) => base_height,
        };

        PanelSize {
            width: width.min(avail_w),
            height: height.min(avail_h),
            breakpoint,
        }
    }
}

fn percent_of(value: u16, percent: u16) -> u16 {
    let scaled = u32::from(value) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(value)
}
