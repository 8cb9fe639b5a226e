use bitflags::bitflags;
use echotango_core::CellIndex;
use serde::{Deserialize, Serialize};
use yew::prelude::*;

bitflags! {
    /// Sides of a cell that draw the grid border.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub(crate) struct Borders: u8 {
        const TOP    = 1;
        const RIGHT  = 1 << 1;
        const BOTTOM = 1 << 2;
        const LEFT   = 1 << 3;
    }
}

impl Borders {
    pub(crate) fn classes(self) -> Classes {
        let mut classes = Classes::new();
        for (name, _) in self.iter_names() {
            classes.push(format!("border-{}", name.to_ascii_lowercase()));
        }
        classes
    }
}

/// What the front face of a cell shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum TileKind {
    Slider,
    Video,
    IndustryTerm,
    ContactForm,
    Work,
    Testimonial,
}

impl TileKind {
    pub(crate) const fn label(self) -> &'static str {
        use TileKind::*;
        match self {
            Slider => "Stories",
            Video => "Showreel",
            IndustryTerm => "Industry term",
            ContactForm => "Contact",
            Work => "WORK",
            Testimonial => "Testimonial",
        }
    }

    pub(crate) const fn class(self) -> &'static str {
        use TileKind::*;
        match self {
            Slider => "slider",
            Video => "video",
            IndustryTerm => "industry-term",
            ContactForm => "contact-form",
            Work => "work",
            Testimonial => "testimonial",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TileSlot {
    pub kind: TileKind,
    pub borders: Borders,
}

/// The cell whose front opens the work reel and whose back leads home.
pub(crate) const WORK_CELL: u8 = 8;

/// Fixed 3×3 layout; the slider spans the top-left 2×2 block.
pub(crate) fn slot_for(cell: CellIndex) -> TileSlot {
    use TileKind::*;

    let (kind, borders) = match cell.get() {
        1 => (Slider, Borders::RIGHT | Borders::BOTTOM),
        2 => (Slider, Borders::RIGHT | Borders::BOTTOM),
        3 => (Video, Borders::BOTTOM),
        4 => (Slider, Borders::RIGHT | Borders::BOTTOM),
        5 => (Slider, Borders::RIGHT | Borders::BOTTOM),
        6 => (IndustryTerm, Borders::RIGHT | Borders::BOTTOM),
        7 => (ContactForm, Borders::RIGHT | Borders::BOTTOM),
        WORK_CELL => (Work, Borders::RIGHT | Borders::BOTTOM),
        _ => (Testimonial, Borders::RIGHT | Borders::BOTTOM),
    };
    TileSlot { kind, borders }
}
