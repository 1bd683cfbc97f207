//! One collector per page shape of the source site.
//!
//! Collectors hold a fully-formed URL plus the parameters it was built
//! from, and implement `verify`/`extract` against the landmarks of exactly
//! one page layout. Shared DOM helpers live here; they mirror the handful
//! of navigation moves the extractors need (leading text runs, direct
//! children, nearest preceding siblings) rather than a general query layer.

mod arena;
mod divisions;
mod events;
mod locations;
mod roster;
mod schedule;
mod teams;

pub use arena::ArenaPage;
pub use divisions::DivisionsPage;
pub use events::EventsPage;
pub use locations::EventLocationsFeed;
pub use roster::RosterPage;
pub use schedule::{GameReportsPage, SchedulePage};
pub use teams::TeamsPage;

use scraper::{ElementRef, Node, Selector};

/// Marker the site puts in team cells of schedule rows that are not league
/// games (olympic and exhibition entries).
pub(crate) const NBSP: char = '\u{a0}';

pub(crate) fn sel<S: AsRef<str>>(sel: S) -> Selector {
    Selector::parse(sel.as_ref()).unwrap()
}

/// All text under an element, concatenated in document order.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// The text run before an element's first child element, or an empty
/// string when the element opens with a child. Cells that split their
/// content with `<br>` keep only the leading part here.
pub(crate) fn leading_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in el.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            _ => break,
        }
    }
    out
}

/// Direct children that are elements with the given name.
pub(crate) fn child_elements<'a>(el: ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == name)
        .collect()
}

/// The parent, when it is an element.
pub(crate) fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

/// The parent, when it is an element with the given name.
pub(crate) fn parent_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    parent_element(el).filter(|parent| parent.value().name() == name)
}

/// Preceding sibling elements, nearest first.
pub(crate) fn preceding_siblings<'a>(
    el: ElementRef<'a>,
) -> impl Iterator<Item = ElementRef<'a>> {
    el.prev_siblings().filter_map(ElementRef::wrap)
}

/// The cells of an element's immediate child tables, one nesting level
/// down: every `td` of every row of those tables, in document order.
/// Deeper tables (the per-player grids inside on-ice cells) are left
/// untouched for the caller to walk itself.
pub(crate) fn nested_cells(el: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut cells = Vec::new();
    for table in child_elements(el, "table") {
        for group in child_elements(table, "tbody") {
            for row in child_elements(group, "tr") {
                cells.extend(child_elements(row, "td"));
            }
        }
    }
    cells
}
