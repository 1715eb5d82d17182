//! Viewer state and its transition function.
//!
//! The viewer moves through `Uninitialized → LoadingComic → LoadingChapter → Ready`,
//! with `Error` reachable from any fetch. Every catalog and chapter request
//! carries a [`Ticket`]; a completion whose ticket is not the latest request of
//! its kind is stale and gets dropped, so fast navigation can't land on an old
//! chapter and a second `Init` can't be overwritten by the first comic.

use crate::models::comic::{ChapterSummary, Page};
use crate::viewer::query::ViewerQuery;

pub const NO_COMIC_MESSAGE: &str = "No comic specified; add ?comic=<slug> to the URL.";
pub const COMIC_FAILED_MESSAGE: &str = "Failed to load comic data.";
pub const CHAPTER_FAILED_MESSAGE: &str = "Failed to load chapter.";
pub const NO_CHAPTERS_MESSAGE: &str = "No chapters found for this comic.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    LoadingComic,
    LoadingChapter,
    Ready,
    Error(String),
}

/// Identifies one catalog or chapter request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

/// What a data source knows about a comic.
#[derive(Debug, Clone, PartialEq)]
pub struct ComicCatalog {
    pub title: String,
    pub chapters: Vec<ChapterSummary>,
}

/// Page list of one chapter, as fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedChapter {
    pub title: String,
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingChapter {
    pub index: usize,
    pub ticket: Ticket,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub phase: Phase,
    pub comic_slug: Option<String>,
    /// Chapter asked for by the URL; only consulted when the catalog arrives.
    pub start_chapter: Option<String>,
    pub comic_title: String,
    pub chapters: Vec<ChapterSummary>,
    /// Index of the chapter on display.
    pub current: Option<usize>,
    pub displayed: Option<LoadedChapter>,
    pub pending: Option<PendingChapter>,
    /// Outstanding catalog request, if any.
    pub catalog_ticket: Option<Ticket>,
    pub next_ticket: u64,
}

impl Default for ViewerState {
    fn default() -> Self {
        ViewerState {
            phase: Phase::Uninitialized,
            comic_slug: None,
            start_chapter: None,
            comic_title: String::new(),
            chapters: Vec::new(),
            current: None,
            displayed: None,
            pending: None,
            catalog_ticket: None,
            next_ticket: 0,
        }
    }
}

impl ViewerState {
    /// Index navigation is relative to: the newest request, else what is shown.
    pub fn target_index(&self) -> Option<usize> {
        self.pending
            .as_ref()
            .map(|p| p.index)
            .or(self.current)
    }

    pub fn current_chapter(&self) -> Option<&ChapterSummary> {
        self.current.and_then(|i| self.chapters.get(i))
    }

    fn is_latest(&self, ticket: Ticket) -> bool {
        self.pending.as_ref().is_some_and(|p| p.ticket == ticket)
    }

    fn is_awaited_catalog(&self, ticket: Ticket) -> bool {
        self.phase == Phase::LoadingComic && self.catalog_ticket == Some(ticket)
    }

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// A chapter picked in the selector, by its index in chapter order.
    Select(usize),
    Previous,
    Next,
    Key(Key),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Init(ViewerQuery),
    CatalogLoaded { ticket: Ticket, catalog: ComicCatalog },
    CatalogFailed { ticket: Ticket },
    Navigate(Navigation),
    ChapterLoaded { ticket: Ticket, chapter: LoadedChapter },
    ChapterFailed { ticket: Ticket },
}

/// Work a transition asks the driver to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchCatalog {
        comic: String,
        ticket: Ticket,
    },
    FetchChapter {
        comic: String,
        chapter: ChapterSummary,
        index: usize,
        ticket: Ticket,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: ViewerState,
    pub effect: Effect,
}

impl Transition {
    fn unchanged(state: &ViewerState) -> Self {
        Transition {
            state: state.clone(),
            effect: Effect::None,
        }
    }
}

pub fn reduce(state: &ViewerState, action: Action) -> Transition {
    match action {
        Action::Init(query) => init(state, query),
        Action::CatalogLoaded { ticket, catalog } => {
            if !state.is_awaited_catalog(ticket) {
                return Transition::unchanged(state);
            }
            catalog_loaded(state, catalog)
        }
        Action::CatalogFailed { ticket } => {
            if !state.is_awaited_catalog(ticket) {
                return Transition::unchanged(state);
            }
            fail(state, COMIC_FAILED_MESSAGE)
        }
        Action::Navigate(nav) => navigate(state, nav),
        Action::ChapterLoaded { ticket, chapter } => {
            if !state.is_latest(ticket) {
                return Transition::unchanged(state);
            }
            let mut next = state.clone();
            next.current = next.pending.take().map(|p| p.index);
            next.displayed = Some(chapter);
            next.phase = Phase::Ready;
            Transition {
                state: next,
                effect: Effect::None,
            }
        }
        Action::ChapterFailed { ticket } => {
            if !state.is_latest(ticket) {
                return Transition::unchanged(state);
            }
            fail(state, CHAPTER_FAILED_MESSAGE)
        }
    }
}

// Starts over, but keeps the ticket counter so replies to the previous comic stay stale.
fn init(state: &ViewerState, query: ViewerQuery) -> Transition {
    let mut next = ViewerState {
        next_ticket: state.next_ticket,
        ..ViewerState::default()
    };

    let Some(comic) = query.comic else {
        next.phase = Phase::Error(NO_COMIC_MESSAGE.to_string());
        return Transition {
            state: next,
            effect: Effect::None,
        };
    };

    let ticket = next.issue_ticket();
    next.phase = Phase::LoadingComic;
    next.comic_slug = Some(comic.clone());
    next.start_chapter = query.chapter;
    next.comic_title = comic.clone();
    next.catalog_ticket = Some(ticket);
    Transition {
        state: next,
        effect: Effect::FetchCatalog { comic, ticket },
    }
}

fn catalog_loaded(state: &ViewerState, catalog: ComicCatalog) -> Transition {
    let mut next = state.clone();
    next.catalog_ticket = None;
    next.comic_title = catalog.title;
    next.chapters = catalog.chapters;

    if next.chapters.is_empty() {
        next.phase = Phase::Ready;
        return Transition {
            state: next,
            effect: Effect::None,
        };
    }

    let start = next
        .start_chapter
        .as_deref()
        .and_then(|slug| next.chapters.iter().position(|c| c.slug == slug))
        .unwrap_or(next.chapters.len() - 1);
    request_chapter(next, start)
}

fn navigate(state: &ViewerState, nav: Navigation) -> Transition {
    let target = match (nav, state.target_index()) {
        (Navigation::Select(i), _) => Some(i),
        (Navigation::Previous | Navigation::Key(Key::ArrowLeft), Some(i)) => i.checked_sub(1),
        (Navigation::Next | Navigation::Key(Key::ArrowRight), Some(i)) => i.checked_add(1),
        (_, None) => None,
    };

    match target {
        Some(i) if i < state.chapters.len() => request_chapter(state.clone(), i),
        _ => Transition::unchanged(state),
    }
}

fn request_chapter(mut state: ViewerState, index: usize) -> Transition {
    let (Some(comic), Some(chapter)) = (state.comic_slug.clone(), state.chapters.get(index).cloned())
    else {
        return Transition::unchanged(&state);
    };

    let ticket = state.issue_ticket();
    state.pending = Some(PendingChapter { index, ticket });
    state.phase = Phase::LoadingChapter;

    Transition {
        state,
        effect: Effect::FetchChapter {
            comic,
            chapter,
            index,
            ticket,
        },
    }
}

// A failure keeps the catalog and the chapter on display; only the phase changes.
fn fail(state: &ViewerState, message: &str) -> Transition {
    let mut next = state.clone();
    next.pending = None;
    next.catalog_ticket = None;
    next.phase = Phase::Error(message.to_string());
    Transition {
        state: next,
        effect: Effect::None,
    }
}
