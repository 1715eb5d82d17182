use crate::viewer::query::ViewerQuery;
use crate::viewer::state::{Phase, ViewerState, NO_CHAPTERS_MESSAGE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOption {
    /// Index in chapter order, not display order.
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub url: String,
    pub lazy: bool,
}

/// Everything a front end needs to draw the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerView {
    pub heading: String,
    /// Shown in place of the pages.
    pub message: Option<String>,
    /// Most recent chapter first.
    pub options: Vec<SelectorOption>,
    pub pages: Vec<PageImage>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// Query string the address bar should be replaced with.
    pub address: Option<String>,
}

pub fn render(state: &ViewerState) -> ViewerView {
    let selected = state.target_index();
    let options = state
        .chapters
        .iter()
        .enumerate()
        .rev()
        .map(|(index, c)| SelectorOption {
            index,
            label: format!("{} — {} pages", c.title, c.pages_count),
            selected: Some(index) == selected,
        })
        .collect();

    let (prev_enabled, next_enabled) = match state.current {
        Some(i) => (i > 0, i + 1 < state.chapters.len()),
        None => (false, false),
    };

    let address = state.current_chapter().map(|chapter| {
        ViewerQuery {
            comic: state.comic_slug.clone(),
            chapter: Some(chapter.slug.clone()),
        }
        .to_query_string()
    });

    let (heading, message) = match &state.phase {
        Phase::Error(message) => (message.clone(), Some(message.clone())),
        Phase::Ready if state.chapters.is_empty() => {
            (state.comic_title.clone(), Some(NO_CHAPTERS_MESSAGE.to_string()))
        }
        _ => match &state.displayed {
            Some(chapter) => (format!("{} — {}", state.comic_title, chapter.title), None),
            None => (state.comic_title.clone(), None),
        },
    };

    let pages = match (&state.phase, &state.displayed) {
        (Phase::Error(_), _) | (_, None) => Vec::new(),
        (_, Some(chapter)) => chapter
            .pages
            .iter()
            .map(|p| PageImage {
                url: p.url.clone(),
                lazy: true,
            })
            .collect(),
    };

    ViewerView {
        heading,
        message,
        options,
        pages,
        prev_enabled,
        next_enabled,
        address,
    }
}

/// How wide an image is drawn after it has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Native size, never stretched.
    Native,
    /// Scaled down to the container width.
    CapToContainer,
}

pub fn fit(natural_width: Option<u32>, container_width: u32) -> Fit {
    match natural_width {
        Some(width) if width > container_width => Fit::CapToContainer,
        _ => Fit::Native,
    }
}
