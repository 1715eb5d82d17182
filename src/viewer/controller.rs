use crate::viewer::query::ViewerQuery;
use crate::viewer::source::DataSource;
use crate::viewer::state::{reduce, Action, Effect, Navigation, ViewerState};
use crate::viewer::view::{render, ViewerView};

/// Owns the viewer state and runs its effects against a data source.
///
/// [`Viewer::dispatch`] and [`Viewer::perform`] are split so a caller can keep
/// several fetches in flight and feed their completions back in any order;
/// [`Viewer::open`] and [`Viewer::navigate`] just run one action to completion.
pub struct Viewer<S> {
    source: S,
    state: ViewerState,
}

impl<S: DataSource> Viewer<S> {
    pub fn new(source: S) -> Self {
        Viewer {
            source,
            state: ViewerState::default(),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn view(&self) -> ViewerView {
        render(&self.state)
    }

    /// Apply one action and return the work it asks for.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        let transition = reduce(&self.state, action);
        self.state = transition.state;
        transition.effect
    }

    /// Run an effect and turn its outcome into the action that reports it.
    pub async fn perform(&self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::None => None,
            Effect::FetchCatalog { comic, ticket } => {
                match self.source.fetch_catalog(&comic).await {
                    Ok(catalog) => Some(Action::CatalogLoaded { ticket, catalog }),
                    Err(e) => {
                        log::error!("Failed to load comic {}: {}", comic, e);
                        Some(Action::CatalogFailed { ticket })
                    }
                }
            }
            Effect::FetchChapter {
                comic,
                chapter,
                ticket,
                ..
            } => match self.source.fetch_chapter_pages(&comic, &chapter).await {
                Ok(loaded) => Some(Action::ChapterLoaded {
                    ticket,
                    chapter: loaded,
                }),
                Err(e) => {
                    log::error!("Failed to load chapter {}/{}: {}", comic, chapter.slug, e);
                    Some(Action::ChapterFailed { ticket })
                }
            },
        }
    }

    pub async fn open(&mut self, query: ViewerQuery) {
        self.run(Action::Init(query)).await;
    }

    pub async fn navigate(&mut self, nav: Navigation) {
        self.run(Action::Navigate(nav)).await;
    }

    async fn run(&mut self, action: Action) {
        let mut effect = self.dispatch(action);
        while let Some(done) = self.perform(effect).await {
            effect = self.dispatch(done);
        }
    }
}
