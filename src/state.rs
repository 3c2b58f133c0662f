//! View State

/// Where a screen's data currently stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    #[default]
    Idle,

    /// A fetch is in flight.
    Loading,

    /// The last fetch completed and its data is in the snapshot.
    Loaded,

    /// The last fetch failed; the message replaces the view.
    Failed(String),
}

impl LoadState {
    /// The page-level error, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            Self::Idle | Self::Loading | Self::Loaded => None,
        }
    }
}

/// An immutable view snapshot advanced one event at a time.
///
/// Implementations must be pure: the next snapshot depends only on the current one and
/// the event.
pub trait Reducer: Sized {
    /// Events this snapshot understands.
    type Event;

    /// Produce the next snapshot.
    #[must_use]
    fn reduce(self, event: Self::Event) -> Self;

    /// Apply a sequence of events in order.
    #[must_use]
    fn reduce_all(self, events: impl IntoIterator<Item = Self::Event>) -> Self {
        events.into_iter().fold(self, Self::reduce)
    }
}
