#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
}

/// Which piece of page state just changed. Subscribers read the new value from the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplorerEvent {
    CurrentPathChanged,
    FilterTextChanged,
    EntriesChanged,
    SelectionChanged,
    LoadStateChanged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(super) u64);

pub(super) type Listener = Box<dyn FnMut(ExplorerEvent) + Send>;
