///
/// The kinds of committed change an editor reports to its notifier
///
/// The editor guarantees at most one notification per committed mutation or batch;
/// consumers that want fewer (debounced repaints, periodic auto-saves) coalesce on their
/// own side.
///
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A committed pixel write or batch of pixel writes
    PixelsEdited,

    /// The layer topology, a layer property or the canvas dimensions changed
    StructureChanged,

    /// An undo or redo rewrote the document state
    HistoryRestored,
}

///
/// Callback invoked after each committed change
///
/// The editor calls the hook synchronously and never waits on anything it does: a slow or
/// absent consumer cannot stall editing.
///
pub type ChangeNotifier = Box<dyn FnMut(ChangeEvent) + Send>;
