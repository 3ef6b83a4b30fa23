/// Per-pixel visit state during one propagation run.
///
/// `Finalized` is terminal: the pixel's strength has been written to the
/// scene and it is never re-queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisitState {
    #[default]
    Unvisited,
    Queued,
    Finalized,
}
