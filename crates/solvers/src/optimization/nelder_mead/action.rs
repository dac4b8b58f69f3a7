/// Actions an observer can take during a Nelder-Mead solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop before applying this iteration's step and return the best
    /// vertex of the current simplex.
    StopEarly,
}
