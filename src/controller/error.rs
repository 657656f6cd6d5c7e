use thiserror::Error;

/// Error returned by [`Stack::push`](crate::Stack::push) and [`Stack::pop`](crate::Stack::pop).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// The control loop has stopped (closed, or every handle was dropped).
    #[error("override control loop closed")]
    Closed,
}

impl StackError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            StackError::Closed => "stack_closed",
        }
    }
}
