use crate::errors::GuardianResult;

/// A live editable text surface (a text box or rich editable region).
///
/// The host emits a change notification after every overwrite, real or
/// synthetic; the synchronizer distinguishes the two with its reentrancy
/// guard, not through this trait.
pub trait IEditableSurface: Send + Sync {
    /// The surface's current text content.
    fn text(&self) -> String;

    /// Programmatically overwrite the surface's content. The caret moves
    /// to the end of the new text; callers accept that trade-off.
    fn set_text(&self, text: &str) -> GuardianResult<()>;
}
