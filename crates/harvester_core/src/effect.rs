use crate::Outcome;

/// Side effects requested by [`crate::update`]; the engine executes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Load the site's home page so the login state can be checked.
    NavigateHome,
    /// Wait (bounded) for the login-confirming element.
    AwaitLogin,
    /// Navigate to the search or profile page and start listening for responses.
    OpenTarget,
    /// Advance the page once, then wait for responses to settle.
    ScrollStep,
    /// Stop listening and close the browser. Emitted once, on every terminal outcome.
    Cleanup { outcome: Outcome },
}
