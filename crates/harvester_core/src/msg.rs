#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Begin a session.
    Start,
    /// The home page finished loading.
    HomeLoaded,
    /// The login-confirming element appeared within the timeout.
    LoginConfirmed,
    /// The login-confirming element never appeared.
    LoginTimedOut,
    /// The target page is open and responses are being captured.
    TargetOpened,
    /// A batch of new records reached the sink.
    BatchPersisted { new_records: usize, stored: usize },
    /// One scroll step and its wait interval finished; `stored` is the store size now.
    StepSettled { stored: usize },
}
