use std::collections::VecDeque;
use std::time::{Duration, Instant};

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use harvester_core::{update, Effect, HarvestState, Msg, Outcome, STAGNATION_LIMIT};
use serde_json::Value;

use crate::backoff::Backoff;
use crate::config::HarvestConfig;
use crate::driver::{DriverError, PageDriver};
use crate::mailbox::{is_timeline_endpoint, CapturedResponse, ResponseMailbox};
use crate::normalize::Normalizer;
use crate::persist::{PersistError, RecordSink};
use crate::pipeline::Pipeline;
use crate::store::RecordStore;
use crate::{HarvestError, HarvestReport};

const RATE_LIMITED: u16 = 429;

/// One harvest session: executes the core state machine's effects against a
/// page driver, feeding captured responses through the pipeline into a sink.
///
/// Responses are consumed only on the session's own thread, while it waits
/// after a scroll. The store therefore has a single writer and needs no lock.
pub struct Harvester<D, S> {
    config: HarvestConfig,
    driver: D,
    mailbox: ResponseMailbox,
    collector: Collector<S>,
    listening: bool,
    closed: bool,
    scroll_steps: u64,
    backoff: Backoff,
    backoff_waits: Vec<Duration>,
}

impl<D: PageDriver, S: RecordSink> Harvester<D, S> {
    pub fn new(config: HarvestConfig, driver: D, sink: S) -> Self {
        let normalizer = Normalizer::new(config.language.clone(), config.site_host.clone());
        let mailbox = ResponseMailbox::bounded(config.mailbox_capacity);
        let backoff = Backoff::new(config.backoff);
        let collector = Collector {
            pipeline: Pipeline::new(normalizer, RecordStore::new()),
            sink,
            target: config.target_count,
            rate_limited: false,
            persisted: Vec::new(),
        };
        Self {
            config,
            driver,
            mailbox,
            collector,
            listening: false,
            closed: false,
            scroll_steps: 0,
            backoff,
            backoff_waits: Vec::new(),
        }
    }

    /// Starts from a pre-filled store; its records count toward the target
    /// and are never persisted again.
    pub fn with_store(mut self, store: RecordStore) -> Self {
        let normalizer =
            Normalizer::new(self.config.language.clone(), self.config.site_host.clone());
        self.collector.pipeline = Pipeline::new(normalizer, store);
        self
    }

    /// Runs until a terminal outcome. Cleanup happens on every exit path.
    pub fn run(mut self) -> Result<HarvestReport, HarvestError> {
        engine_logging::set_scroll_step(0);
        engine_info!("Harvesting posts from {}", self.config.mode.describe());

        let mut state = HarvestState::resume(
            self.config.target_count,
            self.collector.pipeline.store().len(),
        );
        let mut inbox = VecDeque::from([Msg::Start]);

        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            if state.consume_dirty() {
                let view = state.view();
                engine_debug!(
                    "phase={:?} stored={}/{} stagnant={}/{}",
                    view.phase,
                    view.stored,
                    view.target,
                    view.stagnant_steps,
                    STAGNATION_LIMIT
                );
            }
            for effect in effects {
                match self.execute(effect) {
                    Ok(msgs) => inbox.extend(msgs),
                    Err(err) => {
                        engine_error!("Harvest aborted: {}", err);
                        self.release();
                        return Err(err);
                    }
                }
            }
        }

        let Some(outcome) = state.outcome() else {
            self.release();
            return Err(HarvestError::Stalled(format!("{:?}", state.phase())));
        };
        Ok(HarvestReport {
            outcome,
            records: self.collector.pipeline.store().len(),
            scroll_steps: self.scroll_steps,
            backoff_waits: self.backoff_waits,
        })
    }

    fn execute(&mut self, effect: Effect) -> Result<Vec<Msg>, HarvestError> {
        match effect {
            Effect::NavigateHome => {
                let url = self.config.home_url();
                engine_info!("Navigating to {} to verify login status", url);
                self.driver.navigate(&url)?;
                Ok(vec![Msg::HomeLoaded])
            }
            Effect::AwaitLogin => {
                if self
                    .driver
                    .await_login_confirmation(self.config.login_timeout)
                {
                    engine_info!("Login successful. Proceeding to harvest.");
                    Ok(vec![Msg::LoginConfirmed])
                } else {
                    engine_error!("Login failed. The auth token may be invalid or expired.");
                    Ok(vec![Msg::LoginTimedOut])
                }
            }
            Effect::OpenTarget => {
                let url = self
                    .config
                    .mode
                    .target_url(&self.config.site_host)
                    .map_err(|err| DriverError::Navigation {
                        url: self.config.site_host.clone(),
                        message: err.to_string(),
                    })?;
                engine_info!("Navigating to target URL: {}", url);
                self.driver.navigate(url.as_str())?;
                self.driver.listen(self.mailbox.sender());
                self.listening = true;
                Ok(vec![Msg::TargetOpened])
            }
            Effect::ScrollStep => Ok(self.scroll_step()?),
            Effect::Cleanup { outcome } => {
                self.release();
                let stored = self.collector.pipeline.store().len();
                match outcome {
                    Outcome::TargetReached => engine_info!(
                        "Harvest finished. Collected {} posts (target {}).",
                        stored,
                        self.config.target_count
                    ),
                    Outcome::Stagnated => engine_warn!(
                        "No new posts for {} consecutive scrolls. Ending session with {} posts.",
                        STAGNATION_LIMIT,
                        stored
                    ),
                    Outcome::LoginFailed => engine_error!("Session ended: login failed."),
                }
                Ok(Vec::new())
            }
        }
    }

    fn scroll_step(&mut self) -> Result<Vec<Msg>, PersistError> {
        let before = self.collector.pipeline.store().len();
        if std::mem::take(&mut self.collector.rate_limited) {
            let wait = self.backoff.next_delay();
            self.backoff_waits.push(wait);
            engine_warn!(
                "Rate limit hit. Waiting for {} seconds before retrying...",
                wait.as_secs()
            );
            self.settle(wait)?;
        }

        self.scroll_steps += 1;
        engine_logging::set_scroll_step(self.scroll_steps);
        self.driver.trigger_next_page();
        self.settle(self.config.scroll_delay)?;

        let stored = self.collector.pipeline.store().len();
        if stored > before {
            self.backoff.reset();
        }
        let mut msgs = std::mem::take(&mut self.collector.persisted);
        msgs.push(Msg::StepSettled { stored });
        Ok(msgs)
    }

    fn settle(&mut self, wait: Duration) -> Result<(), PersistError> {
        let deadline = Instant::now() + wait;
        let collector = &mut self.collector;
        self.mailbox
            .drain_until(deadline, |response| collector.handle(response))
    }

    fn release(&mut self) {
        if self.listening {
            self.driver.stop_listening();
            self.listening = false;
        }
        if !self.closed {
            self.driver.close();
            self.closed = true;
        }
    }
}

/// Consumer side of the mailbox: the only writer of the store.
struct Collector<S> {
    pipeline: Pipeline,
    sink: S,
    target: usize,
    rate_limited: bool,
    persisted: Vec<Msg>,
}

impl<S: RecordSink> Collector<S> {
    fn handle(&mut self, response: CapturedResponse) -> Result<(), PersistError> {
        if !is_timeline_endpoint(&response.url) {
            return Ok(());
        }
        if response.status == RATE_LIMITED {
            engine_warn!("Rate limited by {}", response.url);
            self.rate_limited = true;
            return Ok(());
        }
        if response.status != 200 {
            return Ok(());
        }
        let body = match response.body {
            Ok(body) => body,
            Err(reason) => {
                engine_warn!("Failed to read a response from {}: {}", response.url, reason);
                return Ok(());
            }
        };
        let payload: Value = match serde_json::from_slice(&body) {
            Ok(payload) => payload,
            Err(err) => {
                engine_warn!("Failed to parse a response from {}: {}", response.url, err);
                return Ok(());
            }
        };

        let fresh = self.pipeline.ingest(&payload);
        if fresh.is_empty() {
            return Ok(());
        }
        self.sink.append(&fresh)?;

        let stored = self.pipeline.store().len();
        engine_info!(
            "Parsed and saved {} new posts. Total: {} / {}",
            fresh.len(),
            stored,
            self.target
        );
        self.persisted.push(Msg::BatchPersisted {
            new_records: fresh.len(),
            stored,
        });
        Ok(())
    }
}
