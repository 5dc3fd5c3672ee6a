use crate::core::{crops, engine, types::*};
use crate::ports::dashboard::Dashboard;
use crate::ports::forecast::ForecastFeed;
use crate::ports::geocode::Geocoder;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

// ── Guard ──

/// Idle/Fetching flag around the scheduled fetch-and-render cycle.
/// At most one scheduled cycle is in flight at a time; completions
/// return to Idle whether the cycle succeeded or failed.
#[derive(Debug, Default)]
pub struct RefreshGuard {
    in_flight: bool,
}

impl RefreshGuard {
    /// Claims the Fetching state. Returns false while a cycle is in flight.
    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }
}

// ── Events ──

#[derive(Debug)]
pub enum Command {
    Search(String),
    Pause,
    Resume,
    Refresh,
    Crops(CropSelection),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CycleKind {
    Scheduled,
    Manual,
}

#[derive(Debug)]
struct CycleDone {
    kind: CycleKind,
    location: Location,
    result: Result<ForecastBundle>,
}

// ── Controller ──

pub struct AppState {
    pub location: Location,
    pub selection: CropSelection,
    pub latest: Option<ForecastBundle>,
}

pub struct Controller {
    feed: Arc<dyn ForecastFeed>,
    geocoder: Arc<dyn Geocoder>,
    sink: Arc<dyn Dashboard>,
    config: Config,
    state: AppState,
    guard: RefreshGuard,
    visible: bool,
}

impl Controller {
    pub fn new(
        feed: Arc<dyn ForecastFeed>,
        geocoder: Arc<dyn Geocoder>,
        sink: Arc<dyn Dashboard>,
        config: Config,
    ) -> Self {
        let state = AppState {
            location: config.initial_location(),
            selection: CropSelection::All,
            latest: None,
        };
        Self {
            feed,
            geocoder,
            sink,
            config,
            state,
            guard: RefreshGuard::default(),
            visible: true,
        }
    }

    /// Event loop. Fetches run as spawned tasks; every state mutation and
    /// every render happens here, one event at a time.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> Result<()> {
        let (done_tx, mut done_rx) = mpsc::channel::<CycleDone>(8);

        // The first tick fires immediately and doubles as the initial load.
        let mut ticker = interval(self.config.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick(), if self.visible => {
                    self.begin_scheduled(&done_tx);
                }
                maybe_cmd = commands.recv() => {
                    let Some(cmd) = maybe_cmd else { break };
                    match cmd {
                        Command::Quit => break,
                        Command::Pause => {
                            if self.visible {
                                tracing::info!("Auto refresh paused");
                            }
                            self.visible = false;
                        }
                        Command::Resume => {
                            if !self.visible {
                                tracing::info!("Auto refresh resumed");
                            }
                            self.visible = true;
                            self.begin_scheduled(&done_tx);
                            ticker.reset();
                        }
                        Command::Refresh => self.begin_scheduled(&done_tx),
                        Command::Crops(selection) => self.apply_selection(selection),
                        Command::Search(query) => self.begin_search(query, &done_tx),
                    }
                }
                Some(done) = done_rx.recv() => self.handle_done(done),
            }
        }

        Ok(())
    }

    fn begin_scheduled(&mut self, done_tx: &mpsc::Sender<CycleDone>) {
        if !self.guard.try_begin() {
            tracing::debug!("Refresh already in flight, trigger skipped");
            return;
        }
        let feed = self.feed.clone();
        let location = self.state.location.clone();
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let result = feed.forecast(&location).await;
            let _ = done_tx
                .send(CycleDone {
                    kind: CycleKind::Scheduled,
                    location,
                    result,
                })
                .await;
        });
    }

    /// Searches bypass the refresh guard: a superseding fetch is allowed to
    /// race, and the last one to complete wins on the rendered state.
    fn begin_search(&self, query: String, done_tx: &mpsc::Sender<CycleDone>) {
        self.sink.status(&format!("Searching for \"{}\"...", query));
        let feed = self.feed.clone();
        let geocoder = self.geocoder.clone();
        let sink = self.sink.clone();
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            match geocoder.search(&query).await {
                Ok(Some(location)) => {
                    let result = feed.forecast(&location).await;
                    let _ = done_tx
                        .send(CycleDone {
                            kind: CycleKind::Manual,
                            location,
                            result,
                        })
                        .await;
                }
                Ok(None) => sink.status(&format!("No results for \"{}\".", query)),
                Err(e) => {
                    tracing::error!("Geocoding failed: {:#}", e);
                    sink.status("Search failed.");
                }
            }
        });
    }

    fn handle_done(&mut self, done: CycleDone) {
        if done.kind == CycleKind::Scheduled {
            self.guard.finish();
        }
        match done.result {
            Ok(bundle) => {
                self.state.location = done.location;
                self.state.latest = Some(bundle);
                self.render_latest();
                let loc = &self.state.location;
                self.sink.status(&format!(
                    "Current location: {} ({:.4}, {:.4})",
                    loc.name, loc.latitude, loc.longitude
                ));
            }
            Err(e) => {
                tracing::error!("Forecast fetch failed: {:#}", e);
                match done.kind {
                    CycleKind::Scheduled => self
                        .sink
                        .alert(&format!("Failed to load weather data: {}", e)),
                    CycleKind::Manual => {
                        self.sink.status("Search failed, weather data not updated.")
                    }
                }
            }
        }
    }

    fn apply_selection(&mut self, selection: CropSelection) {
        if let CropSelection::Keys(keys) = &selection {
            for key in keys {
                if crops::find(key).is_none() {
                    tracing::warn!("Unknown crop key '{}' in filter", key);
                }
            }
        }
        self.state.selection = selection;
        let selected = crops::CROPS
            .iter()
            .filter(|c| self.state.selection.includes(c.key))
            .count();
        self.sink
            .status(&format!("{} of {} crops selected", selected, crops::CROPS.len()));
        self.render_latest();
    }

    fn render_latest(&self) {
        if let Some(bundle) = &self.state.latest {
            engine::render(
                bundle,
                &self.state.location,
                &self.state.selection,
                &self.config.tolerances,
                self.sink.as_ref(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn test_config() -> Config {
        Config {
            location_name: "Berlin".into(),
            latitude: 52.52,
            longitude: 13.405,
            timezone: "Europe/Berlin".into(),
            language: "en".into(),
            forecast_days: 7,
            refresh_interval: Duration::from_secs(3600),
            tolerances: Tolerances {
                temperature: 2.0,
                humidity: 10.0,
            },
        }
    }

    /// Counts calls, then never resolves.
    #[derive(Default)]
    struct BlockedFeed {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ForecastFeed for BlockedFeed {
        async fn forecast(&self, _location: &Location) -> Result<ForecastBundle> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending::<Result<ForecastBundle>>().await
        }
    }

    #[derive(Default)]
    struct InstantFeed {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ForecastFeed for InstantFeed {
        async fn forecast(&self, _location: &Location) -> Result<ForecastBundle> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ForecastBundle::default())
        }
    }

    struct HamburgGeocoder;

    #[async_trait]
    impl Geocoder for HamburgGeocoder {
        async fn search(&self, _query: &str) -> Result<Option<Location>> {
            Ok(Some(Location {
                name: "Hamburg, Germany".into(),
                latitude: 53.5507,
                longitude: 9.993,
            }))
        }
    }

    struct NoHitGeocoder;

    #[async_trait]
    impl Geocoder for NoHitGeocoder {
        async fn search(&self, _query: &str) -> Result<Option<Location>> {
            Ok(None)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        frames: Mutex<Vec<String>>,
        statuses: Mutex<Vec<String>>,
        alerts: Mutex<Vec<String>>,
    }

    impl Dashboard for RecordingSink {
        fn render(&self, frame: &Frame) {
            self.frames.lock().unwrap().push(frame.location.name.clone());
        }

        fn status(&self, message: &str) {
            self.statuses.lock().unwrap().push(message.to_string());
        }

        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn guard_admits_one_cycle_at_a_time() {
        let mut guard = RefreshGuard::default();
        assert!(guard.try_begin());
        assert!(guard.is_fetching());
        assert!(!guard.try_begin());
        guard.finish();
        assert!(guard.try_begin());
    }

    #[tokio::test]
    async fn overlapping_triggers_issue_one_fetch() {
        let feed = Arc::new(BlockedFeed::default());
        let mut controller = Controller::new(
            feed.clone(),
            Arc::new(NoHitGeocoder),
            Arc::new(RecordingSink::default()),
            test_config(),
        );
        let (done_tx, _done_rx) = mpsc::channel(8);

        controller.begin_scheduled(&done_tx);
        controller.begin_scheduled(&done_tx);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(feed.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_updates_location_and_renders() {
        let feed = Arc::new(InstantFeed::default());
        let sink = Arc::new(RecordingSink::default());
        let controller = Controller::new(
            feed.clone(),
            Arc::new(HamburgGeocoder),
            sink.clone(),
            test_config(),
        );

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(controller.run(rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(Command::Search("hamburg".into())).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(Command::Quit).await.unwrap();
        handle.await.unwrap().unwrap();

        let frames = sink.frames.lock().unwrap();
        assert!(frames.len() >= 2, "initial load plus search render");
        assert_eq!(frames.last().unwrap(), "Hamburg, Germany");
        assert_eq!(feed.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn search_without_hits_reports_status_only() {
        let feed = Arc::new(InstantFeed::default());
        let sink = Arc::new(RecordingSink::default());
        let controller = Controller::new(
            feed.clone(),
            Arc::new(NoHitGeocoder),
            sink.clone(),
            test_config(),
        );

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(controller.run(rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(Command::Search("atlantis".into())).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(Command::Quit).await.unwrap();
        handle.await.unwrap().unwrap();

        assert_eq!(feed.calls.load(Ordering::SeqCst), 1);
        let statuses = sink.statuses.lock().unwrap();
        assert!(statuses.iter().any(|s| s.contains("No results")));
        assert!(sink.alerts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn resume_triggers_an_immediate_refresh() {
        let feed = Arc::new(InstantFeed::default());
        let sink = Arc::new(RecordingSink::default());
        let controller = Controller::new(
            feed.clone(),
            Arc::new(NoHitGeocoder),
            sink.clone(),
            test_config(),
        );

        let (tx, rx) = mpsc::channel(8);
        let handle = tokio::spawn(controller.run(rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(Command::Pause).await.unwrap();
        tx.send(Command::Resume).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(Command::Quit).await.unwrap();
        handle.await.unwrap().unwrap();

        assert_eq!(feed.calls.load(Ordering::SeqCst), 2);
    }
}
