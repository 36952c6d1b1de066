//! TUI application model (Elm architecture).

use std::io;
use std::mem;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::{Frame, Terminal};
use tracing::{debug, info, warn};

use sortviz_chart::format::format_ms;
use sortviz_chart::Palette;
use sortviz_core::constants::{DEFAULT_API_URL, DEFAULT_COMPARISON_ALGORITHMS};
use sortviz_core::model::{AlgorithmDescriptor, HistoryQuery, RunRecord, RunResult, TrainReport};
use sortviz_core::playback::{PlaybackEngine, PlaybackState};
use sortviz_core::scheduler::{DeadlineScheduler, TimerId};
use sortviz_core::session::{SessionToken, TokenIssuer};
use sortviz_core::VizError;
use sortviz_orchestration::comparison::{ComparisonConfig, ComparisonOrchestrator, LegOutcome};
use sortviz_orchestration::history::{filter_runs, HistoryBrowser, HistoryFilter};
use sortviz_orchestration::predictor::PredictionOutcome;

use crate::comparison::render_comparison;
use crate::footer::render_footer;
use crate::forms::{cycle_name, PredictForm, RunForm};
use crate::header::render_header;
use crate::history::render_history;
use crate::keymap::{map_key, KeyAction, View};
use crate::logs::{render_logs, LogBuffer};
use crate::messages::{Command, TuiMessage};
use crate::prediction::{render_prediction, PredictorActivity};
use crate::visualizer::{
    render_algorithm_info, render_bars_panel, render_controls, render_playback, render_run_metrics,
};
use crate::worker::Worker;

/// Longest wait for input while no playback timer is armed.
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// Lines moved by page up / page down in the log panel.
const LOG_PAGE: usize = 10;

/// Start-up settings.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    /// Shown in the header.
    pub api_url: String,
    pub run: RunForm,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            run: RunForm::default(),
        }
    }
}

/// TUI application state (Elm Model).
///
/// Every request is tagged with a session token from the matching issuer;
/// results carrying any other token are dropped on arrival.
pub struct TuiApp {
    pub should_quit: bool,
    pub view: View,
    pub api_url: String,
    rx: Receiver<TuiMessage>,
    outbox: Vec<Command>,

    catalog: Arc<Vec<AlgorithmDescriptor>>,
    palette: Palette,

    pub form: RunForm,
    run_issuer: TokenIssuer,
    pub running: bool,
    last_run: Option<Arc<RunResult>>,
    playback: PlaybackEngine<DeadlineScheduler>,

    comparison: ComparisonOrchestrator,
    /// Algorithms included in the next comparison, in catalog order.
    pub selection: Vec<String>,

    history_issuer: TokenIssuer,
    pub history: Vec<RunRecord>,
    pub history_filter: HistoryFilter,
    pub history_loading: bool,

    pub predict_form: PredictForm,
    predict_issuer: TokenIssuer,
    pub prediction: Option<PredictionOutcome>,
    pub predicting: bool,

    pub train: Option<TrainReport>,
    pub training: bool,

    /// Last user-visible error, cleared by the next submission.
    pub status: Option<String>,
    pub logs: LogBuffer,
    pub terminal_width: u16,
    pub terminal_height: u16,
}

impl TuiApp {
    /// Create the app and queue the catalog load.
    pub fn new(rx: Receiver<TuiMessage>, options: TuiOptions) -> Result<Self, VizError> {
        let form = options.run.clamped();
        let playback = PlaybackEngine::new(DeadlineScheduler::new(Instant::now()), form.speed)?;
        let predict_form = PredictForm {
            algorithm: form.algorithm.clone(),
            distribution: form.distribution,
            ..PredictForm::default()
        };
        Ok(Self {
            should_quit: false,
            view: View::default(),
            api_url: options.api_url,
            rx,
            outbox: vec![Command::LoadCatalog],
            catalog: Arc::new(Vec::new()),
            palette: Palette::default(),
            form,
            run_issuer: TokenIssuer::new(),
            running: false,
            last_run: None,
            playback,
            comparison: ComparisonOrchestrator::new(),
            selection: DEFAULT_COMPARISON_ALGORITHMS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            history_issuer: TokenIssuer::new(),
            history: Vec::new(),
            history_filter: HistoryFilter::default(),
            history_loading: false,
            predict_form,
            predict_issuer: TokenIssuer::new(),
            prediction: None,
            predicting: false,
            train: None,
            training: false,
            status: None,
            logs: LogBuffer::default(),
            terminal_width: 80,
            terminal_height: 24,
        })
    }

    /// Commands queued since the last call.
    pub fn take_commands(&mut self) -> Vec<Command> {
        mem::take(&mut self.outbox)
    }

    #[must_use]
    pub fn playback(&self) -> &PlaybackEngine<DeadlineScheduler> {
        &self.playback
    }

    #[must_use]
    pub fn comparison(&self) -> &ComparisonOrchestrator {
        &self.comparison
    }

    #[must_use]
    pub fn last_run(&self) -> Option<&Arc<RunResult>> {
        self.last_run.as_ref()
    }

    #[must_use]
    pub fn catalog(&self) -> &[AlgorithmDescriptor] {
        &self.catalog
    }

    /// Algorithm names in catalog order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.catalog.iter().map(|a| a.name.clone()).collect()
    }

    /// Display label for `name`, falling back to the name itself.
    #[must_use]
    pub fn label(&self, name: &str) -> String {
        self.descriptor(name)
            .map_or_else(|| name.to_string(), |a| a.label.clone())
    }

    /// Catalog entry for an algorithm name.
    #[must_use]
    pub fn descriptor(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.catalog.iter().find(|a| a.name == name)
    }

    /// History records passing the current filter.
    #[must_use]
    pub fn visible_runs(&self) -> Vec<&RunRecord> {
        filter_runs(&self.history, &self.history_filter)
    }

    /// Drain the message channel (Elm Update).
    pub fn update(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.handle_message(msg);
        }
    }

    /// Handle a single message.
    pub fn handle_message(&mut self, msg: TuiMessage) {
        match msg {
            TuiMessage::Key(action) => self.handle_key_action(action),
            TuiMessage::Tick(id) => {
                self.playback.tick(id);
            }
            TuiMessage::Resize { width, height } => {
                self.terminal_width = width;
                self.terminal_height = height;
            }
            TuiMessage::CatalogLoaded(Ok(list)) => self.on_catalog(list),
            TuiMessage::CatalogLoaded(Err(err)) => self.set_error(err),
            TuiMessage::RunFinished { token, result } => self.on_run_finished(token, result),
            TuiMessage::ComparisonLeg(outcome) => self.on_comparison_leg(outcome),
            TuiMessage::HistoryLoaded { token, result } => self.on_history(token, result),
            TuiMessage::PredictionReady { token, result } => self.on_prediction(token, result),
            TuiMessage::TrainFinished(result) => self.on_train(result),
            TuiMessage::Log(line) => self.logs.push(line),
            TuiMessage::Quit => self.should_quit = true,
        }
    }

    /// Handle a keyboard action.
    pub fn handle_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::NextView => self.show_view(self.view.next()),
            KeyAction::ShowView(view) => self.show_view(view),
            KeyAction::Submit => match self.view {
                View::Visualizer => self.start_run(),
                View::Data => self.fetch_history(),
                View::Predict => self.request_prediction(),
            },
            KeyAction::TogglePlay => self.toggle_play(),
            KeyAction::Stop => self.playback.stop(),
            KeyAction::SpeedUp => self.change_speed(true),
            KeyAction::SpeedDown => self.change_speed(false),
            KeyAction::NextAlgorithm => self.cycle_algorithm(true),
            KeyAction::PrevAlgorithm => self.cycle_algorithm(false),
            KeyAction::NextDistribution => self.cycle_distribution(),
            KeyAction::SizeUp => self.step_size(true),
            KeyAction::SizeDown => self.step_size(false),
            KeyAction::Compare => self.start_comparison(),
            KeyAction::ToggleMember => self.toggle_member(),
            KeyAction::CycleFilter => self.cycle_filter(),
            KeyAction::Refresh => match self.view {
                View::Data => self.fetch_history(),
                View::Visualizer | View::Predict => self.outbox.push(Command::LoadCatalog),
            },
            KeyAction::Train => self.start_training(),
            KeyAction::ScrollUp => self.logs.scroll_up(1),
            KeyAction::ScrollDown => self.logs.scroll_down(1),
            KeyAction::PageUp => self.logs.scroll_up(LOG_PAGE),
            KeyAction::PageDown => self.logs.scroll_down(LOG_PAGE),
            KeyAction::None => {}
        }
    }

    /// Move the playback clock to `now` and deliver due ticks.
    pub fn advance_clock(&mut self, now: Instant) {
        let due: Vec<TimerId> = self.playback.scheduler_mut().advance(now);
        for id in due {
            self.handle_message(TuiMessage::Tick(id));
        }
    }

    /// Apply terminal input received at `now`.
    ///
    /// The clock moves first so timers armed by the input start at `now`.
    pub fn handle_input(&mut self, msg: TuiMessage, now: Instant) {
        self.advance_clock(now);
        self.handle_message(msg);
    }

    /// How long the event loop may block waiting for input.
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        self.playback
            .scheduler()
            .time_until_next()
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL))
    }

    fn set_error(&mut self, err: VizError) {
        if !err.is_user_visible() {
            debug!(error = %err, "suppressed error");
            return;
        }
        warn!(error = %err, "request failed");
        self.logs.push(format!("[ERROR] {err}"));
        self.status = Some(err.to_string());
    }

    fn on_catalog(&mut self, list: Arc<Vec<AlgorithmDescriptor>>) {
        info!(algorithms = list.len(), "catalog loaded");
        self.palette = Palette::seeded(list.iter().map(|a| a.name.as_str()));
        self.catalog = list;
        let names = self.names();
        if let Some(first) = names.first() {
            if !names.contains(&self.form.algorithm) {
                self.form.algorithm = first.clone();
            }
            if !names.contains(&self.predict_form.algorithm) {
                self.predict_form.algorithm = first.clone();
            }
            self.selection.retain(|n| names.contains(n));
        }
        self.logs
            .push(format!("[INFO] {} algorithms available", names.len()));
    }

    fn show_view(&mut self, view: View) {
        if view == self.view {
            return;
        }
        self.view = view;
        if view == View::Data && !self.history_loading {
            self.fetch_history();
        }
    }

    // Visualizer

    /// Invalidate the run and playback derived from the run form.
    fn on_run_config_changed(&mut self) {
        self.run_issuer.invalidate();
        self.running = false;
        self.last_run = None;
        self.playback.stop();
    }

    /// Size and distribution feed both the single run and the comparison.
    fn on_shared_config_changed(&mut self) {
        self.on_run_config_changed();
        self.comparison.invalidate();
    }

    fn start_run(&mut self) {
        self.status = None;
        self.playback.stop();
        let token = self.run_issuer.issue();
        let request = self.form.request();
        info!(
            %token,
            algorithm = %request.algorithm,
            size = request.size,
            distribution = %request.distribution,
            "run requested"
        );
        self.running = true;
        self.outbox.push(Command::Run { token, request });
    }

    fn on_run_finished(&mut self, token: SessionToken, result: Result<RunResult, VizError>) {
        if !self.run_issuer.is_current(token) {
            debug!(%token, "dropping stale run result");
            return;
        }
        self.running = false;
        match result {
            Ok(run) => {
                let m = &run.metrics;
                self.logs.push(format!(
                    "[INFO] {} n={}: {} ({} comparisons, {} swaps, {} frames)",
                    self.label(&m.algorithm),
                    m.n,
                    format_ms(m.runtime_ms),
                    m.comparisons,
                    m.swaps,
                    run.frame_count()
                ));
                let run = Arc::new(run);
                self.last_run = Some(Arc::clone(&run));
                if let Err(err) = self.playback.start(run) {
                    self.set_error(err);
                }
            }
            Err(err) => self.set_error(err),
        }
    }

    fn toggle_play(&mut self) {
        match self.playback.state() {
            PlaybackState::Playing | PlaybackState::Paused => {
                self.playback.toggle();
            }
            PlaybackState::Finished | PlaybackState::Idle => match self.last_run.clone() {
                Some(run) => {
                    if let Err(err) = self.playback.start(run) {
                        self.set_error(err);
                    }
                }
                None if !self.running => self.start_run(),
                None => {}
            },
        }
    }

    fn change_speed(&mut self, up: bool) {
        if self.form.step_speed(up) {
            if let Err(err) = self.playback.set_speed(self.form.speed) {
                self.set_error(err);
            }
        }
    }

    fn cycle_algorithm(&mut self, forward: bool) {
        let names = self.names();
        match self.view {
            View::Visualizer => {
                if let Some(next) = cycle_name(&names, &self.form.algorithm, forward) {
                    if next != self.form.algorithm {
                        self.form.algorithm = next;
                        self.on_run_config_changed();
                    }
                }
            }
            View::Predict => {
                if let Some(next) = cycle_name(&names, &self.predict_form.algorithm, forward) {
                    if next != self.predict_form.algorithm {
                        self.predict_form.algorithm = next;
                        self.on_predict_config_changed();
                    }
                }
            }
            View::Data => {}
        }
    }

    fn cycle_distribution(&mut self) {
        match self.view {
            View::Visualizer => {
                self.form.distribution = self.form.distribution.next();
                self.on_shared_config_changed();
            }
            View::Predict => {
                self.predict_form.distribution = self.predict_form.distribution.next();
                self.on_predict_config_changed();
            }
            View::Data => {}
        }
    }

    fn step_size(&mut self, up: bool) {
        match self.view {
            View::Visualizer => {
                if self.form.step_size(up) {
                    self.on_shared_config_changed();
                }
            }
            View::Predict => {
                if self.predict_form.step_n(up) {
                    self.on_predict_config_changed();
                }
            }
            View::Data => {}
        }
    }

    // Comparison

    fn toggle_member(&mut self) {
        let name = self.form.algorithm.clone();
        if let Some(pos) = self.selection.iter().position(|n| *n == name) {
            self.selection.remove(pos);
        } else {
            self.selection.push(name);
            let names = self.names();
            self.selection
                .sort_by_key(|n| names.iter().position(|x| x == n).unwrap_or(usize::MAX));
        }
        self.comparison.invalidate();
    }

    fn start_comparison(&mut self) {
        let config = ComparisonConfig::new(self.form.size, self.form.distribution);
        match self.comparison.begin(&self.selection, config) {
            Ok(plan) => {
                self.status = None;
                self.logs.push(format!(
                    "[INFO] comparison {}: {} algorithms at n={}",
                    plan.token,
                    plan.legs.len(),
                    self.form.size
                ));
                self.outbox.push(Command::Compare(plan));
            }
            Err(err) => self.set_error(err),
        }
    }

    fn on_comparison_leg(&mut self, outcome: LegOutcome) {
        let algorithm = outcome.algorithm.clone();
        let failure = outcome.result.as_ref().err().map(ToString::to_string);
        match self.comparison.accept(outcome) {
            Ok(true) => {
                if let Some(reason) = failure {
                    self.logs.push(format!("[WARN] {algorithm}: {reason}"));
                }
                let summary = self.comparison.session().filter(|s| s.is_complete()).map(|s| {
                    match s.winner() {
                        Some(winner) => format!(
                            "[INFO] comparison {}: fastest is {}",
                            s.token(),
                            self.label(winner)
                        ),
                        None => format!("[WARN] comparison {}: every run failed", s.token()),
                    }
                });
                if let Some(line) = summary {
                    self.logs.push(line);
                }
            }
            Ok(false) => {}
            Err(err) => self.set_error(err),
        }
    }

    // Data explorer

    fn fetch_history(&mut self) {
        self.status = None;
        let token = self.history_issuer.issue();
        let query = HistoryQuery {
            algorithm: self.history_filter.algorithm().map(str::to_string),
            ..HistoryBrowser::recent()
        };
        self.history_loading = true;
        self.outbox.push(Command::FetchHistory { token, query });
    }

    fn on_history(&mut self, token: SessionToken, result: Result<Vec<RunRecord>, VizError>) {
        if !self.history_issuer.is_current(token) {
            debug!(%token, "dropping stale history");
            return;
        }
        self.history_loading = false;
        match result {
            Ok(runs) => self.history = runs,
            Err(err) => self.set_error(err),
        }
    }

    fn cycle_filter(&mut self) {
        if self.view != View::Data {
            return;
        }
        self.history_filter = self.history_filter.cycle(&self.names());
        self.fetch_history();
    }

    // Predictor

    fn on_predict_config_changed(&mut self) {
        self.predict_issuer.invalidate();
        self.predicting = false;
    }

    fn request_prediction(&mut self) {
        self.status = None;
        let token = self.predict_issuer.issue();
        self.predicting = true;
        self.outbox.push(Command::Predict {
            token,
            request: self.predict_form.request(),
        });
    }

    fn on_prediction(&mut self, token: SessionToken, result: Result<PredictionOutcome, VizError>) {
        if !self.predict_issuer.is_current(token) {
            debug!(%token, "dropping stale prediction");
            return;
        }
        self.predicting = false;
        match result {
            Ok(outcome) => {
                self.logs.push(format!(
                    "[INFO] {} n={}: {} ({:.1}%), {}",
                    self.label(&outcome.request.algorithm),
                    outcome.request.n,
                    outcome.top.label,
                    outcome.top.percent(),
                    format_ms(outcome.result.predicted_runtime_ms)
                ));
                self.prediction = Some(outcome);
            }
            Err(err) => self.set_error(err),
        }
    }

    fn start_training(&mut self) {
        if self.training {
            return;
        }
        self.training = true;
        self.logs.push("[INFO] training model".to_string());
        self.outbox.push(Command::Train);
    }

    fn on_train(&mut self, result: Result<TrainReport, VizError>) {
        self.training = false;
        match result {
            Ok(report) => {
                self.logs.push(format!(
                    "[INFO] model {}: {} samples, accuracy {:.1}%",
                    report.status,
                    report.trained_on_samples,
                    report.accuracy * 100.0
                ));
                self.train = Some(report);
            }
            Err(err) => self.set_error(err),
        }
    }

    // View

    /// Returns (header, body, logs, footer) rects.
    #[must_use]
    pub fn compute_layout(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // header
                Constraint::Min(8),    // view
                Constraint::Length(6), // logs
                Constraint::Length(3), // footer
            ])
            .split(area);
        (outer[0], outer[1], outer[2], outer[3])
    }

    /// Render the full TUI view.
    pub fn render(&self, frame: &mut Frame) {
        let (header, body, logs, footer) = Self::compute_layout(frame.area());
        render_header(frame, header, self.view, &self.api_url);
        match self.view {
            View::Visualizer => self.render_visualizer(frame, body),
            View::Data => render_history(
                frame,
                body,
                &self.visible_runs(),
                &self.history_filter,
                &self.palette,
                self.history_loading,
            ),
            View::Predict => render_prediction(
                frame,
                body,
                &self.predict_form,
                &self.label(&self.predict_form.algorithm),
                self.prediction.as_ref(),
                self.train.as_ref(),
                PredictorActivity {
                    predicting: self.predicting,
                    training: self.training,
                },
            ),
        }
        render_logs(frame, logs, &self.logs);
        render_footer(frame, footer, self.view, self.status.as_deref());
    }

    fn render_visualizer(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(9),
            ])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(9),
                Constraint::Min(4),
            ])
            .split(columns[1]);

        render_bars_panel(frame, left[0], self.playback.current_frame());
        render_playback(frame, left[1], &self.playback);
        let label = |name: &str| self.label(name);
        render_comparison(frame, left[2], self.comparison.session(), &label);
        render_controls(
            frame,
            right[0],
            &self.form,
            &self.label(&self.form.algorithm),
            self.running,
            &self.selection,
        );
        render_algorithm_info(frame, right[1], self.descriptor(&self.form.algorithm));
        render_run_metrics(frame, right[2], self.last_run.as_ref().map(|r| &r.metrics));
    }

    /// Set up the terminal for TUI mode.
    pub fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    /// Tear down the terminal, restoring normal mode.
    pub fn teardown_terminal(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Run the TUI event loop, dispatching commands to `worker`.
    ///
    /// The terminal is restored even when the loop fails.
    pub fn run(&mut self, worker: &Worker) -> io::Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal, worker);
        Self::teardown_terminal(&mut terminal)?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        worker: &Worker,
    ) -> io::Result<()> {
        loop {
            for command in self.take_commands() {
                worker.dispatch(command);
            }

            terminal.draw(|frame| self.render(frame))?;
            if self.should_quit {
                return Ok(());
            }

            if event::poll(self.poll_timeout())? {
                let event = event::read()?;
                let now = Instant::now();
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_input(TuiMessage::Key(map_key(key)), now);
                    }
                    Event::Resize(width, height) => {
                        self.handle_input(TuiMessage::Resize { width, height }, now);
                    }
                    _ => {}
                }
            }

            self.advance_clock(Instant::now());
            self.update();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Sender};
    use ratatui::backend::TestBackend;
    use sortviz_core::model::{Distribution, PredictionResult};
    use sortviz_orchestration::scripted::ScriptedBackend;

    const ALGORITHMS: [&str; 4] = ["bubble_sort", "insertion_sort", "merge_sort", "quick_sort"];

    struct Harness {
        app: TuiApp,
        worker: Worker,
        _tx: Sender<TuiMessage>,
    }

    impl Harness {
        fn new(backend: ScriptedBackend) -> Self {
            let (tx, rx) = unbounded();
            let worker = Worker::new(Arc::new(backend), tx.clone());
            let app = TuiApp::new(rx, TuiOptions::default()).unwrap();
            let mut harness = Self {
                app,
                worker,
                _tx: tx,
            };
            harness.pump();
            harness
        }

        /// Execute queued commands inline and apply their results.
        fn pump(&mut self) {
            for command in self.app.take_commands() {
                self.worker.execute(command);
            }
            self.app.update();
        }

        fn key(&mut self, action: KeyAction) {
            self.app.handle_key_action(action);
        }
    }

    fn scripted() -> ScriptedBackend {
        ScriptedBackend::new()
            .with_algorithms(&ALGORITHMS)
            .with_runtime("bubble_sort", 9.0)
            .with_runtime("merge_sort", 2.0)
            .with_runtime("quick_sort", 1.5)
    }

    fn record(id: u64, algorithm: &str) -> RunRecord {
        RunRecord {
            id,
            algorithm: algorithm.into(),
            n: 100,
            distribution: "random".into(),
            runtime_ms: 1.0,
            comparisons: 10,
            swaps: 5,
            created_at: "2024-05-01T10:00:00".into(),
        }
    }

    fn screen(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        let buf = terminal.draw(|frame| app.render(frame)).unwrap();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf.buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn startup_loads_catalog() {
        let (_tx, rx) = unbounded();
        let mut app = TuiApp::new(rx, TuiOptions::default()).unwrap();
        assert_eq!(app.take_commands(), vec![Command::LoadCatalog]);
        assert!(app.take_commands().is_empty());
    }

    #[test]
    fn catalog_seeds_forms_and_selection() {
        let h = Harness::new(ScriptedBackend::new().with_algorithms(&["merge_sort", "heap_sort"]));
        assert_eq!(h.app.catalog().len(), 2);
        assert_eq!(h.app.form.algorithm, "merge_sort");
        assert_eq!(h.app.predict_form.algorithm, "merge_sort");
        assert_eq!(h.app.selection, vec!["merge_sort".to_string()]);
        assert_eq!(h.app.label("heap_sort"), "Heap Sort");
    }

    #[test]
    fn catalog_failure_sets_status() {
        let h = Harness::new(ScriptedBackend::new().offline());
        assert!(h.app.catalog().is_empty());
        assert!(h.app.status.as_deref().unwrap().contains("/api/algorithms"));
        assert!(h.app.logs.last().unwrap().starts_with("[ERROR]"));
    }

    #[test]
    fn run_then_playback_to_end() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::Submit);
        assert!(h.app.running);
        h.pump();
        assert!(!h.app.running);
        assert_eq!(h.app.playback().state(), PlaybackState::Playing);
        let frames = h.app.playback().frame_count();
        assert_eq!(frames, h.app.form.size);

        let mut now = Instant::now();
        for _ in 0..frames {
            now += h.app.playback().interval();
            h.app.advance_clock(now);
        }
        assert_eq!(h.app.playback().state(), PlaybackState::Finished);
        assert_eq!(h.app.playback().frame(), frames - 1);
        let last = h.app.playback().current_frame().unwrap();
        assert!(last.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn config_change_drops_in_flight_run() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::Submit);
        let stale = h.app.take_commands();
        h.key(KeyAction::SizeUp);
        assert!(!h.app.running);
        for command in stale {
            h.worker.execute(command);
        }
        h.app.update();
        assert_eq!(h.app.playback().state(), PlaybackState::Idle);
        assert!(h.app.last_run().is_none());
    }

    #[test]
    fn stale_errors_stay_silent() {
        let mut h = Harness::new(scripted().with_run_result(
            "quick_sort",
            Err(VizError::status("/api/run", 500)),
        ));
        h.key(KeyAction::Submit);
        let stale = h.app.take_commands();
        h.key(KeyAction::NextDistribution);
        for command in stale {
            h.worker.execute(command);
        }
        h.app.update();
        assert!(h.app.status.is_none());
    }

    #[test]
    fn resubmitting_supersedes_previous_run() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::Submit);
        let first = h.app.take_commands();
        h.key(KeyAction::Submit);
        h.pump();
        let frames = h.app.playback().frame_count();
        assert_eq!(h.app.playback().state(), PlaybackState::Playing);
        let now = Instant::now() + h.app.playback().interval();
        h.app.advance_clock(now);
        let frame = h.app.playback().frame();
        for command in first {
            h.worker.execute(command);
        }
        h.app.update();
        assert_eq!(h.app.playback().frame(), frame);
        assert_eq!(h.app.playback().frame_count(), frames);
    }

    #[test]
    fn speed_change_keeps_frame() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::Submit);
        h.pump();
        let mut now = Instant::now();
        for _ in 0..3 {
            now += h.app.playback().interval();
            h.app.advance_clock(now);
        }
        let frame = h.app.playback().frame();
        let before = h.app.playback().interval();
        h.key(KeyAction::SpeedUp);
        assert_eq!(h.app.playback().frame(), frame);
        assert!(h.app.playback().interval() < before);
        assert_eq!(h.app.playback().speed(), h.app.form.speed);
    }

    #[test]
    fn toggle_pauses_and_replays() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::TogglePlay);
        h.pump();
        assert_eq!(h.app.playback().state(), PlaybackState::Playing);
        h.key(KeyAction::TogglePlay);
        assert_eq!(h.app.playback().state(), PlaybackState::Paused);
        assert_eq!(h.app.poll_timeout(), IDLE_POLL);
        h.key(KeyAction::Stop);
        assert_eq!(h.app.playback().state(), PlaybackState::Idle);
        h.key(KeyAction::TogglePlay);
        assert_eq!(h.app.playback().state(), PlaybackState::Playing);
        assert!(h.app.take_commands().is_empty());
    }

    #[test]
    fn resume_after_idle_waits_a_full_interval() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::TogglePlay);
        h.pump();
        h.key(KeyAction::TogglePlay);
        assert_eq!(h.app.playback().state(), PlaybackState::Paused);
        let frame = h.app.playback().frame();

        let later = Instant::now() + Duration::from_secs(1);
        h.app.handle_input(TuiMessage::Key(KeyAction::TogglePlay), later);
        assert_eq!(h.app.playback().state(), PlaybackState::Playing);
        h.app.advance_clock(later);
        assert_eq!(h.app.playback().frame(), frame);
        h.app.advance_clock(later + h.app.playback().interval());
        assert_eq!(h.app.playback().frame(), frame + 1);
    }

    #[test]
    fn comparison_picks_fastest() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::Compare);
        h.pump();
        let session = h.app.comparison().session().unwrap();
        assert!(session.is_complete());
        assert_eq!(session.winner(), Some("quick_sort"));
        assert!(h.app.logs.last().unwrap().contains("fastest is Quick Sort"));
    }

    #[test]
    fn comparison_ignores_legs_after_config_change() {
        let mut h = Harness::new(scripted());
        h.key(KeyAction::Compare);
        let stale = h.app.take_commands();
        h.key(KeyAction::NextDistribution);
        for command in stale {
            h.worker.execute(command);
        }
        h.app.update();
        assert!(h.app.comparison().session().is_none());
        assert!(h.app.status.is_none());
    }

    #[test]
    fn membership_change_replaces_comparison() {
        let mut h = Harness::new(scripted());
        h.app.selection = vec!["bubble_sort".into(), "merge_sort".into(), "quick_sort".into()];
        h.key(KeyAction::Compare);
        let stale = h.app.take_commands();
        h.app.form.algorithm = "quick_sort".into();
        h.key(KeyAction::ToggleMember);
        assert_eq!(h.app.selection, vec!["bubble_sort", "merge_sort"]);
        assert!(h.app.comparison().session().is_none());
        for command in stale {
            h.worker.execute(command);
        }
        h.app.update();
        assert!(h.app.comparison().session().is_none());

        h.key(KeyAction::Compare);
        h.pump();
        let session = h.app.comparison().session().unwrap();
        assert_eq!(session.algorithms(), ["bubble_sort", "merge_sort"]);
        assert_eq!(session.winner(), Some("merge_sort"));
    }

    #[test]
    fn algorithm_cursor_keeps_comparison() {
        let mut h = Harness::new(scripted());
        h.app.selection = vec!["bubble_sort".into(), "merge_sort".into(), "quick_sort".into()];
        h.key(KeyAction::Compare);
        h.pump();
        h.key(KeyAction::NextAlgorithm);
        let session = h.app.comparison().session().unwrap();
        assert!(session.is_complete());
        assert_eq!(session.winner(), Some("quick_sort"));
    }

    #[test]
    fn empty_selection_is_rejected() {
        let mut h = Harness::new(scripted());
        h.app.selection.clear();
        h.key(KeyAction::Compare);
        assert!(h.app.take_commands().is_empty());
        assert!(h.app.status.is_some());
    }

    #[test]
    fn toggle_member_keeps_catalog_order() {
        let mut h = Harness::new(scripted());
        h.app.form.algorithm = "insertion_sort".into();
        h.key(KeyAction::ToggleMember);
        assert_eq!(
            h.app.selection,
            vec!["bubble_sort", "insertion_sort", "merge_sort", "quick_sort"]
        );
        h.key(KeyAction::ToggleMember);
        assert_eq!(h.app.selection.len(), 3);
    }

    #[test]
    fn data_view_fetches_and_filters() {
        let history = vec![
            record(1, "merge_sort"),
            record(2, "quick_sort"),
            record(3, "merge_sort"),
        ];
        let mut h = Harness::new(scripted().with_history(history));
        h.key(KeyAction::ShowView(View::Data));
        assert!(h.app.history_loading);
        h.pump();
        assert!(!h.app.history_loading);
        assert_eq!(h.app.visible_runs().len(), 3);

        h.key(KeyAction::CycleFilter);
        assert_eq!(h.app.history_filter.algorithm(), Some("bubble_sort"));
        h.pump();
        assert!(h.app.visible_runs().is_empty());

        h.key(KeyAction::CycleFilter);
        h.key(KeyAction::CycleFilter);
        h.pump();
        assert_eq!(h.app.history_filter.algorithm(), Some("merge_sort"));
        assert_eq!(h.app.visible_runs().len(), 2);
    }

    #[test]
    fn prediction_flow() {
        let prediction = PredictionResult {
            predicted_class: "O(n log n)".into(),
            class_probabilities: [("O(n log n)".to_string(), 0.7), ("O(n^2)".to_string(), 0.3)]
                .into_iter()
                .collect(),
            predicted_runtime_ms: 3.0,
        };
        let mut h = Harness::new(scripted().with_prediction(prediction));
        h.key(KeyAction::ShowView(View::Predict));
        h.key(KeyAction::SizeUp);
        h.key(KeyAction::Submit);
        assert!(h.app.predicting);
        h.pump();
        let outcome = h.app.prediction.as_ref().unwrap();
        assert_eq!(outcome.top.label, "O(n log n)");
        assert_eq!(outcome.request.n, 1000);
        assert_eq!(outcome.curve.len(), 6);
        assert!(outcome.curve.at(400).unwrap() < 3.0);
        assert!(outcome.curve.at(800).unwrap() > 3.0);
    }

    #[test]
    fn stale_prediction_dropped() {
        let prediction = PredictionResult {
            predicted_class: "O(n)".into(),
            class_probabilities: [("O(n)".to_string(), 1.0)].into_iter().collect(),
            predicted_runtime_ms: 1.0,
        };
        let mut h = Harness::new(scripted().with_prediction(prediction));
        h.key(KeyAction::ShowView(View::Predict));
        h.key(KeyAction::Submit);
        let stale = h.app.take_commands();
        h.key(KeyAction::NextDistribution);
        assert!(!h.app.predicting);
        for command in stale {
            h.worker.execute(command);
        }
        h.app.update();
        assert!(h.app.prediction.is_none());
    }

    #[test]
    fn training_runs_once_at_a_time() {
        let report = TrainReport {
            status: "trained".into(),
            trained_on_samples: 50,
            accuracy: 0.8,
            runtime_mae_ms: 0.1,
        };
        let mut h = Harness::new(scripted().with_train_report(report.clone()));
        h.key(KeyAction::Train);
        h.key(KeyAction::Train);
        assert_eq!(h.app.take_commands(), vec![Command::Train]);
        h.worker.execute(Command::Train);
        h.app.update();
        assert!(!h.app.training);
        assert_eq!(h.app.train, Some(report));
    }

    #[test]
    fn quit_and_resize() {
        let mut h = Harness::new(scripted());
        h.app.handle_message(TuiMessage::Resize {
            width: 120,
            height: 40,
        });
        assert_eq!((h.app.terminal_width, h.app.terminal_height), (120, 40));
        h.key(KeyAction::Quit);
        assert!(h.app.should_quit);
    }

    #[test]
    fn options_are_clamped() {
        let (_tx, rx) = unbounded();
        let options = TuiOptions {
            api_url: "http://backend:9000".into(),
            run: RunForm {
                algorithm: "merge_sort".into(),
                size: 1,
                distribution: Distribution::Reverse,
                speed: 1000,
            },
        };
        let app = TuiApp::new(rx, options).unwrap();
        assert_eq!(app.form.size, sortviz_core::constants::MIN_ARRAY_SIZE);
        assert_eq!(app.playback().speed(), sortviz_core::constants::MAX_SPEED);
        assert_eq!(app.predict_form.distribution, Distribution::Reverse);
    }

    #[test]
    fn renders_every_view() {
        let mut h = Harness::new(scripted().with_history(vec![record(1, "merge_sort")]));
        h.key(KeyAction::Submit);
        h.key(KeyAction::Compare);
        h.pump();
        let content = screen(&h.app);
        assert!(content.contains("Controls"));
        assert!(content.contains("Comparison"));
        assert!(content.contains("Average"));
        assert!(content.contains("O(n log n)"));
        assert!(content.contains("Quick Sort"));

        h.key(KeyAction::ShowView(View::Data));
        h.pump();
        assert!(screen(&h.app).contains("Recent runs"));

        h.key(KeyAction::ShowView(View::Predict));
        assert!(screen(&h.app).contains("Projected runtime"));
    }
}
