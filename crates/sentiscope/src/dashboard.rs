#![forbid(unsafe_code)]

//! The dashboard state container.
//!
//! [`Dashboard`] owns all session state (posts, metric, selection) and
//! changes it only through [`Dashboard::update`], which takes a [`Msg`] and
//! returns a [`Cmd`] describing any side effect the host should perform.
//! [`Dashboard::run`] is a synchronous host that performs those effects
//! itself (file reads through `std::fs`).
//!
//! Every state change rebuilds the scene from scratch. The layout is cached
//! and recomputed only when the posts change, so switching metric or
//! toggling a selection never moves a circle.
//!
//! # Loading
//!
//! Each `OpenFile` gets a fresh load id. Only the newest load is honored: a
//! `FileRead` carrying an older id is dropped, so a slow read finishing late
//! cannot overwrite the posts of a newer one. A failed load leaves every
//! piece of state as it was and raises a [`Notice::Error`].

use std::path::PathBuf;

use sentiscope_core::{CoreError, Dataset, LoadReport, Metric, PostId, SelectionSet, Toggle};
use sentiscope_layout::{Layout, compute_layout};
use sentiscope_render::{DetailList, HtmlExporter, LegendView, Scene, render_scene};

use crate::config::DashboardConfig;

/// Identifies one file load.
pub type LoadId = u64;

#[derive(Debug)]
pub enum Msg {
    /// Start loading posts from a file.
    OpenFile(PathBuf),
    /// A file read finished.
    FileRead {
        load_id: LoadId,
        result: std::io::Result<String>,
    },
    /// Load posts from an in-memory JSON document.
    LoadJson(String),
    SetMetric(Metric),
    /// Pointer press at surface coordinates.
    Click { x: f64, y: f64 },
    /// Toggle a post by id, as from the detail list.
    ToggleSelection(PostId),
    ClearSelection,
}

/// Something the user must be told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A load failed; nothing changed.
    Error(String),
    /// A load succeeded but some posts were left out.
    Warning(String),
}

/// Side effect requested by [`Dashboard::update`].
#[derive(Debug, Default, PartialEq)]
pub enum Cmd {
    #[default]
    None,
    /// Read `path` to a string and answer with [`Msg::FileRead`].
    ReadFile { path: PathBuf, load_id: LoadId },
    /// Show a blocking notification.
    Notify(Notice),
    /// Run several commands in order.
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Batch `cmds`, dropping no-ops and unwrapping a single command.
    #[must_use]
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Posts, metric, and selection for one session, plus the derived layout
/// and scene.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    dataset: Option<Dataset>,
    metric: Metric,
    selection: SelectionSet,
    layout: Option<Layout>,
    scene: Option<Scene>,
    last_report: Option<LoadReport>,
    pending_load: Option<LoadId>,
    next_load_id: LoadId,
    layout_generation: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl Dashboard {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            metric: config.metric,
            config,
            dataset: None,
            selection: SelectionSet::new(),
            layout: None,
            scene: None,
            last_report: None,
            pending_load: None,
            next_load_id: 0,
            layout_generation: 0,
        }
    }

    /// Apply one message and return the effect it asks for.
    pub fn update(&mut self, msg: Msg) -> Cmd {
        match msg {
            Msg::OpenFile(path) => {
                self.next_load_id += 1;
                let load_id = self.next_load_id;
                if let Some(previous) = self.pending_load.replace(load_id) {
                    tracing::debug!(previous, load_id, "superseding pending load");
                }
                tracing::debug!(path = %path.display(), load_id, "opening file");
                Cmd::ReadFile { path, load_id }
            }
            Msg::FileRead { load_id, result } => {
                if self.pending_load != Some(load_id) {
                    tracing::debug!(load_id, "ignoring stale file read");
                    return Cmd::None;
                }
                self.pending_load = None;
                match result {
                    Ok(contents) => self.load_json(&contents),
                    Err(error) => Self::load_failed(&CoreError::Io(error)),
                }
            }
            Msg::LoadJson(contents) => self.load_json(&contents),
            Msg::SetMetric(metric) => {
                if metric != self.metric {
                    self.metric = metric;
                    self.redraw();
                }
                Cmd::None
            }
            Msg::Click { x, y } => {
                let hit = self
                    .scene
                    .as_ref()
                    .and_then(|scene| scene.hit_test(x, y))
                    .cloned();
                match hit {
                    Some(idx) => self.toggle(&idx),
                    None => tracing::trace!(x, y, "click missed every post"),
                }
                Cmd::None
            }
            Msg::ToggleSelection(idx) => {
                self.toggle(&idx);
                Cmd::None
            }
            Msg::ClearSelection => {
                if !self.selection.is_empty() {
                    self.selection.clear();
                    self.redraw();
                }
                Cmd::None
            }
        }
    }

    /// Apply `msg` and carry out every resulting command synchronously.
    ///
    /// Returns the notices raised along the way.
    pub fn run(&mut self, msg: Msg) -> Vec<Notice> {
        let mut notices = Vec::new();
        let mut queue = vec![self.update(msg)];
        while let Some(cmd) = queue.pop() {
            match cmd {
                Cmd::None => {}
                Cmd::ReadFile { path, load_id } => {
                    let result = std::fs::read_to_string(&path);
                    queue.push(self.update(Msg::FileRead { load_id, result }));
                }
                Cmd::Notify(notice) => notices.push(notice),
                // Reversed so the stack pops them in order.
                Cmd::Batch(cmds) => queue.extend(cmds.into_iter().rev()),
            }
        }
        notices
    }

    fn load_json(&mut self, contents: &str) -> Cmd {
        match Dataset::from_json_str(contents) {
            Ok((dataset, report)) => self.install(dataset, report),
            Err(error) => Self::load_failed(&error),
        }
    }

    fn load_failed(error: &CoreError) -> Cmd {
        tracing::warn!(%error, "load failed; keeping current posts");
        Cmd::Notify(Notice::Error(error.to_string()))
    }

    fn install(&mut self, dataset: Dataset, report: LoadReport) -> Cmd {
        let layout = compute_layout(dataset.posts(), &self.config.layout_config());
        self.layout_generation += 1;

        let dropped = self.selection.retain_present(&dataset);
        if dropped > 0 {
            tracing::info!(dropped, "selection entries no longer present were dropped");
        }

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "posts loaded"
        );
        let skipped = if report.is_clean() {
            Cmd::None
        } else {
            Cmd::Notify(Notice::Warning(format!(
                "{} of {} posts were skipped",
                report.skipped.len(),
                report.total
            )))
        };
        let deselected = if dropped > 0 {
            Cmd::Notify(Notice::Warning(format!(
                "{dropped} selected posts are no longer loaded"
            )))
        } else {
            Cmd::None
        };
        let cmd = Cmd::batch(vec![skipped, deselected]);

        self.dataset = Some(dataset);
        self.layout = Some(layout);
        self.last_report = Some(report);
        self.redraw();
        cmd
    }

    fn toggle(&mut self, idx: &PostId) {
        let toggled = match self.dataset.as_ref().and_then(|d| d.get(idx)) {
            Some(post) => Some(self.selection.toggle(post)),
            None => self.selection.remove(idx).then_some(Toggle::Deselected),
        };
        match toggled {
            Some(state) => {
                tracing::debug!(%idx, ?state, "selection toggled");
                self.redraw();
            }
            None => tracing::debug!(%idx, "toggle for unknown post ignored"),
        }
    }

    fn redraw(&mut self) {
        self.scene = match (&self.dataset, &self.layout) {
            (Some(dataset), Some(layout)) => Some(render_scene(
                dataset,
                layout,
                self.metric,
                &self.selection,
                &self.config.scene,
            )),
            _ => None,
        };
    }

    // --- Views ---

    /// Current plot scene; `None` until posts have been loaded.
    #[must_use]
    pub fn view(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    #[must_use]
    pub fn legend(&self) -> LegendView {
        LegendView::new(self.metric)
    }

    #[must_use]
    pub fn detail_list(&self) -> DetailList {
        DetailList::from_selection(&self.selection)
    }

    /// Whole dashboard as a standalone HTML page.
    #[must_use]
    pub fn render_html(&self) -> String {
        HtmlExporter::with_title(self.config.title.clone()).export(
            self.view(),
            &self.legend(),
            &self.detail_list(),
        )
    }

    // --- Accessors ---

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    #[must_use]
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Report of the most recent successful load.
    #[must_use]
    pub fn last_report(&self) -> Option<&LoadReport> {
        self.last_report.as_ref()
    }

    /// Whether a file read has been requested and not yet answered.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Number of times the layout has been computed.
    #[must_use]
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }
}
