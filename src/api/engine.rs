use std::rc::Rc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::core::{StepCollection, Viewport, ViewportController};
use crate::error::TimelineResult;
use crate::extensions::TimelinePlugin;
use crate::interaction::{
    DragResizeController, HeadlessHost, InteractionHost, InteractionMode, InteractionSession,
    InteractionState, PanController, ZoomController,
};
use crate::layout::{LayoutConfig, TrackCache};
use crate::render::{Renderer, TimelineTheme};
use crate::sync::{ErrorReporter, OptimisticSyncCoordinator, StepStore};

use super::TimelineEngineConfig;

/// Main orchestration facade consumed by host applications.
///
/// `TimelineEngine` owns the viewport state, the local step copy, the track
/// cache and the interaction state machines. The host feeds it pointer input
/// and animation frames and decides when to lay out and render.
pub struct TimelineEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) viewport_controller: ViewportController,
    pub(super) layout_config: LayoutConfig,
    pub(super) theme: TimelineTheme,
    pub(super) center: DateTime<Utc>,
    pub(super) pixel_width: f64,
    pub(super) deferred_pixel_width: Option<f64>,
    pub(super) viewport: Viewport,
    pub(super) zoom: ZoomController,
    pub(super) pan: PanController,
    pub(super) edit: DragResizeController,
    pub(super) interaction: InteractionState,
    pub(super) session: InteractionSession,
    pub(super) host: Box<dyn InteractionHost>,
    pub(super) steps: StepCollection,
    pub(super) track_cache: TrackCache,
    pub(super) sync: OptimisticSyncCoordinator,
    pub(super) plugins: Vec<Box<dyn TimelinePlugin>>,
}

impl<R: Renderer> TimelineEngine<R> {
    pub fn new(
        renderer: R,
        config: TimelineEngineConfig,
        store: Rc<dyn StepStore>,
    ) -> TimelineResult<Self> {
        let config = config.validate()?;
        let viewport_controller = ViewportController::new(config.viewport);
        let zoom = ZoomController::new(config.zoom);
        let viewport =
            viewport_controller.compute_window(config.center, zoom.level(), config.pixel_width)?;
        debug!(
            start = %viewport.start,
            end = %viewport.end,
            pixel_width = config.pixel_width,
            "timeline engine init"
        );

        Ok(Self {
            renderer,
            viewport_controller,
            layout_config: config.layout,
            theme: TimelineTheme::default(),
            center: config.center,
            pixel_width: config.pixel_width,
            deferred_pixel_width: None,
            viewport,
            zoom,
            pan: PanController::new(config.pan),
            edit: DragResizeController::new(config.layout.min_width),
            interaction: InteractionState::default(),
            session: InteractionSession::default(),
            host: Box::new(HeadlessHost::default()),
            steps: StepCollection::default(),
            track_cache: TrackCache::new(),
            sync: OptimisticSyncCoordinator::new(store).with_policy(config.rollback_policy),
            plugins: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_host(mut self, host: Box<dyn InteractionHost>) -> Self {
        self.teardown();
        self.host = host;
        self
    }

    #[must_use]
    pub fn with_error_reporter(mut self, reporter: Rc<dyn ErrorReporter>) -> Self {
        self.sync = self.sync.clone().with_reporter(reporter);
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: TimelineTheme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn layout_config(&self) -> LayoutConfig {
        self.layout_config
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    #[must_use]
    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    #[must_use]
    pub fn steps(&self) -> &StepCollection {
        &self.steps
    }

    #[must_use]
    pub fn track_cache(&self) -> &TrackCache {
        &self.track_cache
    }

    /// Persistence calls started by this engine that have not resolved yet.
    #[must_use]
    pub fn pending_syncs(&self) -> usize {
        self.sync.in_flight()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}

impl<R: Renderer> Drop for TimelineEngine<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}
