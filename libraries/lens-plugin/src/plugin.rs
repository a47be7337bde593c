//! Plugin assembly and the context-menu entry point.

use lens_annotate::dom::HostDocument;
use lens_annotate::{AnnotationPipeline, ExtractionRules, RowAnnotator};
use lens_core::clock::SystemClock;
use lens_core::traits::{
    ContextMenuHost, NoticeLevel, Notifier, PlaylistPicker, PlaylistSource, PlaylistWriter,
};
use lens_core::types::{PlaylistRef, TrackId};
use lens_core::{LensConfig, LensError, LifecycleScope, Result};
use lens_membership::{AddOutcome, MembershipResolver, PlaylistAdder, RecentOverrides};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The host-provided capability set the plugin is assembled from.
pub struct HostEnv<D, S, W> {
    /// The rendered document the rows live in
    pub document: Arc<D>,
    /// Read-side state snapshot and item fetches
    pub source: Arc<S>,
    /// Write-side add-to-playlist action
    pub writer: Arc<W>,
    /// Context-menu surface
    pub menu: Arc<dyn ContextMenuHost>,
    /// Toast surface
    pub notifier: Arc<dyn Notifier>,
    /// Playlist selection modal
    pub picker: Arc<dyn PlaylistPicker>,
}

/// A loaded Playlist Lens plugin instance.
///
/// Owns the resolver, overlay, and orchestrator; the row pipeline runs in
/// the background until the host disposes the lifecycle scope. Public entry
/// points never let an internal error escape into the host.
pub struct Plugin<D, S, W> {
    source: Arc<S>,
    resolver: Arc<MembershipResolver<S>>,
    overrides: Arc<RecentOverrides>,
    adder: PlaylistAdder<S, W>,
    menu: Arc<dyn ContextMenuHost>,
    notifier: Arc<dyn Notifier>,
    picker: Arc<dyn PlaylistPicker>,
    scope: Arc<LifecycleScope>,
    _document: std::marker::PhantomData<D>,
}

impl<D, S, W> Plugin<D, S, W>
where
    D: HostDocument,
    S: PlaylistSource + 'static,
    W: PlaylistWriter,
{
    /// Assemble the plugin and start the row annotation pipeline.
    pub fn load(env: HostEnv<D, S, W>, config: LensConfig) -> Self {
        let resolver = Arc::new(MembershipResolver::new(
            Arc::clone(&env.source),
            config.concurrency_limit,
        ));
        let overrides = Arc::new(RecentOverrides::new(
            Arc::new(SystemClock),
            config.override_ttl(),
        ));
        let adder = PlaylistAdder::new(
            Arc::clone(&env.writer),
            Arc::clone(&resolver),
            Arc::clone(&overrides),
        );

        let scope = Arc::new(LifecycleScope::new());
        let annotator = Arc::new(RowAnnotator::new(
            Arc::clone(&resolver),
            Arc::clone(&overrides),
            ExtractionRules::from_config(&config),
        ));
        let pipeline = AnnotationPipeline::new(
            Arc::clone(&env.document),
            annotator,
            config.row_selector.clone(),
            config.rescan_interval(),
        );
        pipeline.start(&scope);

        info!(scope = %scope.id(), "Playlist Lens loaded");

        Self {
            source: env.source,
            resolver,
            overrides,
            adder,
            menu: env.menu,
            notifier: env.notifier,
            picker: env.picker,
            scope,
            _document: std::marker::PhantomData,
        }
    }

    /// The lifecycle scope the host disposes on unload
    pub fn scope(&self) -> Arc<LifecycleScope> {
        Arc::clone(&self.scope)
    }

    /// The membership resolver (exposed for host-side display glue)
    pub fn resolver(&self) -> &Arc<MembershipResolver<S>> {
        &self.resolver
    }

    /// The recent-add overlay (exposed for host-side display glue)
    pub fn overrides(&self) -> &Arc<RecentOverrides> {
        &self.overrides
    }

    /// Stop the watcher and rescan; in-flight lookups settle on their own.
    pub fn unload(&self) {
        self.scope.dispose();
        info!(scope = %self.scope.id(), "Playlist Lens unloaded");
    }

    /// Context-menu click handler for "Add to playlists...".
    ///
    /// Runs the picker and the orchestrator, reports the aggregate outcome,
    /// and closes the menu. This is the plugin's outermost boundary: every
    /// failure is logged and converted into a user notice, never propagated
    /// into the host.
    pub async fn handle_add_to_playlists(&self, track: TrackId) {
        match self.add_flow(&track).await {
            Ok(()) => {}
            Err(LensError::EmptySelection) => {
                self.notifier
                    .notify(NoticeLevel::Warning, "Select at least one playlist");
            }
            Err(e) => {
                error!(track = %track, error = %e, "Add to playlists failed");
                self.notifier
                    .notify(NoticeLevel::Warning, "Could not add track to playlists");
            }
        }
        self.menu.close_menu();
    }

    async fn add_flow(&self, track: &TrackId) -> Result<()> {
        let Some(user) = self.source.current_user().await? else {
            warn!("No current user, refusing playlist add");
            self.notifier
                .notify(NoticeLevel::Warning, "Sign in to use playlists");
            return Ok(());
        };

        // Only the user's own playlists are offered as targets.
        let playlists = self.source.playlists().await?;
        let own: Vec<_> = playlists
            .into_iter()
            .filter(|p| p.is_owned_by(&user))
            .collect();

        let picked = self.picker.pick(&own).await?;
        let targets: Vec<PlaylistRef> = picked
            .into_iter()
            .map(|uuid| {
                own.iter()
                    .find(|p| p.uuid == uuid)
                    .map(|p| p.to_ref())
                    .unwrap_or_else(|| PlaylistRef::new(uuid.clone(), uuid.as_str()))
            })
            .collect();

        let report = self.adder.add_to_playlists(track, &targets).await?;
        let level = match report.outcome() {
            AddOutcome::Full => NoticeLevel::Info,
            AddOutcome::Partial | AddOutcome::TotalFailure => NoticeLevel::Warning,
        };
        self.notifier.notify(level, &report.message());
        Ok(())
    }
}
