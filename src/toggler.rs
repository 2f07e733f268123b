//! The orchestrator that ties discovery, classification, geometry, state,
//! and application together.
//!
//! [`LayoutToggler`] reacts to one CLI invocation: it queries the
//! [`MonitorSource`], classifies the result, computes placements, hands
//! them to the [`LayoutSink`], and (for toggling layouts) flips the
//! persisted bit in the [`StateStore`].
//!
//! Error handling follows a strict one-shot policy: every external call is
//! attempted exactly once and any failure ends the invocation.  Once the
//! sink has applied a batch there is no compensating action — a later
//! failure (say, writing the state file) leaves the new layout in place
//! and reports the error.

use crate::config::Config;
use crate::layout::{arrange, LayoutMode, Placement, SecondaryPosition};
use crate::monitor::{classify, ClassifyError, Monitor, PixelMode};
use crate::traits::{LayoutSink, MonitorSource, StateStore};
use log::{debug, info, warn};

/// Possible errors from a toggler run.  Every variant maps to exit code 1.
#[derive(Debug, thiserror::Error)]
pub enum TogglerError {
    /// Monitor discovery failed (socket unavailable, bad JSON, …).
    #[error("monitor discovery failed: {0}")]
    Source(String),

    /// The reconfiguration request failed or was refused.
    #[error("layout application failed: {0}")]
    Sink(String),

    /// Discovery returned an empty list.
    #[error("no monitors found")]
    NoMonitors,

    /// The configured primary is absent.  A degraded fallback layout has
    /// already been applied when this is returned.
    #[error("configured primary monitor {0:?} not found")]
    PrimaryNotFound(String),

    /// A managed monitor is missing mode fields.  Whatever could still be
    /// configured has been configured when this is returned.
    #[error("incomplete descriptor for monitor {0:?}")]
    IncompleteDescriptor(String),

    /// The state store failed.
    #[error("state store error: {0}")]
    State(String),
}

/// A classified two-monitor pair with complete modes, borrowed from the
/// discovery list.
struct Pair<'a> {
    primary: &'a Monitor,
    primary_mode: &'a PixelMode,
    secondary: &'a Monitor,
    secondary_mode: &'a PixelMode,
}

/// Outcome of resolving the discovery list down to something arrangeable.
enum Resolved<'a> {
    /// Two complete monitors; nothing has been applied yet.
    Pair(Pair<'a>),
    /// Only one monitor exists; it has already been placed at the origin.
    SingleDone,
}

/// Orchestrates one layout invocation.
///
/// The toggler is generic over the backend and store implementations,
/// making it completely independent of Hyprland and the filesystem.
///
/// # Typical usage
///
/// ```ignore
/// let toggler = LayoutToggler::new(HyprlandBackend::new(), store, config);
/// toggler.toggle(LayoutMode::Horizontal)?;
/// ```
pub struct LayoutToggler<B, S> {
    backend: B,
    store: S,
    config: Config,
}

impl<B, S> LayoutToggler<B, S>
where
    B: MonitorSource + LayoutSink,
    S: StateStore,
{
    pub fn new(backend: B, store: S, config: Config) -> Self {
        Self {
            backend,
            store,
            config,
        }
    }

    /// Alternate the layout on `mode`'s axis.
    ///
    /// Reads the persisted state (secondary-first when unset), applies the
    /// arrangement it names, then persists the flipped state.  Two
    /// consecutive toggles return the machine to where it started.
    pub fn toggle(&self, mode: LayoutMode) -> Result<(), TogglerError> {
        let monitors = self.discover()?;
        let pair = match self.resolve(&monitors)? {
            Resolved::Pair(pair) => pair,
            Resolved::SingleDone => return Ok(()),
        };

        let state = self
            .store
            .get(mode)
            .map_err(|e| TogglerError::State(e.to_string()))?;
        let position = state.position(mode);
        info!(
            "toggling {}: secondary {} goes {} of primary {}",
            mode.key(),
            pair.secondary.name,
            position,
            pair.primary.name
        );

        self.apply_pair(&pair, position)?;

        self.store
            .set(mode, state.flipped())
            .map_err(|e| TogglerError::State(e.to_string()))?;
        Ok(())
    }

    /// Place the secondary at a fixed position relative to the primary.
    ///
    /// Stateless: no toggle bit is read or written, so repeated invocations
    /// with an unchanged monitor set are idempotent.
    pub fn place(&self, position: SecondaryPosition) -> Result<(), TogglerError> {
        let monitors = self.discover()?;
        let pair = match self.resolve(&monitors)? {
            Resolved::Pair(pair) => pair,
            Resolved::SingleDone => return Ok(()),
        };

        info!(
            "placing secondary {} {} of primary {}",
            pair.secondary.name, position, pair.primary.name
        );
        self.apply_pair(&pair, position)
    }

    fn discover(&self) -> Result<Vec<Monitor>, TogglerError> {
        let monitors = self
            .backend
            .monitors()
            .map_err(|e| TogglerError::Source(e.to_string()))?;
        debug!("discovered {} monitor(s)", monitors.len());
        Ok(monitors)
    }

    /// Classify the discovery list and handle every degraded path.
    ///
    /// Fallback layouts are applied *here*, so callers that receive an
    /// error know the best-effort configuration already happened.
    fn resolve<'a>(&self, monitors: &'a [Monitor]) -> Result<Resolved<'a>, TogglerError> {
        let roles = match classify(
            monitors,
            self.config.primary.as_deref(),
            &self.config.primary_pattern,
        ) {
            Ok(roles) => roles,
            Err(ClassifyError::NoMonitors) => return Err(TogglerError::NoMonitors),
            Err(ClassifyError::PrimaryNotFound(name)) => {
                // Best effort: put the first discovered display at the
                // origin with its preferred mode so the session stays
                // usable, then report the failure.
                warn!("primary {:?} not found, applying fallback layout", name);
                self.apply(&[Placement::preferred(&monitors[0].name)])?;
                return Err(TogglerError::PrimaryNotFound(name));
            }
        };

        let primary = roles.primary;
        let Some(primary_mode) = primary.mode.as_ref() else {
            warn!(
                "primary {} has no usable mode, applying fallback layout",
                primary.name
            );
            self.apply(&[Placement::preferred(&primary.name)])?;
            return Err(TogglerError::IncompleteDescriptor(primary.name.clone()));
        };

        let Some(secondary) = roles.secondary else {
            info!("single monitor {}, placing at origin", primary.name);
            self.apply(&[Placement::at(primary, primary_mode, 0, 0)])?;
            return Ok(Resolved::SingleDone);
        };

        let Some(secondary_mode) = secondary.mode.as_ref() else {
            warn!(
                "secondary {} has no usable mode, configuring primary only",
                secondary.name
            );
            self.apply(&[Placement::at(primary, primary_mode, 0, 0)])?;
            return Err(TogglerError::IncompleteDescriptor(secondary.name.clone()));
        };

        Ok(Resolved::Pair(Pair {
            primary,
            primary_mode,
            secondary,
            secondary_mode,
        }))
    }

    fn apply_pair(&self, pair: &Pair<'_>, position: SecondaryPosition) -> Result<(), TogglerError> {
        let placements = arrange(
            pair.primary,
            pair.primary_mode,
            pair.secondary,
            pair.secondary_mode,
            position,
        );
        self.apply(&placements)
    }

    fn apply(&self, placements: &[Placement]) -> Result<(), TogglerError> {
        self.backend
            .apply(placements)
            .map_err(|e| TogglerError::Sink(e.to_string()))
    }
}
