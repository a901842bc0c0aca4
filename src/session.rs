//! Latest-wins orchestration of coverage requests from a drawing canvas.
//!
//! The canvas reports the perimeter in pixels and may ask for a new report
//! on every edit. A [`CoverageSession`] stamps each request with a version so
//! a slow computation for an old drawing cannot overwrite the report for a
//! newer one:
//!
//! ```
//! use gridcover::{CoverageSession, CoverageSettings, Point2};
//!
//! let mut session = CoverageSession::new(CoverageSettings::default()).unwrap();
//! let square_px = [
//!     Point2::new(0.0, 0.0),
//!     Point2::new(50.0, 0.0),
//!     Point2::new(50.0, 30.0),
//!     Point2::new(0.0, 30.0),
//! ];
//!
//! let old = session.request(&square_px, 5.0);
//! let new = session.request(&square_px, 5.0);
//!
//! assert!(session.accept(new.run()));
//! assert!(!session.accept(old.run()));
//! assert_eq!(session.latest().unwrap().full_count, 4);
//! ```

use crate::bounds::Aabb2;
use crate::coverage::{compute_coverage, CoverageReport};
use crate::error::CoverageError;
use crate::grid::GridSpec;
use crate::primitives::Point2;
use crate::settings::{CoverageSettings, SettingsError};
use thiserror::Error;
use tracing::{debug, warn};

/// Canvas scale used when the drawing surface does not say otherwise.
pub const DEFAULT_PIXELS_PER_METER: f64 = 5.0;

/// Errors from a session request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Coverage(#[from] CoverageError),

    /// The perimeter's bounding box is wider or taller than the configured cap.
    #[error("perimeter spans {extent} m, more than the {max} m limit")]
    GridTooLarge { extent: f64, max: f64 },

    #[error("invalid canvas scale: {0} px per meter")]
    InvalidScale(f64),
}

/// Result of running one [`CoverageRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    pub version: u64,
    pub outcome: Result<CoverageReport, SessionError>,
}

/// A versioned, self-contained coverage job.
///
/// Owns copies of everything it needs, so it can be moved to a worker thread
/// while the session keeps accepting edits.
#[derive(Debug, Clone)]
pub struct CoverageRequest {
    version: u64,
    points_px: Vec<Point2<f64>>,
    pixels_per_meter: f64,
    grid: GridSpec,
    max_extent_m: f64,
}

impl CoverageRequest {
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Converts the perimeter to meters, checks its extent and computes coverage.
    pub fn run(self) -> Computation {
        Computation {
            version: self.version,
            outcome: self.compute(),
        }
    }

    fn compute(&self) -> Result<CoverageReport, SessionError> {
        let scale = self.pixels_per_meter;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(SessionError::InvalidScale(scale));
        }

        let points: Vec<Point2<f64>> = self
            .points_px
            .iter()
            .map(|p| Point2::new(p.x / scale, p.y / scale))
            .collect();

        // Non-finite input is left for the engine to report by index.
        if points.iter().all(|p| p.is_finite()) {
            if let Some(bbox) = Aabb2::from_points(points.iter().copied()) {
                let extent = bbox.width().max(bbox.height());
                if extent > self.max_extent_m {
                    return Err(SessionError::GridTooLarge {
                        extent,
                        max: self.max_extent_m,
                    });
                }
            }
        }

        Ok(compute_coverage(&points, &self.grid)?)
    }
}

/// Tracks the most recent coverage report for one drawing.
#[derive(Debug, Clone)]
pub struct CoverageSession {
    settings: CoverageSettings,
    grid: GridSpec,
    version: u64,
    latest: Option<CoverageReport>,
}

impl CoverageSession {
    /// Creates a session on the standard greenhouse grid.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::OutOfRange`] if `settings` fails
    /// [`CoverageSettings::validate`].
    pub fn new(settings: CoverageSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings,
            grid: GridSpec::greenhouse(),
            version: 0,
            latest: None,
        })
    }

    /// Uses a different grid for subsequent requests.
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    #[inline]
    pub fn settings(&self) -> &CoverageSettings {
        &self.settings
    }

    #[inline]
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Version of the newest request issued so far.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Issues a request for a perimeter drawn in canvas pixels.
    ///
    /// Every call supersedes all earlier requests.
    pub fn request(&mut self, points_px: &[Point2<f64>], pixels_per_meter: f64) -> CoverageRequest {
        self.version += 1;
        debug!(version = self.version, vertices = points_px.len(), "coverage requested");
        CoverageRequest {
            version: self.version,
            points_px: points_px.to_vec(),
            pixels_per_meter,
            grid: self.grid,
            max_extent_m: self.settings.max_grid_extent_m,
        }
    }

    /// Issues a request and runs it on the calling thread.
    pub fn submit(&mut self, points_px: &[Point2<f64>], pixels_per_meter: f64) -> Computation {
        self.request(points_px, pixels_per_meter).run()
    }

    /// Stores a computation if it answers the newest request.
    ///
    /// Returns `false` and leaves the session untouched for stale results.
    /// A fresh failure clears the stored report, since it no longer
    /// describes the current drawing.
    pub fn accept(&mut self, computation: Computation) -> bool {
        if computation.version != self.version {
            debug!(
                version = computation.version,
                current = self.version,
                "discarding stale coverage result"
            );
            return false;
        }

        match computation.outcome {
            Ok(report) => self.latest = Some(report),
            Err(err) => {
                warn!(version = computation.version, error = %err, "coverage request rejected");
                self.latest = None;
            }
        }
        true
    }

    /// The most recently accepted report.
    #[inline]
    pub fn latest(&self) -> Option<&CoverageReport> {
        self.latest.as_ref()
    }
}

impl Default for CoverageSession {
    fn default() -> Self {
        Self {
            settings: CoverageSettings::default(),
            grid: GridSpec::greenhouse(),
            version: 0,
            latest: None,
        }
    }
}
