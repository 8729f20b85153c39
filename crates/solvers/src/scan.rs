//! Multi-root scan by windowed bisection.
//!
//! The parent interval is walked in overlapping windows (width `w`, stepped
//! by `w / 2`, the last window clipped to the parent). Every window whose
//! endpoints show a strict sign change is solved by [`bisection`], and roots
//! that agree within the duplicate tolerance are reported once.
//!
//! The scan is best-effort. It misses roots of even multiplicity (no sign
//! change), roots that land exactly on a window endpoint, and pairs of roots
//! closer together than a window. Windows that cannot be evaluated or solved
//! are listed in [`ScanReport::skipped`] instead of being dropped.
//!
//! [`bisection`]: crate::bisection

use algebrify_core::Function;
use thiserror::Error;

use crate::{
    BracketError, Config, Error, Solution,
    bisection::{self, Iteration},
    bracket::Bounds,
    evaluate::evaluate,
};

/// Window layout and duplicate detection for [`scan`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawScanConfig")
)]
pub struct ScanConfig {
    window: f64,
    rel_tol: f64,
    max_windows: usize,
}

#[cfg(feature = "serde-derive")]
#[derive(serde::Deserialize)]
struct RawScanConfig {
    window: f64,
    rel_tol: f64,
    max_windows: usize,
}

#[cfg(feature = "serde-derive")]
impl TryFrom<RawScanConfig> for ScanConfig {
    type Error = ScanConfigError;

    fn try_from(raw: RawScanConfig) -> Result<Self, Self::Error> {
        Self::new(raw.window, raw.rel_tol, raw.max_windows)
    }
}

/// Errors from validating a [`ScanConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScanConfigError {
    #[error("window width must be finite and positive, got {value}")]
    Window { value: f64 },

    #[error("duplicate tolerance must be finite and non-negative, got {value}")]
    RelTol { value: f64 },

    #[error("window limit must be at least 1")]
    MaxWindows,
}

/// Errors that prevent a scan from starting.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScanError {
    #[error("invalid interval: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("interval needs {needed} windows, more than the limit of {limit}")]
    TooManyWindows { needed: f64, limit: usize },
}

impl Default for ScanConfig {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1.0, 1e-5, 10_000).unwrap()
    }
}

impl ScanConfig {
    /// Creates a new scan config.
    ///
    /// # Errors
    ///
    /// Returns an error if `window` is not finite and positive, if `rel_tol`
    /// is negative or not finite, or if `max_windows` is zero.
    pub fn new(window: f64, rel_tol: f64, max_windows: usize) -> Result<Self, ScanConfigError> {
        if !window.is_finite() || window <= 0.0 {
            return Err(ScanConfigError::Window { value: window });
        }
        if !rel_tol.is_finite() || rel_tol < 0.0 {
            return Err(ScanConfigError::RelTol { value: rel_tol });
        }
        if max_windows == 0 {
            return Err(ScanConfigError::MaxWindows);
        }

        Ok(Self {
            window,
            rel_tol,
            max_windows,
        })
    }

    /// Returns the window width.
    #[must_use]
    pub fn window(&self) -> f64 {
        self.window
    }

    /// Returns the distance between consecutive window starts.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.window / 2.0
    }

    /// Returns the relative tolerance under which two roots are duplicates.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the maximum number of windows a scan may visit.
    #[must_use]
    pub fn max_windows(&self) -> usize {
        self.max_windows
    }
}

/// A root found in one window.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundRoot {
    pub window: [f64; 2],
    pub solution: Solution<Iteration>,
}

impl FoundRoot {
    /// Returns the root value.
    #[must_use]
    pub fn root(&self) -> f64 {
        self.solution.root
    }
}

/// A window that showed no usable result because of an error.
#[derive(Debug)]
pub struct SkippedWindow {
    pub window: [f64; 2],
    pub error: Error,
}

/// The outcome of a scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Distinct roots, in the order their windows were visited.
    pub roots: Vec<FoundRoot>,

    /// Windows that were skipped because of an error.
    pub skipped: Vec<SkippedWindow>,
}

impl ScanReport {
    /// Returns the root values in ascending window order.
    #[must_use]
    pub fn root_values(&self) -> Vec<f64> {
        self.roots.iter().map(FoundRoot::root).collect()
    }

    fn is_duplicate(&self, root: f64, rel_tol: f64, abs_tol: f64) -> bool {
        self.roots.iter().any(|found| {
            let diff = (found.root() - root).abs();
            diff <= rel_tol * found.root().abs().max(root.abs()) || diff <= abs_tol
        })
    }
}

/// Finds the roots of `f` on `bracket` by bisecting overlapping windows.
///
/// `config` is used for every window's bisection run. Two roots count as the
/// same when they agree within the scan's relative tolerance or within
/// `config.tol()`.
///
/// # Errors
///
/// Returns an error if the parent interval is invalid or would need more
/// windows than the configured limit. Failures inside windows are reported
/// in the [`ScanReport`] instead.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn scan<F: Function>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
    scan_config: &ScanConfig,
) -> Result<ScanReport, ScanError> {
    let Bounds { left, right } = Bounds::new(bracket[0], bracket[1])?;
    let step = scan_config.step();

    let needed = ((right - left) / step).ceil();
    if needed > scan_config.max_windows() as f64 {
        return Err(ScanError::TooManyWindows {
            needed,
            limit: scan_config.max_windows(),
        });
    }

    let mut report = ScanReport::default();
    for k in 0..needed as usize {
        let a = left + k as f64 * step;
        if a >= right {
            break;
        }
        let b = (a + scan_config.window()).min(right);
        let window = [a, b];

        let endpoints = evaluate(f, "f", a).and_then(|fa| evaluate(f, "f", b).map(|fb| (fa, fb)));
        let (fa, fb) = match endpoints {
            Ok(values) => values,
            Err(error) => {
                log::debug!("scan skipped [{a}, {b}]: {error}");
                report.skipped.push(SkippedWindow { window, error });
                continue;
            }
        };
        if fa * fb >= 0.0 {
            continue;
        }

        match bisection::solve_unobserved(f, window, config) {
            Ok(solution) => {
                if report.is_duplicate(solution.root, scan_config.rel_tol(), config.tol()) {
                    log::trace!("scan dropped duplicate root {} in [{a}, {b}]", solution.root);
                    continue;
                }
                log::debug!("scan found root {} in [{a}, {b}]", solution.root);
                report.roots.push(FoundRoot { window, solution });
            }
            Err(failure) => {
                log::debug!("scan skipped [{a}, {b}]: {failure}");
                report.skipped.push(SkippedWindow {
                    window,
                    error: failure.error,
                });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    use algebrify_core::{from_fn, try_from_fn};
    use approx::assert_relative_eq;

    fn config() -> Config {
        Config::new(1e-8, 100).unwrap()
    }

    #[test]
    fn finds_all_cubic_roots() {
        // roots near -2.1149, 0.2541 and 1.8608
        let f = from_fn(|x: f64| x.powi(3) - 4.0 * x + 1.0);
        let report = scan(&f, [-5.0, 5.0], &config(), &ScanConfig::default()).unwrap();

        let roots = report.root_values();
        assert_eq!(roots.len(), 3);
        assert_relative_eq!(roots[0], -2.114_907_541, epsilon = 1e-6);
        assert_relative_eq!(roots[1], 0.254_101_688, epsilon = 1e-6);
        assert_relative_eq!(roots[2], 1.860_805_853, epsilon = 1e-6);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn overlapping_windows_do_not_duplicate() {
        // 0.7 lies in both [0, 1] and [0.5, 1.5]
        let f = from_fn(|x| x - 0.7);
        let report = scan(&f, [0.0, 3.0], &config(), &ScanConfig::default()).unwrap();

        assert_eq!(report.roots.len(), 1);
        assert_relative_eq!(report.roots[0].root(), 0.7, epsilon = 1e-7);
        assert_eq!(report.roots[0].window, [0.0, 1.0]);
    }

    #[cfg(feature = "serde-derive")]
    #[test]
    fn deserializing_validates() {
        let loaded: ScanConfig =
            serde_json::from_str(r#"{"window":0.5,"rel_tol":1e-6,"max_windows":40}"#).unwrap();
        assert_eq!(loaded, ScanConfig::new(0.5, 1e-6, 40).unwrap());

        for json in [
            r#"{"window":0.0,"rel_tol":1e-6,"max_windows":40}"#,
            r#"{"window":0.5,"rel_tol":-1.0,"max_windows":40}"#,
            r#"{"window":0.5,"rel_tol":1e-6,"max_windows":0}"#,
        ] {
            assert!(serde_json::from_str::<ScanConfig>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn even_multiplicity_is_missed() {
        let f = from_fn(|x: f64| (x - 1.3).powi(2));
        let report = scan(&f, [0.0, 3.0], &config(), &ScanConfig::default()).unwrap();
        assert!(report.roots.is_empty());
    }

    #[test]
    fn last_window_is_clipped() {
        // 3.1 is first bracketed by [2.5, 3.5] clipped to [2.5, 3.2]
        let f = from_fn(|x| x - 3.1);
        let report = scan(&f, [2.0, 3.2], &config(), &ScanConfig::default()).unwrap();

        assert_eq!(report.roots.len(), 1);
        assert_eq!(report.roots[0].window, [2.5, 3.2]);
    }

    #[test]
    fn failing_windows_are_reported() {
        // ln is undefined for x <= 0; roots at 1 only
        let f = try_from_fn(|x: f64| {
            if x <= 0.0 {
                Err(std::fmt::Error)
            } else {
                Ok(x.ln())
            }
        });
        let report = scan(&f, [-1.0, 2.0], &config(), &ScanConfig::default()).unwrap();

        assert_eq!(report.root_values().len(), 1);
        assert_relative_eq!(report.roots[0].root(), 1.0, epsilon = 1e-7);

        // windows starting at -1, -0.5 and 0 touch the undefined region
        let skipped: Vec<[f64; 2]> = report.skipped.iter().map(|s| s.window).collect();
        assert_eq!(skipped, vec![[-1.0, 0.0], [-0.5, 0.5], [0.0, 1.0]]);
    }

    #[test]
    fn rejects_bad_intervals() {
        let f = from_fn(|x| x);
        assert!(matches!(
            scan(&f, [1.0, 1.0], &config(), &ScanConfig::default()),
            Err(ScanError::InvalidBracket(BracketError::ZeroWidth { .. }))
        ));

        let small = ScanConfig::new(1.0, 1e-5, 3).unwrap();
        assert!(matches!(
            scan(&f, [0.0, 10.0], &config(), &small),
            Err(ScanError::TooManyWindows { limit: 3, .. })
        ));
    }

    #[test]
    fn config_validation() {
        assert!(matches!(
            ScanConfig::new(0.0, 1e-5, 10),
            Err(ScanConfigError::Window { .. })
        ));
        assert!(matches!(
            ScanConfig::new(1.0, -1.0, 10),
            Err(ScanConfigError::RelTol { .. })
        ));
        assert_eq!(
            ScanConfig::new(1.0, 1e-5, 0),
            Err(ScanConfigError::MaxWindows)
        );
        assert_relative_eq!(ScanConfig::default().step(), 0.5);
    }
}
