//! Touch gesture classification.
//!
//! Classification is stateless: a swipe compares a start and an end snapshot, a pinch compares
//! two snapshots of two simultaneous touch points. [`TouchTracker`] collects those snapshots
//! from a raw touch sequence, sampling intermediate moves through a [`Throttler`].

use crate::Throttler;
use crate::error::{ConfigError, Result};

/// Default minimum swipe distance in pixels.
pub const DEFAULT_SWIPE_MIN_DISTANCE: f32 = 50.0;

/// Default pinch scale above which a pinch reads as zoom-in.
pub const DEFAULT_ZOOM_IN_SCALE: f32 = 1.2;

/// Default pinch scale below which a pinch reads as zoom-out.
pub const DEFAULT_ZOOM_OUT_SCALE: f32 = 0.8;

/// Default sampling window for intermediate touch moves (~60 Hz).
pub const DEFAULT_MOVE_SAMPLE_MS: u64 = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Screen-space swipe direction (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SwipeDirection {
    Right,
    Down,
    Left,
    Up,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoomIntent {
    ZoomIn,
    ZoomOut,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinchGesture {
    /// `current_distance / previous_distance`.
    pub scale: f32,
    /// Midpoint of the two current touch points.
    pub center: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Swipe(SwipeDirection),
    Pinch(PinchGesture),
}

/// Thresholds used by the classifier. All are policy and may be tuned per host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    pub min_swipe_distance: f32,
    pub zoom_in_scale: f32,
    pub zoom_out_scale: f32,
    pub move_sample_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: DEFAULT_SWIPE_MIN_DISTANCE,
            zoom_in_scale: DEFAULT_ZOOM_IN_SCALE,
            zoom_out_scale: DEFAULT_ZOOM_OUT_SCALE,
            move_sample_ms: DEFAULT_MOVE_SAMPLE_MS,
        }
    }
}

impl GestureConfig {
    pub fn with_min_swipe_distance(mut self, px: f32) -> Self {
        self.min_swipe_distance = px;
        self
    }

    pub fn with_zoom_scales(mut self, zoom_in: f32, zoom_out: f32) -> Self {
        self.zoom_in_scale = zoom_in;
        self.zoom_out_scale = zoom_out;
        self
    }

    pub fn with_move_sample_ms(mut self, ms: u64) -> Self {
        self.move_sample_ms = ms;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min_swipe_distance.is_finite() || self.min_swipe_distance < 0.0 {
            return Err(ConfigError::invalid_threshold(
                "min_swipe_distance",
                self.min_swipe_distance,
            ));
        }
        if !self.zoom_out_scale.is_finite() || self.zoom_out_scale <= 0.0 {
            return Err(ConfigError::invalid_threshold(
                "zoom_out_scale",
                self.zoom_out_scale,
            ));
        }
        if !self.zoom_in_scale.is_finite() || self.zoom_in_scale < self.zoom_out_scale {
            return Err(ConfigError::invalid_threshold(
                "zoom_in_scale",
                self.zoom_in_scale,
            ));
        }
        Ok(())
    }

    /// Classifies a single-finger movement. Returns `None` below the distance threshold.
    pub fn classify_swipe(&self, start: Point, end: Point) -> Option<SwipeDirection> {
        classify_swipe(start, end, self.min_swipe_distance)
    }

    pub fn zoom_intent(&self, pinch: &PinchGesture) -> Option<ZoomIntent> {
        if pinch.scale > self.zoom_in_scale {
            Some(ZoomIntent::ZoomIn)
        } else if pinch.scale < self.zoom_out_scale {
            Some(ZoomIntent::ZoomOut)
        } else {
            None
        }
    }
}

/// Buckets the displacement from `start` to `end` into four 90° sectors centred on the axes.
///
/// Sector bounds are half-open: `[-45°, 45°)` is right, `[45°, 135°)` down, `[-135°, -45°)` up,
/// and the rest left.
pub fn classify_swipe(start: Point, end: Point, min_distance: f32) -> Option<SwipeDirection> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let distance = (dx * dx + dy * dy).sqrt();
    if !distance.is_finite() || distance < min_distance || distance == 0.0 {
        return None;
    }
    let angle = dy.atan2(dx).to_degrees();
    let direction = if (-45.0..45.0).contains(&angle) {
        SwipeDirection::Right
    } else if (45.0..135.0).contains(&angle) {
        SwipeDirection::Down
    } else if (-135.0..-45.0).contains(&angle) {
        SwipeDirection::Up
    } else {
        SwipeDirection::Left
    };
    Some(direction)
}

/// Compares two snapshots of a two-finger touch.
///
/// Returns `None` when the previous distance is zero (scale undefined).
pub fn detect_pinch(previous: [Point; 2], current: [Point; 2]) -> Option<PinchGesture> {
    let prev_distance = previous[0].distance_to(previous[1]);
    if !prev_distance.is_finite() || prev_distance <= f32::EPSILON {
        return None;
    }
    let cur_distance = current[0].distance_to(current[1]);
    if !cur_distance.is_finite() {
        return None;
    }
    Some(PinchGesture {
        scale: cur_distance / prev_distance,
        center: current[0].midpoint(current[1]),
    })
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Snapshot {
    One(Point),
    Two([Point; 2]),
}

impl Snapshot {
    fn from_points(points: &[Point]) -> Option<Self> {
        match points {
            [] => None,
            [p] => Some(Self::One(*p)),
            [a, b, ..] => Some(Self::Two([*a, *b])),
        }
    }

    fn same_kind(&self, other: &Snapshot) -> bool {
        matches!(
            (self, other),
            (Self::One(_), Self::One(_)) | (Self::Two(_), Self::Two(_))
        )
    }
}

/// Collects start/latest snapshots of one touch sequence and classifies it on release.
#[derive(Clone, Debug)]
pub struct TouchTracker {
    config: GestureConfig,
    start: Option<Snapshot>,
    latest: Option<Snapshot>,
    sampler: Throttler,
}

impl TouchTracker {
    pub fn new(config: GestureConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            sampler: Throttler::new(config.move_sample_ms),
            config,
            start: None,
            latest: None,
        })
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// Starts a new sequence, discarding any unfinished one.
    pub fn begin(&mut self, points: &[Point], now_ms: u64) {
        let snapshot = Snapshot::from_points(points);
        self.start = snapshot;
        self.latest = snapshot;
        self.sampler.reset();
        self.sampler.try_acquire(now_ms);
    }

    /// Samples an intermediate move. Returns `true` when the move was recorded.
    ///
    /// A second finger arriving mid-sequence restarts it as a pinch.
    pub fn update(&mut self, points: &[Point], now_ms: u64) -> bool {
        let Some(snapshot) = Snapshot::from_points(points) else {
            return false;
        };
        match (self.start, snapshot) {
            (None, _) | (Some(Snapshot::One(_)), Snapshot::Two(_)) => {
                self.begin(points, now_ms);
                true
            }
            (Some(start), snapshot) => {
                // A lifted finger mid-pinch is not a new sequence; keep the last pinch sample.
                if !snapshot.same_kind(&start) || !self.sampler.try_acquire(now_ms) {
                    return false;
                }
                self.latest = Some(snapshot);
                true
            }
        }
    }

    /// Ends the sequence and classifies it.
    ///
    /// `release` is the final touch position when the host has it. When it is empty or carries
    /// a different finger count than the start (e.g. one finger of a pinch lifted first), the
    /// last sampled move is used instead.
    pub fn end(&mut self, release: &[Point]) -> Option<Gesture> {
        let start = self.start.take();
        let sampled = self.latest.take();
        let start = start?;
        let latest = Snapshot::from_points(release)
            .filter(|r| r.same_kind(&start))
            .or(sampled)?;
        let gesture = match (start, latest) {
            (Snapshot::One(a), Snapshot::One(b)) => {
                self.config.classify_swipe(a, b).map(Gesture::Swipe)
            }
            (Snapshot::Two(a), Snapshot::Two(b)) => detect_pinch(a, b).map(Gesture::Pinch),
            _ => None,
        };
        gtrace!(?gesture, "TouchTracker::end");
        gesture
    }

    /// Abandons the current sequence.
    pub fn cancel(&mut self) {
        self.start = None;
        self.latest = None;
    }
}
