// Station domain models
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationId {
    A,
    B,
}

impl StationId {
    pub const ALL: [StationId; 2] = [StationId::A, StationId::B];
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationId::A => f.write_str("A"),
            StationId::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationMode {
    Auto,
    Manual,
    Maint,
    Error,
}

impl std::fmt::Display for StationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StationMode::Auto => "AUTO",
            StationMode::Manual => "MANUAL",
            StationMode::Maint => "MAINT",
            StationMode::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// A manually commandable antenna axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Azimuth,
    Elevation,
}

impl Axis {
    /// Bring a proposed value into the axis domain: azimuth wraps into
    /// [0, 360), elevation clamps to [0, 90].
    pub fn constrain(self, value: f64) -> f64 {
        match self {
            Axis::Azimuth => value.rem_euclid(360.0),
            Axis::Elevation => value.clamp(0.0, 90.0),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Azimuth => f.write_str("azimuth"),
            Axis::Elevation => f.write_str("elevation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    pub temp: f64,
    pub humidity: f64,
    pub wind: f64,
    pub pressure: f64,
    pub rain: f64,
    pub visibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub azimuth: f64,
    pub elevation: f64,
    pub mode: StationMode,
    pub signal: f64,
    pub env: Environment,
}

impl Station {
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Azimuth => self.azimuth,
            Axis::Elevation => self.elevation,
        }
    }

    pub fn set_axis(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Azimuth => self.azimuth = value,
            Axis::Elevation => self.elevation = value,
        }
    }
}

/// One value per station, indexed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerStation<T> {
    pub a: T,
    pub b: T,
}

impl<T> PerStation<T> {
    pub fn get(&self, id: StationId) -> &T {
        match id {
            StationId::A => &self.a,
            StationId::B => &self.b,
        }
    }

    pub fn get_mut(&mut self, id: StationId) -> &mut T {
        match id {
            StationId::A => &mut self.a,
            StationId::B => &mut self.b,
        }
    }
}
