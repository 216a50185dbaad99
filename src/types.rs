use crate::error::{Result, WattsplitError};
use serde::{Deserialize, Serialize};

/// Appliance identifier as carried by ground-truth tags.
pub type ApplianceId = i64;

/// Label of cycles that no known appliance matched
pub const UNKNOWN_LABEL: &str = "Unknown";
/// Label of the residual (non-disaggregated) load
pub const OTHER_LABEL: &str = "Other";
/// Id reserved for the unknown appliance
pub const UNKNOWN_APPLIANCE_ID: ApplianceId = -1;

/// One of the two measured AC phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    L1,
    L2,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
        }
    }

    pub fn all() -> [Self; 2] {
        [Self::L1, Self::L2]
    }
}

/// A detected ON/OFF interval of appliance activity, in epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub on_time: f64,
    pub off_time: f64,
}

impl Cycle {
    pub fn new(on_time: f64, off_time: f64) -> Result<Self> {
        if !(on_time < off_time) {
            return Err(WattsplitError::InvalidInterval {
                on: on_time,
                off: off_time,
            });
        }
        Ok(Self { on_time, off_time })
    }

    pub fn duration(&self) -> f64 {
        self.off_time - self.on_time
    }

    pub fn window(&self) -> (f64, f64) {
        (self.on_time, self.off_time)
    }

    pub fn midpoint(&self) -> f64 {
        (self.on_time + self.off_time) / 2.0
    }
}

/// Ground-truth activation window for a known appliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub appliance_id: ApplianceId,
    pub label: String,
    pub on_time: f64,
    pub off_time: f64,
}

impl Tag {
    pub fn new(
        appliance_id: ApplianceId,
        label: impl Into<String>,
        on_time: f64,
        off_time: f64,
    ) -> Result<Self> {
        if !(on_time < off_time) {
            return Err(WattsplitError::InvalidInterval {
                on: on_time,
                off: off_time,
            });
        }
        Ok(Self {
            appliance_id,
            label: label.into(),
            on_time,
            off_time,
        })
    }

    pub fn duration(&self) -> f64 {
        self.off_time - self.on_time
    }

    pub fn window(&self) -> (f64, f64) {
        (self.on_time, self.off_time)
    }
}
