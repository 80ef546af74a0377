use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::airfoil::AirfoilParams;
use crate::error::{AirflowError, Result};
use crate::flow::conditions::FlowConditions;
use crate::physics::atmosphere::AtmosphereModel;
use crate::physics::boundary_layer::{DragModel, FlowRegime, ShearVelocity};
use crate::stream::StreamlineConfig;

/// Freestream as a user enters it: speed in m/s, angle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSettings {
    pub speed: f64,
    pub alpha_deg: f64,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self { speed: 40.0, alpha_deg: 5.0 }
    }
}

impl FlowSettings {
    pub fn conditions(&self) -> FlowConditions {
        FlowConditions::from_degrees(self.speed, self.alpha_deg)
    }
}

/// Everything one analysis run needs. Every field has a default, so a
/// config file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub airfoil: AirfoilParams,
    pub flow: FlowSettings,
    pub atmosphere: AtmosphereModel,
    pub regime: FlowRegime,
    pub shear_velocity: ShearVelocity,
    pub drag: DragModel,
    pub streamline_count: usize,
    pub streamlines: StreamlineConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            airfoil: AirfoilParams::default(),
            flow: FlowSettings::default(),
            atmosphere: AtmosphereModel::default(),
            regime: FlowRegime::default(),
            shear_velocity: ShearVelocity::default(),
            drag: DragModel::default(),
            streamline_count: 15,
            streamlines: StreamlineConfig::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Swap the section shape for a NACA designation, keeping chord and
    /// point count.
    pub fn set_naca_code(&mut self, code: &str) -> Result<()> {
        let shape = AirfoilParams::from_naca_code(code)
            .ok_or_else(|| AirflowError::InvalidNacaCode(code.to_string()))?;
        self.airfoil = AirfoilParams {
            chord: self.airfoil.chord,
            point_count: self.airfoil.point_count,
            ..shape
        };
        Ok(())
    }
}
