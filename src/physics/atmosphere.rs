use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ISA 1976 standard atmosphere (sea level to 86 km) plus viscosity
// ---------------------------------------------------------------------------

const G0: f64 = 9.80665;       // m/s^2
const R_AIR: f64 = 287.052_87; // J/(kg·K)
const GAMMA: f64 = 1.4;

const T0: f64 = 288.15;        // K
const P0: f64 = 101_325.0;     // Pa

// Sutherland's law for air
const MU_REF: f64 = 1.716e-5;  // Pa·s at T_REF
const T_REF: f64 = 273.15;     // K
const SUTHERLAND: f64 = 110.4; // K

/// Layer base: (altitude m, temperature K, lapse K/m, pressure Pa).
const LAYERS: [(f64, f64, f64, f64); 7] = [
    (0.0, 288.15, -0.0065, 101_325.0),
    (11_000.0, 216.65, 0.0, 22_632.1),
    (20_000.0, 216.65, 0.001, 5_474.89),
    (32_000.0, 228.65, 0.0028, 868.019),
    (47_000.0, 270.65, 0.0, 110.906),
    (51_000.0, 270.65, -0.0028, 66.9389),
    (71_000.0, 214.65, -0.002, 3.956_42),
];
const TOP_OF_TABLE: f64 = 86_000.0;

/// Air properties the flow solver and boundary-layer correlations need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirProperties {
    pub density: f64,     // kg/m^3
    pub pressure: f64,    // Pa
    pub temperature: f64, // K
    pub sound_speed: f64, // m/s
    pub viscosity: f64,   // Pa·s, dynamic
}

impl AirProperties {
    /// Kinematic viscosity, m^2/s.
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity / self.density.max(1e-12)
    }
}

/// How the ambient air is specified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum AtmosphereModel {
    /// Fixed density; other properties taken at sea-level temperature.
    Density { density: f64 },
    /// Standard atmosphere at a geometric altitude.
    Altitude { altitude: f64 },
}

impl Default for AtmosphereModel {
    fn default() -> Self {
        AtmosphereModel::Altitude { altitude: 0.0 }
    }
}

impl AtmosphereModel {
    pub fn properties(&self) -> AirProperties {
        match *self {
            AtmosphereModel::Altitude { altitude } => isa(altitude),
            AtmosphereModel::Density { density } => {
                let density = density.max(0.0);
                AirProperties {
                    density,
                    pressure: density * R_AIR * T0,
                    temperature: T0,
                    sound_speed: sound_speed(T0),
                    viscosity: sutherland_viscosity(T0),
                }
            }
        }
    }
}

/// Standard atmosphere at `altitude_m`. Negative altitudes clamp to sea level;
/// above 86 km pressure decays exponentially at constant temperature.
pub fn isa(altitude_m: f64) -> AirProperties {
    let h = altitude_m.max(0.0);

    let (temperature, pressure) = if h >= TOP_OF_TABLE {
        let p = 0.3734 * (-0.000_15 * (h - TOP_OF_TABLE)).exp();
        (186.87, p.max(0.0))
    } else {
        let &(h_base, t_base, lapse, p_base) = LAYERS
            .iter()
            .rev()
            .find(|layer| h >= layer.0)
            .unwrap_or(&LAYERS[0]);
        layer_state(h - h_base, t_base, lapse, p_base)
    };

    AirProperties {
        density: if temperature > 0.0 { pressure / (R_AIR * temperature) } else { 0.0 },
        pressure,
        temperature,
        sound_speed: sound_speed(temperature),
        viscosity: sutherland_viscosity(temperature),
    }
}

/// Temperature and pressure `dh` metres above a layer base.
fn layer_state(dh: f64, t_base: f64, lapse: f64, p_base: f64) -> (f64, f64) {
    if lapse == 0.0 {
        (t_base, p_base * (-G0 * dh / (R_AIR * t_base)).exp())
    } else {
        let t = t_base + lapse * dh;
        (t, p_base * (t / t_base).powf(-G0 / (lapse * R_AIR)))
    }
}

fn sound_speed(temperature: f64) -> f64 {
    (GAMMA * R_AIR * temperature).sqrt()
}

/// Dynamic viscosity of air, Pa·s.
pub fn sutherland_viscosity(temperature: f64) -> f64 {
    let t = temperature.max(1.0);
    MU_REF * (t / T_REF).powf(1.5) * (T_REF + SUTHERLAND) / (t + SUTHERLAND)
}

/// Sea-level standard density, kg/m^3.
pub fn sea_level_density() -> f64 {
    P0 / (R_AIR * T0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
