use super::naca::AirfoilParams;

// ---------------------------------------------------------------------------
// Common NACA 4-digit sections (unit chord, default resolution)
// ---------------------------------------------------------------------------

/// Symmetric 12% section.
pub fn naca0012() -> AirfoilParams {
    AirfoilParams {
        max_camber: 0.0,
        camber_location: 0.0,
        thickness: 0.12,
        ..AirfoilParams::default()
    }
}

/// 2% camber at 40% chord, 12% thick. The default section.
pub fn naca2412() -> AirfoilParams {
    AirfoilParams::default()
}

/// 4% camber at 40% chord, 15% thick.
pub fn naca4415() -> AirfoilParams {
    AirfoilParams {
        max_camber: 0.04,
        camber_location: 0.4,
        thickness: 0.15,
        ..AirfoilParams::default()
    }
}

/// Thin symmetric section, close to a flat plate.
pub fn naca0006() -> AirfoilParams {
    AirfoilParams {
        thickness: 0.06,
        ..naca0012()
    }
}

/// Look a preset up by its four digits.
pub fn by_name(name: &str) -> Option<AirfoilParams> {
    match name.trim().trim_start_matches("NACA").trim() {
        "0006" => Some(naca0006()),
        "0012" => Some(naca0012()),
        "2412" => Some(naca2412()),
        "4415" => Some(naca4415()),
        _ => None,
    }
}
