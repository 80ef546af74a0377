use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::airfoil::AirfoilParams;
use crate::error::{AirflowError, Result};
use crate::flow::analysis::{Coefficients, FlowAnalysis};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfoilSummary {
    pub naca: String,
    pub params: AirfoilParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionsSummary {
    pub speed_ms: f64,
    pub alpha_deg: f64,
    pub density: f64,
    pub viscosity: f64,
    pub dynamic_pressure_pa: f64,
    pub reynolds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceSummary {
    pub lift_n_per_m: f64,
    pub drag_n_per_m: f64,
    pub lift_vector: [f64; 2],
    pub drag_vector: [f64; 2],
    pub lift_to_drag: f64,
}

/// Headline numbers of one analysis, as exported to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub airfoil: AirfoilSummary,
    pub conditions: ConditionsSummary,
    pub coefficients: Coefficients,
    pub forces: ForceSummary,
    pub panel_count: usize,
    pub circulation: f64,       // vortex strength per unit length, m/s
    pub total_circulation: f64, // m^2/s
    pub kutta_panels: Option<(usize, usize)>,
    pub streamline_count: usize,
}

impl AnalysisSummary {
    pub fn from_analysis(analysis: &FlowAnalysis) -> Self {
        let sol = &analysis.solution;
        let f = &analysis.forces;
        AnalysisSummary {
            airfoil: AirfoilSummary {
                naca: analysis.params.naca_code(),
                params: analysis.params,
            },
            conditions: ConditionsSummary {
                speed_ms: analysis.conditions.speed,
                alpha_deg: analysis.conditions.alpha.to_degrees(),
                density: analysis.air.density,
                viscosity: analysis.air.viscosity,
                dynamic_pressure_pa: analysis.dynamic_pressure,
                reynolds: analysis.reynolds,
            },
            coefficients: analysis.coefficients,
            forces: ForceSummary {
                lift_n_per_m: analysis.lift_per_span(),
                drag_n_per_m: analysis.drag_per_span(),
                lift_vector: [f.lift.x, f.lift.y],
                drag_vector: [f.drag.x, f.drag.y],
                lift_to_drag: analysis.lift_to_drag(),
            },
            panel_count: sol.len(),
            circulation: sol.circulation,
            total_circulation: sol.total_circulation(),
            kutta_panels: sol.kutta_panels,
            streamline_count: analysis.streamlines.len(),
        }
    }
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary<W: Write>(writer: &mut W, summary: &AnalysisSummary) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, summary).map_err(AirflowError::Export)?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_summary_file(path: impl AsRef<Path>, summary: &AnalysisSummary) -> Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_summary(&mut file, summary)?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::flow::analysis::analyze;

    #[test]
    fn summary_json_round_trips() {
        let analysis = analyze(&AnalysisConfig { streamline_count: 2, ..AnalysisConfig::default() });
        let summary = AnalysisSummary::from_analysis(&analysis);

        let mut buf = Vec::new();
        write_summary(&mut buf, &summary).unwrap();
        let json = String::from_utf8(buf).unwrap();
        assert!(json.contains("\"naca\": \"2412\""));
        assert!(json.contains("\"panel_count\""));
        assert!(json.contains("\"lift_n_per_m\""));

        let back: AnalysisSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back.panel_count, analysis.solution.len());
        assert_eq!(back.streamline_count, 2);
        assert_eq!(back.airfoil.params, analysis.params);
    }

    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_is_an_export_error() {
        let analysis = analyze(&AnalysisConfig { streamline_count: 0, ..AnalysisConfig::default() });
        let err = write_summary(&mut FullDisk, &AnalysisSummary::from_analysis(&analysis)).unwrap_err();
        assert!(matches!(err, AirflowError::Export(_)), "{:?}", err);
        assert!(err.to_string().starts_with("failed to export summary"));
    }
}
