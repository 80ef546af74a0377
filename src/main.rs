use std::path::PathBuf;

use clap::Parser;

use airflow_sim::config::AnalysisConfig;
use airflow_sim::flow::{analyze, FlowAnalysis};
use airflow_sim::io::{csv, json};
use airflow_sim::physics::{AtmosphereModel, FlowRegime};
use airflow_sim::Result;

/// airflow-sim - 2D panel-method analysis of NACA 4-digit sections
#[derive(Parser, Debug)]
#[command(name = "airflow-sim", version, about)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// NACA 4-digit designation, e.g. 2412
    #[arg(long)]
    naca: Option<String>,

    /// Angle of attack in degrees
    #[arg(long, allow_negative_numbers = true)]
    alpha: Option<f64>,

    /// Freestream speed in m/s
    #[arg(long)]
    speed: Option<f64>,

    /// Chord length in m
    #[arg(long)]
    chord: Option<f64>,

    /// Chordwise stations per surface (at least 20)
    #[arg(long)]
    points: Option<usize>,

    /// Standard-atmosphere altitude in m
    #[arg(long, conflicts_with = "density")]
    altitude: Option<f64>,

    /// Fixed air density in kg/m^3
    #[arg(long)]
    density: Option<f64>,

    /// Use turbulent skin-friction correlations
    #[arg(long)]
    turbulent: bool,

    /// Number of streamlines to trace
    #[arg(long)]
    streamlines: Option<usize>,

    /// Export the surface distribution to CSV
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Export streamline points to CSV
    #[arg(long, value_name = "FILE")]
    streamlines_csv: Option<PathBuf>,

    /// Export the summary to JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::load(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(code) = &self.naca {
            config.set_naca_code(code)?;
        }
        if let Some(alpha) = self.alpha {
            config.flow.alpha_deg = alpha;
        }
        if let Some(speed) = self.speed {
            config.flow.speed = speed;
        }
        if let Some(chord) = self.chord {
            config.airfoil.chord = chord;
        }
        if let Some(points) = self.points {
            config.airfoil.point_count = points;
        }
        if let Some(altitude) = self.altitude {
            config.atmosphere = AtmosphereModel::Altitude { altitude };
        }
        if let Some(density) = self.density {
            config.atmosphere = AtmosphereModel::Density { density };
        }
        if self.turbulent {
            config.regime = FlowRegime::Turbulent;
        }
        if let Some(count) = self.streamlines {
            config.streamline_count = count;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let start = std::time::Instant::now();
    let analysis = analyze(&config);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    print_report(&analysis, &config, elapsed_ms);

    if let Some(path) = &cli.csv {
        csv::write_surface_file(path, &analysis.solution, &analysis.shear_stress)?;
        println!("  Surface data written to {}", path.display());
    }
    if let Some(path) = &cli.streamlines_csv {
        csv::write_streamlines_file(path, &analysis.streamlines)?;
        println!("  Streamlines written to {}", path.display());
    }
    if let Some(path) = &cli.json {
        json::write_summary_file(path, &json::AnalysisSummary::from_analysis(&analysis))?;
        println!("  Summary written to {}", path.display());
    }

    Ok(())
}

fn print_report(a: &FlowAnalysis, config: &AnalysisConfig, elapsed_ms: f64) {
    let sol = &a.solution;
    let c = &a.coefficients;

    println!();
    println!("====================================================================");
    println!("  PANEL METHOD ANALYSIS — NACA {}", a.params.naca_code());
    println!("====================================================================");
    println!();
    println!("  Section & Flow");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Chord:         {:>8.3} m     Panels:       {:>8}",
        a.params.chord,
        sol.len()
    );
    println!(
        "  Speed:         {:>8.1} m/s   Alpha:        {:>8.2} deg",
        a.conditions.speed,
        a.conditions.alpha.to_degrees()
    );
    println!(
        "  Density:       {:>8.4} kg/m^3 Temperature: {:>8.1} K",
        a.air.density, a.air.temperature
    );
    println!(
        "  Reynolds:      {:>8.3e}       Mach:         {:>8.3}",
        a.reynolds,
        a.conditions.speed / a.air.sound_speed
    );
    println!(
        "  q:             {:>8.1} Pa    Regime:       {:>8}",
        a.dynamic_pressure,
        format!("{:?}", config.regime)
    );
    println!();

    println!("  Coefficients");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Cl (circulation): {:>8.4}   Cl (pressure):    {:>8.4}",
        c.cl, c.cl_pressure
    );
    println!(
        "  Cl (thin airfoil):{:>8.4}   Cm c/4:           {:>8.4}",
        c.cl_thin_airfoil, c.cm_quarter_chord
    );
    println!(
        "  Cd friction:      {:>8.5}   Cd pressure:      {:>8.5}",
        c.drag.friction, c.drag.pressure
    );
    println!(
        "  Cd total:         {:>8.5}   L/D:              {:>8.1}",
        c.drag.total,
        a.lift_to_drag()
    );
    println!();

    println!("  Forces (per metre span)");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Lift:          {:>8.1} N/m", a.lift_per_span());
    println!("  Drag:          {:>8.2} N/m", a.drag_per_span());
    println!("  Resultant:     {:>8.1} N/m", a.forces.resultant().norm());
    println!(
        "  Circulation:   {:>8.3} m^2/s (gamma {:.4} m/s)",
        sol.total_circulation(),
        sol.circulation
    );
    println!();

    // -----------------------------------------------------------------------
    // Surface table (sampled)
    // -----------------------------------------------------------------------
    if !sol.is_empty() {
        println!("  Surface");
        println!("  ──────────────────────────────────────────────────────────────────");
        println!(
            "  {:>5}  {:>8}  {:>8}  {:>8}  {:>9}  {:>9}  {:>5}",
            "panel", "x (m)", "y (m)", "Cp", "Vt (m/s)", "tau (Pa)", "side"
        );
        println!("  {}", "─".repeat(62));

        let sample_interval = (sol.len() / 24).max(1);
        for (i, panel) in sol.panels.iter().enumerate() {
            let print = i % sample_interval == 0
                || sol.kutta_panels.is_some_and(|(u, l)| i == u || i == l)
                || i == sol.len() - 1;
            if !print {
                continue;
            }
            println!(
                "  {:>5}  {:>8.4}  {:>8.4}  {:>8.3}  {:>9.2}  {:>9.4}  {:>5}",
                i,
                panel.control.x,
                panel.control.y,
                sol.pressure_coefficient[i],
                sol.tangential_velocity[i],
                a.shear_stress[i],
                if sol.is_upper(i) { "upper" } else { "lower" }
            );
        }
        println!();
    }

    if !a.streamlines.is_empty() {
        let points: usize = a.streamlines.iter().map(|s| s.len()).sum();
        println!("  Streamlines: {} lines, {} points", a.streamlines.len(), points);
    }
    println!("  Analysis: {:.1} ms", elapsed_ms);
    println!("====================================================================");
    println!();
}
