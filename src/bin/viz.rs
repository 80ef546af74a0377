use eframe::egui;
use egui_plot::{Arrows, Legend, Line, Plot, PlotPoints};

use airflow_sim::config::AnalysisConfig;
use airflow_sim::flow::{analyze, FlowAnalysis};
use airflow_sim::physics::{sea_level_density, AtmosphereModel, FlowRegime};

// Lift arrow length in chords at Cl = 1.
const ARROW_SCALE: f64 = 0.4;

fn main() -> eframe::Result {
    env_logger::init();
    let config = AnalysisConfig::default();
    let analysis = analyze(&config);

    let app = FlowViz {
        config,
        analysis,
        use_altitude: true,
        altitude: 0.0,
        density: sea_level_density(),
        show_streamlines: true,
        show_pressure: true,
        show_forces: true,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Airflow Visualizer", options, Box::new(|_| Ok(Box::new(app))))
}

struct FlowViz {
    config: AnalysisConfig,
    analysis: FlowAnalysis,
    use_altitude: bool,
    altitude: f64,
    density: f64,
    show_streamlines: bool,
    show_pressure: bool,
    show_forces: bool,
}

impl FlowViz {
    /// Parameter panel. Returns true when anything the analysis depends on changed.
    fn parameters(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        let c = &mut self.config;

        ui.heading("Flow");
        changed |= ui.add(egui::Slider::new(&mut c.flow.alpha_deg, -10.0..=15.0).text("alpha (deg)")).changed();
        changed |= ui.add(egui::Slider::new(&mut c.flow.speed, 1.0..=120.0).text("speed (m/s)")).changed();

        ui.separator();
        ui.heading("Section");
        changed |= ui.add(egui::Slider::new(&mut c.airfoil.chord, 0.1..=3.0).text("chord (m)")).changed();
        changed |= ui.add(egui::Slider::new(&mut c.airfoil.max_camber, 0.0..=0.09).text("max camber")).changed();
        changed |= ui
            .add(egui::Slider::new(&mut c.airfoil.camber_location, 0.1..=0.9).text("camber location"))
            .changed();
        changed |= ui.add(egui::Slider::new(&mut c.airfoil.thickness, 0.01..=0.3).text("thickness")).changed();
        ui.label(format!("NACA {}", c.airfoil.naca_code()));

        ui.separator();
        ui.heading("Air");
        ui.horizontal(|ui| {
            changed |= ui.radio_value(&mut self.use_altitude, true, "altitude").changed();
            changed |= ui.radio_value(&mut self.use_altitude, false, "density").changed();
        });
        if self.use_altitude {
            changed |= ui.add(egui::Slider::new(&mut self.altitude, 0.0..=20_000.0).text("altitude (m)")).changed();
        } else {
            changed |= ui.add(egui::Slider::new(&mut self.density, 0.1..=1.5).text("density (kg/m^3)")).changed();
        }
        ui.horizontal(|ui| {
            changed |= ui.radio_value(&mut c.regime, FlowRegime::Laminar, "laminar").changed();
            changed |= ui.radio_value(&mut c.regime, FlowRegime::Turbulent, "turbulent").changed();
        });

        ui.separator();
        ui.heading("Display");
        changed |= ui.add(egui::Slider::new(&mut c.streamline_count, 0..=40).text("streamlines")).changed();
        ui.checkbox(&mut self.show_streamlines, "streamlines");
        ui.checkbox(&mut self.show_pressure, "pressure envelope");
        ui.checkbox(&mut self.show_forces, "force vectors");

        changed
    }

    fn rerun(&mut self) {
        self.config.atmosphere = if self.use_altitude {
            AtmosphereModel::Altitude { altitude: self.altitude }
        } else {
            AtmosphereModel::Density { density: self.density }
        };
        self.analysis = analyze(&self.config);
    }
}

impl eframe::App for FlowViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("parameters").min_width(260.0).show(ctx, |ui| {
            if self.parameters(ui) {
                self.rerun();
            }
        });

        let a = &self.analysis;
        let chord = a.params.chord;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading(format!("NACA {}", a.params.naca_code()));
            ui.label(format!(
                "Cl: {:.3}  |  Cd: {:.4}  |  L/D: {:.1}  |  Lift: {:.1} N/m  |  Drag: {:.2} N/m  |  Re: {:.2e}",
                a.coefficients.cl,
                a.coefficients.drag.total,
                a.lift_to_drag(),
                a.lift_per_span(),
                a.drag_per_span(),
                a.reynolds,
            ));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let flow_h = available.y * 0.62;
            let cp_h = available.y - flow_h - 24.0;

            // Flow field
            Plot::new("flow")
                .height(flow_h)
                .data_aspect(1.0)
                .legend(Legend::default())
                .show(ui, |plot_ui| {
                    let outline: PlotPoints = a.contour.iter().map(|p| [p.x, p.y]).collect();
                    plot_ui.line(Line::new("Airfoil", outline).width(2.0));

                    if self.show_streamlines {
                        for line in &a.streamlines {
                            let pts: PlotPoints = line.points.iter().map(|p| [p.x, p.y]).collect();
                            plot_ui.line(Line::new("Streamlines", pts).color(egui::Color32::LIGHT_BLUE));
                        }
                    }

                    if self.show_forces {
                        let origin = [0.25 * chord, 0.0];
                        let scale = ARROW_SCALE / a.dynamic_pressure.max(1e-9);
                        let lift = a.forces.lift * scale;
                        let drag = a.forces.drag * scale * 10.0; // drag drawn ×10
                        plot_ui.arrows(
                            Arrows::new("Lift", vec![origin], vec![[origin[0] + lift.x, origin[1] + lift.y]])
                                .color(egui::Color32::GREEN),
                        );
                        plot_ui.arrows(
                            Arrows::new("Drag ×10", vec![origin], vec![[origin[0] + drag.x, origin[1] + drag.y]])
                                .color(egui::Color32::RED),
                        );
                    }
                });

            // Pressure distribution, -Cp so suction plots upward
            if self.show_pressure {
                ui.label("Pressure coefficient (-Cp)");
                let sol = &a.solution;
                let side = |upper: bool| -> PlotPoints {
                    sol.panels
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| sol.is_upper(*i) == upper)
                        .map(|(i, p)| [p.control.x / chord, -sol.pressure_coefficient[i]])
                        .collect()
                };
                Plot::new("cp")
                    .height(cp_h)
                    .x_axis_label("x / c")
                    .legend(Legend::default())
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new("Upper", side(true)));
                        plot_ui.line(Line::new("Lower", side(false)));
                    });
            }
        });
    }
}
