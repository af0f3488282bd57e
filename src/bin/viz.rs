use eframe::egui;
use egui_plot::{Line, Plot, PlotPoints};

use ascent_sim::dynamics::state::EARTH_RADIUS_KM;
use ascent_sim::sim::Flight;
use ascent_sim::{presets, FlightPhase, SimulationConfig};

const TRAIL_LIMIT: usize = 20_000;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = AscentViz::new(presets::classroom());
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native("Rocket Ascent Simulator", options, Box::new(|_| Ok(Box::new(app))))
}

struct AscentViz {
    draft: SimulationConfig,
    flight: Option<Flight>,
    warp: u32,
    altitude_trail: Vec<[f64; 2]>,
    track_trail: Vec<[f64; 2]>,
    message: Option<String>,
}

impl AscentViz {
    fn new(draft: SimulationConfig) -> Self {
        let mut app = Self {
            draft,
            flight: None,
            warp: 1,
            altitude_trail: Vec::new(),
            track_trail: Vec::new(),
            message: None,
        };
        app.reset();
        app
    }

    fn reset(&mut self) {
        self.altitude_trail.clear();
        self.track_trail.clear();
        match Flight::new(self.draft.clone()) {
            Ok(flight) => {
                self.flight = Some(flight);
                self.message = None;
            }
            Err(err) => {
                self.flight = None;
                self.message = Some(err.to_string());
            }
        }
    }

    fn launch(&mut self) {
        self.reset();
        if let Some(flight) = &mut self.flight {
            flight.launch();
        }
    }

    fn step(&mut self, frame_dt: f64) {
        let Some(flight) = &mut self.flight else { return };
        for _ in 0..self.warp {
            if !flight.is_running() {
                break;
            }
            if let Err(err) = flight.tick(frame_dt) {
                self.message = Some(err.to_string());
                break;
            }
            let s = flight.state();
            self.altitude_trail.push([s.sim_time_s, s.altitude_km()]);
            self.track_trail.push([s.position_km.x, s.position_km.y]);
        }
        if self.altitude_trail.len() > TRAIL_LIMIT {
            let excess = self.altitude_trail.len() - TRAIL_LIMIT;
            self.altitude_trail.drain(..excess);
            self.track_trail.drain(..excess);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Vehicle");
        ui.add(egui::Slider::new(&mut self.draft.thrust_kn, 500.0..=10_000.0).text("thrust (kN)"));
        ui.add(egui::Slider::new(&mut self.draft.fuel_capacity_tons, 10.0..=500.0).text("fuel (t)"));
        ui.add(egui::Slider::new(&mut self.draft.launch_angle_deg, 0.0..=90.0).text("angle (deg)"));
        ui.add(
            egui::Slider::new(&mut self.draft.target_altitude_km, 150.0..=2_000.0).text("target (km)"),
        );
        ui.horizontal(|ui| {
            for name in presets::NAMES {
                if ui.button(name).clicked() {
                    if let Some(config) = presets::by_name(name) {
                        self.draft = config;
                    }
                }
            }
        });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Launch").clicked() {
                self.launch();
            }
            if ui.button("Abort").clicked() {
                if let Some(flight) = &mut self.flight {
                    flight.abort();
                }
            }
            if ui.button("Reset").clicked() {
                self.reset();
            }
        });
        ui.add(egui::Slider::new(&mut self.warp, 1..=100).text("time warp"));

        if let Some(message) = &self.message {
            ui.colored_label(egui::Color32::RED, message);
        }

        let Some(flight) = &self.flight else { return };
        let s = flight.state();

        ui.separator();
        ui.heading("Telemetry");
        ui.label(format!("T+{:.1} s  phase: {}", s.sim_time_s, s.phase.label()));
        ui.label(format!("altitude {:.2} km  (max {:.2})", s.altitude_km(), s.max_altitude_km));
        ui.label(format!("speed {:.3} km/s", s.speed_km_s()));
        ui.label(format!("stage {}  fuel {:.1} t  mass {:.1} t", s.stage.number(), s.fuel_tons, s.mass_tons));

        if let Ok(el) = flight.elements() {
            let shown = el.display();
            ui.label(format!("apogee {:.1} km  perigee {:.1} km", shown.apogee_km, shown.perigee_km));
            ui.label(format!("period {:.1} min  e={:.3}  {:?}", shown.period_min, el.eccentricity, el.trajectory));
        }

        ui.separator();
        ui.heading("Achievements");
        let a = s.achievements;
        for (done, label) in [
            (a.reached_space, "Reached space"),
            (a.reached_orbit, "Reached orbit"),
            (a.completed_mission, "Mission complete"),
        ] {
            ui.label(format!("[{}] {}", if done { "x" } else { " " }, label));
        }

        ui.separator();
        ui.heading("Events");
        egui::ScrollArea::vertical().stick_to_bottom(true).show(ui, |ui| {
            for event in flight.events() {
                ui.monospace(event.to_string());
            }
        });
    }
}

impl eframe::App for AscentViz {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let frame_dt = f64::from(ctx.input(|i| i.stable_dt));
        self.step(frame_dt);

        egui::SidePanel::left("controls").min_width(300.0).show(ctx, |ui| self.controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let half_w = available.x / 2.0 - 8.0;

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label("Altitude (km)");
                    Plot::new("altitude")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .x_axis_label("Time (s)")
                        .show(ui, |plot_ui| {
                            let points: PlotPoints = self.altitude_trail.iter().copied().collect();
                            plot_ui.line(Line::new("Altitude", points));
                        });
                });

                ui.vertical(|ui| {
                    ui.label("Ground track (km)");
                    Plot::new("track")
                        .width(half_w)
                        .height(available.y - 24.0)
                        .data_aspect(1.0)
                        .show(ui, |plot_ui| {
                            let earth: PlotPoints = (0..=360)
                                .map(|deg| {
                                    let a = f64::from(deg).to_radians();
                                    [EARTH_RADIUS_KM * a.cos(), EARTH_RADIUS_KM * a.sin()]
                                })
                                .collect();
                            plot_ui.line(Line::new("Earth", earth));
                            let points: PlotPoints = self.track_trail.iter().copied().collect();
                            plot_ui.line(Line::new("Trajectory", points));
                        });
                });
            });
        });

        if self.flight.as_ref().is_some_and(|f| f.state().phase == FlightPhase::Ascending) {
            ctx.request_repaint();
        }
    }
}
