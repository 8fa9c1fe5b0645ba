use std::io::{BufRead, Write};
use tracing::{debug, error, info, warn};

use crate::components::ControlInput;
use crate::resources::{EnvironmentConfigBuilder, SimulationConfig};
use crate::server::structures::{Command, Response, DEFAULT_STEP_DT};
use crate::sim::{FlightModel, FlightSnapshot};
use crate::utils::{SimError, SimResult};

/// One client's simulation: the configuration it was built from and the model.
pub struct Session {
    config: SimulationConfig,
    model: FlightModel,
}

impl Session {
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        let model = FlightModel::from_config(&config)?;
        Ok(Self { config, model })
    }

    pub fn model(&self) -> &FlightModel {
        &self.model
    }

    fn ready(&self) -> Response {
        Response::Ready {
            aircraft: self.model.config().name.clone(),
            engines: self.model.config().engine_count(),
            seed: self.config.seed,
        }
    }

    /// Applies one command. The flag is true once the client asked to close.
    pub fn handle(&mut self, command: Command) -> (Response, bool) {
        let response = match command {
            Command::Initialize { config } => self.initialize(config),
            Command::Step { controls, dt } => self.step(&controls, dt.unwrap_or(DEFAULT_STEP_DT)),
            Command::Reset { seed } => self.reset(seed),
            Command::ColdStart => {
                self.model.cold_start();
                Response::output(self.model.last_output().clone())
            }
            Command::InitialConditions { conditions } => {
                self.model.set_initial_conditions(conditions);
                Response::output(self.model.last_output().clone())
            }
            Command::Autopilot {
                engaged,
                targets,
                mode,
            } => {
                if let Some(mode) = mode {
                    self.model.set_autopilot_mode(mode);
                }
                self.model.set_autopilot(engaged, targets);
                Response::ok(if engaged {
                    "autopilot engaged"
                } else {
                    "autopilot disengaged"
                })
            }
            Command::Runway { runway } => {
                self.model.set_runway_geometry(runway);
                Response::ok("runway set")
            }
            Command::Environment { config } => self.environment(&config),
            Command::Save { path } => match self.model.get_serializable_state().save(&path) {
                Ok(()) => Response::ok(format!("saved to {}", path)),
                Err(e) => Response::error(e.to_string()),
            },
            Command::Load { path } => match FlightSnapshot::load(&path)
                .and_then(|snapshot| self.model.load_flight_state(&snapshot))
            {
                Ok(()) => Response::output(self.model.last_output().clone()),
                Err(e) => Response::error(e.to_string()),
            },
            Command::Close => {
                info!("close requested");
                return (Response::ok("closing"), true);
            }
        };
        (response, false)
    }

    fn initialize(&mut self, value: serde_json::Value) -> Response {
        let built = serde_json::from_value::<SimulationConfig>(value)
            .map_err(SimError::from)
            .and_then(|config| Ok((FlightModel::from_config(&config)?, config)));
        match built {
            Ok((model, config)) => {
                info!(seed = config.seed, "session initialized");
                self.model = model;
                self.config = config;
                self.ready()
            }
            Err(e) => {
                error!(error = %e, "initialize failed");
                Response::error(e.to_string())
            }
        }
    }

    fn step(&mut self, controls: &ControlInput, dt: f64) -> Response {
        if self.model.is_crashed() {
            debug!("step after crash");
        }
        Response::output(self.model.update(controls, dt))
    }

    /// A new seed rebuilds the model; the spawn point carries over.
    fn reset(&mut self, seed: Option<u64>) -> Response {
        match seed {
            Some(seed) if seed != self.config.seed => {
                let config = SimulationConfig {
                    seed,
                    ..self.config.clone()
                };
                match FlightModel::from_config(&config) {
                    Ok(mut model) => {
                        model.set_environment(self.model.environment().clone());
                        model.set_initial_conditions(self.model.initial_conditions().clone());
                        self.model = model;
                        self.config = config;
                    }
                    Err(e) => return Response::error(e.to_string()),
                }
            }
            _ => self.model.reset(),
        }
        Response::output(self.model.last_output().clone())
    }

    fn environment(&mut self, value: &serde_json::Value) -> Response {
        match EnvironmentConfigBuilder::from_json(value)
            .and_then(|builder| builder.build_on(self.model.environment()))
        {
            Ok(environment) => {
                self.model.set_environment(environment);
                Response::ok("environment updated")
            }
            Err(e) => Response::error(e.to_string()),
        }
    }

    /// Reads commands line by line until `Close` or end of input, writing one
    /// response line per command.
    pub fn serve<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
    ) -> SimResult<()> {
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let (response, close) = match serde_json::from_str::<Command>(&line) {
                Ok(command) => self.handle(command),
                Err(e) => {
                    warn!(error = %e, "invalid command");
                    (Response::error(format!("Invalid command format: {}", e)), false)
                }
            };

            writeln!(writer, "{}", serde_json::to_string(&response)?)?;
            writer.flush()?;
            if close {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn run(session: &mut Session, lines: &[String]) -> Vec<serde_json::Value> {
        let input = lines.join("\n");
        let mut out = Vec::new();
        session.serve(Cursor::new(input), &mut out).unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_protocol_round() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");
        let path = path.to_str().unwrap();
        let mut session = Session::new(SimulationConfig::default()).unwrap();

        let replies = run(
            &mut session,
            &[
                r#"{"Initialize": {"config": {"seed": 7}}}"#.to_string(),
                r#"{"Step": {"controls": {"throttle": [0.5]}, "dt": 0.05}}"#.to_string(),
                r#"{"Environment": {"config": {"wind_speed_mps": 5.0}}}"#.to_string(),
                format!(r#"{{"Save": {{"path": "{}"}}}}"#, path),
                r#""ColdStart""#.to_string(),
                format!(r#"{{"Load": {{"path": "{}"}}}}"#, path),
                r#"{"Bogus": {}}"#.to_string(),
                r#""Close""#.to_string(),
                r#"{"Step": {}}"#.to_string(),
            ],
        );

        let status: Vec<&str> = replies.iter().map(|r| r["status"].as_str().unwrap()).collect();
        assert_eq!(
            status,
            vec!["ready", "output", "ok", "ok", "output", "output", "error", "ok"]
        );
        assert_eq!(replies[0]["seed"], 7);
        assert_eq!(replies[0]["engines"], 2);
        // restored snapshot was taken after one frame
        assert!((replies[5]["output"]["sim_time"].as_f64().unwrap() - 0.05).abs() < 1e-12);
        assert_eq!(session.model().environment().wind_speed_mps, 5.0);
    }

    #[test]
    fn test_reset_with_new_seed_keeps_spawn() {
        let mut session = Session::new(SimulationConfig::default()).unwrap();
        session.handle(Command::InitialConditions {
            conditions: crate::components::InitialConditions::cruise(2000.0, 120.0, 0.5),
        });
        let (response, close) = session.handle(Command::Reset { seed: Some(99) });
        assert!(!close);
        match response {
            Response::Output { output, terminated } => {
                assert!(!terminated);
                assert!((output.altitude_m - 2000.0).abs() < 1e-9);
            }
            other => panic!("unexpected response {:?}", other),
        }
    }

    #[test]
    fn test_bad_environment_is_reported() {
        let mut session = Session::new(SimulationConfig::default()).unwrap();
        let (response, _) = session.handle(Command::Environment {
            config: serde_json::json!({"turbulence": -1.0}),
        });
        assert!(matches!(response, Response::Error { .. }));
    }
}
