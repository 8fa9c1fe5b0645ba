use nalgebra::{UnitQuaternion, Vector3};
use tracing::{debug, info, warn};

use crate::collaborators::{
    DefaultSystemsLogic, FailureHandler, NoFailures, SystemsContext, SystemsLogic, SystemsState,
};
use crate::components::{
    AircraftConfig, AirData, AutopilotMode, AutopilotState, AutopilotTargets, ControlInput,
    ControlState, ControlTargets, CrashReport, InitialConditions, PhysicsComponent,
    PropulsionState, RigidBodyState,
};
use crate::resources::{
    EnvironmentConfig, EnvironmentResource, PhysicsConfig, RunwayGeometry, SimulationConfig,
};
use crate::sim::output::{OutputSources, OutputState};
use crate::sim::snapshot::{FlightSnapshot, SNAPSHOT_VERSION};
use crate::systems::aerodynamics::force_calculator::prandtl_glauert;
use crate::systems::{
    add_gravity, apply_aero_forces, apply_failure_effect, apply_ground_forces,
    apply_thrust_forces, auto_trim, calculate_air_data, calculate_gear_contacts,
    calculate_net_forces, check_crash, integrate_substep, run_autopilot, settle_engine,
    smooth_controls, update_engine, AeroContext, AutopilotInputs, EngineConditions,
    FailureTargets, GearCommand, GroundSurface,
};
use crate::utils::{deg_to_rad, RngManager, SimResult};

/// Below this ground speed with every throttle closed the aircraft is held still [m/s]
const CREEP_SPEED: f64 = 0.3;
const CREEP_THROTTLE: f64 = 0.05;
/// Trim angle of attack limits for an airborne spawn [deg]
const SPAWN_ALPHA_RANGE_DEG: (f64, f64) = (-5.0, 12.0);

/// The aircraft and everything acting on it.
///
/// One instance owns all flight state. `update` advances it by one frame of
/// `dt`, split into fixed integration sub-steps, and returns the frame's
/// [`OutputState`].
pub struct FlightModel {
    config: AircraftConfig,
    physics_config: PhysicsConfig,
    rng_manager: RngManager,
    environment: EnvironmentResource,
    initial_conditions: InitialConditions,

    state: RigidBodyState,
    physics: PhysicsComponent,
    propulsion: PropulsionState,
    controls: ControlState,
    autopilot: AutopilotState,
    runway: Option<RunwayGeometry>,
    systems: SystemsState,
    air_data: AirData,
    on_ground: bool,
    fuel_leak_rate: f64,
    crash: Option<CrashReport>,
    sim_time: f64,
    last_output: OutputState,

    systems_logic: Box<dyn SystemsLogic>,
    failure_handler: Box<dyn FailureHandler>,
}

impl FlightModel {
    pub fn new(
        config: AircraftConfig,
        physics_config: PhysicsConfig,
        environment: EnvironmentConfig,
        seed: u64,
    ) -> Self {
        let rng_manager = RngManager::new(seed);
        let engine_count = config.engine_count();
        let environment = EnvironmentResource::new(environment, &rng_manager);
        let ambient_c = environment.atmosphere(0.0).temperature_c();
        let physics =
            PhysicsComponent::new(config.mass.empty_mass, config.mass.inertia_diagonal());

        let mut model = Self {
            propulsion: PropulsionState::new(
                engine_count,
                &mut rng_manager.get_rng("engines"),
                ambient_c,
            ),
            controls: ControlState::new(engine_count),
            systems: SystemsState::new(engine_count),
            air_data: calculate_air_data(
                &Vector3::zeros(),
                &Vector3::zeros(),
                &environment.atmosphere(0.0),
            ),
            config,
            physics_config,
            rng_manager,
            environment,
            initial_conditions: InitialConditions::default(),
            state: RigidBodyState::default(),
            physics,
            autopilot: AutopilotState::default(),
            runway: None,
            on_ground: false,
            fuel_leak_rate: 0.0,
            crash: None,
            sim_time: 0.0,
            last_output: OutputState::default(),
            systems_logic: Box::new(DefaultSystemsLogic),
            failure_handler: Box::new(NoFailures),
        };
        model.reset();
        model
    }

    /// Builds the aircraft from `config.aircraft_file` (A320 defaults when
    /// absent) and spawns on the runway.
    pub fn from_config(config: &SimulationConfig) -> SimResult<Self> {
        let aircraft = match &config.aircraft_file {
            Some(path) => AircraftConfig::from_file(path)?,
            None => AircraftConfig::default(),
        };
        Ok(Self::new(
            aircraft,
            config.physics.clone(),
            config.environment.clone(),
            config.seed,
        ))
    }

    pub fn with_systems_logic(mut self, logic: impl SystemsLogic + 'static) -> Self {
        self.systems_logic = Box::new(logic);
        self
    }

    pub fn with_failure_handler(mut self, handler: impl FailureHandler + 'static) -> Self {
        self.failure_handler = Box::new(handler);
        self
    }

    /// Advances the simulation by one frame.
    ///
    /// A non-finite or non-positive `dt` leaves the state untouched; `dt` above
    /// `max_frame_dt` is clamped. Once crashed, the last output is returned
    /// unchanged.
    pub fn update(&mut self, input: &ControlInput, dt: f64) -> OutputState {
        if self.crash.is_some() {
            return self.last_output.clone();
        }
        if !(dt.is_finite() && dt > 0.0) {
            debug!(dt, "ignoring frame with invalid dt");
            return self.last_output.clone();
        }
        let dt = dt.min(self.physics_config.max_frame_dt);

        self.run_collaborators(dt);

        let mut targets = ControlTargets::from_input(input, self.config.engine_count());
        if self.autopilot.engaged {
            self.fly_autopilot(&mut targets, dt);
        }
        smooth_controls(&mut self.controls, &targets, dt);

        let substeps = self.physics_config.substeps.max(1);
        let h = dt / f64::from(substeps);
        for i in 0..substeps {
            self.substep(h, self.sim_time + h * f64::from(i + 1));
            if self.crash.is_some() {
                break;
            }
        }
        self.sim_time += dt;

        self.last_output = self.capture_output();
        self.last_output.clone()
    }

    /// Failure injection and systems bookkeeping for the coming frame.
    fn run_collaborators(&mut self, dt: f64) {
        let effects = self.failure_handler.evaluate(&self.last_output, dt);
        for effect in &effects {
            apply_failure_effect(
                effect,
                FailureTargets {
                    propulsion: &mut self.propulsion,
                    controls: &mut self.controls,
                    systems: &mut self.systems,
                    fuel_leak_rate: &mut self.fuel_leak_rate,
                },
            );
        }

        let context = SystemsContext {
            engine_n2: self.propulsion.engines.iter().map(|e| e.n2).collect(),
            engine_running: self.propulsion.engines.iter().map(|e| e.is_running()).collect(),
            fuel_mass: self.state.fuel_mass,
            on_ground: self.on_ground,
        };
        self.systems_logic.update(&context, &mut self.systems, dt);
        self.controls.effectiveness = self.systems.surface_effectiveness();
    }

    /// Replaces throttle, elevator and aileron targets with autopilot commands
    /// and walks the trim.
    fn fly_autopilot(&mut self, targets: &mut ControlTargets, dt: f64) {
        let (roll, pitch, heading) = self.state.euler_angles();
        let inputs = AutopilotInputs {
            indicated_airspeed: self.air_data.indicated_airspeed,
            ground_speed: self.state.ground_speed(),
            altitude: self.state.altitude(),
            vertical_speed: self.state.vertical_speed(),
            roll,
            pitch,
            heading,
            position_ned: self.state.position,
            runway: self.runway.as_ref(),
        };
        let command = run_autopilot(&mut self.autopilot, &inputs, dt);

        targets.throttle.iter_mut().for_each(|t| *t = command.throttle);
        targets.elevator = command.elevator;
        targets.aileron = command.aileron;
        targets.trim = None;
        self.controls.trim = auto_trim(self.controls.trim, command.elevator, dt);
    }

    fn substep(&mut self, h: f64, time: f64) {
        let gravity = self.physics_config.gravity;
        let altitude = self.state.altitude();
        let ground_elevation = self.environment.ground_elevation();
        let height_agl = altitude - ground_elevation;

        let atmosphere = self.environment.atmosphere(altitude);
        let wind_body = self.environment.sample_wind_body(&self.state.attitude);
        self.air_data = calculate_air_data(&self.state.velocity, &wind_body, &atmosphere);

        self.physics.clear_forces();
        self.physics.mass = self.state.mass();

        let ambient = EngineConditions {
            density_ratio: atmosphere.density_ratio(),
            mach: self.air_data.mach,
            oat_c: atmosphere.temperature_c(),
            fuel_available: self.state.fuel_mass > 0.0,
            ignition: self.systems.ignition,
            duct_pressure_psi: 0.0,
        };
        for (i, (engine, installed)) in self
            .propulsion
            .engines
            .iter_mut()
            .zip(&self.config.propulsion.engines)
            .enumerate()
        {
            let command = self.controls.throttle.get(i).copied().unwrap_or(0.0);
            engine.reverse = self.on_ground && command < 0.0;
            engine.throttle = if engine.reverse {
                command.abs()
            } else {
                command.max(0.0)
            };
            let conditions = EngineConditions {
                fuel_available: ambient.fuel_available && self.systems.fuel_available_for(i),
                duct_pressure_psi: self.systems.duct_pressure_for(i),
                ..ambient
            };
            update_engine(engine, &installed.spec, &conditions, h);
        }
        apply_thrust_forces(
            &mut self.physics,
            &self.propulsion,
            &self.config.propulsion.engines,
        );

        let surfaces = self.controls.effective_surfaces();
        let aero = AeroContext {
            air_data: &self.air_data,
            angular_velocity: self.state.angular_velocity,
            surfaces: &surfaces,
            height_agl,
            on_ground: self.on_ground,
        };
        apply_aero_forces(
            &mut self.physics,
            &self.config.geometry,
            &self.config.aero_coef,
            &aero,
        );

        add_gravity(&mut self.physics, gravity);

        let gear = GearCommand {
            down_locked: self
                .controls
                .gear_down_locked(self.config.gear.down_lock_threshold),
            brakes: self.controls.brakes,
            steering: self.controls.rudder,
        };
        let surface = GroundSurface {
            elevation: ground_elevation,
            friction_factors: self.environment.friction_factors(),
        };
        let reaction =
            calculate_gear_contacts(&self.state, &self.config.gear, &gear, &surface, gravity);
        apply_ground_forces(
            &mut self.physics,
            &reaction,
            &self.state,
            &self.config.gear,
            &gear,
            gravity,
        );
        let was_on_ground = self.on_ground;
        self.on_ground = reaction.on_ground;

        calculate_net_forces(&mut self.physics, &self.state);
        integrate_substep(&self.physics, &mut self.state, h);

        self.burn_fuel(h);
        self.hold_when_parked();

        let height_agl = self.state.altitude() - ground_elevation;
        if let Some(reason) = check_crash(&self.state, self.on_ground, was_on_ground, height_agl) {
            warn!(%reason, sim_time = time, "aircraft crashed");
            self.crash = Some(CrashReport::new(reason, time));
        }
    }

    fn burn_fuel(&mut self, h: f64) {
        let burn = (self.propulsion.total_fuel_flow() + self.fuel_leak_rate) * h;
        self.state.fuel_mass = (self.state.fuel_mass - burn).max(0.0);

        if self.state.fuel_mass <= 0.0 && self.propulsion.engines.iter().any(|e| !e.failed) {
            warn!("fuel exhausted, all engines failed");
            for engine in &mut self.propulsion.engines {
                engine.failed = true;
            }
        }
    }

    /// Stops residual idle-thrust creep on the ground.
    fn hold_when_parked(&mut self) {
        if !self.on_ground || self.state.ground_speed() >= CREEP_SPEED {
            return;
        }
        if self.controls.throttle.iter().all(|t| *t < CREEP_THROTTLE) {
            self.state.velocity.x = 0.0;
            self.state.velocity.y = 0.0;
            self.state.angular_velocity.z = 0.0;
        }
    }

    fn capture_output(&self) -> OutputState {
        OutputState::capture(OutputSources {
            sim_time: self.sim_time,
            state: &self.state,
            air_data: &self.air_data,
            ground_elevation: self.environment.ground_elevation(),
            on_ground: self.on_ground,
            propulsion: &self.propulsion,
            controls: &self.controls,
            autopilot: &self.autopilot,
            crash: self.crash.as_ref(),
        })
    }

    /// Air data for the current state without a gust sample.
    fn refresh_air_data(&mut self) {
        let atmosphere = self.environment.atmosphere(self.state.altitude());
        let wind_body = self.environment.mean_wind_body(&self.state.attitude);
        self.air_data = calculate_air_data(&self.state.velocity, &wind_body, &atmosphere);
    }

    pub fn set_initial_conditions(&mut self, initial: InitialConditions) {
        self.initial_conditions = initial;
        self.reset();
    }

    /// Respawns at the stored initial conditions. Random streams restart from
    /// the seed, so a reset run repeats exactly.
    pub fn reset(&mut self) {
        let ic = self.initial_conditions.clone();
        let engine_count = self.config.engine_count();
        let mass = &self.config.mass;
        let ground = self.environment.ground_elevation();

        self.environment.reseed(&self.rng_manager);
        self.crash = None;
        self.sim_time = 0.0;
        self.fuel_leak_rate = 0.0;
        self.on_ground = ic.on_ground;
        self.systems = SystemsState::new(engine_count);
        self.autopilot = AutopilotState::default();

        let mut state = RigidBodyState {
            latitude: deg_to_rad(ic.latitude_deg),
            longitude: deg_to_rad(ic.longitude_deg),
            empty_mass: mass.empty_mass,
            fuel_mass: ic
                .fuel_kg
                .unwrap_or(mass.default_fuel)
                .clamp(0.0, mass.fuel_capacity),
            payload_mass: ic.payload_kg.unwrap_or(mass.default_payload).max(0.0),
            ..Default::default()
        };
        let yaw = deg_to_rad(ic.heading_deg);

        let altitude = if ic.on_ground {
            ground + self.gear_height()
        } else {
            ic.altitude_m.max(ground + self.gear_height())
        };
        state.position = Vector3::new(ic.north_m, ic.east_m, -altitude);
        let atmosphere = self.environment.atmosphere(altitude);

        if ic.on_ground {
            state.attitude = UnitQuaternion::from_euler_angles(0.0, 0.0, yaw);
        } else {
            let alpha = self.trim_alpha(&state, ic.airspeed_mps, ic.flaps, altitude);
            state.attitude = UnitQuaternion::from_euler_angles(0.0, alpha, yaw);
            state.velocity = Vector3::new(
                ic.airspeed_mps * alpha.cos(),
                0.0,
                ic.airspeed_mps * alpha.sin(),
            );
        }
        self.state = state;

        self.controls = ControlState::new(engine_count);
        self.controls.flaps = ic.flaps.clamp(0.0, 1.0);
        self.controls.gear = if ic.on_ground { 1.0 } else { 0.0 };
        let throttle = if ic.on_ground { 0.0 } else { ic.throttle };
        self.controls.throttle = vec![throttle.clamp(0.0, 1.0); engine_count];

        let ambient_c = atmosphere.temperature_c();
        self.propulsion = PropulsionState::new(
            engine_count,
            &mut self.rng_manager.get_rng("engines"),
            ambient_c,
        );
        if ic.engines_running {
            let conditions = EngineConditions {
                density_ratio: atmosphere.density_ratio(),
                mach: ic.airspeed_mps / atmosphere.speed_of_sound,
                oat_c: ambient_c,
                fuel_available: true,
                ignition: true,
                duct_pressure_psi: 0.0,
            };
            for (engine, installed) in self
                .propulsion
                .engines
                .iter_mut()
                .zip(&self.config.propulsion.engines)
            {
                settle_engine(engine, &installed.spec, throttle, &conditions);
            }
        }

        self.physics.mass = self.state.mass();
        self.physics.clear_forces();
        self.refresh_air_data();
        self.last_output = self.capture_output();

        info!(
            aircraft = %self.config.name,
            altitude_m = altitude,
            airspeed_mps = ic.airspeed_mps,
            on_ground = ic.on_ground,
            engines_running = ic.engines_running,
            "aircraft spawned"
        );
    }

    /// Engines off and spooled down, parked on the ground.
    pub fn cold_start(&mut self) {
        self.set_initial_conditions(InitialConditions {
            on_ground: true,
            engines_running: false,
            throttle: 0.0,
            airspeed_mps: 0.0,
            ..self.initial_conditions.clone()
        });
    }

    /// CG height above the ground with the gear just touching.
    fn gear_height(&self) -> f64 {
        self.config
            .gear
            .legs
            .iter()
            .map(|leg| leg.position.z)
            .fold(0.0, f64::max)
    }

    /// Angle of attack giving lift equal to weight at the spawn speed.
    fn trim_alpha(&self, state: &RigidBodyState, airspeed: f64, flaps: f64, altitude: f64) -> f64 {
        let atmosphere = self.environment.atmosphere(altitude);
        let dynamic_pressure = 0.5 * atmosphere.density * airspeed * airspeed;
        if dynamic_pressure <= 0.0 {
            return 0.0;
        }
        let aero = &self.config.aero_coef;
        let c_l = state.mass() * self.physics_config.gravity
            / (dynamic_pressure * self.config.geometry.wing_area);
        let flap_c_l = aero.flaps.lookup(flaps).0;
        let slope = aero.lift.c_l_alpha * prandtl_glauert(airspeed / atmosphere.speed_of_sound);
        let (lo, hi) = SPAWN_ALPHA_RANGE_DEG;
        ((c_l - aero.lift.c_l_0 - flap_c_l) / slope).clamp(deg_to_rad(lo), deg_to_rad(hi))
    }

    /// Engages or disengages the autopilot; loop memory is cleared on engagement.
    pub fn set_autopilot(&mut self, engaged: bool, targets: AutopilotTargets) {
        if engaged && !self.autopilot.engaged {
            self.autopilot.reset_integrators();
            info!(mode = ?self.autopilot.mode, ?targets, "autopilot engaged");
        } else if !engaged && self.autopilot.engaged {
            info!("autopilot disengaged");
        }
        self.autopilot.engaged = engaged;
        self.autopilot.targets = targets;
    }

    pub fn set_autopilot_mode(&mut self, mode: AutopilotMode) {
        if matches!(mode, AutopilotMode::Ils | AutopilotMode::Approach) && self.runway.is_none() {
            warn!(?mode, "no runway geometry set, holding wings level");
        }
        self.autopilot.mode = mode;
    }

    pub fn set_runway_geometry(&mut self, runway: RunwayGeometry) {
        self.runway = Some(runway);
    }

    pub fn set_environment(&mut self, environment: EnvironmentConfig) {
        self.environment.set_config(environment);
    }

    pub fn get_serializable_state(&self) -> FlightSnapshot {
        FlightSnapshot {
            version: SNAPSHOT_VERSION,
            aircraft: self.config.name.clone(),
            sim_time: self.sim_time,
            state: self.state.clone(),
            propulsion: self.propulsion.clone(),
            controls: self.controls.clone(),
            autopilot: self.autopilot.clone(),
            runway: self.runway.clone(),
            systems: self.systems.clone(),
            environment: self.environment.config().clone(),
            fuel_leak_rate: self.fuel_leak_rate,
            on_ground: self.on_ground,
            crash: self.crash.clone(),
            saved_at: None,
        }
    }

    /// Replaces the live state with a snapshot. Nothing changes when the
    /// snapshot does not fit this aircraft.
    pub fn load_flight_state(&mut self, snapshot: &FlightSnapshot) -> SimResult<()> {
        snapshot.validate(self.config.engine_count())?;
        if snapshot.aircraft != self.config.name {
            warn!(
                snapshot = %snapshot.aircraft,
                aircraft = %self.config.name,
                "loading snapshot taken on a different aircraft"
            );
        }

        self.sim_time = snapshot.sim_time;
        self.state = snapshot.state.clone();
        self.propulsion = snapshot.propulsion.clone();
        self.controls = snapshot.controls.clone();
        self.autopilot = snapshot.autopilot.clone();
        self.runway = snapshot.runway.clone();
        self.systems = snapshot.systems.clone();
        self.environment.set_config(snapshot.environment.clone());
        self.environment.reseed(&self.rng_manager);
        self.fuel_leak_rate = snapshot.fuel_leak_rate;
        self.on_ground = snapshot.on_ground;
        self.crash = snapshot.crash.clone();

        self.physics.mass = self.state.mass();
        self.physics.clear_forces();
        self.refresh_air_data();
        self.last_output = self.capture_output();
        info!(sim_time = self.sim_time, "flight state restored");
        Ok(())
    }

    pub fn initial_conditions(&self) -> &InitialConditions {
        &self.initial_conditions
    }

    pub fn config(&self) -> &AircraftConfig {
        &self.config
    }

    pub fn state(&self) -> &RigidBodyState {
        &self.state
    }

    pub fn propulsion(&self) -> &PropulsionState {
        &self.propulsion
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    pub fn autopilot(&self) -> &AutopilotState {
        &self.autopilot
    }

    pub fn air_data(&self) -> &AirData {
        &self.air_data
    }

    pub fn environment(&self) -> &EnvironmentConfig {
        self.environment.config()
    }

    pub fn systems_state(&self) -> &SystemsState {
        &self.systems
    }

    /// Direct access for an external systems panel (APU bleed, starter valves).
    pub fn systems_state_mut(&mut self) -> &mut SystemsState {
        &mut self.systems
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn crash(&self) -> Option<&CrashReport> {
        self.crash.as_ref()
    }

    pub fn is_crashed(&self) -> bool {
        self.crash.is_some()
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn last_output(&self) -> &OutputState {
        &self.last_output
    }
}
