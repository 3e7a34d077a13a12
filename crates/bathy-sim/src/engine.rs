//! Dive engine: the simulation loop.
//!
//! `DiveEngine` owns the hecs world (obstacles and sonar blips), the vessel,
//! the photo mission and the hull. It processes queued player commands, runs
//! the systems in a fixed order, settles the dive outcome and hands out a
//! `DiveSnapshot` per tick. Completely headless; the host supplies the clock
//! by calling `tick()` at `TICK_RATE`.

use std::collections::{BTreeSet, VecDeque};

use hecs::World;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bathy_core::commands::PlayerCommand;
use bathy_core::config::DiveConfig;
use bathy_core::constants::DT;
use bathy_core::enums::*;
use bathy_core::error::ConfigError;
use bathy_core::events::SimEvent;
use bathy_core::state::DiveSnapshot;
use bathy_core::types::{DVec2, SimTime};
use bathy_helm::{HullIntegrity, MissionTracker, VesselMotion};

use crate::chart::SeaChart;
use crate::observer::{self, DiveObserver};
use crate::systems;
use crate::systems::collision::ObstacleField;
use crate::systems::ping::ProximityPinger;
use crate::systems::sonar::SonarSweep;
use crate::world_setup;

/// The dive simulation. Owns the ECS world and all dive state.
pub struct DiveEngine {
    config: DiveConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    result: Option<DiveResult>,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SimEvent>,

    vessel: VesselMotion,
    mission: MissionTracker,
    /// Fresh mission, restored on every new dive.
    mission_template: MissionTracker,
    hull: HullIntegrity,
    sweep: SonarSweep,
    pinger: ProximityPinger,
    chart: SeaChart,

    /// Obstacle keys currently touching the hull.
    touching: BTreeSet<u64>,
    held: Vec<Direction>,
    stop_lever_engaged: bool,
    shutter_ready_at: f64,

    observers: Vec<Box<dyn DiveObserver>>,
}

impl DiveEngine {
    /// Validate `config`, lay out the dive site and wait in the briefing.
    pub fn new(config: DiveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mission = MissionTracker::load(&config.mission.targets, config.mission.max_fails)?;

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut world = World::new();
        world_setup::setup_site(&mut world, &config, &mut rng);

        Ok(Self {
            world,
            time: SimTime::default(),
            phase: GamePhase::default(),
            result: None,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            vessel: VesselMotion::new(config.vessel.clone()),
            mission_template: mission.clone(),
            mission,
            hull: HullIntegrity::new(&config.hull),
            sweep: SonarSweep::default(),
            pinger: ProximityPinger::new(&config.ping),
            chart: SeaChart::new(config.chart.clone()),
            touching: BTreeSet::new(),
            held: Vec::new(),
            stop_lever_engaged: false,
            shutter_ready_at: 0.0,
            observers: Vec::new(),
            config,
        })
    }

    /// Register an observer. It sees every event from the next tick on.
    pub fn subscribe(&mut self, observer: Box<dyn DiveObserver>) {
        self.observers.push(observer);
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the dive by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> DiveSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }
        self.settle();

        let events = std::mem::take(&mut self.events);
        self.notify(&events);

        let held = self.held_controls();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.result,
            &self.vessel,
            self.stop_lever_engaged,
            &held,
            &self.mission,
            self.shutter_ready(),
            &self.hull,
            &self.sweep,
            self.config.sonar.range,
            &self.chart,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn result(&self) -> Option<DiveResult> {
        self.result
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &DiveConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn vessel(&self) -> &VesselMotion {
        &self.vessel
    }

    pub fn mission(&self) -> &MissionTracker {
        &self.mission
    }

    pub fn hull(&self) -> &HullIntegrity {
        &self.hull
    }

    pub fn chart(&self) -> &SeaChart {
        &self.chart
    }

    pub fn pinger(&self) -> &ProximityPinger {
        &self.pinger
    }

    pub fn shutter_ready(&self) -> bool {
        self.time.elapsed_secs >= self.shutter_ready_at
    }

    /// Held helm buttons in application order.
    pub fn held_controls(&self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.held.contains(d))
            .collect()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartDive => {
                if self.phase == GamePhase::Briefing {
                    self.reset_dive();
                    self.phase = GamePhase::Active;
                    info!("dive started");
                }
            }
            PlayerCommand::ReturnToBriefing => {
                if self.phase != GamePhase::Briefing {
                    self.reset_dive();
                    self.phase = GamePhase::Briefing;
                    debug!("back to briefing");
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::PressControl { direction } => {
                if matches!(self.phase, GamePhase::Active | GamePhase::Paused)
                    && !self.held.contains(&direction)
                {
                    self.held.push(direction);
                }
            }
            PlayerCommand::ReleaseControl { direction } => {
                self.held.retain(|d| *d != direction);
            }
            other => {
                if self.phase == GamePhase::Active {
                    self.handle_dive_command(other);
                } else {
                    debug!("{:?} ignored in {:?}", other, self.phase);
                }
            }
        }
    }

    /// Commands that only make sense mid-dive.
    fn handle_dive_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::EmergencyStop => self.vessel.emergency_stop(),
            PlayerCommand::GradualStop => self.vessel.gradual_stop(),
            PlayerCommand::ToggleStopLever => {
                self.stop_lever_engaged = !self.stop_lever_engaged;
                self.set_controls_locked(self.stop_lever_engaged);
                if self.stop_lever_engaged {
                    match self.config.vessel.stop_mode {
                        StopMode::Emergency => self.vessel.emergency_stop(),
                        StopMode::Gradual => self.vessel.gradual_stop(),
                    }
                }
            }
            PlayerCommand::LockControls { locked } => self.set_controls_locked(locked),
            PlayerCommand::SetHeading { x, z } => {
                if let Err(e) = self.vessel.set_heading(DVec2::new(x, z)) {
                    warn!("SetHeading ignored: {}", e);
                }
            }
            PlayerCommand::TakePhoto => self.take_photo(),
            PlayerCommand::Respawn => {
                self.set_controls_locked(false);
                self.vessel.respawn();
                self.hull.reset();
                self.touching.clear();
                self.held.clear();
                self.stop_lever_engaged = false;
                debug!("vessel respawned");
            }
            other => debug!("{:?} not handled mid-dive", other),
        }
    }

    fn set_controls_locked(&mut self, locked: bool) {
        if self.vessel.controls_locked() != locked {
            self.vessel.lock_controls(locked);
            self.events.push(SimEvent::ControlsLocked { locked });
        }
    }

    fn take_photo(&mut self) {
        if !self.shutter_ready() {
            debug!("shutter busy");
            return;
        }
        self.shutter_ready_at = self.time.elapsed_secs + self.config.mission.shutter_cooldown_secs;

        match self
            .mission
            .attempt_capture(self.vessel.position(), &mut self.events)
        {
            Ok(CaptureResult::Hit(id)) => self.pinger.on_capture(id, &self.config.ping),
            Ok(CaptureResult::Miss) => {}
            Err(e) => warn!("photo ignored: {}", e),
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Held helm buttons
        for direction in Direction::ALL {
            if !self.held.contains(&direction) {
                continue;
            }
            let field = ObstacleField::new(&self.world, self.vessel.position());
            if let Err(e) = self
                .vessel
                .apply_command(direction, DT, &field, &mut self.events)
            {
                warn!("helm command failed: {}", e);
            }
        }
        // 2. Vessel integration
        self.vessel.advance(DT);
        // 3. Hull contacts
        systems::collision::run(
            &self.world,
            &mut self.vessel,
            &mut self.hull,
            &mut self.touching,
            self.config.hull.collision_damage,
            self.time.elapsed_secs,
            &mut self.events,
        );
        // 4. Blip decay
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, DT);
        // 5. Sonar sweep
        systems::sonar::run(
            &mut self.world,
            &mut self.sweep,
            self.vessel.position(),
            &self.config.sonar,
            DT,
            &mut self.events,
        );
        // 6. Proximity pinger
        systems::ping::run(
            &mut self.pinger,
            &self.mission,
            self.vessel.position(),
            self.vessel.speed(),
            &self.config.ping,
            DT,
            &mut self.events,
        );
    }

    /// Move to the debrief once the mission or the hull has decided the dive.
    fn settle(&mut self) {
        if self.result.is_some() || !matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
            return;
        }

        let result = match self.mission.outcome() {
            MissionOutcome::Won => Some(DiveResult::Won),
            MissionOutcome::Failed => Some(DiveResult::Failed),
            MissionOutcome::InProgress if self.hull.is_destroyed() => Some(DiveResult::HullLost),
            MissionOutcome::InProgress => None,
        };

        if let Some(result) = result {
            info!("dive over: {:?}", result);
            self.result = Some(result);
            self.phase = GamePhase::Debrief;
            self.held.clear();
            self.vessel.emergency_stop();
            self.set_controls_locked(true);
        }
    }

    /// Everything back to the start of a dive. The site layout is kept.
    fn reset_dive(&mut self) {
        self.time = SimTime::default();
        self.result = None;
        self.set_controls_locked(false);
        self.vessel.respawn();
        self.mission = self.mission_template.clone();
        self.hull.reset();
        self.sweep = SonarSweep::default();
        self.pinger = ProximityPinger::new(&self.config.ping);
        self.chart.clear();
        self.touching.clear();
        self.held.clear();
        self.stop_lever_engaged = false;
        self.shutter_ready_at = 0.0;
        systems::cleanup::clear_blips(&mut self.world, &mut self.despawn_buffer);
    }

    fn notify(&mut self, events: &[SimEvent]) {
        for event in events {
            observer::dispatch(&mut self.chart, event);
            for obs in self.observers.iter_mut() {
                observer::dispatch(obs.as_mut(), event);
            }
        }
    }
}
