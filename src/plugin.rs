//! Bevy plugin hosting the walker simulation.
//!
//! `ThicketPlugin` owns the frame loop: it reads keyboard and mouse input,
//! steps the [`MotionController`] with a clamped frame delta, publishes the
//! camera pose and HUD state, and periodically culls distant trees. The
//! scene is built once, before the app starts, so a bad configuration fails
//! at construction instead of mid-frame.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use glam::DVec3;
use log::{info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::ThicketConfig;
use crate::constants::{TREE_MODEL, WALKER_MODEL};
use crate::motion::{ActorMotionState, MotionController, MoveIntent};
use crate::numeric::clamp_frame_step;
use crate::presentation::{
    camera_follow_system, CurrentPose, Hud, HudState, PlayerCamera, PresentationPose,
};
use crate::scene::{AssetRegistry, Scene, SceneBuilder, SceneError, Walker};
use crate::terrain::{HeightField, RollingHills};

/// Animation clip the spawned walker loops.
const WALKER_ANIMATION: &str = "Run";

/// Tuning shared by every system.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Settings(pub ThicketConfig);

/// The motion stepper.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct Motion(pub MotionController);

/// Terrain the walkers stand on.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Ground(pub RollingHills);

/// Placed trees, their colliders and the terrain mesh.
#[derive(Resource, Debug, Clone)]
pub struct Forest(pub Scene);

/// Models available to the scene.
#[derive(Resource, Debug, Clone, Default)]
pub struct Models(pub AssetRegistry);

/// Whether the simulation advances this frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationState {
    paused: bool,
}

impl SimulationState {
    /// Stops the simulation, e.g. when the pointer is released or the
    /// window is hidden.
    pub const fn pause(&mut self) {
        self.paused = true;
    }

    /// Restarts the simulation.
    pub const fn resume(&mut self) {
        self.paused = false;
    }

    /// True while paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }
}

/// Frames elapsed since the last culling pass.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullClock {
    frames: u32,
}

/// The player-controlled walker.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    /// Kinematic state.
    pub state: ActorMotionState,
    /// Input gathered this frame.
    pub intent: MoveIntent,
}

/// An animated walker placed in the scene.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct WalkerAgent(pub Walker);

/// Maps held keys to a movement intent.
///
/// ```
/// use bevy::prelude::*;
/// use thicket::plugin::intent_from_keys;
///
/// let mut keys = ButtonInput::<KeyCode>::default();
/// keys.press(KeyCode::KeyW);
/// keys.press(KeyCode::ShiftLeft);
/// let intent = intent_from_keys(&keys);
/// assert!(intent.forward && intent.sprint && !intent.jump);
/// ```
#[must_use]
pub fn intent_from_keys(keys: &ButtonInput<KeyCode>) -> MoveIntent {
    MoveIntent {
        forward: keys.pressed(KeyCode::KeyW),
        back: keys.pressed(KeyCode::KeyS),
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
        jump: keys.pressed(KeyCode::Space),
        sprint: keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
    }
}

/// Run condition: the simulation is not paused.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy run conditions require parameters by value, not by reference."
)]
#[must_use]
pub fn simulation_running(state: Res<SimulationState>) -> bool {
    !state.is_paused()
}

/// Pauses on Escape (pointer released) and resumes on a left click.
///
/// Runs every frame, paused or not, so a click can restart the simulation.
/// Escape wins when both arrive in the same frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn pause_input_system(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut state: ResMut<SimulationState>,
) {
    let clicked = buttons.is_some_and(|input| input.just_pressed(MouseButton::Left));
    let released = keys.is_some_and(|input| input.just_pressed(KeyCode::Escape));
    if clicked && state.is_paused() {
        state.resume();
        info!("simulation resumed");
    }
    if released && !state.is_paused() {
        state.pause();
        info!("simulation paused");
    }
}

/// Copies the keyboard state into each player's intent.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn gather_intent_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut players: Query<&mut Player>,
) {
    let intent = keys.map_or_else(MoveIntent::default, |input| intent_from_keys(&input));
    for mut player in &mut players {
        player.intent = intent;
    }
}

/// Turns each player's view by this frame's mouse motion.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn mouse_look_system(
    mouse: Option<Res<AccumulatedMouseMotion>>,
    motion: Res<Motion>,
    mut players: Query<&mut Player>,
) {
    let Some(mouse) = mouse else {
        return;
    };
    if mouse.delta == Vec2::ZERO {
        return;
    }
    let sensitivity = motion.0.config().mouse_sensitivity;
    for mut player in &mut players {
        player.state.facing.apply_mouse_delta(
            f64::from(mouse.delta.x),
            f64::from(mouse.delta.y),
            sensitivity,
        );
    }
}

/// Steps every player and publishes the resulting pose and HUD.
#[expect(
    clippy::needless_pass_by_value,
    clippy::too_many_arguments,
    reason = "Bevy systems take their resources by value as separate parameters."
)]
pub fn player_motion_system(
    time: Res<Time>,
    settings: Res<Settings>,
    motion: Res<Motion>,
    ground: Res<Ground>,
    forest: Res<Forest>,
    mut pose: ResMut<CurrentPose>,
    mut hud: ResMut<Hud>,
    mut players: Query<&mut Player>,
) {
    let delta = clamp_frame_step(time.delta_secs_f64(), settings.0.host.max_frame_step);
    let controller = &motion.0;
    for mut player in &mut players {
        let Player { state, intent } = &mut *player;
        let frame = controller.step(state, *intent, delta, &forest.0.colliders, &ground.0);
        hud.0 = HudState::from_step(state, *intent, &frame, controller.config().max_stamina);
        pose.0 = frame.pose;
    }
}

/// Advances walker animation clocks.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn walker_animation_system(
    time: Res<Time>,
    settings: Res<Settings>,
    mut walkers: Query<&mut WalkerAgent>,
) {
    let delta = clamp_frame_step(time.delta_secs_f64(), settings.0.host.max_frame_step);
    for mut walker in &mut walkers {
        walker.0.advance(delta);
    }
}

/// Hides trees beyond the cull distance every `cull_interval` frames.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn tree_culling_system(
    settings: Res<Settings>,
    pose: Res<CurrentPose>,
    mut clock: ResMut<CullClock>,
    mut forest: ResMut<Forest>,
) {
    clock.frames = clock.frames.wrapping_add(1);
    if !clock.frames.is_multiple_of(settings.0.host.cull_interval.max(1)) {
        return;
    }
    let visible = forest.0.cull_around(pose.0.position, settings.0.scene.cull_distance);
    trace!("{visible} of {} trees visible", forest.0.obstacles.len());
}

/// Spawns the player, its camera and a walker at the origin.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn spawn_player_system(
    mut commands: Commands,
    settings: Res<Settings>,
    motion: Res<Motion>,
    ground: Res<Ground>,
    models: Res<Models>,
    mut pose: ResMut<CurrentPose>,
) {
    let eye_height = motion.0.config().eye_height;
    let spawn = DVec3::new(0.0, ground.0.height(0.0, 0.0) + eye_height, 0.0);
    let state = motion.0.spawn(spawn);
    pose.0 = PresentationPose::new(state.position, state.facing, 0.0);

    commands.spawn((
        Player {
            state,
            intent: MoveIntent::default(),
        },
        Name::new("Player"),
    ));
    commands.spawn((PlayerCamera, pose.0.to_transform(), Name::new("PlayerCamera")));

    if let Some(walker) = SceneBuilder::new(&settings.0.scene, &ground.0).place_walker(
        &models.0,
        spawn.x,
        spawn.z,
        WALKER_ANIMATION,
    ) {
        commands.spawn((WalkerAgent(walker), Name::new("Walker")));
    }
    info!("player spawned at {spawn}");
}

/// Plugin wiring the simulation into a Bevy app.
///
/// ```no_run
/// use bevy::prelude::*;
/// use thicket::config::ThicketConfig;
/// use thicket::ThicketPlugin;
///
/// # fn main() -> Result<(), thicket::scene::SceneError> {
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(ThicketPlugin::new(ThicketConfig::default())?)
///     .run();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ThicketPlugin {
    config: ThicketConfig,
    models: AssetRegistry,
    scene: Scene,
}

impl ThicketPlugin {
    /// Registers the models and builds the forest described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] when the forest cannot be assembled.
    pub fn new(config: ThicketConfig) -> Result<Self, SceneError> {
        let mut models = AssetRegistry::new();
        models.register(TREE_MODEL);
        models.register(WALKER_MODEL);
        let hills = RollingHills::default();
        let scene = SceneBuilder::new(&config.scene, &hills)
            .build(&models, &mut StdRng::seed_from_u64(config.scene.seed))?;
        Ok(Self {
            config,
            models,
            scene,
        })
    }

    /// The configuration the plugin was built with.
    #[must_use]
    pub const fn config(&self) -> &ThicketConfig {
        &self.config
    }

    /// The forest the plugin will install.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Plugin for ThicketPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Settings(self.config.clone()))
            .insert_resource(Motion(MotionController::new(self.config.motion.clone())))
            .insert_resource(Ground(RollingHills::default()))
            .insert_resource(Forest(self.scene.clone()))
            .insert_resource(Models(self.models.clone()))
            .init_resource::<SimulationState>()
            .init_resource::<CullClock>()
            .init_resource::<CurrentPose>()
            .init_resource::<Hud>()
            .add_systems(Startup, spawn_player_system)
            .add_systems(Update, pause_input_system.before(gather_intent_system))
            .add_systems(
                Update,
                (
                    gather_intent_system,
                    mouse_look_system,
                    player_motion_system,
                    walker_animation_system,
                    tree_culling_system,
                )
                    .chain()
                    .run_if(simulation_running),
            )
            .add_systems(Update, camera_follow_system.after(tree_culling_system));
    }
}
