//! Bevy app fixture for behavioural tests of `ThicketPlugin`.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use thicket::config::{SceneConfig, ThicketConfig};
use thicket::presentation::{CurrentPose, Hud, HudState, PresentationPose};
use thicket::{Player, SimulationState, ThicketPlugin};

use crate::thread_safe_app::{lock_app, SharedApp, ThreadSafeApp};

/// Frame length fed to the app on every tick.
pub const FRAME: f64 = 1.0 / 60.0;

/// A headless app running `ThicketPlugin` on a fixed clock.
#[derive(Debug, Clone)]
pub struct SimFixture {
    app: SharedApp,
}

impl SimFixture {
    /// Builds the app with a small forest and runs the startup frame.
    pub fn bootstrap() -> Self {
        let config = ThicketConfig {
            scene: SceneConfig {
                tree_count: 60,
                terrain_segments: 8,
                ..SceneConfig::default()
            },
            ..ThicketConfig::default()
        };
        let plugin = ThicketPlugin::new(config)
            .unwrap_or_else(|e| panic!("plugin construction failed: {e}"));

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
                FRAME,
            )))
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ButtonInput<MouseButton>>()
            .add_plugins(plugin);
        app.finish();
        app.cleanup();
        app.update();

        Self {
            app: Arc::new(Mutex::new(ThreadSafeApp(app))),
        }
    }

    /// Locks the underlying `App`.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// Advances `frames` ticks.
    pub fn tick(&self, frames: usize) {
        let mut app = self.app_guard();
        for _ in 0..frames {
            app.update();
        }
    }

    /// Replaces the held keys with `keys`.
    pub fn hold(&self, keys: &[KeyCode]) {
        let mut app = self.app_guard();
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release_all();
        for key in keys {
            input.press(*key);
        }
    }

    /// Taps Escape for one frame, releasing the pointer.
    pub fn press_escape(&self) {
        self.tap(KeyCode::Escape);
    }

    /// Clicks the left mouse button for one frame.
    pub fn click(&self) {
        self.tap(MouseButton::Left);
    }

    /// True while the simulation is paused.
    pub fn is_paused(&self) -> bool {
        self.app_guard()
            .world()
            .resource::<SimulationState>()
            .is_paused()
    }

    fn tap<T>(&self, button: T)
    where
        T: Copy + Eq + std::hash::Hash + Send + Sync + 'static,
    {
        let mut app = self.app_guard();
        app.world_mut().resource_mut::<ButtonInput<T>>().press(button);
        app.update();
        // Without `InputPlugin` nothing clears the edge, so do it here.
        let mut input = app.world_mut().resource_mut::<ButtonInput<T>>();
        input.release(button);
        input.clear();
    }

    /// Snapshot of the single player.
    pub fn player(&self) -> Player {
        let mut app = self.app_guard();
        let world = app.world_mut();
        let mut query = world.query::<&Player>();
        query
            .single(world)
            .unwrap_or_else(|e| panic!("expected one player: {e}"))
            .clone()
    }

    /// Latest published camera pose.
    pub fn pose(&self) -> PresentationPose {
        self.app_guard().world().resource::<CurrentPose>().0
    }

    /// Latest published HUD state.
    pub fn hud(&self) -> HudState {
        self.app_guard().world().resource::<Hud>().0
    }
}
