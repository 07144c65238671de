//! Shortcuts for driving a [`MotionController`] through many frames.

use thicket::{
    ActorMotionState, HeightField, MotionController, MotionFrame, MoveIntent,
    ProximityColliderSet,
};

/// Forward held, nothing else.
pub const HELD_FORWARD: MoveIntent = MoveIntent {
    forward: true,
    back: false,
    left: false,
    right: false,
    jump: false,
    sprint: false,
};

/// Builds an intent from the letters of `keys`: `w`, `s`, `a`, `d`, `j`
/// (jump) and `r` (run).
///
/// # Examples
/// ```
/// let intent = test_utils::intent("wr");
/// assert!(intent.forward && intent.sprint && !intent.back);
/// ```
#[must_use]
pub fn intent(keys: &str) -> MoveIntent {
    MoveIntent {
        forward: keys.contains('w'),
        back: keys.contains('s'),
        left: keys.contains('a'),
        right: keys.contains('d'),
        jump: keys.contains('j'),
        sprint: keys.contains('r'),
    }
}

/// Steps `state` `frames` times with the same intent and delta and returns
/// every frame produced.
pub fn step_many<H: HeightField + ?Sized>(
    controller: &MotionController,
    state: &mut ActorMotionState,
    intent: MoveIntent,
    delta: f64,
    frames: usize,
    colliders: &ProximityColliderSet,
    terrain: &H,
) -> Vec<MotionFrame> {
    (0..frames)
        .map(|_| controller.step(state, intent, delta, colliders, terrain))
        .collect()
}
