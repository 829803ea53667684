use std::time::Duration;

use crate::{
    animation::{
        AnimationDriver, Decay, Ease, Motion, Timeline, DECELERATION, SNAP_DURATION, SPIN_VELOCITY,
    },
    wheel::{self, Wheel},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Decay,
    Snap,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Settled {
    pub index: usize,
    pub value: u32,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning(Phase),
    Settled(Settled),
}

impl SpinState {
    /// Whether a new gesture may start a spin
    pub const fn is_idle(&self) -> bool {
        !matches!(self, Self::Spinning(..))
    }

    pub const fn winner(&self) -> Option<Settled> {
        match self {
            Self::Settled(settled) => Some(*settled),
            _ => None,
        }
    }
}

/// Where a spin request came from
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpinInput {
    Button,
    /// Release velocity of the drag, in points per second
    Gesture { velocity: f32 },
}

/// How the initial decay velocity is picked
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VelocityMode {
    /// Always spin with [`SPIN_VELOCITY`]
    #[default]
    Fixed,
    /// Use the drag's release velocity, falling back to [`SPIN_VELOCITY`] when it's too slow
    Gesture,
}

impl VelocityMode {
    /// Releases slower than this (in degrees per millisecond) use the fixed velocity
    const MIN_GESTURE_VELOCITY: f32 = 0.5;
    const MAX_GESTURE_VELOCITY: f32 = 8.0;

    pub fn resolve(&self, input: SpinInput) -> f32 {
        match (self, input) {
            (Self::Gesture, SpinInput::Gesture { velocity }) => {
                // points per second, treated one-to-one as degrees
                let velocity = velocity / 1000.0;
                if velocity.abs() < Self::MIN_GESTURE_VELOCITY {
                    SPIN_VELOCITY
                } else {
                    velocity.clamp(-Self::MAX_GESTURE_VELOCITY, Self::MAX_GESTURE_VELOCITY)
                }
            }
            _ => SPIN_VELOCITY,
        }
    }
}

/// Owns the wheel's rotation and sequences decay, snap and winner selection
pub struct SpinController<D = Timeline> {
    driver: D,
    angle: f32,
    state: SpinState,
    velocity_mode: VelocityMode,
    spins: u64,
}

impl Default for SpinController<Timeline> {
    fn default() -> Self {
        Self::new(Timeline::new())
    }
}

impl<D> SpinController<D>
where
    D: AnimationDriver,
{
    pub const fn new(driver: D) -> Self {
        Self {
            driver,
            angle: 0.0,
            state: SpinState::Idle,
            velocity_mode: VelocityMode::Fixed,
            spins: 0,
        }
    }

    pub fn with_velocity_mode(self, velocity_mode: VelocityMode) -> Self {
        Self {
            velocity_mode,
            ..self
        }
    }

    /// Cumulative rotation, in degrees
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    pub const fn state(&self) -> SpinState {
        self.state
    }

    pub const fn is_idle(&self) -> bool {
        self.state.is_idle()
    }

    /// How many spins have been started, re-triggers included
    pub const fn spin_count(&self) -> u64 {
        self.spins
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// The one way a spin starts, whether from a drag or the button
    pub fn start_spin(&mut self, input: SpinInput) {
        if !self.is_idle() {
            log::warn!("spin requested while {:?}, restarting", self.state);
        }

        let velocity = self.velocity_mode.resolve(input);
        log::info!(
            "spinning from {:.1} at {velocity:.3} deg/ms ({input:?})",
            self.angle
        );

        self.spins += 1;
        self.state = SpinState::Spinning(Phase::Decay);
        self.driver.start(Motion::Decay(Decay::new(
            self.angle,
            velocity,
            DECELERATION,
        )));
    }

    /// Advances the running animation. Returns the result once a spin settles.
    pub fn update(&mut self, dt: Duration, wheel: &Wheel) -> Option<Settled> {
        let phase = match self.state {
            SpinState::Spinning(phase) => phase,
            _ => return None,
        };

        let tick = match self.driver.step(dt) {
            Some(tick) => tick,
            None => {
                log::warn!("driver stopped during {phase:?}");
                return self.settle(wheel);
            }
        };

        self.angle = tick.value;
        if !tick.finished {
            return None;
        }

        match phase {
            Phase::Decay => {
                self.begin_snap(wheel);
                None
            }
            Phase::Snap => self.settle(wheel),
        }
    }

    fn begin_snap(&mut self, wheel: &Wheel) {
        self.angle = wheel::normalize(self.angle);
        let target = wheel::snap(self.angle, wheel.segment_width());
        log::info!("snapping {:.2} -> {target:.2}", self.angle);

        self.state = SpinState::Spinning(Phase::Snap);
        self.driver
            .start(Motion::Ease(Ease::new(self.angle, target, SNAP_DURATION)));
    }

    fn settle(&mut self, wheel: &Wheel) -> Option<Settled> {
        let slice = match wheel.winner(self.angle) {
            Some(slice) => slice,
            None => {
                self.state = SpinState::Idle;
                return None;
            }
        };

        let settled = Settled {
            index: slice.index,
            value: slice.value,
        };
        log::info!(
            "settled at {:.1}: segment {} wins {}",
            self.angle,
            settled.index,
            settled.value
        );

        self.state = SpinState::Settled(settled);
        Some(settled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{animation::Tick, wheel::WheelSpec};

    /// Finishes each motion after a fixed number of steps
    struct Scripted {
        motion: Option<Motion>,
        steps: usize,
        started: Vec<Motion>,
        decay_steps: usize,
        decay_lands_at: f32,
    }

    impl Scripted {
        fn new(decay_steps: usize, decay_lands_at: f32) -> Self {
            Self {
                motion: None,
                steps: 0,
                started: Vec::new(),
                decay_steps,
                decay_lands_at,
            }
        }
    }

    impl AnimationDriver for Scripted {
        fn start(&mut self, motion: Motion) {
            self.steps = 0;
            self.started.push(motion);
            self.motion.replace(motion);
        }

        fn step(&mut self, dt: Duration) -> Option<Tick> {
            let motion = self.motion?;
            self.steps += 1;

            let tick = match motion {
                Motion::Decay(decay) => {
                    let finished = self.steps >= self.decay_steps;
                    let value = if finished {
                        self.decay_lands_at
                    } else {
                        decay.value_at(dt * self.steps as u32)
                    };
                    Tick { value, finished }
                }
                Motion::Ease(ease) => {
                    let elapsed = dt * self.steps as u32;
                    Tick {
                        value: ease.value_at(elapsed),
                        finished: elapsed >= ease.duration,
                    }
                }
            };

            if tick.finished {
                self.motion.take();
            }
            Some(tick)
        }

        fn is_running(&self) -> bool {
            self.motion.is_some()
        }
    }

    const FRAME: Duration = Duration::from_millis(100);

    fn wheel() -> Wheel {
        Wheel::build(
            &mut fastrand::Rng::with_seed(11),
            WheelSpec::new(10, 200.0),
        )
    }

    fn run(controller: &mut SpinController<Scripted>, wheel: &Wheel) -> (Settled, Vec<SpinState>) {
        let mut seen = vec![controller.state()];
        for _ in 0..100 {
            let result = controller.update(FRAME, wheel);
            seen.push(controller.state());
            if let Some(result) = result {
                return (result, seen);
            }
        }
        panic!("never settled: {seen:?}")
    }

    #[test]
    fn full_spin_sequence() {
        let wheel = wheel();
        let mut controller = SpinController::new(Scripted::new(5, 1875.0 + 14.0));
        assert_eq!(controller.state(), SpinState::Idle);
        assert!(controller.is_idle());

        controller.start_spin(SpinInput::Gesture { velocity: 120.0 });
        assert!(!controller.is_idle());
        assert_eq!(controller.state(), SpinState::Spinning(Phase::Decay));

        let (settled, seen) = run(&mut controller, &wheel);

        // 1889 % 360 = 89, snapped to 72
        assert_eq!(controller.angle(), 72.0);
        assert_eq!(settled.index, 2);
        assert_eq!(settled.value, wheel.slices()[2].value);
        assert_eq!(controller.state(), SpinState::Settled(settled));
        assert!(controller.is_idle());

        assert!(seen.contains(&SpinState::Spinning(Phase::Snap)));
        let snap = controller.driver().started[1];
        assert_eq!(
            snap,
            Motion::Ease(Ease::new(89.0, 72.0, SNAP_DURATION))
        );
    }

    #[test]
    fn snap_takes_300ms() {
        let wheel = wheel();
        let mut controller = SpinController::new(Scripted::new(1, 10.0));
        controller.start_spin(SpinInput::Button);

        assert!(controller.update(FRAME, &wheel).is_none());
        assert_eq!(controller.state(), SpinState::Spinning(Phase::Snap));

        assert!(controller.update(FRAME, &wheel).is_none());
        assert!(controller.update(FRAME, &wheel).is_none());
        let settled = controller.update(FRAME, &wheel).expect("settles at 300ms");
        assert_eq!(settled.index, 0);
    }

    #[test]
    fn button_and_gesture_share_one_path() {
        let wheel = wheel();

        let mut by_button = SpinController::new(Scripted::new(3, 500.0));
        by_button.start_spin(SpinInput::Button);
        let (a, _) = run(&mut by_button, &wheel);

        let mut by_gesture = SpinController::new(Scripted::new(3, 500.0));
        by_gesture.start_spin(SpinInput::Gesture { velocity: -900.0 });
        let (b, _) = run(&mut by_gesture, &wheel);

        assert_eq!(a, b);
        assert_eq!(by_button.driver().started, by_gesture.driver().started);
    }

    #[test]
    fn reverse_spin_is_direction_agnostic() {
        let wheel = wheel();
        let mut controller = SpinController::new(Scripted::new(2, -36.0 - 720.0));
        controller.start_spin(SpinInput::Button);
        let (settled, _) = run(&mut controller, &wheel);

        assert_eq!(controller.angle(), -36.0);
        assert_eq!(settled.index, 1);
    }

    #[test]
    fn respinning_after_settling_starts_from_the_settled_angle() {
        let wheel = wheel();
        let mut controller = SpinController::new(Scripted::new(2, 100.0));
        controller.start_spin(SpinInput::Button);
        run(&mut controller, &wheel);
        assert_eq!(controller.angle(), 108.0);

        controller.start_spin(SpinInput::Button);
        assert_eq!(controller.state(), SpinState::Spinning(Phase::Decay));
        assert_eq!(controller.state().winner(), None);
        assert_eq!(controller.driver().started[2].from(), 108.0);
    }

    #[test]
    fn retrigger_mid_spin_replaces_the_animation() {
        let wheel = wheel();
        let mut controller = SpinController::new(Scripted::new(4, 200.0));
        controller.start_spin(SpinInput::Button);
        controller.update(FRAME, &wheel);
        let mid = controller.angle();

        controller.start_spin(SpinInput::Button);
        assert_eq!(controller.driver().started.len(), 2);
        assert_eq!(controller.driver().started[1].from(), mid);
        assert_eq!(controller.spin_count(), 2);

        let (settled, _) = run(&mut controller, &wheel);
        assert_eq!(settled.index, winner_index_for(200.0));
    }

    fn winner_index_for(angle: f32) -> usize {
        wheel::winner_index(wheel::snap(wheel::normalize(angle), 36.0), 10)
    }

    #[test]
    fn idle_update_is_a_noop() {
        let wheel = wheel();
        let mut controller = SpinController::new(Scripted::new(1, 0.0));
        assert!(controller.update(FRAME, &wheel).is_none());
        assert_eq!(controller.angle(), 0.0);
        assert!(controller.driver().started.is_empty());
    }

    #[test]
    fn empty_wheel_returns_to_idle() {
        let empty = Wheel::build(&mut fastrand::Rng::with_seed(0), WheelSpec::new(0, 200.0));
        let mut controller = SpinController::new(Scripted::new(1, 50.0));
        controller.start_spin(SpinInput::Button);

        for _ in 0..10 {
            assert!(controller.update(FRAME, &empty).is_none());
        }
        assert_eq!(controller.state(), SpinState::Idle);
    }

    #[test]
    fn velocity_modes() {
        let fixed = VelocityMode::Fixed;
        assert_eq!(fixed.resolve(SpinInput::Button), SPIN_VELOCITY);
        assert_eq!(fixed.resolve(SpinInput::Gesture { velocity: 4000.0 }), SPIN_VELOCITY);

        let gesture = VelocityMode::Gesture;
        assert_eq!(gesture.resolve(SpinInput::Button), SPIN_VELOCITY);
        assert_eq!(gesture.resolve(SpinInput::Gesture { velocity: 100.0 }), SPIN_VELOCITY);
        assert_eq!(gesture.resolve(SpinInput::Gesture { velocity: -2000.0 }), -2.0);
        assert_eq!(gesture.resolve(SpinInput::Gesture { velocity: 50_000.0 }), 8.0);
    }

    #[test]
    fn timeline_spin_settles_on_a_boundary() {
        let wheel = wheel();
        let mut controller = SpinController::default();
        controller.start_spin(SpinInput::Button);

        let mut result = None;
        for _ in 0..10_000 {
            if let Some(settled) = controller.update(Duration::from_millis(16), &wheel) {
                result.replace(settled);
                break;
            }
        }

        let settled = result.expect("spin settles");
        let angle = controller.angle();
        assert!(angle.abs() <= 360.0);
        assert_eq!(angle % 36.0, 0.0);
        assert_eq!(settled.value, wheel.slices()[settled.index].value);
    }
}
