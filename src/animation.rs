use std::time::Duration;

/// Default spin velocity, in degrees per millisecond
pub const SPIN_VELOCITY: f32 = 3000.0 / 1000.0;
pub const DECELERATION: f32 = 0.9984;
pub const SNAP_DURATION: Duration = Duration::from_millis(300);

/// A decay is done once a step moves the value less than this
pub const REST_THRESHOLD: f32 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Decay {
    pub from: f32,
    /// units per millisecond
    pub velocity: f32,
    pub deceleration: f32,
}

impl Decay {
    pub const fn new(from: f32, velocity: f32, deceleration: f32) -> Self {
        Self {
            from,
            velocity,
            deceleration,
        }
    }

    fn friction(&self) -> f32 {
        1.0 - self.deceleration
    }

    pub fn value_at(&self, elapsed: Duration) -> f32 {
        let k = self.friction();
        if k <= 0.0 {
            return self.from + self.velocity * millis(elapsed);
        }
        self.from + (self.velocity / k) * (1.0 - (-k * millis(elapsed)).exp())
    }

    /// Where the value ends up as time goes to infinity
    pub fn resting_value(&self) -> Option<f32> {
        let k = self.friction();
        (k > 0.0).then(|| self.from + self.velocity / k)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ease {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
}

impl Ease {
    pub const fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self { from, to, duration }
    }

    pub fn value_at(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease_in_out(t)
    }
}

/// Cubic ease-in-out over `0.0..=1.0`
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Motion {
    Decay(Decay),
    Ease(Ease),
}

impl Motion {
    pub const fn from(&self) -> f32 {
        match self {
            Self::Decay(decay) => decay.from,
            Self::Ease(ease) => ease.from,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f32,
    pub finished: bool,
}

/// Drives one animated value at a time.
///
/// Starting a motion while another is running replaces it; there is no queue.
pub trait AnimationDriver {
    fn start(&mut self, motion: Motion);
    fn step(&mut self, dt: Duration) -> Option<Tick>;
    fn is_running(&self) -> bool;
}

struct Running {
    motion: Motion,
    elapsed: Duration,
    last: f32,
}

/// Advances motions by the frame time it is given
#[derive(Default)]
pub struct Timeline {
    active: Option<Running>,
}

impl Timeline {
    pub const fn new() -> Self {
        Self { active: None }
    }
}

impl AnimationDriver for Timeline {
    fn start(&mut self, motion: Motion) {
        self.active.replace(Running {
            last: motion.from(),
            motion,
            elapsed: Duration::ZERO,
        });
    }

    fn step(&mut self, dt: Duration) -> Option<Tick> {
        let running = self.active.as_mut()?;
        if dt.is_zero() {
            return Some(Tick {
                value: running.last,
                finished: false,
            });
        }

        running.elapsed += dt;
        let (value, finished) = match running.motion {
            Motion::Decay(decay) => {
                let value = decay.value_at(running.elapsed);
                (value, (value - running.last).abs() < REST_THRESHOLD)
            }
            Motion::Ease(ease) => (
                ease.value_at(running.elapsed),
                running.elapsed >= ease.duration,
            ),
        };
        running.last = value;

        if finished {
            self.active.take();
        }
        Some(Tick { value, finished })
    }

    fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

fn millis(d: Duration) -> f32 {
    d.as_secs_f32() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_to_end(driver: &mut impl AnimationDriver) -> (Tick, usize) {
        let mut frames = 0;
        loop {
            frames += 1;
            let tick = driver.step(FRAME).expect("running");
            if tick.finished {
                return (tick, frames);
            }
            assert!(frames < 10_000, "animation never settled");
        }
    }

    #[test]
    fn decay_curve() {
        let decay = Decay::new(0.0, SPIN_VELOCITY, DECELERATION);
        assert_eq!(decay.value_at(Duration::ZERO), 0.0);

        let rest = decay.resting_value().unwrap();
        assert!((rest - 1875.0).abs() < 0.5, "{rest}");

        let mut last = 0.0;
        for ms in (100..5000).step_by(100) {
            let value = decay.value_at(Duration::from_millis(ms));
            assert!(value > last && value < rest);
            last = value;
        }
    }

    #[test]
    fn decay_runs_in_reverse_too() {
        let decay = Decay::new(10.0, -SPIN_VELOCITY, DECELERATION);
        assert!(decay.value_at(Duration::from_secs(1)) < 10.0);
    }

    #[test]
    fn timeline_decay_settles_near_rest() {
        let mut timeline = Timeline::new();
        timeline.start(Motion::Decay(Decay::new(0.0, SPIN_VELOCITY, DECELERATION)));
        assert!(timeline.is_running());

        let (tick, frames) = run_to_end(&mut timeline);
        assert!(!timeline.is_running());
        assert!(frames > 10);
        assert!((tick.value - 1875.0).abs() < 10.0, "{}", tick.value);
    }

    #[test]
    fn timeline_ease_lands_exactly() {
        let mut timeline = Timeline::new();
        timeline.start(Motion::Ease(Ease::new(100.0, 108.0, SNAP_DURATION)));

        let (tick, frames) = run_to_end(&mut timeline);
        assert_eq!(tick.value, 108.0);
        assert_eq!(frames, 19); // ceil(300 / 16)
    }

    #[test]
    fn zero_dt_does_not_finish() {
        let mut timeline = Timeline::new();
        timeline.start(Motion::Decay(Decay::new(5.0, SPIN_VELOCITY, DECELERATION)));

        let tick = timeline.step(Duration::ZERO).unwrap();
        assert_eq!(tick.value, 5.0);
        assert!(!tick.finished);
    }

    #[test]
    fn starting_again_replaces_the_motion() {
        let mut timeline = Timeline::new();
        timeline.start(Motion::Decay(Decay::new(0.0, SPIN_VELOCITY, DECELERATION)));
        timeline.step(FRAME);

        timeline.start(Motion::Ease(Ease::new(50.0, 60.0, Duration::from_millis(10))));
        let tick = timeline.step(FRAME).unwrap();
        assert_eq!(tick.value, 60.0);
        assert!(tick.finished);
        assert!(timeline.step(FRAME).is_none());
    }

    #[test]
    fn ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }
}
