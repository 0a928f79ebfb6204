//! Gate control loop
//!
//! The single owner of the controller state. Every iteration:
//! 1. Takes one pending key event (without waiting) and applies it
//! 2. Unless the alert level is being edited, samples the water level (in
//!    real mode), drives the gate servo and alarm relay, refreshes the
//!    display and waits for the next cycle
//!
//! While the alert level is being edited nothing is sampled or actuated;
//! the loop just waits for the next key.
//!
//! # Timing
//! - Cycle period 300ms, plus the sampling pass in real mode
//! - A sampling pass blocks this task for at most 35 pings, each bounded by
//!   two echo timeouts (1.75s)
//! - Confirmation notices hold the display for 1.5s before the refresh

use defmt::{debug, info, warn};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::pwm::{PioPwm, PioPwmProgram};
use embassy_time::{Duration, Timer};
use flood_gate_core::config::{CYCLE_PERIOD_MS, NOTICE_HOLD_MS, SPLASH_HOLD_MS};
use flood_gate_core::engine::{ActuatorOutput, ServoCalibration};
use flood_gate_core::keypad::Key;
use flood_gate_core::sampler::DistanceSampler;
use flood_gate_core::screen::Screen;
use flood_gate_core::state::{Confirmation, Reaction, SystemState};

use crate::devices::hcsr04::Hcsr04;
use crate::devices::servo::Servo;
use crate::system::event::{self, Events};
use crate::system::frame;
use crate::system::resources::{AlarmResources, GateResources, Irqs, RangingResources};

/// Time between sample/actuate cycles
const CYCLE_PERIOD: Duration = Duration::from_millis(CYCLE_PERIOD_MS);

/// How long a notice stays up before the status returns
const NOTICE_HOLD: Duration = Duration::from_millis(NOTICE_HOLD_MS);

/// Boot splash duration, also lets the sensor and servo power settle
const SPLASH_HOLD: Duration = Duration::from_millis(SPLASH_HOLD_MS);

/// Gate servo and alarm relay
struct Actuators<'d> {
    gate: Servo<'d, PIO0, 0>,
    alarm: Output<'d>,
}

impl Actuators<'_> {
    /// Drives the outputs for the current state and shows the status frame
    fn apply(&mut self, state: &SystemState) -> ActuatorOutput {
        let output = state.outputs();

        self.gate.set_angle(output.gate_angle_deg);
        self.alarm.set_level(Level::from(output.alarm_on));
        frame::show(Screen::status(state, &output));

        debug!(
            "distance {}cm, gate {}deg, alarm {}, tier {:?}",
            state.distance(),
            output.gate_angle_deg,
            output.alarm_on,
            output.tier
        );
        output
    }
}

/// Gate control task
#[embassy_executor::task]
pub async fn gate_control(ranging: RangingResources, gate: GateResources, alarm: AlarmResources) {
    let sensor = Hcsr04::new(
        Output::new(ranging.trigger_pin, Level::Low),
        Input::new(ranging.echo_pin, Pull::None),
    );
    let mut sampler = DistanceSampler::new(sensor);

    let Pio {
        mut common, sm0, ..
    } = Pio::new(gate.pio, Irqs);
    let prg = PioPwmProgram::new(&mut common);
    let pwm_pio = PioPwm::new(&mut common, sm0, gate.pin, &prg);

    let mut actuators = Actuators {
        gate: Servo::new(pwm_pio, ServoCalibration::GATE),
        alarm: Output::new(alarm.relay_pin, Level::Low),
    };

    let mut state = SystemState::new();

    frame::show(Screen::splash());
    Timer::after(SPLASH_HOLD).await;
    actuators.apply(&state);
    info!("Gate control started: {}", state);

    loop {
        // Editing the alert level pauses the cycle, so there is nothing to do
        // but wait for the next key.
        let event = if state.cycle_due() {
            event::try_next()
        } else {
            Some(event::wait().await)
        };

        if let Some(Events::KeyPressed(key)) = event {
            handle_key(&mut state, key, &mut actuators).await;
        }

        if state.cycle_due() {
            if state.wants_sensor() {
                let reading = sampler.sample().await;
                let pass = sampler.last_pass();
                if !pass.is_complete() {
                    warn!(
                        "Ranging gave {} valid echoes in {} attempts, assuming clear",
                        pass.valid, pass.attempts
                    );
                }
                state.apply_reading(reading);
            }

            actuators.apply(&state);
            Timer::after(CYCLE_PERIOD).await;
        }
    }
}

/// Applies a key press and presents its outcome
async fn handle_key(state: &mut SystemState, key: Key, actuators: &mut Actuators<'_>) {
    let reaction = state.handle_key(key);

    match reaction {
        Reaction::Ignored => {}
        Reaction::Echo => frame::show(Screen::entry(state)),
        Reaction::SimulationPrompt => {
            info!("Simulation mode");
            frame::show(Screen::simulation_prompt());
        }
        Reaction::RealMode => {
            info!("Real mode");
            frame::show(Screen::real_notice());
            Timer::after(NOTICE_HOLD).await;
            actuators.apply(state);
        }
        Reaction::ConfigPrompt => {
            info!("Configuring alert level");
            frame::show(Screen::config_prompt());
        }
        Reaction::Refresh => {
            info!("Alert configuration cancelled");
            actuators.apply(state);
        }
        Reaction::Confirmed(confirmation) => {
            match confirmation {
                Confirmation::AlertSaved(thresholds) => info!(
                    "Alert level {}cm, caution level {}cm",
                    thresholds.alert(),
                    thresholds.caution()
                ),
                Confirmation::AlertRejected(e) => warn!("Alert level rejected: {}", e),
                Confirmation::DistanceSimulated(cm) => info!("Simulated distance {}cm", cm),
                Confirmation::Discarded => debug!("Nothing to confirm"),
            }

            if let Some(notice) = Screen::confirmation(&confirmation) {
                frame::show(notice);
            }
            Timer::after(NOTICE_HOLD).await;
            actuators.apply(state);
        }
    }
}
