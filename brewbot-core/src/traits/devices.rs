//! Device facade
//!
//! Bundles every collaborator the executor drives. Boards implement this
//! once, handing out their concrete probes and actuators by identity.

use super::{Actuator, Beeper, BinaryOutput, TemperatureProbe};
use crate::config::{ActuatorId, ProbeId};

/// Access to the board's probes, actuators and outputs
pub trait Devices {
    /// Temperature probe for an identity
    fn probe(&mut self, id: ProbeId) -> &mut dyn TemperatureProbe;

    /// PID actuator for an identity
    fn actuator(&mut self, id: ActuatorId) -> &mut dyn Actuator;

    /// Front panel indicator light
    fn indicator(&mut self) -> &mut dyn BinaryOutput;

    /// Kettle fan
    fn fan(&mut self) -> &mut dyn BinaryOutput;

    /// Buzzer
    fn beeper(&mut self) -> &mut dyn Beeper;
}
