//! Adapter over the SGP4 perturbation model.
//!
//! One `Satellite` owns the model constants derived from one element set.
//! Initialization happens once at load time; propagation is stateless given
//! the constants and a wall-clock instant, so nothing carries between ticks.

use chrono::{DateTime, NaiveDateTime, Utc};
use sgp4::Constants;
use thiserror::Error;

use crate::tle::ElementSet;
use crate::types::Eci;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("malformed element set: {0}")]
    Elements(String),
    #[error("propagator rejected element set: {0}")]
    Constants(String),
}

pub struct Satellite {
    constants: Constants,
    name: String,
    epoch: NaiveDateTime, //Epoch of the structs TLE
}

impl Satellite {
    ///Runs the model's initialization step for one element set. A body whose
    ///elements the model rejects is dropped by the caller, not retried.
    pub fn from_element_set(set: &ElementSet) -> Result<Satellite, InitError> {
        let elements = sgp4::Elements::from_tle(
            Some(set.name.clone()),
            set.line1.as_bytes(),
            set.line2.as_bytes(),
        )
        .map_err(|e| InitError::Elements(format!("{e:?}")))?;
        let constants = Constants::from_elements(&elements)
            .map_err(|e| InitError::Constants(format!("{e:?}")))?;
        Ok(Satellite {
            constants,
            name: set.name.clone(),
            epoch: elements.datetime,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch.and_utc()
    }

    ///ECI position and velocity (km, km/s) at a wall-clock UTC instant.
    ///Model-internal failure for this instant (decayed orbit, numerical
    ///blow-up) yields `None` so one bad body never aborts a batch.
    pub fn propagate_at(&self, time: DateTime<Utc>) -> Option<Eci> {
        let seconds = time.timestamp_millis() as f64 / 1000.
            - self.epoch.and_utc().timestamp_millis() as f64 / 1000.;
        let prop = self.constants.propagate(seconds / 60.).ok()?;
        Some(Eci {
            x: prop.position[0],
            y: prop.position[1],
            z: prop.position[2],
            vx: prop.velocity[0],
            vy: prop.velocity[1],
            vz: prop.velocity[2],
        })
    }
}
