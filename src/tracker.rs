//! Batch position updates for the tracked constellation.
//!
//! The tracker owns a flat stride-3 buffer of render positions, one slot per
//! tracked body, in a fixed order matched to the renderer's point geometry.
//! It is the buffer's only writer; the renderer only reads. A tick finishes
//! every slot before the new live count becomes visible, so a reader never
//! observes a half-written tick.

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::satellite::Satellite;
use crate::tle::ElementSet;
use crate::transform::eci_to_render_position;
use crate::types::RenderPosition;

///Wall-clock update period. Ticks are clock-driven, not frame-driven; a slow
///tick delays the next one rather than overlapping it.
pub const TICK_PERIOD_SECONDS: i64 = 1;

pub struct SatelliteTracker {
    satellites: Vec<Satellite>,
    positions: Vec<f64>,
    live_count: usize,
    radius: f64,
    last_tick: DateTime<Utc>,
}

impl SatelliteTracker {
    ///Builds the tracked set from freshly parsed element sets. Bodies the
    ///model rejects, and bodies with no valid position at load time, are
    ///dropped here so every buffer slot holds a real position from the
    ///start. Membership is fixed until the next full refresh.
    pub fn new(sets: &[ElementSet], radius: f64, start: DateTime<Utc>) -> SatelliteTracker {
        let mut satellites = Vec::new();
        let mut positions = Vec::new();
        for set in sets {
            let sat = match Satellite::from_element_set(set) {
                Ok(sat) => sat,
                Err(e) => {
                    warn!("dropping {}: {}", set.name, e);
                    continue;
                }
            };
            let position = sat
                .propagate_at(start)
                .and_then(|eci| eci_to_render_position(&eci, start, radius));
            let Some(position) = position else {
                warn!("dropping {}: no position at load time", sat.name());
                continue;
            };
            positions.extend_from_slice(&[position.x, position.y, position.z]);
            satellites.push(sat);
        }
        debug!("tracking {} of {} element sets", satellites.len(), sets.len());
        let live_count = satellites.len();
        SatelliteTracker {
            satellites,
            positions,
            live_count,
            radius,
            last_tick: start,
        }
    }

    ///One full batch update. Each body that yields a valid position gets its
    ///slot rewritten; a body that misses this tick keeps its previous
    ///position, stale but valid, so transient failures never snap a point to
    ///the origin. Returns the live count for this tick.
    pub fn tick(&mut self, now: DateTime<Utc>) -> usize {
        let mut live = 0;
        for (slot, sat) in self.satellites.iter().enumerate() {
            let position = sat
                .propagate_at(now)
                .and_then(|eci| eci_to_render_position(&eci, now, self.radius));
            write_slot(&mut self.positions, slot, position);
            if position.is_some() {
                live += 1;
            }
        }
        self.live_count = live;
        self.last_tick = now;
        live
    }

    ///Cadence gate for callers driven by a render loop: runs a tick only
    ///when a full period has elapsed since the last one.
    pub fn maybe_tick(&mut self, now: DateTime<Utc>) -> Option<usize> {
        if (now - self.last_tick).num_seconds() < TICK_PERIOD_SECONDS {
            return None;
        }
        Some(self.tick(now))
    }

    ///The shared position buffer: stride 3, one (x, y, z) triplet per body,
    ///slot order fixed for the lifetime of the tracked set.
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    ///Number of bodies that produced a valid position on the latest tick.
    ///The only aggregate signal exposed to the UI layer.
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }
}

///`None` leaves the slot untouched.
fn write_slot(positions: &mut [f64], slot: usize, position: Option<RenderPosition>) {
    if let Some(p) = position {
        positions[slot * 3] = p.x;
        positions[slot * 3 + 1] = p.y;
        positions[slot * 3 + 2] = p.z;
    }
}
