use std::fmt;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{HudError, Result};

/// Value every field falls back to when a payload leaves it out.
pub const DEFAULT_STATUS_VALUE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusField {
    Health,
    Shield,
    Hunger,
    Thirst,
}

impl StatusField {
    pub const ALL: [StatusField; 4] = [
        StatusField::Health,
        StatusField::Shield,
        StatusField::Hunger,
        StatusField::Thirst,
    ];

    /// Key used for this field in status payloads.
    pub fn name(self) -> &'static str {
        match self {
            StatusField::Health => "health",
            StatusField::Shield => "shield",
            StatusField::Hunger => "hunger",
            StatusField::Thirst => "thirst",
        }
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The four values the HUD displays, as of the last update.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub health: f64,
    pub shield: f64,
    pub hunger: f64,
    pub thirst: f64,
}

impl StatusSnapshot {
    pub fn get(&self, field: StatusField) -> f64 {
        match field {
            StatusField::Health => self.health,
            StatusField::Shield => self.shield,
            StatusField::Hunger => self.hunger,
            StatusField::Thirst => self.thirst,
        }
    }

    fn slot_mut(&mut self, field: StatusField) -> &mut f64 {
        match field {
            StatusField::Health => &mut self.health,
            StatusField::Shield => &mut self.shield,
            StatusField::Hunger => &mut self.hunger,
            StatusField::Thirst => &mut self.thirst,
        }
    }
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            health: DEFAULT_STATUS_VALUE,
            shield: DEFAULT_STATUS_VALUE,
            hunger: DEFAULT_STATUS_VALUE,
            thirst: DEFAULT_STATUS_VALUE,
        }
    }
}

impl fmt::Display for StatusSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "health={} shield={} hunger={} thirst={}",
            self.health, self.shield, self.hunger, self.thirst
        )
    }
}

/// Incoming status object. `None` stands for both a missing key and an
/// explicit `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPayload {
    pub health: Option<f64>,
    pub shield: Option<f64>,
    pub hunger: Option<f64>,
    pub thirst: Option<f64>,
}

impl StatusPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: StatusField) -> Option<f64> {
        match field {
            StatusField::Health => self.health,
            StatusField::Shield => self.shield,
            StatusField::Hunger => self.hunger,
            StatusField::Thirst => self.thirst,
        }
    }

    pub fn with(mut self, field: StatusField, value: f64) -> Self {
        *self.slot_mut(field) = Some(value);
        self
    }

    fn slot_mut(&mut self, field: StatusField) -> &mut Option<f64> {
        match field {
            StatusField::Health => &mut self.health,
            StatusField::Shield => &mut self.shield,
            StatusField::Hunger => &mut self.hunger,
            StatusField::Thirst => &mut self.thirst,
        }
    }

    pub fn with_health(self, value: f64) -> Self {
        self.with(StatusField::Health, value)
    }

    pub fn with_shield(self, value: f64) -> Self {
        self.with(StatusField::Shield, value)
    }

    pub fn with_hunger(self, value: f64) -> Self {
        self.with(StatusField::Hunger, value)
    }

    pub fn with_thirst(self, value: f64) -> Self {
        self.with(StatusField::Thirst, value)
    }

    /// Decodes a payload from a JSON value.
    ///
    /// `null` decodes to an empty payload. Any other non-object value is
    /// rejected, as is a known key holding something other than a number:
    /// the fields are `f64`, so such values cannot be stored unchanged.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value).map_err(HudError::Payload),
            other => Err(HudError::NotAnObject {
                kind: json_kind(&other),
            }),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(HudError::Json)?;
        Self::from_value(value)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Callback run after every applied update.
pub type StatusListener = Box<dyn Fn(&StatusSnapshot) + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Single source of truth for the player's status values.
///
/// The store is owned by whoever wires the application together and handed
/// out by reference; `update_status` is the only way to change it.
#[derive(Resource, Default)]
pub struct StatusStore {
    current: StatusSnapshot,
    listeners: Vec<(ListenerId, StatusListener)>,
    next_listener: u64,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn health(&self) -> f64 {
        self.current.health
    }

    pub fn shield(&self) -> f64 {
        self.current.shield
    }

    pub fn hunger(&self) -> f64 {
        self.current.hunger
    }

    pub fn thirst(&self) -> f64 {
        self.current.thirst
    }

    pub fn get(&self, field: StatusField) -> f64 {
        self.current.get(field)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.current
    }

    /// Overwrites all four fields from `payload`. A field the payload leaves
    /// out is reset to [`DEFAULT_STATUS_VALUE`], not kept.
    pub fn update_status(&mut self, payload: &StatusPayload) {
        let mut next = StatusSnapshot::default();
        for field in StatusField::ALL {
            if let Some(value) = payload.get(field) {
                *next.slot_mut(field) = value;
            }
        }
        self.current = next;

        debug!(
            target: "hud_core.status",
            health = next.health,
            shield = next.shield,
            hunger = next.hunger,
            thirst = next.thirst,
            "status updated"
        );

        for (_, listener) in &self.listeners {
            listener(&next);
        }
    }

    /// Decodes `value` and applies it. The store is untouched on error.
    pub fn apply_json(&mut self, value: Value) -> Result<StatusSnapshot> {
        let payload = StatusPayload::from_value(value)?;
        self.update_status(&payload);
        Ok(self.current)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&StatusSnapshot) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for StatusStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusStore")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
