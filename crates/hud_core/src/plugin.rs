use bevy::prelude::*;

use crate::status::{StatusPayload, StatusSnapshot, StatusStore};

/// Wires a [`StatusStore`] into a Bevy app. Producers send [`StatusUpdate`]
/// events; the HUD reads the store resource or listens for
/// [`StatusChanged`].
pub struct HudStatusPlugin;

impl Plugin for HudStatusPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<StatusStore>() {
            app.insert_resource(StatusStore::new());
        }

        app.add_event::<StatusUpdate>()
            .add_event::<StatusChanged>()
            .add_systems(Update, apply_status_updates);
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StatusUpdate(pub StatusPayload);

/// Sent once per applied [`StatusUpdate`], after all four fields are set.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StatusChanged(pub StatusSnapshot);

pub fn apply_status_updates(
    mut updates: EventReader<StatusUpdate>,
    mut store: ResMut<StatusStore>,
    mut changed: EventWriter<StatusChanged>,
) {
    for StatusUpdate(payload) in updates.read() {
        store.update_status(payload);
        changed.send(StatusChanged(store.snapshot()));
    }
}
