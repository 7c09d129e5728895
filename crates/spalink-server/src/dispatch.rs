use spalink_messages::{
    ControlConfigKind, HeatingMode, Message, Status, TemperatureRange, TemperatureScale,
    ToggleTarget,
};

use crate::replies::{
    CONFIGURATION_RESPONSE, CONTROL_CONFIGURATION2_RESPONSE, CONTROL_CONFIGURATION_RESPONSE,
};

/// Apply one decoded message to the authoritative status.
///
/// Returns a reply body to send immediately, if the message calls for
/// one. State-changing commands get no direct reply; the next periodic
/// broadcast carries the updated status.
pub fn dispatch(status: &mut Status, message: &Message) -> Option<&'static [u8]> {
    match message {
        Message::ConfigurationRequest => Some(CONFIGURATION_RESPONSE),
        Message::ControlConfigurationRequest { kind } => Some(match kind {
            ControlConfigKind::Main => CONTROL_CONFIGURATION_RESPONSE,
            ControlConfigKind::Alternate => CONTROL_CONFIGURATION2_RESPONSE,
        }),
        Message::SetTargetTemperature { temperature } => {
            let mut temperature = f64::from(*temperature);
            if status.temperature_scale() == TemperatureScale::Celsius {
                temperature /= 2.0;
            }
            status.target_temperature = temperature;
            None
        }
        Message::SetTemperatureScale { scale } => {
            status.set_temperature_scale(*scale);
            None
        }
        Message::ToggleItem { item } => {
            toggle(status, *item);
            None
        }
        // We broadcast status; an inbound one has nothing to tell us.
        Message::Status(_) => None,
    }
}

fn toggle(status: &mut Status, item: ToggleTarget) {
    match item {
        ToggleTarget::HeatingMode => {
            status.heating_mode = if status.heating_mode == HeatingMode::Rest {
                HeatingMode::Ready
            } else {
                HeatingMode::Rest
            };
        }
        ToggleTarget::TemperatureRange => {
            status.temperature_range = if status.temperature_range == TemperatureRange::Low {
                TemperatureRange::High
            } else {
                TemperatureRange::Low
            };
        }
        ToggleTarget::Pump1 => status.pumps[0] = (status.pumps[0] + 1) % 3,
        ToggleTarget::Pump2 => status.pumps[1] = (status.pumps[1] + 1) % 3,
        ToggleTarget::Light1 => status.lights[0] = !status.lights[0],
        ToggleTarget::Other(code) => {
            tracing::debug!(code, "ignoring toggle for unhandled item");
        }
    }
}
