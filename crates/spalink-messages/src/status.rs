use std::fmt;
use std::ops::RangeInclusive;

/// Payload lengths accepted for a status broadcast. Later firmware
/// appends fields this codec does not read; anything past the offsets
/// below is ignored.
pub const STATUS_PAYLOAD_LENGTH: RangeInclusive<usize> = 23..=32;

/// Length of the payload this codec produces.
pub const STATUS_ENCODED_LENGTH: usize = 24;

/// Wire value for "no temperature reading available".
const TEMPERATURE_UNKNOWN: u8 = 0xff;

/// Heater control loop operating state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatingMode {
    Ready,
    Rest,
    ReadyInRest,
}

impl HeatingMode {
    fn code(self) -> u8 {
        match self {
            HeatingMode::Ready => 0x00,
            HeatingMode::Rest => 0x01,
            HeatingMode::ReadyInRest => 0x02,
        }
    }
}

impl fmt::Display for HeatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HeatingMode::Ready => "ready",
            HeatingMode::Rest => "rest",
            HeatingMode::ReadyInRest => "ready_in_rest",
        })
    }
}

/// Unit the stored temperatures are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Fahrenheit,
    Celsius,
}

/// Low/high operating range of the heater setpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureRange {
    Low,
    High,
}

/// Exception condition reported in place of normal idle status framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Ph,
    Filter,
    Sanitizer,
}

impl Notification {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0x0a => Some(Notification::Ph),
            0x04 => Some(Notification::Filter),
            0x09 => Some(Notification::Sanitizer),
            _ => None,
        }
    }

    fn code(self) -> u8 {
        match self {
            Notification::Ph => 0x0a,
            Notification::Filter => 0x04,
            Notification::Sanitizer => 0x09,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Notification::Ph => "ph",
            Notification::Filter => "filter",
            Notification::Sanitizer => "sanitizer",
        })
    }
}

/// Full operating state of the controller, broadcast periodically.
///
/// Temperatures are stored in whatever unit [`Status::temperature_scale`]
/// currently denotes; Celsius values are half-degree multiples. The scale
/// is only assignable through [`Status::set_temperature_scale`], which
/// converts the stored temperatures in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Status {
    pub hold: bool,
    pub priming: bool,
    pub notification: Option<Notification>,
    pub heating_mode: HeatingMode,
    temperature_scale: TemperatureScale,
    pub twenty_four_hour_time: bool,
    pub hour: u8,
    pub minute: u8,
    pub filter_cycles: [bool; 2],
    pub heating: bool,
    pub temperature_range: TemperatureRange,
    pub circulation_pump: bool,
    pub blower: u8,
    pub pumps: [u8; 6],
    pub lights: [bool; 2],
    pub mister: bool,
    pub aux: [bool; 2],
    /// `None` means no reading available (wire sentinel 0xff), not zero.
    pub current_temperature: Option<f64>,
    pub target_temperature: f64,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            hold: false,
            priming: false,
            notification: None,
            heating_mode: HeatingMode::Ready,
            temperature_scale: TemperatureScale::Fahrenheit,
            twenty_four_hour_time: false,
            hour: 0,
            minute: 0,
            filter_cycles: [false; 2],
            heating: false,
            temperature_range: TemperatureRange::High,
            circulation_pump: false,
            blower: 0,
            pumps: [0; 6],
            lights: [false; 2],
            mister: false,
            aux: [false; 2],
            current_temperature: None,
            target_temperature: 100.0,
        }
    }
}

impl Status {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn temperature_scale(&self) -> TemperatureScale {
        self.temperature_scale
    }

    /// Decode a status payload (type tag already stripped).
    ///
    /// The caller has validated the length against
    /// [`STATUS_PAYLOAD_LENGTH`]; bytes beyond offset 20 are ignored.
    pub fn decode(payload: &[u8]) -> Self {
        let flags = payload[9];
        let temperature_scale = if flags & 0x01 != 0 {
            TemperatureScale::Celsius
        } else {
            TemperatureScale::Fahrenheit
        };
        let twenty_four_hour_time = flags & 0x02 != 0;
        let filter_cycles = [flags & 0x04 != 0, flags & 0x08 != 0];

        let flags = payload[10];
        let heating = flags & 0x30 != 0;
        let temperature_range = if flags & 0x04 != 0 {
            TemperatureRange::High
        } else {
            TemperatureRange::Low
        };

        let pumps = [
            payload[11] & 0x03,
            (payload[11] >> 2) & 0x03,
            (payload[11] >> 4) & 0x03,
            (payload[11] >> 6) & 0x03,
            payload[12] & 0x03,
            (payload[12] >> 2) & 0x03,
        ];

        let flags = payload[13];
        let circulation_pump = flags & 0x02 != 0;
        let blower = (flags >> 2) & 0x03;

        let flags = payload[14];
        let lights = [flags & 0x03 != 0, (flags >> 2) & 0x03 != 0];

        let flags = payload[15];
        let mister = flags & 0x01 != 0;
        let aux = [flags & 0x08 != 0, flags & 0x10 != 0];

        let mut current_temperature = match payload[2] {
            TEMPERATURE_UNKNOWN => None,
            raw => Some(f64::from(raw)),
        };
        let mut target_temperature = f64::from(payload[20]);

        // Celsius wire temperatures are doubled half-degrees.
        if temperature_scale == TemperatureScale::Celsius {
            if let Some(current) = &mut current_temperature {
                *current /= 2.0;
            }
            target_temperature /= 2.0;
        }

        Status {
            hold: payload[0] & 0x05 != 0,
            priming: payload[1] == 0x01,
            // The notification code byte is only meaningful when byte 1
            // carries the notification marker.
            notification: if payload[1] == 0x03 {
                Notification::from_code(payload[6])
            } else {
                None
            },
            heating_mode: match payload[5] & 0x03 {
                0x00 => HeatingMode::Ready,
                0x01 => HeatingMode::Rest,
                _ => HeatingMode::ReadyInRest,
            },
            temperature_scale,
            twenty_four_hour_time,
            hour: payload[3],
            minute: payload[4],
            filter_cycles,
            heating,
            temperature_range,
            circulation_pump,
            blower,
            pumps,
            lights,
            mister,
            aux,
            current_temperature,
            target_temperature,
        }
    }

    /// Encode this status as a fixed 24-byte payload.
    ///
    /// Only the fields the dispatcher can change are written back: blower,
    /// the second light, mister, aux, pumps 3-6 and the filter cycle flags
    /// are decoded but never encoded, and the byte-1 notification marker
    /// is written as 0x04 where decode expects 0x03. Deliberately kept
    /// as observed on real hardware.
    // TODO: capture a panel trace to settle whether panels read the
    // omitted fields from server-originated frames.
    pub fn encode(&self) -> [u8; STATUS_ENCODED_LENGTH] {
        let mut data = [0u8; STATUS_ENCODED_LENGTH];

        if self.hold {
            data[0] = 0x05;
        }
        data[1] = if self.priming {
            0x01
        } else if self.notification.is_some() {
            0x04
        } else {
            0x00
        };
        data[3] = self.hour;
        data[4] = self.minute;
        data[5] = self.heating_mode.code();
        data[6] = self.notification.map_or(0x00, Notification::code);

        let mut flags = 0u8;
        if self.temperature_scale == TemperatureScale::Celsius {
            flags |= 0x01;
        }
        if self.twenty_four_hour_time {
            flags |= 0x02;
        }
        data[9] = flags;

        let mut flags = 0u8;
        if self.heating {
            flags |= 0x30;
        }
        if self.temperature_range == TemperatureRange::High {
            flags |= 0x04;
        }
        data[10] = flags;

        data[11] = self.pumps[0] | self.pumps[1] << 2;
        if self.circulation_pump {
            data[13] = 0x02;
        }
        if self.lights[0] {
            data[14] = 0x03;
        }

        match self.temperature_scale {
            TemperatureScale::Celsius => {
                data[2] = self
                    .current_temperature
                    .map_or(TEMPERATURE_UNKNOWN, |t| (t * 2.0) as u8);
                data[20] = (self.target_temperature * 2.0) as u8;
            }
            TemperatureScale::Fahrenheit => {
                data[2] = self
                    .current_temperature
                    .map_or(TEMPERATURE_UNKNOWN, |t| t as u8);
                data[20] = self.target_temperature as u8;
            }
        }

        data
    }

    /// Change the temperature unit, converting both stored temperatures
    /// in place. Assigning the current scale again is a no-op; an unknown
    /// current temperature stays unknown.
    ///
    /// Fahrenheit results round to the nearest degree, Celsius to the
    /// nearest half degree.
    pub fn set_temperature_scale(&mut self, scale: TemperatureScale) {
        if scale == self.temperature_scale {
            return;
        }
        match scale {
            TemperatureScale::Fahrenheit => {
                if let Some(current) = &mut self.current_temperature {
                    *current = (*current * 9.0 / 5.0 + 32.0).round();
                }
                self.target_temperature = (self.target_temperature * 9.0 / 5.0 + 32.0).round();
            }
            TemperatureScale::Celsius => {
                if let Some(current) = &mut self.current_temperature {
                    *current = ((*current - 32.0) * 5.0 / 9.0 * 2.0).round() / 2.0;
                }
                self.target_temperature =
                    ((self.target_temperature - 32.0) * 5.0 / 9.0 * 2.0).round() / 2.0;
            }
        }
        self.temperature_scale = scale;
    }
}

impl fmt::Display for Status {
    /// One-line operator summary, e.g.
    /// `12:30 PM 75/100°F filter_cycles=[false, false] ready high lights=[true, false] ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hold {
            write!(f, "hold ")?;
        }
        if self.priming {
            write!(f, "priming ")?;
        }
        if let Some(notification) = self.notification {
            write!(f, "notification={notification} ")?;
        }

        if self.twenty_four_hour_time {
            write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        } else {
            let (hour, meridian) = match self.hour {
                0 => (12, "AM"),
                1..=11 => (self.hour, "AM"),
                12 => (12, "PM"),
                _ => (self.hour - 12, "PM"),
            };
            write!(f, "{hour}:{:02} {meridian}", self.minute)?;
        }

        write!(f, " ")?;
        match self.current_temperature {
            Some(current) => write!(f, "{current}")?,
            None => write!(f, "--")?,
        }
        let scale = match self.temperature_scale {
            TemperatureScale::Fahrenheit => 'F',
            TemperatureScale::Celsius => 'C',
        };
        write!(f, "/{}\u{b0}{scale}", self.target_temperature)?;

        write!(f, " filter_cycles={:?}", self.filter_cycles)?;
        write!(f, " {}", self.heating_mode)?;
        if self.heating {
            write!(f, " heating")?;
        }
        match self.temperature_range {
            TemperatureRange::Low => write!(f, " low")?,
            TemperatureRange::High => write!(f, " high")?,
        }
        if self.circulation_pump {
            write!(f, " circulation_pump")?;
        }
        write!(f, " blower={}", self.blower)?;
        write!(f, " pumps={:?}", self.pumps)?;
        write!(f, " lights={:?}", self.lights)?;
        write!(f, " aux={:?}", self.aux)?;
        if self.mister {
            write!(f, " mister")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_with(edits: &[(usize, u8)]) -> Vec<u8> {
        let mut payload = vec![0u8; STATUS_ENCODED_LENGTH];
        for &(offset, value) in edits {
            payload[offset] = value;
        }
        payload
    }

    #[test]
    fn decode_flags_and_bitfields() {
        let payload = payload_with(&[
            (0, 0x05),  // hold
            (1, 0x01),  // priming
            (5, 0x02),  // ready-in-rest
            (9, 0x0f),  // celsius, 24h, both filter cycles
            (10, 0x34), // heating, high range
            (11, 0b10_01_11_10),
            (12, 0b00_00_01_11),
            (13, 0x0e), // circulation + blower 3
            (14, 0x05), // both lights
            (15, 0x19), // mister + both aux
            (2, 0x50),
            (20, 0x50),
        ]);
        let status = Status::decode(&payload);

        assert!(status.hold);
        assert!(status.priming);
        assert_eq!(status.heating_mode, HeatingMode::ReadyInRest);
        assert_eq!(status.temperature_scale(), TemperatureScale::Celsius);
        assert!(status.twenty_four_hour_time);
        assert_eq!(status.filter_cycles, [true, true]);
        assert!(status.heating);
        assert_eq!(status.temperature_range, TemperatureRange::High);
        assert_eq!(status.pumps, [2, 3, 1, 2, 3, 1]);
        assert!(status.circulation_pump);
        assert_eq!(status.blower, 3);
        assert_eq!(status.lights, [true, true]);
        assert!(status.mister);
        assert_eq!(status.aux, [true, true]);
        // Celsius halves the doubled wire value.
        assert_eq!(status.current_temperature, Some(40.0));
        assert_eq!(status.target_temperature, 40.0);
    }

    #[test]
    fn hold_uses_masked_bits() {
        assert!(Status::decode(&payload_with(&[(0, 0x04)])).hold);
        assert!(Status::decode(&payload_with(&[(0, 0x01)])).hold);
        assert!(!Status::decode(&payload_with(&[(0, 0x02)])).hold);
    }

    #[test]
    fn notification_requires_marker_byte() {
        // Code present but byte 1 is not the marker: no notification.
        let status = Status::decode(&payload_with(&[(6, 0x0a)]));
        assert_eq!(status.notification, None);

        let status = Status::decode(&payload_with(&[(1, 0x03), (6, 0x0a)]));
        assert_eq!(status.notification, Some(Notification::Ph));
        let status = Status::decode(&payload_with(&[(1, 0x03), (6, 0x04)]));
        assert_eq!(status.notification, Some(Notification::Filter));
        let status = Status::decode(&payload_with(&[(1, 0x03), (6, 0x09)]));
        assert_eq!(status.notification, Some(Notification::Sanitizer));

        // Marker with an unknown code decodes as no notification.
        let status = Status::decode(&payload_with(&[(1, 0x03), (6, 0x05)]));
        assert_eq!(status.notification, None);
    }

    #[test]
    fn unknown_temperature_sentinel() {
        let status = Status::decode(&payload_with(&[(2, 0xff)]));
        assert_eq!(status.current_temperature, None);

        let mut status = Status::default();
        status.current_temperature = None;
        assert_eq!(status.encode()[2], 0xff);

        status.set_temperature_scale(TemperatureScale::Celsius);
        assert_eq!(status.encode()[2], 0xff);
    }

    #[test]
    fn fahrenheit_temperatures_are_direct() {
        let status = Status::decode(&payload_with(&[(2, 75), (20, 100)]));
        assert_eq!(status.current_temperature, Some(75.0));
        assert_eq!(status.target_temperature, 100.0);
    }

    #[test]
    fn longer_firmware_payloads_are_tolerated() {
        let mut payload = payload_with(&[(3, 7), (4, 45), (20, 98)]);
        payload.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        let status = Status::decode(&payload);
        assert_eq!((status.hour, status.minute), (7, 45));
        assert_eq!(status.target_temperature, 98.0);
    }

    #[test]
    fn encode_tracked_fields() {
        let mut status = Status::default();
        status.hold = true;
        status.priming = false;
        status.heating_mode = HeatingMode::Rest;
        status.twenty_four_hour_time = true;
        status.hour = 22;
        status.minute = 5;
        status.heating = true;
        status.temperature_range = TemperatureRange::High;
        status.pumps[0] = 1;
        status.pumps[1] = 2;
        status.circulation_pump = true;
        status.lights[0] = true;
        status.current_temperature = Some(98.0);
        status.target_temperature = 102.0;

        let data = status.encode();
        assert_eq!(data[0], 0x05);
        assert_eq!(data[1], 0x00);
        assert_eq!(data[3], 22);
        assert_eq!(data[4], 5);
        assert_eq!(data[5], 0x01);
        assert_eq!(data[9], 0x02);
        assert_eq!(data[10], 0x34);
        assert_eq!(data[11], 0b00_00_10_01);
        assert_eq!(data[13], 0x02);
        assert_eq!(data[14], 0x03);
        assert_eq!(data[2], 98);
        assert_eq!(data[20], 102);
    }

    #[test]
    fn encode_doubles_celsius_temperatures() {
        let mut status = Status::default();
        status.set_temperature_scale(TemperatureScale::Celsius);
        status.current_temperature = Some(37.5);
        status.target_temperature = 40.0;

        let data = status.encode();
        assert_eq!(data[9] & 0x01, 0x01);
        assert_eq!(data[2], 75);
        assert_eq!(data[20], 80);
    }

    /// Decode → encode is deliberately lossy. These fields come off the
    /// wire but are never written back; if encode ever starts emitting
    /// them this test must be updated alongside the protocol notes.
    #[test]
    fn encode_does_not_round_trip_untracked_fields() {
        let payload = payload_with(&[
            (9, 0x0c),  // both filter cycles
            (11, 0xf0), // pumps 3 and 4
            (12, 0x0f), // pumps 5 and 6
            (13, 0x0c), // blower 3
            (14, 0x04), // second light only
            (15, 0x19), // mister + aux
        ]);
        let decoded = Status::decode(&payload);
        assert_eq!(decoded.filter_cycles, [true, true]);
        assert_eq!(decoded.blower, 3);
        assert_eq!(decoded.pumps[2..], [3, 3, 3, 3]);
        assert_eq!(decoded.lights, [false, true]);
        assert!(decoded.mister);
        assert_eq!(decoded.aux, [true, true]);

        let reencoded = Status::decode(&decoded.encode());
        assert_eq!(reencoded.filter_cycles, [false, false]);
        assert_eq!(reencoded.blower, 0);
        assert_eq!(reencoded.pumps[2..], [0, 0, 0, 0]);
        assert_eq!(reencoded.lights, [false, false]);
        assert!(!reencoded.mister);
        assert_eq!(reencoded.aux, [false, false]);
    }

    #[test]
    fn tracked_fields_round_trip() {
        let payload = payload_with(&[
            (0, 0x05),
            (3, 12),
            (4, 30),
            (5, 0x01),
            (9, 0x02),
            (10, 0x34),
            (11, 0b00_00_10_01),
            (13, 0x02),
            (14, 0x03),
            (2, 80),
            (20, 104),
        ]);
        let decoded = Status::decode(&payload);
        let reencoded = Status::decode(&decoded.encode());

        assert_eq!(reencoded.hold, decoded.hold);
        assert_eq!(reencoded.priming, decoded.priming);
        assert_eq!(reencoded.heating_mode, decoded.heating_mode);
        assert_eq!(reencoded.temperature_scale(), decoded.temperature_scale());
        assert_eq!(
            reencoded.twenty_four_hour_time,
            decoded.twenty_four_hour_time
        );
        assert_eq!(reencoded.heating, decoded.heating);
        assert_eq!(reencoded.temperature_range, decoded.temperature_range);
        assert_eq!(reencoded.pumps[..2], decoded.pumps[..2]);
        assert_eq!(reencoded.circulation_pump, decoded.circulation_pump);
        assert_eq!(reencoded.lights[0], decoded.lights[0]);
        assert_eq!((reencoded.hour, reencoded.minute), (decoded.hour, decoded.minute));
        assert_eq!(reencoded.current_temperature, decoded.current_temperature);
        assert_eq!(reencoded.target_temperature, decoded.target_temperature);
    }

    #[test]
    fn scale_change_converts_both_temperatures() {
        let mut status = Status::default();
        status.current_temperature = Some(98.0);
        status.target_temperature = 104.0;

        status.set_temperature_scale(TemperatureScale::Celsius);
        assert_eq!(status.temperature_scale(), TemperatureScale::Celsius);
        assert_eq!(status.current_temperature, Some(36.5));
        assert_eq!(status.target_temperature, 40.0);

        status.set_temperature_scale(TemperatureScale::Fahrenheit);
        assert_eq!(status.current_temperature, Some(98.0));
        assert_eq!(status.target_temperature, 104.0);
    }

    #[test]
    fn celsius_round_trip_stays_within_half_degree() {
        let mut c = 20.0f64;
        while c <= 42.0 {
            let mut status = Status::default();
            status.set_temperature_scale(TemperatureScale::Celsius);
            status.target_temperature = c;

            status.set_temperature_scale(TemperatureScale::Fahrenheit);
            status.set_temperature_scale(TemperatureScale::Celsius);

            assert!(
                (status.target_temperature - c).abs() <= 0.5,
                "{c} came back as {}",
                status.target_temperature
            );
            c += 0.5;
        }
    }

    #[test]
    fn repeated_scale_assignment_is_a_no_op() {
        let mut status = Status::default();
        status.target_temperature = 101.0;
        status.current_temperature = Some(99.0);

        status.set_temperature_scale(TemperatureScale::Fahrenheit);
        assert_eq!(status.target_temperature, 101.0);
        assert_eq!(status.current_temperature, Some(99.0));

        status.set_temperature_scale(TemperatureScale::Celsius);
        let converted = status.clone();
        status.set_temperature_scale(TemperatureScale::Celsius);
        assert_eq!(status, converted);
    }

    #[test]
    fn scale_change_leaves_unknown_current_untouched() {
        let mut status = Status::default();
        status.current_temperature = None;
        status.set_temperature_scale(TemperatureScale::Celsius);
        assert_eq!(status.current_temperature, None);
    }

    #[test]
    fn display_summary() {
        let mut status = Status::default();
        status.hour = 12;
        status.minute = 30;
        status.current_temperature = Some(75.0);
        status.lights[0] = true;

        let line = status.to_string();
        assert!(line.starts_with("12:30 PM 75/100\u{b0}F"), "{line}");
        assert!(line.contains("ready"));
        assert!(line.contains("lights=[true, false]"));
    }

    #[test]
    fn display_twelve_hour_wrapping() {
        let mut status = Status::default();
        status.hour = 0;
        assert!(status.to_string().starts_with("12:00 AM"));
        status.hour = 23;
        assert!(status.to_string().starts_with("11:00 PM"));
        status.twenty_four_hour_time = true;
        assert!(status.to_string().starts_with("23:00"));
    }
}
