use serde_json::Value;

use crate::config::UnitSystem;
use crate::foundation::math::clamp_finite;
use crate::telemetry::record::TelemetryRecord;

/// Steering wheel travel limit in degrees, either direction.
pub const MAX_STEER_DEG: f64 = 540.0;

const MPS_TO_MPH: f64 = 2.23694;
const MPH_TO_KMH: f64 = 1.60934;

/// Raw throttle values at or below this are unit fractions, above it percentages.
const THROTTLE_FRACTION_MAX: f64 = 1.5;

/// Transmission state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gear {
    /// Park.
    Park,
    /// Drive.
    Drive,
    /// Reverse.
    Reverse,
    /// Neutral.
    Neutral,
    /// Unrecognized name (its first upper-cased character) or an unreadable value (`?`).
    Unknown(char),
}

const UNREADABLE_GEAR: char = '?';

const GEAR_CODES: [Gear; 4] = [Gear::Park, Gear::Drive, Gear::Reverse, Gear::Neutral];

const GEAR_NAMES: &[(&str, Gear)] = &[
    ("PARK", Gear::Park),
    ("GEAR_PARK", Gear::Park),
    ("P", Gear::Park),
    ("DRIVE", Gear::Drive),
    ("GEAR_DRIVE", Gear::Drive),
    ("D", Gear::Drive),
    ("REVERSE", Gear::Reverse),
    ("GEAR_REVERSE", Gear::Reverse),
    ("R", Gear::Reverse),
    ("NEUTRAL", Gear::Neutral),
    ("GEAR_NEUTRAL", Gear::Neutral),
    ("N", Gear::Neutral),
];

impl Gear {
    /// Resolve a raw telemetry value.
    ///
    /// Absent values and out-of-range codes are [`Gear::Park`]. Values that are present but
    /// unreadable (blank strings, arrays, objects) show as `Unknown('?')`.
    pub fn from_value(raw: Option<&Value>) -> Self {
        match raw.and_then(RawEnum::from_value) {
            None => Self::Park,
            Some(RawEnum::Code(code)) => usize::try_from(code)
                .ok()
                .and_then(|i| GEAR_CODES.get(i).copied())
                .unwrap_or(Self::Park),
            Some(RawEnum::Name(name)) => Self::from_name(&name),
            Some(RawEnum::Unusable) => Self::Unknown(UNREADABLE_GEAR),
        }
    }

    fn from_name(name: &str) -> Self {
        let upper = name.trim().to_uppercase();
        if let Some((_, g)) = GEAR_NAMES.iter().find(|(n, _)| *n == upper) {
            return *g;
        }
        Self::Unknown(upper.chars().next().unwrap_or(UNREADABLE_GEAR))
    }

    /// Single-character label drawn on the gear chip.
    pub fn label(self) -> char {
        match self {
            Self::Park => 'P',
            Self::Drive => 'D',
            Self::Reverse => 'R',
            Self::Neutral => 'N',
            Self::Unknown(c) => c,
        }
    }
}

/// Driver-assistance mode.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum AutopilotState {
    /// No assistance engaged.
    None,
    /// Full self-driving.
    SelfDriving,
    /// Lane keeping (autosteer).
    Autosteer,
    /// Traffic-aware cruise control only.
    Tacc,
    /// Unrecognized upper-cased name, passed through verbatim.
    Other(String),
}

const AUTOPILOT_CODES: [AutopilotState; 4] = [
    AutopilotState::None,
    AutopilotState::SelfDriving,
    AutopilotState::Autosteer,
    AutopilotState::Tacc,
];

const AUTOPILOT_NAMES: &[(&str, AutopilotState)] = &[
    ("NONE", AutopilotState::None),
    ("SELF_DRIVING", AutopilotState::SelfDriving),
    ("AUTOSTEER", AutopilotState::Autosteer),
    ("TACC", AutopilotState::Tacc),
    ("AUTOPILOT", AutopilotState::Autosteer),
    ("FSD", AutopilotState::SelfDriving),
    ("SELFDRIVING", AutopilotState::SelfDriving),
    ("SELF-DRIVING", AutopilotState::SelfDriving),
    ("AUTO-STEER", AutopilotState::Autosteer),
    ("AUTO_STEER", AutopilotState::Autosteer),
    ("CRUISE", AutopilotState::Tacc),
];

impl AutopilotState {
    /// Resolve a raw telemetry value. Absent or unusable values are [`AutopilotState::None`].
    pub fn from_value(raw: Option<&Value>) -> Self {
        match raw.and_then(RawEnum::from_value) {
            None => Self::None,
            Some(RawEnum::Code(code)) => usize::try_from(code)
                .ok()
                .and_then(|i| AUTOPILOT_CODES.get(i).cloned())
                .unwrap_or(Self::None),
            Some(RawEnum::Name(name)) => Self::from_name(&name),
            Some(RawEnum::Unusable) => Self::None,
        }
    }

    fn from_name(name: &str) -> Self {
        let upper = name.trim().to_uppercase();
        if upper.is_empty() {
            return Self::None;
        }
        AUTOPILOT_NAMES
            .iter()
            .find(|(n, _)| *n == upper)
            .map_or(Self::Other(upper), |(_, s)| s.clone())
    }

    /// Canonical upper-case name.
    pub fn name(&self) -> &str {
        match self {
            Self::None => "NONE",
            Self::SelfDriving => "SELF_DRIVING",
            Self::Autosteer => "AUTOSTEER",
            Self::Tacc => "TACC",
            Self::Other(s) => s,
        }
    }

    /// Steering is automated (autosteer or self-driving).
    pub fn is_steering(&self) -> bool {
        matches!(self, Self::Autosteer | Self::SelfDriving)
    }

    /// Only longitudinal cruise control is active.
    pub fn is_cruise(&self) -> bool {
        matches!(self, Self::Tacc)
    }
}

/// A raw enum-valued field: a numeric code, a name, or something that is neither.
enum RawEnum {
    Code(i64),
    Name(String),
    Unusable,
}

impl RawEnum {
    /// `None` only for JSON `null`.
    fn from_value(v: &Value) -> Option<Self> {
        match v {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Code(i64::from(*b))),
            Value::Number(n) => Some(
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map_or(Self::Unusable, |f| Self::Code(f.trunc() as i64)),
            ),
            Value::String(s) => Some(Self::Name(s.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Unusable),
        }
    }
}

/// Candidate field names per canonical signal, tried in priority order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalAliases {
    /// Speed in metres per second.
    pub speed_mps: Vec<String>,
    /// Gear selector.
    pub gear: Vec<String>,
    /// Brake pedal switch.
    pub brake: Vec<String>,
    /// Accelerator position, fraction or percent.
    pub throttle: Vec<String>,
    /// Steering wheel angle in degrees.
    pub steering_deg: Vec<String>,
    /// Left turn signal.
    pub left_blinker: Vec<String>,
    /// Right turn signal.
    pub right_blinker: Vec<String>,
    /// Driver-assistance mode.
    pub autopilot: Vec<String>,
    /// GPS latitude.
    pub latitude: Vec<String>,
    /// GPS longitude.
    pub longitude: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

impl Default for SignalAliases {
    fn default() -> Self {
        Self {
            speed_mps: names(&["vehicleSpeedMps", "vehicle_speed_mps", "speed_mps"]),
            gear: names(&["gearState", "gear_state", "gear"]),
            brake: names(&["brakeApplied", "brake_applied"]),
            throttle: names(&[
                "throttlePct",
                "acceleratorPedalPosition",
                "accelerator_pedal_position",
            ]),
            steering_deg: names(&["steeringWheelAngle", "steering_wheel_angle"]),
            left_blinker: names(&["leftBlinkerOn", "blinker_on_left"]),
            right_blinker: names(&["rightBlinkerOn", "blinker_on_right"]),
            autopilot: names(&["autopilotState", "autopilot_state"]),
            latitude: names(&["latitude", "latitudeDeg", "latitude_deg"]),
            longitude: names(&["longitude", "longitudeDeg", "longitude_deg"]),
        }
    }
}

/// Normalized, strongly-typed view of one telemetry record.
///
/// Every numeric field is finite; missing inputs hold their documented default.
#[derive(Clone, Debug, PartialEq)]
pub struct CanonicalSignals {
    /// Vehicle speed, metres per second, `>= 0`.
    pub speed_mps: f64,
    /// Gear selector.
    pub gear: Gear,
    /// Brake pedal pressed.
    pub brake_applied: bool,
    /// Accelerator position in `[0, 1]`.
    pub throttle_fraction: f64,
    /// Steering wheel angle, clamped to `[-540, 540]`.
    pub steering_angle_deg: f64,
    /// Left turn signal on.
    pub left_blinker: bool,
    /// Right turn signal on.
    pub right_blinker: bool,
    /// Driver-assistance mode.
    pub autopilot_state: AutopilotState,
    /// Live GPS latitude, if reported.
    pub latitude: Option<f64>,
    /// Live GPS longitude, if reported.
    pub longitude: Option<f64>,
}

impl Default for CanonicalSignals {
    fn default() -> Self {
        Self {
            speed_mps: 0.0,
            gear: Gear::Park,
            brake_applied: false,
            throttle_fraction: 0.0,
            steering_angle_deg: 0.0,
            left_blinker: false,
            right_blinker: false,
            autopilot_state: AutopilotState::None,
            latitude: None,
            longitude: None,
        }
    }
}

impl CanonicalSignals {
    /// Normalize `record` using the given alias tables. Never fails.
    pub fn from_record(record: &TelemetryRecord, aliases: &SignalAliases) -> Self {
        let speed_mps = pick_number(record, &aliases.speed_mps)
            .unwrap_or(0.0)
            .max(0.0);
        let steering = pick_number(record, &aliases.steering_deg).unwrap_or(0.0);

        Self {
            speed_mps,
            gear: Gear::from_value(pick_present(record, &aliases.gear)),
            brake_applied: pick_bool(record, &aliases.brake).unwrap_or(false),
            throttle_fraction: throttle_fraction(
                pick_number(record, &aliases.throttle).unwrap_or(0.0),
            ),
            steering_angle_deg: clamp_finite(steering, -MAX_STEER_DEG, MAX_STEER_DEG),
            left_blinker: pick_bool(record, &aliases.left_blinker).unwrap_or(false),
            right_blinker: pick_bool(record, &aliases.right_blinker).unwrap_or(false),
            autopilot_state: AutopilotState::from_value(pick_present(record, &aliases.autopilot)),
            latitude: pick_number(record, &aliases.latitude),
            longitude: pick_number(record, &aliases.longitude),
        }
    }

    /// Speed converted to the display unit system.
    pub fn display_speed(&self, units: UnitSystem) -> f64 {
        let mph = self.speed_mps * MPS_TO_MPH;
        match units {
            UnitSystem::Mph => mph,
            UnitSystem::Kmh => mph * MPH_TO_KMH,
        }
    }

    /// Integer speed readout, rounded to nearest.
    pub fn speed_label(&self, units: UnitSystem) -> String {
        format!("{}", self.display_speed(units).round() as i64)
    }
}

/// Holds the alias tables and normalizes optional records.
#[derive(Clone, Debug, Default)]
pub struct SignalNormalizer {
    aliases: SignalAliases,
}

impl SignalNormalizer {
    /// Normalizer using custom alias tables.
    pub fn new(aliases: SignalAliases) -> Self {
        Self { aliases }
    }

    /// Normalize a record; a missing record yields no signals.
    pub fn normalize(&self, record: Option<&TelemetryRecord>) -> Option<CanonicalSignals> {
        record.map(|r| CanonicalSignals::from_record(r, &self.aliases))
    }

    /// Alias tables in use.
    pub fn aliases(&self) -> &SignalAliases {
        &self.aliases
    }
}

/// Map a raw throttle reading to `[0, 1]`.
///
/// Readings `<= 1.5` are taken as unit fractions and rescaled to percent first, so a true
/// percentage of `1.0` reads as full throttle.
pub(crate) fn throttle_fraction(raw: f64) -> f64 {
    let pct = if raw <= THROTTLE_FRACTION_MAX {
        raw * 100.0
    } else {
        raw
    };
    clamp_finite(pct / 100.0, 0.0, 1.0)
}

/// First alias whose value parses to a finite number.
pub(crate) fn pick_number(record: &TelemetryRecord, keys: &[String]) -> Option<f64> {
    keys.iter()
        .filter_map(|k| record.get(k))
        .find_map(number_of)
}

fn number_of(v: &Value) -> Option<f64> {
    let f = match v {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}

/// First alias whose value reads as a boolean.
pub(crate) fn pick_bool(record: &TelemetryRecord, keys: &[String]) -> Option<bool> {
    keys.iter()
        .filter_map(|k| record.get(k))
        .find_map(bool_of)
}

fn bool_of(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// First alias holding a meaningful value: not null, false, zero or an empty string.
fn pick_present<'a>(record: &'a TelemetryRecord, keys: &[String]) -> Option<&'a Value> {
    keys.iter().filter_map(|k| record.get(k)).find(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/telemetry/normalize.rs"]
mod tests;
