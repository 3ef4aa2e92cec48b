//! Non-indexed instrument settings (`MNEMONIC value`) and the `Mode` line.

use std::fmt;
use std::str::FromStr;

use crate::command::{byte, flag, real, time, FieldSpec};
use crate::error::{Error, Result};
use crate::field::{FieldMut, FieldRef, TimeValue, ValidatedField};

/// Non-indexed commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceCommand {
    /// Ping order; structural, see [`crate::cepo`].
    Cepo,
    Cei,
    Cerecord,
    Ceoutput,
    Cho,
    Chs,
    Cws,
    Cwss,
    Cwt,
    /// `Mode Profile` / `Mode DVL`
    Mode,
}

const CEI: FieldSpec = time("ensemble interval");
const CERECORD: FieldSpec = flag("recording");
const CEOUTPUT: FieldSpec = byte("output type", 0.0, 100.0);
const CHO: FieldSpec = real("heading offset", "deg", -180.0, 180.0, 2);
const CHS: FieldSpec = byte("heading source", 1.0, 4.0);
const CWS: FieldSpec = real("salinity", "ppt", 0.0, 100.0, 2);
const CWSS: FieldSpec = real("speed of sound", "m/s", 1400.0, 1600.0, 2);
const CWT: FieldSpec = real("water temperature", "degC", -5.0, 50.0, 2);

impl DeviceCommand {
    pub const ALL: [DeviceCommand; 10] = [
        DeviceCommand::Cepo,
        DeviceCommand::Cei,
        DeviceCommand::Cerecord,
        DeviceCommand::Ceoutput,
        DeviceCommand::Cho,
        DeviceCommand::Chs,
        DeviceCommand::Cws,
        DeviceCommand::Cwss,
        DeviceCommand::Cwt,
        DeviceCommand::Mode,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            DeviceCommand::Cepo => "CEPO",
            DeviceCommand::Cei => "CEI",
            DeviceCommand::Cerecord => "CERECORD",
            DeviceCommand::Ceoutput => "CEOUTPUT",
            DeviceCommand::Cho => "CHO",
            DeviceCommand::Chs => "CHS",
            DeviceCommand::Cws => "CWS",
            DeviceCommand::Cwss => "CWSS",
            DeviceCommand::Cwt => "CWT",
            DeviceCommand::Mode => "Mode",
        }
    }

    /// Field description for commands that carry a single value.
    pub fn field(self) -> Option<&'static FieldSpec> {
        match self {
            DeviceCommand::Cei => Some(&CEI),
            DeviceCommand::Cerecord => Some(&CERECORD),
            DeviceCommand::Ceoutput => Some(&CEOUTPUT),
            DeviceCommand::Cho => Some(&CHO),
            DeviceCommand::Chs => Some(&CHS),
            DeviceCommand::Cws => Some(&CWS),
            DeviceCommand::Cwss => Some(&CWSS),
            DeviceCommand::Cwt => Some(&CWT),
            DeviceCommand::Cepo | DeviceCommand::Mode => None,
        }
    }

    pub fn from_mnemonic(text: &str) -> Option<DeviceCommand> {
        DeviceCommand::ALL
            .into_iter()
            .find(|d| d.mnemonic().eq_ignore_ascii_case(text))
    }
}

/// Operating mode reported by the `Mode` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperatingMode {
    #[default]
    Profile,
    Dvl,
}

impl FromStr for OperatingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("profile") {
            Ok(OperatingMode::Profile)
        } else if s.eq_ignore_ascii_case("dvl") {
            Ok(OperatingMode::Dvl)
        } else {
            Err(Error::Parse {
                field: "mode",
                text: s.to_string(),
            })
        }
    }
}

impl fmt::Display for OperatingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatingMode::Profile => write!(f, "Profile"),
            OperatingMode::Dvl => write!(f, "DVL"),
        }
    }
}

/// Instrument-wide values decoded alongside the subsystem configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceSettings {
    pub mode: OperatingMode,
    pub ensemble_interval: TimeValue,
    pub recording: ValidatedField<bool>,
    pub output: ValidatedField<u8>,
    pub heading_offset: ValidatedField<f32>,
    pub heading_source: ValidatedField<u8>,
    pub salinity: ValidatedField<f32>,
    pub speed_of_sound: ValidatedField<f32>,
    pub water_temperature: ValidatedField<f32>,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        let mut settings = Self {
            mode: OperatingMode::Profile,
            ensemble_interval: TimeValue::new(0, 0, 1, 0),
            recording: ValidatedField::from_spec(&CERECORD),
            output: ValidatedField::from_spec(&CEOUTPUT),
            heading_offset: ValidatedField::from_spec(&CHO),
            heading_source: ValidatedField::from_spec(&CHS),
            salinity: ValidatedField::from_spec(&CWS),
            speed_of_sound: ValidatedField::from_spec(&CWSS),
            water_temperature: ValidatedField::from_spec(&CWT),
        };
        settings.recording.try_set(true);
        settings.output.try_set(1);
        settings.heading_offset.try_set(0.0);
        settings.heading_source.try_set(1);
        settings.salinity.try_set(35.0);
        settings.speed_of_sound.try_set(1500.0);
        settings.water_temperature.try_set(15.0);
        settings
    }
}

impl DeviceSettings {
    pub fn field(&self, command: DeviceCommand) -> Option<FieldRef<'_>> {
        Some(match command {
            DeviceCommand::Cei => FieldRef::Time(&self.ensemble_interval),
            DeviceCommand::Cerecord => FieldRef::Flag(&self.recording),
            DeviceCommand::Ceoutput => FieldRef::Byte(&self.output),
            DeviceCommand::Cho => FieldRef::Real(&self.heading_offset),
            DeviceCommand::Chs => FieldRef::Byte(&self.heading_source),
            DeviceCommand::Cws => FieldRef::Real(&self.salinity),
            DeviceCommand::Cwss => FieldRef::Real(&self.speed_of_sound),
            DeviceCommand::Cwt => FieldRef::Real(&self.water_temperature),
            DeviceCommand::Cepo | DeviceCommand::Mode => return None,
        })
    }

    pub fn field_mut(&mut self, command: DeviceCommand) -> Option<FieldMut<'_>> {
        Some(match command {
            DeviceCommand::Cei => FieldMut::Time(&mut self.ensemble_interval),
            DeviceCommand::Cerecord => FieldMut::Flag(&mut self.recording),
            DeviceCommand::Ceoutput => FieldMut::Byte(&mut self.output),
            DeviceCommand::Cho => FieldMut::Real(&mut self.heading_offset),
            DeviceCommand::Chs => FieldMut::Byte(&mut self.heading_source),
            DeviceCommand::Cws => FieldMut::Real(&mut self.salinity),
            DeviceCommand::Cwss => FieldMut::Real(&mut self.speed_of_sound),
            DeviceCommand::Cwt => FieldMut::Real(&mut self.water_temperature),
            DeviceCommand::Cepo | DeviceCommand::Mode => return None,
        })
    }

    /// Apply the value text of one device-wide line. `CEPO` is structural
    /// and is accepted without effect here.
    pub fn apply(&mut self, command: DeviceCommand, value: &str) -> Result<()> {
        if command == DeviceCommand::Mode {
            self.mode = value.parse()?;
            return Ok(());
        }
        let Some(spec) = command.field() else {
            return Ok(());
        };
        match self.field_mut(command) {
            Some(mut field) => field.set_text(spec, value),
            None => Ok(()),
        }
    }

    /// Command lines for every settable device-wide value, `CEPO` excluded.
    pub fn command_lines(&self) -> Vec<String> {
        DeviceCommand::ALL
            .into_iter()
            .filter_map(|command| {
                let spec = command.field()?;
                let field = self.field(command)?;
                Some(format!("{} {}", command.mnemonic(), field.format(spec)))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_serialize() {
        let lines = DeviceSettings::default().command_lines();
        assert_eq!(
            lines,
            vec![
                "CEI 00:00:01.00",
                "CERECORD 1",
                "CEOUTPUT 1",
                "CHO 0.00",
                "CHS 1",
                "CWS 35.00",
                "CWSS 1500.00",
                "CWT 15.00",
            ]
        );
    }

    #[test]
    fn apply_values() {
        let mut s = DeviceSettings::default();
        s.apply(DeviceCommand::Cho, "-12.5").unwrap();
        s.apply(DeviceCommand::Cei, "00:00:05.00").unwrap();
        s.apply(DeviceCommand::Mode, "DVL").unwrap();
        assert_eq!(s.heading_offset.get(), -12.5);
        assert_eq!(s.ensemble_interval.to_string(), "00:00:05.00");
        assert_eq!(s.mode, OperatingMode::Dvl);
    }

    #[test]
    fn apply_rejects_out_of_range_heading() {
        let mut s = DeviceSettings::default();
        assert!(s.apply(DeviceCommand::Cho, "181").is_err());
        assert!(s.apply(DeviceCommand::Cwss, "abc").is_err());
        assert!(s.apply(DeviceCommand::Mode, "Waves").is_err());
        assert_eq!(s, DeviceSettings::default());
    }

    #[test]
    fn mode_parse_is_case_insensitive() {
        assert_eq!("profile".parse::<OperatingMode>().unwrap(), OperatingMode::Profile);
        assert_eq!(" Dvl ".parse::<OperatingMode>().unwrap(), OperatingMode::Dvl);
        assert_eq!(OperatingMode::Dvl.to_string(), "DVL");
    }

    #[test]
    fn lookup() {
        assert_eq!(DeviceCommand::from_mnemonic("CWSS"), Some(DeviceCommand::Cwss));
        assert_eq!(DeviceCommand::from_mnemonic("MODE"), Some(DeviceCommand::Mode));
        assert_eq!(DeviceCommand::from_mnemonic("CWP"), None);
    }
}
