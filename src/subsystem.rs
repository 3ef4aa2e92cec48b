use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{Error, Result};

/// Transducer code characters as they appear in the serial number and in
/// the CEPO command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SubsystemCode {
    Khz1200Beam4Deg20 = b'2',
    Khz600Beam4Deg20 = b'3',
    Khz300Beam4Deg20 = b'4',
    Khz1200Beam4Deg30 = b'6',
    Khz600Beam4Deg30 = b'7',
    Khz300Beam4Deg30 = b'8',
    Khz150Beam4Deg20 = b'9',
    Khz1200Vertical = b'A',
    Khz600Vertical = b'B',
    Khz300Vertical = b'C',
    Khz150Vertical = b'D',
    Khz75Beam4Deg30 = b'E',
    Khz38Beam4Deg30 = b'F',
    Khz75Vertical = b'G',
    Khz38Vertical = b'H',
}

impl SubsystemCode {
    pub fn band(self) -> FrequencyBand {
        use SubsystemCode::*;
        match self {
            Khz1200Beam4Deg20 | Khz1200Beam4Deg30 | Khz1200Vertical => FrequencyBand::Khz1200,
            Khz600Beam4Deg20 | Khz600Beam4Deg30 | Khz600Vertical => FrequencyBand::Khz600,
            Khz300Beam4Deg20 | Khz300Beam4Deg30 | Khz300Vertical => FrequencyBand::Khz300,
            Khz150Beam4Deg20 | Khz150Vertical => FrequencyBand::Khz150,
            Khz75Beam4Deg30 | Khz75Vertical => FrequencyBand::Khz75,
            Khz38Beam4Deg30 | Khz38Vertical => FrequencyBand::Khz38,
        }
    }

    /// The code character itself.
    pub fn as_char(self) -> char {
        char::from(u8::from(self))
    }

    pub fn description(self) -> &'static str {
        use SubsystemCode::*;
        match self {
            Khz1200Beam4Deg20 => "1.2 MHz 4-beam 20 degree",
            Khz600Beam4Deg20 => "600 kHz 4-beam 20 degree",
            Khz300Beam4Deg20 => "300 kHz 4-beam 20 degree",
            Khz1200Beam4Deg30 => "1.2 MHz 4-beam 30 degree",
            Khz600Beam4Deg30 => "600 kHz 4-beam 30 degree",
            Khz300Beam4Deg30 => "300 kHz 4-beam 30 degree",
            Khz150Beam4Deg20 => "150 kHz 4-beam 20 degree",
            Khz1200Vertical => "1.2 MHz vertical beam",
            Khz600Vertical => "600 kHz vertical beam",
            Khz300Vertical => "300 kHz vertical beam",
            Khz150Vertical => "150 kHz vertical beam",
            Khz75Beam4Deg30 => "75 kHz 4-beam 30 degree",
            Khz38Beam4Deg30 => "38 kHz 4-beam 30 degree",
            Khz75Vertical => "75 kHz vertical beam",
            Khz38Vertical => "38 kHz vertical beam",
        }
    }
}

impl TryFrom<char> for SubsystemCode {
    type Error = Error;

    fn try_from(c: char) -> Result<Self> {
        let byte = u8::try_from(c).map_err(|_| Error::UnsupportedSubsystemCode(b'?'))?;
        SubsystemCode::try_from(byte).map_err(|_| Error::UnsupportedSubsystemCode(byte))
    }
}

/// Nominal transmit frequency band. Frequency-dependent defaults are keyed
/// on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrequencyBand {
    Khz38,
    Khz75,
    Khz150,
    Khz300,
    Khz600,
    Khz1200,
}

impl FrequencyBand {
    pub const ALL: [FrequencyBand; 6] = [
        FrequencyBand::Khz38,
        FrequencyBand::Khz75,
        FrequencyBand::Khz150,
        FrequencyBand::Khz300,
        FrequencyBand::Khz600,
        FrequencyBand::Khz1200,
    ];

    pub fn kilohertz(self) -> u32 {
        match self {
            FrequencyBand::Khz38 => 38,
            FrequencyBand::Khz75 => 75,
            FrequencyBand::Khz150 => 150,
            FrequencyBand::Khz300 => 300,
            FrequencyBand::Khz600 => 600,
            FrequencyBand::Khz1200 => 1200,
        }
    }
}

impl fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kHz", self.kilohertz())
    }
}

/// An installed subsystem: its code and its position in the serial number's
/// subsystem list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subsystem {
    code: SubsystemCode,
    index: u8,
}

impl Subsystem {
    pub fn new(code: SubsystemCode, index: u8) -> Self {
        Self { code, index }
    }

    /// Build a subsystem from a raw code byte.
    pub fn from_code(code: u8, index: u8) -> Result<Self> {
        let code = SubsystemCode::try_from(code).map_err(|_| Error::UnsupportedSubsystemCode(code))?;
        Ok(Self::new(code, index))
    }

    /// Build the ordered subsystem list from a string of code characters,
    /// e.g. `"23"` for a 1.2 MHz + 600 kHz instrument.
    pub fn list_from_codes(codes: &str) -> Result<Vec<Subsystem>> {
        codes
            .trim()
            .chars()
            .enumerate()
            .map(|(index, c)| {
                let code = SubsystemCode::try_from(c)?;
                Ok(Subsystem::new(code, index as u8))
            })
            .collect()
    }

    pub fn code(&self) -> SubsystemCode {
        self.code
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn band(&self) -> FrequencyBand {
        self.code.band()
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({})",
            self.index,
            self.code.as_char(),
            self.code.description()
        )
    }
}

/// One entry of the CEPO ping order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsystemConfig {
    pub(crate) cepo_index: u16,
    config_number: u8,
    subsystem: Option<Subsystem>,
}

impl SubsystemConfig {
    /// `config_number` counts earlier configurations of the same subsystem.
    pub fn new(cepo_index: u16, config_number: u8, subsystem: Option<Subsystem>) -> Self {
        Self {
            cepo_index,
            config_number,
            subsystem,
        }
    }

    pub fn cepo_index(&self) -> u16 {
        self.cepo_index
    }

    pub fn config_number(&self) -> u8 {
        self.config_number
    }

    /// `None` when CEPO named a subsystem the instrument does not have.
    pub fn subsystem(&self) -> Option<Subsystem> {
        self.subsystem
    }

    pub(crate) fn reindex(&mut self, cepo_index: u16, config_number: u8) {
        self.cepo_index = cepo_index;
        self.config_number = config_number;
    }
}

impl fmt::Display for SubsystemConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subsystem {
            Some(ss) => write!(f, "CEPO[{}] {} config {}", self.cepo_index, ss, self.config_number),
            None => write!(f, "CEPO[{}] unassigned", self.cepo_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_to_bands() {
        assert_eq!(SubsystemCode::Khz1200Beam4Deg20.band(), FrequencyBand::Khz1200);
        assert_eq!(SubsystemCode::Khz600Vertical.band(), FrequencyBand::Khz600);
        assert_eq!(SubsystemCode::Khz38Vertical.band(), FrequencyBand::Khz38);
    }

    #[test]
    fn every_band_has_a_code() {
        let all = [
            b'2', b'3', b'4', b'6', b'7', b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F', b'G', b'H',
        ];
        for band in FrequencyBand::ALL {
            assert!(all
                .iter()
                .filter_map(|&b| SubsystemCode::try_from(b).ok())
                .any(|c| c.band() == band));
        }
    }

    #[test]
    fn unknown_code_is_error() {
        assert_eq!(
            Subsystem::from_code(b'Z', 0),
            Err(Error::UnsupportedSubsystemCode(b'Z'))
        );
        assert_eq!(
            SubsystemCode::try_from('1'),
            Err(Error::UnsupportedSubsystemCode(b'1'))
        );
    }

    #[test]
    fn list_from_codes_keeps_order() {
        let list = Subsystem::list_from_codes("23").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].code(), SubsystemCode::Khz1200Beam4Deg20);
        assert_eq!(list[0].index(), 0);
        assert_eq!(list[1].code(), SubsystemCode::Khz600Beam4Deg20);
        assert_eq!(list[1].index(), 1);
        assert!(Subsystem::list_from_codes("2X").is_err());
    }

    #[test]
    fn code_char_round_trip() {
        let code = SubsystemCode::try_from('B').unwrap();
        assert_eq!(code.as_char(), 'B');
    }

    #[test]
    fn display_config() {
        let ss = Subsystem::new(SubsystemCode::Khz300Beam4Deg20, 1);
        let cfg = SubsystemConfig::new(2, 0, Some(ss));
        assert_eq!(cfg.to_string(), "CEPO[2] [1] 4 (300 kHz 4-beam 20 degree) config 0");
        assert_eq!(SubsystemConfig::new(0, 0, None).to_string(), "CEPO[0] unassigned");
    }
}
