//! Command line generation per [`Profile`].

use std::fmt;
use std::str::FromStr;

use crate::command::Command;
use crate::configuration::AdcpConfiguration;
use crate::error::{Error, Result};
use crate::subsystem_commands::SubsystemCommands;

/// Named command subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Every command.
    Full,
    /// What a self-contained deployment needs.
    Deployment,
    /// Bottom and water track for navigation use.
    Dvl,
    /// Water profile and burst settings for wave measurement.
    Waves,
    /// Inputs to range, power and data-size prediction.
    Prediction,
}

use Command::*;

const FULL: &[Command] = &[
    Cwpon, Cwpbb, Cwpap, Cwpbp, Cwpst, Cwpbl, Cwpbs, Cwpx, Cwpbn, Cwpp, Cwpai, Cwptbp, Cwprt, Cbi,
    Cbton, Cbtbb, Cbtst, Cbtt, Cbtbl, Cbtmx, Cbttbp, Cbtfilt, Cwton, Cwtbb, Cwtbl, Cwtbs, Cwttbp,
];

const DEPLOYMENT: &[Command] = &[
    Cwpon, Cwpbb, Cwpbl, Cwpbs, Cwpx, Cwpbn, Cwpp, Cwpai, Cwptbp, Cbi, Cbton, Cbtbb, Cbtbl, Cbtmx,
    Cbttbp,
];

const DVL: &[Command] = &[
    Cwpon, Cbton, Cbtbb, Cbtst, Cbtt, Cbtbl, Cbtmx, Cbttbp, Cbtfilt, Cwton, Cwtbb, Cwtbl, Cwtbs,
    Cwttbp,
];

const WAVES: &[Command] = &[
    Cwpon, Cwpbb, Cwpbl, Cwpbs, Cwpbn, Cwpp, Cwpai, Cwptbp, Cwprt, Cbi,
];

const PREDICTION: &[Command] = &[
    Cwpon, Cwpbb, Cwpbp, Cwpbl, Cwpbs, Cwpbn, Cwpp, Cwpai, Cwptbp, Cbi, Cbton, Cbttbp,
];

impl Profile {
    pub const ALL: [Profile; 5] = [
        Profile::Full,
        Profile::Deployment,
        Profile::Dvl,
        Profile::Waves,
        Profile::Prediction,
    ];

    /// Commands of the profile in output order.
    pub fn commands(self) -> &'static [Command] {
        match self {
            Profile::Full => FULL,
            Profile::Deployment => DEPLOYMENT,
            Profile::Dvl => DVL,
            Profile::Waves => WAVES,
            Profile::Prediction => PREDICTION,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Profile::Full => "full",
            Profile::Deployment => "deployment",
            Profile::Dvl => "dvl",
            Profile::Waves => "waves",
            Profile::Prediction => "prediction",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Profile::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Parse {
                field: "profile",
                text: s.to_string(),
            })
    }
}

fn feature_enabled(commands: &SubsystemCommands, gate: Command) -> bool {
    match gate {
        Cwpon => commands.wp_enabled.get(),
        Cbton => commands.bt_enabled.get(),
        Cwton => commands.wt_enabled.get(),
        _ => true,
    }
}

/// Whether `command` is written for this subsystem.
fn is_emitted(commands: &SubsystemCommands, command: Command) -> bool {
    if let Some(gate) = command.gate() {
        if !feature_enabled(commands, gate) {
            return false;
        }
    }
    match command {
        Cwpp => !commands.is_averaging_interval_enabled(),
        Cwpai => commands.is_averaging_interval_enabled(),
        _ => true,
    }
}

/// Command lines for one subsystem configuration.
pub fn serialize(commands: &SubsystemCommands, profile: Profile) -> Vec<String> {
    profile
        .commands()
        .iter()
        .filter(|&&command| is_emitted(commands, command))
        .map(|&command| commands.command_line(command))
        .collect()
}

/// Command lines for a whole configuration: `CEPO`, the device-wide
/// settings, then every subsystem in CEPO order.
pub fn serialize_configuration(config: &AdcpConfiguration, profile: Profile) -> Result<Vec<String>> {
    let mut lines = vec![format!("CEPO {}", config.cepo()?)];
    lines.extend(config.device.command_lines());
    for commands in config.iter() {
        lines.extend(serialize(commands, profile));
    }
    Ok(lines)
}
