use std::collections::BTreeMap;

use tracing::debug;

use crate::device::DeviceSettings;
use crate::error::{Error, Result};
use crate::subsystem::{Subsystem, SubsystemConfig};
use crate::subsystem_commands::SubsystemCommands;

/// Subsystem configurations keyed by contiguous CEPO index, plus device-wide
/// settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdcpConfiguration {
    pub device: DeviceSettings,
    subsystems: BTreeMap<u16, SubsystemCommands>,
}

impl AdcpConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// One defaulted configuration per subsystem, CEPO order = list order.
    pub fn from_subsystems(subsystems: &[Subsystem]) -> Self {
        let mut config = Self::new();
        for subsystem in subsystems {
            config.add_subsystem(*subsystem);
        }
        config
    }

    /// Append a configuration for `subsystem` and return its CEPO index.
    pub fn add_subsystem(&mut self, subsystem: Subsystem) -> u16 {
        self.push(Some(subsystem))
    }

    /// Append a configuration. `None` reserves the slot for a subsystem the
    /// instrument does not report.
    pub(crate) fn push(&mut self, subsystem: Option<Subsystem>) -> u16 {
        let cepo_index = self.subsystems.len() as u16;
        let config_number = self.count_configs_of(subsystem);
        debug!(cepo_index, config_number, ?subsystem, "adding subsystem configuration");
        let config = SubsystemConfig::new(cepo_index, config_number, subsystem);
        self.subsystems.insert(cepo_index, SubsystemCommands::new(config));
        cepo_index
    }

    fn count_configs_of(&self, subsystem: Option<Subsystem>) -> u8 {
        match subsystem {
            Some(ss) => self
                .subsystems
                .values()
                .filter(|c| c.subsystem() == Some(ss))
                .count() as u8,
            None => 0,
        }
    }

    /// Remove the configuration at `cepo_index` and renumber the rest.
    pub fn remove(&mut self, cepo_index: u16) -> Option<SubsystemCommands> {
        let removed = self.subsystems.remove(&cepo_index)?;
        let remaining: Vec<SubsystemCommands> =
            std::mem::take(&mut self.subsystems).into_values().collect();
        for mut commands in remaining {
            let index = self.subsystems.len() as u16;
            let config_number = self.count_configs_of(commands.subsystem());
            commands.config_mut().reindex(index, config_number);
            self.subsystems.insert(index, commands);
        }
        Some(removed)
    }

    pub fn get(&self, cepo_index: u16) -> Option<&SubsystemCommands> {
        self.subsystems.get(&cepo_index)
    }

    pub fn get_mut(&mut self, cepo_index: u16) -> Option<&mut SubsystemCommands> {
        self.subsystems.get_mut(&cepo_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubsystemCommands> {
        self.subsystems.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SubsystemCommands> {
        self.subsystems.values_mut()
    }

    pub fn len(&self) -> usize {
        self.subsystems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsystems.is_empty()
    }

    /// The CEPO value: one subsystem code per configuration.
    pub fn cepo(&self) -> Result<String> {
        self.iter()
            .map(|c| {
                c.subsystem()
                    .map(|ss| ss.code().as_char())
                    .ok_or(Error::UnassignedSubsystem(c.cepo_index()))
            })
            .collect()
    }
}
