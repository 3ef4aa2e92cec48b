//! The per-subsystem parameter set.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use tracing::debug;

use crate::command::Command;
use crate::defaults::FrequencyDefaults;
use crate::error::{Error, Result};
use crate::field::{FieldMut, FieldRef, TimeValue, ValidatedField, WireValue};
use crate::subsystem::{Subsystem, SubsystemConfig};

/// Water profile transmit pulse coding (CWPBB field 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PulseType {
    Narrowband = 0,
    Broadband = 1,
    NonCodedPulseToPulse = 2,
    BroadbandPulseToPulse = 3,
    NonCodedBroadbandPulseToPulse = 4,
}

/// Range tracking source (CWPRT field 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RangeTrackingMode {
    Off = 0,
    Bin = 1,
    Pressure = 2,
}

/// Bottom track pulse mode (CBTBB field 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum BottomTrackMode {
    Narrowband = 0,
    BroadbandCoded = 1,
    BroadbandNonCoded = 2,
    BroadbandNonCodedPulseToPulse = 4,
    AutoSwitch = 7,
}

fn field<T: WireValue>(command: Command, position: usize) -> ValidatedField<T> {
    ValidatedField::from_spec(&command.spec().fields[position])
}

/// All indexed parameters of one subsystem configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsystemCommands {
    config: SubsystemConfig,

    // CWPON
    pub wp_enabled: ValidatedField<bool>,
    // CWPRT
    pub wp_range_tracking_mode: ValidatedField<u8>,
    pub wp_range_tracking_first_bin: ValidatedField<u16>,
    pub wp_range_tracking_last_bin: ValidatedField<u16>,
    // CWPBB
    pub wp_pulse_type: ValidatedField<u8>,
    pub wp_lag_length: ValidatedField<f32>,
    // CWPAP
    pub wp_ambiguity_ping_count: ValidatedField<u16>,
    pub wp_ambiguity_lag: ValidatedField<f32>,
    pub wp_ambiguity_blank: ValidatedField<f32>,
    pub wp_ambiguity_bin_size: ValidatedField<f32>,
    pub wp_ambiguity_time_between_pings: ValidatedField<f32>,
    // CWPBP
    pub wp_base_ping_count: ValidatedField<u16>,
    pub wp_base_ping_time: ValidatedField<f32>,
    // CWPST
    pub wp_correlation_threshold: ValidatedField<f32>,
    pub wp_error_velocity_threshold: ValidatedField<f32>,
    pub wp_vertical_velocity_threshold: ValidatedField<f32>,
    // CWPBL
    pub wp_blank: ValidatedField<f32>,
    // CWPBS
    pub wp_bin_size: ValidatedField<f32>,
    // CWPX
    pub wp_transmit_length: ValidatedField<f32>,
    // CWPBN
    pub wp_bin_count: ValidatedField<u16>,
    // CWPP
    pub wp_ping_count: ValidatedField<u16>,
    // CWPAI
    pub wp_averaging_interval: TimeValue,
    // CWPTBP
    pub wp_time_between_pings: ValidatedField<f32>,

    // CBI
    pub burst_interval: TimeValue,
    pub burst_ensembles: ValidatedField<u16>,
    pub burst_interleave: ValidatedField<bool>,

    // CBTON
    pub bt_enabled: ValidatedField<bool>,
    // CBTBB
    pub bt_mode: ValidatedField<u8>,
    pub bt_pulse_lag: ValidatedField<f32>,
    pub bt_long_range_depth: ValidatedField<f32>,
    pub bt_beam_multiplex: ValidatedField<u8>,
    // CBTST
    pub bt_correlation_threshold: ValidatedField<f32>,
    pub bt_error_velocity_threshold: ValidatedField<f32>,
    pub bt_vertical_velocity_threshold: ValidatedField<f32>,
    // CBTT
    pub bt_snr_shallow: ValidatedField<f32>,
    pub bt_snr_switch_depth: ValidatedField<f32>,
    pub bt_snr_deep: ValidatedField<f32>,
    pub bt_gain_switch_depth: ValidatedField<f32>,
    // CBTBL
    pub bt_blank: ValidatedField<f32>,
    // CBTMX
    pub bt_max_depth: ValidatedField<f32>,
    // CBTTBP
    pub bt_time_between_pings: ValidatedField<f32>,
    // CBTFILT
    pub bt_output_filter_enabled: ValidatedField<bool>,
    pub bt_output_time_constant: ValidatedField<f32>,
    pub bt_reference_filter_enabled: ValidatedField<bool>,
    pub bt_reference_time_constant: ValidatedField<f32>,
    pub bt_reference_outlier_threshold: ValidatedField<f32>,

    // CWTON
    pub wt_enabled: ValidatedField<bool>,
    // CWTBB
    pub wt_broadband: ValidatedField<bool>,
    // CWTBL
    pub wt_blank: ValidatedField<f32>,
    // CWTBS
    pub wt_bin_size: ValidatedField<f32>,
    // CWTTBP
    pub wt_time_between_pings: ValidatedField<f32>,
}

impl SubsystemCommands {
    /// Create the parameter set for `config` with defaults applied.
    pub fn new(config: SubsystemConfig) -> Self {
        let mut commands = Self::placeholders(config);
        commands.set_defaults();
        commands
    }

    /// Every field at the lower bound of its range.
    fn placeholders(config: SubsystemConfig) -> Self {
        use Command::*;
        Self {
            config,
            wp_enabled: field(Cwpon, 0),
            wp_range_tracking_mode: field(Cwprt, 0),
            wp_range_tracking_first_bin: field(Cwprt, 1),
            wp_range_tracking_last_bin: field(Cwprt, 2),
            wp_pulse_type: field(Cwpbb, 0),
            wp_lag_length: field(Cwpbb, 1),
            wp_ambiguity_ping_count: field(Cwpap, 0),
            wp_ambiguity_lag: field(Cwpap, 1),
            wp_ambiguity_blank: field(Cwpap, 2),
            wp_ambiguity_bin_size: field(Cwpap, 3),
            wp_ambiguity_time_between_pings: field(Cwpap, 4),
            wp_base_ping_count: field(Cwpbp, 0),
            wp_base_ping_time: field(Cwpbp, 1),
            wp_correlation_threshold: field(Cwpst, 0),
            wp_error_velocity_threshold: field(Cwpst, 1),
            wp_vertical_velocity_threshold: field(Cwpst, 2),
            wp_blank: field(Cwpbl, 0),
            wp_bin_size: field(Cwpbs, 0),
            wp_transmit_length: field(Cwpx, 0),
            wp_bin_count: field(Cwpbn, 0),
            wp_ping_count: field(Cwpp, 0),
            wp_averaging_interval: TimeValue::zero(),
            wp_time_between_pings: field(Cwptbp, 0),
            burst_interval: TimeValue::zero(),
            burst_ensembles: field(Cbi, 1),
            burst_interleave: field(Cbi, 2),
            bt_enabled: field(Cbton, 0),
            bt_mode: field(Cbtbb, 0),
            bt_pulse_lag: field(Cbtbb, 1),
            bt_long_range_depth: field(Cbtbb, 2),
            bt_beam_multiplex: field(Cbtbb, 3),
            bt_correlation_threshold: field(Cbtst, 0),
            bt_error_velocity_threshold: field(Cbtst, 1),
            bt_vertical_velocity_threshold: field(Cbtst, 2),
            bt_snr_shallow: field(Cbtt, 0),
            bt_snr_switch_depth: field(Cbtt, 1),
            bt_snr_deep: field(Cbtt, 2),
            bt_gain_switch_depth: field(Cbtt, 3),
            bt_blank: field(Cbtbl, 0),
            bt_max_depth: field(Cbtmx, 0),
            bt_time_between_pings: field(Cbttbp, 0),
            bt_output_filter_enabled: field(Cbtfilt, 0),
            bt_output_time_constant: field(Cbtfilt, 1),
            bt_reference_filter_enabled: field(Cbtfilt, 2),
            bt_reference_time_constant: field(Cbtfilt, 3),
            bt_reference_outlier_threshold: field(Cbtfilt, 4),
            wt_enabled: field(Cwton, 0),
            wt_broadband: field(Cwtbb, 0),
            wt_blank: field(Cwtbl, 0),
            wt_bin_size: field(Cwtbs, 0),
            wt_time_between_pings: field(Cwttbp, 0),
        }
    }

    pub fn config(&self) -> &SubsystemConfig {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut SubsystemConfig {
        &mut self.config
    }

    pub fn cepo_index(&self) -> u16 {
        self.config.cepo_index()
    }

    pub fn subsystem(&self) -> Option<Subsystem> {
        self.config.subsystem()
    }

    /// Reset every field to its default.
    ///
    /// Band-independent values are applied first. If a subsystem is
    /// assigned, the frequency-dependent values for its band follow; without
    /// one those fields keep whatever they held before.
    pub fn set_defaults(&mut self) {
        self.wp_enabled.try_set(true);
        self.wp_range_tracking_mode.try_set(RangeTrackingMode::Off.into());
        self.wp_range_tracking_first_bin.try_set(1);
        self.wp_range_tracking_last_bin.try_set(10);
        self.wp_pulse_type.try_set(PulseType::Broadband.into());
        self.wp_ambiguity_ping_count.try_set(10);
        self.wp_base_ping_count.try_set(1);
        self.wp_base_ping_time.try_set(0.0);
        self.wp_correlation_threshold.try_set(0.4);
        self.wp_error_velocity_threshold.try_set(10.0);
        self.wp_vertical_velocity_threshold.try_set(10.0);
        self.wp_transmit_length.try_set(0.0);
        self.wp_averaging_interval = TimeValue::zero();

        self.burst_interval = TimeValue::zero();
        self.burst_ensembles.try_set(0);
        self.burst_interleave.try_set(false);

        self.bt_enabled.try_set(true);
        self.bt_mode.try_set(BottomTrackMode::BroadbandCoded.into());
        self.bt_pulse_lag.try_set(0.0);
        self.bt_beam_multiplex.try_set(4);
        self.bt_correlation_threshold.try_set(0.9);
        self.bt_error_velocity_threshold.try_set(10.0);
        self.bt_vertical_velocity_threshold.try_set(10.0);
        self.bt_snr_shallow.try_set(15.0);
        self.bt_snr_deep.try_set(6.0);
        self.bt_time_between_pings.try_set(0.0);
        self.bt_output_filter_enabled.try_set(false);
        self.bt_output_time_constant.try_set(0.5);
        self.bt_reference_filter_enabled.try_set(false);
        self.bt_reference_time_constant.try_set(0.5);
        self.bt_reference_outlier_threshold.try_set(0.25);

        self.wt_enabled.try_set(false);
        self.wt_broadband.try_set(false);
        self.wt_time_between_pings.try_set(0.0);

        let Some(subsystem) = self.config.subsystem() else {
            debug!(cepo_index = self.cepo_index(), "no subsystem, frequency defaults skipped");
            return;
        };
        self.apply_frequency_defaults(FrequencyDefaults::for_band(subsystem.band()));
    }

    fn apply_frequency_defaults(&mut self, d: &FrequencyDefaults) {
        self.wp_blank.try_set(d.blank);
        self.wp_bin_size.try_set(d.bin_size);
        self.wp_bin_count.try_set(d.bin_count);
        self.wp_ping_count.try_set(d.ping_count);
        self.wp_time_between_pings.try_set(d.time_between_pings);
        self.wp_lag_length.try_set(d.broadband_lag);
        self.wp_ambiguity_lag.try_set(d.ambiguity_lag);
        self.wp_ambiguity_blank.try_set(d.ambiguity_blank);
        self.wp_ambiguity_bin_size.try_set(d.ambiguity_bin_size);
        self.wp_ambiguity_time_between_pings
            .try_set(d.ambiguity_time_between_pings);
        self.bt_long_range_depth.try_set(d.bt_long_range_depth);
        self.bt_snr_switch_depth.try_set(d.bt_snr_switch_depth);
        self.bt_gain_switch_depth.try_set(d.bt_gain_switch_depth);
        self.bt_blank.try_set(d.bt_blank);
        self.bt_max_depth.try_set(d.bt_max_depth);
        self.wt_blank.try_set(d.wt_blank);
        self.wt_bin_size.try_set(d.wt_bin_size);
    }

    /// True when any part of the averaging interval is nonzero.
    pub fn is_averaging_interval_enabled(&self) -> bool {
        !self.wp_averaging_interval.is_zero()
    }

    pub fn pulse_type(&self) -> Option<PulseType> {
        PulseType::try_from(self.wp_pulse_type.get()).ok()
    }

    pub fn set_pulse_type(&mut self, pulse_type: PulseType) {
        self.wp_pulse_type.try_set(pulse_type.into());
    }

    pub fn range_tracking_mode(&self) -> Option<RangeTrackingMode> {
        RangeTrackingMode::try_from(self.wp_range_tracking_mode.get()).ok()
    }

    pub fn set_range_tracking_mode(&mut self, mode: RangeTrackingMode) {
        self.wp_range_tracking_mode.try_set(mode.into());
    }

    pub fn bottom_track_mode(&self) -> Option<BottomTrackMode> {
        BottomTrackMode::try_from(self.bt_mode.get()).ok()
    }

    pub fn set_bottom_track_mode(&mut self, mode: BottomTrackMode) {
        self.bt_mode.try_set(mode.into());
    }

    /// The field at `position` of `command`.
    pub fn field(&self, command: Command, position: usize) -> Option<FieldRef<'_>> {
        use Command::*;
        use FieldRef as F;
        Some(match (command, position) {
            (Cwpon, 0) => F::Flag(&self.wp_enabled),
            (Cwprt, 0) => F::Byte(&self.wp_range_tracking_mode),
            (Cwprt, 1) => F::Count(&self.wp_range_tracking_first_bin),
            (Cwprt, 2) => F::Count(&self.wp_range_tracking_last_bin),
            (Cwpbb, 0) => F::Byte(&self.wp_pulse_type),
            (Cwpbb, 1) => F::Real(&self.wp_lag_length),
            (Cwpap, 0) => F::Count(&self.wp_ambiguity_ping_count),
            (Cwpap, 1) => F::Real(&self.wp_ambiguity_lag),
            (Cwpap, 2) => F::Real(&self.wp_ambiguity_blank),
            (Cwpap, 3) => F::Real(&self.wp_ambiguity_bin_size),
            (Cwpap, 4) => F::Real(&self.wp_ambiguity_time_between_pings),
            (Cwpbp, 0) => F::Count(&self.wp_base_ping_count),
            (Cwpbp, 1) => F::Real(&self.wp_base_ping_time),
            (Cwpst, 0) => F::Real(&self.wp_correlation_threshold),
            (Cwpst, 1) => F::Real(&self.wp_error_velocity_threshold),
            (Cwpst, 2) => F::Real(&self.wp_vertical_velocity_threshold),
            (Cwpbl, 0) => F::Real(&self.wp_blank),
            (Cwpbs, 0) => F::Real(&self.wp_bin_size),
            (Cwpx, 0) => F::Real(&self.wp_transmit_length),
            (Cwpbn, 0) => F::Count(&self.wp_bin_count),
            (Cwpp, 0) => F::Count(&self.wp_ping_count),
            (Cwpai, 0) => F::Time(&self.wp_averaging_interval),
            (Cwptbp, 0) => F::Real(&self.wp_time_between_pings),
            (Cbi, 0) => F::Time(&self.burst_interval),
            (Cbi, 1) => F::Count(&self.burst_ensembles),
            (Cbi, 2) => F::Flag(&self.burst_interleave),
            (Cbton, 0) => F::Flag(&self.bt_enabled),
            (Cbtbb, 0) => F::Byte(&self.bt_mode),
            (Cbtbb, 1) => F::Real(&self.bt_pulse_lag),
            (Cbtbb, 2) => F::Real(&self.bt_long_range_depth),
            (Cbtbb, 3) => F::Byte(&self.bt_beam_multiplex),
            (Cbtst, 0) => F::Real(&self.bt_correlation_threshold),
            (Cbtst, 1) => F::Real(&self.bt_error_velocity_threshold),
            (Cbtst, 2) => F::Real(&self.bt_vertical_velocity_threshold),
            (Cbtt, 0) => F::Real(&self.bt_snr_shallow),
            (Cbtt, 1) => F::Real(&self.bt_snr_switch_depth),
            (Cbtt, 2) => F::Real(&self.bt_snr_deep),
            (Cbtt, 3) => F::Real(&self.bt_gain_switch_depth),
            (Cbtbl, 0) => F::Real(&self.bt_blank),
            (Cbtmx, 0) => F::Real(&self.bt_max_depth),
            (Cbttbp, 0) => F::Real(&self.bt_time_between_pings),
            (Cbtfilt, 0) => F::Flag(&self.bt_output_filter_enabled),
            (Cbtfilt, 1) => F::Real(&self.bt_output_time_constant),
            (Cbtfilt, 2) => F::Flag(&self.bt_reference_filter_enabled),
            (Cbtfilt, 3) => F::Real(&self.bt_reference_time_constant),
            (Cbtfilt, 4) => F::Real(&self.bt_reference_outlier_threshold),
            (Cwton, 0) => F::Flag(&self.wt_enabled),
            (Cwtbb, 0) => F::Flag(&self.wt_broadband),
            (Cwtbl, 0) => F::Real(&self.wt_blank),
            (Cwtbs, 0) => F::Real(&self.wt_bin_size),
            (Cwttbp, 0) => F::Real(&self.wt_time_between_pings),
            _ => return None,
        })
    }

    /// Mutable counterpart of [`SubsystemCommands::field`].
    pub fn field_mut(&mut self, command: Command, position: usize) -> Option<FieldMut<'_>> {
        use Command::*;
        use FieldMut as F;
        Some(match (command, position) {
            (Cwpon, 0) => F::Flag(&mut self.wp_enabled),
            (Cwprt, 0) => F::Byte(&mut self.wp_range_tracking_mode),
            (Cwprt, 1) => F::Count(&mut self.wp_range_tracking_first_bin),
            (Cwprt, 2) => F::Count(&mut self.wp_range_tracking_last_bin),
            (Cwpbb, 0) => F::Byte(&mut self.wp_pulse_type),
            (Cwpbb, 1) => F::Real(&mut self.wp_lag_length),
            (Cwpap, 0) => F::Count(&mut self.wp_ambiguity_ping_count),
            (Cwpap, 1) => F::Real(&mut self.wp_ambiguity_lag),
            (Cwpap, 2) => F::Real(&mut self.wp_ambiguity_blank),
            (Cwpap, 3) => F::Real(&mut self.wp_ambiguity_bin_size),
            (Cwpap, 4) => F::Real(&mut self.wp_ambiguity_time_between_pings),
            (Cwpbp, 0) => F::Count(&mut self.wp_base_ping_count),
            (Cwpbp, 1) => F::Real(&mut self.wp_base_ping_time),
            (Cwpst, 0) => F::Real(&mut self.wp_correlation_threshold),
            (Cwpst, 1) => F::Real(&mut self.wp_error_velocity_threshold),
            (Cwpst, 2) => F::Real(&mut self.wp_vertical_velocity_threshold),
            (Cwpbl, 0) => F::Real(&mut self.wp_blank),
            (Cwpbs, 0) => F::Real(&mut self.wp_bin_size),
            (Cwpx, 0) => F::Real(&mut self.wp_transmit_length),
            (Cwpbn, 0) => F::Count(&mut self.wp_bin_count),
            (Cwpp, 0) => F::Count(&mut self.wp_ping_count),
            (Cwpai, 0) => F::Time(&mut self.wp_averaging_interval),
            (Cwptbp, 0) => F::Real(&mut self.wp_time_between_pings),
            (Cbi, 0) => F::Time(&mut self.burst_interval),
            (Cbi, 1) => F::Count(&mut self.burst_ensembles),
            (Cbi, 2) => F::Flag(&mut self.burst_interleave),
            (Cbton, 0) => F::Flag(&mut self.bt_enabled),
            (Cbtbb, 0) => F::Byte(&mut self.bt_mode),
            (Cbtbb, 1) => F::Real(&mut self.bt_pulse_lag),
            (Cbtbb, 2) => F::Real(&mut self.bt_long_range_depth),
            (Cbtbb, 3) => F::Byte(&mut self.bt_beam_multiplex),
            (Cbtst, 0) => F::Real(&mut self.bt_correlation_threshold),
            (Cbtst, 1) => F::Real(&mut self.bt_error_velocity_threshold),
            (Cbtst, 2) => F::Real(&mut self.bt_vertical_velocity_threshold),
            (Cbtt, 0) => F::Real(&mut self.bt_snr_shallow),
            (Cbtt, 1) => F::Real(&mut self.bt_snr_switch_depth),
            (Cbtt, 2) => F::Real(&mut self.bt_snr_deep),
            (Cbtt, 3) => F::Real(&mut self.bt_gain_switch_depth),
            (Cbtbl, 0) => F::Real(&mut self.bt_blank),
            (Cbtmx, 0) => F::Real(&mut self.bt_max_depth),
            (Cbttbp, 0) => F::Real(&mut self.bt_time_between_pings),
            (Cbtfilt, 0) => F::Flag(&mut self.bt_output_filter_enabled),
            (Cbtfilt, 1) => F::Real(&mut self.bt_output_time_constant),
            (Cbtfilt, 2) => F::Flag(&mut self.bt_reference_filter_enabled),
            (Cbtfilt, 3) => F::Real(&mut self.bt_reference_time_constant),
            (Cbtfilt, 4) => F::Real(&mut self.bt_reference_outlier_threshold),
            (Cwton, 0) => F::Flag(&mut self.wt_enabled),
            (Cwtbb, 0) => F::Flag(&mut self.wt_broadband),
            (Cwtbl, 0) => F::Real(&mut self.wt_blank),
            (Cwtbs, 0) => F::Real(&mut self.wt_bin_size),
            (Cwttbp, 0) => F::Real(&mut self.wt_time_between_pings),
            _ => return None,
        })
    }

    /// Parse `text` into the field at `position` of `command`, validating it
    /// against the command table. The field is unchanged on error.
    pub fn set_validated(&mut self, command: Command, position: usize, text: &str) -> Result<()> {
        let unknown = Error::UnknownCommandField {
            mnemonic: command.mnemonic(),
            position,
        };
        let spec = command.field(position).ok_or_else(|| unknown.clone())?;
        let mut field = self.field_mut(command, position).ok_or(unknown)?;
        field.set_text(spec, text)
    }

    /// Wire text for each field of `command`, in order.
    pub fn values(&self, command: Command) -> Vec<String> {
        command
            .spec()
            .fields
            .iter()
            .enumerate()
            .filter_map(|(position, spec)| Some(self.field(command, position)?.format(spec)))
            .collect()
    }

    /// `MNEMONIC[idx] v1,v2,...`
    pub fn command_line(&self, command: Command) -> String {
        format!(
            "{}[{}] {}",
            command.mnemonic(),
            self.cepo_index(),
            self.values(command).join(",")
        )
    }

    /// Apply the value text of one indexed command. A comma group with too
    /// few parts is rejected whole; otherwise each part is set on its own and
    /// every rejected part is returned.
    pub fn apply(&mut self, command: Command, text: &str) -> Vec<Error> {
        let arity = command.arity();
        if arity == 1 {
            return self.set_validated(command, 0, text).err().into_iter().collect();
        }
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() < arity {
            return vec![Error::FieldCount {
                mnemonic: command.mnemonic(),
                expected: arity,
                found: parts.len(),
            }];
        }
        parts
            .iter()
            .take(arity)
            .enumerate()
            .filter_map(|(position, part)| self.set_validated(command, position, part).err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsystem::{FrequencyBand, SubsystemCode};

    fn commands(code: SubsystemCode) -> SubsystemCommands {
        SubsystemCommands::new(SubsystemConfig::new(0, 0, Some(Subsystem::new(code, 0))))
    }

    fn code_for(band: FrequencyBand) -> SubsystemCode {
        match band {
            FrequencyBand::Khz38 => SubsystemCode::Khz38Beam4Deg30,
            FrequencyBand::Khz75 => SubsystemCode::Khz75Beam4Deg30,
            FrequencyBand::Khz150 => SubsystemCode::Khz150Beam4Deg20,
            FrequencyBand::Khz300 => SubsystemCode::Khz300Beam4Deg20,
            FrequencyBand::Khz600 => SubsystemCode::Khz600Beam4Deg20,
            FrequencyBand::Khz1200 => SubsystemCode::Khz1200Beam4Deg20,
        }
    }

    #[test]
    fn every_command_field_is_addressable() {
        let mut c = commands(SubsystemCode::Khz600Beam4Deg20);
        for command in Command::ALL {
            for position in 0..command.arity() {
                assert!(c.field(command, position).is_some(), "{} {position}", command.mnemonic());
                assert!(c.field_mut(command, position).is_some(), "{} {position}", command.mnemonic());
            }
            assert!(c.field(command, command.arity()).is_none());
        }
    }

    #[test]
    fn defaults_populate_every_band() {
        for band in FrequencyBand::ALL {
            let c = commands(code_for(band));
            let d = FrequencyDefaults::for_band(band);
            let placeholder = SubsystemCommands::placeholders(*c.config());
            assert_eq!(c.wp_blank.get(), d.blank, "{band}");
            assert_eq!(c.wp_bin_size.get(), d.bin_size, "{band}");
            assert_eq!(c.wp_bin_count.get(), d.bin_count, "{band}");
            assert_eq!(c.wp_ping_count.get(), d.ping_count, "{band}");
            assert_eq!(c.wp_time_between_pings.get(), d.time_between_pings, "{band}");
            assert_eq!(c.wp_lag_length.get(), d.broadband_lag, "{band}");
            assert_eq!(c.wp_ambiguity_lag.get(), d.ambiguity_lag, "{band}");
            assert_eq!(c.wp_ambiguity_blank.get(), d.ambiguity_blank, "{band}");
            assert_eq!(c.wp_ambiguity_bin_size.get(), d.ambiguity_bin_size, "{band}");
            assert_eq!(
                c.wp_ambiguity_time_between_pings.get(),
                d.ambiguity_time_between_pings,
                "{band}"
            );
            assert_eq!(c.bt_long_range_depth.get(), d.bt_long_range_depth, "{band}");
            assert_eq!(c.bt_snr_switch_depth.get(), d.bt_snr_switch_depth, "{band}");
            assert_eq!(c.bt_gain_switch_depth.get(), d.bt_gain_switch_depth, "{band}");
            assert_eq!(c.bt_blank.get(), d.bt_blank, "{band}");
            assert_eq!(c.bt_max_depth.get(), d.bt_max_depth, "{band}");
            assert_eq!(c.wt_blank.get(), d.wt_blank, "{band}");
            assert_eq!(c.wt_bin_size.get(), d.wt_bin_size, "{band}");

            assert_ne!(c.wp_blank, placeholder.wp_blank, "{band}");
            assert_ne!(c.wp_bin_size, placeholder.wp_bin_size, "{band}");
            assert_ne!(c.wp_bin_count, placeholder.wp_bin_count, "{band}");
            assert_ne!(c.wp_ping_count, placeholder.wp_ping_count, "{band}");
            assert_ne!(c.wp_time_between_pings, placeholder.wp_time_between_pings, "{band}");
            assert_ne!(c.bt_long_range_depth, placeholder.bt_long_range_depth, "{band}");
            assert_ne!(c.bt_snr_switch_depth, placeholder.bt_snr_switch_depth, "{band}");
            assert_ne!(c.bt_gain_switch_depth, placeholder.bt_gain_switch_depth, "{band}");
        }
    }

    #[test]
    fn defaults_without_subsystem_skip_band_values() {
        let c = SubsystemCommands::new(SubsystemConfig::new(3, 0, None));
        assert!(c.wp_enabled.get());
        assert!(c.bt_enabled.get());
        assert_eq!(c.wp_correlation_threshold.get(), 0.4);
        assert_eq!(c.wp_bin_count.get(), 0);
        assert_eq!(c.wp_bin_size.get(), 0.01);
        assert_eq!(c.bt_max_depth.get(), 5.0);
    }

    #[test]
    fn set_defaults_resets_edits() {
        let mut c = commands(SubsystemCode::Khz300Beam4Deg20);
        assert!(c.wp_bin_count.try_set(7));
        c.wp_averaging_interval = TimeValue::new(0, 1, 0, 0);
        c.set_defaults();
        assert_eq!(c.wp_bin_count.get(), 50);
        assert!(!c.is_averaging_interval_enabled());
    }

    #[test]
    fn averaging_interval_enabled_by_any_part() {
        let mut c = commands(SubsystemCode::Khz1200Beam4Deg20);
        assert!(!c.is_averaging_interval_enabled());
        c.wp_averaging_interval = TimeValue::new(0, 0, 0, 1);
        assert!(c.is_averaging_interval_enabled());
        c.wp_averaging_interval = TimeValue::new(1, 0, 0, 0);
        assert!(c.is_averaging_interval_enabled());
    }

    #[test]
    fn range_examples() {
        let mut c = commands(SubsystemCode::Khz600Beam4Deg20);
        assert!(!c.wp_blank.try_set(100.01));
        assert!(c.wp_blank.try_set(100.0));
        assert!(!c.wp_bin_size.try_set(0.0));
        assert!(!c.wt_bin_size.try_set(0.04));
        assert!(c.wt_bin_size.try_set(64.0));
        assert!(!c.wp_bin_count.try_set(201));
        assert!(!c.wp_ping_count.try_set(10_001));
        assert!(!c.wp_time_between_pings.try_set(86_400.5));
        assert!(!c.wp_correlation_threshold.try_set(1.01));
    }

    #[test]
    fn set_validated_through_table() {
        let mut c = commands(SubsystemCode::Khz600Beam4Deg20);
        c.set_validated(Command::Cwpbs, 0, "0.20").unwrap();
        assert_eq!(c.wp_bin_size.get(), 0.2);
        assert!(matches!(
            c.set_validated(Command::Cwpbs, 0, "101"),
            Err(Error::OutOfRange { .. })
        ));
        assert!(matches!(
            c.set_validated(Command::Cwpbs, 1, "1"),
            Err(Error::UnknownCommandField { position: 1, .. })
        ));
        assert_eq!(c.wp_bin_size.get(), 0.2);
    }

    #[test]
    fn command_line_format() {
        let c = commands(SubsystemCode::Khz1200Beam4Deg20);
        assert_eq!(c.command_line(Command::Cwpbb), "CWPBB[0] 1,0.048");
        assert_eq!(c.command_line(Command::Cwpbl), "CWPBL[0] 0.50");
        assert_eq!(c.command_line(Command::Cwpai), "CWPAI[0] 00:00:00.00");
        assert_eq!(c.command_line(Command::Cbi), "CBI[0] 00:00:00.00,0,0");
        assert_eq!(c.command_line(Command::Cbtfilt), "CBTFILT[0] 0,0.50,0,0.50,0.250");
    }

    #[test]
    fn apply_group_requires_full_arity() {
        let mut c = commands(SubsystemCode::Khz600Beam4Deg20);
        let before = c.clone();
        let errors = c.apply(Command::Cwpst, "0.5,2.0");
        assert!(matches!(errors[..], [Error::FieldCount { expected: 3, found: 2, .. }]));
        assert_eq!(c, before);
    }

    #[test]
    fn apply_group_sets_fields_independently() {
        let mut c = commands(SubsystemCode::Khz600Beam4Deg20);
        let errors = c.apply(Command::Cwpst, "0.55,abc,2.500,extra");
        assert_eq!(errors.len(), 1);
        assert_eq!(c.wp_correlation_threshold.get(), 0.55);
        assert_eq!(c.wp_error_velocity_threshold.get(), 10.0);
        assert_eq!(c.wp_vertical_velocity_threshold.get(), 2.5);
    }

    #[test]
    fn apply_time_group() {
        let mut c = commands(SubsystemCode::Khz600Beam4Deg20);
        assert!(c.apply(Command::Cbi, "01:00:00.00,12,1").is_empty());
        assert_eq!(c.burst_interval.to_string(), "01:00:00.00");
        assert_eq!(c.burst_ensembles.get(), 12);
        assert!(c.burst_interleave.get());
    }

    #[test]
    fn typed_modes() {
        let mut c = commands(SubsystemCode::Khz600Beam4Deg20);
        assert_eq!(c.pulse_type(), Some(PulseType::Broadband));
        c.set_pulse_type(PulseType::NonCodedPulseToPulse);
        assert_eq!(c.wp_pulse_type.get(), 2);
        assert_eq!(c.range_tracking_mode(), Some(RangeTrackingMode::Off));
        c.set_range_tracking_mode(RangeTrackingMode::Pressure);
        assert_eq!(c.range_tracking_mode(), Some(RangeTrackingMode::Pressure));
        assert!(c.bt_mode.try_set(5));
        assert_eq!(c.bottom_track_mode(), None);
        c.set_bottom_track_mode(BottomTrackMode::AutoSwitch);
        assert_eq!(c.bt_mode.get(), 7);
    }
}
