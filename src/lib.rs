//! Command model and `CSHOW` decoder for multi-subsystem ADCP instruments.
//!
//! ```
//! use adcp_config::{decode, serialize_configuration, Profile, Subsystem};
//!
//! let installed = Subsystem::list_from_codes("23").unwrap();
//! let config = decode("CEPO 23\nCWPBN[1] 25\n", &installed);
//! assert_eq!(config.get(1).unwrap().wp_bin_count.get(), 25);
//!
//! let lines = serialize_configuration(&config, Profile::Deployment).unwrap();
//! assert_eq!(lines[0], "CEPO 23");
//! assert!(lines.contains(&"CWPBN[1] 25".to_string()));
//! ```

pub mod cepo;
pub mod command;
pub mod configuration;
pub mod decoder;
pub mod defaults;
pub mod device;
pub mod error;
pub mod field;
pub mod serialize;
pub mod subsystem;
pub mod subsystem_commands;

pub use command::{Command, CommandSpec, FieldKind, FieldSpec, Mnemonic};
pub use configuration::AdcpConfiguration;
pub use decoder::{apply, decode, decode_bytes, decode_with_report, DecodeIssue, DecodeReport, IssueKind};
pub use device::{DeviceCommand, DeviceSettings, OperatingMode};
pub use error::{Error, Result};
pub use field::{FieldMut, FieldRef, TimeValue, ValidatedField};
pub use serialize::{serialize, serialize_configuration, Profile};
pub use subsystem::{FrequencyBand, Subsystem, SubsystemCode, SubsystemConfig};
pub use subsystem_commands::{BottomTrackMode, PulseType, RangeTrackingMode, SubsystemCommands};
