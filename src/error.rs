/// The error type for all fallible adcp_config operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A value lies outside the field's inclusive valid range.
    #[error("{field}: {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },

    /// Text could not be converted to the field's type.
    #[error("{field}: cannot parse '{text}'")]
    Parse { field: &'static str, text: String },

    /// A command has no field at the requested position.
    #[error("{mnemonic} has no field {position}")]
    UnknownCommandField {
        mnemonic: &'static str,
        position: usize,
    },

    /// A multi-field command carried fewer comma-separated values than it
    /// declares.
    #[error("{mnemonic} expects {expected} values, found {found}")]
    FieldCount {
        mnemonic: &'static str,
        expected: usize,
        found: usize,
    },

    /// The subsystem code is not one of the known transducer codes.
    #[error("unsupported subsystem code 0x{0:02X}")]
    UnsupportedSubsystemCode(u8),

    /// A configuration slot has no subsystem, so CEPO cannot be written.
    #[error("configuration {0} has no subsystem assigned")]
    UnassignedSubsystem(u16),

    /// Input bytes were not ASCII.
    #[error("input is not ASCII: {0}")]
    NotAscii(String),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_range() {
        let e = Error::OutOfRange {
            field: "CWPBN bin count",
            value: "300".into(),
            min: "0".into(),
            max: "200".into(),
        };
        assert_eq!(e.to_string(), "CWPBN bin count: 300 is outside [0, 200]");
    }

    #[test]
    fn display_unsupported_code() {
        let e = Error::UnsupportedSubsystemCode(b'Z');
        assert_eq!(e.to_string(), "unsupported subsystem code 0x5A");
    }

    #[test]
    fn display_unassigned() {
        assert_eq!(
            Error::UnassignedSubsystem(2).to_string(),
            "configuration 2 has no subsystem assigned"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
