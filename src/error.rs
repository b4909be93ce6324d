/// Error type for barcode encoding and rendering.
///
/// Every variant is terminal for the call that produced it: no partial markup is returned and no
/// default pattern is substituted.
#[derive(Debug, thiserror::Error)]
pub enum BarcodeError {
    /// A data character has no pattern in the chosen symbology.
    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { position: usize, character: char },
    /// A start or stop character is not one of the symbology's framing letters.
    #[error("invalid start/stop character {character:?}, expected one of A, B, C or D")]
    InvalidFraming { character: char },
    /// The output buffer could not be allocated.
    #[error("failed to allocate output buffer")]
    AllocationFailure,
    /// A numeric or rendering parameter is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BarcodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = BarcodeError::InvalidCharacter { position: 2, character: '!' };
        assert_eq!(err.to_string(), "invalid character '!' at position 2");

        let err = BarcodeError::InvalidParameter { name: "scale", value: "0".into() };
        assert_eq!(err.to_string(), "invalid scale: 0");
    }
}
