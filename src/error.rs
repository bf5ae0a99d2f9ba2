use thiserror::Error;

/// Everything that can go wrong when poking at a list or a table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The key isn't stored in the table.
    #[error("key not found")]
    KeyNotFound,

    /// No node in the list holds the item.
    #[error("item not found")]
    ItemNotFound,

    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A table always has at least one bucket.
    #[error("bucket count must be positive, got {0}")]
    InvalidBucketCount(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_messages() {
        assert_eq!("key not found", Error::KeyNotFound.to_string());
        assert_eq!(
            "index 3 out of range for list of length 2",
            Error::IndexOutOfRange { index: 3, len: 2 }.to_string()
        );
        assert_eq!(
            "bucket count must be positive, got 0",
            Error::InvalidBucketCount(0).to_string()
        );
    }
}
