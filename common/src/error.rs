//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Header not found: {0}")]
    HeaderNotFound(String),

    #[error("Invalid room number: {0}")]
    InvalidRoomNumber(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_header() {
        let error = Error::HeaderNotFound("护照".to_string());
        assert_eq!(format!("{}", error), "Header not found: 护照");
    }

    #[test]
    fn test_error_display_room() {
        let error = Error::InvalidRoomNumber("A12".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Invalid room number"));
        assert!(display.contains("A12"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::HeaderNotFound("房间".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("HeaderNotFound"));
        assert!(debug.contains("房间"));
    }
}
