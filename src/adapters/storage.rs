use crate::domain::ports::Storage;
use crate::utils::error::{FleetError, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Little-endian UTF-16 with a byte-order mark at the start of the file.
    #[default]
    Utf16,
    Utf8,
}

impl TextEncoding {
    /// Bytes for `text`, prefixed with the byte-order mark when `at_start`.
    pub fn encode(&self, text: &str, at_start: bool) -> Vec<u8> {
        match self {
            TextEncoding::Utf16 => {
                let mut bytes = Vec::with_capacity(text.len() * 2 + 2);
                if at_start {
                    bytes.extend_from_slice(&UTF16_LE_BOM);
                }
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                bytes
            }
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
        }
    }

    /// Guesses the encoding of existing file content from its first bytes.
    /// `None` for empty content.
    pub fn sniff(head: &[u8]) -> Option<Self> {
        match head {
            [] => None,
            [0xFF, 0xFE, ..] => Some(TextEncoding::Utf16),
            // ASCII text in UTF-16 LE without a byte-order mark.
            [_, 0, ..] => Some(TextEncoding::Utf16),
            _ => Some(TextEncoding::Utf8),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf16 => "utf16",
            TextEncoding::Utf8 => "utf8",
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let invalid = |reason: &str| {
            FleetError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                reason.to_string(),
            ))
        };

        match self {
            TextEncoding::Utf16 => {
                let body = bytes.strip_prefix(&UTF16_LE_BOM).unwrap_or(bytes);
                if body.len() % 2 != 0 {
                    return Err(invalid("odd number of bytes in UTF-16 text"));
                }
                let units: Vec<u16> = body
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .collect();
                String::from_utf16(&units).map_err(|_| invalid("invalid UTF-16 text"))
            }
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(&UTF8_BOM).unwrap_or(bytes);
                String::from_utf8(body.to_vec()).map_err(|_| invalid("invalid UTF-8 text"))
            }
        }
    }
}

impl FromStr for TextEncoding {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf16" | "utf-16" | "unicode" => Ok(TextEncoding::Utf16),
            "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
            _ => Err(FleetError::InvalidConfigValueError {
                field: "output.encoding".to_string(),
                value: s.to_string(),
                reason: "Supported encodings: utf16, utf8".to_string(),
            }),
        }
    }
}

/// Appends text to files on the local file system.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    encoding: TextEncoding,
}

impl LocalStorage {
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }
}

impl Storage for LocalStorage {
    fn append_text(&self, path: &Path, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let wrap = |source: std::io::Error| FleetError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(wrap)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)
            .map_err(wrap)?;

        let mut head = Vec::with_capacity(UTF8_BOM.len());
        std::io::Read::by_ref(&mut file)
            .take(UTF8_BOM.len() as u64)
            .read_to_end(&mut head)
            .map_err(wrap)?;
        let at_start = head.is_empty();

        // Mixing encodings in one file would leave it unreadable.
        if let Some(existing) = TextEncoding::sniff(&head) {
            if existing != self.encoding {
                return Err(wrap(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!(
                        "file is {} but this run writes {}",
                        existing.name(),
                        self.encoding.name()
                    ),
                )));
            }
        }

        file.write_all(&self.encoding.encode(text, at_start))
            .map_err(wrap)?;
        file.flush().map_err(wrap)?;

        tracing::debug!("Appended {} bytes of text to {}", text.len(), path.display());
        Ok(())
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let data = fs::read(path)?;
        self.encoding.decode(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_utf16_bom_only_at_start() {
        let first = TextEncoding::Utf16.encode("A\n", true);
        assert_eq!(first, vec![0xFF, 0xFE, b'A', 0, b'\n', 0]);

        let next = TextEncoding::Utf16.encode("B", false);
        assert_eq!(next, vec![b'B', 0]);
    }

    #[test]
    fn test_decode_rejects_odd_utf16() {
        assert!(TextEncoding::Utf16.decode(&[0xFF, 0xFE, b'A']).is_err());
    }

    #[test]
    fn test_encoding_names() {
        assert_eq!("UTF-16".parse::<TextEncoding>().unwrap(), TextEncoding::Utf16);
        assert_eq!("utf8".parse::<TextEncoding>().unwrap(), TextEncoding::Utf8);
        assert!("latin1".parse::<TextEncoding>().is_err());
    }

    #[test]
    fn test_append_accumulates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("Cars.txt");
        let storage = LocalStorage::default();

        storage.append_text(&path, "first\n").unwrap();
        storage.append_text(&path, "second\n").unwrap();

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &UTF16_LE_BOM);
        // Exactly one byte-order mark.
        assert_eq!(bytes.windows(2).filter(|w| *w == UTF16_LE_BOM).count(), 1);
        assert_eq!(storage.read_text(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_empty_text_does_not_create_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("MotorBoats.txt");

        LocalStorage::new(TextEncoding::Utf8)
            .append_text(&path, "")
            .unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_sniff_existing_content() {
        assert_eq!(TextEncoding::sniff(&[]), None);
        assert_eq!(TextEncoding::sniff(&[0xFF, 0xFE, b'C']), Some(TextEncoding::Utf16));
        assert_eq!(TextEncoding::sniff(&[b'C', 0, b'a']), Some(TextEncoding::Utf16));
        assert_eq!(TextEncoding::sniff(b"Car"), Some(TextEncoding::Utf8));
        assert_eq!(TextEncoding::sniff(&UTF8_BOM), Some(TextEncoding::Utf8));
    }

    #[test]
    fn test_utf8_append_to_utf16_file_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Cars.txt");
        LocalStorage::new(TextEncoding::Utf16)
            .append_text(&path, "Car. Model: AAAAA, Power: 50\n")
            .unwrap();
        let before = fs::read(&path).unwrap();

        let err = LocalStorage::new(TextEncoding::Utf8)
            .append_text(&path, "Car. Model: BBBBB, Power: 60\n")
            .unwrap_err();

        assert!(matches!(err, FleetError::WriteError { .. }));
        assert!(err.to_string().contains("utf16"));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_utf16_append_to_utf8_file_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("MotorBoats.txt");
        fs::write(&path, "MotorBoat. Model: CCCCC, Power: 70\n").unwrap();

        let err = LocalStorage::new(TextEncoding::Utf16)
            .append_text(&path, "MotorBoat. Model: DDDDD, Power: 80\n")
            .unwrap_err();

        assert!(matches!(err, FleetError::WriteError { .. }));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "MotorBoat. Model: CCCCC, Power: 70\n"
        );
    }

    #[test]
    fn test_utf8_appends_to_utf8_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Cars.txt");
        let storage = LocalStorage::new(TextEncoding::Utf8);

        storage.append_text(&path, "one\n").unwrap();
        storage.append_text(&path, "two\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn test_unwritable_destination_is_write_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending.
        let err = LocalStorage::default()
            .append_text(dir.path(), "line\n")
            .unwrap_err();
        assert!(matches!(err, FleetError::WriteError { .. }));
    }
}
