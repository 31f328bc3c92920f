//! Cheap header check run before a full parse.
//!
//! Reads the first [`HEADER_WINDOW`] bytes and looks for a line that is
//! exactly [`ROOT_SIGNATURE`]. The window is kept in memory and replayed in
//! front of the rest of the stream, so pipes and FIFOs are checked the same
//! way as regular files and nothing is ever seeked.

use std::io::{Chain, Cursor, ErrorKind, Read};

use super::CollectionError;

/// Number of leading bytes inspected.
pub const HEADER_WINDOW: usize = 60;

/// Line that must appear inside the header window.
pub const ROOT_SIGNATURE: &str = "<BugCollection>";

/// A checked stream: the buffered header window followed by the untouched remainder.
pub type Prechecked<R> = Chain<Cursor<Vec<u8>>, R>;

/// Check that `source` starts like a saved bug collection.
///
/// On success the returned reader yields the whole stream from its original
/// position, header window included.
pub fn precheck<R: Read>(mut source: R) -> Result<Prechecked<R>, CollectionError> {
    let mut window = vec![0u8; HEADER_WINDOW];
    let mut filled = 0;
    while filled < HEADER_WINDOW {
        match source.read(&mut window[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }

    if filled < HEADER_WINDOW {
        return Err(CollectionError::Truncated {
            expected: HEADER_WINDOW,
            found: filled,
        });
    }
    check_header(&window)?;

    Ok(Cursor::new(window).chain(source))
}

/// Scan a header window line by line for the root signature.
pub fn check_header(window: &[u8]) -> Result<(), CollectionError> {
    let text = String::from_utf8_lossy(window);
    if text.split(['\r', '\n']).any(|line| line == ROOT_SIGNATURE) {
        Ok(())
    } else {
        Err(CollectionError::NotBugCollection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn padded(header: &str) -> Vec<u8> {
        let mut bytes = header.as_bytes().to_vec();
        bytes.resize(bytes.len().max(HEADER_WINDOW) + 20, b' ');
        bytes
    }

    #[test]
    fn test_accepts_signature_after_prolog() {
        let bytes = padded("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<BugCollection>\n");
        assert!(precheck(&bytes[..]).is_ok());
    }

    #[test]
    fn test_accepts_crlf_lines() {
        let bytes = padded("<?xml version=\"1.0\"?>\r\n<BugCollection>\r\n");
        assert!(precheck(&bytes[..]).is_ok());
    }

    #[test]
    fn test_rejects_short_stream() {
        let err = precheck(&b"<BugCollection>\n</BugCollection>"[..]).unwrap_err();
        assert!(matches!(
            err,
            CollectionError::Truncated {
                expected: 60,
                found: 32
            }
        ));
    }

    #[test]
    fn test_rejects_missing_signature() {
        let bytes = padded("<?xml version=\"1.0\"?>\n<Other>\n");
        assert!(matches!(
            precheck(&bytes[..]),
            Err(CollectionError::NotBugCollection)
        ));
    }

    #[test]
    fn test_rejects_root_with_attributes() {
        let window = padded("<BugCollection version=\"1\">\n");
        assert!(check_header(&window[..HEADER_WINDOW]).is_err());
    }

    #[test]
    fn test_rejects_signature_past_window() {
        let mut header = " ".repeat(HEADER_WINDOW);
        header.push_str("\n<BugCollection>\n");
        let bytes = padded(&header);
        assert!(matches!(
            precheck(&bytes[..]),
            Err(CollectionError::NotBugCollection)
        ));
    }

    #[test]
    fn test_replays_header_window() {
        let mut bytes = padded("<BugCollection>\n");
        bytes.extend_from_slice(b"</BugCollection>\n");

        let mut replayed = Vec::new();
        precheck(&bytes[..])
            .expect("accepted")
            .read_to_end(&mut replayed)
            .expect("read");
        assert_eq!(replayed, bytes);
    }
}
