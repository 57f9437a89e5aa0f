use super::codec::{decode, DecodeError};
use crate::model::identity::{IdentityToken, ItemType};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScannerState {
    #[default]
    Idle,
    Scanning,
    Closed,
}

/// What happened to one scanned payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The payload identifies a record of the expected type. The scanner is
    /// closed and the token should be applied as a list filter.
    Accepted(IdentityToken),
    /// Decoding failed; the scanner keeps scanning.
    InvalidFormat(DecodeError),
    /// Valid payload for another type of record; the scanner keeps scanning.
    WrongType { expected: ItemType, found: String },
    /// Input arrived while the scanner was not scanning.
    Ignored,
}

impl ScanOutcome {
    /// Text of the toast shown for this outcome.
    pub fn message(&self) -> Option<String> {
        match self {
            ScanOutcome::Accepted(token) => Some(format!("Item found: {}", token.name)),
            ScanOutcome::InvalidFormat(err) => Some(err.to_string()),
            ScanOutcome::WrongType { .. } => {
                Some("Scanned item is not of the expected type.".to_string())
            }
            ScanOutcome::Ignored => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ScanOutcome::InvalidFormat(_) | ScanOutcome::WrongType { .. }
        )
    }
}

/// Scanner bound to one record list.
///
/// `Idle → Scanning → Closed`. Every decoded payload is reported as a
/// [`ScanOutcome`]; only an accepted one leaves `Scanning`.
///
/// `session` identifies the capture stream currently held. Opening the
/// scanner again starts a new session, which tells the host to release the
/// previous stream before acquiring a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scanner {
    expected: ItemType,
    state: ScannerState,
    session: u64,
}

impl Scanner {
    pub fn new(expected: ItemType) -> Self {
        Self {
            expected,
            state: ScannerState::Idle,
            session: 0,
        }
    }

    pub fn expected(&self) -> ItemType {
        self.expected
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn is_scanning(&self) -> bool {
        self.state == ScannerState::Scanning
    }

    /// Starts scanning and returns the new session id.
    pub fn open(&mut self) -> u64 {
        if self.is_scanning() {
            debug!("Releasing scanner session {}", self.session);
        }
        self.session += 1;
        self.state = ScannerState::Scanning;
        self.session
    }

    pub fn handle_payload(&mut self, text: &str) -> ScanOutcome {
        if !self.is_scanning() {
            return ScanOutcome::Ignored;
        }
        let scanned = match decode(text) {
            Ok(scanned) => scanned,
            Err(err) => {
                debug!("Rejected scan: {:?}", err);
                return ScanOutcome::InvalidFormat(err);
            }
        };
        match scanned.expect(self.expected) {
            Ok(token) => {
                info!("Scanned {} '{}'", token.item_type, token.id);
                self.state = ScannerState::Closed;
                ScanOutcome::Accepted(token)
            }
            Err(mismatch) => ScanOutcome::WrongType {
                expected: mismatch.expected,
                found: mismatch.found,
            },
        }
    }

    pub fn close(&mut self) {
        self.state = ScannerState::Closed;
    }
}
