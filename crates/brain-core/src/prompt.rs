//! Fingerprinting of what a provider was shown.

use sha2::{Digest, Sha256};

use crate::message::CompletionRequest;

/// Fingerprint a full request: system prompt plus every transcript turn.
///
/// Fields are length-prefixed so that moving text between turns changes the
/// fingerprint.
pub fn fingerprint_request(request: &CompletionRequest) -> String {
    let mut hasher = Sha256::new();
    hasher.update((request.system_prompt.len() as u64).to_be_bytes());
    hasher.update(request.system_prompt.as_bytes());
    for turn in &request.transcript {
        hasher.update(turn.role.api_role().as_bytes());
        hasher.update((turn.content.len() as u64).to_be_bytes());
        hasher.update(turn.content.as_bytes());
    }
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatTurn;

    #[test]
    fn test_fingerprint_stable() {
        let request = CompletionRequest::new("sys", vec![ChatTurn::customer("hi")], 100);
        let first = fingerprint_request(&request);

        assert_eq!(first, fingerprint_request(&request.clone()));
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_sensitive_to_turn_boundaries() {
        let a = CompletionRequest::new(
            "sys",
            vec![ChatTurn::customer("ab"), ChatTurn::customer("c")],
            100,
        );
        let b = CompletionRequest::new(
            "sys",
            vec![ChatTurn::customer("a"), ChatTurn::customer("bc")],
            100,
        );
        assert_ne!(fingerprint_request(&a), fingerprint_request(&b));
        assert_eq!(fingerprint_request(&a), fingerprint_request(&a.clone()));
    }

    #[test]
    fn test_fingerprint_sensitive_to_role() {
        let customer = CompletionRequest::new("sys", vec![ChatTurn::customer("hi")], 100);
        let assistant = CompletionRequest::new("sys", vec![ChatTurn::assistant("hi")], 100);
        assert_ne!(fingerprint_request(&customer), fingerprint_request(&assistant));
    }
}
