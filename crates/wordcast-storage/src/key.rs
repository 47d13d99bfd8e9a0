use std::fmt;

use sha2::{Digest, Sha256};

/// Content address of a synthesized clip
///
/// SHA-256 over `voice ‖ 0x00 ‖ text`, rendered as lowercase hex. Voice
/// identifiers never contain NUL, so the separator keeps ("a", "bc") and
/// ("ab", "c") apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn derive(voice: &str, text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(voice.as_bytes());
        hasher.update([0u8]);
        hasher.update(text.as_bytes());

        Self(format!("{:x}", hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object name inside the bucket, e.g. `tts/<hex>.mp3`
    pub fn object_path(&self, prefix: &str) -> String {
        let prefix = prefix.trim_matches('/');

        if prefix.is_empty() {
            format!("{}.mp3", self.0)
        } else {
            format!("{prefix}/{}.mp3", self.0)
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
