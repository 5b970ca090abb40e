//! Parameter and storage naming.
//!
//! Names are `<prefix>_<sanitized node name>_<disambiguator>`. The
//! disambiguator is random, so two toggles generated for equally named
//! nodes differ with high probability; nothing here checks the storage
//! namespace, that is the installer's job.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::asset::{AssetKind, AssetRef};
use crate::config::GeneratorConfig;

/// Characters that may not appear in a storage path segment.
const ILLEGAL_PATH_CHARS: [char; 9] = ['"', '<', '>', '|', ':', '*', '?', '\\', '/'];

#[inline]
fn is_illegal(c: char) -> bool {
    c.is_ascii_control() || ILLEGAL_PATH_CHARS.contains(&c)
}

/// Replace every illegal character with `_`; an empty name becomes `fallback`.
pub fn sanitize_name(name: &str, fallback: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| if is_illegal(c) { '_' } else { c })
        .collect();
    if safe.is_empty() {
        fallback.to_string()
    } else {
        safe
    }
}

/// Source of the short suffix appended to generated names.
pub trait Disambiguator {
    fn next(&mut self, len: usize) -> String;
}

/// Leading hex digits of a random v4 UUID.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomDisambiguator;

impl Disambiguator for RandomDisambiguator {
    fn next(&mut self, len: usize) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        hex[..len.min(hex.len())].to_string()
    }
}

/// Deterministic counter, zero-padded hex. Meant for tests and for hosts that
/// allocate suffixes themselves.
#[derive(Clone, Debug, Default)]
pub struct SequenceDisambiguator {
    next: u64,
}

impl SequenceDisambiguator {
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl Disambiguator for SequenceDisambiguator {
    fn next(&mut self, len: usize) -> String {
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        let hex = format!("{value:032x}");
        hex[hex.len() - len.min(hex.len())..].to_string()
    }
}

/// Every name one generation needs, derived together so they share the suffix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedNames {
    pub safe_name: String,
    pub disambiguator: String,
    pub parameter: String,
    /// Storage location (the install marker's storage token).
    pub location: String,
    pub controller: AssetRef,
    pub on_clip: AssetRef,
    pub off_clip: AssetRef,
}

impl GeneratedNames {
    pub fn derive(
        config: &GeneratorConfig,
        object_name: &str,
        source: &mut dyn Disambiguator,
    ) -> Self {
        let safe_name = sanitize_name(object_name, &config.fallback_name);
        let disambiguator = source.next(config.disambiguator_len());
        Self::with_suffix(config, safe_name, disambiguator)
    }

    fn with_suffix(config: &GeneratorConfig, safe_name: String, disambiguator: String) -> Self {
        let parameter = format!(
            "{}_{}_{}",
            config.parameter_prefix, safe_name, disambiguator
        );
        let location = join_location(&config.base_path, &parameter);
        let controller_file = format!(
            "{}_{}_{}.{}",
            config.controller_prefix, safe_name, disambiguator, config.controller_extension
        );
        Self {
            controller: AssetRef::new(&location, controller_file, AssetKind::StateMachine),
            on_clip: AssetRef::new(&location, &config.on_clip_file, AssetKind::Clip),
            off_clip: AssetRef::new(&location, &config.off_clip_file, AssetKind::Clip),
            safe_name,
            disambiguator,
            parameter,
            location,
        }
    }
}

fn join_location(base: &str, leaf: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        leaf.to_string()
    } else {
        format!("{base}/{leaf}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_illegal_chars() {
        assert_eq!(sanitize_name("Glasses:Round", "GameObject"), "Glasses_Round");
        assert_eq!(sanitize_name("a/b\\c", "GameObject"), "a_b_c");
        assert_eq!(sanitize_name("tab\there", "GameObject"), "tab_here");
        assert_eq!(sanitize_name("", "GameObject"), "GameObject");
        assert_eq!(sanitize_name("帽子", "GameObject"), "帽子");
    }

    #[test]
    fn random_suffix_has_requested_length() {
        let mut r = RandomDisambiguator;
        let a = r.next(8);
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn sequence_is_deterministic() {
        let mut s = SequenceDisambiguator::starting_at(0xab);
        assert_eq!(s.next(8), "000000ab");
        assert_eq!(s.next(4), "00ac");
    }

    #[test]
    fn derived_names_share_suffix() {
        let cfg = GeneratorConfig::default();
        let mut seq = SequenceDisambiguator::starting_at(1);
        let names = GeneratedNames::derive(&cfg, "Hat", &mut seq);
        assert_eq!(names.parameter, "AUToggle_Hat_00000001");
        assert_eq!(names.location, "Assets/AUToggle/Generated/AUToggle_Hat_00000001");
        assert_eq!(names.controller.file, "AC_Hat_00000001.controller");
        assert_eq!(names.on_clip.path(), format!("{}/ON.anim", names.location));
        assert_eq!(names.off_clip.location, names.location);
    }

    #[test]
    fn equal_names_do_not_collide() {
        let cfg = GeneratorConfig::default();
        let mut r = RandomDisambiguator;
        let a = GeneratedNames::derive(&cfg, "Light", &mut r);
        let b = GeneratedNames::derive(&cfg, "Light", &mut r);
        assert_ne!(a.parameter, b.parameter);
    }
}
