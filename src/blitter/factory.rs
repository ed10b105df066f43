// src/blitter/factory.rs

//! Registry of the available blitters, looked up by name.

use log::info;
use once_cell::sync::Lazy;

use super::{Blitter, Blitter16bppAnim, Blitter16bppSimple, BlitterError};

/// Name of the blitter chosen when none is requested.
pub const DEFAULT_BLITTER: &str = "16bpp-anim";

/// A registered blitter: its name, a human readable description and a
/// constructor.
pub struct BlitterFactory {
    pub name: &'static str,
    pub description: &'static str,
    create: fn() -> Box<dyn Blitter>,
}

impl BlitterFactory {
    pub fn create(&self) -> Box<dyn Blitter> {
        (self.create)()
    }
}

impl std::fmt::Debug for BlitterFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlitterFactory")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish()
    }
}

static FACTORIES: Lazy<Vec<BlitterFactory>> = Lazy::new(|| {
    vec![
        BlitterFactory {
            name: "16bpp-simple",
            description: "16bpp Simple Blitter (no palette animation)",
            create: || Box::new(Blitter16bppSimple::new()),
        },
        BlitterFactory {
            name: "16bpp-anim",
            description: "16bpp Animation Blitter (palette animation)",
            create: || Box::new(Blitter16bppAnim::new()),
        },
    ]
});

/// All registered blitters.
pub fn factories() -> &'static [BlitterFactory] {
    &FACTORIES
}

/// Creates the blitter registered as `name`, ignoring case. An empty name
/// selects [`DEFAULT_BLITTER`].
pub fn select_blitter(name: &str) -> Result<Box<dyn Blitter>, BlitterError> {
    let wanted = if name.is_empty() { DEFAULT_BLITTER } else { name };

    let factory = factories()
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| BlitterError::UnknownBlitter(name.to_string()))?;

    info!("Using blitter '{}'", factory.name);
    Ok(factory.create())
}

/// One line per registered blitter: name and description.
pub fn blitters_info() -> String {
    let mut out = String::from("List of blitters:\n");
    for f in factories() {
        out.push_str(&format!("{:>18}: {}\n", f.name, f.description));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn selects_by_name_ignoring_case() {
        let blitter = select_blitter("16BPP-Simple").expect("registered");
        assert_eq!(blitter.name(), "16bpp-simple");
    }

    #[test_log::test]
    fn empty_name_selects_the_default() {
        let blitter = select_blitter("").expect("default exists");
        assert_eq!(blitter.name(), DEFAULT_BLITTER);
    }

    #[test_log::test]
    fn unknown_name_is_an_error() {
        let err = select_blitter("32bpp-optimized").err().expect("not registered");
        assert_eq!(err, BlitterError::UnknownBlitter("32bpp-optimized".to_string()));
        assert_eq!(err.to_string(), "unknown blitter '32bpp-optimized'");
    }

    #[test_log::test]
    fn info_lists_every_blitter() {
        let info = blitters_info();
        for f in factories() {
            assert!(info.contains(f.name));
            assert!(info.contains(f.description));
        }
    }
}
