use crate::config::defaults::{DefaultsConfig, MATERIALS};
use crate::error::Result;

pub fn run() -> Result<()> {
    let defaults = DefaultsConfig::default();
    let mut names: Vec<_> = MATERIALS.keys().copied().collect();
    names.sort_unstable();

    println!(
        "{:<18} {:>14} {:>8} {:>14}",
        "Material", "E (Pa)", "nu", "A (J)"
    );
    for name in names {
        let Some(material) = MATERIALS.get(name) else {
            continue;
        };
        let marker = if name == defaults.probe {
            " (default probe)"
        } else if name == defaults.sample {
            " (default sample)"
        } else {
            ""
        };
        println!(
            "{:<18} {:>14.3e} {:>8.2} {:>14.3e}{}",
            name, material.youngs_modulus, material.poisson_ratio, material.hamaker, marker
        );
    }
    Ok(())
}
