//! `shipwright platforms` command

use anyhow::Result;

use crate::cli::PlatformsArgs;
use shipwright::platform;
use shipwright::platform::host::HostEnv;

pub fn execute(_args: PlatformsArgs) -> Result<()> {
    let host = HostEnv::from_process();

    println!("Platforms:");
    println!();

    for p in platform::all() {
        let buildable = if p.can_build(&host) {
            "buildable"
        } else {
            "not buildable on this host"
        };
        let active = if p.is_active() { "active" } else { "inactive" };
        println!("  {:8} {}, {}", p.name(), active, buildable);

        let flags = p.default_flags();
        if !flags.is_empty() {
            let rendered: Vec<String> = flags
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            println!("           default flags: {}", rendered.join(", "));
        }
    }

    Ok(())
}
