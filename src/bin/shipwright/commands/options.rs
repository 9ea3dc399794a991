//! `shipwright options` command

use anyhow::Result;

use crate::cli::OptionsArgs;
use shipwright::platform;

pub fn execute(args: OptionsArgs) -> Result<()> {
    let platform = platform::by_name(&args.platform).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown platform `{}`\n\
             help: Run `shipwright platforms` to see available platforms",
            args.platform
        )
    })?;

    println!("Options for {}:", platform.name());
    println!();

    for opt in platform.options() {
        println!("  {:20} {} (default: {})", opt.name, opt.help, opt.default);
    }

    Ok(())
}
