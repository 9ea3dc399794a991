//! `shipwright configure` command

use anyhow::Result;

use crate::cli::ConfigureArgs;
use shipwright::core::env::BuildEnv;
use shipwright::core::profile::{Arch, BuildProfile};
use shipwright::platform;
use shipwright::platform::host::HostEnv;
use shipwright::platform::sdk::XcrunSdkResolver;
use shipwright::util::config::{global_config_path, load_config, project_config_path};

pub fn execute(args: ConfigureArgs) -> Result<()> {
    let host = HostEnv::from_process();

    let platform = platform::by_name(&args.platform).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown platform `{}`\n\
             help: Run `shipwright platforms` to see available platforms",
            args.platform
        )
    })?;

    if !platform.can_build(&host) {
        anyhow::bail!(
            "this host cannot build for {}\n\
             \n\
             Building for {} requires a macOS host or an osxcross toolchain\n\
             (set the OSXCROSS_IOS environment variable).",
            platform.name(),
            platform.name()
        );
    }

    let profile = build_profile(&args)?;

    tracing::debug!(
        "Configuring {} (target={}, arch={})",
        platform.name(),
        profile.target,
        profile.arch
    );

    let mut env = BuildEnv::new(host.search_path.clone());
    platform.configure(&profile, &host, &XcrunSdkResolver, &mut env)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&env)?);
    } else {
        print_env(platform.name(), &profile, &env);
    }

    Ok(())
}

/// Assemble the build profile from config files and CLI options.
///
/// CLI options override project config, which overrides global config.
fn build_profile(args: &ConfigureArgs) -> Result<BuildProfile> {
    let cwd = std::env::current_dir()?;
    let project_path = project_config_path(&cwd);
    let config = match global_config_path() {
        Some(global) => load_config(&global, &project_path),
        None => load_config(std::path::Path::new(""), &project_path),
    };

    let mut profile = BuildProfile::default();
    config.apply(&mut profile);

    if let Some(target) = args.target {
        profile.target = target;
    }
    if let Some(optimize) = args.optimize {
        profile.optimize = optimize;
    }
    if let Some(ref arch) = args.arch {
        profile.arch = Arch::from_name(arch);
    }
    if args.use_lto {
        profile.use_lto = true;
    }
    if args.tools {
        profile.tools = true;
    }
    if args.vulkan {
        profile.vulkan = true;
    }
    if args.simulator {
        profile.simulator = true;
    }
    if args.exceptions {
        profile.exceptions = true;
    }
    if let Some(ref toolchain_path) = args.toolchain_path {
        profile.toolchain_path = toolchain_path.clone();
    }
    if let Some(ref sdk_path) = args.sdk_path {
        profile.sdk_path = sdk_path.clone();
    }
    if let Some(ref triple) = args.triple {
        profile.triple = triple.clone();
    }

    Ok(profile)
}

fn print_env(platform_name: &str, profile: &BuildProfile, env: &BuildEnv) {
    println!(
        "# Build environment for {} ({}, {}):",
        platform_name, profile.target, profile.arch
    );
    println!();

    println!("# Compile flags:");
    for flag in &env.cflags {
        println!("  {}", flag);
    }
    println!();

    println!("# Assembler flags:");
    for flag in &env.asflags {
        println!("  {}", flag);
    }
    println!();

    println!("# Link flags:");
    for flag in &env.linkflags {
        println!("  {}", flag);
    }
    println!();

    println!("# Defines:");
    for define in &env.defines {
        println!("  {}", define.to_flag());
    }
    println!();

    println!("# Include paths:");
    for dir in &env.include_dirs {
        println!("  -I{}", dir.display());
    }
    println!();

    println!("# Toolchain:");
    if let Some(ref cc) = env.cc {
        println!("  CC:      {}", cc);
    }
    if let Some(ref cxx) = env.cxx {
        println!("  CXX:     {}", cxx);
    }
    if let Some(ref assembler) = env.assembler {
        println!("  AS:      {}", assembler);
    }
    if let Some(ref ar) = env.ar {
        println!("  AR:      {}", ar);
    }
    if let Some(ref ranlib) = env.ranlib {
        println!("  RANLIB:  {}", ranlib);
    }

    if !env.env_vars.is_empty() {
        println!();
        println!("# Environment:");
        for (key, value) in &env.env_vars {
            println!("  {}={}", key, value);
        }
    }

    if !env.extra_suffix.is_empty() {
        println!();
        println!("# Artifact suffix: {}", env.extra_suffix);
    }
}
