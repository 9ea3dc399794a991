//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shipwright::core::profile::{BuildTarget, Optimize};

/// Shipwright - platform build configuration for a native engine
#[derive(Parser)]
#[command(name = "shipwright")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Derive the build environment for a platform
    Configure(ConfigureArgs),

    /// List known platforms and whether this host can build them
    Platforms(PlatformsArgs),

    /// Show the configuration options a platform accepts
    Options(OptionsArgs),
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Platform to configure
    #[arg(long, default_value = "ios")]
    pub platform: String,

    /// Build target (debug, release, release_debug)
    #[arg(long)]
    pub target: Option<BuildTarget>,

    /// Optimization tier (speed, size)
    #[arg(long)]
    pub optimize: Option<Optimize>,

    /// Target architecture (anything other than x86_64 builds arm64)
    #[arg(long)]
    pub arch: Option<String>,

    /// Enable link-time optimization
    #[arg(long)]
    pub use_lto: bool,

    /// Build the full-tooling (editor) variant
    #[arg(long)]
    pub tools: bool,

    /// Enable the Vulkan rendering backend
    #[arg(long)]
    pub vulkan: bool,

    /// Build for the iOS Simulator
    #[arg(long)]
    pub simulator: bool,

    /// Enable exceptions on non-tools builds
    #[arg(long)]
    pub exceptions: bool,

    /// Path to the iOS toolchain
    #[arg(long)]
    pub toolchain_path: Option<PathBuf>,

    /// Path to the iOS SDK (skips SDK resolution)
    #[arg(long)]
    pub sdk_path: Option<PathBuf>,

    /// Triple prefix for toolchain executables
    #[arg(long)]
    pub triple: Option<String>,

    /// Emit the derived environment as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PlatformsArgs {}

#[derive(Args)]
pub struct OptionsArgs {
    /// Platform to show options for
    #[arg(default_value = "ios")]
    pub platform: String,
}
