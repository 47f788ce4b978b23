//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs holding the flags a command actually uses
//! - `from_matches()` extractors that pull those fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;
use portint_core::MathMode;
use portint_vm::{Backend, EvalConfig, NativeWidth, Verbosity};

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::eval::EvalArgs;
use crate::commands::trace::TraceArgs;
use crate::commands::types::TypesArgs;

pub struct EvalParams {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub mode: MathMode,
    pub backend: Backend,
    pub json: bool,
    pub color: ColorChoice,
    // Note: verbose is parsed but not extracted (shared with trace)
}

impl EvalParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: m.get_one::<PathBuf>("program_path").cloned(),
            expr: m.get_one::<String>("expr").cloned(),
            mode: parse_mode(m),
            backend: parse_backend(m),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<EvalParams> for EvalArgs {
    fn from(p: EvalParams) -> Self {
        Self {
            program_path: p.program_path,
            expr: p.expr,
            config: EvalConfig::new().mode(p.mode).backend(p.backend),
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub mode: MathMode,
    pub backend: Backend,
    pub verbose: u8,
    pub color: ColorChoice,
    // Note: json is parsed but not extracted (shared with eval)
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: m.get_one::<PathBuf>("program_path").cloned(),
            expr: m.get_one::<String>("expr").cloned(),
            mode: parse_mode(m),
            backend: parse_backend(m),
            verbose: m.get_count("verbose"),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            program_path: p.program_path,
            expr: p.expr,
            config: EvalConfig::new().mode(p.mode).backend(p.backend),
            verbosity,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub color: ColorChoice,
    // Note: mode, backend, native_width, json, verbose are parsed but not extracted
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: m.get_one::<PathBuf>("program_path").cloned(),
            expr: m.get_one::<String>("expr").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            program_path: p.program_path,
            expr: p.expr,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub program_path: Option<PathBuf>,
    pub expr: Option<String>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            program_path: m.get_one::<PathBuf>("program_path").cloned(),
            expr: m.get_one::<String>("expr").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            program_path: p.program_path,
            expr: p.expr,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TypesParams {
    pub json: bool,
}

impl TypesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            json: m.get_flag("json"),
        }
    }
}

impl From<TypesParams> for TypesArgs {
    fn from(p: TypesParams) -> Self {
        Self { json: p.json }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Parse --mode flag into MathMode.
fn parse_mode(m: &ArgMatches) -> MathMode {
    match m.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("unsafe") => MathMode::Unsafe,
        _ => MathMode::Capture,
    }
}

/// Combine --backend and --native-width. The width is ignored for simulation.
fn parse_backend(m: &ArgMatches) -> Backend {
    let width = m
        .get_one::<String>("native_width")
        .and_then(|s| s.parse().ok())
        .and_then(NativeWidth::from_bits)
        .unwrap_or_default();

    match m.get_one::<String>("backend").map(|s| s.as_str()) {
        Some("generated") => Backend::Generated(width),
        Some("legacy") => Backend::Legacy(width),
        _ => Backend::Simulation,
    }
}
