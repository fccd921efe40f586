//! Host GPU and OS detection.
//!
//! The GPU comes from `nvidia-smi`, which reports the public driver version
//! (`591.44`); it is rewritten into the Windows driver-store form
//! (`32.0.15.9144`) that [`GpuInfo`] works with. Command-line overrides take
//! precedence over anything probed.

use std::process::Command;

use gecko_core::{GpuInfo, OsInfo, SystemInfoError, SystemInfoPort, Version};

const NVIDIA_SMI: &str = "nvidia-smi";

/// Leading digits of the Windows driver-store version. Only the trailing
/// five digits carry the public version, so any prefix of this length works.
const DRIVER_STORE_PREFIX: &str = "32.0.1";

/// Values given on the command line in place of probing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOverrides {
    pub gpu_name: Option<String>,
    /// Driver version in Windows driver-store form.
    pub driver_version: Option<String>,
    /// OS version as `major.minor`.
    pub os_version: Option<String>,
    pub os_32bit: bool,
}

/// [`SystemInfoPort`] backed by `nvidia-smi` and the host OS.
#[derive(Debug, Clone, Default)]
pub struct HostSystemProbe {
    overrides: ProbeOverrides,
}

impl HostSystemProbe {
    pub const fn new(overrides: ProbeOverrides) -> Self {
        Self { overrides }
    }

    fn probe_gpu() -> Result<GpuInfo, SystemInfoError> {
        let output = Command::new(NVIDIA_SMI)
            .args(["--query-gpu=name,driver_version", "--format=csv,noheader"])
            .output()
            .map_err(|e| SystemInfoError::CommandFailed(format!("{NVIDIA_SMI}: {e}")))?;

        if !output.status.success() {
            return Err(SystemInfoError::CommandFailed(format!(
                "{NVIDIA_SMI} exited with {}",
                output.status
            )));
        }

        parse_nvidia_smi(&String::from_utf8_lossy(&output.stdout))
    }
}

impl SystemInfoPort for HostSystemProbe {
    fn current_gpu(&self) -> Option<GpuInfo> {
        if let (Some(name), Some(version)) =
            (&self.overrides.gpu_name, &self.overrides.driver_version)
        {
            return Some(GpuInfo::new(name, version));
        }

        match Self::probe_gpu() {
            Ok(mut gpu) => {
                if let Some(name) = &self.overrides.gpu_name {
                    gpu.raw_name.clone_from(name);
                }
                if let Some(version) = &self.overrides.driver_version {
                    gpu.raw_version.clone_from(version);
                }
                tracing::debug!(
                    target: "gecko.cli",
                    name = %gpu.raw_name,
                    version = %gpu.raw_version,
                    "Detected GPU"
                );
                Some(gpu)
            }
            Err(e) => {
                tracing::debug!(target: "gecko.cli", error = %e, "GPU probe failed");
                None
            }
        }
    }

    fn current_os(&self) -> Option<OsInfo> {
        let is_64_bit = !self.overrides.os_32bit && host_is_64_bit();

        if let Some(version) = &self.overrides.os_version {
            return match Version::parse(version) {
                Ok(version) => Some(OsInfo::new(version, is_64_bit)),
                Err(e) => {
                    tracing::warn!(target: "gecko.cli", error = %e, "Ignoring --os-version");
                    None
                }
            };
        }

        match host_os_version() {
            Ok(version) => Some(OsInfo::new(version, is_64_bit)),
            Err(e) => {
                tracing::debug!(target: "gecko.cli", error = %e, "OS probe failed");
                None
            }
        }
    }
}

/// Parse the first line of `nvidia-smi --query-gpu=name,driver_version --format=csv,noheader`.
pub fn parse_nvidia_smi(stdout: &str) -> Result<GpuInfo, SystemInfoError> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(SystemInfoError::NoGpu)?;

    let (name, version) = line
        .rsplit_once(',')
        .ok_or_else(|| unexpected(line, "expected 'name, version'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(unexpected(line, "empty GPU name"));
    }

    let version = driver_store_version(version.trim())
        .ok_or_else(|| unexpected(line, "unrecognised driver version"))?;
    Ok(GpuInfo::new(name, version))
}

/// Rewrite a public NVIDIA version (`591.44`, or `550.54.14` on Linux) into
/// Windows driver-store form (`32.0.15.9144`).
pub fn driver_store_version(public: &str) -> Option<String> {
    let mut parts = public.split('.');
    let major = parts.next().filter(|m| m.len() == 3 && m.chars().all(|c| c.is_ascii_digit()))?;
    let minor = parts
        .next()
        .filter(|m| (1..=2).contains(&m.len()) && m.chars().all(|c| c.is_ascii_digit()))?;

    let digits = format!("{major}{minor:0>2}");
    let (head, tail) = digits.split_at(1);
    Some(format!("{DRIVER_STORE_PREFIX}{head}.{tail}"))
}

fn unexpected(output: &str, reason: &str) -> SystemInfoError {
    SystemInfoError::UnexpectedOutput {
        command: NVIDIA_SMI.to_string(),
        reason: format!("{reason}: {output:?}"),
    }
}

fn host_is_64_bit() -> bool {
    std::env::consts::ARCH.contains("64")
}

fn host_os_version() -> Result<Version, SystemInfoError> {
    let (program, args): (&str, &[&str]) = if cfg!(windows) {
        ("cmd", &["/C", "ver"])
    } else {
        ("uname", &["-r"])
    };

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| SystemInfoError::CommandFailed(format!("{program}: {e}")))?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    leading_version(&stdout).ok_or_else(|| SystemInfoError::UnexpectedOutput {
        command: program.to_string(),
        reason: format!("no version in {:?}", stdout.trim()),
    })
}

/// First `major.minor` found in free-form version output.
///
/// Handles `Microsoft Windows [Version 10.0.22631.4317]` and kernel
/// releases like `6.8.0-45-generic`.
pub fn leading_version(text: &str) -> Option<Version> {
    text.split(|c: char| c.is_whitespace() || c == '[' || c == ']')
        .filter(|token| token.starts_with(|c: char| c.is_ascii_digit()))
        .find_map(|token| {
            let mut numbers = token
                .split(|c: char| !c.is_ascii_digit())
                .map(str::parse::<u32>);
            match (numbers.next(), numbers.next()) {
                (Some(Ok(major)), Some(Ok(minor))) => Some(Version::new(major, minor)),
                _ => None,
            }
        })
}
