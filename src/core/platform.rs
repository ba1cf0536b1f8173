//! Platform catalog.
//!
//! Maps stable platform tokens to display names, output subfolder names and
//! engine target identifiers.

use std::cmp::Ordering;
use std::str::FromStr;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A target platform the driver can produce a build for.
///
/// Tokens are stable and append-only: once assigned, a token keeps its meaning
/// forever, and new platforms are added at the end of the catalog. Persisted
/// target lists stay valid across upgrades because of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Win32,
    Win64,
    Mac32,
    /// `mac` is accepted as a legacy parse alias, never emitted.
    #[serde(alias = "mac")]
    Mac64,
    MacUniversal,
    Linux32,
    Linux64,
    #[serde(rename = "ios")]
    Ios,
    Android,
    #[serde(rename = "webgl")]
    WebGl,
    WinStore,
    Tizen,
    Ps4,
    XboxOne,
    SamsungTv,
    N3ds,
    #[serde(rename = "wiiu")]
    WiiU,
    #[serde(rename = "tvos")]
    TvOs,
    Switch,
}

/// Immutable presentation and output metadata for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDescriptor {
    /// Human-readable name, drives selection lists and target ordering.
    pub display_name: &'static str,
    /// Stable short name used as the per-platform output subfolder.
    pub subfolder: &'static str,
    /// Identifier handed to the engine's build pipeline.
    pub engine_target: &'static str,
    /// Whether the output file needs an explicit `.exe` suffix. The engine
    /// appends a platform-appropriate suffix itself everywhere else.
    pub needs_exe_suffix: bool,
}

impl Platform {
    /// Every known platform, in catalog declaration order.
    pub const ALL: [Platform; 19] = [
        Platform::Win32,
        Platform::Win64,
        Platform::Mac32,
        Platform::Mac64,
        Platform::MacUniversal,
        Platform::Linux32,
        Platform::Linux64,
        Platform::Ios,
        Platform::Android,
        Platform::WebGl,
        Platform::WinStore,
        Platform::Tizen,
        Platform::Ps4,
        Platform::XboxOne,
        Platform::SamsungTv,
        Platform::N3ds,
        Platform::WiiU,
        Platform::TvOs,
        Platform::Switch,
    ];

    /// Get the platform token as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Win32 => "win32",
            Platform::Win64 => "win64",
            Platform::Mac32 => "mac32",
            Platform::Mac64 => "mac64",
            Platform::MacUniversal => "mac-universal",
            Platform::Linux32 => "linux32",
            Platform::Linux64 => "linux64",
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::WebGl => "webgl",
            Platform::WinStore => "win-store",
            Platform::Tizen => "tizen",
            Platform::Ps4 => "ps4",
            Platform::XboxOne => "xbox-one",
            Platform::SamsungTv => "samsung-tv",
            Platform::N3ds => "n3ds",
            Platform::WiiU => "wiiu",
            Platform::TvOs => "tvos",
            Platform::Switch => "switch",
        }
    }

    /// Look up the descriptor for this platform.
    pub fn descriptor(self) -> PlatformDescriptor {
        match self {
            Platform::Win32 => PlatformDescriptor {
                display_name: "Windows 32-bit",
                subfolder: "Win32",
                engine_target: "StandaloneWindows",
                needs_exe_suffix: true,
            },
            Platform::Win64 => PlatformDescriptor {
                display_name: "Windows 64-bit",
                subfolder: "Win64",
                engine_target: "StandaloneWindows64",
                needs_exe_suffix: true,
            },
            Platform::Mac32 => PlatformDescriptor {
                display_name: "Mac 32-bit",
                subfolder: "Mac32",
                engine_target: "StandaloneOSX",
                needs_exe_suffix: false,
            },
            Platform::Mac64 => PlatformDescriptor {
                display_name: "Mac 64-bit",
                subfolder: "Mac64",
                engine_target: "StandaloneOSX",
                needs_exe_suffix: false,
            },
            Platform::MacUniversal => PlatformDescriptor {
                display_name: "Mac Universal",
                subfolder: "MacUniversal",
                engine_target: "StandaloneOSX",
                needs_exe_suffix: false,
            },
            Platform::Linux32 => PlatformDescriptor {
                display_name: "Linux 32-bit",
                subfolder: "Linux32",
                engine_target: "StandaloneLinux",
                needs_exe_suffix: false,
            },
            Platform::Linux64 => PlatformDescriptor {
                display_name: "Linux 64-bit",
                subfolder: "Linux64",
                engine_target: "StandaloneLinux64",
                needs_exe_suffix: false,
            },
            Platform::Ios => PlatformDescriptor {
                display_name: "iOS",
                subfolder: "iOS",
                engine_target: "iOS",
                needs_exe_suffix: false,
            },
            Platform::Android => PlatformDescriptor {
                display_name: "Android",
                subfolder: "Android",
                engine_target: "Android",
                needs_exe_suffix: false,
            },
            Platform::WebGl => PlatformDescriptor {
                display_name: "WebGL",
                subfolder: "WebGL",
                engine_target: "WebGL",
                needs_exe_suffix: false,
            },
            Platform::WinStore => PlatformDescriptor {
                display_name: "Windows Store App",
                subfolder: "WinStore",
                engine_target: "WSAPlayer",
                needs_exe_suffix: false,
            },
            Platform::Tizen => PlatformDescriptor {
                display_name: "Tizen",
                subfolder: "Tizen",
                engine_target: "Tizen",
                needs_exe_suffix: false,
            },
            Platform::Ps4 => PlatformDescriptor {
                display_name: "Playstation 4",
                subfolder: "PS4",
                engine_target: "PS4",
                needs_exe_suffix: false,
            },
            Platform::XboxOne => PlatformDescriptor {
                display_name: "Xbox One",
                subfolder: "XboxOne",
                engine_target: "XboxOne",
                needs_exe_suffix: false,
            },
            Platform::SamsungTv => PlatformDescriptor {
                display_name: "Samsung TV",
                subfolder: "SamsungTV",
                engine_target: "SamsungTV",
                needs_exe_suffix: false,
            },
            Platform::N3ds => PlatformDescriptor {
                display_name: "Nintendo 3DS",
                subfolder: "Nintendo3DS",
                engine_target: "N3DS",
                needs_exe_suffix: false,
            },
            Platform::WiiU => PlatformDescriptor {
                display_name: "Nintendo WiiU",
                subfolder: "WiiU",
                engine_target: "WiiU",
                needs_exe_suffix: false,
            },
            Platform::TvOs => PlatformDescriptor {
                display_name: "tvOS",
                subfolder: "tvOS",
                engine_target: "tvOS",
                needs_exe_suffix: false,
            },
            Platform::Switch => PlatformDescriptor {
                display_name: "Nintendo Switch",
                subfolder: "Switch",
                engine_target: "Switch",
                needs_exe_suffix: false,
            },
        }
    }

    /// Human-readable name for selection lists and status output.
    pub fn display_name(self) -> &'static str {
        self.descriptor().display_name
    }

    /// Ordering used for presentation and for keeping target lists sorted:
    /// case-insensitive by display name, catalog declaration order breaking
    /// ties.
    pub fn display_cmp(self, other: Platform) -> Ordering {
        let a = self.descriptor().display_name.to_lowercase();
        let b = other.descriptor().display_name.to_lowercase();
        a.cmp(&b).then_with(|| self.cmp(&other))
    }
}

impl FromStr for Platform {
    type Err = UnknownPlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win32" => Ok(Platform::Win32),
            "win64" => Ok(Platform::Win64),
            "mac32" => Ok(Platform::Mac32),
            "mac64" | "mac" => Ok(Platform::Mac64),
            "mac-universal" => Ok(Platform::MacUniversal),
            "linux32" => Ok(Platform::Linux32),
            "linux64" => Ok(Platform::Linux64),
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "webgl" => Ok(Platform::WebGl),
            "win-store" => Ok(Platform::WinStore),
            "tizen" => Ok(Platform::Tizen),
            "ps4" => Ok(Platform::Ps4),
            "xbox-one" => Ok(Platform::XboxOne),
            "samsung-tv" => Ok(Platform::SamsungTv),
            "n3ds" => Ok(Platform::N3ds),
            "wiiu" => Ok(Platform::WiiU),
            "tvos" => Ok(Platform::TvOs),
            "switch" => Ok(Platform::Switch),
            _ => Err(UnknownPlatformError {
                token: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a platform token is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("unknown platform `{token}`")]
#[diagnostic(
    code(flotilla::platform::unknown),
    help("Run `flotilla platforms` to list every supported platform token")
)]
pub struct UnknownPlatformError {
    pub token: String,
}

/// All platforms paired with their display names, sorted case-insensitively
/// by display name. Drives selection lists and the `platforms` command.
pub fn sorted_display_list() -> Vec<(Platform, &'static str)> {
    let mut list: Vec<(Platform, &'static str)> = Platform::ALL
        .iter()
        .map(|p| (*p, p.descriptor().display_name))
        .collect();
    list.sort_by(|a, b| a.0.display_cmp(b.0));
    list
}
