//! Static platform table.
//!
//! One row per supported `(os, arch)` pair. A row names the engine directory
//! (`{os}_{arch}`), the synthesis executable inside it, the playback program
//! with its fixed argument list, and the shared-library symlinks the engine
//! directory needs. Every playback argument list encodes the same stream
//! format: 22050 Hz, signed 16-bit little-endian, mono.

use crate::error::CoreError;

/// Flag that makes the engine write raw PCM to stdout.
pub const RAW_OUTPUT_FLAG: &str = "--output-raw";

/// Flag that passes the model path to the engine.
pub const MODEL_FLAG: &str = "--model";

/// External audio player invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCommand {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

/// A symlink the engine's dynamic loader expects, relative to the engine dir.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryLink {
    pub link: &'static str,
    pub target: &'static str,
}

/// One supported platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSpec {
    /// `std::env::consts::OS` value.
    pub os: &'static str,
    /// `std::env::consts::ARCH` value.
    pub arch: &'static str,
    /// Engine directory name under `piper/`.
    pub dir_name: &'static str,
    /// Synthesis executable file name.
    pub executable: &'static str,
    pub playback: PlaybackCommand,
    pub library_links: &'static [LibraryLink],
}

const APLAY: PlaybackCommand = PlaybackCommand {
    program: "aplay",
    args: &["-q", "-r", "22050", "-f", "S16_LE", "-t", "raw", "-c", "1"],
};

const SOX_PLAY: PlaybackCommand = PlaybackCommand {
    program: "play",
    args: &[
        "-q", "-t", "raw", "-r", "22050", "-b", "16", "-e", "signed-integer", "-L", "-c", "1",
        "-",
    ],
};

const FFPLAY: PlaybackCommand = PlaybackCommand {
    program: "ffplay",
    args: &[
        "-nodisp", "-autoexit", "-loglevel", "quiet", "-f", "s16le", "-ar", "22050",
        "-ch_layout", "mono", "-",
    ],
};

const LINUX_LINKS: &[LibraryLink] = &[
    LibraryLink {
        link: "libespeak-ng.so.1",
        target: "libespeak-ng.so.1.52.1",
    },
    LibraryLink {
        link: "libpiper_phonemize.so.1",
        target: "libpiper_phonemize.so.1.2.0",
    },
    LibraryLink {
        link: "libonnxruntime.so",
        target: "libonnxruntime.so.1.14.1",
    },
];

const DARWIN_LINKS: &[LibraryLink] = &[
    LibraryLink {
        link: "libespeak-ng.1.dylib",
        target: "libespeak-ng.1.1.51.dylib",
    },
    LibraryLink {
        link: "libpiper_phonemize.1.dylib",
        target: "libpiper_phonemize.1.2.0.dylib",
    },
    LibraryLink {
        link: "libonnxruntime.dylib",
        target: "libonnxruntime.1.14.1.dylib",
    },
];

static PLATFORMS: &[PlatformSpec] = &[
    PlatformSpec {
        os: "linux",
        arch: "x86_64",
        dir_name: "linux_x64",
        executable: "piper",
        playback: APLAY,
        library_links: LINUX_LINKS,
    },
    PlatformSpec {
        os: "linux",
        arch: "aarch64",
        dir_name: "linux_arm64",
        executable: "piper",
        playback: APLAY,
        library_links: LINUX_LINKS,
    },
    PlatformSpec {
        os: "macos",
        arch: "x86_64",
        dir_name: "darwin_x64",
        executable: "piper",
        playback: SOX_PLAY,
        library_links: DARWIN_LINKS,
    },
    PlatformSpec {
        os: "macos",
        arch: "aarch64",
        dir_name: "darwin_arm64",
        executable: "piper",
        playback: SOX_PLAY,
        library_links: DARWIN_LINKS,
    },
    PlatformSpec {
        os: "windows",
        arch: "x86_64",
        dir_name: "win32_x64",
        executable: "piper.exe",
        playback: FFPLAY,
        library_links: &[],
    },
];

impl PlatformSpec {
    /// Look up the row for an `(os, arch)` pair.
    pub fn lookup(os: &str, arch: &str) -> Result<&'static Self, CoreError> {
        PLATFORMS
            .iter()
            .find(|p| p.os == os && p.arch == arch)
            .ok_or_else(|| CoreError::UnsupportedPlatform {
                os: os.to_string(),
                arch: arch.to_string(),
            })
    }

    /// The row for the platform this binary was compiled for.
    pub fn current() -> Result<&'static Self, CoreError> {
        Self::lookup(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Every supported row.
    pub fn all() -> &'static [Self] {
        PLATFORMS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_has_unique_dir_name() {
        let mut names: Vec<_> = PlatformSpec::all().iter().map(|p| p.dir_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PlatformSpec::all().len());
    }

    #[test]
    fn dir_names_follow_os_arch_pattern() {
        for row in PlatformSpec::all() {
            let (os, arch) = row.dir_name.split_once('_').unwrap();
            assert!(["linux", "darwin", "win32"].contains(&os), "{}", row.dir_name);
            assert!(["x64", "arm64"].contains(&arch), "{}", row.dir_name);
        }
    }

    #[test]
    fn playback_args_encode_stream_format() {
        for row in PlatformSpec::all() {
            let args = row.playback.args.join(" ");
            assert!(args.contains("22050"), "{}: {args}", row.dir_name);
        }
    }

    #[test]
    fn unknown_platform_is_rejected() {
        let err = PlatformSpec::lookup("plan9", "mips").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn lookup_finds_linux_x64() {
        let row = PlatformSpec::lookup("linux", "x86_64").unwrap();
        assert_eq!(row.dir_name, "linux_x64");
        assert_eq!(row.playback.program, "aplay");
    }
}
