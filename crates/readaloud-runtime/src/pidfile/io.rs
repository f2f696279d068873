//! Atomic session file I/O.
//!
//! Format: the owning readaloud PID, then `<pid> <program>` for synthesis
//! and playback
//! ```text
//! 4200
//! 4242 piper
//! 4243 aplay
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use readaloud_core::PathError;
use readaloud_core::paths::pids_dir;

/// File name of the session file inside the pids directory.
pub const SESSION_FILE_NAME: &str = "session.pid";

/// One recorded process: its PID and executable file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedProcess {
    pub pid: u32,
    pub program: String,
}

impl RecordedProcess {
    /// Record `program` by file name only.
    pub fn new(pid: u32, program: &str) -> Self {
        let program = Path::new(program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(program)
            .to_string();
        Self { pid, program }
    }
}

/// The synthesis/playback pair of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// PID of the readaloud process that spawned (and reaps) the pair.
    pub owner: u32,
    pub synthesis: RecordedProcess,
    pub playback: RecordedProcess,
}

/// Default session file location (`<data_root>/pids/session.pid`).
pub fn session_file_path() -> Result<PathBuf, PathError> {
    Ok(pids_dir()?.join(SESSION_FILE_NAME))
}

/// Write the session file atomically using temp file + rename.
pub fn write_session_file(path: &Path, record: &SessionRecord) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    let content = format!(
        "{}\n{} {}\n{} {}\n",
        record.owner,
        record.synthesis.pid,
        record.synthesis.program,
        record.playback.pid,
        record.playback.program
    );
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)
}

/// Read the session file.
pub fn read_session_file(path: &Path) -> io::Result<SessionRecord> {
    let content = fs::read_to_string(path)?;
    parse_session_content(&content)
}

/// Delete the session file (idempotent, no error if missing).
pub fn delete_session_file(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Delete the session file only if it still holds `record`.
///
/// A session that was preempted by another process must not remove the
/// record the preempting process wrote afterwards.
pub fn clear_session_file(path: &Path, record: &SessionRecord) -> io::Result<()> {
    match read_session_file(path) {
        Ok(current) if current == *record => delete_session_file(path),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn parse_session_content(content: &str) -> io::Result<SessionRecord> {
    let mut lines = content.lines();
    let owner = lines
        .next()
        .and_then(|s| s.trim().parse::<u32>().ok())
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "missing or invalid owner PID"))?;
    let synthesis = parse_line(lines.next(), "synthesis")?;
    let playback = parse_line(lines.next(), "playback")?;
    Ok(SessionRecord {
        owner,
        synthesis,
        playback,
    })
}

fn parse_line(line: Option<&str>, role: &str) -> io::Result<RecordedProcess> {
    let invalid = || {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("missing or invalid {role} entry"),
        )
    };
    let (pid, program) = line.ok_or_else(invalid)?.trim().split_once(' ').ok_or_else(invalid)?;
    let pid = pid.parse::<u32>().map_err(|_| invalid())?;
    let program = program.trim();
    if program.is_empty() {
        return Err(invalid());
    }
    Ok(RecordedProcess {
        pid,
        program: program.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(synth: u32, player: u32) -> SessionRecord {
        SessionRecord {
            owner: 7,
            synthesis: RecordedProcess::new(synth, "/opt/readaloud/piper/linux_x64/piper"),
            playback: RecordedProcess::new(player, "aplay"),
        }
    }

    #[test]
    fn roundtrip_session_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("pids").join(SESSION_FILE_NAME);

        write_session_file(&path, &record(100, 101)).unwrap();
        let read = read_session_file(&path).unwrap();
        assert_eq!(read, record(100, 101));
        assert_eq!(read.synthesis.program, "piper");

        delete_session_file(&path).unwrap();
        assert!(!path.exists());
        delete_session_file(&path).unwrap();
    }

    #[test]
    fn clear_keeps_foreign_record() {
        let temp = tempdir().unwrap();
        let path = temp.path().join(SESSION_FILE_NAME);

        write_session_file(&path, &record(200, 201)).unwrap();
        clear_session_file(&path, &record(100, 101)).unwrap();
        assert!(path.exists());

        clear_session_file(&path, &record(200, 201)).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn rejects_truncated_content() {
        assert!(parse_session_content("7\n12 piper\n").is_err());
        assert!(parse_session_content("7\nabc piper\n13 aplay\n").is_err());
        assert!(parse_session_content("7\n12\n13 aplay\n").is_err());
        assert!(parse_session_content("12 piper\n13 aplay\n").is_err());
    }
}
