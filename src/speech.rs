use std::process::{Child, Command, Stdio};

use anyhow::{Result, bail};

/// Spoken-prompt collaborator. At most one utterance is ever in flight:
/// speaking again cancels whatever is still playing. Absence of a working
/// backend is a valid configuration; the session continues text-only.
pub trait Speaker {
    fn speak(&mut self, text: &str) -> Result<()>;
    fn cancel(&mut self);

    /// Whether audio output can actually happen, for the UI hint line.
    fn is_available(&self) -> bool {
        true
    }
}

/// Speaks by spawning a TTS command (`espeak`, `say`, or custom argv from
/// config) with the text appended as the final argument. The previous child
/// is killed before each new utterance.
pub struct CommandSpeaker {
    argv: Vec<String>,
    child: Option<Child>,
}

impl CommandSpeaker {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv, child: None }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&mut self, text: &str) -> Result<()> {
        self.cancel();
        let Some((program, args)) = self.argv.split_first() else {
            bail!("empty speech command");
        };
        let child = Command::new(program)
            .args(args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// No-op speaker for disabled or unavailable audio.
#[derive(Default)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn cancel(&mut self) {}

    fn is_available(&self) -> bool {
        false
    }
}

/// Pick the speaker for the current configuration. Falls back to the null
/// speaker when speech is disabled or the configured command isn't on PATH.
pub fn make_speaker(enabled: bool, argv: &[String]) -> Box<dyn Speaker> {
    if enabled && command_exists(argv.first().map(String::as_str)) {
        Box::new(CommandSpeaker::new(argv.to_vec()))
    } else {
        Box::new(NullSpeaker)
    }
}

fn command_exists(program: Option<&str>) -> bool {
    let Some(program) = program else {
        return false;
    };
    // Absolute/relative paths are checked directly; bare names via PATH.
    if program.contains(std::path::MAIN_SEPARATOR) {
        return std::path::Path::new(program).exists();
    }
    std::env::var_os("PATH")
        .map(|paths| {
            std::env::split_paths(&paths).any(|dir| dir.join(program).is_file())
        })
        .unwrap_or(false)
}
