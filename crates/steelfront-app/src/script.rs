//! Timed command scripts for unattended battles.
//!
//! A script is a JSON array of `{ "at_secs": f64, "command": PlayerCommand }`
//! entries, released to the engine once battle time reaches `at_secs`.

use std::collections::VecDeque;
use std::path::Path;

use serde::{Deserialize, Serialize};

use steelfront_core::commands::PlayerCommand;
use steelfront_core::error::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScriptedCommand {
    pub at_secs: f64,
    pub command: PlayerCommand,
}

#[derive(Debug, Clone, Default)]
pub struct CommandScript {
    pending: VecDeque<ScriptedCommand>,
}

impl CommandScript {
    /// Build a script; entries are ordered by time, ties keep file order.
    pub fn new(mut entries: Vec<ScriptedCommand>) -> Self {
        entries.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Self {
            pending: entries.into(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<ScriptedCommand> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Remove and return every command due at or before `elapsed_secs`.
    pub fn due(&mut self, elapsed_secs: f64) -> Vec<PlayerCommand> {
        let mut ready = Vec::new();
        while let Some(entry) = self.pending.front() {
            if entry.at_secs > elapsed_secs {
                break;
            }
            ready.push(entry.command);
            self.pending.pop_front();
        }
        ready
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_releases_in_time_order() {
        let json = r#"[
            { "at_secs": 2.0, "command": { "type": "Fire" } },
            { "at_secs": 0.0, "command": { "type": "SetThrottle", "value": 1.0 } },
            { "at_secs": 2.0, "command": { "type": "Reload" } }
        ]"#;
        let mut script = CommandScript::from_json(json).unwrap();
        assert_eq!(script.len(), 3);

        assert_eq!(
            script.due(0.0),
            vec![PlayerCommand::SetThrottle { value: 1.0 }]
        );
        assert!(script.due(1.9).is_empty());
        assert_eq!(
            script.due(2.5),
            vec![PlayerCommand::Fire, PlayerCommand::Reload]
        );
        assert!(script.is_empty());
    }

    #[test]
    fn test_script_rejects_unknown_command() {
        let json = r#"[{ "at_secs": 1.0, "command": { "type": "Teleport" } }]"#;
        assert!(CommandScript::from_json(json).is_err());
    }
}
