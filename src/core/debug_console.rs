//=========================================================================
// Debug Console
//=========================================================================
//
// Tiny text command surface for inspecting a running engine.
//
// Commands:
//   dbg cbox         toggle the collision-box overlay
//   dbg mximnm       report a scene's capacity
//   dbg clearsp      remove every entity from a scene
//   disablecommands  refuse every further command
//
// `run()` always answers with a status line so the host can print it;
// `execute()` exposes the same behaviour as a `Result`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::str::FromStr;

use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{CommandError, SceneError};
use crate::core::scene::SceneHandle;
use crate::core::surface::SharedCanvas;

//=== Command =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleCollisionBoxes,
    MaxEntities,
    ClearEntities,
    DisableCommands,
}

impl Command {
    fn name(self) -> &'static str {
        match self {
            Command::ToggleCollisionBoxes => "debug cbox",
            Command::MaxEntities => "debug mximnm",
            Command::ClearEntities => "debug clearsp",
            Command::DisableCommands => "disablecommands",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split(' ');
        match (words.next(), words.next()) {
            (Some(""), _) | (None, _) => Err(CommandError::Empty),
            (Some("dbg"), Some("cbox")) => Ok(Command::ToggleCollisionBoxes),
            (Some("dbg"), Some("mximnm")) => Ok(Command::MaxEntities),
            (Some("dbg"), Some("clearsp")) => Ok(Command::ClearEntities),
            (Some("disablecommands"), _) => Ok(Command::DisableCommands),
            _ => Err(CommandError::Unknown(line.to_owned())),
        }
    }
}

//=== DebugConsole ========================================================

pub struct DebugConsole {
    canvas: SharedCanvas,
    enabled: bool,
}

impl DebugConsole {
    pub fn new(canvas: SharedCanvas, enabled: bool) -> Self {
        Self { canvas, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs a command line and returns the status line to show.
    pub fn run(&mut self, line: &str, scene: Option<&SceneHandle>) -> String {
        match self.execute(line, scene) {
            Ok(status) => status,
            Err(err) => {
                warn!(target: "debug", "command {:?} failed: {}", line, err);
                status_for(&err, line)
            }
        }
    }

    /// Runs a command line. Commands that inspect or clear a scene need
    /// `scene`.
    pub fn execute(&mut self, line: &str, scene: Option<&SceneHandle>) -> Result<String, CommandError> {
        if !self.enabled {
            return Err(CommandError::Disabled);
        }

        let command: Command = line.parse()?;
        info!(target: "debug", "running {}", command.name());

        match command {
            Command::ToggleCollisionBoxes => {
                let mut canvas = self.canvas.try_borrow_mut().map_err(|_| SceneError::Busy)?;
                let show = !canvas.show_collision_boxes();
                canvas.set_show_collision_boxes(show);
                Ok(format!("scenic debug cbox | set to {}", show))
            }
            Command::MaxEntities => {
                let scene = require_scene(scene, command)?;
                Ok(format!("scenic debug mximnm | {} sprites", scene.capacity()))
            }
            Command::ClearEntities => {
                require_scene(scene, command)?.clear_entities()?;
                Ok("scenic debug clearsp | sprites cleared".to_owned())
            }
            Command::DisableCommands => {
                self.enabled = false;
                Ok("scenic disablecommands | commands disabled".to_owned())
            }
        }
    }
}

impl std::fmt::Debug for DebugConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugConsole")
            .field("enabled", &self.enabled)
            .finish()
    }
}

fn require_scene(scene: Option<&SceneHandle>, command: Command) -> Result<&SceneHandle, CommandError> {
    scene.ok_or(CommandError::MissingScene {
        command: command.name(),
    })
}

fn status_for(err: &CommandError, line: &str) -> String {
    match err {
        CommandError::Disabled => "scenic | cannot use commands, disabled".to_owned(),
        CommandError::Empty => "scenic | empty command".to_owned(),
        CommandError::Unknown(_) => "scenic | command error".to_owned(),
        CommandError::MissingScene { command } => {
            format!("scenic {} | a scene argument is required", command)
        }
        CommandError::Scene(err) => format!("scenic | {}: {}", line, err),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
