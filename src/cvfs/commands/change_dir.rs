use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;
use crate::error::{CvfsError, Result};
use crate::history::Command;
use crate::model::Node;

/// Token that moves the cursor to its parent.
pub const PARENT: &str = "..";

/// Moves the cursor to a child directory, or to the parent with [`PARENT`].
pub fn run(disk: &mut Disk, target: &str) -> Result<CmdResult> {
    let from = disk.cursor();
    let (to, message) = if target == PARENT {
        let parent = disk.tree().get(from)?.parent().ok_or(CvfsError::AtRoot)?;
        (parent, "Changed to parent directory.".to_string())
    } else {
        let id = disk
            .tree()
            .child(from, target)?
            .ok_or_else(|| CvfsError::NotFound(format!("Directory {}", target)))?;
        match disk.tree().get(id)? {
            Node::Directory(_) => (id, format!("Changed to directory {}", target)),
            Node::Document(_) => return Err(CvfsError::NotADirectory(target.to_string())),
        }
    };

    disk.set_cursor(to);
    disk.commit(Command::ChangeDir { from, to });
    Ok(CmdResult::default().with_message(CmdMessage::success(message)))
}
