use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;
use crate::error::{CvfsError, Result};
use crate::history::Command;

/// Renames a child of the cursor directory in place.
pub fn run(disk: &mut Disk, old_name: &str, new_name: &str) -> Result<CmdResult> {
    let parent = disk.cursor();
    let node = disk
        .tree()
        .child(parent, old_name)?
        .ok_or_else(|| CvfsError::NotFound(format!("File {}", old_name)))?;
    let from = disk.tree_mut().rename(node, new_name)?;
    disk.commit(Command::Rename {
        node,
        from,
        to: new_name.to_string(),
    });

    let mut result = CmdResult::default();
    result.listed.push(disk.tree().entry(node, 0)?);
    result.add_message(CmdMessage::success(format!(
        "File {} renamed to {}",
        old_name, new_name
    )));
    Ok(result)
}
