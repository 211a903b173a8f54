use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;
use crate::error::Result;

pub fn undo(disk: &mut Disk) -> Result<CmdResult> {
    let description = disk.undo()?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Undo successful ({}).",
        description
    ))))
}

pub fn redo(disk: &mut Disk) -> Result<CmdResult> {
    let description = disk.redo()?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Redo successful ({}).",
        description
    ))))
}
