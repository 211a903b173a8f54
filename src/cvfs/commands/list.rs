use crate::commands::CmdResult;
use crate::disk::Disk;
use crate::error::Result;

/// Direct children of the cursor directory, in insertion order.
pub fn run(disk: &Disk) -> Result<CmdResult> {
    let entries = disk.tree().list_children(disk.cursor())?;
    Ok(CmdResult::default().with_listed(entries))
}

/// The whole subtree under the cursor, depth-first, parents before children.
///
/// Totals sum the size of every listed entry, so nested nodes count both on
/// their own and inside their directories.
pub fn recursive(disk: &Disk) -> Result<CmdResult> {
    let tree = disk.tree();
    let entries = tree
        .walk(disk.cursor())?
        .into_iter()
        .map(|(id, depth)| tree.entry(id, depth))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed(entries))
}
