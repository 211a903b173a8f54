use crate::commands::CmdResult;
use crate::disk::Disk;
use crate::error::Result;

/// Entries under the cursor matching the named criterion.
///
/// Without `recursive` only direct children are tested. With it, the whole
/// subtree is walked depth-first, parents before children, siblings in
/// insertion order; directories are descended into whether or not they match.
pub fn run(disk: &Disk, criterion_name: &str, recursive: bool) -> Result<CmdResult> {
    let criterion = disk.registry().resolve(criterion_name)?;
    let tree = disk.tree();
    let cursor = disk.cursor();

    let candidates = if recursive {
        tree.walk(cursor)?
    } else {
        tree.directory(cursor)?
            .children
            .iter()
            .map(|&id| (id, 0))
            .collect()
    };

    let entries = candidates
        .into_iter()
        .filter(|&(id, _)| criterion.evaluate(tree, id))
        .map(|(id, depth)| tree.entry(id, depth))
        .collect::<Result<Vec<_>>>()?;
    Ok(CmdResult::default().with_listed(entries))
}
