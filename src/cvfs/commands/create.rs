use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;
use crate::error::Result;
use crate::history::Command;
use crate::model::{validate_node_name, DocType};

/// Creates a document as the last child of the cursor directory.
///
/// Checks run in order: name, type, uniqueness, capacity. The tree is not
/// touched unless all of them pass.
pub fn document(disk: &mut Disk, name: &str, doc_type: &str, content: &str) -> Result<CmdResult> {
    validate_node_name(name)?;
    let doc_type: DocType = doc_type.parse()?;

    let parent = disk.cursor();
    let node = disk
        .tree_mut()
        .create_document(parent, name, doc_type, content)?;
    let position = disk.tree().directory(parent)?.children.len() - 1;
    let entry = disk.tree().entry(node, 0)?;
    disk.commit(Command::CreateNode {
        parent,
        node,
        position,
    });

    let mut result = CmdResult::default();
    result.listed.push(entry);
    result.add_message(CmdMessage::success(format!("Document {} created.", name)));
    Ok(result)
}

/// Creates an empty directory as the last child of the cursor directory.
pub fn directory(disk: &mut Disk, name: &str) -> Result<CmdResult> {
    let parent = disk.cursor();
    let node = disk.tree_mut().create_directory(parent, name)?;
    let position = disk.tree().directory(parent)?.children.len() - 1;
    let entry = disk.tree().entry(node, 0)?;
    disk.commit(Command::CreateNode {
        parent,
        node,
        position,
    });

    let mut result = CmdResult::default();
    result.listed.push(entry);
    result.add_message(CmdMessage::success(format!("Directory {} created.", name)));
    Ok(result)
}
