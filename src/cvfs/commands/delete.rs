use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;
use crate::error::Result;
use crate::history::Command;

/// Detaches the named child of the cursor directory.
///
/// The node (and its subtree) stays alive in the log so undo can put it
/// back where it was.
pub fn run(disk: &mut Disk, name: &str) -> Result<CmdResult> {
    let parent = disk.cursor();
    let (node, position) = disk.tree_mut().remove(parent, name)?;
    let entry = disk.tree().entry(node, 0)?;
    disk.commit(Command::RemoveNode {
        parent,
        node,
        position,
    });

    let mut result = CmdResult::default();
    result.listed.push(entry);
    result.add_message(CmdMessage::success(format!("File {} deleted.", name)));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, list};
    use crate::error::CvfsError;

    fn names(disk: &Disk) -> Vec<String> {
        list::run(disk)
            .unwrap()
            .listed
            .into_iter()
            .map(|e| e.name)
            .collect()
    }

    #[test]
    fn delete_then_undo_restores_position_and_subtree() {
        let mut disk = Disk::new(1_000);
        create::document(&mut disk, "a", "txt", "").unwrap();
        create::directory(&mut disk, "d").unwrap();
        create::document(&mut disk, "z", "txt", "").unwrap();
        crate::commands::change_dir::run(&mut disk, "d").unwrap();
        create::document(&mut disk, "inner", "txt", "abc").unwrap();
        crate::commands::change_dir::run(&mut disk, "..").unwrap();
        let before = disk.tree().total_size();

        run(&mut disk, "d").unwrap();
        assert_eq!(names(&disk), vec!["a", "z"]);
        assert_eq!(disk.tree().total_size(), before - 86);

        disk.undo().unwrap();
        assert_eq!(names(&disk), vec!["a", "d", "z"]);
        assert_eq!(disk.tree().total_size(), before);

        disk.redo().unwrap();
        assert_eq!(names(&disk), vec!["a", "z"]);
    }

    #[test]
    fn missing_file() {
        let mut disk = Disk::new(100);
        assert!(matches!(run(&mut disk, "nope"), Err(CvfsError::NotFound(_))));
        assert_eq!(disk.history().undo_len(), 0);
    }
}
