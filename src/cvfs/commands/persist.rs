use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;
use crate::error::Result;
use crate::snapshot;
use crate::store::SnapshotStore;

/// Writes a snapshot of the disk. Not recorded in the history.
pub fn save<S: SnapshotStore>(disk: &Disk, store: &mut S, name: &str) -> Result<CmdResult> {
    let bytes = snapshot::encode(disk)?;
    let location = store.save(name, &bytes)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Virtual disk saved to {}",
        location
    ))))
}

/// Reads a snapshot back into a fresh disk with an empty history.
pub fn load<S: SnapshotStore>(store: &S, name: &str) -> Result<(Disk, CmdResult)> {
    let bytes = store.load(name)?;
    let disk = snapshot::decode(&bytes)?;
    let result = CmdResult::default().with_message(CmdMessage::success(format!(
        "Virtual disk loaded from {}",
        name
    )));
    Ok((disk, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create, criteria, list};
    use crate::store::memory::InMemorySnapshotStore;

    #[test]
    fn save_and_load_through_a_store() {
        let mut store = InMemorySnapshotStore::new();
        let mut disk = Disk::new(500);
        create::document(&mut disk, "a", "txt", "hello").unwrap();
        criteria::simple(&mut disk, "nm", "name", "contains", "a").unwrap();
        save(&disk, &mut store, "backup").unwrap();

        let (loaded, result) = load(&store, "backup").unwrap();
        assert_eq!(result.messages[0].content, "Virtual disk loaded from backup");
        assert_eq!(list::run(&loaded).unwrap().listed, list::run(&disk).unwrap().listed);
        assert!(loaded.registry().contains("nm"));
        assert_eq!(loaded.history().undo_len(), 0);
    }
}
