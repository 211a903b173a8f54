use crate::commands::{CmdMessage, CmdResult};
use crate::disk::Disk;

/// Creates a fresh disk. The caller replaces whatever disk it held before,
/// tree, criteria and history included.
pub fn create(capacity: u64) -> (Disk, CmdResult) {
    let disk = Disk::new(capacity);
    let result = CmdResult::default().with_message(CmdMessage::success(format!(
        "New virtual disk created with size {}",
        capacity
    )));
    (disk, result)
}
