use crate::commands::{CmdMessage, CmdResult, CriterionListing};
use crate::criterion::Criterion;
use crate::disk::Disk;
use crate::error::Result;
use crate::history::Command;
use crate::model::validate_criterion_name;
use std::sync::Arc;

fn define(disk: &mut Disk, name: &str, criterion: Criterion) -> Result<Arc<Criterion>> {
    let criterion = Arc::new(criterion);
    disk.registry_mut().register(name, criterion.clone())?;
    disk.commit(Command::DefineCriterion {
        name: name.to_string(),
        criterion: criterion.clone(),
    });
    Ok(criterion)
}

// Name problems are reported before operand or operator problems.
fn check_name(disk: &Disk, name: &str) -> Result<()> {
    validate_criterion_name(name)?;
    disk.registry().ensure_free(name)
}

/// Defines an attribute comparison, e.g. `size >= 100`.
pub fn simple(disk: &mut Disk, name: &str, attr: &str, op: &str, value: &str) -> Result<CmdResult> {
    check_name(disk, name)?;
    let criterion = Criterion::comparator(attr, op, value)?;
    define(disk, name, criterion)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Simple criterion {} created.",
        name
    ))))
}

/// Defines the negation of an existing criterion.
pub fn negation(disk: &mut Disk, name: &str, of: &str) -> Result<CmdResult> {
    check_name(disk, name)?;
    let inner = disk.registry().resolve(of)?;
    define(disk, name, Criterion::negation(inner))?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Negation criterion {} created.",
        name
    ))))
}

/// Combines two existing criteria with `&&` or `||`.
pub fn binary(
    disk: &mut Disk,
    name: &str,
    left: &str,
    op: &str,
    right: &str,
) -> Result<CmdResult> {
    check_name(disk, name)?;
    let left = disk.registry().resolve(left)?;
    let right = disk.registry().resolve(right)?;
    let criterion = Criterion::binary(left, op, right)?;
    define(disk, name, criterion)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Binary criterion {} created.",
        name
    ))))
}

/// Every registered criterion with its description, ordered by name.
pub fn list(disk: &Disk) -> CmdResult {
    let listed = disk
        .registry()
        .list()
        .into_iter()
        .map(|(name, description)| CriterionListing { name, description })
        .collect();
    CmdResult::default().with_criteria(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CvfsError;

    #[test]
    fn redefining_is_duplicate() {
        let mut disk = Disk::new(100);
        simple(&mut disk, "sz", "size", ">", "10").unwrap();
        assert!(matches!(
            simple(&mut disk, "sz", "size", ">", "10"),
            Err(CvfsError::Duplicate(_))
        ));
        assert_eq!(disk.history().undo_len(), 1);
    }

    #[test]
    fn invalid_definitions_are_not_recorded() {
        let mut disk = Disk::new(100);
        assert!(matches!(
            simple(&mut disk, "s1", "size", ">", "10"),
            Err(CvfsError::InvalidName(_))
        ));
        assert!(matches!(
            simple(&mut disk, "sz", "size", "~", "10"),
            Err(CvfsError::InvalidCriterion(_))
        ));
        assert!(matches!(
            negation(&mut disk, "nn", "zz"),
            Err(CvfsError::NotFound(_))
        ));
        assert!(matches!(
            binary(&mut disk, "bb", "IsDocument", "xor", "IsDocument"),
            Err(CvfsError::InvalidCriterion(_))
        ));
        assert_eq!(disk.history().undo_len(), 0);
        assert_eq!(disk.registry().list().len(), 1);
    }

    #[test]
    fn composites_share_operands() {
        let mut disk = Disk::new(100);
        simple(&mut disk, "nm", "name", "contains", "a").unwrap();
        negation(&mut disk, "nn", "nm").unwrap();
        let nm = disk.registry().resolve("nm").unwrap();
        let nn = disk.registry().resolve("nn").unwrap();
        match nn.as_ref() {
            Criterion::Negation(inner) => assert!(Arc::ptr_eq(inner, &nm)),
            other => panic!("unexpected criterion {:?}", other),
        }
    }

    #[test]
    fn undo_removes_definition() {
        let mut disk = Disk::new(100);
        simple(&mut disk, "ty", "type", "equals", "txt").unwrap();
        disk.undo().unwrap();
        assert!(!disk.registry().contains("ty"));
        disk.redo().unwrap();
        assert!(disk.registry().contains("ty"));
    }

    #[test]
    fn listing_renders_descriptions() {
        let mut disk = Disk::new(100);
        simple(&mut disk, "sz", "size", ">=", "10").unwrap();
        negation(&mut disk, "ns", "sz").unwrap();
        binary(&mut disk, "bo", "IsDocument", "||", "ns").unwrap();

        let listed = list(&disk).criteria;
        let by_name = |n: &str| {
            listed
                .iter()
                .find(|c| c.name == n)
                .map(|c| c.description.clone())
                .unwrap()
        };
        assert_eq!(by_name("IsDocument"), "IsDocument");
        assert_eq!(by_name("ns"), "!( attrName: size, op: >=, val: 10 )");
        assert_eq!(
            by_name("bo"),
            "( IsDocument ) || ( !( attrName: size, op: >=, val: 10 ) )"
        );
    }
}
