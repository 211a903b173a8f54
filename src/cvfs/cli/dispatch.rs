use super::print;
use cvfs::api::CvfsApi;
use cvfs::error::{CvfsError, Result};
use cvfs::store::SnapshotStore;

pub enum Flow {
    Continue,
    Quit,
}

fn expect_args(tokens: &[String], count: usize, usage: &str) -> Result<()> {
    if tokens.len() != count + 1 {
        return Err(CvfsError::Usage(usage.to_string()));
    }
    Ok(())
}

/// Runs one tokenized command line against the API.
pub fn dispatch<S: SnapshotStore>(api: &mut CvfsApi<S>, tokens: &[String]) -> Result<Flow> {
    let t = |i: usize| tokens[i].as_str();

    let result = match t(0) {
        "newDisk" => {
            expect_args(tokens, 1, "newDisk diskSize")?;
            let capacity = t(1).parse::<u64>().map_err(|_| {
                CvfsError::Usage(format!("disk size must be a non-negative integer: {}", t(1)))
            })?;
            api.new_disk(capacity)
        }
        "newDoc" => {
            expect_args(tokens, 3, "newDoc docName docType docContent")?;
            api.new_document(t(1), t(2), t(3))?
        }
        "newDir" => {
            expect_args(tokens, 1, "newDir dirName")?;
            api.new_directory(t(1))?
        }
        "delete" => {
            expect_args(tokens, 1, "delete fileName")?;
            api.delete(t(1))?
        }
        "rename" => {
            expect_args(tokens, 2, "rename oldFileName newFileName")?;
            api.rename(t(1), t(2))?
        }
        "changeDir" => {
            expect_args(tokens, 1, "changeDir dirName")?;
            api.change_dir(t(1))?
        }
        "list" => {
            expect_args(tokens, 0, "list")?;
            api.list()?
        }
        "rList" => {
            expect_args(tokens, 0, "rList")?;
            api.list_recursive()?
        }
        "newSimpleCri" => {
            expect_args(tokens, 4, "newSimpleCri criName attrName op val")?;
            api.new_simple_criterion(t(1), t(2), t(3), t(4))?
        }
        "newNegation" => {
            expect_args(tokens, 2, "newNegation criName1 criName2")?;
            api.new_negation(t(1), t(2))?
        }
        "newBinaryCri" => {
            expect_args(tokens, 4, "newBinaryCri criName1 criName3 logicOp criName4")?;
            api.new_binary_criterion(t(1), t(2), t(3), t(4))?
        }
        "printAllCriteria" => {
            expect_args(tokens, 0, "printAllCriteria")?;
            api.list_criteria()?
        }
        "search" => {
            expect_args(tokens, 1, "search criName")?;
            api.search(t(1), false)?
        }
        "rSearch" => {
            expect_args(tokens, 1, "rSearch criName")?;
            api.search(t(1), true)?
        }
        "save" => {
            expect_args(tokens, 1, "save path")?;
            api.save(t(1))?
        }
        "load" => {
            expect_args(tokens, 1, "load path")?;
            api.load(t(1))?
        }
        "undo" => {
            expect_args(tokens, 0, "undo")?;
            api.undo()?
        }
        "redo" => {
            expect_args(tokens, 0, "redo")?;
            api.redo()?
        }
        "quit" => {
            println!("Terminating the CVFS system.");
            return Ok(Flow::Quit);
        }
        other => {
            print::print_unknown(other);
            return Ok(Flow::Continue);
        }
    };

    // Only queries print their entries.
    if matches!(t(0), "list" | "rList" | "search" | "rSearch" | "printAllCriteria") {
        print::print_result(&result);
    } else {
        print::print_messages(&result.messages);
    }
    Ok(Flow::Continue)
}
