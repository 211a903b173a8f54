use colored::Colorize;
use cvfs::api::{CmdMessage, CmdResult, CriterionListing, MessageLevel, Totals};
use cvfs::error::{CvfsError, ErrorKind};
use cvfs::model::{Entry, NodeKind};

const INDENT: &str = "    ";

pub fn print_result(result: &CmdResult) {
    print_entries(&result.listed);
    if let Some(totals) = &result.totals {
        print_totals(totals);
    }
    print_criteria(&result.criteria);
    print_messages(&result.messages);
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn format_entry(entry: &Entry) -> String {
    let indent = INDENT.repeat(entry.depth);
    match (entry.kind, entry.doc_type) {
        (NodeKind::Document, Some(doc_type)) => format!(
            "{}Document Name: {}, Type: {}, Size: {}",
            indent, entry.name, doc_type, entry.size
        ),
        _ => format!(
            "{}Directory Name: {}, Size: {}",
            indent,
            entry.name.bold(),
            entry.size
        ),
    }
}

fn print_entries(entries: &[Entry]) {
    for entry in entries {
        println!("{}", format_entry(entry));
    }
}

fn print_totals(totals: &Totals) {
    println!(
        "{}",
        format!(
            "Total files: {}, Total size: {}",
            totals.count, totals.size
        )
        .dimmed()
    );
}

fn print_criteria(criteria: &[CriterionListing]) {
    for criterion in criteria {
        println!("{}: {}", criterion.name.yellow(), criterion.description);
    }
}

pub fn print_error(error: &CvfsError) {
    let line = format!("Error: {}", error);
    match error.kind() {
        ErrorKind::Usage | ErrorKind::EmptyHistory => eprintln!("{}", line.yellow()),
        _ => eprintln!("{}", line.red()),
    }
}

pub fn print_unknown(command: &str) {
    println!("{}", format!("Unknown command: {}", command).yellow());
}
