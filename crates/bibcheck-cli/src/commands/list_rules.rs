//! List rules command implementation.

use bibcheck_core::IssueKind;
use bibcheck_rules::all_rules;

/// DOI existence checks, which run outside the rule registry.
const DOI_KINDS: [IssueKind; 3] = [
    IssueKind::DoiTrailingPeriod,
    IssueKind::DoiInParenthesis,
    IssueKind::DoiNotFound,
];

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<28} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<28} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nDOI lookups (disable with --no-doi-lookup or [doi] enabled = false):");
    for kind in DOI_KINDS {
        println!("{:<10} {:<28}", kind.code(), kind.name());
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  bibcheck check --rules et-al-not-wrapped,doi-is-url");
    println!("  bibcheck check --rules BIB001,BIB002");
}
